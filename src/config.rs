//! Configuration primitives for the persona chat interpreter.
//!
//! Stored in a machine-readable TOML file located at
//! `<workspace root>/config/config.toml`, where the workspace root is
//! `PERSONACANVAS_HOME` when set and the OS data directory otherwise.
//! A missing file means defaults.

use crate::chat::intent_router::{ExecutorSettings, RuleSettings};
use crate::persona::Priority;
use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the workspace root.
pub const HOME_ENV_VAR: &str = "PERSONACANVAS_HOME";

/// Root configuration for the interpreter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Simulated AI round-trip applied to every accepted turn.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Years moved by a single "younger"/"older" command.
    #[serde(default = "default_relative_age_step")]
    pub relative_age_step: u32,
    /// Half-width of the range built from a single stated age.
    #[serde(default = "default_single_age_window")]
    pub single_age_window: u32,
    /// Priority assigned to pain points added through chat.
    #[serde(default)]
    pub default_pain_point_priority: Priority,
    /// When set, turn events are appended here as JSONL.
    #[serde(default)]
    pub event_log_path: Option<PathBuf>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            relative_age_step: default_relative_age_step(),
            single_age_window: default_single_age_window(),
            default_pain_point_priority: Priority::default(),
            event_log_path: None,
        }
    }
}

impl InterpreterConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn rule_settings(&self) -> RuleSettings {
        RuleSettings {
            single_age_window: self.single_age_window,
        }
    }

    pub fn executor_settings(&self) -> ExecutorSettings {
        ExecutorSettings {
            relative_age_step: self.relative_age_step,
            default_pain_point_priority: self.default_pain_point_priority,
        }
    }
}

const fn default_latency_ms() -> u64 {
    1_500
}

const fn default_relative_age_step() -> u32 {
    5
}

const fn default_single_age_window() -> u32 {
    5
}

/// Returns the root directory where PersonaCanvas stores data.
///
/// Order of precedence:
/// 1. `PERSONACANVAS_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var(HOME_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("PersonaCanvas"))
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(workspace_root()?.join("config"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<InterpreterConfig> {
    load_from(&config_file_path()?)
}

pub fn load_from(path: &Path) -> Result<InterpreterConfig> {
    if !path.exists() {
        return Ok(InterpreterConfig::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let cfg: InterpreterConfig = toml::from_str(&data)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;
    Ok(cfg)
}

/// Persists the configuration to disk.
pub fn save(config: &InterpreterConfig) -> Result<PathBuf> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed creating config directory {:?}", dir))?;
    let path = dir.join(CONFIG_FILE_NAME);
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data).with_context(|| format!("Failed writing config file {:?}", path))?;
    Ok(path)
}
