use crate::orchestration::command::Command;
use crate::persona::PersonaState;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Lifecycle events recorded for every chat turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TurnEventType {
    TurnStarted,
    CommandDetected,
    CommandApplied,
    CommandUnrecognized,
    TurnCompleted,
}

/// General-purpose turn event stored in memory and optionally as JSONL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEvent {
    pub event_id: Uuid,
    pub turn_id: Uuid,
    pub event_type: TurnEventType,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
}

impl TurnEvent {
    pub fn new(turn_id: Uuid, event_type: TurnEventType, details: serde_json::Value) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            turn_id,
            event_type,
            timestamp: Utc::now(),
            details,
        }
    }
}

/// Structured payload logged when a command reaches the executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEventDetails {
    pub command: Command,
    pub hash_before: Option<String>,
    pub hash_after: Option<String>,
}

impl CommandEventDetails {
    pub fn detected(command: &Command) -> Self {
        Self {
            command: command.clone(),
            hash_before: None,
            hash_after: None,
        }
    }

    pub fn applied(command: &Command, before: &PersonaState, after: &PersonaState) -> Self {
        Self {
            command: command.clone(),
            hash_before: snapshot_hash(before),
            hash_after: snapshot_hash(after),
        }
    }

    /// True when the application left the snapshot unchanged.
    pub fn is_noop(&self) -> bool {
        self.hash_before.is_some() && self.hash_before == self.hash_after
    }
}

/// Lowercase hex SHA-256 of the JSON-serialized snapshot.
pub fn snapshot_hash(state: &PersonaState) -> Option<String> {
    let bytes = serde_json::to_vec(state).ok()?;
    Some(compute_hash(&bytes))
}

/// Computes a lowercase hex SHA-256 hash of the provided bytes.
pub fn compute_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{:x}", digest)
}

/// Ordered record of turn events, mirrored to a JSONL file when configured.
#[derive(Debug, Default)]
pub struct TurnJournal {
    events: Vec<TurnEvent>,
    path: Option<PathBuf>,
}

impl TurnJournal {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            events: Vec::new(),
            path: Some(path.into()),
        }
    }

    /// Records `event`. Persistence failures are logged, never surfaced, so a
    /// broken log file cannot abort a turn.
    pub fn record(&mut self, event: TurnEvent) {
        tracing::debug!(
            turn_id = %event.turn_id,
            event_type = ?event.event_type,
            "turn event"
        );
        if let Some(path) = &self.path {
            if let Err(err) = append_event(path, &event) {
                tracing::warn!(error = %format!("{err:#}"), "failed to persist turn event");
            }
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[TurnEvent] {
        &self.events
    }
}

fn append_event(path: &Path, event: &TurnEvent) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating event log directory {:?}", parent))?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed opening event log {:?}", path))?;
    file.write_all(serde_json::to_string(event)?.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Reads back a JSONL event log.
pub fn load_events(path: &Path) -> Result<Vec<TurnEvent>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed reading event log {:?}", path))?;
    let mut events = Vec::new();
    for line in data.lines().filter(|l| !l.trim().is_empty()) {
        let event: TurnEvent =
            serde_json::from_str(line).with_context(|| "Failed parsing turn event")?;
        events.push(event);
    }
    Ok(events)
}
