//! Command definitions emitted by the chat intent classifier.

use crate::persona::{AgeRange, PersonaField, PersonaKind};
use serde::{Deserialize, Serialize};

/// Template confidence for a freshly built command. Rules always override it
/// with their own score; a command leaving the classifier never carries it.
pub const DEFAULT_CONFIDENCE: f32 = 0.3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Update,
    Add,
    Remove,
    Set,
    Change,
}

impl CommandAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Set => "set",
            Self::Change => "change",
        }
    }
}

/// Closed set of entities the executor knows how to mutate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CommandTarget {
    PrimaryPersona,
    SecondaryPersona,
    Age,
    PainPoint,
    Jtbd,
    Behavior,
    Journey,
}

impl CommandTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryPersona => "primaryPersona",
            Self::SecondaryPersona => "secondaryPersona",
            Self::Age => "age",
            Self::PainPoint => "painPoint",
            Self::Jtbd => "jtbd",
            Self::Behavior => "behavior",
            Self::Journey => "journey",
        }
    }

    pub fn persona(kind: PersonaKind) -> Self {
        match kind {
            PersonaKind::Primary => Self::PrimaryPersona,
            PersonaKind::Secondary => Self::SecondaryPersona,
        }
    }

    pub fn persona_kind(&self) -> Option<PersonaKind> {
        match self {
            Self::PrimaryPersona => Some(PersonaKind::Primary),
            Self::SecondaryPersona => Some(PersonaKind::Secondary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgeDirection {
    Increase,
    Decrease,
}

/// Typed command operand. Each target only ever receives the variant its
/// rule builds, so the executor can match exhaustively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CommandValue {
    AgeRange(AgeRange),
    Relative(AgeDirection),
    Text(String),
}

/// Structured mutation request produced by classification.
///
/// Carries no reference to persona state, so it can be logged, replayed, or
/// compared on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Command {
    pub action: CommandAction,
    pub target: CommandTarget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<PersonaField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CommandValue>,
    pub confidence: f32,
    pub raw_command: String,
}

impl Command {
    pub fn new(action: CommandAction, target: CommandTarget, raw_command: impl Into<String>) -> Self {
        Self {
            action,
            target,
            field: None,
            value: None,
            confidence: DEFAULT_CONFIDENCE,
            raw_command: raw_command.into(),
        }
    }

    pub fn with_field(mut self, field: PersonaField) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_value(mut self, value: CommandValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_value(CommandValue::Text(text.into()))
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Serializes the command into a JSON line (no trailing newline).
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a command from a previously serialized JSON line.
    pub fn from_json_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_fields_compare_equal() {
        let a = Command::new(CommandAction::Add, CommandTarget::PainPoint, "add pain point x")
            .with_text("x")
            .with_confidence(0.9);
        let b = Command::new(CommandAction::Add, CommandTarget::PainPoint, "add pain point x")
            .with_text("x")
            .with_confidence(0.9);
        assert_eq!(a, b);
    }

    #[test]
    fn json_line_uses_wire_names() {
        let command = Command::new(CommandAction::Set, CommandTarget::Age, "change age to 18-30")
            .with_value(CommandValue::AgeRange(AgeRange { min: 18, max: 30 }))
            .with_confidence(0.9);
        let line = command.to_json_line().unwrap();
        assert!(line.contains("\"target\":\"age\""));
        assert!(line.contains("\"raw_command\":\"change age to 18-30\""));
        assert!(!line.contains("\"field\""));
        assert_eq!(Command::from_json_line(&line).unwrap(), command);
    }

    #[test]
    fn confidence_is_clamped() {
        let command = Command::new(CommandAction::Update, CommandTarget::Age, "x").with_confidence(1.4);
        assert_eq!(command.confidence, 1.0);
    }
}
