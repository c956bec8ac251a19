//! Data structures backing the persona canvas.
//!
//! The whole tree is a plain value: the interpreter reads a snapshot and hands
//! back a new one, so every type here is `Clone` and compares structurally.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound accepted for any age value or range bound.
pub const MAX_AGE: u32 = 120;

/// Inclusive age window, always stored with `min <= max`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    /// Builds a range from two bounds in either order. Returns `None` when a
    /// bound exceeds [`MAX_AGE`].
    pub fn new(a: u32, b: u32) -> Option<Self> {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        if max > MAX_AGE {
            return None;
        }
        Some(Self { min, max })
    }

    /// Window of `half_width` years around `age`, clamped to `0..=MAX_AGE`.
    /// Returns `None` only when `age` itself exceeds [`MAX_AGE`].
    pub fn around(age: u32, half_width: u32) -> Option<Self> {
        if age > MAX_AGE {
            return None;
        }
        Some(Self {
            min: age.saturating_sub(half_width),
            max: age.saturating_add(half_width).min(MAX_AGE),
        })
    }

    /// Rounded midpoint (halves round up).
    pub fn midpoint(&self) -> u32 {
        (self.min + self.max + 1) / 2
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max && self.max <= MAX_AGE
    }

    /// Moves both bounds by `delta` years, keeping the width unless the lower
    /// bound hits zero.
    pub fn shifted(&self, delta: i64) -> Self {
        let shift = |value: u32| -> u32 {
            (i64::from(value) + delta).clamp(0, i64::from(MAX_AGE)) as u32
        };
        Self {
            min: shift(self.min),
            max: shift(self.max),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Demographics {
    pub age_range: AgeRange,
    pub location: String,
    pub income: String,
    pub education: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Environment {
    #[serde(default)]
    pub devices: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    pub context: String,
}

/// Attribute bag describing one persona.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Persona {
    pub name: String,
    pub role: String,
    pub age: u32,
    pub occupation: String,
    pub goal: String,
    pub demographics: Demographics,
    pub environment: Environment,
}

/// Text attributes of a persona that chat commands may rewrite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PersonaField {
    Name,
    Role,
    Goal,
    Occupation,
}

impl PersonaField {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "name" => Some(Self::Name),
            "role" => Some(Self::Role),
            "goal" => Some(Self::Goal),
            "occupation" | "job" => Some(Self::Occupation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Role => "role",
            Self::Goal => "goal",
            Self::Occupation => "occupation",
        }
    }
}

impl Persona {
    /// Returns a copy with `field` replaced by `value`.
    pub fn with_field(&self, field: PersonaField, value: &str) -> Self {
        let mut next = self.clone();
        let slot = match field {
            PersonaField::Name => &mut next.name,
            PersonaField::Role => &mut next.role,
            PersonaField::Goal => &mut next.goal,
            PersonaField::Occupation => &mut next.occupation,
        };
        *slot = value.to_string();
        next
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PersonaKind {
    Primary,
    Secondary,
}

impl PersonaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PainPoint {
    pub id: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobToBeDone {
    pub id: String,
    pub statement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JourneyStage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Behavior {
    pub id: String,
    pub description: String,
}

/// Full persona-bearing snapshot for one session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonaState {
    pub primary_persona: Persona,
    pub secondary_persona: Persona,
    #[serde(default)]
    pub pain_points: Vec<PainPoint>,
    #[serde(default)]
    pub jtbd: Vec<JobToBeDone>,
    #[serde(default)]
    pub journey_stages: Vec<JourneyStage>,
    #[serde(default)]
    pub behaviors: Vec<Behavior>,
}

impl PersonaState {
    pub fn persona(&self, kind: PersonaKind) -> &Persona {
        match kind {
            PersonaKind::Primary => &self.primary_persona,
            PersonaKind::Secondary => &self.secondary_persona,
        }
    }
}

/// Generates a collection element id. Ids are random v4 UUIDs with a short
/// prefix naming the collection, so they are never reused within a session.
pub fn new_element_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}
