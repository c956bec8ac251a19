//! Persona data model shared by the chat interpreter.
//!
//! The interpreter consumes this shape but never persists it; the session
//! owner keeps the canonical snapshot.

pub mod defaults;
pub mod model;

pub use defaults::default_persona_state;
pub use model::{
    AgeRange, Behavior, Demographics, Environment, JobToBeDone, JourneyStage, PainPoint, Persona,
    PersonaField, PersonaKind, PersonaState, Priority,
};
