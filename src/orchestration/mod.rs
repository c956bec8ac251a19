//! Command representation and turn event records.

pub mod command;
pub mod events;

pub use events::{TurnEvent, TurnEventType, TurnJournal};
