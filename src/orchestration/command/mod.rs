//! Command representation shared by the classifier, executor, and responder.

pub mod payload;

pub use payload::{
    AgeDirection, Command, CommandAction, CommandTarget, CommandValue, DEFAULT_CONFIDENCE,
};
