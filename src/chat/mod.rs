pub mod controller;
pub mod intent_router;
pub mod message;

pub use controller::{ConversationController, TurnOutcome, TurnRejection, TurnReport};
pub use message::{ChatMessage, MessageRole};

use crate::config::{load_or_default, InterpreterConfig};
use crate::persona::{default_persona_state, PersonaState};
use anyhow::Result;

/// Lightweight facade that owns the canonical persona snapshot for a chat
/// session and commits the snapshots each turn hands back.
pub struct ChatSession {
    controller: ConversationController,
    state: PersonaState,
}

impl ChatSession {
    pub fn new(config: &InterpreterConfig) -> Self {
        Self::with_state(config, default_persona_state())
    }

    pub fn with_state(config: &InterpreterConfig, state: PersonaState) -> Self {
        Self {
            controller: ConversationController::new(config),
            state,
        }
    }

    /// Builds a session from the on-disk configuration (or defaults).
    pub fn from_workspace() -> Result<Self> {
        let config = load_or_default()?;
        Ok(Self::new(&config))
    }

    pub fn state(&self) -> &PersonaState {
        &self.state
    }

    pub fn controller(&self) -> &ConversationController {
        &self.controller
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.controller.messages()
    }

    /// Runs one turn and commits the resulting snapshot, if any.
    pub async fn handle_message(&mut self, text: &str) -> TurnOutcome {
        let outcome = self.controller.submit(text, &self.state).await;
        if let Some(next) = outcome.report().and_then(|report| report.state.clone()) {
            self.state = next;
        }
        outcome
    }

    /// Restores the session defaults. The message log is kept.
    pub fn reset(&mut self) {
        self.state = default_persona_state();
    }
}
