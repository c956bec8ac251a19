pub mod chat;
pub mod config;
pub mod orchestration;
pub mod persona;

// Re-export commonly used types for convenience.
pub use chat::intent_router::{apply, describe, IntentClassifier};
pub use chat::{ChatMessage, ChatSession, ConversationController, TurnOutcome};
pub use config::InterpreterConfig;
pub use orchestration::command::{Command, CommandAction, CommandTarget, CommandValue};
pub use persona::PersonaState;
