use personacanvas::chat::{ChatSession, TurnOutcome, TurnReport};
use personacanvas::config::InterpreterConfig;

/// Session with the default personas and a short simulated latency.
pub struct SessionFixture {
    pub session: ChatSession,
}

impl SessionFixture {
    pub fn new() -> Self {
        Self::with_config(Self::fast_config())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        Self {
            session: ChatSession::new(&config),
        }
    }

    pub fn fast_config() -> InterpreterConfig {
        Self::latency_config(10)
    }

    pub fn latency_config(latency_ms: u64) -> InterpreterConfig {
        InterpreterConfig {
            latency_ms,
            ..InterpreterConfig::default()
        }
    }

    pub async fn turn(&mut self, text: &str) -> TurnReport {
        match self.session.handle_message(text).await {
            TurnOutcome::Completed(report) => report,
            TurnOutcome::Rejected(reason) => panic!("turn for {text:?} rejected: {reason:?}"),
        }
    }
}
