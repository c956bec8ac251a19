//! Single request/response cycle of the persona chat.
//!
//! A turn moves the controller from idle to processing and back. The
//! `processing` flag is the only guard against interleaving: it is claimed
//! synchronously when input is accepted and released when the turn ends, so a
//! submission arriving mid-turn is rejected instead of queued.

use super::intent_router::{describe, no_match_response, IntentClassifier, MutationExecutor};
use super::message::ChatMessage;
use crate::config::InterpreterConfig;
use crate::orchestration::command::Command;
use crate::orchestration::events::{CommandEventDetails, TurnEvent, TurnEventType, TurnJournal};
use crate::persona::PersonaState;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRejection {
    /// Blank input never starts a turn.
    EmptyInput,
    /// Another turn is still in flight.
    Busy,
}

/// What a completed turn produced.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub turn_id: Uuid,
    pub command: Option<Command>,
    /// Replacement snapshot for the caller to commit. `None` when no command
    /// was recognized and the state is unchanged.
    pub state: Option<PersonaState>,
    pub reply: ChatMessage,
}

#[derive(Debug, Clone)]
pub enum TurnOutcome {
    Completed(TurnReport),
    Rejected(TurnRejection),
}

impl TurnOutcome {
    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<TurnRejection> {
        match self {
            Self::Completed(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

pub struct ConversationController {
    classifier: IntentClassifier,
    executor: MutationExecutor,
    latency: Duration,
    processing: AtomicBool,
    messages: Mutex<Vec<ChatMessage>>,
    journal: Mutex<TurnJournal>,
}

impl ConversationController {
    pub fn new(config: &InterpreterConfig) -> Self {
        let journal = match &config.event_log_path {
            Some(path) => TurnJournal::with_path(path),
            None => TurnJournal::in_memory(),
        };
        Self {
            classifier: IntentClassifier::with_settings(config.rule_settings()),
            executor: MutationExecutor::new(config.executor_settings()),
            latency: config.latency(),
            processing: AtomicBool::new(false),
            messages: Mutex::new(Vec::new()),
            journal: Mutex::new(journal),
        }
    }

    /// Runs one turn against `state`. The snapshot is only read; a new one is
    /// handed back in the report for the caller to commit.
    pub async fn submit(&self, text: &str, state: &PersonaState) -> TurnOutcome {
        if text.trim().is_empty() {
            return TurnOutcome::Rejected(TurnRejection::EmptyInput);
        }
        let Some(_guard) = ProcessingGuard::acquire(&self.processing) else {
            tracing::debug!("submission rejected while a turn is in flight");
            return TurnOutcome::Rejected(TurnRejection::Busy);
        };

        let turn_id = Uuid::new_v4();
        self.push_message(ChatMessage::user(text));
        self.record(turn_id, TurnEventType::TurnStarted, json!({ "text": text }));

        let command = self.classifier.classify(text);
        if let Some(command) = &command {
            self.record_details(
                turn_id,
                TurnEventType::CommandDetected,
                &CommandEventDetails::detected(command),
            );
        }

        // Stand-in for the AI round-trip; the only suspension point of a turn.
        tokio::time::sleep(self.latency).await;

        let (next_state, reply_text) = match &command {
            Some(command) => {
                let next = self.executor.apply(state, command);
                self.record_details(
                    turn_id,
                    TurnEventType::CommandApplied,
                    &CommandEventDetails::applied(command, state, &next),
                );
                (Some(next), describe(command))
            }
            None => {
                self.record(
                    turn_id,
                    TurnEventType::CommandUnrecognized,
                    json!({ "text": text }),
                );
                (None, no_match_response())
            }
        };

        let reply = ChatMessage::assistant(reply_text);
        self.push_message(reply.clone());
        self.record(
            turn_id,
            TurnEventType::TurnCompleted,
            json!({ "reply_id": reply.id }),
        );
        tracing::info!(
            turn_id = %turn_id,
            recognized = command.is_some(),
            command_target = command.as_ref().map(|c| c.target.as_str()),
            "chat turn completed"
        );

        TurnOutcome::Completed(TurnReport {
            turn_id,
            command,
            state: next_state,
            reply,
        })
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    /// Snapshot of the ordered message log.
    pub fn messages(&self) -> Vec<ChatMessage> {
        lock(&self.messages).clone()
    }

    pub fn events(&self) -> Vec<TurnEvent> {
        lock(&self.journal).events().to_vec()
    }

    fn push_message(&self, message: ChatMessage) {
        lock(&self.messages).push(message);
    }

    fn record(&self, turn_id: Uuid, event_type: TurnEventType, details: serde_json::Value) {
        lock(&self.journal).record(TurnEvent::new(turn_id, event_type, details));
    }

    fn record_details(&self, turn_id: Uuid, event_type: TurnEventType, details: &CommandEventDetails) {
        let value = details_value(turn_id, event_type, serde_json::to_value(details));
        self.record(turn_id, event_type, value);
    }
}

impl Default for ConversationController {
    fn default() -> Self {
        Self::new(&InterpreterConfig::default())
    }
}

/// Holds the processing flag for the lifetime of a turn. Released on drop so
/// an abandoned turn future cannot leave the controller stuck.
struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ProcessingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Serialized details, or an error marker when serialization failed.
fn details_value(
    turn_id: Uuid,
    event_type: TurnEventType,
    serialized: serde_json::Result<serde_json::Value>,
) -> serde_json::Value {
    match serialized {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                turn_id = %turn_id,
                event_type = ?event_type,
                error = %err,
                "failed to serialize command event details"
            );
            json!({ "error": err.to_string() })
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
