pub mod executor;
pub mod parser;
pub mod responses;
pub mod rules;

pub use executor::{apply, ExecutorSettings, MutationExecutor};
pub use parser::IntentClassifier;
pub use responses::{describe, no_match_response};
pub use rules::{IntentRule, RuleSettings};
