use super::rules::{IntentRule, RuleSettings, RULES};
use crate::orchestration::command::Command;

/// Deterministic, first-match-wins classifier over the ordered rule list.
pub struct IntentClassifier {
    rules: &'static [IntentRule],
    settings: RuleSettings,
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self::with_settings(RuleSettings::default())
    }

    pub fn with_settings(settings: RuleSettings) -> Self {
        Self {
            rules: RULES.as_slice(),
            settings,
        }
    }

    /// Maps free text to a command, or `None` when nothing applies. The first
    /// rule whose pattern matches decides; later rules are never consulted,
    /// even when that rule could not build a usable command.
    pub fn classify(&self, message: &str) -> Option<Command> {
        self.classify_with_rule(message).and_then(|(_, command)| command)
    }

    /// Like [`classify`](Self::classify) but also reports which rule matched.
    pub fn classify_with_rule(&self, message: &str) -> Option<(&'static str, Option<Command>)> {
        let original = message.trim();
        if original.is_empty() {
            return None;
        }
        let normalized = original.to_ascii_lowercase();
        for rule in self.rules {
            if let Some(command) = rule.evaluate(&normalized, original, self.settings) {
                tracing::debug!(
                    rule = rule.name,
                    built = command.is_some(),
                    "intent rule matched"
                );
                return Some((rule.name, command));
            }
        }
        tracing::debug!("no intent rule matched");
        None
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name).collect()
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
