//! Individual classification rules for persona chat commands.
//!
//! Each rule pairs a pattern over the normalized (trimmed, ASCII-lowercased)
//! message with a builder that extracts typed operands and assembles the
//! [`Command`]. ASCII lowercasing keeps byte offsets stable, so text operands
//! are sliced from the trimmed original and keep the user's casing.

use crate::orchestration::command::{AgeDirection, Command, CommandAction, CommandTarget, CommandValue};
use crate::persona::{AgeRange, PersonaField, PersonaKind};
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const EXPLICIT_RANGE_CONFIDENCE: f32 = 0.9;
pub const QUALIFIED_FIELD_CONFIDENCE: f32 = 0.9;
pub const COLLECTION_EDIT_CONFIDENCE: f32 = 0.9;
pub const SINGLE_VALUE_CONFIDENCE: f32 = 0.85;
pub const RELATIVE_CONFIDENCE: f32 = 0.8;
pub const EMBEDDED_RANGE_CONFIDENCE: f32 = 0.7;
pub const GENERIC_CONFIDENCE: f32 = 0.5;

/// Tunables the builders need from the surrounding configuration.
#[derive(Debug, Clone, Copy)]
pub struct RuleSettings {
    pub single_age_window: u32,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            single_age_window: 5,
        }
    }
}

/// Pattern match handed to a rule builder.
pub struct RuleMatch<'a> {
    pub captures: Captures<'a>,
    /// Trimmed original message; byte offsets line up with `captures`.
    pub original: &'a str,
    pub confidence: f32,
    pub settings: RuleSettings,
}

impl<'a> RuleMatch<'a> {
    /// Group `index` parsed as an age number.
    pub fn number(&self, index: usize) -> Option<u32> {
        self.captures.get(index)?.as_str().parse::<u32>().ok()
    }

    /// Group `index` as lowercase normalized text.
    pub fn keyword(&self, index: usize) -> Option<&'a str> {
        self.captures.get(index).map(|m| m.as_str())
    }

    /// Group `index` sliced from the original message, with surrounding
    /// quotes and trailing punctuation stripped. Empty operands yield `None`.
    pub fn operand(&self, index: usize) -> Option<String> {
        let span = self.captures.get(index)?;
        let raw = self.original.get(span.start()..span.end())?;
        let cleaned = strip_wrapping_tokens(raw);
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }

    fn command(&self, action: CommandAction, target: CommandTarget) -> Command {
        Command::new(action, target, self.original).with_confidence(self.confidence)
    }
}

pub type RuleBuilder = fn(&RuleMatch<'_>) -> Option<Command>;

/// One (pattern, builder, confidence) unit of the classifier.
pub struct IntentRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub confidence: f32,
    pub build: RuleBuilder,
}

impl IntentRule {
    fn new(name: &'static str, pattern: &str, confidence: f32, build: RuleBuilder) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("valid intent rule pattern"),
            confidence,
            build,
        }
    }

    /// Runs the rule against a normalized message. `None` means the pattern
    /// did not apply; `Some(None)` means it applied but the operands were not
    /// usable.
    pub fn evaluate(
        &self,
        normalized: &str,
        original: &str,
        settings: RuleSettings,
    ) -> Option<Option<Command>> {
        let captures = self.pattern.captures(normalized)?;
        let matched = RuleMatch {
            captures,
            original,
            confidence: self.confidence,
            settings,
        };
        Some((self.build)(&matched))
    }
}

const TEXT_SEPARATOR: &str = r"(?:\s*:\s*|\s+)";
/// Explicit edit commands must lead the message, so words inside an operand
/// never read as a second command.
const LEADING_VERB: &str = r"^(?:please\s+)?";

/// Hand-ordered rule list, most specific first. Order is behavior: the first
/// rule whose pattern matches decides the outcome.
pub static RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    vec![
        IntentRule::new(
            "age_range",
            r"\b(?:should use|use|change|update|set)\b.*?\bages?\b\D*?(\d{1,3})\s*(?:-|to\s|\s)\s*(\d{1,3})\b",
            EXPLICIT_RANGE_CONFIDENCE,
            build_age_range,
        ),
        IntentRule::new(
            "single_age",
            r"\bage\b\s*(?:should be|is|to|=)\s*(?:around\s+|about\s+)?(\d{1,3})\b",
            SINGLE_VALUE_CONFIDENCE,
            build_single_age,
        ),
        IntentRule::new(
            "relative_younger",
            r"\b(?:make|change)\s+(?:them|him|her|the persona|persona|the user)\s+younger\b",
            RELATIVE_CONFIDENCE,
            build_younger,
        ),
        IntentRule::new(
            "relative_older",
            r"\b(?:make|change)\s+(?:them|him|her|the persona|persona|the user)\s+older\b",
            RELATIVE_CONFIDENCE,
            build_older,
        ),
        IntentRule::new(
            "persona_field",
            &format!(r"{LEADING_VERB}(?:change|update|set|rename)\s+(?:the\s+)?(?:(primary|secondary)\s+)?(?:persona(?:'s)?\s+)?(name|role|goal|occupation|job)(?:\s+(?:to|as|into)\s+|\s*[:=]\s*)(.+)$"),
            SINGLE_VALUE_CONFIDENCE,
            build_persona_field,
        ),
        IntentRule::new(
            "pain_point_add",
            &format!(r"{LEADING_VERB}add\s+(?:an?\s+)?(?:new\s+)?pain[\s-]?points?{TEXT_SEPARATOR}(.+)$"),
            COLLECTION_EDIT_CONFIDENCE,
            build_pain_point_add,
        ),
        IntentRule::new(
            "pain_point_remove",
            &format!(r"{LEADING_VERB}(?:remove|delete|drop)\s+(?:the\s+)?pain[\s-]?points?{TEXT_SEPARATOR}(?:about\s+|containing\s+|matching\s+)?(.+)$"),
            COLLECTION_EDIT_CONFIDENCE,
            build_pain_point_remove,
        ),
        IntentRule::new(
            "jtbd_add",
            &format!(r"{LEADING_VERB}add\s+(?:an?\s+)?(?:new\s+)?(?:jtbd|jobs?[\s-]to[\s-]be[\s-]done){TEXT_SEPARATOR}(.+)$"),
            SINGLE_VALUE_CONFIDENCE,
            build_jtbd_add,
        ),
        IntentRule::new(
            "jtbd_remove",
            &format!(r"{LEADING_VERB}(?:remove|delete|drop)\s+(?:the\s+)?(?:jtbd|jobs?[\s-]to[\s-]be[\s-]done){TEXT_SEPARATOR}(.+)$"),
            SINGLE_VALUE_CONFIDENCE,
            build_jtbd_remove,
        ),
        IntentRule::new(
            "behavior_add",
            &format!(r"{LEADING_VERB}add\s+(?:an?\s+)?(?:new\s+)?behaviou?rs?{TEXT_SEPARATOR}(.+)$"),
            SINGLE_VALUE_CONFIDENCE,
            build_behavior_add,
        ),
        IntentRule::new(
            "behavior_remove",
            &format!(r"{LEADING_VERB}(?:remove|delete|drop)\s+(?:the\s+)?behaviou?rs?{TEXT_SEPARATOR}(.+)$"),
            SINGLE_VALUE_CONFIDENCE,
            build_behavior_remove,
        ),
        IntentRule::new(
            "journey_add",
            &format!(r"{LEADING_VERB}add\s+(?:an?\s+)?(?:new\s+)?journey\s+stages?{TEXT_SEPARATOR}(.+)$"),
            SINGLE_VALUE_CONFIDENCE,
            build_journey_add,
        ),
        IntentRule::new(
            "journey_remove",
            &format!(r"{LEADING_VERB}(?:remove|delete|drop)\s+(?:the\s+)?journey\s+stages?{TEXT_SEPARATOR}(.+)$"),
            SINGLE_VALUE_CONFIDENCE,
            build_journey_remove,
        ),
        IntentRule::new(
            "persona_generic",
            r"\b(?:don'?t like|do not like|dislike|hate|not happy with|unhappy with|not satisfied with|change|fix|improve|update|adjust|tweak)\b.*\bpersonas?\b|\bpersonas?\b.*\b(?:is wrong|isn'?t right|is not right|doesn'?t fit|does not fit|feels off|needs? to change|should change)\b",
            GENERIC_CONFIDENCE,
            build_generic,
        ),
    ]
});

static EMBEDDED_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,3})\s*(?:-|to)\s*(\d{1,3})\b").expect("valid embedded range regex")
});

fn build_age_range(m: &RuleMatch<'_>) -> Option<Command> {
    let range = AgeRange::new(m.number(1)?, m.number(2)?)?;
    Some(
        m.command(CommandAction::Set, CommandTarget::Age)
            .with_value(CommandValue::AgeRange(range)),
    )
}

fn build_single_age(m: &RuleMatch<'_>) -> Option<Command> {
    let range = AgeRange::around(m.number(1)?, m.settings.single_age_window)?;
    Some(
        m.command(CommandAction::Set, CommandTarget::Age)
            .with_value(CommandValue::AgeRange(range)),
    )
}

fn build_younger(m: &RuleMatch<'_>) -> Option<Command> {
    Some(
        m.command(CommandAction::Update, CommandTarget::Age)
            .with_value(CommandValue::Relative(AgeDirection::Decrease)),
    )
}

fn build_older(m: &RuleMatch<'_>) -> Option<Command> {
    Some(
        m.command(CommandAction::Update, CommandTarget::Age)
            .with_value(CommandValue::Relative(AgeDirection::Increase)),
    )
}

fn build_persona_field(m: &RuleMatch<'_>) -> Option<Command> {
    let kind = match m.keyword(1) {
        Some("secondary") => PersonaKind::Secondary,
        _ => PersonaKind::Primary,
    };
    let field = PersonaField::parse(m.keyword(2)?)?;
    let value = m.operand(3)?;
    let confidence = if m.keyword(1).is_some() {
        QUALIFIED_FIELD_CONFIDENCE
    } else {
        m.confidence
    };
    Some(
        m.command(CommandAction::Update, CommandTarget::persona(kind))
            .with_field(field)
            .with_text(value)
            .with_confidence(confidence),
    )
}

fn text_command(m: &RuleMatch<'_>, action: CommandAction, target: CommandTarget) -> Option<Command> {
    let value = m.operand(1)?;
    Some(m.command(action, target).with_text(value))
}

fn build_pain_point_add(m: &RuleMatch<'_>) -> Option<Command> {
    text_command(m, CommandAction::Add, CommandTarget::PainPoint)
}

fn build_pain_point_remove(m: &RuleMatch<'_>) -> Option<Command> {
    text_command(m, CommandAction::Remove, CommandTarget::PainPoint)
}

fn build_jtbd_add(m: &RuleMatch<'_>) -> Option<Command> {
    text_command(m, CommandAction::Add, CommandTarget::Jtbd)
}

fn build_jtbd_remove(m: &RuleMatch<'_>) -> Option<Command> {
    text_command(m, CommandAction::Remove, CommandTarget::Jtbd)
}

fn build_behavior_add(m: &RuleMatch<'_>) -> Option<Command> {
    text_command(m, CommandAction::Add, CommandTarget::Behavior)
}

fn build_behavior_remove(m: &RuleMatch<'_>) -> Option<Command> {
    text_command(m, CommandAction::Remove, CommandTarget::Behavior)
}

fn build_journey_add(m: &RuleMatch<'_>) -> Option<Command> {
    text_command(m, CommandAction::Add, CommandTarget::Journey)
}

fn build_journey_remove(m: &RuleMatch<'_>) -> Option<Command> {
    text_command(m, CommandAction::Remove, CommandTarget::Journey)
}

fn build_generic(m: &RuleMatch<'_>) -> Option<Command> {
    let normalized = m.original.to_ascii_lowercase();
    let embedded = EMBEDDED_RANGE.captures(&normalized).and_then(|caps| {
        let low = caps.get(1)?.as_str().parse::<u32>().ok()?;
        let high = caps.get(2)?.as_str().parse::<u32>().ok()?;
        AgeRange::new(low, high)
    });
    match embedded {
        Some(range) => Some(
            Command::new(CommandAction::Set, CommandTarget::Age, m.original)
                .with_value(CommandValue::AgeRange(range))
                .with_confidence(EMBEDDED_RANGE_CONFIDENCE),
        ),
        None => Some(m.command(CommandAction::Update, CommandTarget::PrimaryPersona)),
    }
}

fn strip_wrapping_tokens(value: &str) -> String {
    value
        .trim()
        .trim_end_matches(['.', '!', '?', ','])
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}
