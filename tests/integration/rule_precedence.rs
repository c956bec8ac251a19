//! Regression coverage for classifier ordering. Each message here satisfies
//! more than one rule pattern; the expected rule is the earliest in the list.

use personacanvas::chat::intent_router::{apply, IntentClassifier};
use personacanvas::orchestration::command::{CommandAction, CommandTarget, CommandValue};
use personacanvas::persona::{default_persona_state, AgeRange};

const CASES: &[(&str, &str)] = &[
    ("change age to 18-30", "age_range"),
    ("update the persona age to 40 50", "age_range"),
    ("set age to 25", "single_age"),
    ("I hate this persona, age should be 45", "single_age"),
    ("change persona younger", "relative_younger"),
    ("make the persona older, fix the persona", "relative_older"),
    ("update the persona name to Sam", "persona_field"),
    ("add pain point the persona update flow is broken", "pain_point_add"),
    ("remove pain point change the persona", "pain_point_remove"),
    ("add behavior Updates the persona deck weekly", "behavior_add"),
    ("add pain point users can't change role to admin", "pain_point_add"),
    ("add pain point minimum age of 13 excludes students", "pain_point_add"),
    ("remove pain point set name to Sam", "pain_point_remove"),
    ("please change role to Analyst", "persona_field"),
    ("age is 118", "single_age"),
    ("fix the persona", "persona_generic"),
];

#[test]
fn earliest_matching_rule_wins() {
    let classifier = IntentClassifier::new();
    for (message, expected) in CASES {
        let (rule, _) = classifier
            .classify_with_rule(message)
            .unwrap_or_else(|| panic!("no rule matched {message:?}"));
        assert_eq!(rule, *expected, "wrong rule for {message:?}");
    }
}

#[test]
fn generic_rule_extracts_embedded_range() {
    let command = IntentClassifier::new()
        .classify("this persona doesn't fit, think 25-35")
        .unwrap();
    assert_eq!(command.action, CommandAction::Set);
    assert_eq!(command.target, CommandTarget::Age);
    assert_eq!(command.value, Some(CommandValue::AgeRange(AgeRange { min: 25, max: 35 })));
}

#[test]
fn no_emitted_command_carries_template_confidence() {
    let classifier = IntentClassifier::new();
    for (message, _) in CASES {
        if let Some(command) = classifier.classify(message) {
            assert!(command.confidence > 0.3, "{message:?} -> {}", command.confidence);
        }
    }
}

#[test]
fn operand_text_never_triggers_a_field_rewrite() {
    let state = default_persona_state();
    let command = IntentClassifier::new()
        .classify("add pain point users can't change role to admin")
        .unwrap();
    assert_eq!(command.target, CommandTarget::PainPoint);
    let next = apply(&state, &command);
    assert_eq!(next.primary_persona.role, state.primary_persona.role);
    assert_eq!(next.pain_points.len(), state.pain_points.len() + 1);
    assert_eq!(
        next.pain_points.last().unwrap().description,
        "users can't change role to admin"
    );
}

#[test]
fn single_age_at_the_upper_bound_is_recognized() {
    let command = IntentClassifier::new().classify("age is 118").unwrap();
    assert_eq!(command.value, Some(CommandValue::AgeRange(AgeRange { min: 113, max: 120 })));
}
