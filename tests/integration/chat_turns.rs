use personacanvas::chat::MessageRole;
use personacanvas::orchestration::command::{AgeDirection, CommandAction, CommandTarget, CommandValue};
use personacanvas::persona::{AgeRange, Priority};

use crate::support::session::SessionFixture;

#[tokio::test(start_paused = true)]
async fn age_range_turn_updates_primary_persona() {
    let mut fixture = SessionFixture::new();
    let report = fixture.turn("change age to 18-30").await;
    let command = report.command.expect("command recognized");
    assert_eq!(command.action, CommandAction::Set);
    assert_eq!(command.value, Some(CommandValue::AgeRange(AgeRange { min: 18, max: 30 })));
    assert_eq!(command.confidence, 0.9);

    let persona = &fixture.session.state().primary_persona;
    assert_eq!(persona.age, 24);
    assert_eq!(persona.demographics.age_range, AgeRange { min: 18, max: 30 });
    assert!(report.reply.text.contains("18-30"));
}

#[tokio::test(start_paused = true)]
async fn unrecognized_turn_leaves_state_and_explains() {
    let mut fixture = SessionFixture::new();
    let before = fixture.session.state().clone();
    let report = fixture.turn("asdkjf qwoeiu").await;
    assert!(report.command.is_none());
    assert!(report.state.is_none());
    assert_eq!(fixture.session.state(), &before);

    let messages = fixture.session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[0].text, "asdkjf qwoeiu");
    assert_eq!(messages[1].role, MessageRole::Assistant);
    assert!(messages[1].text.contains("didn't quite understand"));
}

#[tokio::test(start_paused = true)]
async fn pain_point_lifecycle() {
    let mut fixture = SessionFixture::new();
    let original = fixture.session.state().pain_points.clone();

    fixture.turn("add pain point Too slow").await;
    let points = &fixture.session.state().pain_points;
    assert_eq!(points.len(), original.len() + 1);
    let added = points.last().unwrap();
    assert_eq!(added.description, "Too slow");
    assert_eq!(added.priority, Priority::Medium);
    assert!(original.iter().all(|point| point.id != added.id));

    fixture.turn("remove pain point SLOW").await;
    assert!(fixture
        .session
        .state()
        .pain_points
        .iter()
        .all(|point| !point.description.to_lowercase().contains("slow")));
}

#[tokio::test(start_paused = true)]
async fn set_age_twice_is_stable_but_younger_twice_is_not() {
    let mut fixture = SessionFixture::new();
    fixture.turn("set age 18-30").await;
    let after_first = fixture.session.state().clone();
    fixture.turn("set age 18-30").await;
    assert_eq!(fixture.session.state(), &after_first);

    let report = fixture.turn("make them younger").await;
    assert_eq!(
        report.command.unwrap().value,
        Some(CommandValue::Relative(AgeDirection::Decrease))
    );
    let once = fixture.session.state().primary_persona.clone();
    fixture.turn("make them younger").await;
    let twice = fixture.session.state().primary_persona.clone();
    assert_ne!(once, twice);
    assert_eq!(twice.age + 5, once.age);
    assert_eq!(twice.demographics.age_range, once.demographics.age_range.shifted(-5));
}

#[tokio::test(start_paused = true)]
async fn field_rewrite_targets_requested_persona() {
    let mut fixture = SessionFixture::new();
    let before = fixture.session.state().clone();
    let report = fixture.turn("Change the secondary persona's role to Staff Designer").await;
    let command = report.command.unwrap();
    assert_eq!(command.target, CommandTarget::SecondaryPersona);
    assert_eq!(fixture.session.state().secondary_persona.role, "Staff Designer");
    assert_eq!(fixture.session.state().primary_persona, before.primary_persona);
    assert_eq!(
        report.reply.text,
        "I've updated the secondary persona's role to \"Staff Designer\"."
    );
}

#[tokio::test(start_paused = true)]
async fn generic_complaint_is_acknowledged_without_change() {
    let mut fixture = SessionFixture::new();
    let before = fixture.session.state().clone();
    let report = fixture.turn("I don't like this persona").await;
    let command = report.command.unwrap();
    assert_eq!(command.target, CommandTarget::PrimaryPersona);
    assert_eq!(command.confidence, 0.5);
    assert_eq!(report.state.as_ref(), Some(&before));
    assert_eq!(report.reply.text, "I've made the requested changes.");
}

#[tokio::test(start_paused = true)]
async fn every_submission_gets_one_reply() {
    let mut fixture = SessionFixture::new();
    let inputs = [
        "make them older",
        "???",
        "add behavior Reads release notes",
        "add journey stage Renew",
        "remove jtbd aligned",
        "🙂",
    ];
    for input in inputs {
        fixture.turn(input).await;
    }
    let messages = fixture.session.messages();
    assert_eq!(messages.len(), inputs.len() * 2);
    for pair in messages.chunks(2) {
        assert_eq!(pair[0].role, MessageRole::User);
        assert_eq!(pair[1].role, MessageRole::Assistant);
    }
    assert!(fixture.session.state().jtbd.is_empty());
}

#[tokio::test(start_paused = true)]
async fn reset_restores_defaults_and_keeps_log() {
    let mut fixture = SessionFixture::new();
    fixture.turn("change name to Priya").await;
    assert_eq!(fixture.session.state().primary_persona.name, "Priya");
    fixture.session.reset();
    assert_eq!(fixture.session.state().primary_persona.name, "Alex Morgan");
    assert_eq!(fixture.session.messages().len(), 2);
}
