use personacanvas::chat::{ConversationController, MessageRole, TurnRejection};
use personacanvas::persona::default_persona_state;

use crate::support::session::SessionFixture;

#[tokio::test(start_paused = true)]
async fn back_to_back_turns_do_not_interleave() {
    let mut fixture = SessionFixture::new();
    fixture.turn("make them younger").await;
    fixture.turn("add pain point Onboarding is confusing").await;

    let messages = fixture.session.messages();
    let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant
        ]
    );
    assert_eq!(messages[2].text, "add pain point Onboarding is confusing");
    assert!(messages[1].timestamp <= messages[2].timestamp);
}

#[tokio::test(start_paused = true)]
async fn concurrent_submission_is_rejected_while_processing() {
    let controller = ConversationController::new(&SessionFixture::fast_config());
    let state = default_persona_state();
    let (first, second, third) = tokio::join!(
        controller.submit("change age to 18-30", &state),
        controller.submit("make them older", &state),
        controller.submit("add pain point Too slow", &state),
    );
    assert!(first.report().is_some());
    assert_eq!(second.rejection(), Some(TurnRejection::Busy));
    assert_eq!(third.rejection(), Some(TurnRejection::Busy));
    assert_eq!(controller.messages().len(), 2);

    let next = controller.submit("make them older", &state).await;
    assert!(next.report().is_some());
    assert_eq!(controller.messages().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn simulated_latency_is_observed() {
    let controller = ConversationController::new(&SessionFixture::latency_config(250));
    let state = default_persona_state();
    let started = tokio::time::Instant::now();
    controller.submit("make them older", &state).await;
    assert!(started.elapsed() >= std::time::Duration::from_millis(250));
}
