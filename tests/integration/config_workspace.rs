use anyhow::Result;
use personacanvas::chat::ChatSession;
use personacanvas::config::{config_file_path, load_or_default, save, InterpreterConfig};
use personacanvas::orchestration::events::{load_events, TurnEventType};
use personacanvas::persona::Priority;

use super::IntegrationHarness;

#[tokio::test(start_paused = true)]
async fn saved_config_drives_session_and_event_log() -> Result<()> {
    let harness = IntegrationHarness::new();
    let log_path = harness.workspace_path().join("logs").join("turns.jsonl");
    let config = InterpreterConfig {
        latency_ms: 5,
        default_pain_point_priority: Priority::High,
        event_log_path: Some(log_path.clone()),
        ..InterpreterConfig::default()
    };
    let written = save(&config)?;
    assert_eq!(written, config_file_path()?);
    assert!(written.starts_with(harness.workspace_path()));

    let loaded = load_or_default()?;
    assert_eq!(loaded.latency_ms, 5);

    let mut session = ChatSession::new(&loaded);
    session.handle_message("add pain point Export is missing").await;
    session.handle_message("qwerty").await;
    let added = session.state().pain_points.last().unwrap();
    assert_eq!(added.priority, Priority::High);

    let events = load_events(&log_path)?;
    let kinds: Vec<_> = events.iter().map(|event| event.event_type).collect();
    assert_eq!(
        kinds,
        vec![
            TurnEventType::TurnStarted,
            TurnEventType::CommandDetected,
            TurnEventType::CommandApplied,
            TurnEventType::TurnCompleted,
            TurnEventType::TurnStarted,
            TurnEventType::CommandUnrecognized,
            TurnEventType::TurnCompleted,
        ]
    );
    assert_eq!(events.len(), session.controller().events().len());
    Ok(())
}
