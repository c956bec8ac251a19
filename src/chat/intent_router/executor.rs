//! Pure application of classified commands to a persona snapshot.

use crate::orchestration::command::{AgeDirection, Command, CommandAction, CommandTarget, CommandValue};
use crate::persona::model::{new_element_id, MAX_AGE};
use crate::persona::{
    AgeRange, Behavior, JobToBeDone, JourneyStage, PainPoint, Persona, PersonaKind, PersonaState,
    Priority,
};

/// Tunables for command execution.
#[derive(Debug, Clone, Copy)]
pub struct ExecutorSettings {
    pub relative_age_step: u32,
    pub default_pain_point_priority: Priority,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            relative_age_step: 5,
            default_pain_point_priority: Priority::Medium,
        }
    }
}

pub struct MutationExecutor {
    settings: ExecutorSettings,
}

impl MutationExecutor {
    pub fn new(settings: ExecutorSettings) -> Self {
        Self { settings }
    }

    /// Returns the state that results from `command`. The input is never
    /// touched; combinations with nothing to apply return an equal copy.
    pub fn apply(&self, state: &PersonaState, command: &Command) -> PersonaState {
        let mut next = state.clone();
        let value = command.value.as_ref();
        match (command.target, command.action, value) {
            (CommandTarget::Age, CommandAction::Set, Some(CommandValue::AgeRange(range))) => {
                if range.is_valid() {
                    next.primary_persona = with_age_range(&state.primary_persona, *range);
                }
            }
            (
                CommandTarget::Age,
                CommandAction::Update | CommandAction::Change,
                Some(CommandValue::Relative(direction)),
            ) => {
                next.primary_persona = self.shift_age(&state.primary_persona, *direction);
            }
            (
                CommandTarget::PrimaryPersona | CommandTarget::SecondaryPersona,
                CommandAction::Update | CommandAction::Change | CommandAction::Set,
                Some(CommandValue::Text(text)),
            ) => {
                if let (Some(field), Some(kind)) = (command.field, command.target.persona_kind()) {
                    let updated = state.persona(kind).with_field(field, text);
                    match kind {
                        PersonaKind::Primary => next.primary_persona = updated,
                        PersonaKind::Secondary => next.secondary_persona = updated,
                    }
                }
            }
            (CommandTarget::PainPoint, CommandAction::Add, Some(CommandValue::Text(text))) => {
                next.pain_points.push(PainPoint {
                    id: new_element_id("pain"),
                    description: text.clone(),
                    priority: self.settings.default_pain_point_priority,
                });
            }
            (CommandTarget::PainPoint, CommandAction::Remove, Some(CommandValue::Text(text))) => {
                let needle = text.to_lowercase();
                next.pain_points
                    .retain(|point| !contains_folded(&point.description, &needle));
            }
            (CommandTarget::Jtbd, CommandAction::Add, Some(CommandValue::Text(text))) => {
                next.jtbd.push(JobToBeDone {
                    id: new_element_id("jtbd"),
                    statement: text.clone(),
                });
            }
            (CommandTarget::Jtbd, CommandAction::Remove, Some(CommandValue::Text(text))) => {
                let needle = text.to_lowercase();
                next.jtbd.retain(|job| !contains_folded(&job.statement, &needle));
            }
            (CommandTarget::Behavior, CommandAction::Add, Some(CommandValue::Text(text))) => {
                next.behaviors.push(Behavior {
                    id: new_element_id("behavior"),
                    description: text.clone(),
                });
            }
            (CommandTarget::Behavior, CommandAction::Remove, Some(CommandValue::Text(text))) => {
                let needle = text.to_lowercase();
                next.behaviors
                    .retain(|behavior| !contains_folded(&behavior.description, &needle));
            }
            (CommandTarget::Journey, CommandAction::Add, Some(CommandValue::Text(text))) => {
                next.journey_stages.push(JourneyStage {
                    id: new_element_id("stage"),
                    name: text.clone(),
                    description: String::new(),
                });
            }
            (CommandTarget::Journey, CommandAction::Remove, Some(CommandValue::Text(text))) => {
                let needle = text.to_lowercase();
                next.journey_stages
                    .retain(|stage| !contains_folded(&stage.name, &needle));
            }
            _ => {
                tracing::debug!(
                    action = command.action.as_str(),
                    command_target = command.target.as_str(),
                    "command has nothing to apply"
                );
            }
        }
        next
    }

    fn shift_age(&self, persona: &Persona, direction: AgeDirection) -> Persona {
        let step = i64::from(self.settings.relative_age_step);
        let delta = match direction {
            AgeDirection::Increase => step,
            AgeDirection::Decrease => -step,
        };
        let mut next = persona.clone();
        next.age = (i64::from(persona.age) + delta).clamp(0, i64::from(MAX_AGE)) as u32;
        next.demographics.age_range = persona.demographics.age_range.shifted(delta);
        next
    }
}

impl Default for MutationExecutor {
    fn default() -> Self {
        Self::new(ExecutorSettings::default())
    }
}

/// Applies `command` with default settings.
pub fn apply(state: &PersonaState, command: &Command) -> PersonaState {
    MutationExecutor::default().apply(state, command)
}

fn with_age_range(persona: &Persona, range: AgeRange) -> Persona {
    let mut next = persona.clone();
    next.age = range.midpoint();
    next.demographics.age_range = range;
    next
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}
