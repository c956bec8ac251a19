use crate::orchestration::command::{AgeDirection, Command, CommandAction, CommandTarget, CommandValue};

pub const GENERIC_ACKNOWLEDGEMENT: &str = "I've made the requested changes.";

/// Fixed reply for turns where no rule matched.
pub fn no_match_response() -> String {
    "I didn't quite understand that. Try something like \"change age to 18-30\", \
\"make them younger\", \"change name to Sam\", or \"add pain point Too slow\"."
        .into()
}

/// Short confirmation narrating what `command` asked for. Total over every
/// command, including ones the executor treated as a no-op.
pub fn describe(command: &Command) -> String {
    match (command.target, command.action, command.value.as_ref()) {
        (CommandTarget::Age, _, Some(CommandValue::AgeRange(range))) => format!(
            "I've updated the age range to {}-{} years.",
            range.min, range.max
        ),
        (CommandTarget::Age, _, Some(CommandValue::Relative(AgeDirection::Decrease))) => {
            "I've made the persona younger.".into()
        }
        (CommandTarget::Age, _, Some(CommandValue::Relative(AgeDirection::Increase))) => {
            "I've made the persona older.".into()
        }
        (
            CommandTarget::PrimaryPersona | CommandTarget::SecondaryPersona,
            _,
            Some(CommandValue::Text(text)),
        ) => match (command.field, command.target.persona_kind()) {
            (Some(field), Some(kind)) => format!(
                "I've updated the {} persona's {} to \"{}\".",
                kind.as_str(),
                field.as_str(),
                text
            ),
            _ => GENERIC_ACKNOWLEDGEMENT.into(),
        },
        (target, CommandAction::Add, Some(CommandValue::Text(text))) => match collection_label(target) {
            Some(label) => format!("I've added the {label}: \"{text}\"."),
            None => GENERIC_ACKNOWLEDGEMENT.into(),
        },
        (target, CommandAction::Remove, Some(CommandValue::Text(text))) => {
            match collection_label(target) {
                Some(label) => format!("I've removed any {label}s matching \"{text}\"."),
                None => GENERIC_ACKNOWLEDGEMENT.into(),
            }
        }
        _ => GENERIC_ACKNOWLEDGEMENT.into(),
    }
}

fn collection_label(target: CommandTarget) -> Option<&'static str> {
    match target {
        CommandTarget::PainPoint => Some("pain point"),
        CommandTarget::Jtbd => Some("job to be done"),
        CommandTarget::Behavior => Some("behavior"),
        CommandTarget::Journey => Some("journey stage"),
        _ => None,
    }
}
