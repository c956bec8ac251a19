use super::model::{
    new_element_id, AgeRange, Behavior, Demographics, Environment, JobToBeDone, JourneyStage,
    PainPoint, Persona, PersonaState, Priority,
};

/// Snapshot every session starts from.
pub fn default_persona_state() -> PersonaState {
    PersonaState {
        primary_persona: default_primary_persona(),
        secondary_persona: default_secondary_persona(),
        pain_points: vec![
            pain_point("Juggling too many disconnected tools", Priority::High),
            pain_point("Hard to share progress with stakeholders", Priority::Medium),
        ],
        jtbd: vec![JobToBeDone {
            id: new_element_id("jtbd"),
            statement: "Keep the team aligned on what ships next".into(),
        }],
        journey_stages: ["Discover", "Evaluate", "Adopt", "Expand"]
            .into_iter()
            .map(|name| JourneyStage {
                id: new_element_id("stage"),
                name: name.into(),
                description: String::new(),
            })
            .collect(),
        behaviors: vec![Behavior {
            id: new_element_id("behavior"),
            description: "Checks the roadmap every Monday morning".into(),
        }],
    }
}

pub fn default_primary_persona() -> Persona {
    Persona {
        name: "Alex Morgan".into(),
        role: "Product Manager".into(),
        age: 32,
        occupation: "Product Manager at a mid-size SaaS company".into(),
        goal: "Ship features customers actually use".into(),
        demographics: Demographics {
            age_range: AgeRange { min: 28, max: 38 },
            location: "Urban, North America".into(),
            income: "$90k-$130k".into(),
            education: "Bachelor's degree".into(),
        },
        environment: Environment {
            devices: vec!["Laptop".into(), "Smartphone".into()],
            tools: vec!["Jira".into(), "Slack".into(), "Figma".into()],
            context: "Hybrid office, back-to-back meetings".into(),
        },
    }
}

pub fn default_secondary_persona() -> Persona {
    Persona {
        name: "Jordan Lee".into(),
        role: "Engineering Lead".into(),
        age: 38,
        occupation: "Engineering Lead".into(),
        goal: "Keep delivery predictable without burning out the team".into(),
        demographics: Demographics {
            age_range: AgeRange { min: 33, max: 45 },
            location: "Remote".into(),
            income: "$120k-$170k".into(),
            education: "Master's degree".into(),
        },
        environment: Environment {
            devices: vec!["Laptop".into()],
            tools: vec!["GitHub".into(), "Slack".into()],
            context: "Fully remote team across time zones".into(),
        },
    }
}

fn pain_point(description: &str, priority: Priority) -> PainPoint {
    PainPoint {
        id: new_element_id("pain"),
        description: description.into(),
        priority,
    }
}
