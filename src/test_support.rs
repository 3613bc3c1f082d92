//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::state::App;
use crate::core::store::TopicStore;
use crate::core::topic::{Example, Topic};

/// A topic with only the required fields filled in.
pub fn topic(id: &str, title: &str, section: &str, content: &str) -> Topic {
    Topic {
        id: id.to_string(),
        title: title.to_string(),
        section: section.to_string(),
        content: content.to_string(),
        key_points: Vec::new(),
        examples: Vec::new(),
        limitations: None,
        architectural_considerations: None,
    }
}

pub fn example(title: &str, description: &str, code: Option<&str>) -> Example {
    Example {
        title: title.to_string(),
        description: description.to_string(),
        code: code.map(str::to_string),
        language: code.map(|_| "apex".to_string()),
        explanation: format!("Why {title} matters."),
    }
}

/// Three small topics across two sections. Only "Apex Triggers" mentions
/// bulkification.
pub fn sample_store() -> TopicStore {
    let mut triggers = topic(
        "apex-triggers",
        "Apex Triggers",
        "development",
        "Always bulkify trigger logic.",
    );
    triggers.key_points = vec!["One trigger per object".to_string()];

    let mut flows = topic(
        "flows",
        "Record-Triggered Flows",
        "admin",
        "Declarative automation with **Flow Builder**.",
    );
    flows.examples = vec![example(
        "Lead routing",
        "Assign leads by region",
        Some("Flow: Route_Leads"),
    )];

    let security = topic(
        "security",
        "User Management & Security",
        "admin",
        "Profiles and permission sets.",
    );

    TopicStore::from_topics(vec![flows, triggers, security], true)
        .expect("sample store is valid")
}

/// An `App` over `sample_store()` with default navigation settings.
pub fn test_app() -> App {
    App::new(sample_store())
}
