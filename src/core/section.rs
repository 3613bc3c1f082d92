//! # Sections
//!
//! The closed set of top-level categories a topic can belong to, and the
//! display descriptor (title, icon, accent) for each one.
//!
//! Topics carry their section as a plain string key so that content files
//! stay human-editable. `SectionId::from_key` is the single place where that
//! string is checked against the catalog; anything it rejects is an unknown
//! section and is reported at load time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A known sidebar section. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Admin,
    Development,
    Integration,
    Aura,
    Lwc,
    Architecture,
}

/// Glyph shown next to a section title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Settings,
    Code,
    Cloud,
    Zap,
    Book,
    Users,
}

/// Accent color family, mapped to a concrete terminal color by the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Green,
    Purple,
    Orange,
    Indigo,
    Red,
}

/// How a section presents itself in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub title: &'static str,
    pub icon: Icon,
    pub accent: Accent,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Admin,
        SectionId::Development,
        SectionId::Integration,
        SectionId::Aura,
        SectionId::Lwc,
        SectionId::Architecture,
    ];

    /// Parse a section key as it appears in content files and config.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            SectionId::Admin => "admin",
            SectionId::Development => "development",
            SectionId::Integration => "integration",
            SectionId::Aura => "aura",
            SectionId::Lwc => "lwc",
            SectionId::Architecture => "architecture",
        }
    }

    pub fn descriptor(self) -> SectionDescriptor {
        let (title, icon, accent) = match self {
            SectionId::Admin => ("Salesforce Administration", Icon::Settings, Accent::Blue),
            SectionId::Development => ("Salesforce Development", Icon::Code, Accent::Green),
            SectionId::Integration => ("Integration Patterns", Icon::Cloud, Accent::Purple),
            SectionId::Aura => ("Aura Components", Icon::Zap, Accent::Orange),
            SectionId::Lwc => ("Lightning Web Components", Icon::Book, Accent::Indigo),
            SectionId::Architecture => ("Architecture & Limitations", Icon::Users, Accent::Red),
        };
        SectionDescriptor { title, icon, accent }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Human label for a raw section key.
///
/// Known keys use the catalog title; anything else falls back to the key
/// with dashes turned into spaces.
pub fn section_label(key: &str) -> String {
    match SectionId::from_key(key) {
        Some(section) => section.descriptor().title.to_string(),
        None => key.replace('-', " "),
    }
}
