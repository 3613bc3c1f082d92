//! # Topics
//!
//! One documentation article and the worked examples attached to it.
//! These are plain data: the store validates them once, after which they
//! are only ever read.

use serde::{Deserialize, Serialize};

use crate::core::section::SectionId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    /// Raw section key. Usually a `SectionId`, but unknown keys survive
    /// loading so the topic stays searchable.
    pub section: String,
    /// Markdown body. Authored content, rendered without sanitizing.
    pub content: String,
    #[serde(default, alias = "keyPoints")]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limitations: Option<Vec<String>>,
    #[serde(
        default,
        alias = "architecturalConsiderations",
        skip_serializing_if = "Option::is_none"
    )]
    pub architectural_considerations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Display label for the code block, also used to pick a highlighter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub explanation: String,
}

impl Topic {
    /// The catalog section, or `None` when the key is not a known section.
    pub fn section_id(&self) -> Option<SectionId> {
        SectionId::from_key(&self.section)
    }
}
