//! # Topic Store
//!
//! The immutable, ordered set of topics the whole application reads from.
//!
//! Content arrives as a JSON array, either the copy embedded in the binary
//! or a file supplied through config/CLI. Every entry is validated once:
//!
//! - entries that fail to deserialize, or leave `id`, `title`, `section` or
//!   `content` empty, are skipped
//! - later entries reusing an earlier `id` are skipped
//! - entries with an unknown section are kept (searchable, but absent from
//!   the sidebar)
//!
//! Each of those produces a [`Diagnostic`] and a warning in the log. In
//! strict mode any diagnostic fails the load instead.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::Value;
use thiserror::Error;

use crate::core::section::SectionId;
use crate::core::topic::Topic;

const BUILTIN_TOPICS: &str = include_str!("../../content/topics.json");

const REQUIRED_FIELDS: [&str; 4] = ["id", "title", "section", "content"];

/// A problem found while validating content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Entry could not be read as a topic at all.
    Malformed { index: usize, reason: String },
    /// Required field absent or blank.
    MissingField { index: usize, field: &'static str },
    DuplicateId { index: usize, id: String },
    /// Kept, but unreachable from the sidebar.
    UnknownSection { id: String, section: String },
}

impl Diagnostic {
    /// Whether the entry was dropped from the store.
    pub fn skips_entry(&self) -> bool {
        !matches!(self, Diagnostic::UnknownSection { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Malformed { index, reason } => {
                write!(f, "entry {index}: malformed topic ({reason})")
            }
            Diagnostic::MissingField { index, field } => {
                write!(f, "entry {index}: missing required field `{field}`")
            }
            Diagnostic::DuplicateId { index, id } => {
                write!(f, "entry {index}: duplicate topic id `{id}`")
            }
            Diagnostic::UnknownSection { id, section } => {
                write!(f, "topic `{id}`: unknown section `{section}`")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read content file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content is not a JSON array of topics: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("content failed validation with {} problem(s)", .0.len())]
    Invalid(Vec<Diagnostic>),
    #[error("content contains no usable topics")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct TopicStore {
    topics: Vec<Topic>,
    diagnostics: Vec<Diagnostic>,
}

impl TopicStore {
    /// The content compiled into the binary.
    pub fn builtin(strict: bool) -> Result<Self, StoreError> {
        Self::from_json(BUILTIN_TOPICS, strict)
    }

    pub fn load_file(path: &Path, strict: bool) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loading topics from {}", path.display());
        Self::from_json(&json, strict)
    }

    pub fn from_json(json: &str, strict: bool) -> Result<Self, StoreError> {
        let entries: Vec<Value> = serde_json::from_str(json)?;
        let candidates = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| parse_entry(index, entry));
        Self::validate(candidates, strict)
    }

    /// Build a store from already-typed topics, applying the same rules as
    /// content files.
    pub fn from_topics(topics: Vec<Topic>, strict: bool) -> Result<Self, StoreError> {
        let candidates = topics.into_iter().enumerate().map(|(index, topic)| {
            match blank_required_field(&topic) {
                Some(field) => Err(Diagnostic::MissingField { index, field }),
                None => Ok(topic),
            }
        });
        Self::validate(candidates, strict)
    }

    fn validate(
        candidates: impl Iterator<Item = Result<Topic, Diagnostic>>,
        strict: bool,
    ) -> Result<Self, StoreError> {
        let mut topics = Vec::new();
        let mut diagnostics = Vec::new();
        let mut seen_ids = HashSet::new();

        for (index, candidate) in candidates.enumerate() {
            let topic = match candidate {
                Ok(topic) => topic,
                Err(diagnostic) => {
                    diagnostics.push(diagnostic);
                    continue;
                }
            };
            if !seen_ids.insert(topic.id.clone()) {
                diagnostics.push(Diagnostic::DuplicateId {
                    index,
                    id: topic.id,
                });
                continue;
            }
            if topic.section_id().is_none() {
                diagnostics.push(Diagnostic::UnknownSection {
                    id: topic.id.clone(),
                    section: topic.section.clone(),
                });
            }
            topics.push(topic);
        }

        for diagnostic in &diagnostics {
            warn!("Content: {}", diagnostic);
        }
        if strict && !diagnostics.is_empty() {
            return Err(StoreError::Invalid(diagnostics));
        }
        if topics.is_empty() {
            return Err(StoreError::Empty);
        }

        info!(
            "Topic store ready: {} topics, {} diagnostics",
            topics.len(),
            diagnostics.len()
        );
        Ok(Self {
            topics,
            diagnostics,
        })
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Always false once the store is built.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// The first topic in store order. Loading rejects empty stores.
    pub fn first(&self) -> &Topic {
        &self.topics[0]
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Topics of one section, in store order.
    pub fn section_topics(&self, section: SectionId) -> impl Iterator<Item = &Topic> {
        self.topics
            .iter()
            .filter(move |t| t.section_id() == Some(section))
    }

    /// Every known section mapped to its topics in store order. Sections
    /// without topics map to an empty list; topics with unknown sections
    /// appear nowhere.
    pub fn group_by_section(&self) -> BTreeMap<SectionId, Vec<&Topic>> {
        let mut groups: BTreeMap<SectionId, Vec<&Topic>> =
            SectionId::ALL.into_iter().map(|s| (s, Vec::new())).collect();
        for topic in &self.topics {
            if let Some(section) = topic.section_id()
                && let Some(group) = groups.get_mut(&section)
            {
                group.push(topic);
            }
        }
        groups
    }
}

fn parse_entry(index: usize, entry: Value) -> Result<Topic, Diagnostic> {
    if !entry.is_object() {
        return Err(Diagnostic::Malformed {
            index,
            reason: "not an object".to_string(),
        });
    }
    for field in REQUIRED_FIELDS {
        let present = entry
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());
        if !present {
            return Err(Diagnostic::MissingField { index, field });
        }
    }
    serde_json::from_value(entry).map_err(|e| {
        debug!("Entry {} failed to deserialize: {}", index, e);
        Diagnostic::Malformed {
            index,
            reason: e.to_string(),
        }
    })
}

fn blank_required_field(topic: &Topic) -> Option<&'static str> {
    let fields = [&topic.id, &topic.title, &topic.section, &topic.content];
    REQUIRED_FIELDS
        .into_iter()
        .zip(fields)
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
}
