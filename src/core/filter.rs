//! # Filter Engine
//!
//! Case-insensitive substring search over the topic store.
//!
//! A topic matches when the query appears in its title, its raw markdown
//! body, any key point, or any example's title, description or code.
//! Results keep store order. There is no ranking and no tokenizing, and the
//! query is matched literally, surrounding whitespace included.
//!
//! The empty query is a substring of everything, so `filter("")` returns the
//! whole store. The shell never asks for that: an empty query means the user
//! is browsing, not searching.

use crate::core::preview::preview;
use crate::core::section::section_label;
use crate::core::topic::Topic;

/// Topics matching `query`, in their original order.
pub fn filter<'a>(query: &str, topics: &'a [Topic]) -> Vec<&'a Topic> {
    let needle = query.to_lowercase();
    topics.iter().filter(|t| matches(t, &needle)).collect()
}

/// Whether `topic` contains `needle`, which must already be lowercased.
pub fn matches(topic: &Topic, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(&topic.title)
        || contains(&topic.content)
        || topic.key_points.iter().any(|p| contains(p))
        || topic.examples.iter().any(|e| {
            contains(&e.title)
                || contains(&e.description)
                || e.code.as_deref().is_some_and(contains)
        })
}

/// One row of the search results list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    /// Raw section key, kept for coloring.
    pub section: String,
    pub section_label: String,
    pub preview: String,
}

/// Everything the results view shows for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    pub fn new(query: &str, topics: &[Topic], preview_length: usize) -> Self {
        let hits = filter(query, topics)
            .into_iter()
            .map(|t| SearchHit {
                id: t.id.clone(),
                title: t.title.clone(),
                section: t.section.clone(),
                section_label: section_label(&t.section),
                preview: preview(&t.content, preview_length),
            })
            .collect();
        Self {
            query: query.to_string(),
            hits,
        }
    }

    /// "Found 1 result" / "Found 3 results".
    pub fn summary(&self) -> String {
        let n = self.hits.len();
        format!("Found {} result{}", n, if n == 1 { "" } else { "s" })
    }
}
