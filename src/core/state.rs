//! # Application State
//!
//! Core state for masterhub. Domain data only; presentation state (focus,
//! list cursors, scroll offsets) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: TopicStore            // immutable content
//! ├── nav: NavState                // per-session navigation state
//! │   ├── selected: String         // id of the topic being read
//! │   ├── search_query: String     // "" = browsing
//! │   ├── expanded: BTreeSet       // open sidebar sections
//! │   └── sidebar_open: bool       // narrow terminals only
//! └── preview_length: usize        // search preview size
//! ```
//!
//! `NavState` only changes through `update(state, action)` in action.rs.
//! `App::dispatch` is the one place that swaps the new state in.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::config::{DEFAULT_PREVIEW_LENGTH, ResolvedConfig};
use crate::core::filter::SearchResults;
use crate::core::section::SectionId;
use crate::core::store::TopicStore;
use crate::core::topic::Topic;

/// Which main view the shell shows. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Browsing,
    Searching,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    pub selected: String,
    pub search_query: String,
    pub expanded: BTreeSet<SectionId>,
    pub sidebar_open: bool,
}

impl NavState {
    pub fn new(selected: String, expanded: impl IntoIterator<Item = SectionId>) -> Self {
        Self {
            selected,
            search_query: String::new(),
            expanded: expanded.into_iter().collect(),
            sidebar_open: false,
        }
    }

    pub fn mode(&self) -> ViewMode {
        if self.search_query.is_empty() {
            ViewMode::Browsing
        } else {
            ViewMode::Searching
        }
    }

    pub fn is_expanded(&self, section: SectionId) -> bool {
        self.expanded.contains(&section)
    }
}

pub struct App {
    pub store: TopicStore,
    pub nav: NavState,
    pub preview_length: usize,
}

impl App {
    /// Start on the first topic with the administration section open.
    pub fn new(store: TopicStore) -> Self {
        let selected = store.first().id.clone();
        Self {
            store,
            nav: NavState::new(selected, [SectionId::Admin]),
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }

    pub fn from_config(store: TopicStore, config: &ResolvedConfig) -> Self {
        let selected = match config.default_topic.as_deref() {
            Some(id) if store.get(id).is_some() => id.to_string(),
            Some(id) => {
                warn!("Default topic '{}' not found, starting on the first topic", id);
                store.first().id.clone()
            }
            None => store.first().id.clone(),
        };
        Self {
            store,
            nav: NavState::new(selected, config.expanded_sections.iter().copied()),
            preview_length: config.preview_length,
        }
    }

    /// Run `action` through the reducer and keep the resulting state.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        debug!("Dispatch: {:?}", action);
        let state = std::mem::take(&mut self.nav);
        let (next, effect) = update(state, action, &self.store);
        self.nav = next;
        effect
    }

    /// The topic being read. Falls back to the first topic if the selection
    /// somehow points nowhere.
    pub fn selected_topic(&self) -> &Topic {
        self.store
            .get(&self.nav.selected)
            .unwrap_or_else(|| self.store.first())
    }

    /// Search results for the current query, or `None` while browsing.
    pub fn search_results(&self) -> Option<SearchResults> {
        match self.nav.mode() {
            ViewMode::Browsing => None,
            ViewMode::Searching => Some(SearchResults::new(
                &self.nav.search_query,
                self.store.topics(),
                self.preview_length,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{HubConfig, resolve};
    use crate::test_support::{sample_store, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.nav.selected, "flows");
        assert!(app.nav.search_query.is_empty());
        assert_eq!(app.nav.expanded, BTreeSet::from([SectionId::Admin]));
        assert!(!app.nav.sidebar_open);
        assert_eq!(app.nav.mode(), ViewMode::Browsing);
    }

    #[test]
    fn test_browsing_has_no_search_results() {
        let app = test_app();
        assert!(app.search_results().is_none());
        assert_eq!(app.selected_topic().id, "flows");
    }

    #[test]
    fn test_searching_produces_results() {
        let mut app = test_app();
        app.dispatch(Action::SetSearchQuery("bulk".to_string()));
        let results = app.search_results().unwrap();
        assert_eq!(results.hits.len(), 1);
        assert_eq!(results.hits[0].id, "apex-triggers");
    }

    #[test]
    fn test_from_config_uses_default_topic_and_sections() {
        let mut config = resolve(&HubConfig::default(), &Default::default());
        config.default_topic = Some("security".to_string());
        config.expanded_sections = vec![SectionId::Development, SectionId::Lwc];
        config.preview_length = 50;
        let app = App::from_config(sample_store(), &config);
        assert_eq!(app.nav.selected, "security");
        assert_eq!(
            app.nav.expanded,
            BTreeSet::from([SectionId::Development, SectionId::Lwc])
        );
        assert_eq!(app.preview_length, 50);
    }

    #[test]
    fn test_from_config_unknown_default_topic_falls_back() {
        let mut config = resolve(&HubConfig::default(), &Default::default());
        config.default_topic = Some("missing".to_string());
        let app = App::from_config(sample_store(), &config);
        assert_eq!(app.nav.selected, "flows");
    }
}
