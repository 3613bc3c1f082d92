//! # Actions
//!
//! Everything that can happen in masterhub becomes an `Action`.
//! User opens a sidebar section? That's `Action::ToggleSection("admin")`.
//! User types in the search box? That's `Action::SetSearchQuery(text)`.
//!
//! The `update()` function takes the current state and an action,
//! then returns the new state. No side effects here beyond logging.
//!
//! ```text
//! NavState + Action  →  update()  →  New NavState (+ Effect)
//! ```
//!
//! Two view modes fall out of the state: browsing while the query is empty,
//! searching otherwise. `SelectTopic` always lands back in browsing.
//!
//! ```text
//!              SetSearchQuery(non-empty)
//!   BROWSING ─────────────────────────────▶ SEARCHING
//!      ▲                                        │
//!      └──── SelectTopic / SetSearchQuery("") ──┘
//! ```

use log::debug;

use crate::core::section::SectionId;
use crate::core::state::NavState;
use crate::core::store::TopicStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open or close a sidebar section by key. Unknown keys do nothing.
    ToggleSection(String),
    /// Read a topic by id. Clears the search and closes the sidebar overlay.
    SelectTopic(String),
    SetSearchQuery(String),
    ToggleSidebar,
    CloseSidebar,
    Quit,
}

/// What the shell must do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(mut state: NavState, action: Action, store: &TopicStore) -> (NavState, Effect) {
    match action {
        Action::ToggleSection(key) => {
            match SectionId::from_key(&key) {
                Some(section) => {
                    if !state.expanded.remove(&section) {
                        state.expanded.insert(section);
                    }
                }
                None => debug!("Ignoring toggle of unknown section '{}'", key),
            }
            (state, Effect::None)
        }
        Action::SelectTopic(id) => {
            if store.get(&id).is_none() {
                debug!("Ignoring selection of unknown topic '{}'", id);
                return (state, Effect::None);
            }
            state.selected = id;
            state.search_query.clear();
            state.sidebar_open = false;
            (state, Effect::None)
        }
        Action::SetSearchQuery(query) => {
            state.search_query = query;
            (state, Effect::None)
        }
        Action::ToggleSidebar => {
            state.sidebar_open = !state.sidebar_open;
            (state, Effect::None)
        }
        Action::CloseSidebar => {
            state.sidebar_open = false;
            (state, Effect::None)
        }
        Action::Quit => (state, Effect::Quit),
    }
}
