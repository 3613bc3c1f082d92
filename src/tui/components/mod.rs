//! # TUI Components
//!
//! Every pane on screen is a component in this directory.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app title, view mode, key hints
//!
//! ### Stateful Components (Event-Driven)
//!
//! These follow the persistent state + transient wrapper pattern. The state
//! lives in `TuiState` across frames and handles events; a wrapper borrowing
//! it (plus props from `App`) is built each frame to render.
//!
//! - `SidebarState` / `Sidebar`: section tree with a keyboard cursor
//! - `SearchBox`: single-line query editor (state and wrapper in one)
//! - `SearchResultsState` / `SearchResultsView`: hit list or no-results panel
//! - `TopicPageState` / `TopicPage`: scrollable article
//!
//! ### Props-Based Data Flow
//!
//! Components never reach into `App`. The shell passes in what they draw:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! TopicPage::new(app.selected_topic(), &mut tui.topic_page).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (top line)
//! ├── sidebar.rs         (section tree)
//! ├── search_box.rs      (query editor)
//! ├── search_results.rs  (results pane)
//! └── topic_page.rs      (article pane)
//! ```

pub mod search_box;
pub mod search_results;
pub mod sidebar;
pub mod title_bar;
pub mod topic_page;

pub use search_box::{SearchBox, SearchEvent};
pub use search_results::{ResultsEvent, SearchResultsState, SearchResultsView};
pub use sidebar::{Sidebar, SidebarEvent, SidebarState};
pub use title_bar::TitleBar;
pub use topic_page::{TopicPage, TopicPageState};
