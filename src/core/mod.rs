//! # Core Application Logic
//!
//! This module contains masterhub's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • TopicStore (content) │
//!                    │  • filter() (search)    │
//!                    │  • NavState + update()  │
//!                    │  • TopicView (blocks)   │
//!                    │                         │
//!                    │  No I/O after load.     │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │    CLI     │
//!             │  Adapter   │          │  --search  │
//!             │ (ratatui)  │          │  --check   │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`topic`] / [`store`]: the content and its validation
//! - [`section`]: the closed set of sidebar sections
//! - [`filter`] / [`preview`]: search and result rows
//! - [`state`] / [`action`]: navigation state and the reducer
//! - [`tree`]: sidebar rows
//! - [`view`]: topic → display blocks
//! - [`config`]: settings resolution

pub mod action;
pub mod config;
pub mod filter;
pub mod preview;
pub mod section;
pub mod state;
pub mod store;
pub mod topic;
pub mod tree;
pub mod view;
