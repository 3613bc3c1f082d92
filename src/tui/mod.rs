//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! Exactly one pane owns the keyboard: the sidebar, the main pane (article
//! or results), or the search box. Tab cycles them; `/` and Ctrl+F jump to
//! search. Global keys (Ctrl+C, Ctrl+B, clicks, the wheel) work everywhere.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms waiting for input and
//! only redraws after an event (resize included). All pending events are
//! drained before the next draw.

mod component;
mod components;
mod event;
pub mod markdown;
mod theme;
mod ui;

use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info, warn};
use ratatui::DefaultTerminal;
use ratatui::layout::{Position, Rect};

use crate::core::action::{Action, Effect};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, ViewMode};
use crate::core::tree::nav_rows;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ResultsEvent, SearchBox, SearchEvent, SearchResultsState, SidebarEvent, SidebarState,
    TopicPageState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::ClickTarget;

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Main,
    Search,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub sidebar: SidebarState,
    pub search_box: SearchBox,
    pub results: SearchResultsState,
    pub topic_page: TopicPageState,
    /// Column breakpoint below which the sidebar collapses.
    pub narrow_width: u16,
    pub is_narrow: bool,
}

impl TuiState {
    pub fn new(narrow_width: u16) -> Self {
        Self {
            focus: Focus::Sidebar,
            sidebar: SidebarState::new(),
            search_box: SearchBox::new(),
            results: SearchResultsState::new(),
            topic_page: TopicPageState::new(),
            narrow_width,
            is_narrow: false,
        }
    }

    /// Pull the latest core state into the components before drawing or
    /// routing input.
    pub fn sync(&mut self, app: &App, width: u16) {
        self.is_narrow = width < self.narrow_width;
        if !self.sidebar_visible(app) && self.focus == Focus::Sidebar {
            self.focus = Focus::Main;
        }
        self.sidebar.sync(nav_rows(&app.store, &app.nav));
        self.search_box.sync(&app.nav.search_query);
        self.search_box.focused = self.focus == Focus::Search;
        if let Some(results) = app.search_results() {
            self.results.sync(&results);
        }
        self.topic_page.sync(&app.nav.selected);
    }

    fn sidebar_visible(&self, app: &App) -> bool {
        !self.is_narrow || app.nav.sidebar_open
    }

    fn cycle_focus(&mut self, app: &App, forward: bool) {
        let order = [Focus::Sidebar, Focus::Main, Focus::Search];
        let at = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let step = if forward { 1 } else { order.len() - 1 };
        let mut next = order[(at + step) % order.len()];
        if next == Focus::Sidebar && !self.sidebar_visible(app) {
            next = order[(at + 2 * step) % order.len()];
        }
        self.focus = next;
    }

    /// Where focus goes when the search box lets go of it.
    fn leave_search(&mut self, app: &App) {
        self.focus = if self.sidebar_visible(app) {
            Focus::Sidebar
        } else {
            Focus::Main
        };
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is pushed unconditionally; terminals that
        // lack it ignore the sequence.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(mut app: App, config: &ResolvedConfig) -> std::io::Result<()> {
    let mut tui = TuiState::new(config.narrow_width);
    let mut terminal = ratatui::init();
    let result = {
        let _terminal_mode_guard = TerminalModeGuard::new()
            .map_err(|e| warn!("Failed to enable terminal modes: {}", e))
            .ok();
        event_loop(&mut terminal, &mut app, &mut tui)
    };
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    let mut needs_redraw = true;
    loop {
        let area = Rect::from((Position::ORIGIN, terminal.size()?));
        tui.sync(app, area.width);

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(250));
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if handle_event(app, tui, event, area) == Effect::Quit {
                info!("Quit requested");
                return Ok(());
            }
        }
    }
}

/// Route one input event to the focused pane and apply what comes back.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent, area: Rect) -> Effect {
    let effect = route(app, tui, event, area);
    tui.sync(app, area.width);
    effect
}

fn route(app: &mut App, tui: &mut TuiState, event: TuiEvent, area: Rect) -> Effect {
    match event {
        TuiEvent::Resize => return Effect::None,
        TuiEvent::ForceQuit => return app.dispatch(Action::Quit),
        TuiEvent::FocusSearch => {
            tui.focus = Focus::Search;
            return Effect::None;
        }
        TuiEvent::ToggleSidebar => {
            let effect = app.dispatch(Action::ToggleSidebar);
            if app.nav.sidebar_open && tui.is_narrow {
                tui.focus = Focus::Sidebar;
            }
            return effect;
        }
        TuiEvent::MouseClick(col, row) => return click(app, tui, col, row, area),
        TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
            match app.nav.mode() {
                ViewMode::Browsing => {
                    tui.topic_page.handle_event(&event);
                }
                ViewMode::Searching => {
                    let step = if event == TuiEvent::ScrollUp {
                        TuiEvent::CursorUp
                    } else {
                        TuiEvent::CursorDown
                    };
                    tui.results.handle_event(&step);
                }
            }
            return Effect::None;
        }
        TuiEvent::Tab => {
            tui.cycle_focus(app, true);
            return Effect::None;
        }
        TuiEvent::BackTab => {
            tui.cycle_focus(app, false);
            return Effect::None;
        }
        _ => {}
    }

    if tui.focus != Focus::Search {
        match event {
            TuiEvent::InputChar('q') => return app.dispatch(Action::Quit),
            TuiEvent::InputChar('/') => {
                tui.focus = Focus::Search;
                return Effect::None;
            }
            _ => {}
        }
    }

    match tui.focus {
        Focus::Search => match tui.search_box.handle_event(&event) {
            Some(SearchEvent::Changed(query)) => app.dispatch(Action::SetSearchQuery(query)),
            Some(SearchEvent::Cleared) => {
                tui.leave_search(app);
                app.dispatch(Action::SetSearchQuery(String::new()))
            }
            Some(SearchEvent::Done) => {
                tui.focus = Focus::Main;
                Effect::None
            }
            None => Effect::None,
        },
        Focus::Sidebar => {
            if event == TuiEvent::Escape && tui.is_narrow {
                return app.dispatch(Action::CloseSidebar);
            }
            match tui.sidebar.handle_event(&event) {
                Some(e) => sidebar_event(app, tui, e),
                None => Effect::None,
            }
        }
        Focus::Main => match app.nav.mode() {
            ViewMode::Searching => {
                if event == TuiEvent::Escape {
                    return app.dispatch(Action::SetSearchQuery(String::new()));
                }
                match tui.results.handle_event(&event) {
                    Some(ResultsEvent::Select(id)) => app.dispatch(Action::SelectTopic(id)),
                    None => Effect::None,
                }
            }
            ViewMode::Browsing => {
                tui.topic_page.handle_event(&event);
                Effect::None
            }
        },
    }
}

fn sidebar_event(app: &mut App, tui: &mut TuiState, event: SidebarEvent) -> Effect {
    match event {
        SidebarEvent::Toggle(section) => {
            app.dispatch(Action::ToggleSection(section.key().to_string()))
        }
        SidebarEvent::Select(id) => {
            let effect = app.dispatch(Action::SelectTopic(id));
            if tui.is_narrow {
                tui.focus = Focus::Main;
            }
            effect
        }
    }
}

fn click(app: &mut App, tui: &mut TuiState, col: u16, row: u16, area: Rect) -> Effect {
    let target = ui::hit_test(col, row, area, app, tui);
    debug!("Click at ({}, {}) -> {:?}", col, row, target);
    match target {
        ClickTarget::Search => {
            tui.focus = Focus::Search;
            Effect::None
        }
        ClickTarget::SidebarRow(index) => {
            tui.focus = Focus::Sidebar;
            tui.sidebar.set_cursor(index);
            match tui.sidebar.activate(index) {
                Some(e) => sidebar_event(app, tui, e),
                None => Effect::None,
            }
        }
        ClickTarget::Sidebar => {
            tui.focus = Focus::Sidebar;
            Effect::None
        }
        ClickTarget::ResultRow(index) => {
            tui.focus = Focus::Main;
            match tui.results.select_index(index) {
                Some(ResultsEvent::Select(id)) => app.dispatch(Action::SelectTopic(id)),
                None => Effect::None,
            }
        }
        ClickTarget::Main => {
            tui.focus = Focus::Main;
            if tui.is_narrow && app.nav.sidebar_open {
                return app.dispatch(Action::CloseSidebar);
            }
            Effect::None
        }
        ClickTarget::Nothing => Effect::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::section::SectionId;
    use crate::test_support::test_app;

    const WIDE: Rect = Rect {
        x: 0,
        y: 0,
        width: 120,
        height: 30,
    };
    const NARROW: Rect = Rect {
        x: 0,
        y: 0,
        width: 60,
        height: 30,
    };

    fn setup(area: Rect) -> (App, TuiState) {
        let app = test_app();
        let mut tui = TuiState::new(100);
        tui.sync(&app, area.width);
        (app, tui)
    }

    fn send(app: &mut App, tui: &mut TuiState, area: Rect, events: &[TuiEvent]) -> Effect {
        let mut effect = Effect::None;
        for e in events {
            effect = handle_event(app, tui, e.clone(), area);
        }
        effect
    }

    fn type_str(text: &str) -> Vec<TuiEvent> {
        text.chars().map(TuiEvent::InputChar).collect()
    }

    #[test]
    fn test_slash_then_typing_searches_live() {
        let (mut app, mut tui) = setup(WIDE);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::InputChar('/')]);
        assert_eq!(tui.focus, Focus::Search);
        send(&mut app, &mut tui, WIDE, &type_str("bulk"));
        assert_eq!(app.nav.search_query, "bulk");
        assert_eq!(app.nav.mode(), ViewMode::Searching);
    }

    #[test]
    fn test_q_types_into_search_but_quits_elsewhere() {
        let (mut app, mut tui) = setup(WIDE);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::FocusSearch]);
        let effect = send(&mut app, &mut tui, WIDE, &[TuiEvent::InputChar('q')]);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.nav.search_query, "q");

        let effect = send(&mut app, &mut tui, WIDE, &[TuiEvent::Tab, TuiEvent::InputChar('q')]);
        assert_eq!(tui.focus, Focus::Sidebar);
        assert_eq!(effect, Effect::Quit);
    }

    #[test]
    fn test_escape_in_search_clears_and_leaves() {
        let (mut app, mut tui) = setup(WIDE);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::FocusSearch]);
        send(&mut app, &mut tui, WIDE, &type_str("apex"));
        send(&mut app, &mut tui, WIDE, &[TuiEvent::Escape]);
        assert_eq!(app.nav.search_query, "");
        assert_eq!(tui.focus, Focus::Sidebar);
        assert!(tui.search_box.buffer.is_empty());
    }

    #[test]
    fn test_enter_on_result_opens_topic_and_clears_search() {
        let (mut app, mut tui) = setup(WIDE);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::FocusSearch]);
        send(&mut app, &mut tui, WIDE, &type_str("bulk"));
        send(&mut app, &mut tui, WIDE, &[TuiEvent::Submit]);
        assert_eq!(tui.focus, Focus::Main);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::Submit]);
        assert_eq!(app.nav.selected, "apex-triggers");
        assert_eq!(app.nav.mode(), ViewMode::Browsing);
        assert!(tui.search_box.buffer.is_empty());
    }

    #[test]
    fn test_sidebar_enter_toggles_section() {
        let (mut app, mut tui) = setup(WIDE);
        // Cursor starts on the selected topic; Left moves to its header.
        send(&mut app, &mut tui, WIDE, &[TuiEvent::CursorLeft]);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::Submit]);
        assert!(!app.nav.is_expanded(SectionId::Admin));
        send(&mut app, &mut tui, WIDE, &[TuiEvent::CursorDown, TuiEvent::Submit]);
        assert!(app.nav.is_expanded(SectionId::Development));
        send(&mut app, &mut tui, WIDE, &[TuiEvent::CursorDown, TuiEvent::Submit]);
        assert_eq!(app.nav.selected, "apex-triggers");
    }

    #[test]
    fn test_tab_cycles_all_panes_when_wide() {
        let (mut app, mut tui) = setup(WIDE);
        assert_eq!(tui.focus, Focus::Sidebar);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::Tab]);
        assert_eq!(tui.focus, Focus::Main);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::Tab]);
        assert_eq!(tui.focus, Focus::Search);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::Tab]);
        assert_eq!(tui.focus, Focus::Sidebar);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::BackTab]);
        assert_eq!(tui.focus, Focus::Search);
    }

    #[test]
    fn test_narrow_tab_skips_hidden_sidebar() {
        let (mut app, mut tui) = setup(NARROW);
        assert_eq!(tui.focus, Focus::Main);
        send(&mut app, &mut tui, NARROW, &[TuiEvent::Tab]);
        assert_eq!(tui.focus, Focus::Search);
        send(&mut app, &mut tui, NARROW, &[TuiEvent::Tab]);
        assert_eq!(tui.focus, Focus::Main);
    }

    #[test]
    fn test_narrow_sidebar_selection_closes_overlay() {
        let (mut app, mut tui) = setup(NARROW);
        send(&mut app, &mut tui, NARROW, &[TuiEvent::ToggleSidebar]);
        assert!(app.nav.sidebar_open);
        assert_eq!(tui.focus, Focus::Sidebar);
        // Admin is expanded: header, flows, security.
        send(&mut app, &mut tui, NARROW, &[TuiEvent::CursorDown, TuiEvent::Submit]);
        assert_eq!(app.nav.selected, "security");
        assert!(!app.nav.sidebar_open);
        assert_eq!(tui.focus, Focus::Main);
    }

    #[test]
    fn test_narrow_escape_closes_overlay() {
        let (mut app, mut tui) = setup(NARROW);
        send(&mut app, &mut tui, NARROW, &[TuiEvent::ToggleSidebar, TuiEvent::Escape]);
        assert!(!app.nav.sidebar_open);
        assert_eq!(tui.focus, Focus::Main);
    }

    #[test]
    fn test_force_quit_works_from_search() {
        let (mut app, mut tui) = setup(WIDE);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::FocusSearch]);
        assert_eq!(send(&mut app, &mut tui, WIDE, &[TuiEvent::ForceQuit]), Effect::Quit);
    }

    #[test]
    fn test_click_on_sidebar_header_toggles() {
        let (mut app, mut tui) = setup(WIDE);
        // Sidebar border at row 4, first row (Admin header) at row 5.
        send(&mut app, &mut tui, WIDE, &[TuiEvent::MouseClick(5, 5)]);
        assert!(!app.nav.is_expanded(SectionId::Admin));
        assert_eq!(tui.focus, Focus::Sidebar);
    }

    #[test]
    fn test_click_on_search_focuses_it() {
        let (mut app, mut tui) = setup(WIDE);
        send(&mut app, &mut tui, WIDE, &[TuiEvent::MouseClick(60, 2)]);
        assert_eq!(tui.focus, Focus::Search);
    }
}
