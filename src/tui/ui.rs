//! Screen layout, drawing, and mouse hit testing.
//!
//! ```text
//! ┌ title bar ─────────────────────────────────────────┐  1 row
//! ╭ Search ────────────────────────────────────────────╮  3 rows
//! ┌ Topics ──────┐┌────────────────────────────────────┐
//! │ sidebar      ││ topic page / search results        │
//! └──────────────┘└────────────────────────────────────┘
//! ```
//!
//! Below the narrow breakpoint the main pane takes the full width and the
//! sidebar, when open, is drawn over its left edge.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Clear, Padding};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::search_results::HEADER_HEIGHT;
use crate::tui::components::{SearchResultsView, Sidebar, TitleBar, TopicPage};
use crate::tui::{Focus, TuiState, theme};

const SIDEBAR_WIDTH: u16 = 36;

/// Where each pane goes for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub search: Rect,
    /// `None` when the sidebar is hidden.
    pub sidebar: Option<Rect>,
    pub main: Rect,
    /// Sidebar is drawn on top of the main pane.
    pub overlay: bool,
}

impl ScreenLayout {
    pub fn compute(area: Rect, narrow: bool, sidebar_open: bool) -> Self {
        use Constraint::{Length, Min};
        let [title, search, body] = Layout::vertical([Length(1), Length(3), Min(0)]).areas(area);

        if !narrow {
            let [sidebar, main] =
                Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body);
            return Self {
                title,
                search,
                sidebar: Some(sidebar),
                main,
                overlay: false,
            };
        }

        let sidebar = sidebar_open.then(|| Rect {
            width: SIDEBAR_WIDTH.min(body.width),
            ..body
        });
        Self {
            title,
            search,
            sidebar,
            main: body,
            overlay: sidebar.is_some(),
        }
    }
}

fn main_block(focused: bool) -> Block<'static> {
    let border = if focused {
        theme::FOCUS_BORDER
    } else {
        theme::IDLE_BORDER
    };
    Block::bordered()
        .border_style(Style::default().fg(border))
        .padding(Padding::horizontal(1))
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let layout = ScreenLayout::compute(frame.area(), tui.is_narrow, app.nav.sidebar_open);

    TitleBar::new(app.nav.mode(), tui.focus, tui.is_narrow).render(frame, layout.title);
    tui.search_box.render(frame, layout.search);

    let block = main_block(tui.focus == Focus::Main);
    let inner = block.inner(layout.main);
    frame.render_widget(block, layout.main);
    match app.search_results() {
        Some(results) => {
            SearchResultsView::new(&results, &mut tui.results, tui.focus == Focus::Main)
                .render(frame, inner)
        }
        None => TopicPage::new(app.selected_topic(), &mut tui.topic_page).render(frame, inner),
    }

    if let Some(area) = layout.sidebar {
        if layout.overlay {
            frame.render_widget(Clear, area);
        }
        Sidebar::new(&mut tui.sidebar, tui.focus == Focus::Sidebar).render(frame, area);
    }
}

/// What a left click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Search,
    /// Index into the sidebar rows.
    SidebarRow(usize),
    /// Anywhere on the sidebar that is not a row.
    Sidebar,
    /// Index into the search hits.
    ResultRow(usize),
    Main,
    Nothing,
}

pub fn hit_test(col: u16, row: u16, frame_area: Rect, app: &App, tui: &TuiState) -> ClickTarget {
    let layout = ScreenLayout::compute(frame_area, tui.is_narrow, app.nav.sidebar_open);
    let pos = (col, row).into();

    if layout.search.contains(pos) {
        return ClickTarget::Search;
    }
    // Checked before main, since an overlay sidebar sits on top of it.
    if let Some(area) = layout.sidebar
        && area.contains(pos)
    {
        let inner = Block::bordered().inner(area);
        if !inner.contains(pos) {
            return ClickTarget::Sidebar;
        }
        let index = tui.sidebar.scroll_offset() + (row - inner.y) as usize;
        return if index < tui.sidebar.rows().len() {
            ClickTarget::SidebarRow(index)
        } else {
            ClickTarget::Sidebar
        };
    }
    if layout.main.contains(pos) {
        let inner = main_block(false).inner(layout.main);
        let list_top = inner.y + HEADER_HEIGHT;
        if app.search_results().is_some() && inner.contains(pos) && row >= list_top {
            if let Some(index) = tui.results.hit_at(row - list_top) {
                return ClickTarget::ResultRow(index);
            }
        }
        return ClickTarget::Main;
    }
    ClickTarget::Nothing
}
