//! # SearchResults Component
//!
//! Main pane while a query is active: heading, result count, and a
//! selectable list of hits with wrapped previews. An empty result set shows
//! a "No results found" panel with a few terms worth trying.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::filter::{SearchHit, SearchResults};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme;

const SUGGESTED_TERMS: [&str; 4] = ["workflow", "apex", "integration", "lightning"];

/// Rows above the list: heading, count, blank.
pub const HEADER_HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsEvent {
    Select(String),
}

/// Persistent cursor over the current hits.
#[derive(Default)]
pub struct SearchResultsState {
    ids: Vec<String>,
    /// Rendered height of each hit, for mouse hit testing.
    heights: Vec<u16>,
    cursor: usize,
    list_state: ListState,
}

impl SearchResultsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the hits for the current query. A different hit list resets
    /// the cursor to the top.
    pub fn sync(&mut self, results: &SearchResults) {
        let ids: Vec<&str> = results.hits.iter().map(|h| h.id.as_str()).collect();
        if ids != self.ids {
            self.ids = ids.into_iter().map(String::from).collect();
            self.cursor = 0;
            *self.list_state.offset_mut() = 0;
        }
        self.list_state
            .select((!self.ids.is_empty()).then_some(self.cursor));
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Hit index under a row relative to the top of the list area.
    pub fn hit_at(&self, row: u16) -> Option<usize> {
        let mut top = 0u16;
        for (i, h) in self.heights.iter().enumerate().skip(self.list_state.offset()) {
            top = top.saturating_add(*h);
            if row < top {
                return Some(i);
            }
        }
        None
    }

    pub fn select_index(&mut self, index: usize) -> Option<ResultsEvent> {
        let id = self.ids.get(index)?;
        self.cursor = index;
        Some(ResultsEvent::Select(id.clone()))
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.ids.is_empty() {
            return;
        }
        let last = self.ids.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.list_state.select(Some(self.cursor));
    }
}

impl EventHandler for SearchResultsState {
    type Event = ResultsEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ResultsEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.move_cursor(-1);
                None
            }
            TuiEvent::CursorDown => {
                self.move_cursor(1);
                None
            }
            TuiEvent::PageUp => {
                self.move_cursor(-5);
                None
            }
            TuiEvent::PageDown => {
                self.move_cursor(5);
                None
            }
            TuiEvent::CursorHome => {
                self.move_cursor(isize::MIN);
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => self.select_index(self.cursor),
            _ => None,
        }
    }
}

/// Transient render wrapper for the results pane.
pub struct SearchResultsView<'a> {
    results: &'a SearchResults,
    state: &'a mut SearchResultsState,
    focused: bool,
}

impl<'a> SearchResultsView<'a> {
    pub fn new(results: &'a SearchResults, state: &'a mut SearchResultsState, focused: bool) -> Self {
        Self {
            results,
            state,
            focused,
        }
    }
}

impl Component for SearchResultsView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, list_area] =
            Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(area);

        let header = Text::from(vec![
            Line::from(Span::styled(
                format!("Search Results for \"{}\"", self.results.query),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.results.summary(),
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        frame.render_widget(Paragraph::new(header), header_area);

        if self.results.hits.is_empty() {
            self.state.heights.clear();
            render_no_results(frame, list_area);
            return;
        }

        let wrap_width = list_area.width.saturating_sub(4).max(1) as usize;
        let items: Vec<ListItem> = self
            .results
            .hits
            .iter()
            .map(|hit| hit_item(hit, wrap_width))
            .collect();
        self.state.heights = items
            .iter()
            .map(|i| u16::try_from(i.height()).unwrap_or(u16::MAX))
            .collect();

        let highlight = if self.focused {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .highlight_style(highlight)
            .highlight_symbol("▌ ")
            .highlight_spacing(ratatui::widgets::HighlightSpacing::Always);
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }
}

fn hit_item(hit: &SearchHit, wrap_width: usize) -> ListItem<'static> {
    let accent = theme::section_key_color(&hit.section);
    let mut lines = vec![
        Line::from(Span::styled(
            hit.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            hit.section_label.clone(),
            Style::default().fg(accent),
        )),
    ];
    lines.extend(
        textwrap::wrap(&hit.preview, wrap_width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l.into_owned(), Style::default().fg(Color::Gray)))),
    );
    lines.push(Line::default());
    ListItem::new(lines)
}

fn render_no_results(frame: &mut Frame, area: Rect) {
    let terms = SUGGESTED_TERMS
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let body = Text::from(vec![
        Line::from(Span::styled(
            "No results found",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!("Try searching for terms like {terms}"),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    let panel = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme::IDLE_BORDER))
                .padding(Padding::uniform(1)),
        );
    let height = 8.min(area.height);
    frame.render_widget(panel, Rect { height, ..area });
}
