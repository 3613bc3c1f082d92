//! # Sidebar Component
//!
//! The section tree: one header per section, topic rows under expanded
//! sections. Rows come from `core::tree::nav_rows` each frame; this
//! component only owns the keyboard cursor.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState`
//! - `Sidebar` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use unicode_width::UnicodeWidthChar;

use crate::core::section::SectionId;
use crate::core::tree::NavRow;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme;

/// Events emitted by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEvent {
    Toggle(SectionId),
    Select(String),
}

/// Persistent cursor state for the sidebar.
#[derive(Default)]
pub struct SidebarState {
    rows: Vec<NavRow>,
    cursor: usize,
    list_state: ListState,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows with a fresh `nav_rows` snapshot.
    ///
    /// The cursor stays on the same section or topic when it is still
    /// visible. On the first sync it starts on the selected topic.
    pub fn sync(&mut self, rows: Vec<NavRow>) {
        let target = if self.rows.is_empty() {
            rows.iter()
                .position(|r| matches!(r, NavRow::Topic { selected: true, .. }))
        } else {
            self.rows.get(self.cursor).and_then(|current| {
                rows.iter()
                    .position(|r| same_row(r, current))
                    .or_else(|| rows.iter().position(|r| is_header_of(r, current.section())))
            })
        };
        self.rows = rows;
        self.cursor = target
            .unwrap_or(self.cursor)
            .min(self.rows.len().saturating_sub(1));
        self.list_state.select((!self.rows.is_empty()).then_some(self.cursor));
    }

    pub fn rows(&self) -> &[NavRow] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `index`, clamped to the rows.
    pub fn set_cursor(&mut self, index: usize) {
        if self.rows.is_empty() {
            return;
        }
        self.cursor = index.min(self.rows.len() - 1);
        self.list_state.select(Some(self.cursor));
    }

    /// First row the list currently shows, for mouse hit testing.
    pub fn scroll_offset(&self) -> usize {
        self.list_state.offset()
    }

    /// The event a click or Enter on `index` would produce.
    pub fn activate(&self, index: usize) -> Option<SidebarEvent> {
        match self.rows.get(index)? {
            NavRow::Section { section, .. } => Some(SidebarEvent::Toggle(*section)),
            NavRow::Topic { id, .. } => Some(SidebarEvent::Select(id.clone())),
        }
    }
}

fn same_row(a: &NavRow, b: &NavRow) -> bool {
    match (a, b) {
        (NavRow::Section { section: x, .. }, NavRow::Section { section: y, .. }) => x == y,
        (NavRow::Topic { id: x, .. }, NavRow::Topic { id: y, .. }) => x == y,
        _ => false,
    }
}

fn is_header_of(row: &NavRow, section: SectionId) -> bool {
    matches!(row, NavRow::Section { section: s, .. } if *s == section)
}

impl EventHandler for SidebarState {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        if self.rows.is_empty() {
            return None;
        }
        match event {
            TuiEvent::CursorUp => {
                self.set_cursor(self.cursor.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.set_cursor(self.cursor + 1);
                None
            }
            TuiEvent::CursorHome => {
                self.set_cursor(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.set_cursor(self.rows.len() - 1);
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => self.activate(self.cursor),
            TuiEvent::CursorLeft => match &self.rows[self.cursor] {
                NavRow::Section {
                    section,
                    expanded: true,
                    ..
                } => Some(SidebarEvent::Toggle(*section)),
                NavRow::Section { .. } => None,
                NavRow::Topic { section, .. } => {
                    let section = *section;
                    if let Some(header) = self.rows.iter().position(|r| is_header_of(r, section)) {
                        self.set_cursor(header);
                    }
                    None
                }
            },
            TuiEvent::CursorRight => match &self.rows[self.cursor] {
                NavRow::Section {
                    section,
                    expanded: false,
                    ..
                } => Some(SidebarEvent::Toggle(*section)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    focused: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a mut SidebarState, focused: bool) -> Self {
        Self { state, focused }
    }
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            theme::FOCUS_BORDER
        } else {
            theme::IDLE_BORDER
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Topics ");

        let width = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .state
            .rows
            .iter()
            .map(|row| ListItem::new(row_line(row, width)))
            .collect();

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

fn row_line(row: &NavRow, width: usize) -> Line<'static> {
    match row {
        NavRow::Section {
            section,
            expanded,
            topic_count,
        } => {
            let desc = section.descriptor();
            let color = theme::accent_color(desc.accent);
            let arrow = if *expanded { "▾" } else { "▸" };
            let prefix = format!("{arrow} {} ", theme::icon_glyph(desc.icon));
            let count = format!(" {topic_count}");
            let room = width.saturating_sub(prefix.chars().count() + count.len());
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(color)),
                Span::styled(
                    truncate_str(desc.title, room),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(count, Style::default().fg(Color::DarkGray)),
            ])
        }
        NavRow::Topic {
            section,
            title,
            selected,
            ..
        } => {
            let (marker, style) = if *selected {
                (
                    "  ● ",
                    Style::default()
                        .fg(theme::section_color(*section))
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("    ", Style::default().fg(Color::Gray))
            };
            Line::from(vec![
                Span::styled(marker, style),
                Span::styled(truncate_str(title, width.saturating_sub(4)), style),
            ])
        }
    }
}

/// Truncate to `max_width` display columns, ending in "…" when cut.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::NavState;
    use crate::core::tree::nav_rows;
    use crate::test_support::sample_store;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn synced(selected: &str, expanded: &[SectionId]) -> SidebarState {
        let store = sample_store();
        let nav = NavState::new(selected.to_string(), expanded.iter().copied());
        let mut state = SidebarState::new();
        state.sync(nav_rows(&store, &nav));
        state
    }

    #[test]
    fn test_first_sync_lands_on_selected_topic() {
        let state = synced("security", &[SectionId::Admin]);
        // Admin header, flows, security
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_enter_on_header_toggles() {
        let mut state = synced("flows", &[]);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SidebarEvent::Toggle(SectionId::Admin))
        );
    }

    #[test]
    fn test_enter_on_topic_selects() {
        let mut state = synced("flows", &[SectionId::Admin]);
        state.set_cursor(2);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar(' ')),
            Some(SidebarEvent::Select("security".to_string()))
        );
    }

    #[test]
    fn test_left_on_topic_jumps_to_header_then_collapses() {
        let mut state = synced("security", &[SectionId::Admin]);
        assert_eq!(state.handle_event(&TuiEvent::CursorLeft), None);
        assert_eq!(state.cursor(), 0);
        assert_eq!(
            state.handle_event(&TuiEvent::CursorLeft),
            Some(SidebarEvent::Toggle(SectionId::Admin))
        );
    }

    #[test]
    fn test_right_only_expands_collapsed_headers() {
        let mut state = synced("flows", &[SectionId::Admin]);
        assert_eq!(state.handle_event(&TuiEvent::CursorRight), None);
        state.set_cursor(3); // Development header
        assert_eq!(
            state.handle_event(&TuiEvent::CursorRight),
            Some(SidebarEvent::Toggle(SectionId::Development))
        );
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut state = synced("flows", &[]);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.cursor(), 0);
        for _ in 0..20 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.cursor(), SectionId::ALL.len() - 1);
    }

    #[test]
    fn test_cursor_follows_row_across_resync() {
        let store = sample_store();
        let mut state = synced("flows", &[]);
        state.set_cursor(1); // Development header
        let nav = NavState::new("flows".to_string(), [SectionId::Admin]);
        state.sync(nav_rows(&store, &nav));
        // Admin now shows two topics above Development
        assert_eq!(state.cursor(), 3);
        assert!(matches!(
            state.rows()[3],
            NavRow::Section {
                section: SectionId::Development,
                ..
            }
        ));
    }

    #[test]
    fn test_render_shows_titles_and_selection_marker() {
        let mut state = synced("flows", &[SectionId::Admin]);
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Sidebar::new(&mut state, true).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Topics"));
        assert!(text.contains("Salesforce Administration"));
        assert!(text.contains("● Record-Triggered Flows"));
        assert!(text.contains("Integration Patterns"));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("Lightning Web Components", 10), "Lightning…");
        assert_eq!(truncate_str("abc", 0), "");
    }
}
