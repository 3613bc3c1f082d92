//! # SearchBox Component
//!
//! Single-line query editor. Every edit is reported so the shell can run
//! the search live; there is no submit step.
//!
//! The buffer mirrors `NavState::search_query`. When the core clears the
//! query (picking a result), `sync` pulls the change back in.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme;

const PLACEHOLDER: &str = "Search topics, code, examples...";

/// Events emitted by the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The query text changed.
    Changed(String),
    /// Esc: the query was cleared and focus should leave the box.
    Cleared,
    /// Enter or Down: move focus to the results.
    Done,
}

#[derive(Debug, Default)]
pub struct SearchBox {
    pub buffer: String,
    /// Cursor as a byte offset into `buffer`, always on a char boundary.
    pos: usize,
    /// Prop: whether the box has keyboard focus.
    pub focused: bool,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt `query` if the core changed it behind our back.
    pub fn sync(&mut self, query: &str) {
        if self.buffer != query {
            self.buffer = query.to_string();
            self.pos = self.buffer.len();
        }
    }

    fn insert(&mut self, text: &str) -> Option<SearchEvent> {
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.pos, text);
        self.pos += text.len();
        Some(SearchEvent::Changed(self.buffer.clone()))
    }

    /// Display columns between the start of the visible window and the
    /// cursor, plus the window start itself as a byte offset.
    fn window(&self, width: usize) -> (usize, usize) {
        let before = &self.buffer[..self.pos];
        if width == 0 || before.width() < width {
            return (0, before.width());
        }
        // Drop leading chars until the cursor fits with one spare column.
        let mut start = 0;
        for (i, _) in before.char_indices() {
            if before[i..].width() < width {
                start = i;
                break;
            }
        }
        (start, before[start..].width())
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => {
                let line: String = text.chars().filter(|c| !c.is_control()).collect();
                self.insert(&line)
            }
            TuiEvent::Backspace => {
                if self.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(prev..self.pos);
                self.pos = prev;
                Some(SearchEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::Delete => {
                if self.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(self.pos..next);
                Some(SearchEvent::Changed(self.buffer.clone()))
            }
            TuiEvent::CursorLeft => {
                self.pos = prev_char_boundary(&self.buffer, self.pos);
                None
            }
            TuiEvent::CursorRight => {
                if self.pos < self.buffer.len() {
                    self.pos = next_char_boundary(&self.buffer, self.pos);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.pos = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.pos = self.buffer.len();
                None
            }
            TuiEvent::Escape => {
                self.buffer.clear();
                self.pos = 0;
                Some(SearchEvent::Cleared)
            }
            TuiEvent::Submit | TuiEvent::CursorDown => Some(SearchEvent::Done),
            _ => None,
        }
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            theme::FOCUS_BORDER
        } else {
            theme::IDLE_BORDER
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(" Search ");

        let inner_width = area.width.saturating_sub(2) as usize;
        let (start, cursor_col) = self.window(inner_width);

        let line = if self.buffer.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(Span::styled(
                &self.buffer[start..],
                Style::default().fg(Color::White),
            ))
        };
        frame.render_widget(Paragraph::new(line).block(block), area);

        if self.focused && area.width > 2 && area.height > 2 {
            let col = u16::try_from(cursor_col).unwrap_or(u16::MAX);
            let x = area.x + 1 + col.min(area.width - 3);
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}
