//! # TopicPage Component
//!
//! Main pane while browsing: the selected topic's `TopicView` blocks drawn
//! as one tall wrapped paragraph inside a `ScrollView`.
//!
//! The scroll position resets whenever a different topic is shown.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::section::section_label;
use crate::core::topic::Topic;
use crate::core::view::{Block, BulletKind, EXAMPLES_HEADING, ExampleView, TopicView};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown::{self, Palette};
use crate::tui::theme;

const BODY_TEXT: Color = Color::Gray;

/// Scroll state for the article pane. Persisted in `TuiState`.
#[derive(Default)]
pub struct TopicPageState {
    pub scroll_state: ScrollViewState,
    topic_id: String,
    content_height: u16,
    viewport_height: u16,
}

impl TopicPageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point at `topic_id`, jumping back to the top when it changed.
    pub fn sync(&mut self, topic_id: &str) {
        if self.topic_id != topic_id {
            self.topic_id = topic_id.to_string();
            self.scroll_state.scroll_to_top();
        }
    }

    pub fn offset(&self) -> u16 {
        self.scroll_state.offset().y
    }

    /// Keep the offset inside the content so scrolling past the end does
    /// not leave a blank page.
    fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for TopicPageState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown | TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown | TuiEvent::InputChar(' ') => self.scroll_state.scroll_page_down(),
            TuiEvent::CursorHome => self.scroll_state.scroll_to_top(),
            TuiEvent::CursorEnd => self.scroll_state.scroll_to_bottom(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

/// Transient render wrapper for the article pane.
pub struct TopicPage<'a> {
    topic: &'a Topic,
    state: &'a mut TopicPageState,
}

impl<'a> TopicPage<'a> {
    pub fn new(topic: &'a Topic, state: &'a mut TopicPageState) -> Self {
        Self { topic, state }
    }
}

impl Component for TopicPage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar column
        let accent = theme::section_key_color(&self.topic.section);
        let text = topic_text(self.topic, accent);

        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
        let height = rows_to_height(paragraph.line_count(content_width));

        self.state.content_height = height;
        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Wrapped line count as a scroll height, saturating at `u16::MAX`.
fn rows_to_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// The whole article as styled text, block by block.
pub fn topic_text(topic: &Topic, accent: Color) -> Text<'static> {
    let view = TopicView::from_topic(topic);
    let mut lines: Vec<Line<'static>> = Vec::new();

    for block in &view.blocks {
        match block {
            Block::Title(title) => {
                lines.push(Line::from(Span::styled(
                    title.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    section_label(&topic.section),
                    Style::default().fg(accent),
                )));
                lines.push(Line::default());
            }
            Block::Body(body) => {
                let palette = Palette {
                    text: BODY_TEXT,
                    heading: accent,
                };
                lines.extend(markdown::render(body, palette).lines);
            }
            Block::Bullets(kind, items) => push_bullets(&mut lines, *kind, items),
            Block::Examples(examples) => push_examples(&mut lines, examples),
        }
    }
    Text::from(lines)
}

fn section_heading(title: &str, color: Color) -> [Line<'static>; 2] {
    [
        Line::default(),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ]
}

fn push_bullets(lines: &mut Vec<Line<'static>>, kind: BulletKind, items: &[String]) {
    let color = theme::bullet_color(kind);
    lines.extend(section_heading(kind.heading(), color));
    for item in items {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(color)),
            Span::styled(item.clone(), Style::default().fg(BODY_TEXT)),
        ]));
    }
}

fn push_examples(lines: &mut Vec<Line<'static>>, examples: &[ExampleView<'_>]) {
    lines.extend(section_heading(EXAMPLES_HEADING, Color::Green));
    for example in examples {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(Color::Green)),
            Span::styled(
                example.title.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            example.description.to_string(),
            Style::default().fg(BODY_TEXT),
        )));
        if let Some(sample) = &example.code {
            lines.extend(markdown::render_code(sample.code, sample.label, sample.language));
        }
        lines.push(Line::from(Span::styled(
            example.explanation.to_string(),
            Style::default()
                .fg(BODY_TEXT)
                .add_modifier(Modifier::ITALIC),
        )));
    }
}
