//! # TitleBar Component
//!
//! Top line of the screen: application title, the current view mode, and
//! key hints for whichever pane has focus.
//!
//! ## Stateless Component
//!
//! TitleBar is purely presentational. It receives everything as props:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(ViewMode::Browsing, Focus::Sidebar, false);
//! title_bar.render(frame, area);
//! ```
//!
//! On narrow terminals the sidebar hint (`^B topics`) is added, since the
//! sidebar is hidden until toggled there.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::ViewMode;
use crate::tui::Focus;
use crate::tui::component::Component;

pub const APP_TITLE: &str = "Salesforce Master Hub";

pub struct TitleBar {
    pub mode: ViewMode,
    pub focus: Focus,
    /// Whether the sidebar is collapsed behind Ctrl+B.
    pub narrow: bool,
}

impl TitleBar {
    pub fn new(mode: ViewMode, focus: Focus, narrow: bool) -> Self {
        Self {
            mode,
            focus,
            narrow,
        }
    }

    fn hints(&self) -> String {
        let pane = match self.focus {
            Focus::Search => "type to filter  Esc clear  Enter results",
            Focus::Sidebar => "↑↓ move  Enter open  / search",
            Focus::Main => match self.mode {
                ViewMode::Browsing => "↑↓ PgUp PgDn scroll  / search",
                ViewMode::Searching => "↑↓ move  Enter read  / search",
            },
        };
        let sidebar = if self.narrow { "  ^B topics" } else { "" };
        let quit = if self.focus == Focus::Search {
            "  ^C quit"
        } else {
            "  q quit"
        };
        format!("{pane}  Tab focus{sidebar}{quit}")
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mode = match self.mode {
            ViewMode::Browsing => " Browsing ",
            ViewMode::Searching => " Searching ",
        };
        let left = Line::from(vec![
            Span::styled(
                APP_TITLE,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(mode, Style::default().fg(Color::Black).bg(Color::Cyan)),
        ]);
        let right = Line::from(Span::styled(self.hints(), Style::default().fg(Color::DarkGray)))
            .right_aligned();

        frame.render_widget(Paragraph::new(left), area);
        let left_width = left_width(mode) as u16;
        if area.width > left_width + 1 {
            let hints_area = Rect {
                x: area.x + left_width + 1,
                width: area.width - left_width - 1,
                ..area
            };
            frame.render_widget(Paragraph::new(right), hints_area);
        }
    }
}

fn left_width(mode: &str) -> usize {
    APP_TITLE.chars().count() + 1 + mode.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(bar: &mut TitleBar, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_and_mode_are_shown() {
        let mut bar = TitleBar::new(ViewMode::Searching, Focus::Search, false);
        let text = draw(&mut bar, 120);
        assert!(text.contains("Salesforce Master Hub"));
        assert!(text.contains("Searching"));
        assert!(text.contains("Esc clear"));
    }

    #[test]
    fn test_quit_hint_depends_on_focus() {
        let bar = TitleBar::new(ViewMode::Browsing, Focus::Search, false);
        assert!(bar.hints().ends_with("^C quit"));
        let bar = TitleBar::new(ViewMode::Browsing, Focus::Sidebar, false);
        assert!(bar.hints().ends_with("q quit"));
    }

    #[test]
    fn test_sidebar_hint_only_when_narrow() {
        let wide = TitleBar::new(ViewMode::Browsing, Focus::Main, false);
        let narrow = TitleBar::new(ViewMode::Browsing, Focus::Main, true);
        assert!(!wide.hints().contains("^B"));
        assert!(narrow.hints().contains("^B topics"));
    }

    #[test]
    fn test_tiny_width_does_not_panic() {
        let mut bar = TitleBar::new(ViewMode::Browsing, Focus::Main, true);
        let text = draw(&mut bar, 10);
        assert!(text.starts_with("Salesforce"));
    }
}
