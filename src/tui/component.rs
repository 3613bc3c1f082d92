use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// A piece of the screen that draws itself into a `Rect`.
///
/// Props arrive as struct fields; persistent presentation state (cursor,
/// scroll offset) is borrowed as `&mut` so `render` can update it, the
/// same way ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns raw input into its own higher-level events.
pub trait EventHandler {
    /// What the component reports back to the shell.
    type Event;

    /// Consume `event`, returning something only when the shell must act.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
