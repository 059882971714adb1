use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod dialog_overlay;
pub mod text_input;

pub use dialog_overlay::DialogOverlay;
pub use text_input::TextInput;

/// Per-dispatch info handed to components. Today that is only whether the
/// component's window holds keyboard focus.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentContext {
    focused: bool,
}

impl ComponentContext {
    pub fn new(focused: bool) -> Self {
        Self { focused }
    }

    pub fn focused(&self) -> bool {
        self.focused
    }
}

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}
