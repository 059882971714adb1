//! Modal notice dialog.
//!
//! While visible it swallows every input event, so whatever sits behind it
//! cannot be interacted with until the user dismisses it with Enter, Esc,
//! or a click.

use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::keybindings::{Action, KeyBindings};
use crate::theme;
use crate::ui::UiFrame;

use super::{Component, ComponentContext};

#[derive(Debug, Clone)]
pub struct DialogOverlay {
    title: String,
    body: String,
    visible: bool,
    width: u16,
    height: u16,
    bindings: KeyBindings,
}

impl DialogOverlay {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            visible: false,
            width: 46,
            height: 8,
            bindings: KeyBindings::default(),
        }
    }

    /// Show the dialog with the given title and body, replacing whatever it
    /// displayed before.
    pub fn open(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.title = title.into();
        self.body = body.into();
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Clamp dialog size to the available area to avoid drawing outside the
    /// buffer when the terminal is smaller than the preferred minimums.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let mut width = area.width.min(self.width).max(1);
        let mut height = area.height.min(self.height).max(1);
        if area.width >= 24 {
            width = width.max(24);
        }
        if area.height >= 5 {
            height = height.max(5);
        }
        let x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
        let y = area
            .y
            .saturating_add(area.height.saturating_sub(height) / 2);
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for DialogOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DialogOverlay {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if !self.visible || area.width == 0 || area.height == 0 {
            return;
        }
        // dim the backdrop so the modal reads as modal
        let buffer = frame.buffer_mut();
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_style(dim_style);
                }
            }
        }
        let rect = self.rect_for(area);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL);
        let text = format!("{}\n\nPress Enter to dismiss", self.body);
        let paragraph = Paragraph::new(text)
            .style(
                Style::default()
                    .bg(theme::dialog_bg())
                    .fg(theme::dialog_fg()),
            )
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, rect);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        if !self.visible {
            return false;
        }
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if self.bindings.matches(Action::DismissNotice, key) {
                    self.visible = false;
                }
            }
            Event::Mouse(mouse) => {
                if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                    self.visible = false;
                }
            }
            _ => {}
        }
        // modal: consume everything while visible
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn rect_for_clamps_sizes() {
        let dlg = DialogOverlay::new();
        // tiny area smaller than min width/height
        let area = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 2,
        };
        let r = dlg.rect_for(area);
        assert!(r.width >= 1);
        assert!(r.height >= 1);

        // larger area should enforce minimum preferred
        let area2 = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 10,
        };
        let r2 = dlg.rect_for(area2);
        assert!(r2.width >= 24);
        assert!(r2.height >= 5);
    }

    #[test]
    fn consumes_events_and_dismisses_on_enter() {
        let mut dlg = DialogOverlay::new();
        dlg.open("Error", "something broke");
        let ctx = ComponentContext::default();
        // an unrelated key is swallowed but does not dismiss
        let other = Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        assert!(dlg.handle_event(&other, &ctx));
        assert!(dlg.visible());
        let enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(dlg.handle_event(&enter, &ctx));
        assert!(!dlg.visible());
        // hidden dialog no longer consumes
        assert!(!dlg.handle_event(&enter, &ctx));
    }

    #[test]
    fn open_replaces_previous_body() {
        let mut dlg = DialogOverlay::new();
        dlg.open("Error", "first");
        dlg.open("Error", "second");
        assert_eq!(dlg.body(), "second");
    }
}
