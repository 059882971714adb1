//! Single-line text input with a movable cursor.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::{UiFrame, safe_set_string};

use super::ComponentContext;

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters, 0..=len.
    cursor: usize,
    placeholder: String,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    /// Apply one key press. Returns true when the key was handled.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let offset = self.byte_offset();
                self.value.insert(offset, ch);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let offset = self.byte_offset();
                    self.value.remove(offset);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let offset = self.byte_offset();
                    self.value.remove(offset);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                true
            }
            _ => false,
        }
    }

    /// Draw the input on a single row, showing the placeholder while empty
    /// and a block cursor while focused.
    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bounds = frame.area();
        let buffer = frame.buffer_mut();
        let style = Style::default().add_modifier(Modifier::UNDERLINED);
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buffer.cell_mut((x, area.y)) {
                cell.set_symbol(" ");
                cell.set_style(style);
            }
        }
        if self.value.is_empty() {
            safe_set_string(
                buffer,
                bounds,
                area.x,
                area.y,
                &self.placeholder,
                style.fg(theme::muted_fg()),
            );
        } else {
            // keep the tail visible when the value is wider than the field
            let width = area.width as usize;
            let chars: Vec<char> = self.value.chars().collect();
            let skip = chars.len().saturating_sub(width.saturating_sub(1));
            let shown: String = chars[skip..].iter().collect();
            safe_set_string(buffer, bounds, area.x, area.y, &shown, style);
        }
        if ctx.focused() {
            let shown_cursor = self
                .cursor
                .min(area.width.saturating_sub(1) as usize) as u16;
            let x = area.x.saturating_add(shown_cursor);
            if let Some(cell) = buffer.cell_mut((x, area.y)) {
                cell.set_style(style.add_modifier(Modifier::REVERSED));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut TextInput, code: KeyCode) {
        input.handle_key(&KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(input: &mut TextInput, text: &str) {
        for ch in text.chars() {
            press(input, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut input = TextInput::new("");
        type_str(&mut input, "hello");
        assert_eq!(input.value(), "hello");
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Char('X'));
        assert_eq!(input.value(), "helXlo");
    }

    #[test]
    fn backspace_and_delete_edit_around_cursor() {
        let mut input = TextInput::new("");
        type_str(&mut input, "abcd");
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "abd");
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.value(), "ab");
        // deleting at the end is a no-op
        press(&mut input, KeyCode::End);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn clear_resets_value_and_cursor() {
        let mut input = TextInput::new("");
        type_str(&mut input, "task");
        input.clear();
        assert_eq!(input.value(), "");
        press(&mut input, KeyCode::Char('a'));
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut input = TextInput::new("");
        type_str(&mut input, "héllo");
        press(&mut input, KeyCode::Backspace);
        press(&mut input, KeyCode::Backspace);
        press(&mut input, KeyCode::Backspace);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "h");
    }
}
