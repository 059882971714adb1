//! Notepad window body backed by a plain text file.
//!
//! The buffer is loaded once when the app is constructed and the whole
//! file is rewritten after every edit, so the on-disk copy never lags the
//! window by more than a keystroke.

use std::fs;
use std::path::{Path, PathBuf};

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Paragraph, Wrap};
use thiserror::Error;

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("notepad storage: {0}")]
    Io(#[from] std::io::Error),
}

/// File-backed storage for the notepad buffer.
#[derive(Debug, Clone)]
pub struct NotepadStore {
    path: PathBuf,
}

impl NotepadStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("notepad.txt"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file reads as an empty buffer.
    pub fn load(&self) -> Result<String, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, text: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, text)?;
        Ok(())
    }
}

pub struct NotepadApp {
    store: NotepadStore,
    buffer: String,
    notices: Vec<String>,
}

impl NotepadApp {
    pub fn new(store: NotepadStore) -> Self {
        let (buffer, notices) = match store.load() {
            Ok(text) => (text, Vec::new()),
            Err(err) => {
                tracing::warn!(error = %err, "could not read notepad file");
                (
                    String::new(),
                    vec!["Could not read the notepad file.".to_string()],
                )
            }
        };
        Self {
            store,
            buffer,
            notices,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.buffer) {
            tracing::warn!(error = %err, "could not save notepad file");
            self.notices
                .push("Could not save the notepad file.".to_string());
        }
    }
}

impl Component for NotepadApp {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        // trailing block shows where the next character lands
        let mut shown = self.buffer.clone();
        if ctx.focused() {
            shown.push('█');
        }
        let paragraph = Paragraph::new(shown)
            .style(Style::default())
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if !ctx.focused() || key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.push(ch);
            }
            KeyCode::Enter => self.buffer.push('\n'),
            KeyCode::Tab => self.buffer.push_str("    "),
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            _ => return false,
        }
        self.persist();
        true
    }
}
