//! The fixed set of desktop applications.

pub mod notepad;
pub mod tictactoe;
pub mod todo;

pub use notepad::{NotepadApp, NotepadStore};
pub use tictactoe::TicTacToeApp;
pub use todo::TodoApp;

use crate::window::Geometry;

/// Closed set of launchable apps. Window state, taskbar buttons, and menu
/// entries are all keyed by this, so adding an app means extending every
/// exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppId {
    Todo,
    Notepad,
    TicTacToe,
}

impl AppId {
    pub const ALL: [AppId; 3] = [AppId::Todo, AppId::Notepad, AppId::TicTacToe];

    pub fn title(self) -> &'static str {
        match self {
            AppId::Todo => "Todo",
            AppId::Notepad => "Notepad",
            AppId::TicTacToe => "Tic-Tac-Toe",
        }
    }

    /// Size a freshly opened window gets, centered until first dragged.
    pub fn default_geometry(self) -> Geometry {
        match self {
            AppId::Todo => Geometry::centered(48, 16),
            AppId::Notepad => Geometry::centered(44, 14),
            AppId::TicTacToe => Geometry::centered(27, 15),
        }
    }
}
