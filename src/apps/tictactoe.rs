//! Tic-tac-toe window body: a 3x3 board with alternating placement and a
//! reset action. No rules engine; win detection is up to the players.

use std::fmt;

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string};

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

pub struct TicTacToeApp {
    cells: [Option<Mark>; 9],
    next: Mark,
    cell_hits: Vec<(usize, Rect)>,
}

impl TicTacToeApp {
    pub fn new() -> Self {
        Self {
            cells: [None; 9],
            next: Mark::X,
            cell_hits: Vec::new(),
        }
    }

    pub fn cell(&self, idx: usize) -> Option<Mark> {
        self.cells.get(idx).copied().flatten()
    }

    pub fn next_mark(&self) -> Mark {
        self.next
    }

    /// Place the next mark at `idx`. Occupied cells are left alone and do
    /// not consume the turn.
    pub fn place(&mut self, idx: usize) {
        if let Some(slot) = self.cells.get_mut(idx)
            && slot.is_none()
        {
            *slot = Some(self.next);
            self.next = self.next.other();
        }
    }

    pub fn reset(&mut self) {
        self.cells = [None; 9];
        self.next = Mark::X;
    }
}

impl Default for TicTacToeApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TicTacToeApp {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        self.cell_hits.clear();
        let bounds = frame.area();
        let board_width = CELL_WIDTH * 3 + 2;
        let board_height = CELL_HEIGHT * 3 + 2;
        let left = area.x + area.width.saturating_sub(board_width) / 2;
        let top = area.y + area.height.saturating_sub(board_height) / 2;

        for row in 0..3u16 {
            for col in 0..3u16 {
                let rect = Rect {
                    x: left + col * (CELL_WIDTH + 1),
                    y: top + row * (CELL_HEIGHT + 1),
                    width: CELL_WIDTH,
                    height: CELL_HEIGHT,
                };
                let idx = (row * 3 + col) as usize;
                let mark = self.cells[idx]
                    .map(|mark| mark.to_string())
                    .unwrap_or_else(|| "·".to_string());
                let style = match self.cells[idx] {
                    Some(Mark::X) => Style::default()
                        .fg(theme::action_fg())
                        .add_modifier(Modifier::BOLD),
                    Some(Mark::O) => Style::default()
                        .fg(theme::danger_fg())
                        .add_modifier(Modifier::BOLD),
                    None => Style::default().fg(theme::muted_fg()),
                };
                safe_set_string(
                    frame.buffer_mut(),
                    bounds,
                    rect.x + CELL_WIDTH / 2,
                    rect.y + CELL_HEIGHT / 2,
                    &mark,
                    style,
                );
                self.cell_hits.push((idx, rect));
            }
            // separator rows between cells
            if row < 2 {
                let y = top + (row + 1) * (CELL_HEIGHT + 1) - 1;
                safe_set_string(
                    frame.buffer_mut(),
                    bounds,
                    left,
                    y,
                    &"─".repeat(board_width as usize),
                    Style::default().fg(theme::window_border()),
                );
            }
        }
        for col in 0..2u16 {
            let x = left + (col + 1) * (CELL_WIDTH + 1) - 1;
            for y in top..top + board_height {
                if rect_contains(bounds, x, y)
                    && let Some(cell) = frame.buffer_mut().cell_mut((x, y))
                {
                    let symbol = if cell.symbol() == "─" { "┼" } else { "│" };
                    cell.set_symbol(symbol);
                }
            }
        }

        let status = format!("{} to move   (r resets)", self.next);
        safe_set_string(
            frame.buffer_mut(),
            bounds,
            area.x + area.width.saturating_sub(status.len() as u16) / 2,
            top + board_height,
            &status,
            Style::default().fg(theme::muted_fg()),
        );
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key)
                if ctx.focused()
                    && key.kind != KeyEventKind::Release
                    && key.code == KeyCode::Char('r') =>
            {
                self.reset();
                true
            }
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                for (idx, rect) in &self.cell_hits {
                    if rect_contains(*rect, mouse.column, mouse.row) {
                        self.place(*idx);
                        return true;
                    }
                }
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_alternates_marks() {
        let mut game = TicTacToeApp::new();
        game.place(0);
        game.place(4);
        assert_eq!(game.cell(0), Some(Mark::X));
        assert_eq!(game.cell(4), Some(Mark::O));
        assert_eq!(game.next_mark(), Mark::X);
    }

    #[test]
    fn occupied_cell_does_not_consume_the_turn() {
        let mut game = TicTacToeApp::new();
        game.place(0);
        game.place(0);
        assert_eq!(game.cell(0), Some(Mark::X));
        assert_eq!(game.next_mark(), Mark::O);
    }

    #[test]
    fn reset_clears_board_and_turn() {
        let mut game = TicTacToeApp::new();
        game.place(1);
        game.place(2);
        game.reset();
        assert_eq!(game.next_mark(), Mark::X);
        assert!((0..9).all(|idx| game.cell(idx).is_none()));
    }

    #[test]
    fn out_of_range_placement_is_ignored() {
        let mut game = TicTacToeApp::new();
        game.place(99);
        assert_eq!(game.next_mark(), Mark::X);
    }
}
