//! Window chrome: the header bar with its control cluster, plus the frame
//! border drawn around the body.
//!
//! The header doubles as the drag handle. Hit-testing classifies a
//! pointer-down on the chrome into a [`HeaderAction`] so the desktop can
//! tell a drag start apart from a control click.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string};

/// What a pointer-down on the header row means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Drag,
    Minimize,
    Maximize,
    Close,
}

/// Control cluster rendered flush right on the header row, one cell of
/// padding before the corner.
const CONTROLS: &str = "[_][^][x]";
const CONTROL_WIDTH: u16 = 9;

fn controls_start(rect: Rect) -> u16 {
    rect.x
        .saturating_add(rect.width)
        .saturating_sub(CONTROL_WIDTH + 1)
}

/// Classify a pointer-down at `(x, y)` against the chrome of `rect`.
/// Returns `None` for cells below the header row.
pub fn hit_test_header(rect: Rect, x: u16, y: u16) -> Option<HeaderAction> {
    if !rect_contains(rect, x, y) || y != rect.y {
        return None;
    }
    let start = controls_start(rect);
    if rect.width > CONTROL_WIDTH + 2 && x >= start && x < start + CONTROL_WIDTH {
        return Some(match (x - start) / 3 {
            0 => HeaderAction::Minimize,
            1 => HeaderAction::Maximize,
            _ => HeaderAction::Close,
        });
    }
    Some(HeaderAction::Drag)
}

/// Interior rectangle available to the app body, inside the header row and
/// the side/bottom border.
pub fn content_rect(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

/// Paint the header, borders, and body background for one window.
pub fn render(frame: &mut UiFrame<'_>, rect: Rect, title: &str, focused: bool) {
    let bounds = frame.area();
    let header_style = if focused {
        Style::default()
            .bg(theme::header_bg())
            .fg(theme::header_fg())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(theme::header_inactive_bg())
            .fg(theme::header_inactive_fg())
    };
    let border_style = Style::default()
        .fg(theme::window_border())
        .bg(theme::window_bg());
    let body_style = Style::default().bg(theme::window_bg());

    let outer_left = rect.x;
    let outer_right = rect.x.saturating_add(rect.width).saturating_sub(1);
    let outer_bottom = rect.y.saturating_add(rect.height).saturating_sub(1);

    // Header row: filled bar, title on the left, controls on the right.
    let buffer = frame.buffer_mut();
    for x in outer_left..=outer_right {
        if rect_contains(bounds, x, rect.y)
            && let Some(cell) = buffer.cell_mut((x, rect.y))
        {
            cell.set_symbol(" ");
            cell.set_style(header_style);
        }
    }
    safe_set_string(buffer, bounds, outer_left + 1, rect.y, title, header_style);
    if rect.width > CONTROL_WIDTH + 2 {
        safe_set_string(
            buffer,
            bounds,
            controls_start(rect),
            rect.y,
            CONTROLS,
            header_style,
        );
    }

    // Body fill plus side and bottom borders.
    for y in rect.y.saturating_add(1)..=outer_bottom {
        for x in outer_left..=outer_right {
            if !rect_contains(bounds, x, y) {
                continue;
            }
            let Some(cell) = buffer.cell_mut((x, y)) else {
                continue;
            };
            if y == outer_bottom {
                if x == outer_left {
                    cell.set_symbol("└");
                } else if x == outer_right {
                    cell.set_symbol("┘");
                } else {
                    cell.set_symbol("─");
                }
                cell.set_style(border_style);
            } else if x == outer_left || x == outer_right {
                cell.set_symbol("│");
                cell.set_style(border_style);
            } else {
                cell.set_symbol(" ");
                cell.set_style(body_style);
            }
        }
    }
}
