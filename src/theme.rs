use ratatui::style::Color;

// Centralized theme colors, kept as small helpers so callers never hardcode
// `Color` variants at the draw site.

// Desktop surface
pub fn desktop_bg() -> Color {
    Color::Black
}
pub fn icon_fg() -> Color {
    Color::White
}

// Taskbar
pub fn taskbar_bg() -> Color {
    Color::DarkGray
}
pub fn taskbar_fg() -> Color {
    Color::White
}
pub fn taskbar_active_bg() -> Color {
    Color::Gray
}
pub fn taskbar_active_fg() -> Color {
    Color::Black
}

// Start menu
pub fn menu_bg() -> Color {
    Color::DarkGray
}
pub fn menu_fg() -> Color {
    Color::White
}

// Window chrome
pub fn header_bg() -> Color {
    Color::Blue
}
pub fn header_fg() -> Color {
    Color::White
}
pub fn header_inactive_bg() -> Color {
    Color::DarkGray
}
pub fn header_inactive_fg() -> Color {
    Color::Gray
}
pub fn window_border() -> Color {
    Color::DarkGray
}
pub fn window_bg() -> Color {
    Color::Black
}

// Dialog / notice
pub fn dialog_bg() -> Color {
    Color::Black
}
pub fn dialog_fg() -> Color {
    Color::White
}

// Actions inside app bodies
pub fn action_fg() -> Color {
    Color::Cyan
}
pub fn danger_fg() -> Color {
    Color::Red
}
pub fn muted_fg() -> Color {
    Color::DarkGray
}
