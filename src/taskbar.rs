//! Bottom taskbar: start button, one button per open window, and a clock.
//!
//! Hit regions are recorded at render time, so hit-testing always agrees
//! with what was last painted. Callers must invoke `begin_frame` before
//! rendering each frame so stale rects from the previous layout are
//! dropped first.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::apps::AppId;
use crate::constants::TASKBAR_HEIGHT;
use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string};
use crate::window::WindowRegistry;

const START_LABEL: &str = "[ Start ]";
const HELP_LABEL: &str = "Help";

/// One selectable row of the start menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    App(AppId),
    Help,
}

#[derive(Debug, Default)]
pub struct Taskbar {
    area: Rect,
    start_rect: Option<Rect>,
    button_hits: Vec<(AppId, Rect)>,
    menu_open: bool,
    menu_bounds: Option<Rect>,
    menu_hits: Vec<(MenuItem, Rect)>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-frame hit state. Call before rendering.
    pub fn begin_frame(&mut self) {
        self.start_rect = None;
        self.button_hits.clear();
        self.menu_bounds = None;
        self.menu_hits.clear();
    }

    /// Reserve the taskbar band at the bottom of `area` and return the
    /// remaining desktop area above it.
    pub fn split_area(&mut self, area: Rect) -> Rect {
        let bar_height = TASKBAR_HEIGHT.min(area.height);
        self.area = Rect {
            x: area.x,
            y: area.y + area.height - bar_height,
            width: area.width,
            height: bar_height,
        };
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height - bar_height,
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Paint the bar and record hit regions for this frame.
    pub fn render(&mut self, frame: &mut UiFrame<'_>, registry: &WindowRegistry<AppId>) {
        let bar = self.area;
        if bar.width == 0 || bar.height == 0 {
            return;
        }
        let bounds = frame.area();
        let buffer = frame.buffer_mut();
        let bar_style = Style::default()
            .bg(theme::taskbar_bg())
            .fg(theme::taskbar_fg());
        for x in bar.x..bar.x.saturating_add(bar.width) {
            if let Some(cell) = buffer.cell_mut((x, bar.y)) {
                cell.set_symbol(" ");
                cell.set_style(bar_style);
            }
        }

        // start button, highlighted while the menu is up
        let start_style = if self.menu_open {
            Style::default()
                .bg(theme::taskbar_active_bg())
                .fg(theme::taskbar_active_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            bar_style.add_modifier(Modifier::BOLD)
        };
        safe_set_string(buffer, bounds, bar.x, bar.y, START_LABEL, start_style);
        self.start_rect = Some(Rect {
            x: bar.x,
            y: bar.y,
            width: START_LABEL.len() as u16,
            height: 1,
        });

        // one button per open window
        let mut x = bar.x + START_LABEL.len() as u16 + 1;
        for id in AppId::ALL {
            if !registry.button_visible(id) {
                continue;
            }
            let label = format!(" {} ", id.title());
            let width = label.chars().count() as u16;
            let style = if registry.button_highlighted(id) {
                Style::default()
                    .bg(theme::taskbar_active_bg())
                    .fg(theme::taskbar_active_fg())
            } else {
                bar_style
            };
            safe_set_string(buffer, bounds, x, bar.y, &label, style);
            self.button_hits.push((
                id,
                Rect {
                    x,
                    y: bar.y,
                    width,
                    height: 1,
                },
            ));
            x = x.saturating_add(width + 1);
        }

        // clock flush right
        let clock = Local::now().format("%I:%M %p").to_string();
        let clock_x = bar
            .x
            .saturating_add(bar.width)
            .saturating_sub(clock.len() as u16 + 1);
        safe_set_string(buffer, bounds, clock_x, bar.y, &clock, bar_style);
    }

    /// Paint the start menu above the bar when open, recording item rects.
    pub fn render_menu(&mut self, frame: &mut UiFrame<'_>) {
        if !self.menu_open {
            return;
        }
        let items: Vec<(MenuItem, String)> = AppId::ALL
            .iter()
            .map(|id| (MenuItem::App(*id), format!(" {} ", id.title())))
            .chain(std::iter::once((
                MenuItem::Help,
                format!(" {} ", HELP_LABEL),
            )))
            .collect();
        let width = items
            .iter()
            .map(|(_, label)| label.chars().count() as u16)
            .max()
            .unwrap_or(0)
            .max(12);
        let height = items.len() as u16;
        let menu = Rect {
            x: self.area.x,
            y: self.area.y.saturating_sub(height),
            width,
            height,
        };
        self.menu_bounds = Some(menu);

        let bounds = frame.area();
        let buffer = frame.buffer_mut();
        let menu_style = Style::default().bg(theme::menu_bg()).fg(theme::menu_fg());
        for (idx, (item, label)) in items.iter().enumerate() {
            let y = menu.y + idx as u16;
            for x in menu.x..menu.x.saturating_add(menu.width) {
                if rect_contains(bounds, x, y)
                    && let Some(cell) = buffer.cell_mut((x, y))
                {
                    cell.set_symbol(" ");
                    cell.set_style(menu_style);
                }
            }
            safe_set_string(buffer, bounds, menu.x, y, label, menu_style);
            self.menu_hits.push((
                *item,
                Rect {
                    x: menu.x,
                    y,
                    width: menu.width,
                    height: 1,
                },
            ));
        }
    }

    /// Whether `(x, y)` lies on the bar itself.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        rect_contains(self.area, x, y)
    }

    pub fn menu_contains(&self, x: u16, y: u16) -> bool {
        self.menu_bounds
            .is_some_and(|menu| rect_contains(menu, x, y))
    }

    pub fn hit_test_start(&self, x: u16, y: u16) -> bool {
        self.start_rect
            .is_some_and(|rect| rect_contains(rect, x, y))
    }

    pub fn hit_test_button(&self, x: u16, y: u16) -> Option<AppId> {
        self.button_hits
            .iter()
            .find(|(_, rect)| rect_contains(*rect, x, y))
            .map(|(id, _)| *id)
    }

    pub fn hit_test_menu_item(&self, x: u16, y: u16) -> Option<MenuItem> {
        self.menu_hits
            .iter()
            .find(|(_, rect)| rect_contains(*rect, x, y))
            .map(|(item, _)| *item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Geometry;
    use ratatui::buffer::Buffer;

    fn viewport() -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        }
    }

    fn registry() -> WindowRegistry<AppId> {
        let mut reg = WindowRegistry::new();
        for id in AppId::ALL {
            reg.insert(id, Geometry::centered(10, 5));
        }
        reg
    }

    fn rendered(taskbar: &mut Taskbar, registry: &WindowRegistry<AppId>) -> Buffer {
        let area = viewport();
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        taskbar.begin_frame();
        taskbar.split_area(area);
        taskbar.render(&mut frame, registry);
        taskbar.render_menu(&mut frame);
        buffer
    }

    #[test]
    fn split_area_reserves_bottom_band() {
        let mut taskbar = Taskbar::new();
        let desktop = taskbar.split_area(viewport());
        assert_eq!(desktop.height, 24 - TASKBAR_HEIGHT);
        assert!(taskbar.contains(0, 23));
        assert!(!taskbar.contains(0, 22));
    }

    #[test]
    fn buttons_appear_only_for_open_windows() {
        let mut taskbar = Taskbar::new();
        let mut reg = registry();
        rendered(&mut taskbar, &reg);
        assert!(taskbar.button_hits.is_empty());

        reg.open(AppId::Notepad);
        rendered(&mut taskbar, &reg);
        assert_eq!(taskbar.button_hits.len(), 1);
        let (id, rect) = taskbar.button_hits[0];
        assert_eq!(id, AppId::Notepad);
        assert_eq!(taskbar.hit_test_button(rect.x, rect.y), Some(AppId::Notepad));
    }

    #[test]
    fn closed_window_button_disappears() {
        let mut taskbar = Taskbar::new();
        let mut reg = registry();
        reg.open(AppId::Todo);
        reg.close(AppId::Todo);
        rendered(&mut taskbar, &reg);
        assert!(taskbar.button_hits.is_empty());
    }

    #[test]
    fn start_button_hit_test_matches_render() {
        let mut taskbar = Taskbar::new();
        let reg = registry();
        rendered(&mut taskbar, &reg);
        assert!(taskbar.hit_test_start(0, 23));
        assert!(taskbar.hit_test_start(START_LABEL.len() as u16 - 1, 23));
        assert!(!taskbar.hit_test_start(START_LABEL.len() as u16, 23));
    }

    #[test]
    fn menu_lists_every_app_plus_help() {
        let mut taskbar = Taskbar::new();
        let reg = registry();
        taskbar.toggle_menu();
        rendered(&mut taskbar, &reg);
        assert_eq!(taskbar.menu_hits.len(), AppId::ALL.len() + 1);
        let (_, first) = taskbar.menu_hits[0];
        assert_eq!(
            taskbar.hit_test_menu_item(first.x, first.y),
            Some(MenuItem::App(AppId::Todo))
        );
        let (_, last) = taskbar.menu_hits[taskbar.menu_hits.len() - 1];
        assert_eq!(
            taskbar.hit_test_menu_item(last.x, last.y),
            Some(MenuItem::Help)
        );
        assert!(taskbar.menu_contains(first.x, first.y));
    }

    #[test]
    fn closed_menu_records_no_hits() {
        let mut taskbar = Taskbar::new();
        let reg = registry();
        rendered(&mut taskbar, &reg);
        assert!(taskbar.menu_hits.is_empty());
        assert_eq!(taskbar.hit_test_menu_item(0, 22), None);
        assert!(!taskbar.menu_contains(0, 22));
    }
}
