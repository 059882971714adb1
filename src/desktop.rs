//! The desktop shell: owns the window registry, the drag controller, the
//! taskbar, the three apps, and the modal notice, and routes every input
//! event to exactly one of them.

use std::collections::VecDeque;

use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::apps::{AppId, NotepadApp, TicTacToeApp, TodoApp};
use crate::components::{Component, ComponentContext, DialogOverlay};
use crate::constants::TASKBAR_HEIGHT;
use crate::keybindings::{Action, KeyBindings};
use crate::taskbar::{MenuItem, Taskbar};
use crate::theme;
use crate::ui::{UiFrame, rect_contains, safe_set_string};
use crate::window::{DragController, HeaderAction, WindowRegistry, chrome};

const HELP_TEXT: &str = indoc! {"
    Launch apps from the desktop icons or the start menu.
    Drag a window by its header bar.
    [_] minimizes, [^] maximizes, [x] closes.
    Taskbar buttons toggle minimize. Ctrl+Q quits.
"};

pub struct Desktop {
    registry: WindowRegistry<AppId>,
    drag: DragController<AppId>,
    taskbar: Taskbar,
    todo: TodoApp,
    notepad: NotepadApp,
    tictactoe: TicTacToeApp,
    notice: DialogOverlay,
    pending_notices: VecDeque<String>,
    bindings: KeyBindings,
    icon_hits: Vec<(AppId, Rect)>,
    /// Viewport from the last render, used to clamp drags between frames.
    viewport: Rect,
}

impl Desktop {
    pub fn new(todo: TodoApp, notepad: NotepadApp) -> Self {
        let mut registry = WindowRegistry::new();
        for id in AppId::ALL {
            registry.insert(id, id.default_geometry());
        }
        // the todo window greets the user on startup
        registry.open(AppId::Todo);
        Self {
            registry,
            drag: DragController::new(),
            taskbar: Taskbar::new(),
            todo,
            notepad,
            tictactoe: TicTacToeApp::new(),
            notice: DialogOverlay::new(),
            pending_notices: VecDeque::new(),
            bindings: KeyBindings::default(),
            icon_hits: Vec::new(),
            viewport: Rect::default(),
        }
    }

    pub fn registry(&self) -> &WindowRegistry<AppId> {
        &self.registry
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn notice(&self) -> &DialogOverlay {
        &self.notice
    }

    pub fn todo(&self) -> &TodoApp {
        &self.todo
    }

    /// Per-tick housekeeping: pick up finished todo requests and surface
    /// the next queued failure notice once the current one is dismissed.
    pub fn tick(&mut self) {
        self.todo.poll();
        self.pending_notices.extend(self.todo.take_notices());
        self.pending_notices.extend(self.notepad.take_notices());
        if !self.notice.visible()
            && let Some(message) = self.pending_notices.pop_front()
        {
            self.notice.open("Error", message);
        }
    }

    pub fn launch(&mut self, id: AppId) {
        self.registry.open(id);
        self.taskbar.close_menu();
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        self.viewport = area;
        self.icon_hits.clear();
        self.taskbar.begin_frame();
        let desktop_area = self.taskbar.split_area(area);

        // desktop surface
        let buffer = frame.buffer_mut();
        let surface = Style::default().bg(theme::desktop_bg());
        for y in desktop_area.y..desktop_area.y.saturating_add(desktop_area.height) {
            for x in desktop_area.x..desktop_area.x.saturating_add(desktop_area.width) {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(surface);
                }
            }
        }

        // icons down the left edge
        for (idx, id) in AppId::ALL.iter().enumerate() {
            let y = desktop_area.y + 1 + (idx as u16) * 2;
            if y >= desktop_area.y + desktop_area.height {
                break;
            }
            let label = format!("■ {}", id.title());
            let rect = Rect {
                x: desktop_area.x + 2,
                y,
                width: label.chars().count() as u16,
                height: 1,
            };
            safe_set_string(
                frame.buffer_mut(),
                area,
                rect.x,
                rect.y,
                &label,
                Style::default()
                    .fg(theme::icon_fg())
                    .add_modifier(Modifier::BOLD),
            );
            self.icon_hits.push((*id, rect));
        }

        // windows back to front
        let focused = self.registry.focused();
        for id in self.registry.draw_order() {
            let Some(rect) = self.registry.frame_rect(id, desktop_area) else {
                continue;
            };
            chrome::render(frame, rect, id.title(), focused == Some(id));
            let content = chrome::content_rect(rect);
            let ctx = ComponentContext::new(focused == Some(id));
            match id {
                AppId::Todo => self.todo.render(frame, content, &ctx),
                AppId::Notepad => self.notepad.render(frame, content, &ctx),
                AppId::TicTacToe => self.tictactoe.render(frame, content, &ctx),
            }
        }

        self.taskbar.render(frame, &self.registry);
        self.taskbar.render_menu(frame);
        self.notice
            .render(frame, area, &ComponentContext::default());
    }

    /// Route one input event. Returns true when something consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        // the notice is modal: nothing else sees input while it is up
        if self.notice.visible() {
            return self
                .notice
                .handle_event(event, &ComponentContext::default());
        }
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if self.bindings.matches(Action::ToggleStartMenu, key) {
                    self.taskbar.toggle_menu();
                    return true;
                }
                match self.registry.focused() {
                    Some(AppId::Todo) => self.todo.handle_event(event, &ComponentContext::new(true)),
                    Some(AppId::Notepad) => self
                        .notepad
                        .handle_event(event, &ComponentContext::new(true)),
                    Some(AppId::TicTacToe) => self
                        .tictactoe
                        .handle_event(event, &ComponentContext::new(true)),
                    None => false,
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        let (col, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_pointer_down(col, row),
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(id) = self.drag.dragged_id() else {
                    return false;
                };
                let size = self
                    .registry
                    .geometry(id)
                    .map(|geo| (geo.width, geo.height))
                    .unwrap_or_default();
                if let Some((id, (x, y))) = self.drag.update((col, row), size, self.viewport) {
                    self.registry.set_origin(id, x, y);
                }
                true
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag.end().is_some(),
            _ => false,
        }
    }

    fn handle_pointer_down(&mut self, col: u16, row: u16) -> bool {
        // start menu first: it floats above everything else
        if self.taskbar.menu_open() {
            if let Some(item) = self.taskbar.hit_test_menu_item(col, row) {
                match item {
                    MenuItem::App(id) => self.launch(id),
                    MenuItem::Help => {
                        self.notice.open("Help", HELP_TEXT.trim_end());
                        self.taskbar.close_menu();
                    }
                }
                return true;
            }
            if self.taskbar.hit_test_start(col, row) {
                self.taskbar.close_menu();
                return true;
            }
            // any other click dismisses the menu and keeps routing
            self.taskbar.close_menu();
        }

        if self.taskbar.contains(col, row) {
            if self.taskbar.hit_test_start(col, row) {
                self.taskbar.toggle_menu();
            } else if let Some(id) = self.taskbar.hit_test_button(col, row) {
                // taskbar button toggles between minimized and restored
                if self.registry.is_minimized(id) {
                    self.registry.open(id);
                } else {
                    self.registry.minimize(id);
                }
            }
            return true;
        }

        // windows, front first
        let desktop_area = Rect {
            x: self.viewport.x,
            y: self.viewport.y,
            width: self.viewport.width,
            height: self.viewport.height.saturating_sub(TASKBAR_HEIGHT),
        };
        for id in self.registry.draw_order().into_iter().rev() {
            let Some(rect) = self.registry.frame_rect(id, desktop_area) else {
                continue;
            };
            if !rect_contains(rect, col, row) {
                continue;
            }
            self.registry.bring_to_front(id);
            match chrome::hit_test_header(rect, col, row) {
                Some(HeaderAction::Minimize) => self.registry.minimize(id),
                Some(HeaderAction::Maximize) => self.registry.toggle_maximize(id),
                Some(HeaderAction::Close) => self.registry.close(id),
                Some(HeaderAction::Drag) => {
                    // a maximized window cannot be dragged
                    if !self.registry.is_maximized(id) {
                        self.registry.set_origin(id, rect.x, rect.y);
                        self.drag.begin(id, (col, row), rect);
                    }
                }
                None => {
                    let event = Event::Mouse(MouseEvent {
                        kind: MouseEventKind::Down(MouseButton::Left),
                        column: col,
                        row,
                        modifiers: crossterm::event::KeyModifiers::NONE,
                    });
                    let ctx = ComponentContext::new(true);
                    match id {
                        AppId::Todo => self.todo.handle_event(&event, &ctx),
                        AppId::Notepad => self.notepad.handle_event(&event, &ctx),
                        AppId::TicTacToe => self.tictactoe.handle_event(&event, &ctx),
                    };
                }
            }
            return true;
        }

        if let Some((id, _)) = self
            .icon_hits
            .iter()
            .find(|(_, rect)| rect_contains(*rect, col, row))
            .copied()
        {
            self.launch(id);
            return true;
        }
        false
    }
}
