//! Todo window body: an input row, an add button, and the task list with
//! per-row toggle and delete actions.
//!
//! The task list is a cache of backend responses. User actions only issue
//! requests; the cache changes when a response arrives, so a failed
//! request leaves the list untouched.

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext, TextInput};
use crate::theme;
use crate::todo::{Task, TodoClient, TodoEvent};
use crate::ui::{UiFrame, rect_contains, safe_set_string, truncate_to_width};

const ADD_LABEL: &str = "[ Add ]";
const DELETE_LABEL: &str = "[Del]";

fn toggle_label(completed: bool) -> &'static str {
    if completed { "[Undo]" } else { "[Done]" }
}

/// Hit rectangles recorded for one task row during render.
#[derive(Debug, Clone)]
struct RowHit {
    id: String,
    completed: bool,
    toggle: Rect,
    delete: Rect,
}

pub struct TodoApp {
    client: TodoClient,
    input: TextInput,
    tasks: Vec<Task>,
    notices: Vec<String>,
    add_rect: Option<Rect>,
    row_hits: Vec<RowHit>,
}

impl TodoApp {
    /// Create the app and kick off the initial list fetch.
    pub fn new(client: TodoClient) -> Self {
        client.load();
        Self {
            client,
            input: TextInput::new("What needs doing?"),
            tasks: Vec::new(),
            notices: Vec::new(),
            add_rect: None,
            row_hits: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Apply any responses that arrived since the last tick.
    pub fn poll(&mut self) {
        for event in self.client.drain() {
            self.apply(event);
        }
    }

    /// Failure notices collected since the last call.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Submit the input as a new task. Empty or whitespace-only input is
    /// dropped without issuing a request.
    pub fn submit(&mut self) {
        let title = self.input.value().trim().to_string();
        if title.is_empty() {
            return;
        }
        self.client.create(title);
        self.input.clear();
    }

    fn apply(&mut self, event: TodoEvent) {
        match event {
            TodoEvent::Loaded(tasks) => self.tasks = tasks,
            TodoEvent::Created(task) => self.tasks.push(task),
            TodoEvent::Updated(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
            }
            TodoEvent::Deleted(id) => self.tasks.retain(|t| t.id != id),
            TodoEvent::Failed { op, .. } => {
                self.notices.push(op.failure_notice().to_string());
            }
        }
    }
}

impl Component for TodoApp {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.add_rect = None;
        self.row_hits.clear();
        if area.width < 12 || area.height < 2 {
            return;
        }
        let bounds = frame.area();

        // input row with the add button flush right
        let add_width = ADD_LABEL.len() as u16;
        let input_rect = Rect {
            x: area.x.saturating_add(1),
            y: area.y,
            width: area.width.saturating_sub(add_width + 3),
            height: 1,
        };
        self.input.render(frame, input_rect, ctx);
        let add_rect = Rect {
            x: area
                .x
                .saturating_add(area.width)
                .saturating_sub(add_width + 1),
            y: area.y,
            width: add_width,
            height: 1,
        };
        safe_set_string(
            frame.buffer_mut(),
            bounds,
            add_rect.x,
            add_rect.y,
            ADD_LABEL,
            Style::default()
                .fg(theme::action_fg())
                .add_modifier(Modifier::BOLD),
        );
        self.add_rect = Some(add_rect);

        let list_top = area.y.saturating_add(2);
        let list_bottom = area.y.saturating_add(area.height);
        if self.tasks.is_empty() {
            safe_set_string(
                frame.buffer_mut(),
                bounds,
                area.x.saturating_add(1),
                list_top,
                "No tasks yet. Add one to get started!",
                Style::default().fg(theme::muted_fg()),
            );
            return;
        }

        let toggle_width = toggle_label(false).len() as u16;
        let delete_width = DELETE_LABEL.len() as u16;
        let actions_width = toggle_width + 1 + delete_width;
        for (idx, task) in self.tasks.iter().enumerate() {
            let y = list_top.saturating_add(idx as u16);
            if y >= list_bottom {
                break;
            }
            let title_width = area.width.saturating_sub(actions_width + 3) as usize;
            let title_style = if task.completed {
                Style::default()
                    .fg(theme::muted_fg())
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            safe_set_string(
                frame.buffer_mut(),
                bounds,
                area.x.saturating_add(1),
                y,
                &truncate_to_width(&task.title, title_width),
                title_style,
            );
            let toggle = Rect {
                x: area
                    .x
                    .saturating_add(area.width)
                    .saturating_sub(actions_width + 1),
                y,
                width: toggle_width,
                height: 1,
            };
            let delete = Rect {
                x: toggle.x.saturating_add(toggle_width + 1),
                y,
                width: delete_width,
                height: 1,
            };
            safe_set_string(
                frame.buffer_mut(),
                bounds,
                toggle.x,
                y,
                toggle_label(task.completed),
                Style::default().fg(theme::action_fg()),
            );
            safe_set_string(
                frame.buffer_mut(),
                bounds,
                delete.x,
                y,
                DELETE_LABEL,
                Style::default().fg(theme::danger_fg()),
            );
            self.row_hits.push(RowHit {
                id: task.id.clone(),
                completed: task.completed,
                toggle,
                delete,
            });
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if ctx.focused() && key.kind != KeyEventKind::Release => {
                if key.code == KeyCode::Enter {
                    self.submit();
                    true
                } else {
                    self.input.handle_key(key)
                }
            }
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                let (col, row) = (mouse.column, mouse.row);
                if self
                    .add_rect
                    .is_some_and(|rect| rect_contains(rect, col, row))
                {
                    self.submit();
                    return true;
                }
                for hit in &self.row_hits {
                    if rect_contains(hit.toggle, col, row) {
                        self.client.set_completed(hit.id.clone(), !hit.completed);
                        return true;
                    }
                    if rect_contains(hit.delete, col, row) {
                        self.client.delete(hit.id.clone());
                        return true;
                    }
                }
                false
            }
            _ => false,
        }
    }
}
