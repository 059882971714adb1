//! End-to-end todo flows driven through the desktop: every user action
//! issues exactly one HTTP request and the list cache only changes when a
//! response arrives.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use term_desk::apps::{NotepadApp, NotepadStore, TodoApp};
use term_desk::desktop::Desktop;
use term_desk::todo::{Task, TodoApi, TodoClient, TodoError};
use term_desk::ui::UiFrame;

const VIEWPORT: Rect = Rect {
    x: 0,
    y: 0,
    width: 80,
    height: 24,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Request {
    List,
    Create(String),
    SetCompleted(String, bool),
    Delete(String),
}

/// Recording backend seeded with one incomplete task.
struct RecordingApi {
    requests: Mutex<Vec<Request>>,
    next_id: Mutex<u32>,
}

impl RecordingApi {
    fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            next_id: Mutex::new(100),
        }
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl TodoApi for RecordingApi {
    fn list(&self) -> Result<Vec<Task>, TodoError> {
        self.requests.lock().unwrap().push(Request::List);
        Ok(vec![Task {
            id: "1".into(),
            title: "water plants".into(),
            completed: false,
        }])
    }

    fn create(&self, title: &str) -> Result<Task, TodoError> {
        self.requests
            .lock()
            .unwrap()
            .push(Request::Create(title.to_string()));
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        Ok(Task {
            id: next_id.to_string(),
            title: title.to_string(),
            completed: false,
        })
    }

    fn set_completed(&self, id: &str, completed: bool) -> Result<Task, TodoError> {
        self.requests
            .lock()
            .unwrap()
            .push(Request::SetCompleted(id.to_string(), completed));
        Ok(Task {
            id: id.to_string(),
            title: "water plants".into(),
            completed,
        })
    }

    fn delete(&self, id: &str) -> Result<(), TodoError> {
        self.requests
            .lock()
            .unwrap()
            .push(Request::Delete(id.to_string()));
        Ok(())
    }
}

fn desktop_with(api: Arc<RecordingApi>) -> (Desktop, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let todo = TodoApp::new(TodoClient::new(api));
    let notepad = NotepadApp::new(NotepadStore::new(dir.path()));
    (Desktop::new(todo, notepad), dir)
}

fn render(desktop: &mut Desktop) -> Buffer {
    let mut buffer = Buffer::empty(VIEWPORT);
    let mut frame = UiFrame::from_parts(VIEWPORT, &mut buffer);
    desktop.render(&mut frame);
    buffer
}

fn click(desktop: &mut Desktop, column: u16, row: u16) {
    desktop.handle_event(&Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }));
    desktop.handle_event(&Event::Mouse(MouseEvent {
        kind: MouseEventKind::Up(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }));
}

fn type_text(desktop: &mut Desktop, text: &str) {
    for ch in text.chars() {
        desktop.handle_event(&Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::NONE,
        )));
    }
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..VIEWPORT.width)
        .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
        .collect()
}

fn find_text(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
    for y in 0..VIEWPORT.height {
        if let Some(col) = row_text(buffer, y).find(needle) {
            return Some((col as u16, y));
        }
    }
    None
}

/// Tick the desktop until `pred` holds or a deadline passes.
fn settle<F: Fn(&Desktop) -> bool>(desktop: &mut Desktop, pred: F) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !pred(desktop) {
        assert!(Instant::now() < deadline, "desktop never settled");
        desktop.tick();
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn startup_issues_one_list_request_and_shows_the_tasks() {
    let api = Arc::new(RecordingApi::new());
    let (mut desktop, _dir) = desktop_with(api.clone());
    settle(&mut desktop, |d| !d.todo().tasks().is_empty());
    assert_eq!(api.requests(), vec![Request::List]);
    let buffer = render(&mut desktop);
    assert!(find_text(&buffer, "water plants").is_some());
    assert!(find_text(&buffer, "[Done]").is_some());
}

#[test]
fn typing_and_enter_adds_a_task_with_one_post() {
    let api = Arc::new(RecordingApi::new());
    let (mut desktop, _dir) = desktop_with(api.clone());
    settle(&mut desktop, |d| !d.todo().tasks().is_empty());

    type_text(&mut desktop, "  buy milk ");
    desktop.handle_event(&Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    settle(&mut desktop, |d| d.todo().tasks().len() == 2);

    assert_eq!(
        api.requests(),
        vec![Request::List, Request::Create("buy milk".into())]
    );
    let buffer = render(&mut desktop);
    assert!(find_text(&buffer, "buy milk").is_some());
}

#[test]
fn empty_input_never_reaches_the_backend() {
    let api = Arc::new(RecordingApi::new());
    let (mut desktop, _dir) = desktop_with(api.clone());
    settle(&mut desktop, |d| !d.todo().tasks().is_empty());

    let buffer = render(&mut desktop);
    let (x, y) = find_text(&buffer, "[ Add ]").expect("add button rendered");
    click(&mut desktop, x, y);
    type_text(&mut desktop, "   ");
    desktop.handle_event(&Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));

    std::thread::sleep(Duration::from_millis(30));
    desktop.tick();
    assert_eq!(api.requests(), vec![Request::List]);
    assert_eq!(desktop.todo().tasks().len(), 1);
}

#[test]
fn toggle_round_trips_through_a_patch() {
    let api = Arc::new(RecordingApi::new());
    let (mut desktop, _dir) = desktop_with(api.clone());
    settle(&mut desktop, |d| !d.todo().tasks().is_empty());

    let buffer = render(&mut desktop);
    let (x, y) = find_text(&buffer, "[Done]").expect("toggle rendered");
    click(&mut desktop, x, y);
    settle(&mut desktop, |d| d.todo().tasks()[0].completed);

    assert_eq!(
        api.requests(),
        vec![Request::List, Request::SetCompleted("1".into(), true)]
    );
    // a completed task offers the undo action instead
    let buffer = render(&mut desktop);
    let (x, y) = find_text(&buffer, "[Undo]").expect("undo rendered");
    click(&mut desktop, x, y);
    settle(&mut desktop, |d| !d.todo().tasks()[0].completed);
    assert_eq!(
        api.requests().last(),
        Some(&Request::SetCompleted("1".into(), false))
    );
}

#[test]
fn delete_removes_the_row_after_the_response() {
    let api = Arc::new(RecordingApi::new());
    let (mut desktop, _dir) = desktop_with(api.clone());
    settle(&mut desktop, |d| !d.todo().tasks().is_empty());

    let buffer = render(&mut desktop);
    let (x, y) = find_text(&buffer, "[Del]").expect("delete rendered");
    click(&mut desktop, x, y);
    settle(&mut desktop, |d| d.todo().tasks().is_empty());

    assert_eq!(
        api.requests(),
        vec![Request::List, Request::Delete("1".into())]
    );
    let buffer = render(&mut desktop);
    assert!(find_text(&buffer, "water plants").is_none());
    assert!(find_text(&buffer, "No tasks yet").is_some());
}
