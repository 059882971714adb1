//! Remote todo API plus the worker-thread client the UI talks to.
//!
//! Every user action issues exactly one HTTP request on its own thread and
//! funnels the outcome back over an mpsc channel. The UI drains that
//! channel once per tick and applies responses in arrival order, so the
//! last response wins; there is no dedup, timeout, or cancellation layer.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use super::{CompletionPatch, NewTask, Task, TodoError};

/// Which user action a request belongs to. Carried on failures so the UI
/// can word the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoOp {
    Load,
    Create,
    Toggle,
    Delete,
}

impl TodoOp {
    /// Message shown in the modal notice when the request fails.
    pub fn failure_notice(self) -> &'static str {
        match self {
            TodoOp::Load => "Failed to load tasks. Please check your connection.",
            TodoOp::Create => "Failed to add task. Please try again.",
            TodoOp::Toggle => "Failed to update task. Please try again.",
            TodoOp::Delete => "Failed to delete task. Please try again.",
        }
    }
}

/// Outcome of one request, delivered on the UI channel.
#[derive(Debug)]
pub enum TodoEvent {
    Loaded(Vec<Task>),
    Created(Task),
    Updated(Task),
    Deleted(String),
    Failed { op: TodoOp, error: String },
}

/// Blocking transport to the todo backend. The desktop holds it behind an
/// `Arc` so worker threads can share one connection pool.
pub trait TodoApi: Send + Sync {
    fn list(&self) -> Result<Vec<Task>, TodoError>;
    fn create(&self, title: &str) -> Result<Task, TodoError>;
    fn set_completed(&self, id: &str, completed: bool) -> Result<Task, TodoError>;
    fn delete(&self, id: &str) -> Result<(), TodoError>;
}

/// REST transport against the hosted backend.
///
/// `GET /` and `POST /` address the collection; `PATCH /{id}` and
/// `DELETE /{id}` address one task.
pub struct HttpTodoApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpTodoApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url,
        }
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

impl TodoApi for HttpTodoApi {
    fn list(&self) -> Result<Vec<Task>, TodoError> {
        let mut body = self.agent.get(self.base_url.as_str()).call()?.into_body();
        Ok(body.read_json()?)
    }

    fn create(&self, title: &str) -> Result<Task, TodoError> {
        let mut body = self
            .agent
            .post(self.base_url.as_str())
            .send_json(NewTask {
                title,
                completed: false,
            })?
            .into_body();
        Ok(body.read_json()?)
    }

    fn set_completed(&self, id: &str, completed: bool) -> Result<Task, TodoError> {
        let mut body = self
            .agent
            .patch(self.item_url(id).as_str())
            .send_json(CompletionPatch { completed })?
            .into_body();
        Ok(body.read_json()?)
    }

    fn delete(&self, id: &str) -> Result<(), TodoError> {
        self.agent.delete(self.item_url(id).as_str()).call()?;
        Ok(())
    }
}

/// Fire-and-forget request issuer. One worker thread per request; results
/// are picked up by [`TodoClient::drain`] on the UI thread.
pub struct TodoClient {
    api: Arc<dyn TodoApi>,
    tx: Sender<TodoEvent>,
    rx: Receiver<TodoEvent>,
}

impl TodoClient {
    pub fn new(api: Arc<dyn TodoApi>) -> Self {
        let (tx, rx) = channel();
        Self { api, tx, rx }
    }

    pub fn load(&self) {
        self.spawn(TodoOp::Load, |api| api.list().map(TodoEvent::Loaded));
    }

    pub fn create(&self, title: String) {
        self.spawn(TodoOp::Create, move |api| {
            api.create(&title).map(TodoEvent::Created)
        });
    }

    pub fn set_completed(&self, id: String, completed: bool) {
        self.spawn(TodoOp::Toggle, move |api| {
            api.set_completed(&id, completed).map(TodoEvent::Updated)
        });
    }

    pub fn delete(&self, id: String) {
        self.spawn(TodoOp::Delete, move |api| {
            api.delete(&id).map(|_| TodoEvent::Deleted(id.clone()))
        });
    }

    /// All responses that have arrived since the last call, oldest first.
    pub fn drain(&self) -> Vec<TodoEvent> {
        self.rx.try_iter().collect()
    }

    fn spawn<F>(&self, op: TodoOp, job: F)
    where
        F: FnOnce(&dyn TodoApi) -> Result<TodoEvent, TodoError> + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let event = match job(api.as_ref()) {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(?op, error = %err, "todo request failed");
                    TodoEvent::Failed {
                        op,
                        error: err.to_string(),
                    }
                }
            };
            // receiver gone means the app is shutting down
            let _ = tx.send(event);
        });
    }
}
