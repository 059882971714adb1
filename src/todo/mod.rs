//! Todo domain model and the remote API surface.

mod client;

pub use client::{HttpTodoApi, TodoApi, TodoClient, TodoEvent, TodoOp};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One task as the backend stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Current records carry `title`; older ones used `text`.
    #[serde(alias = "text")]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request body for creating a task.
#[derive(Debug, Serialize)]
pub struct NewTask<'a> {
    pub title: &'a str,
    pub completed: bool,
}

/// Request body for flipping a task's completion flag.
#[derive(Debug, Serialize)]
pub struct CompletionPatch {
    pub completed: bool,
}

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("request failed: {0}")]
    Http(#[from] ureq::Error),
    #[error("backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_deserializes_title_field() {
        let task: Task =
            serde_json::from_str(r#"{"id":"1","title":"buy milk","completed":true}"#).unwrap();
        assert_eq!(task.title, "buy milk");
        assert!(task.completed);
    }

    #[test]
    fn task_accepts_legacy_text_field() {
        let task: Task = serde_json::from_str(r#"{"id":"2","text":"old record"}"#).unwrap();
        assert_eq!(task.title, "old record");
        assert!(!task.completed);
    }

    #[test]
    fn new_task_serializes_completed_false() {
        let body = serde_json::to_value(NewTask {
            title: "walk dog",
            completed: false,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "walk dog", "completed": false})
        );
    }
}
