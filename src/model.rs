//! Task domain types and request payloads.

use serde::{Deserialize, Serialize};

/// Task progress. A closed set — anything else is rejected at the
/// validation boundary, not at the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Parse one of the three wire strings. `None` for anything else,
    /// including the empty string.
    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            "Todo" => Some(TaskStatus::Todo),
            "InProgress" => Some(TaskStatus::InProgress),
            "Done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Done => "Done",
        }
    }
}

/// A task row, serialized to clients as-is.
///
/// Timestamps are RFC 3339 UTC strings, stamped by the store. `due_date`
/// is `None` when the task has no due date; the null round-trips.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub user_id: i64,
    pub due_date: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of `POST /tasks`.
///
/// Carries no `status` or `user_id` field — both are server-assigned, and
/// any value a client sends for them is dropped at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: Option<String>,
}

/// Body of `PUT /tasks/{id}`.
///
/// Title, description, and due_date always overwrite the stored values — an
/// omitted field clears, it does not preserve. Status is applied only when
/// non-empty.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskUpdate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: String,
}
