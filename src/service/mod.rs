//! Validation and ownership rules between the HTTP surface and the store.
//!
//! The service owns every input check: title presence on create, id
//! positivity, caller-identity parsing, and the closed status set. The
//! ownership check itself lives in the store's `(id, user_id)` scoping —
//! the service only decides what a missing row means (always `NotFound`,
//! whether the row is absent or merely someone else's).

use chrono::DateTime;

use crate::error::ApiError;
use crate::model::{Task, TaskDraft, TaskStatus, TaskUpdate};
use crate::storage::tasks::TaskStore;

pub struct TaskService {
    store: TaskStore,
}

impl TaskService {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    /// Create a task owned by the caller. Status is forced to `Todo` no
    /// matter what the client sent.
    pub async fn create(&self, draft: TaskDraft, caller: &str) -> Result<Task, ApiError> {
        if draft.title.is_empty() {
            return Err(ApiError::validation("task title is required"));
        }
        if let Some(due) = draft.due_date.as_deref() {
            validate_due_date(due)?;
        }
        let user_id = parse_user(caller)?;
        self.store
            .create(user_id, &draft.title, &draft.description, draft.due_date.as_deref())
            .await
    }

    /// List the caller's tasks, newest first. The status filter is passed
    /// through verbatim — an unrecognized value just matches nothing.
    pub async fn list(&self, caller: &str, status: &str) -> Result<Vec<Task>, ApiError> {
        let user_id = parse_user(caller)?;
        self.store.list(user_id, status).await
    }

    pub async fn get(&self, id: i64, caller: &str) -> Result<Task, ApiError> {
        if id <= 0 {
            return Err(ApiError::validation("invalid task id"));
        }
        let user_id = parse_user(caller)?;
        self.store.get(id, user_id).await?.ok_or(ApiError::NotFound)
    }

    /// Read the owned task, overlay the payload, persist.
    ///
    /// Title, description, and due_date are replaced unconditionally; status
    /// only when the payload carries a non-empty value, which must then be
    /// one of the three known states.
    pub async fn update(&self, id: i64, patch: TaskUpdate, caller: &str) -> Result<Task, ApiError> {
        let mut task = self.get(id, caller).await?;

        if let Some(due) = patch.due_date.as_deref() {
            validate_due_date(due)?;
        }
        task.title = patch.title;
        task.description = patch.description;
        task.due_date = patch.due_date;
        if !patch.status.is_empty() {
            let status = TaskStatus::parse(&patch.status)
                .ok_or_else(|| ApiError::validation("invalid task status"))?;
            task.status = status.as_str().to_string();
        }

        self.store.update(&task).await
    }

    pub async fn delete(&self, id: i64, caller: &str) -> Result<(), ApiError> {
        if id <= 0 {
            return Err(ApiError::validation("invalid task id"));
        }
        let user_id = parse_user(caller)?;
        self.store.delete(id, user_id).await
    }
}

/// Parse the advisory `User-Id` header value. The header is trusted as-is;
/// the only requirement is that it is an integer.
fn parse_user(caller: &str) -> Result<i64, ApiError> {
    caller
        .parse::<i64>()
        .map_err(|_| ApiError::validation("invalid user id"))
}

fn validate_due_date(due: &str) -> Result<(), ApiError> {
    DateTime::parse_from_rfc3339(due)
        .map(|_| ())
        .map_err(|_| ApiError::validation("due_date must be an RFC 3339 timestamp"))
}
