//! Task table access.
//!
//! Every method is one parameterized statement against the `tasks` table.
//! Reads and mutations are scoped by `(id, user_id)` so a row owned by a
//! different caller is indistinguishable from a row that does not exist.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::model::{Task, TaskStatus};

#[derive(Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new task owned by `user_id`. Status is always `Todo`; the
    /// store assigns the id and stamps both timestamps.
    pub async fn create(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
        due_date: Option<&str>,
    ) -> Result<Task, ApiError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO tasks (title, description, user_id, due_date, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(title)
        .bind(description)
        .bind(user_id)
        .bind(due_date)
        .bind(TaskStatus::Todo.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get(id, user_id)
            .await?
            .ok_or(ApiError::Storage(sqlx::Error::RowNotFound))
    }

    /// All tasks owned by `user_id`, newest first. An empty `status` means
    /// no filter; a non-matching value yields an empty vec, not an error.
    pub async fn list(&self, user_id: i64, status: &str) -> Result<Vec<Task>, ApiError> {
        let rows = if status.is_empty() {
            sqlx::query_as(
                "SELECT * FROM tasks WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as(
                "SELECT * FROM tasks WHERE user_id = ? AND status = ?
                 ORDER BY created_at DESC, id DESC",
            )
            .bind(user_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await?
        };
        Ok(rows)
    }

    /// Fetch scoped by `(id, user_id)`. `None` covers both "no such row" and
    /// "owned by someone else".
    pub async fn get(&self, id: i64, user_id: i64) -> Result<Option<Task>, ApiError> {
        Ok(
            sqlx::query_as("SELECT * FROM tasks WHERE id = ? AND user_id = ?")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    /// Overwrite title/description/due_date/status and re-stamp
    /// `updated_at`. Zero rows affected reads as not found.
    pub async fn update(&self, task: &Task) -> Result<Task, ApiError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, due_date = ?, status = ?, updated_at = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date.as_deref())
        .bind(&task.status)
        .bind(&now)
        .bind(task.id)
        .bind(task.user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound);
        }
        self.get(task.id, task.user_id)
            .await?
            .ok_or(ApiError::Storage(sqlx::Error::RowNotFound))
    }

    /// Delete scoped by `(id, user_id)`. Zero rows affected reads as not
    /// found.
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use tempfile::TempDir;

    async fn make_store(dir: &TempDir) -> TaskStore {
        let storage = Storage::open(&dir.path().join("tasks.db"), 0)
            .await
            .expect("storage init failed");
        TaskStore::new(storage.pool())
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_stamps_todo() {
        let dir = TempDir::new().unwrap();
        let store = make_store(&dir).await;

        let task = store.create(7, "Buy milk", "2%", None).await.unwrap();
        assert!(task.id > 0);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "2%");
        assert_eq!(task.user_id, 7);
        assert_eq!(task.status, "Todo");
        assert_eq!(task.created_at, task.updated_at);
        assert!(task.due_date.is_none());
    }

    #[tokio::test]
    async fn test_due_date_round_trips_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = make_store(&dir).await;

        let due = "2026-09-01T09:00:00+00:00";
        let task = store.create(1, "dentist", "", Some(due)).await.unwrap();
        let fetched = store.get(task.id, 1).await.unwrap().unwrap();
        assert_eq!(fetched.due_date.as_deref(), Some(due));

        let no_due = store.create(1, "untimed", "", None).await.unwrap();
        let fetched = store.get(no_due.id, 1).await.unwrap().unwrap();
        assert!(fetched.due_date.is_none());
    }

    #[tokio::test]
    async fn test_get_is_scoped_by_owner() {
        let dir = TempDir::new().unwrap();
        let store = make_store(&dir).await;

        let task = store.create(7, "secret", "", None).await.unwrap();
        assert!(store.get(task.id, 7).await.unwrap().is_some());
        // Other callers see nothing — same result as a nonexistent id.
        assert!(store.get(task.id, 9).await.unwrap().is_none());
        assert!(store.get(9999, 7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_wrong_owner_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = make_store(&dir).await;

        let mut task = store.create(7, "mine", "", None).await.unwrap();
        task.user_id = 9;
        let err = store.update(&task).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));

        // The row is untouched.
        let unchanged = store.get(task.id, 7).await.unwrap().unwrap();
        assert_eq!(unchanged.title, "mine");
    }

    #[tokio::test]
    async fn test_update_restamps_updated_at() {
        let dir = TempDir::new().unwrap();
        let store = make_store(&dir).await;

        let mut task = store.create(7, "before", "", None).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        task.title = "after".to_string();
        let updated = store.update(&task).await.unwrap();
        assert_eq!(updated.title, "after");
        assert_eq!(updated.created_at, task.created_at);
        assert!(updated.updated_at > task.updated_at);
    }

    #[tokio::test]
    async fn test_delete_scoped_and_terminal() {
        let dir = TempDir::new().unwrap();
        let store = make_store(&dir).await;

        let task = store.create(7, "doomed", "", None).await.unwrap();
        let err = store.delete(task.id, 9).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));

        store.delete(task.id, 7).await.unwrap();
        assert!(store.get(task.id, 7).await.unwrap().is_none());
        let err = store.delete(task.id, 7).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn test_list_orders_newest_first_and_filters() {
        let dir = TempDir::new().unwrap();
        let store = make_store(&dir).await;

        let a = store.create(7, "first", "", None).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let b = store.create(7, "second", "", None).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let c = store.create(7, "third", "", None).await.unwrap();
        store.create(9, "not mine", "", None).await.unwrap();

        let all = store.list(7, "").await.unwrap();
        let ids: Vec<i64> = all.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);

        // Flip one to Done and filter on it.
        let mut done = b.clone();
        done.status = "Done".to_string();
        store.update(&done).await.unwrap();

        let done_only = store.list(7, "Done").await.unwrap();
        assert_eq!(done_only.len(), 1);
        assert_eq!(done_only[0].id, b.id);

        // Unknown filter values match nothing rather than failing.
        assert!(store.list(7, "Bogus").await.unwrap().is_empty());
    }
}
