//! SQLite task store.
//!
//! A single database file with two tables:
//! - `briefings` — one row per generated briefing (duplicates per date
//!    permitted; regenerating appends)
//! - `todos` — extracted items with a soft completion flag
//!
//! The schema self-initializes on open. Each operation runs in its own
//! implicit transaction.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use daybrief_core::error::StoreError;
use daybrief_core::record::Todo;
use daybrief_core::store::TaskStore;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

/// The production SQLite task store.
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    /// Create a new store from a file path.
    ///
    /// The database and all tables/indexes are created automatically.
    /// Pass `"sqlite::memory:"` for an in-process ephemeral store
    /// (useful for tests).
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| StoreError::Storage(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Storage(format!("Failed to open SQLite: {e}")))?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("SQLite task store initialized at {path}");
        Ok(store)
    }

    /// Create from an existing pool (useful for testing).
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Run schema migrations — creates tables and indexes.
    ///
    /// `CREATE ... IF NOT EXISTS` makes this safe to run on every open,
    /// including concurrently from multiple connections.
    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS briefings (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                date        TEXT NOT NULL,
                summary     TEXT NOT NULL,
                created_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::InitFailed(format!("briefings table: {e}")))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                date         TEXT NOT NULL,
                todo         TEXT NOT NULL,
                completed    INTEGER NOT NULL DEFAULT 0,
                created_at   TEXT NOT NULL,
                completed_at TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::InitFailed(format!("todos table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_briefings_date ON briefings(date)")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::InitFailed(format!("briefings date index: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_todos_date ON todos(date)")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::InitFailed(format!("todos date index: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_todos_completed ON todos(completed)")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::InitFailed(format!("todos completed index: {e}")))?;

        debug!("SQLite migrations complete");
        Ok(())
    }

    fn row_to_todo(row: &sqlx::sqlite::SqliteRow) -> Result<Todo, StoreError> {
        let id: i64 = row
            .try_get("id")
            .map_err(|e| StoreError::QueryFailed(format!("id column: {e}")))?;
        let date_str: String = row
            .try_get("date")
            .map_err(|e| StoreError::QueryFailed(format!("date column: {e}")))?;
        let text: String = row
            .try_get("todo")
            .map_err(|e| StoreError::QueryFailed(format!("todo column: {e}")))?;
        let completed: i64 = row
            .try_get("completed")
            .map_err(|e| StoreError::QueryFailed(format!("completed column: {e}")))?;

        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| StoreError::QueryFailed(format!("date parse: {e}")))?;

        Ok(Todo {
            id,
            date,
            text,
            completed: completed != 0,
        })
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn store_briefing(&self, date: NaiveDate, summary: &str) -> Result<(), StoreError> {
        // No uniqueness check: a second briefing for the same date appends
        // a second row, keeping the regeneration history.
        sqlx::query("INSERT INTO briefings (date, summary, created_at) VALUES (?1, ?2, ?3)")
            .bind(date.format("%Y-%m-%d").to_string())
            .bind(summary)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(format!("INSERT briefing: {e}")))?;

        debug!(%date, "Stored briefing");
        Ok(())
    }

    async fn get_briefing(&self, date: NaiveDate) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT summary FROM briefings WHERE date = ?1 ORDER BY id LIMIT 1")
            .bind(date.format("%Y-%m-%d").to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("SELECT briefing: {e}")))?;

        match row {
            Some(row) => {
                let summary: String = row
                    .try_get("summary")
                    .map_err(|e| StoreError::QueryFailed(format!("summary column: {e}")))?;
                Ok(Some(summary))
            }
            None => Ok(None),
        }
    }

    async fn store_todo(&self, date: NaiveDate, text: &str) -> Result<i64, StoreError> {
        let result = sqlx::query("INSERT INTO todos (date, todo, created_at) VALUES (?1, ?2, ?3)")
            .bind(date.format("%Y-%m-%d").to_string())
            .bind(text)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(format!("INSERT todo: {e}")))?;

        let id = result.last_insert_rowid();
        debug!(%date, id, "Stored todo");
        Ok(id)
    }

    async fn get_incomplete_todos(&self, date: NaiveDate) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, date, todo, completed FROM todos WHERE date = ?1 AND completed = 0 ORDER BY id",
        )
        .bind(date.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::QueryFailed(format!("SELECT todos: {e}")))?;

        rows.iter().map(Self::row_to_todo).collect()
    }

    async fn complete_todo(&self, id: i64) -> Result<(), StoreError> {
        // Unconditional UPDATE: unknown or already-completed ids match
        // zero rows, which is the silent no-op the contract requires.
        sqlx::query("UPDATE todos SET completed = 1, completed_at = ?1 WHERE id = ?2 AND completed = 0")
            .bind(Utc::now().to_rfc3339())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(format!("UPDATE todo: {e}")))?;

        debug!(id, "Marked todo complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> SqliteTaskStore {
        SqliteTaskStore::new("sqlite::memory:").await.unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn briefing_round_trip() {
        let store = test_store().await;
        let date = day(2025, 6, 22);

        assert!(store.get_briefing(date).await.unwrap().is_none());

        store
            .store_briefing(date, "Good morning! Here is your day.")
            .await
            .unwrap();

        let summary = store.get_briefing(date).await.unwrap().unwrap();
        assert_eq!(summary, "Good morning! Here is your day.");
    }

    #[tokio::test]
    async fn duplicate_briefings_permitted_first_wins() {
        let store = test_store().await;
        let date = day(2025, 6, 22);

        store.store_briefing(date, "first run").await.unwrap();
        store.store_briefing(date, "second run").await.unwrap();

        // Both rows exist; retrieval returns the earliest.
        let summary = store.get_briefing(date).await.unwrap().unwrap();
        assert_eq!(summary, "first run");
    }

    #[tokio::test]
    async fn briefing_dates_are_independent() {
        let store = test_store().await;
        store.store_briefing(day(2025, 6, 21), "yesterday").await.unwrap();
        store.store_briefing(day(2025, 6, 22), "today").await.unwrap();

        assert_eq!(
            store.get_briefing(day(2025, 6, 21)).await.unwrap().unwrap(),
            "yesterday"
        );
        assert_eq!(
            store.get_briefing(day(2025, 6, 22)).await.unwrap().unwrap(),
            "today"
        );
    }

    #[tokio::test]
    async fn todo_round_trip() {
        let store = test_store().await;
        let date = day(2025, 6, 22);

        let id = store.store_todo(date, "x").await.unwrap();
        assert!(id > 0);

        let todos = store.get_incomplete_todos(date).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, id);
        assert_eq!(todos[0].text, "x");
        assert!(!todos[0].completed);
        assert_eq!(todos[0].date, date);
    }

    #[tokio::test]
    async fn todos_returned_in_insertion_order() {
        let store = test_store().await;
        let date = day(2025, 6, 22);

        store.store_todo(date, "first").await.unwrap();
        store.store_todo(date, "second").await.unwrap();
        store.store_todo(date, "third").await.unwrap();

        let texts: Vec<String> = store
            .get_incomplete_todos(date)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn complete_todo_removes_from_incomplete_set() {
        let store = test_store().await;
        let date = day(2025, 6, 22);

        let id = store.store_todo(date, "call John").await.unwrap();
        store.store_todo(date, "send email").await.unwrap();

        store.complete_todo(id).await.unwrap();

        let todos = store.get_incomplete_todos(date).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "send email");
    }

    #[tokio::test]
    async fn complete_todo_is_idempotent() {
        let store = test_store().await;
        let date = day(2025, 6, 22);
        let id = store.store_todo(date, "once").await.unwrap();

        store.complete_todo(id).await.unwrap();
        let after_one = store.get_incomplete_todos(date).await.unwrap();

        store.complete_todo(id).await.unwrap();
        let after_two = store.get_incomplete_todos(date).await.unwrap();

        assert_eq!(after_one.len(), after_two.len());
        assert!(after_two.is_empty());
    }

    #[tokio::test]
    async fn complete_nonexistent_todo_is_silent_noop() {
        let store = test_store().await;
        let date = day(2025, 6, 22);
        store.store_todo(date, "unrelated").await.unwrap();

        store.complete_todo(999_999).await.unwrap();

        let todos = store.get_incomplete_todos(date).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "unrelated");
    }

    #[tokio::test]
    async fn empty_todo_text_is_stored() {
        let store = test_store().await;
        let date = day(2025, 6, 22);

        store.store_todo(date, "").await.unwrap();

        let todos = store.get_incomplete_todos(date).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "");
    }

    #[tokio::test]
    async fn todos_filtered_by_date() {
        let store = test_store().await;
        store.store_todo(day(2025, 6, 21), "old").await.unwrap();
        store.store_todo(day(2025, 6, 22), "new").await.unwrap();

        let todos = store.get_incomplete_todos(day(2025, 6, 22)).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "new");
    }

    #[tokio::test]
    async fn schema_reopen_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = format!("sqlite://{}/tasks.db", dir.path().display());

        {
            let store = SqliteTaskStore::new(&path).await.unwrap();
            store.store_todo(day(2025, 6, 22), "persisted").await.unwrap();
        }

        // Second open re-runs migrations against the existing schema.
        let store = SqliteTaskStore::new(&path).await.unwrap();
        let todos = store.get_incomplete_todos(day(2025, 6, 22)).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "persisted");
    }
}
