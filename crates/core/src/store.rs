//! Task store trait — durable state for briefings and todos.
//!
//! The store exclusively owns `Briefing` and `Todo` persistence. Every
//! operation runs in its own transaction; no call spans multiple writes
//! that must be atomic together, so no cross-call locking exists.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StoreError;
use crate::record::Todo;

/// The core TaskStore trait.
///
/// Implementations: SQLite (production), in-memory (tests).
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Append a briefing row for the date.
    ///
    /// Does not check for an existing entry: calling twice for the same
    /// date stores two rows. Deliberately permissive — the extra rows act
    /// as an audit trail of regenerations.
    async fn store_briefing(&self, date: NaiveDate, summary: &str) -> Result<(), StoreError>;

    /// The stored briefing for the date, if any. With duplicates present,
    /// the earliest row wins.
    async fn get_briefing(&self, date: NaiveDate) -> Result<Option<String>, StoreError>;

    /// Store a new todo for the date; returns the store-assigned id.
    async fn store_todo(&self, date: NaiveDate, text: &str) -> Result<i64, StoreError>;

    /// All incomplete todos for the date, in insertion order.
    async fn get_incomplete_todos(&self, date: NaiveDate) -> Result<Vec<Todo>, StoreError>;

    /// Mark a todo completed. Idempotent: completing an already-completed
    /// or nonexistent id is a silent no-op.
    async fn complete_todo(&self, id: i64) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_object_safe() {
        fn _takes_store(_: &dyn TaskStore) {}
    }
}
