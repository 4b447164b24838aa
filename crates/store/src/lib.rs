//! Task store implementations for daybrief.

pub mod sqlite;

pub use sqlite::SqliteTaskStore;
