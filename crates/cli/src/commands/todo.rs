//! `daybrief todo` — List, add, and complete todos.

use clap::Subcommand;

use super::{build_runtime, parse_date};
use daybrief_core::store::TaskStore;

#[derive(Subcommand)]
pub enum TodoAction {
    /// List incomplete todos
    List {
        /// Date in YYYY-MM-DD format (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Add a todo
    Add {
        /// The todo text
        text: String,

        /// Date in YYYY-MM-DD format (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Mark a todo as complete
    Done {
        /// The todo id (shown by `todo list`)
        id: i64,
    },
}

pub async fn run(action: TodoAction) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = build_runtime().await?;
    let store = runtime.store;

    match action {
        TodoAction::List { date } => {
            let date = parse_date(date.as_deref())?;
            let todos = store.get_incomplete_todos(date).await?;
            if todos.is_empty() {
                println!("No incomplete todos for {date}.");
            } else {
                println!("Incomplete todos for {date}:");
                for todo in todos {
                    println!("  [{}] {}", todo.id, todo.text);
                }
            }
        }
        TodoAction::Add { text, date } => {
            let date = parse_date(date.as_deref())?;
            let id = store.store_todo(date, &text).await?;
            println!("Added todo [{id}] for {date}.");
        }
        TodoAction::Done { id } => {
            // Idempotent at the store: unknown ids are a no-op.
            store.complete_todo(id).await?;
            println!("Marked todo [{id}] as complete.");
        }
    }

    Ok(())
}
