//! SQLite persistence for the todo service
//!
//! This crate provides the SQLite implementation of the
//! [`TodoRepository`](todo_core::repository::TodoRepository) trait.
//!
//! # Features
//!
//! - WAL journal with a pooled reader and a single serialized writer
//! - Embedded migrations applied with [`SqliteTodoRepository::migrate`]
//! - Transactions that roll back when dropped
//! - Driver errors mapped onto `TodoError`, with lock contention reported as `Busy`
//!
//! # Usage
//!
//! ```rust
//! use database::SqliteTodoRepository;
//! use todo_core::{models::NewTodo, repository::TodoRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = SqliteTodoRepository::new(":memory:").await?;
//!     repo.migrate().await?;
//!
//!     let todo = repo.create(NewTodo::new("Buy milk", None)).await?;
//!     assert!(!todo.completed);
//!
//!     Ok(())
//! }
//! ```

mod common;
mod queries;
mod sqlite;

pub use sqlite::{
    is_memory_url, RepositoryOptions, SqliteTodoRepository, SqliteTodoTransaction,
};

// Re-export commonly used types from todo-core for convenience
pub use todo_core::{
    error::{Result, TodoError},
    models::{NewTodo, TodoItem, UpdateTodo},
    repository::{TodoRepository, TodoTransaction},
};
