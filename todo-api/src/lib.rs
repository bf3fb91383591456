//! HTTP API for the todo service
//!
//! This crate is the bridge between the core persistence traits and HTTP
//! clients. It provides:
//!
//! - [`TodoHandler`], which turns repository results into API outcomes
//! - [`ApiError`], rendered as `{"status", "title", "detail"}` JSON
//! - Response shapes with RFC 3339 timestamps
//! - The axum router, with authorization, timeout and request logging layers
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_api::{ServerOptions, TodoServer};
//!
//! # async fn start(repository: Arc<database::SqliteTodoRepository>) -> anyhow::Result<()> {
//! let server = TodoServer::new(repository, ServerOptions::default());
//! server.serve("127.0.0.1:8888").await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod handler;
pub mod request_logger;
pub mod serialization;
pub mod server;

pub use auth::TodoAuth;
pub use error::{ApiError, ProblemDetails};
pub use handler::{TodoHandler, DELETE_SUCCESS_MESSAGE};
pub use serialization::{DeleteTodoResponse, TodoListResponse, TodoResponse};
pub use server::{ServerOptions, TodoServer};

// Re-export core types for external consumers
pub use todo_core::{
    CreateTodoParams, ListTodosParams, TodoError, TodoItem, TodoRepository, UpdateTodoParams,
};
