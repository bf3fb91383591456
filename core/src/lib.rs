//! Todo Core Library
//!
//! This crate provides the domain model, error type and persistence traits
//! for the todo service. All other crates depend on the types and interfaces
//! defined here.
//!
//! # Architecture
//!
//! - [`models`] - The `TodoItem` entity and its input shapes
//! - [`error`] - Error types and result handling
//! - [`repository`] - Repository and transaction traits for persistence
//! - [`protocol`] - Request parameter types used by the HTTP layer
//! - [`validation`] - Input validation rules
//!
//! # Example
//!
//! ```rust
//! use todo_core::{models::NewTodo, validation::TodoValidator};
//!
//! let new_todo = NewTodo::new("Buy milk", Some("Two liters".to_string()));
//!
//! // Validate the todo before creation
//! TodoValidator::validate_new_todo(&new_todo).unwrap();
//! ```

pub mod error;
pub mod models;
pub mod protocol;
pub mod repository;
pub mod validation;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, TodoError};
pub use models::{NewTodo, TodoItem, UpdateTodo};
pub use protocol::{CreateTodoParams, ListTodosParams, UpdateTodoParams, ValidateParams};
pub use repository::{TodoRepository, TodoTransaction};
pub use validation::{TodoValidator, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
