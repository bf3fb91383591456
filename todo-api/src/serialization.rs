//! Response shapes for the HTTP API
//!
//! Handles conversion between internal TodoItem values and their JSON form.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use todo_core::TodoItem;

/// A todo as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&TodoItem> for TodoResponse {
    fn from(todo: &TodoItem) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            created_at: format_timestamp(&todo.created_at),
            updated_at: format_timestamp(&todo.updated_at),
        }
    }
}

impl From<TodoItem> for TodoResponse {
    fn from(todo: TodoItem) -> Self {
        Self {
            created_at: format_timestamp(&todo.created_at),
            updated_at: format_timestamp(&todo.updated_at),
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
        }
    }
}

/// Body of `GET /todos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoListResponse {
    pub todos: Vec<TodoResponse>,
}

impl From<Vec<TodoItem>> for TodoListResponse {
    fn from(todos: Vec<TodoItem>) -> Self {
        Self {
            todos: todos.into_iter().map(TodoResponse::from).collect(),
        }
    }
}

/// Body of a successful `DELETE /todos/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteTodoResponse {
    pub message: String,
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2024-01-01T00:00:00.750Z`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
