use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single persisted todo record.
///
/// The store assigns `id`, `created_at` and `updated_at`. `created_at` never
/// changes after insertion; `updated_at` is refreshed by every mutation,
/// toggles included, so `updated_at >= created_at` always holds.
///
/// # Examples
///
/// ```rust
/// use todo_core::models::TodoItem;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let todo = TodoItem {
///     id: 1,
///     title: "Buy milk".to_string(),
///     description: None,
///     completed: false,
///     created_at: now,
///     updated_at: now,
/// };
///
/// assert!(!todo.has_description());
/// assert!(!todo.is_modified());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    /// Auto-increment primary key
    pub id: i64,
    /// Short title, 1-200 characters
    pub title: String,
    /// Optional details; `None` is distinct from an empty string
    pub description: Option<String>,
    /// Completion flag
    pub completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl TodoItem {
    /// Whether a description is present
    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    /// Whether the todo was mutated after creation
    pub fn is_modified(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Data transfer object for creating new todos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }
}

/// Full replacement of a todo's mutable fields.
///
/// Unlike a patch, every field is written: a `None` description clears the
/// stored one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
}

impl UpdateTodo {
    pub fn new(title: impl Into<String>, description: Option<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            description,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> TodoItem {
        let now = Utc::now();
        TodoItem {
            id: 1,
            title: "Buy milk".to_string(),
            description: Some("two liters".to_string()),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_is_modified() {
        let mut todo = sample();
        assert!(!todo.is_modified());

        todo.updated_at = todo.created_at + Duration::milliseconds(5);
        assert!(todo.is_modified());
    }

    #[test]
    fn test_new_todo_description_defaults_to_none() {
        let new_todo: NewTodo = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        assert_eq!(new_todo, NewTodo::new("Buy milk", None));
    }

    #[test]
    fn test_update_todo_requires_completed() {
        let result: std::result::Result<UpdateTodo, _> =
            serde_json::from_str(r#"{"title":"Buy milk"}"#);
        assert!(result.is_err());
    }
}
