//! Builder pattern implementations for easy test data construction

use chrono::{DateTime, Utc};
use todo_core::{NewTodo, TodoItem, UpdateTodo};

/// Builder for constructing TodoItem instances in tests
pub struct TodoBuilder {
    todo: TodoItem,
}

impl Default for TodoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoBuilder {
    /// Create new builder with default values
    pub fn new() -> Self {
        Self {
            todo: crate::fixtures::create_test_todo(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.todo.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.todo.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.todo.description = Some(description.into());
        self
    }

    pub fn without_description(mut self) -> Self {
        self.todo.description = None;
        self
    }

    pub fn completed(mut self) -> Self {
        self.todo.completed = true;
        self
    }

    /// Set both timestamps
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.todo.created_at = at;
        self.todo.updated_at = at;
        self
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.todo.updated_at = at;
        self
    }

    pub fn build(self) -> TodoItem {
        self.todo
    }
}

/// Builder for NewTodo
pub struct NewTodoBuilder {
    todo: NewTodo,
}

impl Default for NewTodoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewTodoBuilder {
    pub fn new() -> Self {
        Self {
            todo: crate::fixtures::create_test_new_todo(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.todo.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.todo.description = Some(description.into());
        self
    }

    pub fn without_description(mut self) -> Self {
        self.todo.description = None;
        self
    }

    pub fn build(self) -> NewTodo {
        self.todo
    }
}

/// Builder for UpdateTodo
///
/// Starts from the values of an existing todo so a test only has to name
/// the field it changes.
pub struct UpdateTodoBuilder {
    update: UpdateTodo,
}

impl UpdateTodoBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            update: UpdateTodo::new(title, None, false),
        }
    }

    pub fn from_todo(todo: &TodoItem) -> Self {
        Self {
            update: UpdateTodo::new(todo.title.clone(), todo.description.clone(), todo.completed),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.update.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.update.description = Some(description.into());
        self
    }

    pub fn without_description(mut self) -> Self {
        self.update.description = None;
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.update.completed = completed;
        self
    }

    pub fn build(self) -> UpdateTodo {
        self.update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_builder() {
        let todo = TodoBuilder::new()
            .with_id(7)
            .with_title("Groceries")
            .without_description()
            .completed()
            .build();

        assert_eq!(todo.id, 7);
        assert_eq!(todo.title, "Groceries");
        assert!(todo.description.is_none());
        assert!(todo.completed);
    }

    #[test]
    fn test_update_builder_from_todo() {
        let todo = TodoBuilder::new().with_title("Original").build();
        let update = UpdateTodoBuilder::from_todo(&todo).completed(true).build();

        assert_eq!(update.title, "Original");
        assert_eq!(update.description, todo.description);
        assert!(update.completed);
    }
}
