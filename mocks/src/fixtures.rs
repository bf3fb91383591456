//! Standard test fixtures for consistent testing
//!
//! Provides pre-built test data including:
//! - Standard todos, open and completed
//! - Edge cases around the validation limits
//! - Batches with distinct creation times

use chrono::{Duration, Utc};
use todo_core::{NewTodo, TodoItem, UpdateTodo, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};

/// Create a basic test todo with sensible defaults
pub fn create_test_todo() -> TodoItem {
    let now = Utc::now();
    TodoItem {
        id: 1,
        title: "Test Todo".to_string(),
        description: Some("A standard test todo with default values".to_string()),
        completed: false,
        created_at: now,
        updated_at: now,
    }
}

/// Create a completed todo
pub fn create_completed_todo() -> TodoItem {
    let mut todo = create_test_todo();
    todo.completed = true;
    todo.updated_at = todo.created_at + Duration::seconds(1);
    todo
}

/// Create a todo without a description
pub fn create_todo_without_description() -> TodoItem {
    let mut todo = create_test_todo();
    todo.description = None;
    todo
}

/// Create `count` todos with ids `1..=count`, each created one second after
/// the previous one
pub fn create_todo_batch(count: usize) -> Vec<TodoItem> {
    let start = Utc::now() - Duration::seconds(count as i64);
    (1..=count)
        .map(|n| {
            let created_at = start + Duration::seconds(n as i64);
            TodoItem {
                id: n as i64,
                title: format!("Batch todo {n}"),
                description: None,
                completed: n % 2 == 0,
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}

/// Create a basic NewTodo for testing
pub fn create_test_new_todo() -> NewTodo {
    NewTodo::new("New Test Todo", Some("A new todo for testing".to_string()))
}

/// Create a full replacement for testing updates
pub fn create_test_update_todo() -> UpdateTodo {
    UpdateTodo::new("Updated Todo", Some("Updated description".to_string()), true)
}

/// Title of exactly the maximum accepted length
pub fn max_length_title() -> String {
    "t".repeat(MAX_TITLE_LENGTH)
}

/// Description of exactly the maximum accepted length
pub fn max_length_description() -> String {
    "d".repeat(MAX_DESCRIPTION_LENGTH)
}

/// Inputs that validation must reject
pub fn invalid_new_todos() -> Vec<NewTodo> {
    vec![
        NewTodo::new("", None),
        NewTodo::new("t".repeat(MAX_TITLE_LENGTH + 1), None),
        NewTodo::new("Fine", Some("d".repeat(MAX_DESCRIPTION_LENGTH + 1))),
    ]
}

/// Titles that are valid but unusual
pub fn edge_case_titles() -> Vec<String> {
    vec![
        "a".to_string(),
        " ".to_string(),
        "Café ☕ at 9".to_string(),
        "Quotes \"and\" 'apostrophes'".to_string(),
        "Robert'); DROP TABLE todos;--".to_string(),
        max_length_title(),
    ]
}
