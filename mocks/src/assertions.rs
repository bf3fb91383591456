//! Custom assertion helpers for testing

use todo_core::{NewTodo, TodoItem};

/// Assert todos are equal ignoring timestamps
pub fn assert_todo_equals(actual: &TodoItem, expected: &TodoItem) {
    assert_eq!(actual.id, expected.id, "Todo IDs don't match");
    assert_eq!(actual.title, expected.title, "Todo titles don't match");
    assert_eq!(
        actual.description, expected.description,
        "Todo descriptions don't match"
    );
    assert_eq!(
        actual.completed, expected.completed,
        "Todo completion flags don't match"
    );
}

/// Assert a stored todo reflects the input it was created from
///
/// An empty input description must come back as absent.
pub fn assert_todo_matches(todo: &TodoItem, input: &NewTodo) {
    assert_eq!(todo.title, input.title, "Todo title doesn't match input");
    let expected = input.description.as_deref().filter(|d| !d.is_empty());
    assert_eq!(
        todo.description.as_deref(),
        expected,
        "Todo description doesn't match input"
    );
    assert!(!todo.completed, "New todo should not be completed");
    assert_eq!(
        todo.created_at, todo.updated_at,
        "New todo should have equal timestamps"
    );
}

/// Assert todos are ordered by creation time descending, ties by ID descending
pub fn assert_sorted_newest_first(todos: &[TodoItem]) {
    for pair in todos.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            (a.created_at, a.id) > (b.created_at, b.id),
            "Todos not sorted newest first: {} ({}) before {} ({})",
            a.id,
            a.created_at,
            b.id,
            b.created_at
        );
    }
}

/// Assert every todo has the given completion flag
pub fn assert_all_completed(todos: &[TodoItem], completed: bool) {
    for todo in todos {
        assert_eq!(
            todo.completed, completed,
            "Todo {} has completed={}, expected {}",
            todo.id, todo.completed, completed
        );
    }
}

/// Assert the collection contains a todo with the given ID
pub fn assert_contains_todo(todos: &[TodoItem], id: i64) {
    assert!(
        todos.iter().any(|t| t.id == id),
        "Todo {} not found in {:?}",
        id,
        todos.iter().map(|t| t.id).collect::<Vec<_>>()
    );
}

/// Assert the collection does not contain a todo with the given ID
pub fn assert_not_contains_todo(todos: &[TodoItem], id: i64) {
    assert!(
        !todos.iter().any(|t| t.id == id),
        "Todo {id} unexpectedly present"
    );
}
