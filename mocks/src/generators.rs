//! Random test data generators using the fake crate
//!
//! Also provides proptest strategies for inputs the service accepts.

use chrono::{Duration, Utc};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use todo_core::{NewTodo, TodoItem, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};

fn truncate_chars(text: String, max: usize) -> String {
    if text.chars().count() <= max {
        text
    } else {
        text.chars().take(max).collect()
    }
}

/// Generate a realistic todo title
pub fn generate_title() -> String {
    truncate_chars(Sentence(2..6).fake(), MAX_TITLE_LENGTH)
}

/// Generate a realistic todo description
pub fn generate_description() -> String {
    truncate_chars(Paragraph(1..3).fake(), MAX_DESCRIPTION_LENGTH)
}

/// Generate a valid NewTodo, with a description about half of the time
pub fn generate_new_todo() -> NewTodo {
    let description = rand::thread_rng()
        .gen_bool(0.5)
        .then(generate_description);
    NewTodo::new(generate_title(), description)
}

/// Generate a random stored todo with the given ID
pub fn generate_random_todo(id: i64) -> TodoItem {
    let mut rng = rand::thread_rng();
    let age_minutes: i64 = rng.gen_range(1..10_000);
    let created_at = Utc::now() - Duration::minutes(age_minutes);
    let new_todo = generate_new_todo();

    TodoItem {
        id,
        title: new_todo.title,
        description: new_todo.description,
        completed: rng.gen_bool(0.3),
        created_at,
        updated_at: created_at + Duration::minutes(rng.gen_range(0..age_minutes)),
    }
}

/// Generate `count` random todos with IDs starting at 1
pub fn generate_random_todos(count: usize) -> Vec<TodoItem> {
    (1..=count as i64).map(generate_random_todo).collect()
}

/// Titles that pass validation
pub fn valid_title() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{1,200}"
}

/// Optional descriptions that pass validation, including the empty string
pub fn valid_description() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Za-z0-9 .,!?]{0,1000}")
}

/// Titles that fail validation: blank or over the length limit
pub fn invalid_title() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{201,260}",
    ]
}

/// NewTodo values that pass validation
pub fn new_todo_strategy() -> impl Strategy<Value = NewTodo> {
    (valid_title(), valid_description()).prop_map(|(title, description)| NewTodo {
        title,
        description,
    })
}
