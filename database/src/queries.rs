//! SQL statements over the `todos` table.
//!
//! Every function takes any SQLite executor, so the same statement runs
//! against a pool or inside a transaction (`&mut *tx`).

use sqlx::{Executor, Sqlite};
use todo_core::{
    error::Result,
    models::{NewTodo, TodoItem, UpdateTodo},
};

use crate::common::{
    completed_to_int, normalize_description, row_to_todo, sqlx_error_to_todo_error,
};

const GET_TODO: &str = "SELECT id, title, description, completed, created_at, updated_at \
     FROM todos WHERE id = ?";

const LIST_TODOS: &str = "SELECT id, title, description, completed, created_at, updated_at \
     FROM todos ORDER BY created_at DESC, id DESC";

const LIST_TODOS_BY_COMPLETION: &str =
    "SELECT id, title, description, completed, created_at, updated_at \
     FROM todos WHERE completed = ? ORDER BY created_at DESC, id DESC";

// created_at and updated_at come from the column defaults
const CREATE_TODO: &str = "INSERT INTO todos (title, description, completed) VALUES (?, ?, 0) \
     RETURNING id, title, description, completed, created_at, updated_at";

// Mutations move updated_at forward by at least one millisecond, even when
// the clock has not ticked since the previous write.
const UPDATE_TODO: &str = "UPDATE todos \
     SET title = ?, description = ?, completed = ?, \
         updated_at = max(strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), \
                          strftime('%Y-%m-%dT%H:%M:%fZ', updated_at, '+0.001 seconds')) \
     WHERE id = ? \
     RETURNING id, title, description, completed, created_at, updated_at";

const DELETE_TODO: &str = "DELETE FROM todos WHERE id = ?";

const TOGGLE_TODO_COMPLETED: &str = "UPDATE todos \
     SET completed = NOT completed, \
         updated_at = max(strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), \
                          strftime('%Y-%m-%dT%H:%M:%fZ', updated_at, '+0.001 seconds')) \
     WHERE id = ? \
     RETURNING id, title, description, completed, created_at, updated_at";

pub(crate) async fn get_todo<'e, E>(executor: E, id: i64) -> Result<Option<TodoItem>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(GET_TODO)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(sqlx_error_to_todo_error)?;

    row.as_ref().map(row_to_todo).transpose()
}

pub(crate) async fn list_todos<'e, E>(executor: E) -> Result<Vec<TodoItem>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(LIST_TODOS)
        .fetch_all(executor)
        .await
        .map_err(sqlx_error_to_todo_error)?;

    rows.iter().map(row_to_todo).collect()
}

pub(crate) async fn list_todos_by_completion<'e, E>(
    executor: E,
    completed: bool,
) -> Result<Vec<TodoItem>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(LIST_TODOS_BY_COMPLETION)
        .bind(completed_to_int(completed))
        .fetch_all(executor)
        .await
        .map_err(sqlx_error_to_todo_error)?;

    rows.iter().map(row_to_todo).collect()
}

pub(crate) async fn create_todo<'e, E>(executor: E, todo: &NewTodo) -> Result<TodoItem>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(CREATE_TODO)
        .bind(&todo.title)
        .bind(normalize_description(todo.description.as_deref()))
        .fetch_one(executor)
        .await
        .map_err(sqlx_error_to_todo_error)?;

    row_to_todo(&row)
}

pub(crate) async fn update_todo<'e, E>(
    executor: E,
    id: i64,
    changes: &UpdateTodo,
) -> Result<Option<TodoItem>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(UPDATE_TODO)
        .bind(&changes.title)
        .bind(normalize_description(changes.description.as_deref()))
        .bind(completed_to_int(changes.completed))
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(sqlx_error_to_todo_error)?;

    row.as_ref().map(row_to_todo).transpose()
}

/// Returns the number of rows removed (0 or 1)
pub(crate) async fn delete_todo<'e, E>(executor: E, id: i64) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(DELETE_TODO)
        .bind(id)
        .execute(executor)
        .await
        .map_err(sqlx_error_to_todo_error)?;

    Ok(result.rows_affected())
}

pub(crate) async fn toggle_todo_completed<'e, E>(executor: E, id: i64) -> Result<Option<TodoItem>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(TOGGLE_TODO_COMPLETED)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(sqlx_error_to_todo_error)?;

    row.as_ref().map(row_to_todo).transpose()
}
