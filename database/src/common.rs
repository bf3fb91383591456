use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use todo_core::{
    error::{Result, TodoError},
    models::TodoItem,
};

/// SQLite primary result codes (and their extended forms) that mean another
/// connection holds the lock
const BUSY_CODES: &[&str] = &["5", "6", "261", "262", "517", "773"];

/// Store an empty description as absent so "no description" and
/// "empty description" cannot diverge in the table
pub fn normalize_description(description: Option<&str>) -> Option<&str> {
    description.filter(|d| !d.is_empty())
}

/// Convert the completion flag to its INTEGER column representation
pub fn completed_to_int(completed: bool) -> i64 {
    i64::from(completed)
}

/// Convert SQLite row to TodoItem model
pub fn row_to_todo(row: &SqliteRow) -> Result<TodoItem> {
    let completed: i64 = row.try_get("completed").map_err(decode_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(decode_error)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(decode_error)?;

    Ok(TodoItem {
        id: row.try_get("id").map_err(decode_error)?,
        title: row.try_get("title").map_err(decode_error)?,
        description: row.try_get("description").map_err(decode_error)?,
        completed: completed != 0,
        created_at,
        updated_at,
    })
}

fn decode_error(err: sqlx::Error) -> TodoError {
    TodoError::Database(format!("Failed to decode todo row: {err}"))
}

/// Convert SQLx error to TodoError
///
/// Lock contention and pool exhaustion become [`TodoError::Busy`]; everything
/// else is an opaque [`TodoError::Database`] carrying the driver message.
pub fn sqlx_error_to_todo_error(err: sqlx::Error) -> TodoError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().unwrap_or_default();
            let message = db_err.message();

            if BUSY_CODES.contains(&code.as_ref()) || message.contains("database is locked") {
                TodoError::Busy(message.to_string())
            } else if message.contains("constraint failed") {
                TodoError::Database(format!("Database constraint error: {message}"))
            } else {
                TodoError::Database(format!("Database error ({code}): {message}"))
            }
        }
        sqlx::Error::RowNotFound => {
            // Lookups use fetch_optional; reaching this is a query bug
            TodoError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => TodoError::Busy("Connection pool timeout".to_string()),
        sqlx::Error::PoolClosed => TodoError::Database("Connection pool closed".to_string()),
        sqlx::Error::Io(io_err) => TodoError::Database(format!("Database I/O error: {io_err}")),
        _ => TodoError::Database(format!("Database operation failed: {err}")),
    }
}
