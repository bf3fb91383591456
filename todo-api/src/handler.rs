//! Todo request handler
//!
//! Turns repository results into API outcomes. Mutations of existing rows
//! run inside a transaction, which is rolled back on every failure path.

use crate::error::ApiError;
use crate::serialization::{DeleteTodoResponse, TodoListResponse, TodoResponse};
use std::sync::Arc;
use todo_core::{
    CreateTodoParams, ListTodosParams, TodoError, TodoRepository, TodoTransaction,
    UpdateTodoParams,
};
use tracing::{debug, warn};

/// Confirmation returned by a successful delete
pub const DELETE_SUCCESS_MESSAGE: &str = "Todo deleted successfully";

/// Handler that bridges the HTTP routes with a TodoRepository
pub struct TodoHandler<R> {
    repository: Arc<R>,
}

impl<R> Clone for TodoHandler<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> TodoHandler<R> {
    /// Create new todo handler
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Get a clone of the repository Arc
    pub fn repository(&self) -> Arc<R> {
        Arc::clone(&self.repository)
    }
}

impl<R: TodoRepository> TodoHandler<R> {
    /// List todos, optionally filtered by completion state
    pub async fn list_todos(&self, params: ListTodosParams) -> Result<TodoListResponse, ApiError> {
        let todos = match params.completed {
            None => self.repository.list().await,
            Some(completed) => self.repository.list_by_completion(completed).await,
        }
        .map_err(|e| server_error("list", None, e))?;

        Ok(TodoListResponse::from(todos))
    }

    pub async fn get_todo(&self, id: i64) -> Result<TodoResponse, ApiError> {
        match self.repository.get(id).await {
            Ok(Some(todo)) => Ok(TodoResponse::from(todo)),
            Ok(None) => Err(ApiError::NotFound(id)),
            Err(e) => Err(server_error("get", Some(id), e)),
        }
    }

    /// Create a todo; a single insert, so no transaction
    pub async fn create_todo(&self, params: CreateTodoParams) -> Result<TodoResponse, ApiError> {
        let todo = self
            .repository
            .create(params)
            .await
            .map_err(|e| server_error("create", None, e))?;

        debug!(id = todo.id, "Created todo");
        Ok(TodoResponse::from(todo))
    }

    /// Replace all mutable fields of a todo
    pub async fn update_todo(
        &self,
        id: i64,
        params: UpdateTodoParams,
    ) -> Result<TodoResponse, ApiError> {
        let mut tx = self
            .repository
            .begin()
            .await
            .map_err(|e| server_error("update", Some(id), e))?;

        let todo = match tx.update(id, params).await {
            Ok(Some(todo)) => todo,
            Ok(None) => return Err(abort(tx, ApiError::NotFound(id)).await),
            Err(e) => return Err(abort(tx, server_error("update", Some(id), e)).await),
        };

        tx.commit()
            .await
            .map_err(|e| server_error("update", Some(id), e))?;

        Ok(TodoResponse::from(todo))
    }

    /// Delete a todo; deleting a missing ID also succeeds
    pub async fn delete_todo(&self, id: i64) -> Result<DeleteTodoResponse, ApiError> {
        let mut tx = self
            .repository
            .begin()
            .await
            .map_err(|e| server_error("delete", Some(id), e))?;

        if let Err(e) = tx.delete(id).await {
            return Err(abort(tx, server_error("delete", Some(id), e)).await);
        }

        tx.commit()
            .await
            .map_err(|e| server_error("delete", Some(id), e))?;

        Ok(DeleteTodoResponse {
            message: DELETE_SUCCESS_MESSAGE.to_string(),
        })
    }

    /// Flip the completion flag of a todo
    pub async fn toggle_todo(&self, id: i64) -> Result<TodoResponse, ApiError> {
        let mut tx = self
            .repository
            .begin()
            .await
            .map_err(|e| server_error("toggle", Some(id), e))?;

        let todo = match tx.toggle_completed(id).await {
            Ok(Some(todo)) => todo,
            Ok(None) => return Err(abort(tx, ApiError::NotFound(id)).await),
            Err(e) => return Err(abort(tx, server_error("toggle", Some(id), e)).await),
        };

        tx.commit()
            .await
            .map_err(|e| server_error("toggle", Some(id), e))?;

        Ok(TodoResponse::from(todo))
    }

    /// Check that the store answers queries
    pub async fn health_check(&self) -> Result<(), ApiError> {
        self.repository
            .health_check()
            .await
            .map_err(|e| server_error("health check", None, e))
    }
}

/// Log a storage failure and hide it behind a generic message
fn server_error(action: &str, id: Option<i64>, err: TodoError) -> ApiError {
    let message = match action {
        "list" => "Failed to list todos".to_string(),
        "health check" => "Health check failed".to_string(),
        _ => format!("Failed to {action} todo"),
    };
    warn!(id = ?id, error = %err, transient = err.is_transient(), "{message}");
    ApiError::internal(message, err)
}

/// Roll back explicitly and return the error that caused it
///
/// A failing rollback is only logged; the original error wins.
async fn abort<T: TodoTransaction>(tx: T, err: ApiError) -> ApiError {
    if let Err(rollback_err) = tx.rollback().await {
        debug!(error = %rollback_err, "Rollback failed");
    }
    err
}
