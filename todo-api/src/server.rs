//! HTTP server for the todo API
//!
//! Routes:
//! - `GET /todos`, `POST /todos`
//! - `GET /todos/:id`, `PUT /todos/:id`, `DELETE /todos/:id`
//! - `POST /todos/:id/toggle`
//! - `GET /health`, exempt from authorization

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::{future::Future, sync::Arc, time::Duration};
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::{
    auth::{authorization_middleware, TodoAuth},
    error::ApiError,
    handler::TodoHandler,
    request_logger::request_logging_middleware,
    serialization::{DeleteTodoResponse, TodoListResponse, TodoResponse},
};
use todo_core::{
    CreateTodoParams, ListTodosParams, TodoRepository, UpdateTodoParams, ValidateParams,
};

/// Per-server settings applied as router layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerOptions {
    /// Deadline for a whole request; exceeded requests get 408
    pub request_timeout: Duration,
    /// Reject `/todos` requests lacking an `Authorization` header
    pub require_authorization: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
            require_authorization: true,
        }
    }
}

/// Shared server state for route handlers
pub struct TodoServerState<R> {
    pub handler: TodoHandler<R>,
}

type SharedState<R> = Arc<TodoServerState<R>>;

/// Todo HTTP server
pub struct TodoServer<R> {
    handler: TodoHandler<R>,
    options: ServerOptions,
}

impl<R: TodoRepository + 'static> TodoServer<R> {
    pub fn new(repository: Arc<R>, options: ServerOptions) -> Self {
        Self {
            handler: TodoHandler::new(repository),
            options,
        }
    }

    pub fn options(&self) -> ServerOptions {
        self.options
    }

    /// Serve until the process is killed
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        self.serve_with_shutdown(addr, std::future::pending()).await
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests
    pub async fn serve_with_shutdown<F>(self, addr: &str, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}"))?;

        info!("Todo server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }

    /// Create the router with all endpoints and layers
    pub fn router(&self) -> Router {
        let state: SharedState<R> = Arc::new(TodoServerState {
            handler: self.handler.clone(),
        });
        let auth = TodoAuth::new(self.options.require_authorization);

        let todos = Router::new()
            .route("/todos", get(list_todos::<R>).post(create_todo::<R>))
            .route(
                "/todos/:id",
                get(get_todo::<R>)
                    .put(update_todo::<R>)
                    .delete(delete_todo::<R>),
            )
            .route("/todos/:id/toggle", post(toggle_todo::<R>))
            .route_layer(middleware::from_fn_with_state(
                auth,
                authorization_middleware,
            ));

        Router::new()
            .merge(todos)
            .route("/health", get(health::<R>))
            .layer(TimeoutLayer::new(self.options.request_timeout))
            .layer(middleware::from_fn(request_logging_middleware))
            .with_state(state)
    }
}

async fn list_todos<R: TodoRepository + 'static>(
    State(state): State<SharedState<R>>,
    query: Result<Query<ListTodosParams>, QueryRejection>,
) -> Result<Json<TodoListResponse>, ApiError> {
    let Query(params) = query?;
    params.validate()?;
    Ok(Json(state.handler.list_todos(params).await?))
}

async fn get_todo<R: TodoRepository + 'static>(
    State(state): State<SharedState<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let Path(id) = path?;
    Ok(Json(state.handler.get_todo(id).await?))
}

async fn create_todo<R: TodoRepository + 'static>(
    State(state): State<SharedState<R>>,
    payload: Result<Json<CreateTodoParams>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let Json(params) = payload?;
    params.validate()?;
    let todo = state.handler.create_todo(params).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo<R: TodoRepository + 'static>(
    State(state): State<SharedState<R>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTodoParams>, JsonRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let Path(id) = path?;
    let Json(params) = payload?;
    params.validate()?;
    Ok(Json(state.handler.update_todo(id, params).await?))
}

async fn delete_todo<R: TodoRepository + 'static>(
    State(state): State<SharedState<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteTodoResponse>, ApiError> {
    let Path(id) = path?;
    Ok(Json(state.handler.delete_todo(id).await?))
}

async fn toggle_todo<R: TodoRepository + 'static>(
    State(state): State<SharedState<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let Path(id) = path?;
    Ok(Json(state.handler.toggle_todo(id).await?))
}

async fn health<R: TodoRepository + 'static>(State(state): State<SharedState<R>>) -> Response {
    match state.handler.health_check().await {
        Ok(()) => (StatusCode::OK, "OK").into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable").into_response(),
    }
}
