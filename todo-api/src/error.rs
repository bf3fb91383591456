//! Error handling for the HTTP API
//!
//! Maps core errors onto HTTP status codes and a problem-details JSON body.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use todo_core::TodoError;

/// API errors returned by handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Todo not found: {0}")]
    NotFound(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Authorization header required")]
    Unauthorized,

    /// Server-side failure; `message` is all the client sees
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: TodoError,
    },
}

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    pub status: u16,
    pub title: String,
    pub detail: String,
}

impl ApiError {
    /// Build a server error that hides `source` from the client
    pub fn internal(message: impl Into<String>, source: TodoError) -> Self {
        ApiError::Internal {
            message: message.into(),
            source,
        }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing detail message
    pub fn detail(&self) -> String {
        match self {
            ApiError::NotFound(_) | ApiError::Unauthorized => self.to_string(),
            ApiError::Validation(msg) | ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Internal { message, .. } => message.clone(),
        }
    }

    /// Problem-details body for this error
    pub fn to_problem(&self) -> ProblemDetails {
        let status = self.status_code();
        ProblemDetails {
            status: status.as_u16(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            detail: self.detail(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_problem())).into_response()
    }
}

/// Convert from TodoError to ApiError
///
/// Storage failures become an opaque internal error; handlers that know the
/// operation use [`ApiError::internal`] with a specific message instead.
impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(id) => ApiError::NotFound(id),
            TodoError::Validation(msg) => ApiError::Validation(msg),
            other => ApiError::internal("Internal server error", other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON of the wrong shape, e.g. a missing title
            JsonRejection::JsonDataError(err) => ApiError::Validation(err.body_text()),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound(1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Validation("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::internal("Failed", TodoError::Busy("locked".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_detail_names_the_id() {
        let problem = ApiError::NotFound(4242).to_problem();
        assert_eq!(problem.status, 404);
        assert_eq!(problem.title, "Not Found");
        assert_eq!(problem.detail, "Todo not found: 4242");
    }

    #[test]
    fn test_from_todo_error() {
        assert!(matches!(
            ApiError::from(TodoError::NotFound(4)),
            ApiError::NotFound(4)
        ));
        assert!(matches!(
            ApiError::from(TodoError::empty_field("title")),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from(TodoError::Database("disk".into())),
            ApiError::Internal { .. }
        ));
    }

    #[test]
    fn test_internal_detail_is_opaque() {
        let error = ApiError::internal(
            "Failed to update todo",
            TodoError::Database("Database error (1): no such table: todos".into()),
        );
        let problem = error.to_problem();

        assert_eq!(problem.status, 500);
        assert_eq!(problem.title, "Internal Server Error");
        assert_eq!(problem.detail, "Failed to update todo");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[tokio::test]
    async fn test_unauthorized_body() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let problem: ProblemDetails = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            problem,
            ProblemDetails {
                status: 401,
                title: "Unauthorized".to_string(),
                detail: "Authorization header required".to_string(),
            }
        );
    }
}
