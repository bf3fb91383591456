use thiserror::Error;

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Error types for the todo service.
///
/// These cover every failure mode of the persistence layer and the input
/// binding layer. Each variant maps to the HTTP status code the API reports
/// for it.
///
/// # Examples
///
/// ```rust
/// use todo_core::error::TodoError;
///
/// let not_found = TodoError::not_found_id(42);
/// assert!(not_found.is_not_found());
/// assert_eq!(not_found.status_code(), 404);
///
/// let busy = TodoError::Busy("database is locked".to_string());
/// assert!(busy.is_transient());
/// assert_eq!(busy.status_code(), 500);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No todo exists with the given ID
    #[error("Todo not found: {0}")]
    NotFound(i64),

    /// Input rejected before reaching persistence
    #[error("Validation error: {0}")]
    Validation(String),

    /// Store is locked by another writer or the pool is exhausted
    #[error("Database busy: {0}")]
    Busy(String),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    /// Create a not found error for a todo ID
    pub fn not_found_id(id: i64) -> Self {
        Self::NotFound(id)
    }

    /// Create a validation error for an empty field
    pub fn empty_field(field: &str) -> Self {
        Self::Validation(format!("Field '{field}' cannot be empty"))
    }

    /// Create a validation error for a field exceeding its maximum length
    pub fn too_long(field: &str, max: usize) -> Self {
        Self::Validation(format!(
            "Field '{field}' must be at most {max} characters long"
        ))
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation(_))
    }

    /// Check if this error indicates a database problem
    pub fn is_database(&self) -> bool {
        matches!(self, TodoError::Database(_) | TodoError::Busy(_))
    }

    /// Check if retrying later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, TodoError::Busy(_))
    }

    /// Convert to appropriate HTTP status code equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::NotFound(_) => 404,
            TodoError::Validation(_) => 422,
            TodoError::Busy(_) => 500,
            TodoError::Database(_) => 500,
            TodoError::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = TodoError::not_found_id(42);
        assert_eq!(error, TodoError::NotFound(42));
        assert!(error.is_not_found());
        assert_eq!(error.status_code(), 404);

        let error = TodoError::empty_field("title");
        assert!(error.is_validation());
        assert_eq!(error.status_code(), 422);

        let error = TodoError::too_long("description", 1000);
        assert_eq!(
            error,
            TodoError::Validation(
                "Field 'description' must be at most 1000 characters long".to_string()
            )
        );
    }

    #[test]
    fn test_error_display() {
        let error = TodoError::NotFound(7);
        assert_eq!(format!("{error}"), "Todo not found: 7");

        let error = TodoError::Validation("Invalid input".to_string());
        assert_eq!(format!("{error}"), "Validation error: Invalid input");

        let error = TodoError::Busy("database is locked".to_string());
        assert_eq!(format!("{error}"), "Database busy: database is locked");
    }

    #[test]
    fn test_error_predicates() {
        assert!(TodoError::NotFound(1).is_not_found());
        assert!(!TodoError::Validation("test".to_string()).is_not_found());

        assert!(TodoError::Database("test".to_string()).is_database());
        assert!(TodoError::Busy("test".to_string()).is_database());
        assert!(!TodoError::Internal("test".to_string()).is_database());

        assert!(TodoError::Busy("test".to_string()).is_transient());
        assert!(!TodoError::Database("test".to_string()).is_transient());
    }
}
