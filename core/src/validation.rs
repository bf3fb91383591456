use crate::{
    error::{Result, TodoError},
    models::{NewTodo, UpdateTodo},
};

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Validation utilities for todo input
///
/// Lengths are counted in Unicode scalar values, not bytes.
pub struct TodoValidator;

impl TodoValidator {
    /// Validate a todo title
    ///
    /// Titles must:
    /// - Be at least one character long (whitespace counts)
    /// - Be at most 200 characters long
    pub fn validate_title(title: &str) -> Result<()> {
        if title.is_empty() {
            return Err(TodoError::empty_field("title"));
        }

        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(TodoError::too_long("title", MAX_TITLE_LENGTH));
        }

        Ok(())
    }

    /// Validate an optional description
    ///
    /// An empty description is accepted; it is stored as absent.
    pub fn validate_description(description: Option<&str>) -> Result<()> {
        if let Some(description) = description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(TodoError::too_long("description", MAX_DESCRIPTION_LENGTH));
            }
        }

        Ok(())
    }

    /// Validate all fields of a new todo
    pub fn validate_new_todo(todo: &NewTodo) -> Result<()> {
        Self::validate_title(&todo.title)?;
        Self::validate_description(todo.description.as_deref())
    }

    /// Validate all fields of an update
    pub fn validate_update_todo(update: &UpdateTodo) -> Result<()> {
        Self::validate_title(&update.title)?;
        Self::validate_description(update.description.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_titles() {
        assert!(TodoValidator::validate_title("Buy milk").is_ok());
        assert!(TodoValidator::validate_title("a").is_ok());
        assert!(TodoValidator::validate_title(&"x".repeat(200)).is_ok());
        assert!(TodoValidator::validate_title(" ").is_ok());
        assert!(TodoValidator::validate_title("\t\n").is_ok());
        // Multi-byte characters count once
        assert!(TodoValidator::validate_title(&"買".repeat(200)).is_ok());
    }

    #[test]
    fn test_invalid_titles() {
        assert_eq!(
            TodoValidator::validate_title(""),
            Err(TodoError::empty_field("title"))
        );
        assert_eq!(
            TodoValidator::validate_title(&"x".repeat(201)),
            Err(TodoError::too_long("title", 200))
        );
    }

    #[test]
    fn test_descriptions() {
        assert!(TodoValidator::validate_description(None).is_ok());
        assert!(TodoValidator::validate_description(Some("")).is_ok());
        assert!(TodoValidator::validate_description(Some(&"d".repeat(1000))).is_ok());
        assert!(TodoValidator::validate_description(Some(&"d".repeat(1001))).is_err());
    }

    #[test]
    fn test_validate_new_and_update() {
        let valid = NewTodo::new("Buy milk", Some("urgent".to_string()));
        assert!(TodoValidator::validate_new_todo(&valid).is_ok());

        let invalid = NewTodo::new("", None);
        assert!(TodoValidator::validate_new_todo(&invalid).unwrap_err().is_validation());

        let update = UpdateTodo::new("Buy eggs", Some("e".repeat(1001)), true);
        assert!(TodoValidator::validate_update_todo(&update).is_err());
    }
}
