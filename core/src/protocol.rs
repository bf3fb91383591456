use serde::{Deserialize, Serialize};
use crate::{
    error::Result,
    models::{NewTodo, UpdateTodo},
    validation::TodoValidator,
};

/// Request body for creating a todo
///
/// Reuses the core [`NewTodo`] model so the API layer and the repository
/// share one shape.
pub type CreateTodoParams = NewTodo;

/// Request body for replacing a todo
pub type UpdateTodoParams = UpdateTodo;

/// Query parameters for listing todos
///
/// `completed` absent lists everything; present filters on that flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListTodosParams {
    #[serde(default)]
    pub completed: Option<bool>,
}

impl ListTodosParams {
    pub fn all() -> Self {
        Self { completed: None }
    }

    pub fn by_completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
        }
    }
}

/// Input checks run by the binding layer before any handler executes
pub trait ValidateParams {
    fn validate(&self) -> Result<()>;
}

impl ValidateParams for NewTodo {
    fn validate(&self) -> Result<()> {
        TodoValidator::validate_new_todo(self)
    }
}

impl ValidateParams for UpdateTodo {
    fn validate(&self) -> Result<()> {
        TodoValidator::validate_update_todo(self)
    }
}

impl ValidateParams for ListTodosParams {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
