use async_trait::async_trait;
use crate::{
    error::Result,
    models::{NewTodo, TodoItem, UpdateTodo},
};

/// Repository trait for todo persistence and retrieval operations
///
/// Point lookups and conditional updates report a missing row as `Ok(None)`.
/// Deciding whether that is an error is left to the caller.
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Unit of work returned by [`TodoRepository::begin`]
    type Transaction: TodoTransaction + 'static;

    /// Begin a transaction scoped to a single request
    ///
    /// The transaction rolls back when dropped without a successful
    /// [`TodoTransaction::commit`].
    async fn begin(&self) -> Result<Self::Transaction>;

    /// Get a todo by its ID
    ///
    /// # Returns
    /// * `Ok(Some(TodoItem))` - The todo if found
    /// * `Ok(None)` - If no todo exists with that ID
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn get(&self, id: i64) -> Result<Option<TodoItem>>;

    /// List all todos, most recently created first
    async fn list(&self) -> Result<Vec<TodoItem>>;

    /// List todos with the given completion flag, most recently created first
    async fn list_by_completion(&self, completed: bool) -> Result<Vec<TodoItem>>;

    /// Create a new todo
    ///
    /// The todo starts with `completed = false`. The store assigns the ID and
    /// both timestamps. An empty description is stored as absent.
    ///
    /// # Returns
    /// * `Ok(TodoItem)` - The persisted todo
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn create(&self, todo: NewTodo) -> Result<TodoItem>;

    /// Replace all mutable fields of a todo and refresh `updated_at`
    ///
    /// # Returns
    /// * `Ok(Some(TodoItem))` - The updated todo
    /// * `Ok(None)` - If no todo exists with that ID
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn update(&self, id: i64, changes: UpdateTodo) -> Result<Option<TodoItem>>;

    /// Delete a todo
    ///
    /// Deleting an ID that does not exist affects no rows and succeeds.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Flip the completion flag in a single conditional update
    ///
    /// # Returns
    /// * `Ok(Some(TodoItem))` - The todo with its new completion state
    /// * `Ok(None)` - If no todo exists with that ID
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn toggle_completed(&self, id: i64) -> Result<Option<TodoItem>>;

    /// Get repository health status for monitoring
    async fn health_check(&self) -> Result<()>;
}

/// Mutations executed inside one database transaction.
///
/// Dropping a transaction that was neither committed nor rolled back
/// discards its work, so every early return leaves the store unchanged.
#[async_trait]
pub trait TodoTransaction: Send {
    /// Get a todo by its ID, seeing this transaction's own writes
    async fn get(&mut self, id: i64) -> Result<Option<TodoItem>>;

    /// Same contract as [`TodoRepository::update`]
    async fn update(&mut self, id: i64, changes: UpdateTodo) -> Result<Option<TodoItem>>;

    /// Same contract as [`TodoRepository::delete`]
    async fn delete(&mut self, id: i64) -> Result<()>;

    /// Same contract as [`TodoRepository::toggle_completed`]
    async fn toggle_completed(&mut self, id: i64) -> Result<Option<TodoItem>>;

    /// Make all writes of this transaction durable
    async fn commit(self) -> Result<()>;

    /// Discard all writes of this transaction
    async fn rollback(self) -> Result<()>;
}
