use crate::{common::sqlx_error_to_todo_error, queries};
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Sqlite, SqlitePool, Transaction,
};
use std::{str::FromStr, time::Duration};
use todo_core::{
    error::{Result, TodoError},
    models::{NewTodo, TodoItem, UpdateTodo},
    repository::{TodoRepository, TodoTransaction},
};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection pool tuning for [`SqliteTodoRepository`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryOptions {
    /// Upper bound on concurrent reader connections
    pub max_connections: u32,
    /// How long a caller waits for a free connection before failing as busy
    pub acquire_timeout: Duration,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// SQLite implementation of the TodoRepository trait
///
/// Reads go through a pool of connections. All writes, including every
/// transaction, go through a separate pool holding exactly one connection,
/// so writers queue in the application instead of racing for SQLite's lock.
/// An in-memory database lives on a single connection that serves both roles.
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    reader: SqlitePool,
    writer: SqlitePool,
}

impl SqliteTodoRepository {
    /// Create a new SQLite repository with the given database URL
    ///
    /// # Arguments
    /// * `database_url` - SQLite database URL (`sqlite://path`, plain path or `:memory:`)
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteTodoRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let repo = SqliteTodoRepository::new(":memory:").await?;
    ///
    /// // File-based database
    /// let repo = SqliteTodoRepository::new("sqlite:///tmp/todos.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_options(database_url, RepositoryOptions::default()).await
    }

    /// Create a repository with explicit pool settings
    pub async fn with_options(database_url: &str, options: RepositoryOptions) -> Result<Self> {
        if is_memory_url(database_url) {
            let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(sqlx_error_to_todo_error)?
                .busy_timeout(BUSY_TIMEOUT)
                .foreign_keys(true);

            // Every new connection would see its own empty database, so the
            // single connection must never be closed by the pool
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(options.acquire_timeout)
                .connect_with(connect_options)
                .await
                .map_err(sqlx_error_to_todo_error)?;

            tracing::debug!("Opened in-memory SQLite database");
            return Ok(Self {
                reader: pool.clone(),
                writer: pool,
            });
        }

        let path = database_path(database_url);
        if path.is_empty() {
            return Err(TodoError::Validation(
                "Database URL must name a file".to_string(),
            ));
        }

        let connect_options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT)
            .foreign_keys(true);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(options.acquire_timeout)
            .connect_with(connect_options.clone())
            .await
            .map_err(sqlx_error_to_todo_error)?;

        let reader = SqlitePoolOptions::new()
            .max_connections(options.max_connections.max(1))
            .acquire_timeout(options.acquire_timeout)
            .connect_with(connect_options)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        tracing::debug!(
            path,
            max_connections = options.max_connections,
            "Opened SQLite database"
        );

        Ok(Self { reader, writer })
    }

    /// Run database migrations
    ///
    /// Applies all pending migrations. Must be called once after creating the
    /// repository and before serving requests.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.writer)
            .await
            .map_err(|e| TodoError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get access to the write pool for custom operations
    ///
    /// Intended for tests that need to inspect or seed the table directly.
    pub fn pool(&self) -> &SqlitePool {
        &self.writer
    }

    /// Close both pools, waiting for checked-out connections to return
    pub async fn close(&self) {
        self.reader.close().await;
        self.writer.close().await;
        tracing::debug!("SQLite pools closed");
    }
}

const MEMORY_URLS: &[&str] = &[":memory:", "sqlite::memory:", "sqlite://:memory:"];

/// Whether `database_url` names a private in-memory database
pub fn is_memory_url(database_url: &str) -> bool {
    MEMORY_URLS.contains(&database_url)
}

fn database_path(database_url: &str) -> &str {
    database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url)
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    type Transaction = SqliteTodoTransaction;

    async fn begin(&self) -> Result<SqliteTodoTransaction> {
        let tx = self.writer.begin().await.map_err(sqlx_error_to_todo_error)?;
        Ok(SqliteTodoTransaction { tx })
    }

    async fn get(&self, id: i64) -> Result<Option<TodoItem>> {
        queries::get_todo(&self.reader, id).await
    }

    async fn list(&self) -> Result<Vec<TodoItem>> {
        queries::list_todos(&self.reader).await
    }

    async fn list_by_completion(&self, completed: bool) -> Result<Vec<TodoItem>> {
        queries::list_todos_by_completion(&self.reader, completed).await
    }

    async fn create(&self, todo: NewTodo) -> Result<TodoItem> {
        queries::create_todo(&self.writer, &todo).await
    }

    async fn update(&self, id: i64, changes: UpdateTodo) -> Result<Option<TodoItem>> {
        queries::update_todo(&self.writer, id, &changes).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        queries::delete_todo(&self.writer, id).await?;
        Ok(())
    }

    async fn toggle_completed(&self, id: i64) -> Result<Option<TodoItem>> {
        queries::toggle_todo_completed(&self.writer, id).await
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.reader)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        Ok(())
    }
}

/// A transaction on the write connection
///
/// Wraps [`sqlx::Transaction`], which rolls back when dropped uncommitted.
pub struct SqliteTodoTransaction {
    tx: Transaction<'static, Sqlite>,
}

impl std::fmt::Debug for SqliteTodoTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteTodoTransaction").finish_non_exhaustive()
    }
}

#[async_trait]
impl TodoTransaction for SqliteTodoTransaction {
    async fn get(&mut self, id: i64) -> Result<Option<TodoItem>> {
        queries::get_todo(&mut *self.tx, id).await
    }

    async fn update(&mut self, id: i64, changes: UpdateTodo) -> Result<Option<TodoItem>> {
        queries::update_todo(&mut *self.tx, id, &changes).await
    }

    async fn delete(&mut self, id: i64) -> Result<()> {
        let removed = queries::delete_todo(&mut *self.tx, id).await?;
        if removed == 0 {
            tracing::debug!(id, "Delete matched no todo");
        }
        Ok(())
    }

    async fn toggle_completed(&mut self, id: i64) -> Result<Option<TodoItem>> {
        queries::toggle_todo_completed(&mut *self.tx, id).await
    }

    async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(sqlx_error_to_todo_error)
    }

    async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.map_err(sqlx_error_to_todo_error)
    }
}
