use anyhow::{Context, Result};
use database::{is_memory_url, RepositoryOptions, SqliteTodoRepository};
use std::path::Path;
use std::sync::Arc;
use todo_api::{ServerOptions, TodoServer};
use tracing::info;

use crate::config::Config;

/// The wired application: the HTTP server and the repository it serves
pub struct App {
    pub server: TodoServer<SqliteTodoRepository>,
    pub repository: Arc<SqliteTodoRepository>,
}

/// Open the SQLite repository and bring its schema up to date
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteTodoRepository>> {
    let database_url = config.database_url();
    info!("Initializing SQLite repository at: {}", database_url);

    let options = RepositoryOptions {
        max_connections: config.database.max_connections,
        acquire_timeout: config.connection_timeout(),
    };
    let repo = SqliteTodoRepository::with_options(&database_url, options)
        .await
        .context("Failed to create SQLite repository")?;

    info!("Running database migrations");
    repo.migrate()
        .await
        .context("Failed to run database migrations")?;

    info!("Todo repository created successfully");
    Ok(Arc::new(repo))
}

/// Create and configure the HTTP server
pub fn create_server(
    repository: Arc<SqliteTodoRepository>,
    config: &Config,
) -> TodoServer<SqliteTodoRepository> {
    let options = ServerOptions {
        request_timeout: config.request_timeout(),
        require_authorization: config.server.require_authorization,
    };

    info!(?options, "Creating todo server");
    TodoServer::new(repository, options)
}

/// Initialize the complete application
pub async fn initialize_app(config: &Config) -> Result<App> {
    info!("Initializing application");

    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;

    let server = create_server(Arc::clone(&repository), config);

    info!("Application initialized successfully");
    Ok(App { server, repository })
}

/// Ensure the database directory exists using config
pub fn ensure_database_directory_from_config(config: &Config) -> Result<()> {
    ensure_database_directory(&config.database_url())
}

/// Ensure the parent directory of a file database exists
///
/// Newly created directories are owner-only on Unix.
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    if is_memory_url(database_url) {
        return Ok(());
    }
    let Some(db_path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };

    let Some(parent) = Path::new(db_path).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }

    info!("Creating database directory: {}", parent.display());
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create database directory {}", parent.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))
            .context("Failed to set directory permissions")?;
    }

    Ok(())
}
