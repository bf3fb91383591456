//! Todo Server Library
//!
//! Configuration loading, telemetry and application wiring for the
//! `todo-server` binary, exposed as a library for integration tests.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{create_repository, create_server, ensure_database_directory, initialize_app, App};
pub use telemetry::init_telemetry;
