//! Mock implementations and test utilities for the todo service
//!
//! This crate provides testing infrastructure including:
//! - An in-memory `TodoRepository` with failure injection
//! - Random test data generators and property-based strategies
//! - Fixtures, builders and assertion helpers
//! - A contract suite every repository implementation must pass

pub mod assertions;
pub mod builders;
pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod repository;

pub use assertions::*;
pub use builders::*;
pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use repository::{MockTodoRepository, MockTodoTransaction};
