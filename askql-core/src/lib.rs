//! askql-core: Shared infrastructure for the askql workspace.
pub mod error;
pub mod middleware;
pub mod observability;
