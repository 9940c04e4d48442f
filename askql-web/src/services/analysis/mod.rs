//! Analysis service abstraction.
//!
//! The remote text-to-SQL service answers one natural-language prompt per
//! request. A trait keeps the HTTP client swappable for the in-process mock
//! (`analysis.mock_mode`).

pub mod http;
pub mod mock;

pub use http::HttpAnalysisClient;
pub use mock::MockAnalysisProvider;

use crate::models::query::QueryRequest;
use async_trait::async_trait;
use thiserror::Error;

/// Failures of a single analysis call. The `Display` text is the
/// user-visible failure message.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Could not reach the analysis service: {0}")]
    Network(String),

    #[error("Analysis service returned status {0}")]
    Status(u16),

    #[error("The analysis service returned an unreadable response")]
    Parse(String),
}

#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Issue exactly one request for the given query and return the parsed
    /// payload. No retries.
    async fn analyze(&self, request: &QueryRequest) -> Result<serde_json::Value, AnalysisError>;
}
