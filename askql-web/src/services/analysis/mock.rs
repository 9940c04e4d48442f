//! Mock analysis provider for demo deployments and tests.

use super::{AnalysisError, AnalysisProvider};
use crate::models::query::QueryRequest;
use async_trait::async_trait;

/// Answers every query in-process with a canned echo. No network I/O.
pub struct MockAnalysisProvider;

impl MockAnalysisProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockAnalysisProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    async fn analyze(&self, request: &QueryRequest) -> Result<serde_json::Value, AnalysisError> {
        Ok(serde_json::json!({
            "answer": format!(
                "Analysis complete. This is a simulated response to your query: \"{}\".",
                request.prompt
            ),
            "connectionID": request.connection_id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_the_prompt() {
        let provider = MockAnalysisProvider::new();
        let request = QueryRequest {
            prompt: "Who had the highest salary in 2024?".to_string(),
            dialect: "postgres".to_string(),
            connection_id: "conn-1".to_string(),
        };

        let payload = provider.analyze(&request).await.unwrap();
        let answer = payload["answer"].as_str().unwrap();
        assert!(answer.contains("Who had the highest salary in 2024?"));
    }
}
