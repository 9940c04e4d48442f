use super::{AnalysisError, AnalysisProvider};
use crate::config::AnalysisServiceSettings;
use crate::models::query::QueryRequest;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;

pub struct HttpAnalysisClient {
    client: Client,
    settings: AnalysisServiceSettings,
}

#[derive(Serialize)]
struct AnalysisRequestBody<'a> {
    prompt: &'a str,
    #[serde(rename = "type")]
    dialect: &'a str,
    #[serde(rename = "connectionID")]
    connection_id: &'a str,
}

impl HttpAnalysisClient {
    pub fn new(settings: AnalysisServiceSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Endpoint the request is sent to. A configured relay prefixes the
    /// target URL.
    fn endpoint(&self) -> String {
        match &self.settings.relay_url {
            Some(relay) => format!("{}{}", relay, self.settings.url),
            None => self.settings.url.clone(),
        }
    }
}

#[async_trait]
impl AnalysisProvider for HttpAnalysisClient {
    async fn analyze(&self, request: &QueryRequest) -> Result<serde_json::Value, AnalysisError> {
        let url = self.endpoint();
        let body = AnalysisRequestBody {
            prompt: &request.prompt,
            dialect: &request.dialect,
            connection_id: &request.connection_id,
        };

        tracing::debug!(
            url = %url,
            prompt_len = request.prompt.len(),
            "Sending request to analysis service"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.settings.api_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach analysis service at {}: {}", url, e);
                AnalysisError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Analysis service rejected query");
            return Err(AnalysisError::Status(status.as_u16()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AnalysisError::Parse(e.to_string()))
    }
}
