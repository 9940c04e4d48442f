//! HTTP implementation of the identity provider boundary.
//!
//! Speaks the provider's JSON REST API. All endpoints are keyed with the
//! project API key; error bodies carry `{"error": {"message": "<code>"}}`
//! and the code string is mapped through [`AuthErrorKind`].

use super::{AuthErrorKind, IdentityError, IdentityProvider, ProviderSession};
use crate::config::IdentityProviderSettings;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;

pub struct HttpIdentityProvider {
    client: Client,
    settings: IdentityProviderSettings,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    local_id: String,
    email: String,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpIdentityProvider {
    pub fn new(settings: IdentityProviderSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/v1/{}?key={}",
            self.settings.base_url(),
            method,
            self.settings.api_key.expose_secret()
        )
    }

    async fn post(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, IdentityError> {
        let url = self.api_url(method);

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            tracing::error!(method = method, "Failed to reach identity provider: {}", e);
            IdentityError::Network(e.to_string())
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        // The provider reports failures as a code string in the error body;
        // an unreadable body maps to the generic kind.
        let kind = match response.json::<ErrorResponse>().await {
            Ok(err) => AuthErrorKind::from_code(&err.error.message),
            Err(_) => AuthErrorKind::Unknown,
        };
        Err(IdentityError::Auth(kind))
    }

    async fn post_for_session(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<ProviderSession, IdentityError> {
        let response = self.post(method, body).await?;
        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Decode(e.to_string()))?;

        Ok(ProviderSession {
            user_id: session.local_id,
            email: session.email,
            id_token: session.id_token,
            refresh_token: session.refresh_token,
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, IdentityError> {
        self.post_for_session(
            "accounts:signInWithPassword",
            serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }),
        )
        .await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, IdentityError> {
        self.post_for_session(
            "accounts:signUp",
            serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }),
        )
        .await
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), IdentityError> {
        self.post(
            "accounts:sendOobCode",
            serde_json::json!({
                "requestType": "PASSWORD_RESET",
                "email": email,
            }),
        )
        .await
        .map(|_| ())
    }

    async fn sign_out(&self, refresh_token: &str) -> Result<(), IdentityError> {
        self.post(
            "tokens:revoke",
            serde_json::json!({
                "refreshToken": refresh_token,
            }),
        )
        .await
        .map(|_| ())
    }
}
