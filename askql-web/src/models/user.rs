use askql_core::error::AppError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

/// An authenticated identity. Either present (authenticated) or absent —
/// expiry is the provider's concern, not modeled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
}

/// Authenticated user context extracted from the cookie session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub session_key: Uuid,
    pub user_id: String,
    pub email: String,
    pub id_token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await.map_err(|_| {
            AppError::InternalError(anyhow::anyhow!("Failed to extract session")).into_response()
        })?;

        let session_key: Option<Uuid> = session.get("session_key").await.unwrap_or(None);
        let user_id: Option<String> = session.get("user_id").await.unwrap_or(None);
        let email: Option<String> = session.get("email").await.unwrap_or(None);
        let id_token: Option<String> = session.get("id_token").await.unwrap_or(None);

        match (session_key, user_id, email, id_token) {
            (Some(key), Some(uid), Some(email_val), Some(token)) => Ok(AuthUser {
                session_key: key,
                user_id: uid,
                email: email_val,
                id_token: token,
            }),
            _ => {
                // Redirect to login if not authenticated
                Err(Redirect::to("/login").into_response())
            }
        }
    }
}
