use crate::models::user::AuthSession;
use crate::services::identity::{AuthErrorKind, ProviderSession};
use crate::AppState;
use askama::Template;
use askql_core::error::AppError;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;
use validator::Validate;

use super::hx_redirect;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub show_reset: bool,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {}

#[derive(Deserialize)]
pub struct LoginPageParams {
    pub reset: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

pub async fn login_page(Query(params): Query<LoginPageParams>) -> impl IntoResponse {
    LoginTemplate {
        show_reset: params.reset.is_some(),
    }
}

pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {}
}

fn error_fragment(message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(format!(
            "<p class=\"text-red-500 text-sm\">{}</p>",
            message
        )),
    )
        .into_response()
}

/// Register the provider session server-side and bind it to the cookie
/// session.
async fn establish_session(
    state: &AppState,
    session: &Session,
    provider: &ProviderSession,
) -> Result<(), AppError> {
    let key = state.sessions.insert(AuthSession {
        user_id: provider.user_id.clone(),
        email: provider.email.clone(),
    });

    session
        .insert("session_key", key)
        .await
        .map_err(persist_error)?;
    session
        .insert("user_id", &provider.user_id)
        .await
        .map_err(persist_error)?;
    session
        .insert("email", &provider.email)
        .await
        .map_err(persist_error)?;
    session
        .insert("id_token", &provider.id_token)
        .await
        .map_err(persist_error)?;
    if let Some(refresh_token) = &provider.refresh_token {
        session
            .insert("refresh_token", refresh_token)
            .await
            .map_err(persist_error)?;
    }

    Ok(())
}

fn persist_error(e: tower_sessions::session::Error) -> AppError {
    AppError::InternalError(anyhow::anyhow!("Failed to persist session: {}", e))
}

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Form(payload): Form<LoginRequest>,
) -> Result<Response, AppError> {
    match state.identity.sign_in(&payload.email, &payload.password).await {
        Ok(provider_session) => {
            establish_session(&state, &session, &provider_session).await?;

            tracing::info!(
                user_id = %provider_session.user_id,
                email = %provider_session.email,
                "User logged in successfully"
            );

            Ok(hx_redirect("/dashboard"))
        }
        Err(e) => {
            tracing::warn!("Sign-in failed: {}", e);
            Ok(error_fragment(e.user_message()))
        }
    }
}

pub async fn register_handler(
    State(state): State<AppState>,
    session: Session,
    Form(payload): Form<RegisterRequest>,
) -> Result<Response, AppError> {
    if let Err(errors) = payload.validate() {
        let message = if errors.field_errors().contains_key("email") {
            AuthErrorKind::InvalidEmail.message()
        } else {
            AuthErrorKind::WeakPassword.message()
        };
        return Ok(error_fragment(message));
    }

    match state.identity.sign_up(&payload.email, &payload.password).await {
        Ok(provider_session) => {
            // The provider signs the new account in; treat it like a login.
            establish_session(&state, &session, &provider_session).await?;

            tracing::info!(
                user_id = %provider_session.user_id,
                email = %provider_session.email,
                "User registered successfully"
            );

            Ok(hx_redirect("/dashboard"))
        }
        Err(e) => {
            tracing::warn!("Sign-up failed: {}", e);
            Ok(error_fragment(e.user_message()))
        }
    }
}

pub async fn password_reset_handler(
    State(state): State<AppState>,
    Form(payload): Form<ResetRequest>,
) -> impl IntoResponse {
    match state.identity.send_password_reset(&payload.email).await {
        Ok(()) => (
            StatusCode::OK,
            Html(
                "<p class=\"text-green-700 text-sm\">Password reset email sent! \
                 Please check your inbox.</p>"
                    .to_string(),
            ),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("Password reset failed: {}", e);
            error_fragment(e.user_message())
        }
    }
}

pub async fn logout_handler(
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    // Attempt to revoke the refresh token via the provider.
    // We don't fail the logout if this fails - just log the error
    if let Some(refresh_token) = session.get::<String>("refresh_token").await.unwrap_or(None) {
        if let Err(e) = state.identity.sign_out(&refresh_token).await {
            tracing::error!("Failed to revoke token during logout: {}", e);
        } else {
            tracing::info!("Token revoked successfully");
        }
    }

    // Tear down the server-side session; subscribers observe the loss
    if let Some(key) = session.get::<Uuid>("session_key").await.unwrap_or(None) {
        state.sessions.remove(&key);
    }

    // Clear session regardless of token revocation result
    session.clear().await;

    hx_redirect("/login")
}
