use super::hx_redirect;
use crate::session::SessionGuard;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tower_sessions::Session;
use uuid::Uuid;

/// How long one poll request holds the session subscription open.
const POLL_WINDOW: Duration = Duration::from_secs(25);

/// Long-poll endpoint behind the protected surface. Holds the session
/// subscription for up to [`POLL_WINDOW`]; the moment the session is lost
/// the browser is told to navigate to the login page. If the browser is
/// already gone when the change fires, the response is discarded by the
/// transport and nothing else happens.
pub async fn poll_session(State(state): State<AppState>, session: Session) -> Response {
    let session_key: Option<Uuid> = session.get("session_key").await.unwrap_or(None);
    let Some(key) = session_key else {
        return hx_redirect("/login");
    };

    let mut guard = SessionGuard::new(state.sessions.subscribe(&key));
    if !guard.resolve().is_authenticated() {
        return hx_redirect("/login");
    }

    match tokio::time::timeout(POLL_WINDOW, guard.changed()).await {
        Ok(guard_state) if !guard_state.is_authenticated() => hx_redirect("/login"),
        // Changed but still authenticated, or the window elapsed quietly.
        _ => StatusCode::NO_CONTENT.into_response(),
    }
}
