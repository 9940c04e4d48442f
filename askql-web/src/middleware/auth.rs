use crate::session::{SessionGuard, SessionRegistry};
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use uuid::Uuid;

/// Gates the protected surface. The request only proceeds once the session
/// subscription resolves to an authenticated session; everything else is
/// sent to the login page. Covers sessions revoked server-side while the
/// cookie is still live.
pub async fn auth_middleware(
    State(registry): State<SessionRegistry>,
    session: Session,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let session_key: Option<Uuid> = session.get("session_key").await.unwrap_or(None);

    let Some(key) = session_key else {
        return Ok(Redirect::to("/login").into_response());
    };

    let mut guard = SessionGuard::new(registry.subscribe(&key));
    if !guard.resolve().is_authenticated() {
        return Ok(Redirect::to("/login").into_response());
    }

    Ok(next.run(request).await)
}
