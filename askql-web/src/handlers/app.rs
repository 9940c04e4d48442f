use crate::AppState;
use axum::{extract::State, response::Redirect};
use tower_sessions::Session;
use uuid::Uuid;

pub async fn index(State(state): State<AppState>, session: Session) -> Redirect {
    let session_key: Option<Uuid> = session.get("session_key").await.unwrap_or(None);

    match session_key {
        Some(key) if state.sessions.get(&key).is_some() => Redirect::to("/dashboard"),
        _ => Redirect::to("/login"),
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
