use askql_core::middleware::{
    security_headers::security_headers_middleware, tracing::request_id_middleware,
};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::handlers::{
    app::{health_check, index},
    auth::{
        login_handler, login_page, logout_handler, password_reset_handler, register_handler,
        register_page,
    },
    dashboard::dashboard_handler,
    dataset::{attach_dataset, remove_dataset},
    query::submit_query,
    session::poll_session,
};
use crate::middleware::auth::auth_middleware;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    // Session setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    let protected = Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route("/dataset", post(attach_dataset).delete(remove_dataset))
        .route("/query", post(submit_query))
        .route("/session/poll", get(poll_session))
        .layer(from_fn_with_state(state.sessions.clone(), auth_middleware));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(crate::handlers::metrics::metrics))
        .route("/login", get(login_page).post(login_handler))
        .route("/register", get(register_page).post(register_handler))
        .route("/password-reset", post(password_reset_handler))
        .route("/logout", get(logout_handler))
        .merge(protected)
        .layer(session_layer)
        .layer(from_fn(crate::services::metrics::http_metrics_middleware))
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .with_state(state)
}
