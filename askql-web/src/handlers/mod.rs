pub mod app;
pub mod auth;
pub mod dashboard;
pub mod dataset;
pub mod metrics;
pub mod query;
pub mod session;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

/// 200 + `HX-Redirect` so htmx performs a full browser navigation.
pub(crate) fn hx_redirect(to: &str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("HX-Redirect", to.parse().expect("static redirect target"));
    (StatusCode::OK, headers, "").into_response()
}
