use crate::models::message::Message;
use crate::models::query::QueryOutcome;
use crate::models::user::{AuthSession, AuthUser};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub session: AuthSession,
    pub dataset: Option<String>,
    pub messages: Vec<Message>,
    pub outcome: QueryOutcome,
    pub current_page: &'static str,
}

pub async fn dashboard_handler(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let Some(entry) = state.sessions.get(&auth_user.session_key) else {
        return Redirect::to("/login").into_response();
    };

    let workspace = entry.workspace.lock().await;
    DashboardTemplate {
        session: entry.session().clone(),
        dataset: workspace.dataset.clone(),
        messages: workspace.messages.clone(),
        outcome: workspace.flow.outcome().clone(),
        current_page: "dashboard",
    }
    .into_response()
}
