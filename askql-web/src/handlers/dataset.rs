use super::query::ConversationTemplate;
use crate::models::user::AuthUser;
use crate::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AttachDatasetRequest {
    pub name: String,
}

pub async fn attach_dataset(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Form(payload): Form<AttachDatasetRequest>,
) -> Response {
    let Some(entry) = state.sessions.get(&auth_user.session_key) else {
        return Redirect::to("/login").into_response();
    };

    let mut workspace = entry.workspace.lock().await;
    let name = payload.name.trim();
    if !name.is_empty() {
        workspace.attach_dataset(name);
        tracing::info!(user_id = %auth_user.user_id, dataset = name, "Dataset attached");
    }

    ConversationTemplate::from_workspace(&workspace).into_response()
}

pub async fn remove_dataset(State(state): State<AppState>, auth_user: AuthUser) -> Response {
    let Some(entry) = state.sessions.get(&auth_user.session_key) else {
        return Redirect::to("/login").into_response();
    };

    let mut workspace = entry.workspace.lock().await;
    workspace.remove_dataset();

    ConversationTemplate::from_workspace(&workspace).into_response()
}
