use crate::models::message::Message;
use crate::models::query::{QueryOutcome, SubmitError};
use crate::services::metrics::record_query_outcome;
use crate::session::Workspace;
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::models::user::AuthUser;

/// The conversation panel: dataset banner, message log, and the state of
/// the last query. Rendered for the dashboard and re-rendered by every
/// fragment swap; a pure function of the workspace.
#[derive(Template)]
#[template(path = "fragments/conversation.html")]
pub struct ConversationTemplate {
    pub dataset: Option<String>,
    pub messages: Vec<Message>,
    pub outcome: QueryOutcome,
}

impl ConversationTemplate {
    pub fn from_workspace(workspace: &Workspace) -> Self {
        Self {
            dataset: workspace.dataset.clone(),
            messages: workspace.messages.clone(),
            outcome: workspace.flow.outcome().clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct QueryForm {
    pub prompt: String,
}

pub async fn submit_query(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Form(payload): Form<QueryForm>,
) -> Response {
    let Some(entry) = state.sessions.get(&auth_user.session_key) else {
        return Redirect::to("/login").into_response();
    };

    let request = {
        let mut workspace = entry.workspace.lock().await;
        match workspace.flow.begin(
            &payload.prompt,
            &state.analysis_settings.dialect,
            &state.analysis_settings.connection_id,
        ) {
            Ok(request) => {
                workspace.messages.push(Message::user(request.prompt.clone()));
                request
            }
            // Empty prompt: nothing is sent and nothing changes.
            Err(SubmitError::EmptyPrompt) => {
                return ConversationTemplate::from_workspace(&workspace).into_response();
            }
            Err(SubmitError::AlreadyPending) => {
                tracing::debug!(user_id = %auth_user.user_id, "Rejected overlapping submission");
                return ConversationTemplate::from_workspace(&workspace).into_response();
            }
        }
    };

    // The lock is not held across the call; the Pending state is what
    // serializes submissions.
    let result = state.analysis.analyze(&request).await;

    // The session may have ended while the call was in flight. The response
    // is dropped; there is no workspace left to write to.
    let Some(entry) = state.sessions.get(&auth_user.session_key) else {
        tracing::debug!(user_id = %auth_user.user_id, "Session ended mid-query; dropping response");
        return Redirect::to("/login").into_response();
    };

    let mut workspace = entry.workspace.lock().await;
    match result {
        Ok(body) => {
            if let Some(rendered) = workspace.flow.succeed(&body) {
                workspace.messages.push(Message::ai(rendered));
            }
            record_query_outcome("succeeded");
        }
        Err(e) => {
            tracing::warn!(user_id = %auth_user.user_id, "Query failed: {}", e);
            workspace.flow.fail(e.to_string());
            record_query_outcome("failed");
        }
    }

    ConversationTemplate::from_workspace(&workspace).into_response()
}
