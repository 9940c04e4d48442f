pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod startup;

use crate::config::AnalysisServiceSettings;
use services::{analysis::AnalysisProvider, identity::IdentityProvider};
use session::SessionRegistry;
use std::sync::Arc;

/// Shared application state containing service clients and the session
/// registry
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub analysis: Arc<dyn AnalysisProvider>,
    pub sessions: SessionRegistry,
    pub analysis_settings: AnalysisServiceSettings,
}

impl AppState {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        analysis: Arc<dyn AnalysisProvider>,
        sessions: SessionRegistry,
        analysis_settings: AnalysisServiceSettings,
    ) -> Self {
        Self {
            identity,
            analysis,
            sessions,
            analysis_settings,
        }
    }
}
