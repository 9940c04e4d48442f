use askql_core::observability::init_tracing;
use askql_web::config::get_configuration;
use askql_web::services::analysis::{AnalysisProvider, HttpAnalysisClient, MockAnalysisProvider};
use askql_web::services::identity::HttpIdentityProvider;
use askql_web::session::SessionRegistry;
use askql_web::startup::build_router;
use askql_web::AppState;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Missing required configuration (identity provider keys, analysis
    // endpoint/token) is fatal here.
    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("askql-web", "info");

    askql_web::services::metrics::init_metrics();

    let identity = Arc::new(HttpIdentityProvider::new(configuration.identity.clone()));

    let analysis: Arc<dyn AnalysisProvider> = if configuration.analysis.mock_mode {
        info!("Analysis mock mode enabled; queries are answered in-process");
        Arc::new(MockAnalysisProvider::new())
    } else {
        Arc::new(HttpAnalysisClient::new(configuration.analysis.clone()))
    };

    let state = AppState::new(
        identity,
        analysis,
        SessionRegistry::new(),
        configuration.analysis.clone(),
    );

    let app = build_router(state);

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting askql-web on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
