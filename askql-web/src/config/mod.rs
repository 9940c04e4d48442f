use secrecy::Secret;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub identity: IdentityProviderSettings,
    pub analysis: AnalysisServiceSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub session_secret: Secret<String>,
}

/// Connection settings for the external identity provider.
///
/// Every field except `endpoint` is required; a missing value fails
/// deserialization and aborts startup. Several of the values (storage bucket,
/// messaging sender, measurement id) are not consumed by this service itself
/// but belong to the provider project configuration and are validated for
/// presence with the rest.
#[derive(Deserialize, Clone)]
pub struct IdentityProviderSettings {
    pub api_key: Secret<String>,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    pub measurement_id: String,
    /// Overrides the REST endpoint derived from `auth_domain`. Used by tests
    /// and self-hosted gateways.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl IdentityProviderSettings {
    pub fn base_url(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{}", self.auth_domain))
    }
}

#[derive(Deserialize, Clone)]
pub struct AnalysisServiceSettings {
    /// Endpoint of the text-to-SQL service.
    pub url: String,
    /// Optional relay prefix the request is routed through.
    #[serde(default)]
    pub relay_url: Option<String>,
    /// Connection identifier sent with every query.
    pub connection_id: String,
    /// Bearer token presented to the analysis service. Never leaves the
    /// server.
    pub api_token: Secret<String>,
    #[serde(default = "default_dialect")]
    pub dialect: String,
    /// When set, queries are answered by the in-process mock instead of the
    /// remote service.
    #[serde(default)]
    pub mock_mode: bool,
}

fn default_dialect() -> String {
    "postgres".to_string()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");

    // Check if we're already in askql-web directory or need to navigate to it
    let configuration_directory = if base_path.ends_with("askql-web") {
        base_path.join("config")
    } else {
        base_path.join("askql-web").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
