use config::{Config, ConfigError};
use serde::Deserialize;

pub const API_ENDPOINT: &str = "https://zehnder-prod-we-apim.azure-api.net/cloud/api/v2.1";

/// Connection settings for the cloud API.
///
/// The API key is the vendor subscription key sent as `x-api-key` on every request.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    api_url: String,
    api_key: String,
}

fn default_api_url() -> String {
    API_ENDPOINT.to_string()
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        ClientConfig {
            api_url: default_api_url(),
            api_key: api_key.into(),
        }
    }

    /// Loads `zehnder_cloud.*`, then `zehnder_cloud_local.*`, then `ZEHNDER_CLOUD_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("zehnder_cloud").required(false))
            .add_source(config::File::with_name("zehnder_cloud_local").required(false))
            .add_source(config::Environment::with_prefix("ZEHNDER_CLOUD"))
            .build()?
            .try_deserialize()
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn api_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url(), path)
    }
}
