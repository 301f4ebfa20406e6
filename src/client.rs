use reqwest::blocking::{Client, ClientBuilder};

use crate::error::Result;
use crate::settings::Settings;

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_HOST: &str = "api.twitter.com";

/// Create the HTTP client for API requests.
/// No idle connections are kept, so every call opens and closes its own.
pub fn create_http_client() -> Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(0)
        .user_agent(concat!("tweetfw/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Configuration for the API endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL scheme (http or https)
    pub scheme: String,
    /// API host
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration with the given scheme and host
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Config {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Take the endpoint from settings, falling back to the defaults
    pub fn from_settings(settings: &Settings) -> Self {
        Config {
            scheme: settings
                .scheme
                .clone()
                .unwrap_or_else(|| DEFAULT_SCHEME.to_string()),
            host: settings
                .host
                .clone()
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        }
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}
