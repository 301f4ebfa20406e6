use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Partial client configuration.
///
/// Every field is optional so that file-level defaults can be layered
/// under caller-supplied overrides with [`Settings::merge`]. Validation
/// happens later, when the merged settings become a
/// [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_secret: Option<String>,
    /// URL scheme of the API (http or https)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// API host, optionally with a port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl Settings {
    /// Create empty settings
    pub fn new() -> Self {
        Settings::default()
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded twitter settings");
        Ok(settings)
    }

    /// Read settings from `TWITTER_*` environment variables
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.is_empty());
        Settings {
            consumer_key: var("TWITTER_CONSUMER_KEY"),
            consumer_secret: var("TWITTER_CONSUMER_SECRET"),
            user_token: var("TWITTER_USER_TOKEN"),
            user_secret: var("TWITTER_USER_SECRET"),
            scheme: var("TWITTER_API_SCHEME"),
            host: var("TWITTER_API_HOST"),
        }
    }

    /// Layer `overrides` on top of these settings; set fields in `overrides` win
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            consumer_key: overrides.consumer_key.or(self.consumer_key),
            consumer_secret: overrides.consumer_secret.or(self.consumer_secret),
            user_token: overrides.user_token.or(self.user_token),
            user_secret: overrides.user_secret.or(self.user_secret),
            scheme: overrides.scheme.or(self.scheme),
            host: overrides.host.or(self.host),
        }
    }

    /// Set the consumer key and secret
    pub fn with_consumer(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.consumer_key = Some(key.into());
        self.consumer_secret = Some(secret.into());
        self
    }

    /// Set the user token and secret
    pub fn with_user_token(mut self, token: impl Into<String>, secret: impl Into<String>) -> Self {
        self.user_token = Some(token.into());
        self.user_secret = Some(secret.into());
        self
    }

    /// Point the client at another API endpoint
    pub fn with_endpoint(mut self, scheme: impl Into<String>, host: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self.host = Some(host.into());
        self
    }
}
