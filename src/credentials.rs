use crate::error::{Result, TwitterError};
use crate::settings::Settings;
use crate::token::TokenPair;

/// Validated credentials for one client.
///
/// The consumer pair identifies the application; the optional user token
/// is the pair obtained through the OAuth handshake.
#[derive(Clone)]
pub struct ClientConfig {
    consumer_key: String,
    consumer_secret: String,
    user_token: Option<TokenPair>,
}

impl ClientConfig {
    /// Create a config with consumer credentials only
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Result<Self> {
        let consumer_key = consumer_key.into();
        let consumer_secret = consumer_secret.into();

        if consumer_key.is_empty() {
            return Err(TwitterError::MissingConfig("consumer_key"));
        }
        if consumer_secret.is_empty() {
            return Err(TwitterError::MissingConfig("consumer_secret"));
        }

        Ok(ClientConfig {
            consumer_key,
            consumer_secret,
            user_token: None,
        })
    }

    /// Validate merged settings.
    ///
    /// The user token is only taken when both `user_token` and
    /// `user_secret` are non-empty.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let consumer_key = settings
            .consumer_key
            .clone()
            .ok_or(TwitterError::MissingConfig("consumer_key"))?;
        let consumer_secret = settings
            .consumer_secret
            .clone()
            .ok_or(TwitterError::MissingConfig("consumer_secret"))?;

        let config = ClientConfig::new(consumer_key, consumer_secret)?;
        Ok(match TokenPair::from_parts(
            settings.user_token.as_deref(),
            settings.user_secret.as_deref(),
        ) {
            Some(token) => config.with_user_token(token),
            None => config,
        })
    }

    /// Attach a user token
    pub fn with_user_token(mut self, token: TokenPair) -> Self {
        self.user_token = Some(token);
        self
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn user_token(&self) -> Option<&TokenPair> {
        self.user_token.as_ref()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("user_token", &self.user_token)
            .finish()
    }
}
