use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// TokenPair represents an OAuth 1.0a token and its secret.
/// It is either a temporary request token or a user access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Token sent as `oauth_token`
    #[serde(rename = "oauth_token")]
    pub token: String,

    /// Secret used in the signing key
    #[serde(rename = "oauth_token_secret")]
    pub secret: String,
}

impl TokenPair {
    /// Create a new TokenPair
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        TokenPair {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// Build a pair from optional parts, only when both are non-empty
    pub fn from_parts(token: Option<&str>, secret: Option<&str>) -> Option<Self> {
        match (token, secret) {
            (Some(t), Some(s)) if !t.is_empty() && !s.is_empty() => Some(TokenPair::new(t, s)),
            _ => None,
        }
    }

    /// Extract `oauth_token` / `oauth_token_secret` from decoded form params
    pub fn from_form(params: &HashMap<String, String>) -> Option<Self> {
        TokenPair::from_parts(
            params.get("oauth_token").map(String::as_str),
            params.get("oauth_token_secret").map(String::as_str),
        )
    }
}

// The secret never shows up in logs
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}
