use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;
use sha1::Sha1;
use url::{Position, Url};
use uuid::Uuid;

use crate::credentials::ClientConfig;
use crate::response::Params;
use crate::token::TokenPair;

type HmacSha1 = Hmac<Sha1>;

// https://tools.ietf.org/html/rfc5849#section-3.6
// ALPHA, DIGIT, '-', '.', '_', '~' are left alone, everything else is
// encoded with uppercase hex.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Percent-encode a string the way OAuth 1.0a requires
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Encode params as `k=v&k=v`, used for both query strings and form bodies
pub fn encode_pairs<'p, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'p String, &'p String)>,
{
    params
        .into_iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// OAuthSigner signs a single request.
///
/// Nonce and timestamp are generated on construction; tests can pin them
/// with [`OAuthSigner::nonce`] and [`OAuthSigner::timestamp`].
pub struct OAuthSigner<'a> {
    config: &'a ClientConfig,
    token: Option<&'a TokenPair>,
    nonce: String,
    timestamp: i64,
}

impl<'a> OAuthSigner<'a> {
    pub fn new(config: &'a ClientConfig, token: Option<&'a TokenPair>) -> Self {
        OAuthSigner {
            config,
            token,
            nonce: Uuid::new_v4().simple().to_string(),
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = nonce.into();
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The `oauth_*` protocol parameters, without the signature
    fn oauth_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("oauth_consumer_key", self.config.consumer_key().to_string()),
            ("oauth_nonce", self.nonce.clone()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", self.timestamp.to_string()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ];
        if let Some(token) = self.token {
            params.push(("oauth_token", token.token.clone()));
        }
        params
    }

    /// Build the signature base string.
    ///
    /// `url` may carry a query string; its pairs are signed along with
    /// `params` and the oauth parameters.
    pub fn base_string(&self, method: &Method, url: &Url, params: &Params) -> String {
        let mut pairs: Vec<(String, String)> = self
            .oauth_params()
            .into_iter()
            .map(|(k, v)| (encode(k), encode(&v)))
            .collect();
        pairs.extend(url.query_pairs().map(|(k, v)| (encode(&k), encode(&v))));
        pairs.extend(params.iter().map(|(k, v)| (encode(k), encode(v))));
        pairs.sort();

        let normalized = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}&{}&{}",
            method.as_str().to_ascii_uppercase(),
            encode(&url[..Position::AfterPath]),
            encode(&normalized)
        )
    }

    /// Compute the base64 HMAC-SHA1 signature for a request
    pub fn signature(&self, method: &Method, url: &Url, params: &Params) -> String {
        let key = format!(
            "{}&{}",
            encode(self.config.consumer_secret()),
            encode(self.token.map(|t| t.secret.as_str()).unwrap_or(""))
        );

        let mut mac =
            HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
        mac.update(self.base_string(method, url, params).as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Build the value of the `Authorization` header
    pub fn authorization_header(&self, method: &Method, url: &Url, params: &Params) -> String {
        let signature = self.signature(method, url, params);

        let mut fields = self.oauth_params();
        fields.push(("oauth_signature", signature));
        fields.sort();

        let fields = fields
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        format!("OAuth {}", fields)
    }
}
