use crate::client::{create_http_client, Config};
use crate::credentials::ClientConfig;
use crate::error::{Result, TwitterError};
use crate::oauth::{encode_pairs, OAuthSigner};
use crate::response::{decode, decode_form, FormParams, Format, Params, Response};
use crate::settings::Settings;
use crate::token::TokenPair;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use std::sync::{PoisonError, RwLock};
use std::time::Instant;
use url::Url;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Twitter is an OAuth 1.0a signed client for one set of credentials.
///
/// The token pair used for signing can be swapped at runtime with
/// [`Twitter::set_token`]; concurrent writers race and the last one wins.
#[derive(Debug)]
pub struct Twitter {
    /// HTTP client
    client: Client,
    /// API endpoint
    config: Config,
    /// Consumer credentials
    credentials: ClientConfig,
    /// Token pair signing subsequent requests
    token: RwLock<Option<TokenPair>>,
}

impl Twitter {
    /// Create a client against the default API endpoint
    pub fn new(credentials: ClientConfig) -> Result<Self> {
        Twitter::with_config(credentials, Config::default())
    }

    /// Create a client against a custom API endpoint
    pub fn with_config(credentials: ClientConfig, config: Config) -> Result<Self> {
        let token = credentials.user_token().cloned();
        Ok(Twitter {
            client: create_http_client()?,
            config,
            credentials,
            token: RwLock::new(token),
        })
    }

    /// Validate merged settings and build a client from them
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let credentials = ClientConfig::from_settings(settings)?;
        Twitter::with_config(credentials, Config::from_settings(settings))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> &ClientConfig {
        &self.credentials
    }

    /// The token pair currently used for signing
    pub fn token(&self) -> Option<TokenPair> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the in-memory token pair used by subsequent requests
    pub fn set_token(&self, token: impl Into<String>, secret: impl Into<String>) {
        let pair = TokenPair::new(token, secret);
        tracing::debug!(token = %pair.token, "switching oauth token");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(pair);
    }

    /// Build the full URL of a resource.
    ///
    /// A leading `/` on `uri` is dropped, and the format suffix is not
    /// appended twice when `uri` already carries it.
    pub fn url(&self, uri: &str, format: Format) -> String {
        let path = uri.trim_start_matches('/');
        let ext = format.extension();
        if ext.is_empty() {
            return format!("{}/{}", self.config.base_url(), path);
        }

        let suffix = format!(".{}", ext);
        let path = path.strip_suffix(suffix.as_str()).unwrap_or(path);
        format!("{}/{}{}", self.config.base_url(), path, suffix)
    }

    /// Obtain a temporary request token (`oauth_token`, `oauth_token_secret`)
    pub fn get_request_token(&self) -> Result<FormParams> {
        self.call_form(Method::POST, "oauth/request_token", &Params::new())
    }

    /// URL to send the user to for "Sign in with Twitter"
    pub fn get_authenticate_url(&self, oauth_token: &str) -> String {
        format!("{}?oauth_token={}", self.url("oauth/authenticate", Format::Form), oauth_token)
    }

    /// URL to send the user to for authorizing the application
    pub fn get_authorize_url(&self, oauth_token: &str) -> String {
        format!("{}?oauth_token={}", self.url("oauth/authorize", Format::Form), oauth_token)
    }

    /// Exchange a verified request token for an access token.
    ///
    /// The request token is installed with [`Twitter::set_token`] before
    /// the exchange. The returned pairs carry the final `oauth_token` and
    /// `oauth_token_secret`; installing them is left to the caller.
    pub fn get_access_token(
        &self,
        oauth_token: &str,
        oauth_token_secret: &str,
        oauth_verifier: &str,
    ) -> Result<FormParams> {
        self.set_token(oauth_token, oauth_token_secret);

        let mut params = Params::new();
        params.insert("oauth_verifier".to_string(), oauth_verifier.to_string());

        self.call_form(Method::POST, "oauth/access_token", &params)
    }

    /// GET request
    pub fn get(&self, uri: &str, params: &Params, format: Format) -> Result<Response> {
        self.call(Method::GET, uri, params, format)
    }

    /// POST request
    pub fn post(&self, uri: &str, params: &Params, format: Format) -> Result<Response> {
        self.call(Method::POST, uri, params, format)
    }

    /// PUT request
    pub fn put(&self, uri: &str, params: &Params, format: Format) -> Result<Response> {
        self.call(Method::PUT, uri, params, format)
    }

    /// DELETE request
    pub fn delete(&self, uri: &str, params: &Params, format: Format) -> Result<Response> {
        self.call(Method::DELETE, uri, params, format)
    }

    /// Sign, send and decode one request
    fn call(&self, method: Method, uri: &str, params: &Params, format: Format) -> Result<Response> {
        let body = self.send(method, uri, params, format)?;
        decode(format, &body)
    }

    /// Like `call` for endpoints that always answer with form pairs
    fn call_form(&self, method: Method, uri: &str, params: &Params) -> Result<FormParams> {
        let body = self.send(method, uri, params, Format::Form)?;
        Ok(decode_form(&body))
    }

    /// Sign and send one request, returning the raw body of a 200.
    ///
    /// GET and DELETE carry `params` in the query string, POST and PUT in a
    /// form-encoded body. Anything but a 200 is returned as
    /// [`TwitterError::Api`] with the raw body.
    fn send(&self, method: Method, uri: &str, params: &Params, format: Format) -> Result<String> {
        let mut url = Url::parse(&self.url(uri, format))?;

        let token = self.token();
        let authorization =
            OAuthSigner::new(&self.credentials, token.as_ref()).authorization_header(&method, &url, params);
        let authorization = HeaderValue::from_str(&authorization)
            .map_err(|e| TwitterError::InvalidHeader(e.to_string()))?;

        let has_body = matches!(method, Method::POST | Method::PUT);
        if !has_body && !params.is_empty() {
            let extra = encode_pairs(params);
            let query = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{}&{}", existing, extra),
                _ => extra,
            };
            url.set_query(Some(&query));
        }

        let mut request = self
            .client
            .request(method.clone(), url.as_str())
            .header(AUTHORIZATION, authorization);

        if has_body {
            request = request
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(encode_pairs(params));
        }

        let start = Instant::now();
        let http_response = request.send()?;
        let status = http_response.status();
        let body = http_response.text()?;

        tracing::debug!(
            method = %method,
            path = url.path(),
            status = status.as_u16(),
            elapsed = ?start.elapsed(),
            "twitter request"
        );

        if status != StatusCode::OK {
            return Err(TwitterError::api(status.as_u16(), body));
        }

        Ok(body)
    }
}
