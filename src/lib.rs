//! # tweetfw - OAuth 1.0a signed Twitter REST client
//!
//! A small blocking client for the Twitter REST API. Every request is
//! signed with OAuth 1.0a (HMAC-SHA1) and the response is decoded either
//! as JSON or as URL-encoded key/value pairs.
//!
//! ## Features
//!
//! - OAuth 1.0a request signing and the three-legged token handshake
//! - JSON and form-encoded response decoding through a closed [`Format`] enum
//! - Named client registry with a lazily created default instance
//! - Settings layered from a JSON file, environment and caller overrides
//!
//! ## Basic Usage
//!
//! ```no_run
//! use tweetfw::{Format, Params, Registry, Settings};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Registry::new(Settings::from_env());
//!     let twitter = registry.default_instance()?;
//!
//!     let mut params = Params::new();
//!     params.insert("screen_name".to_string(), "rustlang".to_string());
//!
//!     let timeline = twitter.get("1.1/statuses/user_timeline", &params, Format::Json)?;
//!     println!("{:?}", timeline.get_string("0/text"));
//!     Ok(())
//! }
//! ```
//!
//! ## Signing in a user
//!
//! ```no_run
//! use tweetfw::{ClientConfig, Twitter};
//!
//! let twitter = Twitter::new(ClientConfig::new("consumer_key", "consumer_secret")?)?;
//!
//! let request = twitter.get_request_token()?;
//! println!("visit {}", twitter.get_authorize_url(&request["oauth_token"]));
//!
//! let access = twitter.get_access_token(
//!     &request["oauth_token"],
//!     &request["oauth_token_secret"],
//!     "verifier-from-callback",
//! )?;
//! twitter.set_token(&access["oauth_token"], &access["oauth_token_secret"]);
//! # Ok::<(), tweetfw::TwitterError>(())
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod oauth;
pub mod registry;
pub mod response;
pub mod rest;
pub mod settings;
pub mod token;

// Re-export main types for convenience
pub use client::Config;
pub use credentials::ClientConfig;
pub use error::{Result, TwitterError};
pub use oauth::OAuthSigner;
pub use registry::{Registry, DEFAULT_INSTANCE};
pub use response::{decode, FormParams, Format, Params, Response};
pub use rest::Twitter;
pub use settings::Settings;
pub use token::TokenPair;
