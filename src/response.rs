use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use url::form_urlencoded;

use crate::error::Result;

/// Params is the set of parameters sent with a request.
/// Ordered so that query strings and bodies come out stable.
pub type Params = BTreeMap<String, String>;

/// FormParams holds a decoded `key=value&...` response body.
pub type FormParams = HashMap<String, String>;

/// Format selects the resource suffix and how the body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `.json` suffix, body decoded as JSON
    #[default]
    Json,
    /// no suffix, body decoded as URL-encoded pairs
    Form,
}

impl Format {
    /// The resource suffix without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Form => "",
        }
    }
}

/// Response is a decoded API response.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Json(Value),
    Form(FormParams),
}

impl Response {
    /// The JSON value, if this was a JSON response
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Response::Json(value) => Some(value),
            Response::Form(_) => None,
        }
    }

    /// The decoded pairs, if this was a form response
    pub fn as_form(&self) -> Option<&FormParams> {
        match self {
            Response::Form(params) => Some(params),
            Response::Json(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Response::Json(value) => Some(value),
            Response::Form(_) => None,
        }
    }

    pub fn into_form(self) -> Option<FormParams> {
        match self {
            Response::Form(params) => Some(params),
            Response::Json(_) => None,
        }
    }

    /// Get a value by a slash-separated path.
    /// For example, "user/screen_name" reads the "screen_name" field inside "user".
    /// Form responses only answer single-segment paths.
    pub fn get(&self, path: &str) -> Option<Value> {
        match self {
            Response::Json(root) => {
                let mut current = root;
                for part in path.split('/').filter(|s| !s.is_empty()) {
                    current = match current {
                        Value::Object(map) => map.get(part)?,
                        Value::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
                        _ => return None,
                    };
                }
                Some(current.clone())
            }
            Response::Form(params) => params.get(path).map(|v| Value::String(v.clone())),
        }
    }

    /// Get a string value by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    /// Apply unmarshals the response into the provided type
    pub fn apply<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let value = match self {
            Response::Json(value) => value.clone(),
            Response::Form(params) => serde_json::to_value(params)?,
        };
        serde_json::from_value(value).map_err(|e| e.into())
    }
}

/// Decode a response body according to `format`
pub fn decode(format: Format, body: &str) -> Result<Response> {
    match format {
        Format::Json => Ok(Response::Json(serde_json::from_str(body)?)),
        Format::Form => Ok(Response::Form(decode_form(body))),
    }
}

/// Decode `key=value&...` pairs; a later duplicate key wins
pub fn decode_form(body: &str) -> FormParams {
    form_urlencoded::parse(body.trim().as_bytes())
        .into_owned()
        .collect()
}
