//! Response model with content-type–negotiated decoding.
//!
//! The server speaks JSON for almost everything, but a handful of endpoints
//! return plain text or certificates. A response body is parsed as JSON only
//! when its content-type matches the JSON media-type pattern; anything else is
//! handed back raw.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Media types treated as JSON: `application/json`, `text/json`, and their
/// `x-` prefixed variants, matched case-insensitively.
static JSON_CONTENT_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(application|text)/(x-)?json").expect("JSON content-type pattern is valid")
});

/// Whether a content-type header value denotes a JSON body.
pub fn is_json_content_type(content_type: &str) -> bool {
    JSON_CONTENT_TYPE_RE.is_match(content_type)
}

/// A response body, decoded according to the response's content-type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The content-type matched the JSON pattern and the body parsed.
    Json(Value),
    /// Anything else, returned unchanged.
    Raw(String),
}

impl ResponseBody {
    pub(crate) fn decode(content_type: Option<&str>, text: String) -> Result<Self> {
        match content_type {
            Some(content_type) if is_json_content_type(content_type) => {
                Ok(Self::Json(serde_json::from_str(&text)?))
            }
            _ => Ok(Self::Raw(text)),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Raw(text) => Some(text),
        }
    }
}

/// A decoded 2xx response.
///
/// Non-2xx statuses never reach this type; they surface as
/// [`Error::Server`](crate::Error::Server) with the same decoded body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl Response {
    /// The decoded JSON value, when the body was JSON-typed.
    pub fn json(&self) -> Option<&Value> {
        self.body.as_json()
    }

    /// Deserialize the body into a typed value.
    ///
    /// Raw bodies are parsed as JSON on the way through, so this also works
    /// for servers that omit the content-type header on JSON payloads.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.body {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value.clone())?),
            ResponseBody::Raw(text) => Ok(serde_json::from_str(text)?),
        }
    }
}
