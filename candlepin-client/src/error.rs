use reqwest::StatusCode;
use thiserror::Error;

use crate::response::ResponseBody;

#[derive(Debug, Error)]
pub enum Error {
    #[error("options contain unknown keys: {}", keys.join(", "))]
    UnknownOptions { keys: Vec<String> },

    #[error("missing keys: {}", keys.join(", "))]
    MissingKeys { keys: Vec<String> },

    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    #[error("cannot specify client_cert or client_key when they are derived")]
    CertificateConflict,

    #[error("client_cert and client_key must be supplied together")]
    IncompleteIdentity,

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}")]
    Server {
        status: StatusCode,
        body: ResponseBody,
    },

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
