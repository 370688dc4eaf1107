//! Error handling for the PocketBase admin tooling

use std::fmt;
use thiserror::Error;

/// Unified error type for the provisioning tools
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Local file or terminal I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The admin password grant was rejected
    #[error("Authentication failed with status {status}: {body}")]
    Auth { status: u16, body: String },

    /// The auth endpoint answered 200 without a token
    #[error("Authentication response did not contain a token")]
    MissingToken,

    /// The admin token contains bytes not allowed in a header value
    #[error("Admin token is not a valid header value")]
    InvalidToken,

    /// A request needing the admin token was made before authenticating
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Any other non-success response from the admin API
    #[error("Request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    /// A collection could not be created and the run was aborted
    #[error("Failed to create collection `{name}`: {source}")]
    CreateCollection {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or unusable user input
    #[error("Invalid input: {0}")]
    Input(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new input error
    pub fn input<T: fmt::Display>(msg: T) -> Self {
        Error::Input(msg.to_string())
    }

    /// Create an API error from a status code and raw body
    pub fn api(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        Error::Api {
            status: status.as_u16(),
            body: body.into(),
        }
    }

    /// Wrap the failure that aborted a run at collection `name`
    pub fn create_collection(name: &str, source: Error) -> Self {
        Error::CreateCollection {
            name: name.to_string(),
            source: Box::new(source),
        }
    }

    /// The raw response body, when the error came from the remote service
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Auth { body, .. } | Error::Api { body, .. } => Some(body),
            Error::CreateCollection { source, .. } => source.response_body(),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
