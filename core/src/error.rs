//! Error types for the Vaiz client.
//!
//! # Design
//! The server reports failures as `{error: {code, fields, originalType,
//! meta: {description, token}}}`. Each known code family gets its own
//! variant so callers can match on "bad token" or "not found" without string
//! comparisons; unknown codes land in `Api`. Every server-originated variant
//! keeps the full `ServerError` for diagnostics.
//!
//! Local failures (a missing upload file, an out-of-range argument) are not
//! server errors and have their own variants.

use serde::Deserialize;
use thiserror::Error;

/// Error payload as sent by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerError {
    pub code: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub original_type: Option<String>,
    #[serde(default)]
    pub meta: Option<ServerErrorMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerErrorMeta {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl ServerError {
    pub fn description(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.description.as_deref())
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if !self.fields.is_empty() {
            write!(f, " (fields: {})", self.fields.join(", "))?;
        }
        if let Some(description) = self.description() {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

/// Errors returned by `VaizClient` parse methods and by `Session`.
#[derive(Debug, Error)]
pub enum VaizError {
    /// `JwtIncorrect` / `JwtExpired`.
    #[error("authentication failed: {0}")]
    Auth(ServerError),

    #[error("validation failed: {0}")]
    Validation(ServerError),

    #[error("not found: {0}")]
    NotFound(ServerError),

    #[error("permission denied: {0}")]
    PermissionDenied(ServerError),

    #[error("rate limit exceeded: {0}")]
    RateLimitExceeded(ServerError),

    /// A server error with a code this client does not classify.
    #[error("API error: {0}")]
    Api(ServerError),

    /// Non-2xx status without an error envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VaizError {
    /// Classify a server error by its code.
    pub fn from_server(error: ServerError) -> Self {
        match error.code.as_str() {
            "JwtIncorrect" | "JwtExpired" => VaizError::Auth(error),
            "ValidationError" => VaizError::Validation(error),
            "NotFound" => VaizError::NotFound(error),
            "PermissionDenied" => VaizError::PermissionDenied(error),
            "RateLimitExceeded" => VaizError::RateLimitExceeded(error),
            _ => VaizError::Api(error),
        }
    }

    /// The server error carried by this error, if it came from the server.
    pub fn server_error(&self) -> Option<&ServerError> {
        match self {
            VaizError::Auth(e)
            | VaizError::Validation(e)
            | VaizError::NotFound(e)
            | VaizError::PermissionDenied(e)
            | VaizError::RateLimitExceeded(e)
            | VaizError::Api(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, VaizError>;
