//! Error types shared across the client core.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`ApiError`] failures.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures that can occur while talking to the remote authority.
///
/// Every operation in the core normalizes its failures into this shape; the
/// status hint carried by [`ApiError::Status`] is what drives the forced
/// logout on session expiry.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required environment variable is missing.
    #[error("missing environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build HTTP client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// A request could not be sent or no response was received.
    #[error("failed to reach the server at `{path}`")]
    Network {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// The authority answered with a non-success status code.
    #[error("{message}")]
    Status { message: String, status: StatusCode },
    /// Response payload could not be parsed into the expected shape.
    #[error("failed to decode response from `{path}`")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// A request parameter could not be serialized to the wire format.
    #[error("failed to encode request parameters for `{path}`")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Status code reported by the authority, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the authority rejected the current session.
    ///
    /// Any authenticated operation seeing this must tear the local session
    /// down before reporting the failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

/// Failures raised by the settings cache.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No session is active, so there is no user to read or write settings for.
    #[error("no active session")]
    NoSession,
    /// The new settings violate a local invariant (all values must be positive).
    #[error("invalid settings: {0}")]
    Invalid(#[from] validator::ValidationErrors),
    /// The remote authority rejected the operation.
    #[error(transparent)]
    Api(#[from] ApiError),
}
