//! Runtime configuration for the client core.

use crate::error::{ApiError, ApiResult};

/// Environment variable holding the base URL of the remote authority.
const BASE_URL_ENV: &str = "REACTION_API_URL";
/// Optional environment variable seeding the "previously authorized" hint.
const RESUME_HINT_ENV: &str = "REACTION_RESUME_SESSION";

/// Runtime configuration describing how to reach the remote authority.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote authority, without a trailing slash.
    pub base_url: String,
    /// Advisory hint that a session was established on a previous run.
    ///
    /// Never proof of authentication; it only tells the navigation guard that
    /// a session check is worth the round-trip before deciding.
    pub previously_authorized: bool,
}

impl ClientConfig {
    /// Construct a configuration pointing at an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            previously_authorized: false,
        }
    }

    /// Seed the advisory "previously authorized" hint.
    ///
    /// The embedding application persists this flag across runs; the core
    /// treats it as advisory only.
    pub fn with_previous_session(mut self, hint: bool) -> Self {
        self.previously_authorized = hint;
        self
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> ApiResult<Self> {
        let base_url =
            std::env::var(BASE_URL_ENV).map_err(|_| ApiError::MissingEnvVar { var: BASE_URL_ENV })?;

        let mut config = Self::new(base_url);

        if let Ok(hint) = std::env::var(RESUME_HINT_ENV) {
            config = config.with_previous_session(matches!(hint.as_str(), "1" | "true"));
        }

        Ok(config)
    }
}
