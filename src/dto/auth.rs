//! Identity and authentication payloads.

use serde::{Deserialize, Serialize};

use crate::dto::{settings::SettingsSnapshot, stats::Statistics};

/// Opaque user identifier assigned by the remote authority.
///
/// The client never interprets the value; it is only echoed back in queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identifier received from the authority.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier for query parameters.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Username/password pair submitted to the login and register endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Build a credentials payload from borrowed inputs.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Authenticated identity as reported by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque id assigned by the authority.
    pub id: UserId,
    /// Display name chosen at registration.
    pub username: String,
}

/// Response of the session-check endpoint.
///
/// On a positive probe the authority bundles the identity together with the
/// persisted statistics and gameplay settings so the client can hydrate its
/// caches in a single round-trip.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionProbe {
    /// Whether the ambient credential still maps to a live session.
    pub authenticated: bool,
    /// Identity of the session owner; present on a positive probe.
    #[serde(default)]
    pub user: Option<Identity>,
    /// Persisted statistics snapshot, when present.
    #[serde(default)]
    pub stats: Option<Statistics>,
    /// Persisted gameplay settings, when present.
    #[serde(default)]
    pub settings: Option<SettingsSnapshot>,
}
