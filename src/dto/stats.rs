//! Statistics aggregate mirrored from the remote authority.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque statistics record owned by the remote authority.
///
/// The shape is not interpreted client-side; the cache only ever replaces the
/// whole value with the latest authoritative copy, so partial merges are
/// impossible by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statistics(Value);

impl Statistics {
    /// Borrow the underlying JSON value for display layers.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Statistics {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
