//! Client-side cache of gameplay settings, synchronized with the authority.

use std::sync::Arc;

use tokio::sync::RwLock;
use validator::Validate;

use crate::{
    api::RemoteApi,
    dto::{
        auth::UserId,
        settings::{SettingsPatch, SettingsSnapshot},
    },
    error::SettingsError,
};

/// Cache of the current gameplay tunables.
///
/// Holds the last value seen from either the session store's patch or a
/// successful fetch. Writes require an active session; the bound user is
/// maintained exclusively by the session store through the `pub(crate)`
/// methods, a one-way injection channel rather than shared mutable state.
pub struct SettingsCache {
    remote: Arc<dyn RemoteApi>,
    user: RwLock<Option<UserId>>,
    current: RwLock<SettingsSnapshot>,
}

impl SettingsCache {
    /// Create a cache holding the default tunables and no bound user.
    pub fn new(remote: Arc<dyn RemoteApi>) -> Arc<Self> {
        Arc::new(Self {
            remote,
            user: RwLock::new(None),
            current: RwLock::new(SettingsSnapshot::default()),
        })
    }

    /// Current settings snapshot.
    pub async fn get(&self) -> SettingsSnapshot {
        *self.current.read().await
    }

    /// Validate and persist new settings, then commit them locally.
    ///
    /// The local value only changes once the authority accepted the write,
    /// so a rejected update cannot leave the cache ahead of the server.
    pub async fn set(&self, next: SettingsSnapshot) -> Result<(), SettingsError> {
        next.validate()?;
        if self.user.read().await.is_none() {
            return Err(SettingsError::NoSession);
        }

        self.remote.replace_settings(next).await?;
        *self.current.write().await = next;
        Ok(())
    }

    /// Re-read the persisted settings for the bound user and cache them.
    pub async fn fetch(&self) -> Result<SettingsSnapshot, SettingsError> {
        let Some(user) = self.user.read().await.clone() else {
            return Err(SettingsError::NoSession);
        };

        let snapshot = self.remote.fetch_settings(user).await?;
        *self.current.write().await = snapshot;
        Ok(snapshot)
    }

    /// Bind the cache to the session owner without touching the values.
    pub(crate) async fn bind_user(&self, user: UserId) {
        *self.user.write().await = Some(user);
    }

    /// Session-initialization injection: bind the owner and overlay the
    /// server-held values.
    pub(crate) async fn patch(&self, user: UserId, patch: SettingsPatch) {
        self.bind_user(user).await;
        patch.apply_to(&mut *self.current.write().await);
    }

    /// Drop the bound user and fall back to the default tunables.
    pub(crate) async fn clear(&self) {
        *self.user.write().await = None;
        *self.current.write().await = SettingsSnapshot::default();
    }
}
