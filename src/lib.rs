//! Client-side session and statistics synchronization core for the Reaction
//! aim trainer.
//!
//! The crate mirrors server-held identity, statistics, gameplay settings, and
//! a bounded window of recent game results, keeping them consistent with the
//! remote authority across network failure, session expiry, and concurrent
//! gameplay events. Views and guards receive the stores by explicit
//! construction; there is no process-wide state.

pub mod api;
pub mod config;
pub mod dto;
mod error;
pub mod guard;
pub mod settings;
pub mod state;
pub mod util;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api::{RemoteApi, http::HttpRemote},
    settings::SettingsCache,
    state::{SessionStore, SharedSession},
};

pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, SettingsError};

/// Wire the HTTP transport, the settings cache, and the session store
/// together from one configuration.
///
/// The transport is built once and shared by both stores, so they ride the
/// same cookie jar.
pub fn bootstrap(config: &ClientConfig) -> ApiResult<(SharedSession, Arc<SettingsCache>)> {
    let remote: Arc<dyn RemoteApi> = Arc::new(HttpRemote::new(config)?);
    let settings = SettingsCache::new(remote.clone());
    let session = SessionStore::new(remote, settings.clone(), config.previously_authorized);
    Ok((session, settings))
}

/// Configure tracing subscribers so embedding applications get structured
/// logs by default.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
