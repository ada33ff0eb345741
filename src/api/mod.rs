//! Access to the remote authority.

pub mod http;
#[cfg(test)]
pub(crate) mod stub;

use futures::future::BoxFuture;

use crate::{
    dto::{
        auth::{Credentials, Identity, SessionProbe, UserId},
        game::{GameFilters, GameQuery, GameRecord, GameResult},
        settings::SettingsSnapshot,
        stats::Statistics,
    },
    error::ApiResult,
};

/// Abstraction over the remote authority consumed by the session store and
/// the settings cache.
///
/// All session persistence lives behind this seam; implementations attach the
/// ambient credential themselves, so no token ever crosses it.
pub trait RemoteApi: Send + Sync {
    /// Create an account. Does not authenticate.
    fn register(&self, credentials: Credentials) -> BoxFuture<'static, ApiResult<()>>;
    /// Authenticate and return the established identity.
    fn login(&self, credentials: Credentials) -> BoxFuture<'static, ApiResult<Identity>>;
    /// Probe whether the ambient credential still maps to a live session.
    fn check_session(&self) -> BoxFuture<'static, ApiResult<SessionProbe>>;
    /// Invalidate the server-side session.
    fn logout(&self) -> BoxFuture<'static, ApiResult<()>>;
    /// Fetch the statistics aggregate of the given user.
    fn fetch_stats(&self, user_id: UserId) -> BoxFuture<'static, ApiResult<Statistics>>;
    /// Replace the persisted statistics aggregate wholesale.
    fn replace_stats(&self, stats: Statistics) -> BoxFuture<'static, ApiResult<()>>;
    /// Record a finished game; returns the updated statistics aggregate.
    fn record_game(&self, record: GameRecord) -> BoxFuture<'static, ApiResult<Statistics>>;
    /// Fetch one page of the user's games.
    fn list_games(
        &self,
        user_id: UserId,
        query: GameQuery,
    ) -> BoxFuture<'static, ApiResult<Vec<GameResult>>>;
    /// Fetch one page of the user's games matching the given predicates.
    fn list_games_filtered(
        &self,
        user_id: UserId,
        query: GameQuery,
        filters: GameFilters,
    ) -> BoxFuture<'static, ApiResult<Vec<GameResult>>>;
    /// Fetch the persisted gameplay settings of the given user.
    fn fetch_settings(&self, user_id: UserId) -> BoxFuture<'static, ApiResult<SettingsSnapshot>>;
    /// Replace the persisted gameplay settings wholesale.
    fn replace_settings(&self, settings: SettingsSnapshot) -> BoxFuture<'static, ApiResult<()>>;
}
