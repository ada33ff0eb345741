//! Scriptable in-memory remote used by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;
use reqwest::StatusCode;
use tokio::task::yield_now;

use crate::{
    dto::{
        auth::{Credentials, Identity, SessionProbe, UserId},
        game::{GameFilters, GameQuery, GameRecord, GameResult},
        settings::SettingsSnapshot,
        stats::Statistics,
    },
    error::{ApiError, ApiResult},
};

use super::RemoteApi;

/// Build the status-class error the HTTP transport would produce.
pub(crate) fn status_error(status: StatusCode) -> ApiError {
    ApiError::Status {
        message: format!("stub response with status {status}"),
        status,
    }
}

type Reply<T> = Result<T, StatusCode>;

fn resolve<T: Clone>(reply: &Reply<T>) -> ApiResult<T> {
    reply.clone().map_err(status_error)
}

/// Remote stub with one scripted reply per endpoint and call counters.
pub(crate) struct StubRemote {
    pub register_reply: Reply<()>,
    pub login_reply: Reply<Identity>,
    pub check_reply: Reply<SessionProbe>,
    pub logout_reply: Reply<()>,
    pub fetch_stats_reply: Reply<Statistics>,
    pub replace_stats_reply: Reply<()>,
    pub record_reply: Reply<Statistics>,
    pub games_reply: Reply<Vec<GameResult>>,
    pub fetch_settings_reply: Reply<SettingsSnapshot>,
    pub replace_settings_reply: Reply<()>,
    /// When set, the session check yields once before resolving so two
    /// concurrent initializations can overlap deterministically.
    pub slow_check: bool,
    pub calls: CallLog,
}

/// Per-endpoint invocation counters.
#[derive(Default)]
pub(crate) struct CallLog {
    pub check: AtomicUsize,
    pub logout: AtomicUsize,
    pub fetch_stats: AtomicUsize,
    pub replace_stats: AtomicUsize,
    pub record: AtomicUsize,
    pub list_games: AtomicUsize,
    pub fetch_settings: AtomicUsize,
    pub replace_settings: AtomicUsize,
}

impl Default for StubRemote {
    fn default() -> Self {
        Self {
            register_reply: Ok(()),
            login_reply: Err(StatusCode::UNAUTHORIZED),
            check_reply: Ok(SessionProbe::default()),
            logout_reply: Ok(()),
            fetch_stats_reply: Err(StatusCode::INTERNAL_SERVER_ERROR),
            replace_stats_reply: Ok(()),
            record_reply: Err(StatusCode::INTERNAL_SERVER_ERROR),
            games_reply: Ok(Vec::new()),
            fetch_settings_reply: Ok(SettingsSnapshot::default()),
            replace_settings_reply: Ok(()),
            slow_check: false,
            calls: CallLog::default(),
        }
    }
}

impl RemoteApi for StubRemote {
    fn register(&self, _credentials: Credentials) -> BoxFuture<'static, ApiResult<()>> {
        let reply = resolve(&self.register_reply);
        Box::pin(async move { reply })
    }

    fn login(&self, _credentials: Credentials) -> BoxFuture<'static, ApiResult<Identity>> {
        let reply = resolve(&self.login_reply);
        Box::pin(async move { reply })
    }

    fn check_session(&self) -> BoxFuture<'static, ApiResult<SessionProbe>> {
        self.calls.check.fetch_add(1, Ordering::SeqCst);
        let reply = resolve(&self.check_reply);
        let slow = self.slow_check;
        Box::pin(async move {
            if slow {
                yield_now().await;
            }
            reply
        })
    }

    fn logout(&self) -> BoxFuture<'static, ApiResult<()>> {
        self.calls.logout.fetch_add(1, Ordering::SeqCst);
        let reply = resolve(&self.logout_reply);
        Box::pin(async move { reply })
    }

    fn fetch_stats(&self, _user_id: UserId) -> BoxFuture<'static, ApiResult<Statistics>> {
        self.calls.fetch_stats.fetch_add(1, Ordering::SeqCst);
        let reply = resolve(&self.fetch_stats_reply);
        Box::pin(async move { reply })
    }

    fn replace_stats(&self, _stats: Statistics) -> BoxFuture<'static, ApiResult<()>> {
        self.calls.replace_stats.fetch_add(1, Ordering::SeqCst);
        let reply = resolve(&self.replace_stats_reply);
        Box::pin(async move { reply })
    }

    fn record_game(&self, _record: GameRecord) -> BoxFuture<'static, ApiResult<Statistics>> {
        self.calls.record.fetch_add(1, Ordering::SeqCst);
        let reply = resolve(&self.record_reply);
        Box::pin(async move { reply })
    }

    fn list_games(
        &self,
        _user_id: UserId,
        _query: GameQuery,
    ) -> BoxFuture<'static, ApiResult<Vec<GameResult>>> {
        self.calls.list_games.fetch_add(1, Ordering::SeqCst);
        let reply = resolve(&self.games_reply);
        Box::pin(async move { reply })
    }

    fn list_games_filtered(
        &self,
        _user_id: UserId,
        _query: GameQuery,
        _filters: GameFilters,
    ) -> BoxFuture<'static, ApiResult<Vec<GameResult>>> {
        self.calls.list_games.fetch_add(1, Ordering::SeqCst);
        let reply = resolve(&self.games_reply);
        Box::pin(async move { reply })
    }

    fn fetch_settings(&self, _user_id: UserId) -> BoxFuture<'static, ApiResult<SettingsSnapshot>> {
        self.calls.fetch_settings.fetch_add(1, Ordering::SeqCst);
        let reply = resolve(&self.fetch_settings_reply);
        Box::pin(async move { reply })
    }

    fn replace_settings(&self, _settings: SettingsSnapshot) -> BoxFuture<'static, ApiResult<()>> {
        self.calls.replace_settings.fetch_add(1, Ordering::SeqCst);
        let reply = resolve(&self.replace_settings_reply);
        Box::pin(async move { reply })
    }
}
