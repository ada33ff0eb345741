//! Session state owned by the client core.

pub mod recent;
pub mod session;

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use time::OffsetDateTime;
use tokio::sync::{Mutex, RwLock, watch};
use tracing::{info, warn};

use crate::{
    api::RemoteApi,
    dto::{
        auth::{Credentials, Identity, SessionProbe, UserId},
        game::{GameFilters, GameOutcome, GameQuery, GameRecord, GameResult, SortSpec},
        settings::SettingsSnapshot,
        stats::Statistics,
    },
    error::{ApiError, ApiResult},
    settings::SettingsCache,
};

pub use self::recent::{RECENT_GAMES_CAPACITY, RecentGames};
pub use self::session::SessionPhase;

/// Shared handle to the one session store of the application.
pub type SharedSession = Arc<SessionStore>;

/// Owner of the authenticated identity, the mirrored statistics, and the
/// recent-activity cache.
///
/// Constructed once at startup and passed to views and guards explicitly;
/// all mutations of `stats` and `recent` go through this store, so their
/// replace-wholesale updates need no further coordination.
pub struct SessionStore {
    remote: Arc<dyn RemoteApi>,
    settings: Arc<SettingsCache>,
    phase: RwLock<SessionPhase>,
    stats: RwLock<Option<Statistics>>,
    recent: RwLock<RecentGames>,
    previously_authorized: AtomicBool,
    authenticated: watch::Sender<bool>,
    init_gate: Mutex<()>,
    init_epoch: AtomicU64,
}

impl SessionStore {
    /// Construct the store wrapped in an [`Arc`] so it can be shared cheaply.
    ///
    /// `previously_authorized` seeds the advisory hint persisted by the
    /// embedding application; it never makes the store authenticated by
    /// itself.
    pub fn new(
        remote: Arc<dyn RemoteApi>,
        settings: Arc<SettingsCache>,
        previously_authorized: bool,
    ) -> SharedSession {
        let (authenticated, _rx) = watch::channel(false);
        Arc::new(Self {
            remote,
            settings,
            phase: RwLock::new(SessionPhase::default()),
            stats: RwLock::new(None),
            recent: RwLock::new(RecentGames::new()),
            previously_authorized: AtomicBool::new(previously_authorized),
            authenticated,
            init_gate: Mutex::new(()),
            init_epoch: AtomicU64::new(0),
        })
    }

    /// True while an identity is present.
    pub async fn is_authenticated(&self) -> bool {
        self.phase.read().await.is_authenticated()
    }

    /// The active identity, if any.
    pub async fn identity(&self) -> Option<Identity> {
        self.phase.read().await.identity().cloned()
    }

    /// Last statistics aggregate seen from the authority.
    pub async fn stats(&self) -> Option<Statistics> {
        self.stats.read().await.clone()
    }

    /// Snapshot of the recent-activity cache, newest first.
    pub async fn recent_games(&self) -> Vec<GameResult> {
        self.recent.read().await.to_vec()
    }

    /// Advisory hint that a session was established previously.
    pub fn previously_authorized(&self) -> bool {
        self.previously_authorized.load(Ordering::Acquire)
    }

    /// Subscribe to authentication changes.
    ///
    /// The navigation layer watches this flip to `false` as its signal to
    /// move to the login view.
    pub fn auth_watcher(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    /// Probe the authority for a live session and hydrate local state.
    ///
    /// Safe to call on every navigation: overlapping callers share a single
    /// in-flight check through the gate, while sequential calls re-check.
    /// Returns the resulting authentication state.
    pub async fn initialize_session(&self) -> bool {
        let epoch = self.init_epoch.load(Ordering::Acquire);
        let _gate = self.init_gate.lock().await;
        if self.init_epoch.load(Ordering::Acquire) != epoch {
            // another caller completed a check while we waited on the gate
            return self.is_authenticated().await;
        }

        let probe = self.remote.check_session().await;
        self.init_epoch.fetch_add(1, Ordering::AcqRel);

        match probe {
            Ok(SessionProbe {
                authenticated: true,
                user: Some(user),
                stats,
                settings,
            }) => {
                self.settings
                    .patch(user.id.clone(), settings.map(Into::into).unwrap_or_default())
                    .await;
                *self.stats.write().await = stats;
                *self.phase.write().await = SessionPhase::Authenticated(user.clone());
                self.previously_authorized.store(true, Ordering::Release);
                self.authenticated.send_replace(true);
                info!(username = %user.username, "session restored");

                // warm once per page lifetime, not on every re-check
                if self.recent.read().await.is_empty() {
                    self.warm_recent_games(user.id).await;
                }
                true
            }
            Ok(_) => {
                self.teardown_local().await;
                false
            }
            Err(err) => {
                warn!(error = %err, "session check failed");
                self.teardown_local().await;
                false
            }
        }
    }

    /// Authenticate with the authority. Statistics and recent games are
    /// populated lazily by later calls, not here.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        match self.remote.login(Credentials::new(username, password)).await {
            Ok(user) => {
                info!(username = %user.username, "logged in");
                self.settings.bind_user(user.id.clone()).await;
                *self.phase.write().await = SessionPhase::Authenticated(user);
                self.previously_authorized.store(true, Ordering::Release);
                self.authenticated.send_replace(true);
                true
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                false
            }
        }
    }

    /// Create an account. Pure request/response; no local state changes.
    pub async fn register(&self, username: &str, password: &str) -> ApiResult<()> {
        self.remote
            .register(Credentials::new(username, password))
            .await
            .inspect_err(|err| warn!(error = %err, "registration failed"))
    }

    /// Invalidate the session on the authority and tear down local state.
    ///
    /// A failed remote invalidation is surfaced, but the local teardown
    /// always completes so the UI can never show stale authenticated data.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self.remote.logout().await;
        if let Err(ref err) = result {
            warn!(error = %err, "remote session invalidation failed");
        }
        self.teardown_local().await;
        result
    }

    /// Fetch the statistics aggregate and replace the local copy wholesale.
    /// No-op when unauthenticated.
    pub async fn get_stats(&self) -> ApiResult<()> {
        let Some(user) = self.identity().await else {
            return Ok(());
        };

        match self.remote.fetch_stats(user.id).await {
            Ok(stats) => {
                *self.stats.write().await = Some(stats);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "stats fetch failed");
                Err(self.recover(err).await)
            }
        }
    }

    /// Optimistically replace the local statistics, then push them to the
    /// authority. No-op when unauthenticated.
    ///
    /// On a non-401 push failure the authoritative copy is re-fetched so the
    /// optimistic value cannot outlive the rejection.
    pub async fn set_stats(&self, new_stats: Statistics) -> ApiResult<()> {
        let Some(user) = self.identity().await else {
            return Ok(());
        };

        *self.stats.write().await = Some(new_stats.clone());

        match self.remote.replace_stats(new_stats).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, "stats update failed");
                if !err.is_unauthorized() {
                    match self.remote.fetch_stats(user.id).await {
                        Ok(stats) => *self.stats.write().await = Some(stats),
                        Err(refetch_err) => {
                            warn!(error = %refetch_err, "could not restore authoritative stats")
                        }
                    }
                }
                Err(self.recover(err).await)
            }
        }
    }

    /// Post a finished game, adopt the updated statistics the authority
    /// returns, and prepend the result to the recent-activity cache.
    /// No-op when unauthenticated.
    pub async fn record_game(
        &self,
        outcome: GameOutcome,
        settings: SettingsSnapshot,
    ) -> ApiResult<()> {
        let Some(user) = self.identity().await else {
            return Ok(());
        };

        let record = GameRecord {
            user_id: user.id.clone(),
            score: outcome.score,
            time: outcome.time,
            settings,
        };

        match self.remote.record_game(record).await {
            Ok(stats) => {
                *self.stats.write().await = Some(stats);
                // the cached entry is client-synthesized, so created_at is
                // client-clock time rather than server-assigned time
                self.recent.write().await.push(GameResult {
                    user_id: user.id,
                    score: outcome.score,
                    time: outcome.time,
                    settings,
                    created_at: OffsetDateTime::now_utc(),
                });
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "posting game failed");
                Err(self.recover(err).await)
            }
        }
    }

    /// Fetch one page of the user's games. Nothing is cached beyond the
    /// returned page. Empty when unauthenticated.
    pub async fn list_games(
        &self,
        limit: u32,
        offset: u32,
        sort: SortSpec,
    ) -> ApiResult<Vec<GameResult>> {
        let Some(user) = self.identity().await else {
            return Ok(Vec::new());
        };

        let query = GameQuery {
            limit,
            offset,
            sort,
        };
        match self.remote.list_games(user.id, query).await {
            Ok(games) => Ok(games),
            Err(err) => {
                warn!(error = %err, "listing games failed");
                Err(self.recover(err).await)
            }
        }
    }

    /// Fetch one page of the user's games matching the given predicates.
    /// Empty when unauthenticated.
    pub async fn list_games_filtered(
        &self,
        limit: u32,
        offset: u32,
        filters: GameFilters,
        sort: SortSpec,
    ) -> ApiResult<Vec<GameResult>> {
        let Some(user) = self.identity().await else {
            return Ok(Vec::new());
        };

        let query = GameQuery {
            limit,
            offset,
            sort,
        };
        match self.remote.list_games_filtered(user.id, query, filters).await {
            Ok(games) => Ok(games),
            Err(err) => {
                warn!(error = %err, "listing filtered games failed");
                Err(self.recover(err).await)
            }
        }
    }

    /// Cache-warm fetch of the newest games. A failure leaves the cache
    /// empty so a later initialization retries.
    async fn warm_recent_games(&self, user_id: UserId) {
        let query = GameQuery::recent(RECENT_GAMES_CAPACITY as u32);
        match self.remote.list_games(user_id, query).await {
            Ok(games) => self.recent.write().await.refill(games),
            Err(err) => warn!(error = %err, "failed to warm the recent games cache"),
        }
    }

    async fn teardown_local(&self) {
        *self.phase.write().await = SessionPhase::Unauthenticated;
        *self.stats.write().await = None;
        self.recent.write().await.clear();
        self.settings.clear().await;
        self.previously_authorized.store(false, Ordering::Release);
        self.authenticated.send_replace(false);
    }

    /// Shared failure recovery: the store must never stay authenticated
    /// after the authority rejected the session.
    async fn recover(&self, err: ApiError) -> ApiError {
        if err.is_unauthorized() {
            warn!("server rejected the session; clearing local session state");
            if let Err(logout_err) = self.logout().await {
                warn!(error = %logout_err, "remote invalidation failed during forced logout");
            }
        }
        err
    }
}
