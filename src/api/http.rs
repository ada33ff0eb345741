//! HTTP transport implementing [`RemoteApi`] against the remote authority.

use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::ClientConfig,
    dto::{
        auth::{Credentials, Identity, SessionProbe, UserId},
        game::{GameFilters, GameQuery, GameRecord, GameResult, GamesPage},
        settings::SettingsSnapshot,
        stats::Statistics,
    },
    error::{ApiError, ApiResult},
};

use super::RemoteApi;

/// Error body shape returned by the authority.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Remote-authority client backed by `reqwest`.
///
/// The cookie jar carries the session credential, so every request is
/// credentialed automatically and the core never sees a token.
#[derive(Clone)]
pub struct HttpRemote {
    client: Client,
    base_url: Arc<str>,
}

impl HttpRemote {
    /// Build a transport pointing at the configured authority.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|source| ApiError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Send a request and normalize every failure into [`ApiError`].
    ///
    /// Non-success responses are drained for the authority's `{message}`
    /// body; a generic message is substituted when none can be read.
    async fn send(builder: RequestBuilder, path: &str) -> ApiResult<Response> {
        let response = builder.send().await.map_err(|source| ApiError::Network {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| format!("request failed with status {status}"));

        Err(ApiError::Status { message, status })
    }

    async fn fetch_json<T>(builder: RequestBuilder, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = Self::send(builder, path).await?;
        response.json::<T>().await.map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    async fn expect_ok(builder: RequestBuilder, path: &str) -> ApiResult<()> {
        Self::send(builder, path).await.map(drop)
    }
}

impl RemoteApi for HttpRemote {
    fn register(&self, credentials: Credentials) -> BoxFuture<'static, ApiResult<()>> {
        const PATH: &str = "/users/auth";
        let builder = self.request(Method::POST, PATH).json(&credentials);
        Box::pin(async move { Self::expect_ok(builder, PATH).await })
    }

    fn login(&self, credentials: Credentials) -> BoxFuture<'static, ApiResult<Identity>> {
        const PATH: &str = "/users/login";
        let builder = self.request(Method::POST, PATH).json(&credentials);
        Box::pin(async move { Self::fetch_json(builder, PATH).await })
    }

    fn check_session(&self) -> BoxFuture<'static, ApiResult<SessionProbe>> {
        const PATH: &str = "/users/check-auth";
        let builder = self.request(Method::GET, PATH);
        Box::pin(async move { Self::fetch_json(builder, PATH).await })
    }

    fn logout(&self) -> BoxFuture<'static, ApiResult<()>> {
        const PATH: &str = "/users/logout";
        let builder = self.request(Method::POST, PATH);
        Box::pin(async move { Self::expect_ok(builder, PATH).await })
    }

    fn fetch_stats(&self, user_id: UserId) -> BoxFuture<'static, ApiResult<Statistics>> {
        const PATH: &str = "/stats";
        let builder = self
            .request(Method::GET, PATH)
            .query(&[("userId", user_id.as_str())]);
        Box::pin(async move { Self::fetch_json(builder, PATH).await })
    }

    fn replace_stats(&self, stats: Statistics) -> BoxFuture<'static, ApiResult<()>> {
        const PATH: &str = "/stats";
        let builder = self.request(Method::PUT, PATH).json(&stats);
        Box::pin(async move { Self::expect_ok(builder, PATH).await })
    }

    fn record_game(&self, record: GameRecord) -> BoxFuture<'static, ApiResult<Statistics>> {
        const PATH: &str = "/game";
        let builder = self.request(Method::POST, PATH).json(&record);
        Box::pin(async move { Self::fetch_json(builder, PATH).await })
    }

    fn list_games(
        &self,
        user_id: UserId,
        query: GameQuery,
    ) -> BoxFuture<'static, ApiResult<Vec<GameResult>>> {
        const PATH: &str = "/game";
        let builder = self
            .request(Method::GET, PATH)
            .query(&query.to_query(&user_id));
        Box::pin(async move {
            Self::fetch_json::<GamesPage>(builder, PATH)
                .await
                .map(|page| page.games)
        })
    }

    fn list_games_filtered(
        &self,
        user_id: UserId,
        query: GameQuery,
        filters: GameFilters,
    ) -> BoxFuture<'static, ApiResult<Vec<GameResult>>> {
        const PATH: &str = "/game/filter/settings";
        let builder = serde_json::to_string(&filters)
            .map_err(|source| ApiError::Encode {
                path: PATH.to_string(),
                source,
            })
            .map(|encoded| {
                self.request(Method::GET, PATH)
                    .query(&query.to_query(&user_id))
                    .query(&[("filters", encoded)])
            });
        Box::pin(async move {
            Self::fetch_json::<GamesPage>(builder?, PATH)
                .await
                .map(|page| page.games)
        })
    }

    fn fetch_settings(&self, user_id: UserId) -> BoxFuture<'static, ApiResult<SettingsSnapshot>> {
        const PATH: &str = "/settings";
        let builder = self
            .request(Method::GET, PATH)
            .query(&[("userId", user_id.as_str())]);
        Box::pin(async move { Self::fetch_json(builder, PATH).await })
    }

    fn replace_settings(&self, settings: SettingsSnapshot) -> BoxFuture<'static, ApiResult<()>> {
        const PATH: &str = "/settings";
        let builder = self.request(Method::PUT, PATH).json(&settings);
        Box::pin(async move { Self::expect_ok(builder, PATH).await })
    }
}
