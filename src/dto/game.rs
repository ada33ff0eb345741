//! Game result payloads and list-query parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use time::OffsetDateTime;

use crate::dto::{auth::UserId, settings::SettingsSnapshot};

/// Outcome of a finished game as produced by the gameplay layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOutcome {
    /// Targets hit.
    pub score: u32,
    /// Wall-clock play time.
    pub time: Duration,
}

/// Body of the record-game request.
#[serde_as]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Owner of the game, echoed from the current identity.
    pub user_id: UserId,
    /// Targets hit.
    pub score: u32,
    /// Play time, encoded as integer milliseconds.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub time: Duration,
    /// Settings the game was played under.
    pub settings: SettingsSnapshot,
}

/// A persisted game result.
///
/// Entries shown in the recent-activity cache are client-synthesized at game
/// completion, so their `created_at` carries client-clock time; entries
/// fetched from the authority carry server-assigned time.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    /// Owner of the game.
    pub user_id: UserId,
    /// Targets hit.
    pub score: u32,
    /// Play time, encoded as integer milliseconds on the wire.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub time: Duration,
    /// Settings the game was played under.
    pub settings: SettingsSnapshot,
    /// Creation instant, RFC 3339 on the wire.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One page of the paginated game list.
#[derive(Debug, Clone, Deserialize)]
pub struct GamesPage {
    /// Games in the requested order.
    pub games: Vec<GameResult>,
}

/// Fields the authority can sort game lists by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Server-assigned creation time.
    CreatedAt,
    /// Targets hit.
    Score,
    /// Play time.
    Time,
}

impl SortField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::Score => "score",
            SortField::Time => "time",
        }
    }
}

/// Sort direction for game lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest/oldest first.
    Ascending,
    /// Largest/newest first.
    Descending,
}

impl SortOrder {
    /// Wire name of the direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Sort specification for game lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by.
    pub by: SortField,
    /// Direction to sort in.
    pub order: SortOrder,
}

impl SortSpec {
    /// Most recently created games first.
    pub fn newest_first() -> Self {
        Self {
            by: SortField::CreatedAt,
            order: SortOrder::Descending,
        }
    }
}

/// Pagination and ordering parameters of a game-list request.
#[derive(Debug, Clone, Copy)]
pub struct GameQuery {
    /// Maximum number of games to return.
    pub limit: u32,
    /// Number of games to skip.
    pub offset: u32,
    /// Ordering applied by the authority.
    pub sort: SortSpec,
}

impl GameQuery {
    /// Query for the `limit` most recently created games.
    pub fn recent(limit: u32) -> Self {
        Self {
            limit,
            offset: 0,
            sort: SortSpec::newest_first(),
        }
    }

    /// Render the query-string pairs for the list endpoints.
    pub(crate) fn to_query(self, user_id: &UserId) -> Vec<(&'static str, String)> {
        vec![
            ("userId", user_id.as_str().to_owned()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("sortedBy", self.sort.by.as_str().to_owned()),
            ("sortedOrder", self.sort.order.as_str().to_owned()),
        ]
    }
}

/// Predicate set for the filtered game list, serialized into the `filters`
/// query parameter. Absent fields do not constrain the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFilters {
    /// Only games played with this circle size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circle_size: Option<f64>,
    /// Only games played with this spawn interval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_interval: Option<f64>,
    /// Only games played with this shrink time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shrink_time: Option<f64>,
}

impl GameFilters {
    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.circle_size.is_none() && self.spawn_interval.is_none() && self.shrink_time.is_none()
    }
}
