use serde::Serialize;
use utoipa::ToSchema;

use crate::dao::models::LeaderboardEntryEntity;

/// One leaderboard row.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntrySummary {
    /// Player name.
    pub player: String,
    /// Total rounds won.
    pub wins: u64,
}

impl From<LeaderboardEntryEntity> for LeaderboardEntrySummary {
    fn from(entry: LeaderboardEntryEntity) -> Self {
        Self {
            player: entry.player,
            wins: entry.wins,
        }
    }
}
