use std::collections::BTreeSet;

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{MongoDaoError, MongoResult};
use crate::dao::models::{
    BoardEntity, CellEntity, LeaderboardEntryEntity, RoundWinnerEntity, TileEntity,
};

pub const TILES_COLLECTION: &str = "tiles";
pub const BOARDS_COLLECTION: &str = "boards";
pub const LEADERBOARD_COLLECTION: &str = "leaderboard";
pub const GAME_STATUS_COLLECTION: &str = "gameStatus";
pub const CLEARED_COLLECTION: &str = "clearedWinners";

/// Key of the single document inside the `gameStatus` collection.
pub const GAME_STATUS_KEY: &str = "current";

/// Pool tile as stored in the `tiles` collection.
#[derive(Debug, Serialize, Deserialize)]
pub struct TileDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
}

impl From<TileEntity> for TileDocument {
    fn from(tile: TileEntity) -> Self {
        Self {
            id: tile.id.to_string(),
            text: tile.text,
        }
    }
}

impl TryFrom<TileDocument> for TileEntity {
    type Error = MongoDaoError;

    fn try_from(doc: TileDocument) -> MongoResult<Self> {
        let id = Uuid::parse_str(&doc.id).map_err(|source| MongoDaoError::InvalidId {
            collection: TILES_COLLECTION,
            key: doc.id.clone(),
            source,
        })?;
        Ok(Self { id, text: doc.text })
    }
}

/// Cell snapshot embedded in a board document.
#[derive(Debug, Serialize, Deserialize)]
pub struct CellDocument {
    /// `None` marks the synthetic free-space cell.
    pub tile_id: Option<String>,
    pub text: String,
}

impl From<&CellEntity> for CellDocument {
    fn from(cell: &CellEntity) -> Self {
        Self {
            tile_id: cell.tile_id.map(|id| id.to_string()),
            text: cell.text.clone(),
        }
    }
}

/// Personal board as stored in the `boards` collection, keyed by player name.
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardDocument {
    #[serde(rename = "_id")]
    pub player: String,
    pub cells: Vec<CellDocument>,
    pub marked: Vec<u32>,
    pub has_won: bool,
    pub created_at: DateTime,
}

impl BoardDocument {
    /// Convert into the shared entity, reporting corrupt tile ids.
    pub fn into_entity(self) -> MongoResult<(String, BoardEntity)> {
        let player = self.player;
        let cells = self
            .cells
            .into_iter()
            .map(|cell| {
                let tile_id = cell
                    .tile_id
                    .map(|raw| {
                        Uuid::parse_str(&raw).map_err(|source| MongoDaoError::InvalidId {
                            collection: BOARDS_COLLECTION,
                            key: player.clone(),
                            source,
                        })
                    })
                    .transpose()?;
                Ok(CellEntity {
                    tile_id,
                    text: cell.text,
                })
            })
            .collect::<MongoResult<Vec<_>>>()?;

        let marked: BTreeSet<usize> = self.marked.into_iter().map(|index| index as usize).collect();

        Ok((
            player,
            BoardEntity {
                cells,
                marked,
                has_won: self.has_won,
                created_at: self.created_at.to_system_time(),
            },
        ))
    }
}

/// The round winner slot stored under `gameStatus/current`.
#[derive(Debug, Serialize, Deserialize)]
pub struct WinnerDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub winner: String,
    pub won_at: DateTime,
}

impl From<WinnerDocument> for RoundWinnerEntity {
    fn from(doc: WinnerDocument) -> Self {
        Self {
            winner: doc.winner,
            won_at: doc.won_at.to_system_time(),
        }
    }
}

/// Per-player cumulative win count in the `leaderboard` collection.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardDocument {
    #[serde(rename = "_id")]
    pub player: String,
    pub wins: i64,
}

impl From<LeaderboardDocument> for LeaderboardEntryEntity {
    fn from(doc: LeaderboardDocument) -> Self {
        Self {
            player: doc.player,
            wins: doc.wins.max(0) as u64,
        }
    }
}

/// Per-player winner-banner suppression flag in `clearedWinners`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearedDocument {
    #[serde(rename = "_id")]
    pub player: String,
    pub cleared: bool,
}
