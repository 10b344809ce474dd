use std::collections::BTreeSet;
use std::time::SystemTime;
use uuid::Uuid;

/// Tile stored in the shared pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileEntity {
    /// Stable identifier for the tile.
    pub id: Uuid,
    /// Display text, trimmed and at most 40 characters.
    pub text: String,
}

/// One cell of a board. Cells are snapshots taken at generation time, so a
/// later edit of the pool tile never changes a board already in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEntity {
    /// Pool tile this cell was copied from; `None` only for the synthetic
    /// free-space cell at the board centre.
    pub tile_id: Option<Uuid>,
    /// Snapshot of the tile text at generation time.
    pub text: String,
}

impl CellEntity {
    /// Build a snapshot cell from a pool tile.
    pub fn snapshot_of(tile: &TileEntity) -> Self {
        Self {
            tile_id: Some(tile.id),
            text: tile.text.clone(),
        }
    }

    /// Build the synthetic free-space cell.
    pub fn free(label: &str) -> Self {
        Self {
            tile_id: None,
            text: label.to_owned(),
        }
    }
}

/// Personal 5x5 board, keyed in storage by player name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntity {
    /// Exactly 25 cell snapshots, free space fixed at index 12.
    pub cells: Vec<CellEntity>,
    /// Marked cell indices; always contains 12.
    pub marked: BTreeSet<usize>,
    /// Cached win status. The mark set is the source of truth; this flag is
    /// recomputed on load and never trusted on its own.
    pub has_won: bool,
    /// Generation time, assigned by the store's server clock.
    pub created_at: SystemTime,
}

/// Most recent round winner, a single global record overwritten by each win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundWinnerEntity {
    /// Name of the winning player.
    pub winner: String,
    /// When the winning toggle was recorded, per the store's server clock.
    pub won_at: SystemTime,
}

/// Cumulative win counter for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntryEntity {
    /// Player name.
    pub player: String,
    /// Total rounds won; incremented exactly once per win.
    pub wins: u64,
}
