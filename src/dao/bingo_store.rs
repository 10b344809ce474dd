use std::{collections::BTreeSet, time::SystemTime};

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::{
    models::{BoardEntity, CellEntity, LeaderboardEntryEntity, RoundWinnerEntity, TileEntity},
    storage::StorageResult,
};

/// Abstraction over the persistence layer for the tile pool, boards, the
/// round winner slot, suppression flags, and the leaderboard.
///
/// Timestamps (`created_at`, `won_at`) are assigned by the backend's own
/// clock so that players with skewed client clocks agree on round times.
pub trait BingoStore: Send + Sync {
    fn insert_tile(&self, tile: TileEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Merge-update the text of an existing tile. Fails with
    /// [`StorageError::Missing`](crate::dao::storage::StorageError) when the
    /// tile does not exist.
    fn update_tile_text(&self, id: Uuid, text: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Returns whether a tile was actually removed.
    fn delete_tile(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    fn list_tiles(&self) -> BoxFuture<'static, StorageResult<Vec<TileEntity>>>;

    fn find_board(&self, player: String) -> BoxFuture<'static, StorageResult<Option<BoardEntity>>>;
    /// Overwrite the player's board with a fresh one: the given cells, marks
    /// reset to the free cell, win flag cleared, creation time stamped by the
    /// backend. Returns the stored board.
    fn put_board(
        &self,
        player: String,
        cells: Vec<CellEntity>,
    ) -> BoxFuture<'static, StorageResult<BoardEntity>>;
    /// Atomically persist a mark/win transition for an existing board. Fails
    /// with `Missing` when the player has no board.
    fn patch_board_marks(
        &self,
        player: String,
        marked: BTreeSet<usize>,
        has_won: bool,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn list_boards(&self) -> BoxFuture<'static, StorageResult<Vec<(String, BoardEntity)>>>;

    fn round_winner(&self) -> BoxFuture<'static, StorageResult<Option<RoundWinnerEntity>>>;
    /// Overwrite the single winner slot and return the win time the backend
    /// stamped on it. Last write wins by design.
    fn put_round_winner(&self, winner: String) -> BoxFuture<'static, StorageResult<SystemTime>>;

    /// Atomically add one win for the player, creating the entry at 1.
    fn increment_wins(&self, player: String) -> BoxFuture<'static, StorageResult<()>>;
    fn list_leaderboard(&self) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>>;

    /// Whether the player has suppressed the current winner banner.
    fn is_cleared(&self, player: String) -> BoxFuture<'static, StorageResult<bool>>;
    /// Suppress the winner banner for this player (set on board regeneration).
    fn set_cleared(&self, player: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Drop every suppression flag; called when a new winner is recorded so
    /// the next round's banner is shown again.
    fn reset_cleared(&self) -> BoxFuture<'static, StorageResult<()>>;

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
