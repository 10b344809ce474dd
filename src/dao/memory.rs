//! In-memory [`BingoStore`] used by service-level tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex},
    time::SystemTime,
};

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::{
    bingo_store::BingoStore,
    models::{BoardEntity, CellEntity, LeaderboardEntryEntity, RoundWinnerEntity, TileEntity},
    storage::{StorageError, StorageResult},
};

use crate::state::round::FREE_CELL_INDEX;

#[derive(Default)]
struct Inner {
    tiles: BTreeMap<Uuid, TileEntity>,
    boards: BTreeMap<String, BoardEntity>,
    winner: Option<RoundWinnerEntity>,
    wins: BTreeMap<String, u64>,
    cleared: BTreeSet<String>,
}

/// Mutex-backed store double mirroring the Mongo backend's semantics.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

impl BingoStore for MemoryStore {
    fn insert_tile(&self, tile: TileEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.lock().tiles.insert(tile.id, tile);
            Ok(())
        })
    }

    fn update_tile_text(&self, id: Uuid, text: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut inner = store.lock();
            match inner.tiles.get_mut(&id) {
                Some(tile) => {
                    tile.text = text;
                    Ok(())
                }
                None => Err(StorageError::missing("tiles", id.to_string())),
            }
        })
    }

    fn delete_tile(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.lock().tiles.remove(&id).is_some()) })
    }

    fn list_tiles(&self) -> BoxFuture<'static, StorageResult<Vec<TileEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.lock().tiles.values().cloned().collect()) })
    }

    fn find_board(&self, player: String) -> BoxFuture<'static, StorageResult<Option<BoardEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.lock().boards.get(&player).cloned()) })
    }

    fn put_board(
        &self,
        player: String,
        cells: Vec<CellEntity>,
    ) -> BoxFuture<'static, StorageResult<BoardEntity>> {
        let store = self.clone();
        Box::pin(async move {
            let board = BoardEntity {
                cells,
                marked: BTreeSet::from([FREE_CELL_INDEX]),
                has_won: false,
                created_at: SystemTime::now(),
            };
            store.lock().boards.insert(player, board.clone());
            Ok(board)
        })
    }

    fn patch_board_marks(
        &self,
        player: String,
        marked: BTreeSet<usize>,
        has_won: bool,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut inner = store.lock();
            match inner.boards.get_mut(&player) {
                Some(board) => {
                    board.marked = marked;
                    board.has_won = has_won;
                    Ok(())
                }
                None => Err(StorageError::missing("boards", player)),
            }
        })
    }

    fn list_boards(&self) -> BoxFuture<'static, StorageResult<Vec<(String, BoardEntity)>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store
                .lock()
                .boards
                .iter()
                .map(|(player, board)| (player.clone(), board.clone()))
                .collect())
        })
    }

    fn round_winner(&self) -> BoxFuture<'static, StorageResult<Option<RoundWinnerEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.lock().winner.clone()) })
    }

    fn put_round_winner(&self, winner: String) -> BoxFuture<'static, StorageResult<SystemTime>> {
        let store = self.clone();
        Box::pin(async move {
            let won_at = SystemTime::now();
            store.lock().winner = Some(RoundWinnerEntity { winner, won_at });
            Ok(won_at)
        })
    }

    fn increment_wins(&self, player: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            *store.lock().wins.entry(player).or_insert(0) += 1;
            Ok(())
        })
    }

    fn list_leaderboard(&self) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store
                .lock()
                .wins
                .iter()
                .map(|(player, wins)| LeaderboardEntryEntity {
                    player: player.clone(),
                    wins: *wins,
                })
                .collect())
        })
    }

    fn is_cleared(&self, player: String) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.lock().cleared.contains(&player)) })
    }

    fn set_cleared(&self, player: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.lock().cleared.insert(player);
            Ok(())
        })
    }

    fn reset_cleared(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.lock().cleared.clear();
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
