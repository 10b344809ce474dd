//! Board generation and the per-player board view, including the
//! "someone else won" banner decision.

use std::sync::Arc;

use rand::{rng, seq::SliceRandom};
use tracing::info;

use crate::{
    dao::{
        bingo_store::BingoStore,
        models::{CellEntity, TileEntity},
    },
    dto::board::BoardView,
    error::ServiceError,
    state::{
        SharedState,
        round::{FREE_CELL_INDEX, POOL_DRAW, RoundPhase},
    },
};

/// Assemble the view a player session renders: their board plus the winner
/// banner decision.
pub async fn board_view(state: &SharedState, player: &str) -> Result<BoardView, ServiceError> {
    let player = normalized_player(player)?;
    let store = state.require_store().await?;
    load_view(&store, &player).await
}

/// Generate a fresh board for the player, overwriting any previous one.
///
/// Destructive by design; the UI confirms with the player before calling
/// this when a board already exists. Regeneration also suppresses the
/// current winner banner for this player.
pub async fn generate_board(state: &SharedState, player: &str) -> Result<BoardView, ServiceError> {
    let player = normalized_player(player)?;
    let store = state.require_store().await?;

    let pool = store.list_tiles().await?;
    if pool.len() < POOL_DRAW {
        return Err(ServiceError::InsufficientTiles {
            have: pool.len(),
            needed: POOL_DRAW,
        });
    }

    let cells = draw_cells(pool, state.config().free_space_label());
    store.put_board(player.clone(), cells).await?;
    store.set_cleared(player.clone()).await?;

    info!(player = %player, "board generated");
    load_view(&store, &player).await
}

/// Draw a uniform random board from the pool: 24 tile snapshots with the
/// synthetic free cell fixed at index 12.
fn draw_cells(mut pool: Vec<TileEntity>, free_label: &str) -> Vec<CellEntity> {
    pool.shuffle(&mut rng());

    let mut cells: Vec<CellEntity> = pool
        .iter()
        .take(POOL_DRAW)
        .map(CellEntity::snapshot_of)
        .collect();
    cells.insert(FREE_CELL_INDEX, CellEntity::free(free_label));
    cells
}

/// Fetch board, winner slot, and suppression flag, and decide the banner.
pub(crate) async fn load_view(
    store: &Arc<dyn BingoStore>,
    player: &str,
) -> Result<BoardView, ServiceError> {
    let board = store.find_board(player.to_owned()).await?;
    let winner = store.round_winner().await?;
    let cleared = store.is_cleared(player.to_owned()).await?;

    let phase = RoundPhase::of(board.as_ref());
    let beaten_by = winner
        .filter(|slot| slot.winner != player && phase != RoundPhase::Won && !cleared)
        .map(Into::into);

    Ok(BoardView {
        player: player.to_owned(),
        board: board.map(Into::into),
        beaten_by,
    })
}

pub(crate) fn normalized_player(raw: &str) -> Result<String, ServiceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(
            "player name must not be empty".into(),
        ));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::memory::MemoryStore,
        dto::tile::TileInput,
        services::tile_service,
        state::{AppState, round::BOARD_CELLS},
    };

    async fn state_with_store() -> (crate::state::SharedState, Arc<dyn BingoStore>) {
        let state = AppState::new(AppConfig::default());
        let store: Arc<dyn BingoStore> = Arc::new(MemoryStore::default());
        state.install_store(store.clone()).await;
        (state, store)
    }

    async fn seed_tiles(state: &crate::state::SharedState, count: usize) {
        for index in 0..count {
            tile_service::add_tile(
                state,
                TileInput {
                    text: format!("tile {index}"),
                },
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn generation_requires_a_full_pool() {
        let (state, store) = state_with_store().await;
        seed_tiles(&state, 23).await;

        let err = generate_board(&state, "mia").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InsufficientTiles { have: 23, needed: 24 }
        ));
        // Nothing was written.
        assert!(store.find_board("mia".into()).await.unwrap().is_none());

        // One more tile and generation succeeds.
        seed_tiles(&state, 1).await;
        let view = generate_board(&state, "mia").await.unwrap();
        let board = view.board.expect("board should exist");
        assert_eq!(board.cells.len(), BOARD_CELLS);
        assert_eq!(board.marked, vec![FREE_CELL_INDEX]);
        assert!(!board.has_won);
    }

    #[tokio::test]
    async fn generated_board_pins_the_free_cell() {
        let (state, store) = state_with_store().await;
        seed_tiles(&state, 30).await;

        generate_board(&state, "theo").await.unwrap();
        let board = store.find_board("theo".into()).await.unwrap().unwrap();

        assert_eq!(board.cells.len(), BOARD_CELLS);
        assert!(board.cells[FREE_CELL_INDEX].tile_id.is_none());
        let free_cells = board
            .cells
            .iter()
            .filter(|cell| cell.tile_id.is_none())
            .count();
        assert_eq!(free_cells, 1);
        assert_eq!(board.marked, BTreeSet::from([FREE_CELL_INDEX]));
    }

    #[tokio::test]
    async fn regeneration_overwrites_prior_progress() {
        let (state, store) = state_with_store().await;
        seed_tiles(&state, 24).await;

        generate_board(&state, "katie").await.unwrap();
        store
            .patch_board_marks(
                "katie".into(),
                BTreeSet::from([FREE_CELL_INDEX, 0, 1]),
                false,
            )
            .await
            .unwrap();

        generate_board(&state, "katie").await.unwrap();
        let board = store.find_board("katie".into()).await.unwrap().unwrap();
        assert_eq!(board.marked, BTreeSet::from([FREE_CELL_INDEX]));
        assert!(!board.has_won);
    }

    #[tokio::test]
    async fn blank_player_names_are_rejected() {
        let (state, _store) = state_with_store().await;
        let err = board_view(&state, "   ").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }
}
