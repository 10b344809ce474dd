//! Tile pool management: create, list, edit, and delete the reusable tile
//! texts that boards are drawn from.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    dao::{bingo_store::BingoStore, models::TileEntity},
    dto::{tile::TileInput, tile::TileSummary, validation::validate_tile_text},
    error::ServiceError,
    state::SharedState,
};

/// Add a tile to the shared pool. The text is trimmed before storing.
pub async fn add_tile(state: &SharedState, input: TileInput) -> Result<TileSummary, ServiceError> {
    let text = normalized_text(&input.text)?;
    let store = state.require_store().await?;

    let tile = TileEntity {
        id: Uuid::new_v4(),
        text,
    };
    store.insert_tile(tile.clone()).await?;

    Ok(tile.into())
}

/// List the whole pool in a stable display order.
pub async fn list_tiles(state: &SharedState) -> Result<Vec<TileSummary>, ServiceError> {
    let store = state.require_store().await?;
    let mut tiles = store.list_tiles().await?;
    tiles.sort_by(|a, b| a.text.cmp(&b.text).then(a.id.cmp(&b.id)));
    Ok(tiles.into_iter().map(Into::into).collect())
}

/// Replace a tile's text. Boards keep their snapshot of the old text; the
/// edit is rejected while any live board still references the tile.
pub async fn edit_tile(
    state: &SharedState,
    id: Uuid,
    input: TileInput,
) -> Result<TileSummary, ServiceError> {
    let text = normalized_text(&input.text)?;
    let store = state.require_store().await?;

    ensure_tile_unused(&store, id).await?;
    store.update_tile_text(id, text.clone()).await?;

    Ok(TileSummary { id, text })
}

/// Permanently remove a tile, unless a live board still references it.
pub async fn delete_tile(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let store = state.require_store().await?;

    ensure_tile_unused(&store, id).await?;
    if !store.delete_tile(id).await? {
        return Err(ServiceError::NotFound(format!("tile `{id}`")));
    }

    Ok(())
}

/// Scan every live board for a snapshot of this tile.
///
/// The scan reads the boards as they are at check time; a board generated a
/// moment later will have copied the tile already, so it never dangles.
async fn ensure_tile_unused(
    store: &Arc<dyn BingoStore>,
    id: Uuid,
) -> Result<(), ServiceError> {
    let boards = store.list_boards().await?;
    let in_use = boards
        .iter()
        .any(|(_, board)| board.cells.iter().any(|cell| cell.tile_id == Some(id)));

    if in_use {
        return Err(ServiceError::TileInUse { id });
    }
    Ok(())
}

fn normalized_text(raw: &str) -> Result<String, ServiceError> {
    validate_tile_text(raw).map_err(|err| {
        ServiceError::InvalidInput(
            err.message
                .map(|message| message.into_owned())
                .unwrap_or_else(|| "invalid tile text".into()),
        )
    })?;
    Ok(raw.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        dao::{memory::MemoryStore, models::CellEntity},
        state::AppState,
    };

    async fn state_with_store() -> (crate::state::SharedState, Arc<dyn BingoStore>) {
        let state = AppState::new(AppConfig::default());
        let store: Arc<dyn BingoStore> = Arc::new(MemoryStore::default());
        state.install_store(store.clone()).await;
        (state, store)
    }

    #[tokio::test]
    async fn add_trims_and_lists_sorted() {
        let (state, _store) = state_with_store().await;

        add_tile(&state, TileInput { text: "  b tile  ".into() })
            .await
            .unwrap();
        add_tile(&state, TileInput { text: "a tile".into() })
            .await
            .unwrap();

        let tiles = list_tiles(&state).await.unwrap();
        let texts: Vec<&str> = tiles.iter().map(|tile| tile.text.as_str()).collect();
        assert_eq!(texts, vec!["a tile", "b tile"]);
    }

    #[tokio::test]
    async fn add_rejects_blank_and_overlong_text() {
        let (state, _store) = state_with_store().await;

        let blank = add_tile(&state, TileInput { text: "   ".into() }).await;
        assert!(matches!(blank, Err(ServiceError::InvalidInput(_))));

        let long = add_tile(&state, TileInput { text: "x".repeat(41) }).await;
        assert!(matches!(long, Err(ServiceError::InvalidInput(_))));

        assert!(list_tiles(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_rejected_while_referenced_then_allowed_after_regeneration() {
        let (state, store) = state_with_store().await;

        let tile = add_tile(&state, TileInput { text: "watched".into() })
            .await
            .unwrap();

        let referencing = vec![CellEntity {
            tile_id: Some(tile.id),
            text: "watched".into(),
        }];
        store
            .put_board("mia".into(), referencing)
            .await
            .unwrap();

        let err = delete_tile(&state, tile.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::TileInUse { id } if id == tile.id));
        assert_eq!(list_tiles(&state).await.unwrap().len(), 1);

        // Regenerating the board without the tile releases it.
        store
            .put_board("mia".into(), vec![CellEntity::free("Free Space")])
            .await
            .unwrap();
        delete_tile(&state, tile.id).await.unwrap();
        assert!(list_tiles(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_checks_the_same_in_use_rule() {
        let (state, store) = state_with_store().await;

        let tile = add_tile(&state, TileInput { text: "original".into() })
            .await
            .unwrap();
        store
            .put_board(
                "kris".into(),
                vec![CellEntity {
                    tile_id: Some(tile.id),
                    text: "original".into(),
                }],
            )
            .await
            .unwrap();

        let err = edit_tile(&state, tile.id, TileInput { text: "changed".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::TileInUse { .. }));

        // Unknown tile surfaces as not-found once no board references it.
        let missing = edit_tile(&state, Uuid::new_v4(), TileInput { text: "changed".into() }).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }
}
