use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::tile::{TileInput, TileSummary},
    error::AppError,
    services::tile_service,
    state::SharedState,
};

/// Routes managing the shared tile pool.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/tiles", get(list_tiles).post(add_tile))
        .route("/tiles/{id}", put(edit_tile).delete(delete_tile))
}

/// List every tile in the pool.
#[utoipa::path(
    get,
    path = "/tiles",
    tag = "tiles",
    responses((status = 200, description = "All tiles in the pool", body = [TileSummary]))
)]
pub async fn list_tiles(State(state): State<SharedState>) -> Result<Json<Vec<TileSummary>>, AppError> {
    let tiles = tile_service::list_tiles(&state).await?;
    Ok(Json(tiles))
}

/// Add a tile to the pool.
#[utoipa::path(
    post,
    path = "/tiles",
    tag = "tiles",
    request_body = TileInput,
    responses(
        (status = 200, description = "Tile created", body = TileSummary),
        (status = 400, description = "Blank or over-length tile text"),
    )
)]
pub async fn add_tile(
    State(state): State<SharedState>,
    Json(payload): Json<TileInput>,
) -> Result<Json<TileSummary>, AppError> {
    payload.validate()?;
    let tile = tile_service::add_tile(&state, payload).await?;
    Ok(Json(tile))
}

/// Replace a tile's text. Rejected while any live board references the tile.
#[utoipa::path(
    put,
    path = "/tiles/{id}",
    tag = "tiles",
    params(("id" = Uuid, Path, description = "Identifier of the tile to edit")),
    request_body = TileInput,
    responses(
        (status = 200, description = "Tile updated", body = TileSummary),
        (status = 404, description = "No such tile"),
        (status = 409, description = "Tile is referenced by a live board"),
    )
)]
pub async fn edit_tile(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TileInput>,
) -> Result<Json<TileSummary>, AppError> {
    payload.validate()?;
    let tile = tile_service::edit_tile(&state, id, payload).await?;
    Ok(Json(tile))
}

/// Remove a tile from the pool. Rejected while any live board references it.
#[utoipa::path(
    delete,
    path = "/tiles/{id}",
    tag = "tiles",
    params(("id" = Uuid, Path, description = "Identifier of the tile to delete")),
    responses(
        (status = 204, description = "Tile deleted"),
        (status = 404, description = "No such tile"),
        (status = 409, description = "Tile is referenced by a live board"),
    )
)]
pub async fn delete_tile(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    tile_service::delete_tile(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
