use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::board::BoardView, error::AppError, services::board_service, services::round_service,
    state::SharedState,
};

/// Routes for per-player boards and cell marking.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/boards/{player}", get(board_view).post(generate_board))
        .route("/boards/{player}/cells/{index}", post(toggle_cell))
}

/// Fetch the player's board view, including the winner banner decision.
#[utoipa::path(
    get,
    path = "/boards/{player}",
    tag = "boards",
    params(("player" = String, Path, description = "Player name")),
    responses(
        (status = 200, description = "Board view for the player", body = BoardView),
        (status = 400, description = "Blank player name"),
    )
)]
pub async fn board_view(
    State(state): State<SharedState>,
    Path(player): Path<String>,
) -> Result<Json<BoardView>, AppError> {
    let view = board_service::board_view(&state, &player).await?;
    Ok(Json(view))
}

/// Generate a fresh board for the player, replacing any existing one.
#[utoipa::path(
    post,
    path = "/boards/{player}",
    tag = "boards",
    params(("player" = String, Path, description = "Player name")),
    responses(
        (status = 200, description = "Newly generated board", body = BoardView),
        (status = 409, description = "Fewer than 24 tiles in the pool"),
    )
)]
pub async fn generate_board(
    State(state): State<SharedState>,
    Path(player): Path<String>,
) -> Result<Json<BoardView>, AppError> {
    let view = board_service::generate_board(&state, &player).await?;
    Ok(Json(view))
}

/// Toggle one cell's mark, resolving the round when a line completes.
#[utoipa::path(
    post,
    path = "/boards/{player}/cells/{index}",
    tag = "boards",
    params(
        ("player" = String, Path, description = "Player name"),
        ("index" = usize, Path, description = "Cell index, 0 through 24"),
    ),
    responses(
        (status = 200, description = "Board view after the toggle", body = BoardView),
        (status = 400, description = "Cell index out of range"),
        (status = 404, description = "Player has no board"),
    )
)]
pub async fn toggle_cell(
    State(state): State<SharedState>,
    Path((player, index)): Path<(String, usize)>,
) -> Result<Json<BoardView>, AppError> {
    let view = round_service::toggle_cell(&state, &player, index).await?;
    Ok(Json(view))
}
