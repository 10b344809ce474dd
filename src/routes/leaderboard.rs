use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::leaderboard::LeaderboardEntrySummary, error::AppError, services::leaderboard_service,
    state::SharedState,
};

/// Routes exposing the cumulative leaderboard.
pub fn router() -> Router<SharedState> {
    Router::new().route("/leaderboard", get(leaderboard))
}

/// List all leaderboard entries, most wins first.
#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "leaderboard",
    responses((status = 200, description = "Ranked win counts", body = [LeaderboardEntrySummary]))
)]
pub async fn leaderboard(
    State(state): State<SharedState>,
) -> Result<Json<Vec<LeaderboardEntrySummary>>, AppError> {
    let entries = leaderboard_service::list_sorted(&state).await?;
    Ok(Json(entries))
}
