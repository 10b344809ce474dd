//! The per-player round state machine: cell toggles and the one-way
//! transition into a won round.

use tracing::info;

use crate::{
    dto::board::BoardView,
    error::ServiceError,
    services::{board_service, leaderboard_service, sse_events},
    state::{
        SharedState,
        round::{ToggleOutcome, plan_toggle},
    },
};

/// Toggle a cell on the player's board.
///
/// Free-cell toggles and toggles on an already-won board are accepted but
/// change nothing. A toggle that completes a line performs the full win
/// transition: the mark/win patch is one atomic write, then the winner slot
/// is overwritten, the leaderboard incremented exactly once, every
/// suppression flag dropped, and the win broadcast to connected sessions.
pub async fn toggle_cell(
    state: &SharedState,
    player: &str,
    index: usize,
) -> Result<BoardView, ServiceError> {
    let player = board_service::normalized_player(player)?;
    let store = state.require_store().await?;

    let Some(board) = store.find_board(player.clone()).await? else {
        return Err(ServiceError::NotFound(format!(
            "no board for player `{player}`"
        )));
    };

    match plan_toggle(&board, index) {
        ToggleOutcome::OutOfBounds => Err(ServiceError::InvalidInput(format!(
            "cell index {index} is out of range"
        ))),
        // No-ops by design: the free cell is always marked, and a won board
        // is frozen until regeneration.
        ToggleOutcome::FreeCell | ToggleOutcome::AlreadyWon => {
            board_service::load_view(&store, &player).await
        }
        ToggleOutcome::Updated { marked, newly_won } => {
            store
                .patch_board_marks(player.clone(), marked, newly_won)
                .await?;

            if newly_won {
                // The store returns the won_at it stamped, so the broadcast
                // carries this win's time even if another win lands right
                // after ours.
                let won_at = store.put_round_winner(player.clone()).await?;
                leaderboard_service::record_win(&store, &player).await?;
                store.reset_cleared().await?;

                sse_events::broadcast_round_won(state, &player, won_at);
                info!(player = %player, "bingo - round won");
            }

            board_service::load_view(&store, &player).await
        }
    }
}
