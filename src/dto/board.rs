use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::{BoardEntity, CellEntity, RoundWinnerEntity},
    dto::format_system_time,
    state::round::has_bingo,
};

/// Everything a player session needs to render its page: the board (if one
/// exists) and the cross-player winner banner decision.
#[derive(Debug, Serialize, ToSchema)]
pub struct BoardView {
    /// Player this view belongs to.
    pub player: String,
    /// The player's board, absent until first generation.
    pub board: Option<BoardSummary>,
    /// Present when another player won the current round and this player has
    /// neither won themselves nor started a new board since.
    pub beaten_by: Option<WinnerNotice>,
}

/// Public projection of a personal board.
#[derive(Debug, Serialize, ToSchema)]
pub struct BoardSummary {
    /// 25 cells, free space at index 12.
    pub cells: Vec<CellSummary>,
    /// Marked cell indices.
    pub marked: Vec<usize>,
    /// Win status, recomputed from the mark set on every read.
    pub has_won: bool,
    /// Round start time, RFC3339.
    pub created_at: String,
}

/// One board cell.
#[derive(Debug, Serialize, ToSchema)]
pub struct CellSummary {
    /// Originating pool tile; `null` for the free-space cell.
    pub tile_id: Option<Uuid>,
    pub text: String,
}

/// Banner data shown to players beaten to the current round's bingo.
#[derive(Debug, Serialize, ToSchema)]
pub struct WinnerNotice {
    /// Name of the round winner.
    pub winner: String,
    /// When the win was recorded, RFC3339.
    pub won_at: String,
}

impl From<&CellEntity> for CellSummary {
    fn from(cell: &CellEntity) -> Self {
        Self {
            tile_id: cell.tile_id,
            text: cell.text.clone(),
        }
    }
}

impl From<BoardEntity> for BoardSummary {
    fn from(board: BoardEntity) -> Self {
        // The stored flag is only a cache; derive the truth from the marks.
        let has_won = has_bingo(&board.marked);
        Self {
            cells: board.cells.iter().map(Into::into).collect(),
            marked: board.marked.into_iter().collect(),
            has_won,
            created_at: format_system_time(board.created_at),
        }
    }
}

impl From<RoundWinnerEntity> for WinnerNotice {
    fn from(winner: RoundWinnerEntity) -> Self {
        Self {
            winner: winner.winner,
            won_at: format_system_time(winner.won_at),
        }
    }
}
