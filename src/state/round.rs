//! Pure round logic: winning lines, win detection, and the per-player
//! toggle transition. Everything here is side-effect free so the service
//! layer can persist exactly what a transition decided.

use std::collections::BTreeSet;

use crate::dao::models::BoardEntity;

/// Number of cells on a board.
pub const BOARD_CELLS: usize = 25;
/// Index of the synthetic free-space cell, always implicitly marked.
pub const FREE_CELL_INDEX: usize = 12;
/// Tiles drawn from the pool per board (everything except the free cell).
pub const POOL_DRAW: usize = 24;

/// The 12 winning lines over a 5x5 grid indexed row-major: 5 rows, 5
/// columns, and both diagonals.
pub const WINNING_LINES: [[usize; 5]; 12] = [
    [0, 1, 2, 3, 4],
    [5, 6, 7, 8, 9],
    [10, 11, 12, 13, 14],
    [15, 16, 17, 18, 19],
    [20, 21, 22, 23, 24],
    [0, 5, 10, 15, 20],
    [1, 6, 11, 16, 21],
    [2, 7, 12, 17, 22],
    [3, 8, 13, 18, 23],
    [4, 9, 14, 19, 24],
    [0, 6, 12, 18, 24],
    [4, 8, 12, 16, 20],
];

/// True iff the marked set covers at least one full winning line.
///
/// This is the source of truth for win status: the persisted `has_won` flag
/// is only a cache of this function over the persisted mark set.
pub fn has_bingo(marked: &BTreeSet<usize>) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|index| marked.contains(index)))
}

/// Per-player round phase, derived from the stored board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// The player has never generated a board (or storage holds none).
    NoBoard,
    /// A board exists and no winning line is complete.
    Active,
    /// A winning line is complete; marks are frozen until regeneration.
    Won,
}

impl RoundPhase {
    /// Derive the phase from an optional board, recomputing win status from
    /// the mark set rather than trusting the cached flag.
    pub fn of(board: Option<&BoardEntity>) -> Self {
        match board {
            None => RoundPhase::NoBoard,
            Some(board) if has_bingo(&board.marked) => RoundPhase::Won,
            Some(_) => RoundPhase::Active,
        }
    }
}

/// Decision produced by [`plan_toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Index outside 0..25; the caller should reject the request.
    OutOfBounds,
    /// The free-space cell was toggled; nothing changes.
    FreeCell,
    /// The round is already won; marks are immutable until regeneration.
    AlreadyWon,
    /// Flip accepted: the new mark set and whether it completes a line.
    Updated {
        marked: BTreeSet<usize>,
        newly_won: bool,
    },
}

/// Plan a toggle of `index` on `board` without mutating anything.
pub fn plan_toggle(board: &BoardEntity, index: usize) -> ToggleOutcome {
    if index >= BOARD_CELLS {
        return ToggleOutcome::OutOfBounds;
    }
    if index == FREE_CELL_INDEX {
        return ToggleOutcome::FreeCell;
    }
    if has_bingo(&board.marked) {
        return ToggleOutcome::AlreadyWon;
    }

    let mut marked = board.marked.clone();
    if !marked.remove(&index) {
        marked.insert(index);
    }
    let newly_won = has_bingo(&marked);

    ToggleOutcome::Updated { marked, newly_won }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;
    use crate::dao::models::CellEntity;

    fn board_with_marks(marks: &[usize]) -> BoardEntity {
        let cells = (0..BOARD_CELLS)
            .map(|index| {
                if index == FREE_CELL_INDEX {
                    CellEntity::free("Free Space")
                } else {
                    CellEntity {
                        tile_id: Some(uuid::Uuid::new_v4()),
                        text: format!("tile {index}"),
                    }
                }
            })
            .collect();

        BoardEntity {
            cells,
            marked: marks.iter().copied().collect(),
            has_won: false,
            created_at: SystemTime::now(),
        }
    }

    #[test]
    fn every_winning_line_triggers_bingo() {
        for line in WINNING_LINES {
            let marked: BTreeSet<usize> = line.into_iter().collect();
            assert!(has_bingo(&marked), "line {line:?} should win");
        }
    }

    #[test]
    fn empty_and_center_only_sets_do_not_win() {
        assert!(!has_bingo(&BTreeSet::new()));
        assert!(!has_bingo(&BTreeSet::from([FREE_CELL_INDEX])));
    }

    #[test]
    fn partial_line_does_not_win() {
        let marked: BTreeSet<usize> = [0, 1, 2, 3].into_iter().collect();
        assert!(!has_bingo(&marked));
    }

    #[test]
    fn superset_of_a_line_wins() {
        let marked: BTreeSet<usize> = [0, 1, 2, 3, 4, 7, 19, 22].into_iter().collect();
        assert!(has_bingo(&marked));
    }

    #[test]
    fn phase_derivation_ignores_cached_flag() {
        assert_eq!(RoundPhase::of(None), RoundPhase::NoBoard);

        let active = board_with_marks(&[FREE_CELL_INDEX, 3]);
        assert_eq!(RoundPhase::of(Some(&active)), RoundPhase::Active);

        // A stale has_won=false flag must not hide a completed line.
        let mut won = board_with_marks(&[0, 1, 2, 3, 4]);
        won.has_won = false;
        assert_eq!(RoundPhase::of(Some(&won)), RoundPhase::Won);
    }

    #[test]
    fn toggle_is_self_inverse() {
        let board = board_with_marks(&[FREE_CELL_INDEX]);

        let ToggleOutcome::Updated { marked, newly_won } = plan_toggle(&board, 7) else {
            panic!("first toggle should update");
        };
        assert!(!newly_won);
        assert!(marked.contains(&7));

        let mut toggled = board.clone();
        toggled.marked = marked;
        let ToggleOutcome::Updated { marked, newly_won } = plan_toggle(&toggled, 7) else {
            panic!("second toggle should update");
        };
        assert!(!newly_won);
        assert_eq!(marked, board.marked);
    }

    #[test]
    fn free_cell_and_out_of_bounds_are_rejected() {
        let board = board_with_marks(&[FREE_CELL_INDEX]);
        assert_eq!(plan_toggle(&board, FREE_CELL_INDEX), ToggleOutcome::FreeCell);
        assert_eq!(plan_toggle(&board, BOARD_CELLS), ToggleOutcome::OutOfBounds);
    }

    #[test]
    fn toggles_are_frozen_after_a_win() {
        let board = board_with_marks(&[0, 1, 2, 3, 4]);
        assert_eq!(plan_toggle(&board, 9), ToggleOutcome::AlreadyWon);
        // Unmarking a winning cell is also rejected; the win is one-way.
        assert_eq!(plan_toggle(&board, 0), ToggleOutcome::AlreadyWon);
    }

    #[test]
    fn completing_a_column_reports_newly_won() {
        let board = board_with_marks(&[FREE_CELL_INDEX, 1, 6, 16, 21]);
        let ToggleOutcome::Updated { newly_won, .. } = plan_toggle(&board, 11) else {
            panic!("toggle should update");
        };
        assert!(newly_won);
    }
}
