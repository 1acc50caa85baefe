//! Helpers shared by the tree searches.

use crate::game::{Board, Player};

use super::agent::SearchResult;

/// Column ordering: center-first for better alpha-beta pruning.
pub(super) const MOVE_ORDER: [usize; 7] = [3, 2, 4, 1, 5, 0, 6];

/// Base score of a won position; the remaining depth is added so quicker
/// wins (and slower losses) are preferred.
pub(super) const WIN_SCORE: i32 = 100_000;

/// Window bound, larger than any reachable score.
pub(super) const INFINITY: i32 = 1_000_000;

/// State of a position right after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Status {
    /// The player who just moved completed a line.
    Won,
    Draw,
    Open,
}

/// Play `col` for `player` on a copy of `board`.
pub(super) fn play(board: &Board, col: usize, player: Player) -> Option<(Board, Status)> {
    let mut next = *board;
    let row = next.drop_piece(col, player.to_cell()).ok()?;
    let status = if next.check_win(row, col) {
        Status::Won
    } else if next.is_full() {
        Status::Draw
    } else {
        Status::Open
    };
    Some((next, status))
}

/// Legal columns in search order.
pub(super) fn ordered_moves(board: &Board) -> impl Iterator<Item = usize> + '_ {
    MOVE_ORDER
        .into_iter()
        .filter(move |&col| !board.is_column_full(col))
}

/// Score every legal root move with `score_child` and keep the first move
/// with the strictly highest score.
pub(super) fn best_root_move(
    board: &Board,
    player: Player,
    mut score_child: impl FnMut(&Board, Status) -> i32,
) -> Option<SearchResult> {
    let mut best: Option<SearchResult> = None;

    for col in ordered_moves(board) {
        let Some((child, status)) = play(board, col, player) else {
            continue;
        };
        let score = score_child(&child, status);
        match best {
            Some(b) if score <= b.score => {}
            _ => best = Some(SearchResult { column: col, score }),
        }
    }

    best
}
