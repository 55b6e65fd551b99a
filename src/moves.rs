//! Legal-move queries. None of these mutate the board.

use alloc::vec::Vec;

use crate::board::Board;
use crate::common::{Coord, GameStatus, Orientation};
use crate::rules::legal_coverage;

/// Non-void anchors in row-major order.
fn anchors(board: &Board) -> impl Iterator<Item = Coord> + '_ {
    board
        .cells()
        .iter()
        .filter(|c| !c.is_void())
        .map(|c| Coord::new(c.row, c.col))
}

/// True as soon as one legal placement for `orientation` is found.
/// Always false once the game is finished.
pub fn has_available_move(board: &Board, orientation: Orientation) -> bool {
    if board.status() != GameStatus::Active {
        return false;
    }
    anchors(board).any(|anchor| legal_coverage(board, anchor, orientation).is_some())
}

/// Number of anchors where `orientation` could legally place a domino.
///
/// Unlike [`has_available_move`] this ignores the game status, so finished
/// boards still report their structural move counts.
pub fn count_available_moves(board: &Board, orientation: Orientation) -> usize {
    anchors(board)
        .filter(|&anchor| legal_coverage(board, anchor, orientation).is_some())
        .count()
}

/// Anchors of every legal placement for `orientation`.
pub fn available_moves(board: &Board, orientation: Orientation) -> Vec<Coord> {
    anchors(board)
        .filter(|&anchor| legal_coverage(board, anchor, orientation).is_some())
        .collect()
}

/// `(horizontal, vertical)` legal move counts.
pub fn move_counts(board: &Board) -> (usize, usize) {
    (
        count_available_moves(board, Orientation::Horizontal),
        count_available_moves(board, Orientation::Vertical),
    )
}

/// Absolute difference between horizontal and vertical move counts.
pub fn move_diff(board: &Board) -> usize {
    let (h, v) = move_counts(board);
    h.abs_diff(v)
}
