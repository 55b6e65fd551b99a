//! Domino coverage geometry and placement legality.

use crate::board::Board;
use crate::common::{Coord, Orientation};

/// The two cells a domino anchored at `anchor` covers, or `None` when either
/// falls outside the grid.
pub fn resolve_coverage(board: &Board, anchor: Coord, orientation: Orientation) -> Option<[Coord; 2]> {
    let (d_row, d_col) = orientation.offset();
    let second = Coord::new(
        anchor.row.checked_add(d_row)?,
        anchor.col.checked_add(d_col)?,
    );
    if board.is_within_bounds(anchor) && board.is_within_bounds(second) {
        Some([anchor, second])
    } else {
        None
    }
}

/// True when `positions` is non-empty and every cell is open.
pub fn can_place(board: &Board, positions: &[Coord]) -> bool {
    !positions.is_empty()
        && positions
            .iter()
            .all(|p| board.cell(p.row, p.col).is_some_and(|c| c.is_open()))
}

/// Coverage of a legal placement at `anchor`, if there is one.
pub fn legal_coverage(board: &Board, anchor: Coord, orientation: Orientation) -> Option<[Coord; 2]> {
    resolve_coverage(board, anchor, orientation).filter(|positions| can_place(board, positions))
}
