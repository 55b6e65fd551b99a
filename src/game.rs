use alloc::string::String;
use alloc::vec::Vec;

use crate::{
    board::{self, Board},
    common::{Cell, CellState, Coord, GameStatus, Orientation, Placement},
    config::{BoardConfig, FairnessPolicy, GenerateError},
    fairness::{self, BalancedBoard},
    moves::has_available_move,
    rules::{can_place, resolve_coverage},
};

/// Serializable view of a board, including the legal move counts of both sides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub seed: Option<String>,
    pub inactive_count: usize,
    pub actual_inactive_percentage: f64,
    pub requested_inactive_percentage: Option<f64>,
    pub playable_square_count: usize,
    pub total_square_count: usize,
    pub cells: Vec<Cell>,
    pub placements: Vec<Placement>,
    pub current_player: Option<Orientation>,
    pub status: GameStatus,
    pub winner: Option<Orientation>,
    pub horizontal_moves: usize,
    pub vertical_moves: usize,
}

/// Turn-based placement state machine holding the only handle to its board.
#[derive(Clone, Debug, PartialEq)]
pub struct GameEngine {
    board: Board,
}

impl GameEngine {
    /// Generate a fresh board for `config`.
    pub fn new(config: &BoardConfig) -> Result<Self, GenerateError> {
        Ok(Self {
            board: board::generate(config)?,
        })
    }

    /// Generate a move-balanced board for `config`.
    pub fn balanced(config: &BoardConfig, policy: &FairnessPolicy) -> Result<Self, GenerateError> {
        let BalancedBoard { board, .. } = fairness::generate_balanced(config, policy)?;
        Ok(Self { board })
    }

    /// Take ownership of an already generated board.
    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn status(&self) -> GameStatus {
        self.board.status
    }

    pub fn current_player(&self) -> Option<Orientation> {
        self.board.current_player
    }

    pub fn winner(&self) -> Option<Orientation> {
        self.board.winner
    }

    /// `(horizontal, vertical)` legal move counts on the current board.
    pub fn move_counts(&self) -> (usize, usize) {
        crate::moves::move_counts(&self.board)
    }

    /// Place a domino for `orientation` (the current player when `None`).
    ///
    /// Returns `None` and leaves the board untouched when the game is over,
    /// it is not that orientation's turn, or the covered cells are out of
    /// bounds or not open.
    pub fn place_domino(&mut self, anchor: Coord, orientation: Option<Orientation>) -> Option<Placement> {
        place_domino(&mut self.board, anchor, orientation)
    }

    /// Place a domino for the current player.
    pub fn play(&mut self, anchor: Coord) -> Option<Placement> {
        self.place_domino(anchor, None)
    }

    /// Capture the board together with both move counts.
    pub fn snapshot(&self) -> GameSnapshot {
        let (horizontal_moves, vertical_moves) = self.move_counts();
        let b = &self.board;
        GameSnapshot {
            rows: b.rows,
            cols: b.cols,
            seed: b.seed.clone(),
            inactive_count: b.inactive_count,
            actual_inactive_percentage: b.actual_inactive_percentage,
            requested_inactive_percentage: b.requested_inactive_percentage,
            playable_square_count: b.playable_square_count,
            total_square_count: b.total_square_count(),
            cells: b.cells.clone(),
            placements: b.placements.clone(),
            current_player: b.current_player,
            status: b.status,
            winner: b.winner,
            horizontal_moves,
            vertical_moves,
        }
    }
}

pub(crate) fn place_domino(
    board: &mut Board,
    anchor: Coord,
    orientation: Option<Orientation>,
) -> Option<Placement> {
    if board.status != GameStatus::Active {
        log::debug!("placement at {:?} rejected: game is finished", anchor);
        return None;
    }
    let current = board.current_player?;
    let orientation = orientation.unwrap_or(current);
    if orientation != current {
        log::debug!("placement rejected: it is {}'s turn, not {}'s", current, orientation);
        return None;
    }
    let positions = match resolve_coverage(board, anchor, orientation) {
        Some(p) if can_place(board, &p) => p,
        Some(_) => {
            log::debug!("placement at {:?} rejected: target cells are not open", anchor);
            return None;
        }
        None => {
            log::debug!("placement at {:?} rejected: out of bounds", anchor);
            return None;
        }
    };

    for coord in positions {
        if let Some(cell) = board.cell_mut(coord) {
            cell.state = CellState::Occupied(orientation);
        }
    }
    let placement = Placement {
        orientation,
        positions,
    };
    board.placements.push(placement);
    advance_turn(board, orientation);
    Some(placement)
}

fn advance_turn(board: &mut Board, mover: Orientation) {
    let opponent = mover.opponent();
    if has_available_move(board, opponent) {
        board.current_player = Some(opponent);
    } else {
        log::debug!("{} has no moves left, {} wins", opponent, mover);
        finish(board, Some(mover));
    }
}

fn finish(board: &mut Board, winner: Option<Orientation>) {
    board.status = GameStatus::Finished;
    board.winner = winner;
    board.current_player = None;
}

/// Settle boards on which the first player cannot move at all.
///
/// If the current player has no legal move the opponent wins without the
/// current player ever taking a turn; if neither side can move the game is a
/// draw.
pub(crate) fn evaluate_initial_status(board: &mut Board) {
    if board.status != GameStatus::Active {
        return;
    }
    let Some(current) = board.current_player else {
        return;
    };
    if has_available_move(board, current) {
        return;
    }
    let opponent = current.opponent();
    if has_available_move(board, opponent) {
        finish(board, Some(opponent));
    } else {
        log::debug!("board is move-dead for both sides");
        finish(board, None);
    }
}

