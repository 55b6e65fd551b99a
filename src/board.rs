//! Board state and the seeded board generator.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{Cell, CellState, Coord, GameStatus, Orientation, Placement};
use crate::config::{BoardConfig, GenerateError, GenerationPolicy};
use crate::rng::RandomSource;

/// A generated board together with its placement history and turn state.
///
/// Boards are only built whole by [`generate`] and only mutated through
/// [`GameEngine`](crate::GameEngine).
#[derive(Clone, PartialEq)]
pub struct Board {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) seed: Option<String>,
    pub(crate) inactive_count: usize,
    pub(crate) actual_inactive_percentage: f64,
    pub(crate) requested_inactive_percentage: Option<f64>,
    pub(crate) playable_square_count: usize,
    pub(crate) cells: Vec<Cell>,
    pub(crate) placements: Vec<Placement>,
    pub(crate) current_player: Option<Orientation>,
    pub(crate) status: GameStatus,
    pub(crate) winner: Option<Orientation>,
}

impl Board {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Seed the board was generated from, if any.
    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    pub fn inactive_count(&self) -> usize {
        self.inactive_count
    }

    /// Inactive cells as a percentage of the playable area.
    pub fn actual_inactive_percentage(&self) -> f64 {
        self.actual_inactive_percentage
    }

    /// Clamped percentage override, when one was given.
    pub fn requested_inactive_percentage(&self) -> Option<f64> {
        self.requested_inactive_percentage
    }

    pub fn playable_square_count(&self) -> usize {
        self.playable_square_count
    }

    pub fn total_square_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn void_count(&self) -> usize {
        self.total_square_count() - self.playable_square_count
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterator over the rows of the grid.
    pub fn grid_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Whose turn it is; `None` once the game is finished.
    pub fn current_player(&self) -> Option<Orientation> {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Winner of a finished game; `None` while active or after a draw.
    pub fn winner(&self) -> Option<Orientation> {
        self.winner
    }

    pub fn is_within_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Number of cells covered by dominoes.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.occupied_by().is_some()).count()
    }

    /// Coordinates of the inactive cells in row-major order.
    pub fn inactive_squares(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .filter(|c| c.is_inactive())
            .map(|c| Coord::new(c.row, c.col))
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        if self.is_within_bounds(coord) {
            self.cells.get_mut(coord.row * self.cols + coord.col)
        } else {
            None
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{ {}x{}, seed: {:?}, inactive: {}, playable: {}, status: {:?}, current: {:?}, winner: {:?} }}",
            self.rows,
            self.cols,
            self.seed,
            self.inactive_count,
            self.playable_square_count,
            self.status,
            self.current_player,
            self.winner
        )?;
        for row in self.grid_rows() {
            for cell in row {
                let ch = match cell.state {
                    CellState::Void => ' ',
                    CellState::Inactive => '#',
                    CellState::Occupied(Orientation::Horizontal) => '=',
                    CellState::Occupied(Orientation::Vertical) => '|',
                    CellState::Open => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Outcome of the inactive-count policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InactiveCount {
    pub count: usize,
    pub actual_percentage: f64,
    pub requested_percentage: Option<f64>,
}

/// Decide how many playable cells become inactive.
///
/// An explicit percentage is clamped to `[0, max_custom_percentage]` and
/// rounded against the playable area. Otherwise a count is drawn uniformly
/// from the default percent range, falling back to a fixed count when that
/// range holds no integer.
pub fn determine_inactive_count(
    playable: usize,
    rng: &mut RandomSource,
    percentage_override: Option<f64>,
    policy: &GenerationPolicy,
) -> InactiveCount {
    let percentage_of = |count: usize| {
        if playable == 0 {
            0.0
        } else {
            count as f64 / playable as f64 * 100.0
        }
    };

    if let Some(pct) = percentage_override {
        let clamped = pct.clamp(0.0, policy.max_custom_percentage.max(0.0));
        let rounded = libm::round(clamped / 100.0 * playable as f64);
        let count = (rounded.max(0.0) as usize).min(playable);
        return InactiveCount {
            count,
            actual_percentage: percentage_of(count),
            requested_percentage: Some(clamped),
        };
    }

    let min_pct = policy.min_inactive_percent as usize;
    let max_pct = policy.max_inactive_percent as usize;
    let min_within_range = (playable * min_pct + 99) / 100;
    let max_within_range = playable * max_pct / 100;

    let count = if min_within_range <= max_within_range {
        (rng.below(max_within_range - min_within_range + 1) + min_within_range).min(playable)
    } else {
        let fallback = (playable as i64 - 2).min(min_within_range as i64);
        (fallback.max(1) as usize).min(playable)
    };
    InactiveCount {
        count,
        actual_percentage: percentage_of(count),
        requested_percentage: None,
    }
}

/// Generate a board for `config`, seeding the random stream from the config.
pub fn generate(config: &BoardConfig) -> Result<Board, GenerateError> {
    let mut rng = RandomSource::create(config.seed()).ok_or(GenerateError::EntropyUnavailable)?;
    Ok(generate_with(config, &mut rng))
}

/// Generate a board for `config` drawing from `rng`.
pub fn generate_with(config: &BoardConfig, rng: &mut RandomSource) -> Board {
    let rows = config.rows();
    let cols = config.cols();
    let void = config.mask().void_cells(rows, cols);

    let mut cells = Vec::with_capacity(rows * cols);
    let mut playable_positions = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let state = if void.contains(row, col) {
                CellState::Void
            } else {
                playable_positions.push(Coord::new(row, col));
                CellState::Open
            };
            cells.push(Cell { row, col, state });
        }
    }

    let playable = playable_positions.len();
    let inactive = determine_inactive_count(
        playable,
        rng,
        config.inactive_percentage(),
        config.policy(),
    );

    rng.shuffle(&mut playable_positions);
    for coord in playable_positions.iter().take(inactive.count) {
        cells[coord.row * cols + coord.col].state = CellState::Inactive;
    }

    log::debug!(
        "generated {}x{} board (seed {:?}): {} playable, {} inactive",
        rows,
        cols,
        config.seed(),
        playable,
        inactive.count
    );

    let mut board = Board {
        rows,
        cols,
        seed: config.seed().map(String::from),
        inactive_count: inactive.count,
        actual_inactive_percentage: inactive.actual_percentage,
        requested_inactive_percentage: inactive.requested_percentage,
        playable_square_count: playable,
        cells,
        placements: Vec::new(),
        current_player: Some(Orientation::Horizontal),
        status: GameStatus::Active,
        winner: None,
    };
    crate::game::evaluate_initial_status(&mut board);
    board
}
