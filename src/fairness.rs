//! Bounded rejection sampling for boards that do not favour either orientation.

use crate::board::{self, Board};
use crate::config::{BoardConfig, FairnessPolicy, GenerateError};
use crate::moves::move_diff;
use crate::rng::RandomSource;

/// Board picked by [`generate_balanced`].
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedBoard {
    pub board: Board,
    /// Number of boards generated during the search.
    pub attempts: usize,
    /// `|horizontal moves - vertical moves|` of the returned board.
    pub move_diff: usize,
}

/// Generate a board whose horizontal and vertical move counts are close.
///
/// A seeded config is generated exactly once and returned whatever its
/// balance, since reproducibility wins over fairness. Unseeded configs are
/// searched with [`generate_balanced_with`] on an entropy stream.
pub fn generate_balanced(config: &BoardConfig, policy: &FairnessPolicy) -> Result<BalancedBoard, GenerateError> {
    if config.seed().is_some() {
        let board = board::generate(config)?;
        let diff = move_diff(&board);
        log::debug!("seeded board kept with move diff {}", diff);
        return Ok(BalancedBoard {
            board,
            attempts: 1,
            move_diff: diff,
        });
    }
    let mut rng = RandomSource::create(None).ok_or(GenerateError::EntropyUnavailable)?;
    Ok(generate_balanced_with(config, policy, &mut rng))
}

/// Rejection-sample unseeded boards from `rng`, ignoring any seed on `config`.
///
/// Up to `policy.max_attempts` boards are drawn; the first within
/// `policy.threshold` is returned, otherwise the one with the lowest diff
/// (the earliest on ties). At least one board is always generated, so a
/// budget of zero behaves like a budget of one.
pub fn generate_balanced_with(config: &BoardConfig, policy: &FairnessPolicy, rng: &mut RandomSource) -> BalancedBoard {
    let fresh = config.unseeded();
    let first = board::generate_with(&fresh, rng);
    let first_diff = move_diff(&first);
    let mut best = BalancedBoard {
        board: first,
        attempts: 1,
        move_diff: first_diff,
    };
    log::debug!("fairness attempt 1: move diff {}", first_diff);

    for attempt in 2..=policy.max_attempts {
        if best.move_diff <= policy.threshold {
            break;
        }
        let board = board::generate_with(&fresh, rng);
        let diff = move_diff(&board);
        log::debug!("fairness attempt {}: move diff {}", attempt, diff);
        best.attempts = attempt;
        if diff < best.move_diff {
            best.board = board;
            best.move_diff = diff;
        }
    }

    if best.move_diff > policy.threshold {
        log::debug!(
            "no board within threshold after {} attempts, best diff {}",
            best.attempts,
            best.move_diff
        );
    }
    best
}
