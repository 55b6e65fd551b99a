#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod board;
pub mod campaign;
pub mod cell_set;
#[cfg(feature = "std")]
pub mod cli;
mod common;
pub mod config;
pub mod fairness;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod mask;
pub mod moves;
pub mod prelude;
pub mod rng;
pub mod rules;

pub use board::{determine_inactive_count, generate, generate_with, Board, InactiveCount};
pub use cell_set::{BitGrid, CellSet, CellSetError};
pub use common::*;
pub use config::*;
pub use fairness::{generate_balanced, generate_balanced_with, BalancedBoard};
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use mask::LayoutMask;
pub use moves::{available_moves, count_available_moves, has_available_move, move_counts, move_diff};
pub use rng::RandomSource;
pub use rules::{can_place, legal_coverage, resolve_coverage};
