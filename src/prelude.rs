//! Commonly used types and utilities for ease of import.

pub use crate::{
    BoardConfig, Coord, FairnessPolicy, GameEngine, GameStatus, LayoutMask, Orientation, Placement,
};
pub use crate::campaign::{Campaign, NeighborhoodStatus, CAMPAIGN_CITIES};

#[cfg(feature = "std")]
pub use crate::campaign::{FileStore, MemoryStore, PersistentCampaign};
#[cfg(feature = "std")]
pub use crate::cli::{parse_coord, print_board};
