//! Built-in campaign content: cities, neighborhoods and the tie-break mission.

use crate::config::{BoardConfig, GenerateError};
use crate::mask::LayoutMask;

/// One playable mission: board parameters plus the shape of its map.
#[derive(Debug, Clone, Copy)]
pub struct NeighborhoodDef {
    pub id: &'static str,
    pub name: &'static str,
    pub intro: &'static str,
    pub rows: usize,
    pub cols: usize,
    pub inactive_percentage: f64,
    pub recommended_seed: &'static str,
    /// Cells for which this returns true are void.
    pub blocked: fn(usize, usize) -> bool,
}

// ids are unique across the campaign
impl PartialEq for NeighborhoodDef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl NeighborhoodDef {
    pub fn layout_mask(&self) -> LayoutMask {
        LayoutMask::from_predicate(self.rows, self.cols, self.blocked)
    }

    /// Generation request for this mission, seeded with `seed` or the
    /// recommended seed.
    pub fn board_config(&self, seed: Option<&str>) -> Result<BoardConfig, GenerateError> {
        BoardConfig::builder(self.rows, self.cols)
            .seed(seed.unwrap_or(self.recommended_seed))
            .inactive_percentage(self.inactive_percentage)
            .mask(self.layout_mask())
            .build()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CityDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub neighborhoods: &'static [NeighborhoodDef],
}

impl PartialEq for CityDef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl CityDef {
    pub fn neighborhood(&self, id: &str) -> Option<&'static NeighborhoodDef> {
        self.neighborhoods.iter().find(|n| n.id == id)
    }
}

/// Pseudo city id addressing the extra mission.
pub const EXTRA_CITY_ID: &str = "__extra__mission__";

fn dist(a: usize, b: usize) -> usize {
    a.abs_diff(b)
}

fn final_showdown(row: usize, col: usize) -> bool {
    let border = row == 0 || col == 0 || row == 11 || col == 11;
    let central_void = (4..=7).contains(&row) && (4..=7).contains(&col);
    let diagonals = dist(row, col) == 5 || dist(row + col, 11) == 5;
    border || central_void || diagonals
}

/// Offered when the completed cities split evenly between the two sides.
pub static EXTRA_MISSION: NeighborhoodDef = NeighborhoodDef {
    id: "final-showdown",
    name: "Final Showdown",
    intro: "Both sides are evenly matched. One last clash will decide the fate of the skyline.",
    rows: 12,
    cols: 12,
    inactive_percentage: 24.0,
    recommended_seed: "final-showdown-01",
    blocked: final_showdown,
};

pub const EXTRA_MISSION_DESCRIPTION: &str =
    "A decisive duel offered when the campaign ends in a draw.";

fn aurora_core(row: usize, col: usize) -> bool {
    ((row < 2 && (col < 2 || col > 9)) || (row > 7 && (col < 2 || col > 9)))
        || ((col == 0 || col == 11) && (3..=6).contains(&row))
        || (row == 4 && (col == 5 || col == 6))
}

fn aurora_docks(row: usize, col: usize) -> bool {
    ((row <= 1 && (col < 3 || col > 10)) || (row >= 10 && (col < 3 || col > 10)))
        || ((col <= 1 || col >= 12) && (3..=8).contains(&row))
        || (row == 5 && (4..=9).contains(&col))
}

fn aurora_zenith(row: usize, col: usize) -> bool {
    ((row == 0 || row == 8) && (col < 4 || col > 10))
        || ((col == 0 || col == 14) && (2..=6).contains(&row))
        || ((col < 2 && row < 2) || (col > 12 && row > 6))
        || ((row == 3 || row == 5) && (col == 3 || col == 11))
}

fn haven_gardens(row: usize, col: usize) -> bool {
    ((row <= 1 && (col <= 2 || col >= 8)) || (row >= 9 && (col <= 2 || col >= 8)))
        || ((col <= 1 || col >= 9) && (3..=7).contains(&row))
        || (dist(row, 5) <= 1 && dist(col, 5) <= 1)
}

fn haven_canals(row: usize, col: usize) -> bool {
    ((row <= 1 && (col <= 1 || col >= 8)) || (row >= 11 && (col <= 1 || col >= 8)))
        || ((col == 3 || col == 6) && row % 2 == 0)
        || (row == 6 && (col == 0 || col == 9))
}

fn frontier_outpost(row: usize, col: usize) -> bool {
    ((col < 2 && row < 3) || (col > 13 && row > 4))
        || ((row == 0 || row == 7) && (col < 4 || col > 11))
        || ((row == 3 || row == 4) && col % 5 == 2)
}

fn frontier_spires(row: usize, col: usize) -> bool {
    ((row <= 1 && col <= 1) || (row >= 8 && col >= 8))
        || ((row >= 8 && col <= 1) || (row <= 1 && col >= 8))
        // cells within one step of the 4.5 centre line
        || ((4..=5).contains(&row) && (4..=5).contains(&col))
        || ((row == 0 || row == 9) && (col < 3 || col > 6))
        || ((col == 0 || col == 9) && (row < 3 || row > 6))
}

fn frontier_veins(row: usize, col: usize) -> bool {
    ((row <= 1 && (col <= 1 || col >= 7)) || (row >= 12 && (col <= 1 || col >= 7)))
        || ((col == 2 || col == 6) && (2..=11).contains(&row) && row % 3 == 0)
        || ((row == 6 || row == 7) && col == 4)
}

const NEO_AURORA: &[NeighborhoodDef] = &[
    NeighborhoodDef {
        id: "aurora-core",
        name: "Core District",
        intro: "Secure the elevated plazas that power the skyline.",
        rows: 10,
        cols: 12,
        inactive_percentage: 22.0,
        recommended_seed: "aurora-core-01",
        blocked: aurora_core,
    },
    NeighborhoodDef {
        id: "aurora-docks",
        name: "Dockside Web",
        intro: "Navigate the shipping cranes that slice through the harbor.",
        rows: 12,
        cols: 14,
        inactive_percentage: 28.0,
        recommended_seed: "aurora-docks-02",
        blocked: aurora_docks,
    },
    NeighborhoodDef {
        id: "aurora-zenith",
        name: "Zenith Canopy",
        intro: "Sky bridges carve a lattice between mirrored towers.",
        rows: 9,
        cols: 15,
        inactive_percentage: 25.0,
        recommended_seed: "aurora-zenith-03",
        blocked: aurora_zenith,
    },
];

const SOLSTICE_HAVEN: &[NeighborhoodDef] = &[
    NeighborhoodDef {
        id: "haven-gardens",
        name: "Hanging Gardens",
        intro: "Guard the terraced plazas before the sun sets.",
        rows: 11,
        cols: 11,
        inactive_percentage: 18.0,
        recommended_seed: "haven-gardens-01",
        blocked: haven_gardens,
    },
    NeighborhoodDef {
        id: "haven-canals",
        name: "Canal Labyrinth",
        intro: "Bridges and conduits partition the flow of movement.",
        rows: 13,
        cols: 10,
        inactive_percentage: 24.0,
        recommended_seed: "haven-water-03",
        blocked: haven_canals,
    },
];

const ASTRAL_FRONTIER: &[NeighborhoodDef] = &[
    NeighborhoodDef {
        id: "frontier-outpost",
        name: "Outpost Array",
        intro: "Radiant sensors detect every misplaced move.",
        rows: 8,
        cols: 16,
        inactive_percentage: 26.0,
        recommended_seed: "frontier-outpost-05",
        blocked: frontier_outpost,
    },
    NeighborhoodDef {
        id: "frontier-spires",
        name: "Crystal Spires",
        intro: "Shards of glass obstruct sightlines across the dunes.",
        rows: 10,
        cols: 10,
        inactive_percentage: 30.0,
        recommended_seed: "frontier-spires-07",
        blocked: frontier_spires,
    },
    NeighborhoodDef {
        id: "frontier-veins",
        name: "Auric Veins",
        intro: "Mine shafts open and collapse, sealing access routes.",
        rows: 14,
        cols: 9,
        inactive_percentage: 27.0,
        recommended_seed: "frontier-veins-09",
        blocked: frontier_veins,
    },
];

/// The campaign, in play order.
pub const CAMPAIGN_CITIES: &[CityDef] = &[
    CityDef {
        id: "neo-aurora",
        name: "Neo Aurora",
        description: "Rain-soaked neon avenues where rooftops connect like a maze.",
        neighborhoods: NEO_AURORA,
    },
    CityDef {
        id: "solstice-haven",
        name: "Solstice Haven",
        description: "Gilded canals and terraced gardens steeped in dusk light.",
        neighborhoods: SOLSTICE_HAVEN,
    },
    CityDef {
        id: "astral-frontier",
        name: "Astral Frontier",
        description: "Experimental colony clusters above the desert strata.",
        neighborhoods: ASTRAL_FRONTIER,
    },
];
