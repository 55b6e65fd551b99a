#![cfg(feature = "std")]

use std::fmt::Write as _;
use std::string::String;

use crate::board::Board;
use crate::campaign::{CampaignView, CityWinner, NeighborhoodStatus, EXTRA_MISSION_DESCRIPTION};
use crate::common::{CellState, Coord, GameStatus, Orientation};
use crate::config::MAX_SIZE;

/// Format a coordinate as column letter plus 1-based row, e.g. `C4`.
pub fn coord_to_string(coord: Coord) -> String {
    let col = (b'A' + coord.col as u8) as char;
    format!("{}{}", col, coord.row + 1)
}

/// Parse `C4`-style input (case-insensitive) into a coordinate.
pub fn parse_coord(input: &str) -> Option<Coord> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let col = (col_ch as u8 - b'A') as usize;
    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 || col >= MAX_SIZE || row > MAX_SIZE {
        return None;
    }
    Some(Coord::new(row - 1, col))
}

fn cell_char(state: CellState) -> char {
    match state {
        CellState::Void => ' ',
        CellState::Inactive => '#',
        CellState::Occupied(Orientation::Horizontal) => 'H',
        CellState::Occupied(Orientation::Vertical) => 'V',
        CellState::Open => '.',
    }
}

/// Board with column letters on top and 1-based row numbers down the side.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("   ");
    for c in 0..board.cols() {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for (r, row) in board.grid_rows().enumerate() {
        let _ = write!(out, "{:2} ", r + 1);
        for cell in row {
            let _ = write!(out, " {}", cell_char(cell.state));
        }
        out.push('\n');
    }
    out
}

pub fn print_board(board: &Board) {
    print!("{}", render_board(board));
}

/// One-line summary of whose turn it is or how the game ended.
pub fn status_line(board: &Board) -> String {
    match (board.status(), board.current_player(), board.winner()) {
        (GameStatus::Active, Some(player), _) => format!("{} to move", player),
        (GameStatus::Finished, _, Some(winner)) => format!("{} wins", winner),
        _ => String::from("draw"),
    }
}

fn status_label(status: NeighborhoodStatus) -> &'static str {
    match status {
        NeighborhoodStatus::Locked => "locked",
        NeighborhoodStatus::Available => "available",
        NeighborhoodStatus::Completed => "completed",
    }
}

pub fn render_campaign(view: &CampaignView) -> String {
    let mut out = String::new();
    for city in &view.cities {
        let winner = match city.city_winner {
            Some(CityWinner::Horizontal) => " - horizontal",
            Some(CityWinner::Vertical) => " - vertical",
            Some(CityWinner::Tie) => " - tie",
            None => "",
        };
        let _ = writeln!(
            out,
            "{} ({}) [{}/{}]{}{}",
            city.def.name,
            city.def.id,
            city.completed_count,
            city.total_count(),
            if city.unlocked { "" } else { " locked" },
            winner
        );
        for hood in &city.neighborhoods {
            let result = hood.winner.map(|w| format!(" ({})", w)).unwrap_or_default();
            let _ = writeln!(out, "  {:<18} {:<10}{}", hood.def.id, status_label(hood.status), result);
        }
    }
    let extra = &view.extra_mission;
    if extra.unlocked || extra.status == NeighborhoodStatus::Completed {
        let result = extra.winner.map(|w| format!(" ({})", w)).unwrap_or_default();
        let _ = writeln!(
            out,
            "{} [{}]{}\n  {}",
            extra.def.name,
            status_label(extra.status),
            result,
            EXTRA_MISSION_DESCRIPTION
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_round_trip_through_text() {
        assert_eq!(parse_coord("c4"), Some(Coord::new(3, 2)));
        assert_eq!(parse_coord(" A1 "), Some(Coord::new(0, 0)));
        assert_eq!(coord_to_string(Coord::new(3, 2)), "C4");
        assert_eq!(parse_coord("A0"), None);
        assert_eq!(parse_coord("4C"), None);
        assert_eq!(parse_coord("Z3"), None);
        assert_eq!(parse_coord(""), None);
    }

    #[test]
    fn tied_campaign_lists_the_extra_mission() {
        use crate::campaign::{Campaign, CAMPAIGN_CITIES};

        let mut campaign = Campaign::new();
        let winners = [
            [Some(Orientation::Horizontal), Some(Orientation::Horizontal), None],
            [Some(Orientation::Vertical), Some(Orientation::Vertical), None],
        ];
        for (city, picks) in CAMPAIGN_CITIES.iter().zip(winners) {
            for (hood, winner) in city.neighborhoods.iter().zip(picks) {
                campaign.complete_neighborhood(city.id, hood.id, winner).unwrap();
            }
        }
        let text = render_campaign(&campaign.view());
        assert!(text.contains(EXTRA_MISSION_DESCRIPTION));

        let fresh = render_campaign(&Campaign::new().view());
        assert!(!fresh.contains(EXTRA_MISSION_DESCRIPTION));
    }
}
