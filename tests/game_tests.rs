use squart::{
    has_available_move, BoardConfig, CellState, Coord, GameEngine, GameStatus, LayoutMask, Orientation,
    Placement,
};

/// Board whose only playable cells are `cells`, none of them inactive.
fn shaped(cells: &[(usize, usize)]) -> GameEngine {
    let config = BoardConfig::builder(5, 5)
        .seed("shape")
        .inactive_percentage(0.0)
        .mask(LayoutMask::allow(cells.iter().copied()).unwrap())
        .build()
        .unwrap();
    GameEngine::new(&config).unwrap()
}

fn open_board() -> GameEngine {
    let config = BoardConfig::builder(5, 5)
        .seed("test")
        .inactive_percentage(0.0)
        .build()
        .unwrap();
    GameEngine::new(&config).unwrap()
}

#[test]
fn placement_occupies_cells_and_passes_turn() {
    let mut engine = open_board();
    let placement = engine.play(Coord::new(0, 0)).unwrap();
    assert_eq!(
        placement,
        Placement {
            orientation: Orientation::Horizontal,
            positions: [Coord::new(0, 0), Coord::new(0, 1)],
        }
    );
    let board = engine.board();
    assert_eq!(
        board.cell(0, 0).unwrap().state,
        CellState::Occupied(Orientation::Horizontal)
    );
    assert_eq!(board.cell(0, 1).unwrap().occupied_by(), Some(Orientation::Horizontal));
    assert_eq!(board.occupied_count(), 2);
    assert_eq!(board.placements(), &[placement]);
    assert_eq!(engine.current_player(), Some(Orientation::Vertical));
    assert_eq!(engine.move_counts(), (18, 18));

    let placement = engine.play(Coord::new(1, 0)).unwrap();
    assert_eq!(placement.positions, [Coord::new(1, 0), Coord::new(2, 0)]);
    assert_eq!(engine.current_player(), Some(Orientation::Horizontal));
}

#[test]
fn illegal_placements_leave_board_untouched() {
    let mut engine = open_board();
    engine.play(Coord::new(2, 2)).unwrap();
    let before = engine.clone();

    // overlapping, partially outside, fully outside
    assert_eq!(engine.play(Coord::new(1, 2)), None);
    assert_eq!(engine.play(Coord::new(4, 0)), None);
    assert_eq!(engine.play(Coord::new(9, 9)), None);
    // not this orientation's turn
    assert_eq!(
        engine.place_domino(Coord::new(0, 0), Some(Orientation::Horizontal)),
        None
    );
    assert_eq!(engine, before);

    assert!(engine
        .place_domino(Coord::new(0, 0), Some(Orientation::Vertical))
        .is_some());
}

#[test]
fn placements_never_cover_inactive_or_void_cells() {
    let mut engine = shaped(&[(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)]);
    // (1, 0) is void
    assert_eq!(engine.place_domino(Coord::new(1, 0), None), None);
    let placed = engine.place_domino(Coord::new(0, 0), Some(Orientation::Horizontal));
    assert_eq!(
        placed.map(|p| p.positions),
        Some([Coord::new(0, 0), Coord::new(0, 1)])
    );

    let config = BoardConfig::builder(6, 6)
        .seed("walls")
        .inactive_percentage(40.0)
        .build()
        .unwrap();
    let mut engine = GameEngine::new(&config).unwrap();
    let inactive: Vec<Coord> = engine.board().inactive_squares().collect();
    for anchor in inactive {
        assert_eq!(engine.play(anchor), None);
    }
}

#[test]
fn blocking_the_opponent_wins() {
    let mut engine = shaped(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
    assert_eq!(engine.move_counts(), (2, 2));
    engine.play(Coord::new(0, 0)).unwrap();
    assert_eq!(engine.status(), GameStatus::Finished);
    assert_eq!(engine.winner(), Some(Orientation::Horizontal));
    assert_eq!(engine.current_player(), None);
    assert!(!has_available_move(engine.board(), Orientation::Vertical));

    // finished games reject every move
    assert_eq!(engine.play(Coord::new(1, 0)), None);
    assert_eq!(
        engine.place_domino(Coord::new(1, 0), Some(Orientation::Horizontal)),
        None
    );
}

#[test]
fn turns_alternate_until_a_side_is_stuck() {
    let mut engine = shaped(&[(0, 0), (0, 1), (1, 3), (2, 3), (3, 0), (3, 1)]);
    engine.play(Coord::new(0, 0)).unwrap();
    assert_eq!(engine.current_player(), Some(Orientation::Vertical));
    engine.play(Coord::new(1, 3)).unwrap();
    assert_eq!(engine.current_player(), Some(Orientation::Horizontal));
    engine.play(Coord::new(3, 0)).unwrap();
    assert_eq!(engine.status(), GameStatus::Finished);
    assert_eq!(engine.winner(), Some(Orientation::Horizontal));
    assert_eq!(engine.board().placements().len(), 3);
}

#[test]
fn vertical_can_win_too() {
    let mut engine = shaped(&[(0, 0), (1, 0), (0, 2), (0, 3), (3, 3), (4, 3)]);
    engine.play(Coord::new(0, 2)).unwrap();
    engine.play(Coord::new(0, 0)).unwrap();
    assert_eq!(engine.status(), GameStatus::Finished);
    assert_eq!(engine.winner(), Some(Orientation::Vertical));
}

#[test]
fn first_player_without_moves_loses_immediately() {
    let engine = shaped(&[(0, 0), (1, 0)]);
    assert_eq!(engine.status(), GameStatus::Finished);
    assert_eq!(engine.winner(), Some(Orientation::Vertical));
    assert_eq!(engine.current_player(), None);
    assert!(engine.board().placements().is_empty());
}

#[test]
fn dead_board_is_a_draw() {
    let engine = shaped(&[(0, 0), (2, 2), (4, 4)]);
    assert_eq!(engine.status(), GameStatus::Finished);
    assert_eq!(engine.winner(), None);
    assert_eq!(engine.move_counts(), (0, 0));

    let config = BoardConfig::builder(5, 5)
        .seed("full")
        .inactive_percentage(90.0)
        .mask(LayoutMask::allow([(0, 0), (0, 1)]).unwrap())
        .build()
        .unwrap();
    let engine = GameEngine::new(&config).unwrap();
    assert_eq!(engine.board().inactive_count(), 2);
    assert_eq!(engine.status(), GameStatus::Finished);
    assert_eq!(engine.winner(), None);
}

#[test]
fn snapshot_reports_move_counts() {
    let mut engine = open_board();
    engine.play(Coord::new(4, 3)).unwrap();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.rows, 5);
    assert_eq!(snapshot.seed.as_deref(), Some("test"));
    assert_eq!(snapshot.total_square_count, 25);
    assert_eq!(snapshot.cells.len(), 25);
    assert_eq!(snapshot.placements.len(), 1);
    assert_eq!(
        (snapshot.horizontal_moves, snapshot.vertical_moves),
        engine.move_counts()
    );
    assert_eq!(snapshot.current_player, Some(Orientation::Vertical));
    assert_eq!(snapshot.status, GameStatus::Active);
}

#[test]
fn engine_owns_its_board() {
    let engine = open_board();
    let board = engine.clone().into_board();
    let engine2 = GameEngine::from_board(board);
    assert_eq!(engine, engine2);
}
