use battleship_engine::{
    BoardError, CellState, Difficulty, EngineConfig, EngineError, GameEngine, GameStatus,
    Orientation, Ship, TargetMode, BOARD_SIZE, NUM_SHIPS, TOTAL_SHIP_CELLS,
};

fn seeded(difficulty: Difficulty, seed: u64) -> GameEngine {
    GameEngine::new(EngineConfig::new(difficulty).with_seed(seed)).unwrap()
}

/// Sink every computer ship by firing at each of its cells.
fn sink_computer_fleet(engine: &mut GameEngine) {
    let targets: Vec<_> = engine
        .computer()
        .board()
        .ships()
        .iter()
        .flat_map(|s| s.occupied_cells().to_vec())
        .collect();
    for c in targets {
        let outcome = engine.handle_player_shot(c.x, c.y);
        assert!(outcome.hit);
    }
}

#[test]
fn test_new_game_places_computer_fleet() {
    let engine = seeded(Difficulty::Normal, 1);
    assert_eq!(engine.computer().board().ships().len(), NUM_SHIPS);
    assert!(engine.human().board().ships().is_empty());
    assert_eq!(engine.pending_ships().len(), NUM_SHIPS);
    assert_eq!(engine.next_ship_to_place().map(|s| s.name()), Some("Carrier"));
    assert_eq!(engine.status(), GameStatus::Placement);
    assert!(engine.check_game_over().is_none());
}

#[test]
fn test_invalid_board_size_rejected() {
    let err = GameEngine::new(EngineConfig::default().with_board_size(4))
        .err()
        .unwrap();
    assert!(matches!(err, EngineError::InvalidBoardSize { size: 4, .. }));
    assert!(GameEngine::new(EngineConfig::default().with_board_size(12)).is_err());
}

#[test]
fn test_place_player_ships_in_turn() {
    let mut engine = seeded(Difficulty::Normal, 2);
    let carrier = engine.next_ship_to_place().unwrap().clone();

    assert!(!engine.can_place_ship(&carrier, 7, 0, Orientation::Horizontal));
    assert!(!engine.place_player_ship(&carrier, 7, 0, Orientation::Horizontal));
    assert_eq!(engine.pending_ships().len(), NUM_SHIPS);

    assert!(engine.place_player_ship(&carrier, 0, 0, Orientation::Horizontal));
    assert_eq!(engine.pending_ships().len(), NUM_SHIPS - 1);
    assert!(!engine.place_player_ship(&carrier, 0, 5, Orientation::Horizontal));

    for y in 1..NUM_SHIPS {
        assert!(engine.place_next_player_ship(0, y, Orientation::Horizontal));
    }
    assert!(engine.is_placement_complete());
    assert!(!engine.place_next_player_ship(0, 9, Orientation::Horizontal));
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(engine.human().board().cell_state(4, 0), CellState::Ship);
}

#[test]
fn test_player_shot_recorded_once() {
    let mut engine = seeded(Difficulty::Normal, 3);
    engine.place_player_fleet_randomly().unwrap();

    let first = engine.handle_player_shot(4, 4);
    assert!(!first.already_shot);
    assert!(!engine.human().can_shoot_at(4, 4));

    let again = engine.handle_player_shot(4, 4);
    assert!(again.already_shot);
    assert!(!again.hit);
    assert!(again.sunk.is_none());
    assert!(engine.handle_player_shot(BOARD_SIZE, 0).already_shot);
    assert_eq!(engine.human().shots().count_ones(), 1);
}

#[test]
fn test_player_wins_by_sinking_fleet() {
    let mut engine = seeded(Difficulty::Easy, 4);
    engine.place_player_fleet_randomly().unwrap();
    sink_computer_fleet(&mut engine);

    let winner = engine.check_game_over().expect("game should be over");
    assert!(!winner.is_computer());
    assert_eq!(engine.status(), GameStatus::Won);
    assert_eq!(engine.computer().board().sunk_ships().count(), NUM_SHIPS);
}

#[test]
fn test_computer_never_repeats_and_eventually_wins() {
    for difficulty in [Difficulty::Easy, Difficulty::Normal] {
        let mut engine = seeded(difficulty, 5);
        engine.place_player_fleet_randomly().unwrap();

        let mut shots = 0;
        while engine.check_game_over().is_none() {
            let shot = engine.handle_computer_shot().unwrap();
            assert!(!shot.outcome.already_shot, "computer repeated {}", shot.at);
            shots += 1;
            assert!(shots <= BOARD_SIZE * BOARD_SIZE);
        }
        assert!(engine.check_game_over().unwrap().is_computer());
        assert_eq!(engine.status(), GameStatus::Lost);
        assert!(shots >= TOTAL_SHIP_CELLS);
        assert!(matches!(
            engine.handle_computer_shot(),
            Ok(_) | Err(EngineError::NoTargetsRemain)
        ));
    }
}

#[test]
fn test_computer_follows_up_hits() {
    let mut engine = seeded(Difficulty::Normal, 6);
    engine.place_player_fleet_randomly().unwrap();

    loop {
        let shot = engine.handle_computer_shot().unwrap();
        if shot.outcome.hit && shot.outcome.sunk.is_none() {
            assert_eq!(engine.targeting().mode(), TargetMode::Target);
            let open_neighbour = [(0, 1), (1, 0), (0, -1), (-1, 0)]
                .iter()
                .filter_map(|&(dx, dy)| shot.at.offset(dx, dy, BOARD_SIZE))
                .any(|n| !engine.targeting().has_fired(n));
            let next = engine.handle_computer_shot().unwrap();
            if open_neighbour {
                assert_eq!(next.at.manhattan(shot.at), 1);
            }
            break;
        }
    }
}

#[test]
fn test_sink_resets_targeting() {
    let mut engine = seeded(Difficulty::Normal, 7);
    engine.place_player_fleet_randomly().unwrap();

    loop {
        let shot = engine.handle_computer_shot().unwrap();
        if let Some(ship) = shot.outcome.sunk {
            assert!(ship.is_sunk());
            assert_eq!(engine.targeting().mode(), TargetMode::Hunt);
            assert!(engine.targeting().queue().is_empty());
            assert!(engine.targeting().hit_chain().is_empty());
            break;
        }
    }
}

#[test]
fn test_new_game_resets_state() {
    let mut engine = seeded(Difficulty::Normal, 8);
    engine.place_player_fleet_randomly().unwrap();
    engine.handle_player_shot(0, 0);
    engine.handle_computer_shot().unwrap();

    engine.new_game(Difficulty::Easy).unwrap();
    assert_eq!(engine.difficulty(), Difficulty::Easy);
    assert_eq!(engine.targeting().difficulty(), Difficulty::Easy);
    assert!(engine.human().shots().is_empty());
    assert!(engine.targeting().fired().is_empty());
    assert_eq!(engine.pending_ships().len(), NUM_SHIPS);
    assert_eq!(engine.computer().board().ships().len(), NUM_SHIPS);
    assert!(engine.computer().board().shots().is_empty());
}

#[test]
fn test_seeded_games_are_reproducible() {
    let mut a = seeded(Difficulty::Normal, 99);
    let mut b = seeded(Difficulty::Normal, 99);
    a.place_player_fleet_randomly().unwrap();
    b.place_player_fleet_randomly().unwrap();
    for _ in 0..30 {
        let sa = a.handle_computer_shot().unwrap();
        let sb = b.handle_computer_shot().unwrap();
        assert_eq!(sa, sb);
        if a.check_game_over().is_some() {
            break;
        }
    }
}

#[test]
fn test_difficulty_parsing() {
    assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
    assert_eq!("Normal".parse::<Difficulty>(), Ok(Difficulty::Normal));
    assert!("hard".parse::<Difficulty>().is_err());
    assert_eq!(Difficulty::default(), Difficulty::Normal);
    assert_eq!(Difficulty::Easy.to_string(), "easy");
}

#[test]
fn test_failed_random_fleet_keeps_unplaced_ships_pending() {
    let config = EngineConfig::new(Difficulty::Normal)
        .with_board_size(5)
        .with_seed(7);
    let mut engine = GameEngine::new(config).unwrap();

    // Every row and column is blocked, so the carrier has nowhere to go.
    let blockers = [
        (Ship::new("Cruiser", 4), 0, 0, Orientation::Horizontal),
        (Ship::new("Destroyer 1", 3), 4, 0, Orientation::Vertical),
        (Ship::new("Destroyer 2", 3), 1, 3, Orientation::Horizontal),
        (Ship::new("Submarine 1", 2), 0, 3, Orientation::Vertical),
    ];
    for (ship, x, y, orient) in &blockers {
        assert!(engine.place_player_ship(ship, *x, *y, *orient), "{}", ship.name());
    }
    assert_eq!(engine.pending_ships().len(), 2);

    let err = engine.place_player_fleet_randomly().unwrap_err();
    assert_eq!(
        err,
        EngineError::Board(BoardError::UnableToPlaceShip("Carrier"))
    );
    let pending: Vec<_> = engine.pending_ships().iter().map(|s| s.name()).collect();
    assert_eq!(pending, ["Carrier", "Submarine 2"]);
    assert!(!engine.is_placement_complete());
    assert_eq!(engine.human().board().ships().len(), 4);
    assert_eq!(engine.status(), GameStatus::Placement);
}
