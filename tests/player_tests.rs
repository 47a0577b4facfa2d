use battleship_engine::{Board, Orientation, Player, Ship, BOARD_SIZE, NUM_SHIPS, SHIPS};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_new_player() {
    let human = Player::new("Player", false);
    let computer = Player::new("Computer", true);
    assert_eq!(human.name(), "Player");
    assert!(!human.is_computer());
    assert!(computer.is_computer());
    assert!(human.board().ships().is_empty());
    assert!(human.shots().is_empty());
}

#[test]
fn test_initialize_ships_matches_catalog() {
    let player = Player::new("Player", false);
    let ships = player.initialize_ships();
    assert_eq!(ships.len(), NUM_SHIPS);

    let summary: Vec<_> = ships.iter().map(|s| (s.name(), s.length())).collect();
    assert_eq!(
        summary,
        vec![
            ("Carrier", 5),
            ("Cruiser", 4),
            ("Destroyer 1", 3),
            ("Destroyer 2", 3),
            ("Submarine 1", 2),
            ("Submarine 2", 2),
        ]
    );
    assert!(ships.iter().all(|s| !s.is_placed()));
    assert_eq!(SHIPS.len(), NUM_SHIPS);
}

#[test]
fn test_empty_fleet_counts_as_lost() {
    let player = Player::new("Player", false);
    assert!(player.has_lost());
}

#[test]
fn test_has_lost_after_fleet_sunk() {
    let mut player = Player::new("Player", false);
    player
        .board_mut()
        .place_ship(Ship::new("Submarine", 2), 3, 3, Orientation::Vertical)
        .unwrap();
    assert!(!player.has_lost());
    player.receive_shot(3, 3);
    assert!(!player.has_lost());
    assert_eq!(player.remaining_ships().count(), 1);
    player.receive_shot(3, 4);
    assert!(player.has_lost());
    assert_eq!(player.remaining_ships().count(), 0);
}

#[test]
fn test_can_shoot_at_tracks_own_shots() {
    let mut player = Player::new("Player", false);
    assert!(player.can_shoot_at(0, 0));
    assert!(!player.can_shoot_at(BOARD_SIZE, 0));
    assert!(!player.can_shoot_at(0, BOARD_SIZE));

    assert!(player.record_shot(0, 0));
    assert!(!player.can_shoot_at(0, 0));
    assert!(!player.record_shot(0, 0));
    assert!(!player.record_shot(BOARD_SIZE, 3));
    assert_eq!(player.shots().count_ones(), 1);
}

#[test]
fn test_place_fleet_randomly() {
    let mut player = Player::with_board("Computer", true, Board::new());
    let mut rng = SmallRng::seed_from_u64(2024);
    player.place_fleet_randomly(&mut rng, 100).unwrap();
    assert_eq!(player.board().ships().len(), NUM_SHIPS);
    assert!(!player.has_lost());
}

#[test]
fn test_seeded_placement_is_reproducible() {
    let mut a = Player::new("A", true);
    let mut b = Player::new("B", true);
    a.place_fleet_randomly(&mut SmallRng::seed_from_u64(42), 100)
        .unwrap();
    b.place_fleet_randomly(&mut SmallRng::seed_from_u64(42), 100)
        .unwrap();
    for (sa, sb) in a.board().ships().iter().zip(b.board().ships()) {
        assert_eq!(sa.occupied_cells(), sb.occupied_cells());
    }
}
