use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{
    ai::Targeting,
    board::Board,
    common::{BoardError, Coord, EngineError, ShotOutcome},
    config::{Difficulty, EngineConfig},
    player::Player,
    ship::{Orientation, Ship},
};

pub const HUMAN_NAME: &str = "Player";
pub const COMPUTER_NAME: &str = "Computer";

/// A computer shot and how it resolved on the human's board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerShot {
    pub at: Coord,
    pub outcome: ShotOutcome,
}

/// Current status of a game, from the human's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The human is still placing ships.
    Placement,
    InProgress,
    Won,
    Lost,
}

/// Orchestrates the human and computer players for one game.
///
/// The caller drives turns: it places the human's fleet, then alternates
/// [`handle_player_shot`](Self::handle_player_shot) and
/// [`handle_computer_shot`](Self::handle_computer_shot), asking
/// [`check_game_over`](Self::check_game_over) after each.
pub struct GameEngine {
    config: EngineConfig,
    human: Player,
    computer: Player,
    /// Human ships not yet on the board, in placement order.
    pending: Vec<Ship>,
    targeting: Targeting,
    rng: SmallRng,
}

impl GameEngine {
    /// Start a game: the computer's fleet is placed at random and the human's
    /// fleet is queued for placement.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => entropy_rng(),
        };
        let size = config.board_size;
        let mut engine = Self {
            config,
            human: Player::with_board(HUMAN_NAME, false, Board::with_size(size)?),
            computer: Player::with_board(COMPUTER_NAME, true, Board::with_size(size)?),
            pending: Vec::new(),
            targeting: Targeting::new(config.difficulty, size),
            rng,
        };
        engine.initialize_game()?;
        Ok(engine)
    }

    /// Standard-size game with the given difficulty.
    pub fn with_difficulty(difficulty: Difficulty) -> Result<Self, EngineError> {
        Self::new(EngineConfig::new(difficulty))
    }

    fn initialize_game(&mut self) -> Result<(), EngineError> {
        log::info!(
            "new {}x{} game, difficulty {}",
            self.config.board_size,
            self.config.board_size,
            self.config.difficulty
        );
        self.pending = self.human.initialize_ships();
        let attempts = self.config.placement_attempts;
        self.computer.place_fleet_randomly(&mut self.rng, attempts)?;
        Ok(())
    }

    /// Discard the current game and start over with `difficulty`, keeping the
    /// board size and RNG stream.
    pub fn new_game(&mut self, difficulty: Difficulty) -> Result<(), EngineError> {
        let size = self.config.board_size;
        self.config.difficulty = difficulty;
        self.human = Player::with_board(HUMAN_NAME, false, Board::with_size(size)?);
        self.computer = Player::with_board(COMPUTER_NAME, true, Board::with_size(size)?);
        self.targeting = Targeting::new(difficulty, size);
        self.initialize_game()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn human(&self) -> &Player {
        &self.human
    }

    pub fn computer(&self) -> &Player {
        &self.computer
    }

    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }

    /// Human ships still waiting to be placed.
    pub fn pending_ships(&self) -> &[Ship] {
        &self.pending
    }

    pub fn next_ship_to_place(&self) -> Option<&Ship> {
        self.pending.first()
    }

    pub fn is_placement_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether `ship` would fit on the human's board at (`x`, `y`).
    pub fn can_place_ship(
        &self,
        ship: &Ship,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> bool {
        self.human.board().can_place_ship(ship, x, y, orientation)
    }

    /// Place the pending human ship named like `ship` at (`x`, `y`).
    ///
    /// Returns `false`, changing nothing, if no such ship is pending or the
    /// position is invalid.
    pub fn place_player_ship(
        &mut self,
        ship: &Ship,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> bool {
        let Some(idx) = self.pending.iter().position(|s| s.name() == ship.name()) else {
            return false;
        };
        self.place_pending(idx, x, y, orientation)
    }

    /// Place the next pending human ship at (`x`, `y`).
    pub fn place_next_player_ship(&mut self, x: usize, y: usize, orientation: Orientation) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        self.place_pending(0, x, y, orientation)
    }

    fn place_pending(&mut self, idx: usize, x: usize, y: usize, orientation: Orientation) -> bool {
        let ship = self.pending.remove(idx);
        match self.human.board_mut().place_ship(ship, x, y, orientation) {
            Ok(()) => {
                if self.pending.is_empty() {
                    log::info!("fleet placed, combat begins");
                }
                true
            }
            Err(ship) => {
                self.pending.insert(idx, ship);
                false
            }
        }
    }

    /// Place every pending human ship at random.
    ///
    /// Ships are placed in order; if one cannot fit, it and every ship after
    /// it stay pending.
    pub fn place_player_fleet_randomly(&mut self) -> Result<(), EngineError> {
        let attempts = self.config.placement_attempts;
        while let Some(ship) = self.pending.first() {
            let name = ship.name();
            let (bow, orient) = self
                .human
                .board()
                .random_placement(&mut self.rng, ship, attempts)?;
            if !self.place_pending(0, bow.x, bow.y, orient) {
                return Err(BoardError::UnableToPlaceShip(name).into());
            }
        }
        Ok(())
    }

    /// Resolve the human's shot against the computer's board.
    pub fn handle_player_shot(&mut self, x: usize, y: usize) -> ShotOutcome {
        let outcome = self.computer.receive_shot(x, y);
        if !outcome.already_shot {
            self.human.record_shot(x, y);
        }
        log::debug!("player fires at ({}, {}): {:?}", x, y, outcome.result());
        outcome
    }

    /// Pick the computer's next shot, resolve it against the human's board and
    /// update targeting with the result.
    pub fn handle_computer_shot(&mut self) -> Result<ComputerShot, EngineError> {
        let at = self.targeting.select_shot(&mut self.rng)?;
        let outcome = self.human.receive_shot(at.x, at.y);
        self.computer.record_shot(at.x, at.y);
        self.targeting
            .apply_shot_result(at, outcome.hit, outcome.sunk.is_some());
        log::debug!("computer fires at {}: {:?}", at, outcome.result());
        Ok(ComputerShot { at, outcome })
    }

    /// The winner once one side's fleet is entirely sunk, else `None`.
    /// Always `None` while the human is still placing ships.
    pub fn check_game_over(&self) -> Option<&Player> {
        if !self.is_placement_complete() {
            return None;
        }
        if self.human.has_lost() {
            Some(&self.computer)
        } else if self.computer.has_lost() {
            Some(&self.human)
        } else {
            None
        }
    }

    pub fn status(&self) -> GameStatus {
        match self.check_game_over() {
            _ if !self.is_placement_complete() => GameStatus::Placement,
            Some(winner) if winner.is_computer() => GameStatus::Lost,
            Some(_) => GameStatus::Won,
            None => GameStatus::InProgress,
        }
    }
}

#[cfg(feature = "std")]
fn entropy_rng() -> SmallRng {
    let mut seed_rng = rand::rng();
    SmallRng::from_rng(&mut seed_rng)
}

#[cfg(not(feature = "std"))]
fn entropy_rng() -> SmallRng {
    SmallRng::seed_from_u64(0)
}
