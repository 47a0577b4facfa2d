use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;

use crate::{
    bitboard::ShotGrid,
    board::Board,
    common::{BoardError, ShotOutcome},
    config,
    ship::Ship,
};

/// One side of the game: a named owner of a board plus the cells it has
/// fired at on the opposing board.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    is_computer: bool,
    board: Board,
    shots: ShotGrid,
}

impl Player {
    /// Create a player with an empty standard board.
    pub fn new(name: impl Into<String>, is_computer: bool) -> Self {
        Self::with_board(name, is_computer, Board::new())
    }

    /// Create a player around an existing (usually empty) board. The opposing
    /// board is assumed to share its dimension.
    pub fn with_board(name: impl Into<String>, is_computer: bool, board: Board) -> Self {
        let shots = ShotGrid::new(board.size());
        Self {
            name: name.into(),
            is_computer,
            board,
            shots,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_computer(&self) -> bool {
        self.is_computer
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The standard fleet as fresh, unplaced ships.
    pub fn initialize_ships(&self) -> Vec<Ship> {
        config::fleet()
    }

    /// Place the whole standard fleet at random positions.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        attempts: usize,
    ) -> Result<(), BoardError> {
        let ships = self.initialize_ships();
        self.board.place_randomly(rng, ships, attempts)
    }

    /// True once every ship on this player's own board is sunk. An empty
    /// fleet counts as lost.
    pub fn has_lost(&self) -> bool {
        self.board.all_ships_sunk()
    }

    /// Whether (`x`, `y`) is on the opposing board and not yet fired at.
    pub fn can_shoot_at(&self, x: usize, y: usize) -> bool {
        self.board.is_valid_position(x, y) && !self.shots.contains(x, y)
    }

    /// Remember a shot fired at the opposing board. Returns `false` if the
    /// cell was out of bounds or already recorded.
    pub fn record_shot(&mut self, x: usize, y: usize) -> bool {
        if !self.can_shoot_at(x, y) {
            return false;
        }
        self.shots.set(x, y).is_ok()
    }

    /// Cells this player has fired at.
    pub fn shots(&self) -> &ShotGrid {
        &self.shots
    }

    /// Resolve an opponent's shot against this player's board.
    pub fn receive_shot(&mut self, x: usize, y: usize) -> ShotOutcome {
        self.board.receive_shot(x, y)
    }

    /// Ships on this player's board still afloat.
    pub fn remaining_ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.board.remaining_ships()
    }
}
