use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::common::EngineError;
use crate::ship::{Ship, ShipType};

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 6;
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Cruiser", 4),
    ShipType::new("Destroyer 1", 3),
    ShipType::new("Destroyer 2", 3),
    ShipType::new("Submarine 1", 2),
    ShipType::new("Submarine 2", 2),
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2 + 2;

/// Largest board a [`ShotGrid`](crate::ShotGrid) can track (11² ≤ 128 bits).
pub const MAX_BOARD_SIZE: usize = 11;

/// Random placement attempts before falling back to enumerating positions.
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 100;

/// Fresh, unplaced ships for one side, in placement order.
pub fn fleet() -> Vec<Ship> {
    SHIPS.iter().copied().map(Ship::from_type).collect()
}

fn longest_ship() -> usize {
    SHIPS.iter().map(|s| s.length()).max().unwrap_or(1)
}

/// Computer opponent strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize, clap::ValueEnum))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    /// Uniformly random shots at unfired cells.
    Easy,
    /// Random search until a hit, then hunts down the located ship.
    #[default]
    Normal,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognised difficulty names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError;

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("difficulty must be \"easy\" or \"normal\"")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("easy") {
            Ok(Difficulty::Easy)
        } else if s.eq_ignore_ascii_case("normal") {
            Ok(Difficulty::Normal)
        } else {
            Err(ParseDifficultyError)
        }
    }
}

/// Settings for a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    pub board_size: usize,
    /// Fixed RNG seed for reproducible games; entropy-seeded when `None`.
    pub seed: Option<u64>,
    pub placement_attempts: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            board_size: BOARD_SIZE,
            seed: None,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    pub fn with_placement_attempts(mut self, attempts: usize) -> Self {
        self.placement_attempts = attempts;
        self
    }

    /// Check that the board can hold the longest ship and fits a shot grid.
    pub fn validate(&self) -> Result<(), EngineError> {
        let min = longest_ship();
        let max = MAX_BOARD_SIZE;
        if self.board_size < min || self.board_size > max {
            return Err(EngineError::InvalidBoardSize {
                size: self.board_size,
                min,
                max,
            });
        }
        Ok(())
    }
}

