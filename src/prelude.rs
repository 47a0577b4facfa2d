//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, CellState, ComputerShot, Coord, Difficulty, EngineConfig, EngineError, GameEngine,
    GameStatus, Orientation, Player, Ship, ShotOutcome, TargetMode, Targeting,
};

#[cfg(feature = "std")]
pub use crate::init_logging;
