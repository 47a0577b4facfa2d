//! Common types for the engine: coordinates, shot outcomes and errors.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::ship::Ship;

/// A zero-indexed board cell; `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Offset this coordinate by `(dx, dy)`, returning `None` if the result
    /// would leave the `size`×`size` board.
    pub fn offset(self, dx: isize, dy: isize, size: usize) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < size && y < size).then_some(Coord { x, y })
    }

    /// Signed step from `self` to `other`.
    pub fn delta_to(self, other: Coord) -> (isize, isize) {
        (
            other.x as isize - self.x as isize,
            other.y as isize - self.y as isize,
        )
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Render-facing classification of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Empty,
    Ship,
    Hit,
    Miss,
}

/// Compact result of a resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot landed in open water.
    Miss,
    /// Shot sank a ship, carrying its name.
    Sink(&'static str),
}

/// Full outcome of [`Board::receive_shot`](crate::Board::receive_shot).
///
/// `sunk` is populated only by the shot that completes a ship; it carries a
/// snapshot of that ship so callers can report it without re-querying the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotOutcome {
    pub already_shot: bool,
    pub hit: bool,
    pub sunk: Option<Ship>,
}

impl ShotOutcome {
    /// Outcome for repeated or out-of-bounds shots.
    pub const fn repeated() -> Self {
        Self {
            already_shot: true,
            hit: false,
            sunk: None,
        }
    }

    pub const fn miss() -> Self {
        Self {
            already_shot: false,
            hit: false,
            sunk: None,
        }
    }

    pub fn hit_ship(sunk: Option<Ship>) -> Self {
        Self {
            already_shot: false,
            hit: true,
            sunk,
        }
    }

    /// Collapse into a [`GuessResult`]; `None` when the shot did not count.
    pub fn result(&self) -> Option<GuessResult> {
        if self.already_shot {
            return None;
        }
        Some(match (&self.sunk, self.hit) {
            (Some(ship), _) => GuessResult::Sink(ship.name()),
            (None, true) => GuessResult::Hit,
            (None, false) => GuessResult::Miss,
        })
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid size or index).
    BitBoardError(BitBoardError),
    /// No legal position remains for the named ship.
    UnableToPlaceShip(&'static str),
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::UnableToPlaceShip(name) => write!(f, "Unable to place ship {}", name),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Errors returned by the game engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Board(BoardError),
    /// Board dimension cannot hold the fleet or exceeds shot-grid capacity.
    InvalidBoardSize { size: usize, min: usize, max: usize },
    /// Every cell of the opponent board has already been fired at.
    NoTargetsRemain,
}

impl From<BoardError> for EngineError {
    fn from(err: BoardError) -> Self {
        EngineError::Board(err)
    }
}

impl From<BitBoardError> for EngineError {
    fn from(err: BitBoardError) -> Self {
        EngineError::Board(BoardError::BitBoardError(err))
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Board(e) => write!(f, "{}", e),
            EngineError::InvalidBoardSize { size, min, max } => write!(
                f,
                "Board size {} is invalid: must be between {} and {}",
                size, min, max
            ),
            EngineError::NoTargetsRemain => write!(f, "No targets remain on the opponent board"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
