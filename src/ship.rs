//! Ship definitions and hit tracking.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt;

use crate::common::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Map the presentation layer's `horizontal` flag onto an orientation.
    pub const fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// Unit step from the bow towards the stern.
    pub const fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type. Panics on a zero length.
    pub const fn new(name: &'static str, length: usize) -> Self {
        assert!(length > 0, "ship length must be at least 1");
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// A vessel occupying a contiguous run of cells.
///
/// A ship starts unplaced with no cells. The board assigns its cells exactly
/// once; after that only the hit set grows, and it never leaves the cell set.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    cells: Vec<Coord>,
    hits: BTreeSet<Coord>,
}

impl Ship {
    /// Create an unplaced ship.
    pub fn new(name: &'static str, length: usize) -> Self {
        Self::from_type(ShipType::new(name, length))
    }

    pub fn from_type(ship_type: ShipType) -> Self {
        Self {
            ship_type,
            cells: Vec::new(),
            hits: BTreeSet::new(),
        }
    }

    /// Assign the occupied cells. Only the board calls this, once.
    pub(crate) fn set_cells(&mut self, cells: Vec<Coord>) {
        debug_assert!(self.cells.is_empty());
        debug_assert_eq!(cells.len(), self.ship_type.length());
        self.cells = cells;
    }

    /// Register a shot at (`x`, `y`).
    /// Returns `true` only if this call newly recorded a hit.
    pub fn hit(&mut self, x: usize, y: usize) -> bool {
        let at = Coord::new(x, y);
        self.contains(x, y) && self.hits.insert(at)
    }

    /// A ship is sunk once every occupied cell has been hit. Unplaced ships are
    /// never sunk.
    pub fn is_sunk(&self) -> bool {
        self.is_placed() && self.hits.len() == self.cells.len()
    }

    /// Cells occupied by the ship, bow first.
    pub fn occupied_cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Cells hit so far.
    pub fn hits(&self) -> impl Iterator<Item = Coord> + '_ {
        self.hits.iter().copied()
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells.contains(&Coord::new(x, y))
    }

    pub fn is_placed(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    pub fn length(&self) -> usize {
        self.ship_type.length()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", length: {}, cells: {:?}, hits: {} }}",
            self.name(),
            self.length(),
            self.cells,
            self.hits.len(),
        )
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sunk() {
            write!(f, "{} (sunk)", self.name())
        } else {
            write!(f, "{} ({}/{} hits)", self.name(), self.hits.len(), self.length())
        }
    }
}
