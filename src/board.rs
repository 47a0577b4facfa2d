//! Game board state: ship placement, shot resolution and cell classification.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::bitboard::ShotGrid;
use crate::common::{BoardError, CellState, Coord, ShotOutcome};
use crate::config::BOARD_SIZE;
use crate::ship::{Orientation, Ship};

/// An N×N grid owning its placed ships and the shots received against it.
///
/// Each grid cell holds the index of the ship occupying it, if any. A cell
/// refers to a ship exactly when that ship lists the cell among its occupied
/// cells, and no cell is ever shared.
#[derive(Clone)]
pub struct Board {
    size: usize,
    grid: Vec<Option<usize>>,
    ships: Vec<Ship>,
    sunk: Vec<usize>,
    shots: ShotGrid,
}

impl Board {
    /// Create an empty standard-size board.
    pub fn new() -> Self {
        Board {
            size: BOARD_SIZE,
            grid: alloc::vec![None; BOARD_SIZE * BOARD_SIZE],
            ships: Vec::new(),
            sunk: Vec::new(),
            shots: ShotGrid::new(BOARD_SIZE),
        }
    }

    /// Create an empty `size`×`size` board.
    pub fn with_size(size: usize) -> Result<Self, BoardError> {
        let shots = ShotGrid::try_new(size)?;
        Ok(Board {
            size,
            grid: alloc::vec![None; size * size],
            ships: Vec::new(),
            sunk: Vec::new(),
            shots,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_valid_position(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Cells a ship of `length` would cover from (`x`, `y`), or `None` if any
    /// of them falls off the board.
    fn footprint(
        &self,
        length: usize,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Option<Vec<Coord>> {
        let (dx, dy) = orientation.step();
        let cells: Vec<Coord> = (0..length)
            .map(|i| Coord::new(x + i * dx, y + i * dy))
            .take_while(|c| self.is_valid_position(c.x, c.y))
            .collect();
        (cells.len() == length).then_some(cells)
    }

    /// Cells a ship would cover, clipped to the board. Used for placement
    /// previews where an invalid position is still drawn.
    pub fn placement_cells(
        &self,
        ship: &Ship,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Vec<Coord> {
        let (dx, dy) = orientation.step();
        (0..ship.length())
            .map(|i| Coord::new(x + i * dx, y + i * dy))
            .take_while(|c| self.is_valid_position(c.x, c.y))
            .collect()
    }

    /// Whether `ship` fits with its bow at (`x`, `y`) without leaving the
    /// board or overlapping a placed ship. Ships that are already placed never fit.
    pub fn can_place_ship(
        &self,
        ship: &Ship,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> bool {
        if ship.is_placed() {
            return false;
        }
        match self.footprint(ship.length(), x, y, orientation) {
            Some(cells) => cells.iter().all(|c| self.grid[self.index(*c)].is_none()),
            None => false,
        }
    }

    /// Place `ship` with its bow at (`x`, `y`).
    ///
    /// On an invalid position the board is left untouched and the ship is
    /// handed back in `Err`.
    pub fn place_ship(
        &mut self,
        mut ship: Ship,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<(), Ship> {
        if !self.can_place_ship(&ship, x, y, orientation) {
            return Err(ship);
        }
        let Some(cells) = self.footprint(ship.length(), x, y, orientation) else {
            return Err(ship);
        };
        let slot = self.ships.len();
        for c in cells.iter() {
            let idx = self.index(*c);
            self.grid[idx] = Some(slot);
        }
        log::debug!("placed {} at {} {:?}", ship.name(), Coord::new(x, y), orientation);
        ship.set_cells(cells);
        self.ships.push(ship);
        Ok(())
    }

    /// Returns a random legal (bow, orientation) for `ship`.
    ///
    /// Tries `attempts` uniformly random positions first, then falls back to
    /// choosing among every legal position so a crowded board still succeeds
    /// whenever any position exists.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship: &Ship,
        attempts: usize,
    ) -> Result<(Coord, Orientation), BoardError> {
        for _ in 0..attempts {
            let orient = Orientation::from_horizontal(rng.random());
            let x = rng.random_range(0..self.size);
            let y = rng.random_range(0..self.size);
            if self.can_place_ship(ship, x, y, orient) {
                return Ok((Coord::new(x, y), orient));
            }
        }

        let mut legal = Vec::new();
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            for y in 0..self.size {
                for x in 0..self.size {
                    if self.can_place_ship(ship, x, y, orient) {
                        legal.push((Coord::new(x, y), orient));
                    }
                }
            }
        }
        if legal.is_empty() {
            return Err(BoardError::UnableToPlaceShip(ship.name()));
        }
        log::warn!(
            "random placement of {} fell back to enumeration ({} legal positions)",
            ship.name(),
            legal.len()
        );
        Ok(legal[rng.random_range(0..legal.len())])
    }

    /// Place every ship at a random legal position.
    pub fn place_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ships: Vec<Ship>,
        attempts: usize,
    ) -> Result<(), BoardError> {
        for ship in ships {
            let (bow, orient) = self.random_placement(rng, &ship, attempts)?;
            if let Err(ship) = self.place_ship(ship, bow.x, bow.y, orient) {
                return Err(BoardError::UnableToPlaceShip(ship.name()));
            }
        }
        Ok(())
    }

    /// Resolve an incoming shot at (`x`, `y`).
    ///
    /// Out-of-bounds and repeated shots are reported as already shot and
    /// change nothing. A ship is returned in `sunk` only by the shot that
    /// completes it.
    pub fn receive_shot(&mut self, x: usize, y: usize) -> ShotOutcome {
        if !self.is_valid_position(x, y) || self.shots.contains(x, y) {
            return ShotOutcome::repeated();
        }
        // In bounds, checked above.
        let recorded = self.shots.set(x, y);
        debug_assert!(recorded.is_ok());

        let Some(slot) = self.grid[self.index(Coord::new(x, y))] else {
            return ShotOutcome::miss();
        };
        let ship = &mut self.ships[slot];
        ship.hit(x, y);
        if ship.is_sunk() && !self.sunk.contains(&slot) {
            self.sunk.push(slot);
            log::debug!("{} sunk by shot at {}", ship.name(), Coord::new(x, y));
            return ShotOutcome::hit_ship(Some(ship.clone()));
        }
        ShotOutcome::hit_ship(None)
    }

    /// Returns `true` when every placed ship is sunk (vacuously true for an
    /// empty fleet).
    pub fn all_ships_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Classify a cell for rendering. Out-of-bounds cells are `Empty`.
    pub fn cell_state(&self, x: usize, y: usize) -> CellState {
        if !self.is_valid_position(x, y) {
            return CellState::Empty;
        }
        let occupied = self.grid[self.index(Coord::new(x, y))].is_some();
        match (self.shots.contains(x, y), occupied) {
            (true, true) => CellState::Hit,
            (true, false) => CellState::Miss,
            (false, true) => CellState::Ship,
            (false, false) => CellState::Empty,
        }
    }

    /// Ship occupying (`x`, `y`), if any.
    pub fn ship_at(&self, x: usize, y: usize) -> Option<&Ship> {
        if !self.is_valid_position(x, y) {
            return None;
        }
        self.grid[self.index(Coord::new(x, y))].map(|slot| &self.ships[slot])
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Ships in the order they were sunk.
    pub fn sunk_ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.sunk.iter().map(|&slot| &self.ships[slot])
    }

    /// Placed ships still afloat.
    pub fn remaining_ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships.iter().filter(|s| !s.is_sunk())
    }

    /// Cells shot at so far.
    pub fn shots(&self) -> &ShotGrid {
        &self.shots
    }

    #[inline]
    fn index(&self, c: Coord) -> usize {
        c.y * self.size + c.x
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{} {{", self.size, self.size)?;
        for y in 0..self.size {
            write!(f, "  ")?;
            for x in 0..self.size {
                let ch = match self.cell_state(x, y) {
                    CellState::Empty => '.',
                    CellState::Ship => 'S',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  ships: {:?}", self.ships)?;
        write!(f, "}}")
    }
}
