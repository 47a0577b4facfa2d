// Computer targeting: random search until a ship is found, then work along it.
// Hunt/target mode is an explicit state rather than inferred from queue length.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::Rng;

use crate::{
    bitboard::ShotGrid,
    common::{Coord, EngineError},
    config::Difficulty,
};

/// Neighbour offsets, in the order candidates are queued.
const NEIGHBOURS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Which of the two targeting modes the computer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// No located ship: shots are random.
    Hunt,
    /// A ship has been hit but not sunk.
    Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Hunting,
    Targeting {
        /// Candidate cells, tried front first.
        queue: VecDeque<Coord>,
        /// Hits since the last confirmed sink, oldest first.
        chain: Vec<Coord>,
    },
}

/// The computer's shot-selection state for one game.
///
/// Every fired cell is recorded, so a cell is never chosen twice. Queue
/// entries are filtered when enqueued and again when dequeued, since a cell
/// can be fired at by a random shot while it waits in the queue.
#[derive(Debug, Clone)]
pub struct Targeting {
    difficulty: Difficulty,
    fired: ShotGrid,
    state: State,
}

impl Targeting {
    /// Targeting against an opponent board of dimension `size`.
    pub fn new(difficulty: Difficulty, size: usize) -> Self {
        Self {
            difficulty,
            fired: ShotGrid::new(size),
            state: State::Hunting,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> TargetMode {
        match self.state {
            State::Hunting => TargetMode::Hunt,
            State::Targeting { .. } => TargetMode::Target,
        }
    }

    /// Cells fired at so far this game.
    pub fn fired(&self) -> &ShotGrid {
        &self.fired
    }

    pub fn has_fired(&self, at: Coord) -> bool {
        self.fired.contains(at.x, at.y)
    }

    /// Pending candidates in the order they will be tried.
    pub fn queue(&self) -> Vec<Coord> {
        match &self.state {
            State::Hunting => Vec::new(),
            State::Targeting { queue, .. } => queue.iter().copied().collect(),
        }
    }

    /// Hits accumulated since the last sink, oldest first.
    pub fn hit_chain(&self) -> &[Coord] {
        match &self.state {
            State::Hunting => &[],
            State::Targeting { chain, .. } => chain,
        }
    }

    /// Most recent hit on a ship that is still afloat.
    pub fn last_hit(&self) -> Option<Coord> {
        self.hit_chain().last().copied()
    }

    /// Choose the next cell to fire at.
    ///
    /// Fails only when every cell has been fired at, which a game that stops
    /// on the last sink never reaches.
    pub fn select_shot<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Coord, EngineError> {
        if self.fired.is_full() {
            return Err(EngineError::NoTargetsRemain);
        }
        if self.difficulty == Difficulty::Normal {
            if let Some(at) = self.next_queued() {
                log::debug!("targeting queued cell {}", at);
                return Ok(at);
            }
        }
        Ok(self.random_unfired(rng))
    }

    fn next_queued(&mut self) -> Option<Coord> {
        let State::Targeting { queue, .. } = &mut self.state else {
            return None;
        };
        while let Some(at) = queue.pop_front() {
            if !self.fired.contains(at.x, at.y) {
                return Some(at);
            }
            log::trace!("dropping stale candidate {}", at);
        }
        None
    }

    // Rejection sampling; terminates because the grid is known not to be full.
    fn random_unfired<R: Rng + ?Sized>(&self, rng: &mut R) -> Coord {
        let size = self.fired.size();
        loop {
            let x = rng.random_range(0..size);
            let y = rng.random_range(0..size);
            if !self.fired.contains(x, y) {
                return Coord::new(x, y);
            }
        }
    }

    /// Feed back the resolution of a shot at `at`. Off-board cells are ignored.
    ///
    /// A sink drops every pending candidate and returns to hunting. A hit that
    /// does not sink extends the chain and queues follow-up cells: the four
    /// neighbours of the hit, or once the last two hits are adjacent, the two
    /// cells continuing their line at either end.
    pub fn apply_shot_result(&mut self, at: Coord, hit: bool, sunk: bool) {
        if self.fired.set(at.x, at.y).is_err() {
            log::warn!("ignoring result for off-board cell {}", at);
            return;
        }
        if !hit {
            return;
        }
        if sunk {
            if self.state != State::Hunting {
                log::debug!("ship sunk at {}, back to hunting", at);
            }
            self.state = State::Hunting;
            return;
        }

        if self.state == State::Hunting {
            log::debug!("hit at {}, switching to targeting", at);
            self.state = State::Targeting {
                queue: VecDeque::new(),
                chain: Vec::new(),
            };
        }
        let size = self.fired.size();
        let fired = &self.fired;
        let State::Targeting { queue, chain } = &mut self.state else {
            return;
        };
        chain.push(at);

        let candidates: Vec<Coord> = match line_through_last_two(chain) {
            Some((prev, (dx, dy))) => [at.offset(dx, dy, size), prev.offset(-dx, -dy, size)]
                .into_iter()
                .flatten()
                .collect(),
            None => NEIGHBOURS
                .iter()
                .filter_map(|&(dx, dy)| at.offset(dx, dy, size))
                .collect(),
        };
        for c in candidates {
            if !fired.contains(c.x, c.y) && !queue.contains(&c) {
                queue.push_back(c);
            }
        }
    }
}

/// If the last two hits are adjacent, the earlier one and the unit step
/// from it to the latest.
fn line_through_last_two(chain: &[Coord]) -> Option<(Coord, (isize, isize))> {
    let [.., prev, last] = chain else {
        return None;
    };
    (prev.manhattan(*last) == 1).then(|| (*prev, prev.delta_to(*last)))
}
