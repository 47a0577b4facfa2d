//! A square bit grid packed into a single unsigned integer.
//!
//! The type is `no_std` friendly and avoids heap allocations. A grid of
//! dimension `N` occupies the low `N*N` bits of `T`, with cell `(x, y)` stored
//! at bit `y * N + x`. Shot and fired-at sets are tracked with it.

use core::{any, fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::common::Coord;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Requested dimension N*N exceeds capacity of `T::BITS`.
    SizeTooLarge { n: usize, capacity: usize },
    /// A zero-sized grid was requested.
    EmptyBoard,
    /// Column or row is out of bounds [0..N).
    IndexOutOfBounds { x: usize, y: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::SizeTooLarge { n, capacity } => {
                write!(
                    f,
                    "SizeTooLarge: N*N={} exceeds T::BITS={}",
                    n.saturating_mul(*n),
                    capacity
                )
            }
            BitBoardError::EmptyBoard => write!(f, "EmptyBoard: dimension must be at least 1"),
            BitBoardError::IndexOutOfBounds { x, y } => {
                write!(f, "IndexOutOfBounds: x={}, y={}", x, y)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}

/// An N×N bit grid stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
    size: usize,
}

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Bit capacity of the backing integer.
    pub const CAPACITY: usize = mem::size_of::<T>() * 8;

    /// Create an empty grid without a capacity check.
    ///
    /// Callers must guarantee `size * size <= Self::CAPACITY`; use
    /// [`BitBoard::try_new`] for untrusted sizes.
    #[inline]
    pub fn new(size: usize) -> Self {
        debug_assert!(size.checked_mul(size).is_some_and(|n| n <= Self::CAPACITY));
        BitBoard {
            bits: T::zero(),
            size,
        }
    }

    /// Fallible constructor: rejects empty grids and grids that do not fit in `T`.
    pub fn try_new(size: usize) -> Result<Self, BitBoardError> {
        if size == 0 {
            return Err(BitBoardError::EmptyBoard);
        }
        if size.checked_mul(size).map_or(true, |n| n > Self::CAPACITY) {
            return Err(BitBoardError::SizeTooLarge {
                n: size,
                capacity: Self::CAPACITY,
            });
        }
        Ok(Self::new(size))
    }

    /// Grid dimension N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells in the grid (`N * N`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Returns the number of set cells.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if no cells are set.
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Returns true if every cell of the grid is set.
    pub fn is_full(&self) -> bool {
        self.count_ones() == self.cell_count()
    }

    /// Gets the cell at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Result<bool, BitBoardError> {
        let idx = self.index(x, y)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    /// Like [`BitBoard::get`], but treats out-of-bounds cells as unset.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.get(x, y).unwrap_or(false)
    }

    /// Sets the cell at (x, y).
    pub fn set(&mut self, x: usize, y: usize) -> Result<(), BitBoardError> {
        let idx = self.index(x, y)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// Clears the cell at (x, y).
    pub fn clear(&mut self, x: usize, y: usize) -> Result<(), BitBoardError> {
        let idx = self.index(x, y)?;
        self.bits = self.bits & !(T::one() << idx);
        Ok(())
    }

    /// Clears every cell.
    #[inline]
    pub fn clear_all(&mut self) {
        self.bits = T::zero();
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize, BitBoardError> {
        if x >= self.size || y >= self.size {
            Err(BitBoardError::IndexOutOfBounds { x, y })
        } else {
            Ok(y * self.size + x)
        }
    }

    /// Iterator over the set cells, row by row.
    #[inline]
    pub fn iter_set_bits(&self) -> SetBits<'_, T> {
        SetBits {
            board: self,
            idx: 0,
        }
    }
}

impl<T> fmt::Debug for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}> {}x{}:", any::type_name::<T>(), self.size, self.size)?;
        for y in 0..self.size {
            for x in 0..self.size {
                let bit = if self.contains(x, y) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set cells of a bitboard.
#[derive(Clone, Copy)]
pub struct SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T>,
    idx: usize,
}

impl<'a, T> Iterator for SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coord;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let n = self.board.size;
        while self.idx < n * n {
            let idx = self.idx;
            self.idx += 1;
            if ((self.board.bits >> idx) & T::one()) != T::zero() {
                return Some(Coord::new(idx % n, idx / n));
            }
        }
        None
    }
}

/// Grid type used for every shot set in the engine.
pub type ShotGrid = BitBoard<u128>;
