//! A packed coordinate set using const generics.
//!
//! The type is `no_std` friendly and avoids heap allocations. Coordinates of
//! the largest supported grid (`MAX_SIZE × MAX_SIZE`) are packed row-major into
//! `WORDS` unsigned integers of type `T`, giving O(1) membership tests for
//! layout masks and generation bookkeeping.

use core::ops::{BitAnd, BitOr, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::config::MAX_SIZE;

/// Errors returned by cell set operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSetError {
    /// Row or column index is outside `[0..MAX_SIZE)`.
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for CellSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellSetError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CellSetError {}

/// A set of `(row, col)` coordinates packed into `WORDS` words of `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitGrid<T, const WORDS: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    words: [T; WORDS],
}

/// Word count needed to hold every coordinate of a `MAX_SIZE × MAX_SIZE` grid.
pub const CELL_SET_WORDS: usize = (MAX_SIZE * MAX_SIZE + 63) / 64;

/// The cell set used throughout the engine.
pub type CellSet = BitGrid<u64, CELL_SET_WORDS>;

impl<T, const WORDS: usize> BitGrid<T, WORDS>
where
    T: PrimInt + Unsigned + Zero,
{
    const WORD_BITS: usize = mem::size_of::<T>() * 8;

    /// Number of coordinates the set can address.
    pub const CAPACITY: usize = WORDS * mem::size_of::<T>() * 8;

    /// Create an empty set.
    #[inline]
    pub fn new() -> Self {
        BitGrid {
            words: [T::zero(); WORDS],
        }
    }

    /// Number of coordinates in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no coordinate is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Membership test. Coordinates outside the addressable grid are never members.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        match Self::locate(row, col) {
            Ok((word, bit)) => ((self.words[word] >> bit) & T::one()) != T::zero(),
            Err(_) => false,
        }
    }

    /// Adds `(row, col)` to the set.
    pub fn insert(&mut self, row: usize, col: usize) -> Result<(), CellSetError> {
        let (word, bit) = Self::locate(row, col)?;
        self.words[word] = self.words[word] | (T::one() << bit);
        Ok(())
    }

    /// Removes `(row, col)` from the set.
    pub fn remove(&mut self, row: usize, col: usize) -> Result<(), CellSetError> {
        let (word, bit) = Self::locate(row, col)?;
        self.words[word] = self.words[word] & !(T::one() << bit);
        Ok(())
    }

    /// Clears every coordinate.
    #[inline]
    pub fn clear(&mut self) {
        self.words = [T::zero(); WORDS];
    }

    #[inline]
    fn locate(row: usize, col: usize) -> Result<(usize, usize), CellSetError> {
        if row >= MAX_SIZE || col >= MAX_SIZE {
            return Err(CellSetError::IndexOutOfBounds { row, col });
        }
        let idx = row * MAX_SIZE + col;
        if idx >= Self::CAPACITY {
            return Err(CellSetError::IndexOutOfBounds { row, col });
        }
        Ok((idx / Self::WORD_BITS, idx % Self::WORD_BITS))
    }

    /// Creates a set from an iterator over `(row, col)` positions.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, CellSetError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut set = Self::new();
        for (r, c) in iter {
            set.insert(r, c)?;
        }
        Ok(set)
    }

    /// Iterator over the members in row-major order.
    #[inline]
    pub fn iter(&self) -> Members<'_, T, WORDS> {
        Members { set: self, idx: 0 }
    }
}

impl<T, const WORDS: usize> Default for BitGrid<T, WORDS>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const WORDS: usize> fmt::Debug for BitGrid<T, WORDS>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the members of a cell set.
#[derive(Clone, Copy)]
pub struct Members<'a, T, const WORDS: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    set: &'a BitGrid<T, WORDS>,
    idx: usize,
}

impl<'a, T, const WORDS: usize> Iterator for Members<'a, T, WORDS>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let limit = (MAX_SIZE * MAX_SIZE).min(BitGrid::<T, WORDS>::CAPACITY);
        let word_bits = BitGrid::<T, WORDS>::WORD_BITS;
        while self.idx < limit {
            let idx = self.idx;
            self.idx += 1;
            let word = self.set.words[idx / word_bits];
            if ((word >> (idx % word_bits)) & T::one()) != T::zero() {
                return Some((idx / MAX_SIZE, idx % MAX_SIZE));
            }
        }
        None
    }
}

impl<T, const WORDS: usize> BitAnd for BitGrid<T, WORDS>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(mut self, rhs: Self) -> Self {
        for (w, r) in self.words.iter_mut().zip(rhs.words.iter()) {
            *w = *w & *r;
        }
        self
    }
}

impl<T, const WORDS: usize> BitOr for BitGrid<T, WORDS>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(mut self, rhs: Self) -> Self {
        for (w, r) in self.words.iter_mut().zip(rhs.words.iter()) {
            *w = *w | *r;
        }
        self
    }
}

/// Complement within the addressable coordinates.
impl<T, const WORDS: usize> Not for BitGrid<T, WORDS>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn not(self) -> Self {
        let mut out = Self::new();
        for (r, c) in (0..MAX_SIZE).flat_map(|r| (0..MAX_SIZE).map(move |c| (r, c))) {
            if !self.contains(r, c) {
                let _ = out.insert(r, c);
            }
        }
        out
    }
}
