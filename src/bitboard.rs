//! A rectangular bitboard packed into a single unsigned integer.
//!
//! The type is `no_std` friendly and avoids heap allocations. A board of
//! `rows×cols` cells is stored row-major in the low `rows * cols` bits of `T`,
//! so the largest supported grid is bounded by `T::BITS`.

use core::ops::Not;
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Requested board `rows * cols` exceeds the capacity of `T`.
    SizeTooLarge {
        rows: usize,
        cols: usize,
        capacity: usize,
    },
    /// Row or column index is out of bounds.
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::SizeTooLarge {
                rows,
                cols,
                capacity,
            } => write!(
                f,
                "SizeTooLarge: {}x{}={} exceeds T::BITS={}",
                rows,
                cols,
                rows * cols,
                capacity
            ),
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}

/// A `rows×cols` bitboard stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
    rows: usize,
    cols: usize,
}

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn capacity() -> usize {
        mem::size_of::<T>() * 8
    }

    #[inline]
    fn mask(&self) -> T {
        let n = self.rows * self.cols;
        if n == Self::capacity() {
            !T::zero()
        } else {
            (T::one() << n) - T::one()
        }
    }

    /// Create an empty board, failing when `rows * cols` does not fit in `T`.
    pub fn try_new(rows: usize, cols: usize) -> Result<Self, BitBoardError> {
        let capacity = Self::capacity();
        if rows * cols > capacity {
            Err(BitBoardError::SizeTooLarge {
                rows,
                cols,
                capacity,
            })
        } else {
            Ok(BitBoard {
                bits: T::zero(),
                rows,
                cols,
            })
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Gets the bit at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        let idx = self.index(row, col)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    /// Sets the bit at (row, col) to 1.
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        let idx = self.index(row, col)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Result<usize, BitBoardError> {
        if row >= self.rows || col >= self.cols {
            Err(BitBoardError::IndexOutOfBounds { row, col })
        } else {
            Ok(row * self.cols + col)
        }
    }

    /// Iterator over the set bits of the board, in row-major order.
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
        writeln!(f, "BitBoard {}x{}:", self.rows, self.cols)?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                let bit = if self.get(r, c).unwrap_or(false) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set bits of a bitboard.
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
    type Item = (usize, usize);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let cols = self.board.cols;
        while self.idx < self.board.rows * cols {
            let idx = self.idx;
            self.idx += 1;
            if ((self.board.bits >> idx) & T::one()) != T::zero() {
                return Some((idx / cols, idx % cols));
            }
        }
        None
    }
}

/// Complement within the board bounds.
impl<T> Not for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        BitBoard {
            bits: !self.bits & self.mask(),
            ..self
        }
    }
}

/// Cell set wide enough for any grid up to `MAX_ROWS×MAX_COLS`.
pub type CellSet = BitBoard<u128>;
