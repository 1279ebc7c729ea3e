//! Common types for the combat model: coordinates, attack results and board errors.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::ship::ShipId;

/// A zero-based `(row, col)` coordinate.
///
/// Coordinates are signed so neighbours of edge cells can be formed and then
/// rejected by a bounds check instead of underflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell shifted by `(dr, dc)`.
    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }

    pub const fn north(self) -> Self {
        self.offset(-1, 0)
    }

    pub const fn south(self) -> Self {
        self.offset(1, 0)
    }

    pub const fn west(self) -> Self {
        self.offset(0, -1)
    }

    pub const fn east(self) -> Self {
        self.offset(0, 1)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Result of an accepted attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    /// The shot landed on water.
    Miss,
    /// The shot hit a ship that still has intact cells.
    Hit(ShipId),
    /// The shot hit the last intact cell of a ship.
    Sink(ShipId),
}

/// Feedback handed to a player after each of its attacks.
///
/// When `accepted` is false the shot was out of bounds or repeated and the
/// other fields carry no information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackOutcome {
    pub accepted: bool,
    pub hit: bool,
    pub destroyed: bool,
    pub ship: Option<ShipId>,
}

impl AttackOutcome {
    /// Outcome of a shot the board refused.
    pub const fn rejected() -> Self {
        Self {
            accepted: false,
            hit: false,
            destroyed: false,
            ship: None,
        }
    }

    pub const fn miss() -> Self {
        Self {
            accepted: true,
            hit: false,
            destroyed: false,
            ship: None,
        }
    }

    pub const fn hit(ship: ShipId) -> Self {
        Self {
            accepted: true,
            hit: true,
            destroyed: false,
            ship: Some(ship),
        }
    }

    pub const fn destroyed(ship: ShipId) -> Self {
        Self {
            accepted: true,
            hit: true,
            destroyed: true,
            ship: Some(ship),
        }
    }
}

impl From<GuessResult> for AttackOutcome {
    fn from(res: GuessResult) -> Self {
        match res {
            GuessResult::Miss => AttackOutcome::miss(),
            GuessResult::Hit(id) => AttackOutcome::hit(id),
            GuessResult::Sink(id) => AttackOutcome::destroyed(id),
        }
    }
}

impl From<Result<GuessResult, BoardError>> for AttackOutcome {
    fn from(res: Result<GuessResult, BoardError>) -> Self {
        res.map_or_else(|_| AttackOutcome::rejected(), AttackOutcome::from)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid size or index).
    BitBoardError(BitBoardError),
    /// Ship id is not in the registry.
    InvalidShip(ShipId),
    /// Point lies outside the grid.
    OutOfBounds(Point),
    /// Ship would extend past the edge of the grid.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship or an obstruction.
    ShipOverlaps,
    /// A cell covered by a removal does not bear the ship's symbol.
    SymbolMismatch(Point),
    /// Attack was already made at this position.
    AlreadyAttacked(Point),
    /// Cell is temporarily obstructed and cannot be attacked.
    Obstructed(Point),
    /// No placement exists for the whole fleet.
    PlacementInfeasible,
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
            BoardError::InvalidShip(id) => write!(f, "Ship id {} is not registered", id),
            BoardError::OutOfBounds(p) => write!(f, "Point {} is outside the grid", p),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps an occupied cell"),
            BoardError::SymbolMismatch(p) => {
                write!(f, "Cell {} does not hold the ship being removed", p)
            }
            BoardError::AlreadyAttacked(p) => write!(f, "Cell {} was already attacked", p),
            BoardError::Obstructed(p) => write!(f, "Cell {} is obstructed", p),
            BoardError::PlacementInfeasible => write!(f, "Unable to place every ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
