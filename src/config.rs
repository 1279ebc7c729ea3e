//! Game dimensions and the ship registry.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::common::Point;
use crate::ship::{ShipDef, ShipId};

pub const MAX_ROWS: usize = 10;
pub const MAX_COLS: usize = 10;

/// Board markers that ship symbols may not reuse.
pub const EMPTY_MARK: char = '.';
pub const MISS_MARK: char = 'o';
pub const HIT_MARK: char = 'X';
pub const RESERVED_MARKS: [char; 3] = [EMPTY_MARK, MISS_MARK, HIT_MARK];

/// How many times a side may retry fleet placement before the match is abandoned.
pub const PLACEMENT_ATTEMPTS: usize = 50;

/// Share of the grid blocked before each randomized placement search.
pub const OBSTRUCTION_FRACTION: f64 = 0.5;

/// Cap on parity-constrained draws before hunting falls back to uniform sampling.
pub const HUNT_ATTEMPTS: usize = 1000;

/// Errors rejecting a grid size or a ship definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RowsOutOfRange(usize),
    ColsOutOfRange(usize),
    BadLength(usize),
    ShipDoesNotFit(usize),
    UnprintableSymbol(char),
    ReservedSymbol(char),
    DuplicateSymbol(char),
    BoardTooSmall,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::RowsOutOfRange(n) => {
                write!(f, "Number of rows {} must be >= 1 and <= {}", n, MAX_ROWS)
            }
            ConfigError::ColsOutOfRange(n) => {
                write!(f, "Number of columns {} must be >= 1 and <= {}", n, MAX_COLS)
            }
            ConfigError::BadLength(len) => write!(f, "Bad ship length {}; it must be >= 1", len),
            ConfigError::ShipDoesNotFit(len) => {
                write!(f, "Bad ship length {}; it won't fit on the board", len)
            }
            ConfigError::UnprintableSymbol(c) => write!(
                f,
                "Unprintable character with value {} must not be used as a ship symbol",
                *c as u32
            ),
            ConfigError::ReservedSymbol(c) => {
                write!(f, "Character {} must not be used as a ship symbol", c)
            }
            ConfigError::DuplicateSymbol(c) => {
                write!(f, "Ship symbol {} must not be used for more than one ship", c)
            }
            ConfigError::BoardTooSmall => write!(f, "Board is too small to fit all ships"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Grid dimensions plus the ordered, validated list of ships.
///
/// Populated once before play; every other component only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    rows: usize,
    cols: usize,
    ships: Vec<ShipDef>,
}

impl GameConfig {
    /// Create a registry for a `rows×cols` grid with no ships.
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if !(1..=MAX_ROWS).contains(&rows) {
            return Err(ConfigError::RowsOutOfRange(rows));
        }
        if !(1..=MAX_COLS).contains(&cols) {
            return Err(ConfigError::ColsOutOfRange(cols));
        }
        Ok(Self {
            rows,
            cols,
            ships: Vec::new(),
        })
    }

    /// The classic 10×10 fleet.
    pub fn standard() -> Self {
        let mut cfg = Self {
            rows: MAX_ROWS,
            cols: MAX_COLS,
            ships: Vec::new(),
        };
        for (len, sym, name) in [
            (5, 'A', "aircraft carrier"),
            (4, 'B', "battleship"),
            (3, 'D', "destroyer"),
            (3, 'S', "submarine"),
            (2, 'P', "patrol boat"),
        ] {
            cfg.ships.push(ShipDef::new(cfg.ships.len(), len, sym, name));
        }
        cfg
    }

    /// Register a ship, returning its id.
    pub fn add_ship(
        &mut self,
        length: usize,
        symbol: char,
        name: impl Into<String>,
    ) -> Result<ShipId, ConfigError> {
        if length < 1 {
            return Err(ConfigError::BadLength(length));
        }
        if length > self.rows && length > self.cols {
            return Err(ConfigError::ShipDoesNotFit(length));
        }
        if !symbol.is_ascii() || symbol.is_ascii_control() {
            return Err(ConfigError::UnprintableSymbol(symbol));
        }
        if RESERVED_MARKS.contains(&symbol) {
            return Err(ConfigError::ReservedSymbol(symbol));
        }
        if self.ships.iter().any(|s| s.symbol() == symbol) {
            return Err(ConfigError::DuplicateSymbol(symbol));
        }
        if self.total_ship_cells() + length > self.rows * self.cols {
            return Err(ConfigError::BoardTooSmall);
        }
        let id = self.ships.len();
        self.ships.push(ShipDef::new(id, length, symbol, name));
        Ok(id)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn ships(&self) -> &[ShipDef] {
        &self.ships
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    pub fn ship(&self, id: ShipId) -> Option<&ShipDef> {
        self.ships.get(id)
    }

    pub fn ship_length(&self, id: ShipId) -> Option<usize> {
        self.ship(id).map(ShipDef::length)
    }

    pub fn ship_symbol(&self, id: ShipId) -> Option<char> {
        self.ship(id).map(ShipDef::symbol)
    }

    pub fn ship_name(&self, id: ShipId) -> Option<&str> {
        self.ship(id).map(ShipDef::name)
    }

    /// Length of the shortest ship, or 0 for an empty registry.
    pub fn min_ship_length(&self) -> usize {
        self.ships.iter().map(ShipDef::length).min().unwrap_or(0)
    }

    /// Total number of cells covered by the fleet.
    pub fn total_ship_cells(&self) -> usize {
        self.ships.iter().map(ShipDef::length).sum()
    }

    pub fn is_valid(&self, p: Point) -> bool {
        p.row >= 0 && p.col >= 0 && (p.row as usize) < self.rows && (p.col as usize) < self.cols
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}
