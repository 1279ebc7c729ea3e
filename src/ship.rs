//! Ship descriptors and the cells a placed ship covers.

use alloc::string::String;

use crate::common::Point;

/// Index of a ship in the registry, assigned in insertion order.
pub type ShipId = usize;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Both orientations in the order the placement search tries them.
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Unit step along this orientation.
    pub const fn step(self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// Registry entry: length, board symbol and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipDef {
    id: ShipId,
    length: usize,
    symbol: char,
    name: String,
}

impl ShipDef {
    pub fn new(id: ShipId, length: usize, symbol: char, name: impl Into<String>) -> Self {
        Self {
            id,
            length,
            symbol,
            name: name.into(),
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Cells covered by a ship of `length` whose top or left end is `origin`.
pub fn span(origin: Point, orientation: Orientation, length: usize) -> impl Iterator<Item = Point> {
    let (dr, dc) = orientation.step();
    (0..length as i32).map(move |k| origin.offset(dr * k, dc * k))
}
