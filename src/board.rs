//! One side's grid: ship placement, attack resolution and rendering.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use log::debug;
use rand::Rng;

use crate::common::{BoardError, GuessResult, Point};
use crate::config::{GameConfig, EMPTY_MARK, HIT_MARK, MISS_MARK};
use crate::ship::{span, Orientation, ShipDef, ShipId};

/// State of a single grid cell.
///
/// Legal transitions during play are `Empty -> Miss` and `Occupied -> Hit`;
/// `Blocked` only exists while a placement search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Occupied(ShipId),
    Miss,
    Hit(ShipId),
    Blocked,
}

/// A rows×cols grid stored row-major, owned by one side.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    config: GameConfig,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board sized for `config`.
    pub fn new(config: &GameConfig) -> Self {
        Board {
            cells: vec![Cell::Empty; config.rows() * config.cols()],
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows()
    }

    pub fn cols(&self) -> usize {
        self.config.cols()
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        self.config.is_valid(p)
    }

    fn index(&self, p: Point) -> Option<usize> {
        if self.in_bounds(p) {
            Some(p.row as usize * self.cols() + p.col as usize)
        } else {
            None
        }
    }

    /// State of the cell at `p`, or `None` outside the grid.
    pub fn cell(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Reset every cell to `Empty`.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    fn ship_def(&self, ship_id: ShipId) -> Result<&ShipDef, BoardError> {
        self.config
            .ship(ship_id)
            .ok_or(BoardError::InvalidShip(ship_id))
    }

    /// Indices covered by `ship_id` at `origin`, or an error if any falls off the grid.
    fn footprint(
        &self,
        origin: Point,
        ship_id: ShipId,
        orientation: Orientation,
    ) -> Result<Vec<usize>, BoardError> {
        let len = self.ship_def(ship_id)?.length();
        span(origin, orientation, len)
            .map(|p| self.index(p).ok_or(BoardError::ShipOutOfBounds))
            .collect()
    }

    /// Place a ship with its top or left end at `origin`.
    ///
    /// Fails without touching the grid if the ship leaves the board or covers
    /// a non-empty cell.
    pub fn place_ship(
        &mut self,
        origin: Point,
        ship_id: ShipId,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let footprint = self.footprint(origin, ship_id, orientation)?;
        if footprint.iter().any(|&i| self.cells[i] != Cell::Empty) {
            return Err(BoardError::ShipOverlaps);
        }
        for i in footprint {
            self.cells[i] = Cell::Occupied(ship_id);
        }
        Ok(())
    }

    /// Undo [`Board::place_ship`] with the same arguments.
    ///
    /// Every covered cell must still hold an intact segment of `ship_id`.
    pub fn remove_ship(
        &mut self,
        origin: Point,
        ship_id: ShipId,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let len = self.ship_def(ship_id)?.length();
        let footprint = self.footprint(origin, ship_id, orientation)?;
        for (p, &i) in span(origin, orientation, len).zip(&footprint) {
            if self.cells[i] != Cell::Occupied(ship_id) {
                return Err(BoardError::SymbolMismatch(p));
            }
        }
        for i in footprint {
            self.cells[i] = Cell::Empty;
        }
        Ok(())
    }

    /// Resolve a shot at `p`.
    pub fn attack(&mut self, p: Point) -> Result<GuessResult, BoardError> {
        let i = self.index(p).ok_or(BoardError::OutOfBounds(p))?;
        match self.cells[i] {
            Cell::Miss | Cell::Hit(_) => Err(BoardError::AlreadyAttacked(p)),
            Cell::Blocked => Err(BoardError::Obstructed(p)),
            Cell::Empty => {
                self.cells[i] = Cell::Miss;
                Ok(GuessResult::Miss)
            }
            Cell::Occupied(id) => {
                self.cells[i] = Cell::Hit(id);
                // Full scan: the ship is gone once none of its cells remain intact.
                if self.cells.iter().any(|c| *c == Cell::Occupied(id)) {
                    Ok(GuessResult::Hit(id))
                } else {
                    Ok(GuessResult::Sink(id))
                }
            }
        }
    }

    /// Returns `true` when no intact ship segment remains.
    pub fn all_destroyed(&self) -> bool {
        !self.cells.iter().any(|c| matches!(c, Cell::Occupied(_)))
    }

    /// Block `fraction` of the grid, chosen among currently empty cells.
    ///
    /// Returns the number of cells blocked.
    pub fn obstruct<R: Rng + ?Sized>(&mut self, rng: &mut R, fraction: f64) -> usize {
        let empties: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
            .collect();
        let wanted = (self.cells.len() as f64 * fraction.clamp(0.0, 1.0)) as usize;
        let amount = wanted.min(empties.len());
        for k in rand::seq::index::sample(rng, empties.len(), amount).iter() {
            self.cells[empties[k]] = Cell::Blocked;
        }
        debug!("obstructed {} of {} cells", amount, self.cells.len());
        amount
    }

    /// Restore every blocked cell to `Empty`.
    pub fn clear_obstruction(&mut self) {
        for c in self.cells.iter_mut().filter(|c| **c == Cell::Blocked) {
            *c = Cell::Empty;
        }
    }

    /// Whether any cell is still blocked.
    pub fn is_obstructed(&self) -> bool {
        self.cells.contains(&Cell::Blocked)
    }

    /// Number of intact cells left for `ship_id`.
    pub fn intact_cells(&self, ship_id: ShipId) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(ship_id))
            .count()
    }

    /// Displayable view of the grid; `shots_only` hides intact ships.
    pub fn render(&self, shots_only: bool) -> BoardView<'_> {
        BoardView {
            board: self,
            shots_only,
        }
    }

    fn mark(&self, cell: Cell, shots_only: bool) -> char {
        match cell {
            Cell::Empty => EMPTY_MARK,
            Cell::Miss => MISS_MARK,
            Cell::Hit(_) => HIT_MARK,
            Cell::Blocked if shots_only => EMPTY_MARK,
            Cell::Blocked => '#',
            Cell::Occupied(_) if shots_only => EMPTY_MARK,
            Cell::Occupied(id) => self.config.ship_symbol(id).unwrap_or('?'),
        }
    }
}

/// Text rendering: a header of column digits then `<row> <cells>` per row.
pub struct BoardView<'a> {
    board: &'a Board,
    shots_only: bool,
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.board;
        write!(f, "  ")?;
        for c in 0..b.cols() {
            write!(f, "{}", c)?;
        }
        writeln!(f)?;
        for (r, row) in b.cells.chunks(b.cols()).enumerate() {
            write!(f, "{} ", r)?;
            for cell in row {
                write!(f, "{}", b.mark(*cell, self.shots_only))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{} {{", self.rows(), self.cols())?;
        write!(f, "{}", self.render(false))?;
        write!(f, "}}")
    }
}
