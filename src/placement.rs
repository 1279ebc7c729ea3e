//! Exhaustive backtracking placement of a fleet.
//!
//! Ships are handled in registry order. For each ship, origins are tried
//! row-major and horizontal before vertical; the first complete assignment
//! wins. The order is fixed, so a given obstruction pattern always yields the
//! same fleet layout.

use log::{debug, warn};
use rand::Rng;

use crate::board::Board;
use crate::common::{BoardError, Point};
use crate::config::{OBSTRUCTION_FRACTION, PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, ShipId};

/// Place every registered ship on `board` without overlaps.
///
/// On failure every ship placed during the search has been removed again, so
/// the board is exactly as it was before the call.
pub fn place_all(board: &mut Board) -> Result<(), BoardError> {
    if place_from(board, 0) {
        Ok(())
    } else {
        Err(BoardError::PlacementInfeasible)
    }
}

fn place_from(board: &mut Board, ship_id: ShipId) -> bool {
    if ship_id >= board.config().ship_count() {
        return true;
    }
    for row in 0..board.rows() as i32 {
        for col in 0..board.cols() as i32 {
            let origin = Point::new(row, col);
            for orientation in Orientation::ALL {
                if board.place_ship(origin, ship_id, orientation).is_err() {
                    continue;
                }
                if place_from(board, ship_id + 1) {
                    return true;
                }
                // Just placed with these arguments, so removal cannot fail.
                let _ = board.remove_ship(origin, ship_id, orientation);
            }
        }
    }
    false
}

/// Randomized fleet layout: obstruct half the grid, search, then unblock.
///
/// The board is cleared first. Each attempt draws a fresh obstruction pattern.
/// Once `PLACEMENT_ATTEMPTS` obstructed searches have failed, one last search
/// runs on the open grid, so fleets too dense to survive the obstruction are
/// still placed. If that fails too, the board is left empty.
pub fn place_fleet<R: Rng + ?Sized>(rng: &mut R, board: &mut Board) -> Result<(), BoardError> {
    for attempt in 1..=PLACEMENT_ATTEMPTS {
        board.clear();
        board.obstruct(rng, OBSTRUCTION_FRACTION);
        let placed = place_all(board);
        board.clear_obstruction();
        if placed.is_ok() {
            debug!("fleet placed on attempt {}", attempt);
            return Ok(());
        }
    }
    board.clear();
    if place_all(board).is_ok() {
        debug!(
            "fleet placed on the open grid after {} obstructed attempts",
            PLACEMENT_ATTEMPTS
        );
        return Ok(());
    }
    warn!(
        "no fleet layout found after {} attempts",
        PLACEMENT_ATTEMPTS
    );
    Err(BoardError::PlacementInfeasible)
}
