// Targeting logic for the automated opponent.
// A single state value plus a bundle of lead data, advanced by one transition
// per attack result.

use alloc::vec::Vec;

use log::debug;
use rand::Rng;

use crate::{
    bitboard::CellSet,
    common::{AttackOutcome, BoardError, Point},
    config::{GameConfig, HUNT_ATTEMPTS},
    ship::{Orientation, ShipDef, ShipId},
};

/// Phase of the targeting machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetingState {
    /// No live lead; guess on a checkerboard.
    Hunt,
    /// Trying the four neighbours of a first hit.
    Probe,
    /// Walking a line of hits in both directions.
    Track,
    /// Searching beside a line that ended without sinking its ship.
    Widen,
    /// Mopping up after a line held more hits than the ship that sank.
    Cleanup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Low,
    High,
}

/// Everything the non-hunting states remember about the current lead.
#[derive(Debug, Clone, Default)]
struct Leads {
    probe: Vec<Point>,
    track: Vec<Point>,
    widen: Vec<Point>,
    cleanup: Vec<Point>,
    anchor: Point,
    axis: Option<Orientation>,
    tracked: Vec<Point>,
    low_open: bool,
    high_open: bool,
}

impl Leads {
    fn clear(&mut self) {
        *self = Leads::default();
    }
}

/// Decides which cell to attack next from hit/miss/destroyed feedback alone.
#[derive(Debug, Clone)]
pub struct Targeting {
    ship_lengths: Vec<usize>,
    min_ship_length: usize,
    state: TargetingState,
    leads: Leads,
    attacked: CellSet,
    history: Vec<Point>,
}

/// Grid coordinates of `p`, or `None` when it lies off the grid.
fn grid_coords(cells: &CellSet, p: Point) -> Option<(usize, usize)> {
    let row = usize::try_from(p.row).ok()?;
    let col = usize::try_from(p.col).ok()?;
    (row < cells.rows() && col < cells.cols()).then_some((row, col))
}

fn is_candidate(attacked: &CellSet, p: Point) -> bool {
    grid_coords(attacked, p).is_some_and(|(r, c)| attacked.get(r, c) == Ok(false))
}

/// Pop until a still-attackable point turns up.
fn pop_valid(queue: &mut Vec<Point>, attacked: &CellSet) -> Option<Point> {
    while let Some(p) = queue.pop() {
        if is_candidate(attacked, p) {
            return Some(p);
        }
    }
    None
}

/// Push order east, west, south, north, so north pops first.
fn push_neighbours(queue: &mut Vec<Point>, p: Point) {
    queue.extend([p.east(), p.west(), p.south(), p.north()]);
}

/// A random cell whose `(row + col) % 2 == parity`, if the grid has one in the drawn row.
fn parity_cell<R: Rng + ?Sized>(rng: &mut R, rows: usize, cols: usize, parity: usize) -> Option<Point> {
    let row = rng.random_range(0..rows);
    let offset = (parity + row) % 2;
    let count = (cols + 1 - offset) / 2;
    if count == 0 {
        return None;
    }
    let col = offset + 2 * rng.random_range(0..count);
    Some(Point::new(row as i32, col as i32))
}

impl Targeting {
    /// Create a machine for an opponent grid laid out by `config`.
    pub fn new(config: &GameConfig) -> Result<Self, BoardError> {
        Ok(Self {
            ship_lengths: config.ships().iter().map(ShipDef::length).collect(),
            min_ship_length: config.min_ship_length(),
            state: TargetingState::Hunt,
            leads: Leads::default(),
            attacked: CellSet::try_new(config.rows(), config.cols())?,
            history: Vec::new(),
        })
    }

    pub fn state(&self) -> TargetingState {
        self.state
    }

    /// Every point this machine has been told it attacked, in order.
    pub fn history(&self) -> &[Point] {
        &self.history
    }

    /// Hits recorded along the current line.
    pub fn tracked(&self) -> &[Point] {
        &self.leads.tracked
    }

    /// Axis inferred for the current line, if any.
    pub fn axis(&self) -> Option<Orientation> {
        self.leads.axis
    }

    /// Queued candidates of the current state, next one last.
    pub fn pending(&self) -> &[Point] {
        match self.state {
            TargetingState::Hunt => &[],
            TargetingState::Probe => &self.leads.probe,
            TargetingState::Track => &self.leads.track,
            TargetingState::Widen => &self.leads.widen,
            TargetingState::Cleanup => &self.leads.cleanup,
        }
    }

    /// In bounds and not yet attacked by this machine.
    pub fn is_valid_target(&self, p: Point) -> bool {
        is_candidate(&self.attacked, p)
    }

    /// Choose the next cell to attack, or `None` once every cell has been tried.
    pub fn next_target<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Point> {
        let attacked = &self.attacked;
        let queued = match self.state {
            TargetingState::Hunt => None,
            TargetingState::Probe => pop_valid(&mut self.leads.probe, attacked),
            TargetingState::Track => pop_valid(&mut self.leads.track, attacked),
            TargetingState::Widen => pop_valid(&mut self.leads.widen, attacked),
            TargetingState::Cleanup => pop_valid(&mut self.leads.cleanup, attacked),
        };
        if queued.is_some() {
            return queued;
        }
        if matches!(self.state, TargetingState::Widen | TargetingState::Cleanup) {
            self.enter_hunt();
        }
        self.guess(rng)
    }

    /// Hunting guess: checkerboard cells while every ship spans two or more
    /// cells, uniform over untried cells otherwise or once the cap is hit.
    pub fn guess<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Point> {
        let (rows, cols) = (self.attacked.rows(), self.attacked.cols());
        if self.min_ship_length > 1 {
            for _ in 0..HUNT_ATTEMPTS {
                let parity = rng.random_range(0..2);
                match parity_cell(rng, rows, cols, parity) {
                    Some(p) if self.is_valid_target(p) => return Some(p),
                    _ => {}
                }
            }
            debug!("parity hunt exhausted after {} draws", HUNT_ATTEMPTS);
        }
        let open: Vec<Point> = (!self.attacked)
            .iter_set_bits()
            .map(|(r, c)| Point::new(r as i32, c as i32))
            .collect();
        if open.is_empty() {
            return None;
        }
        Some(open[rng.random_range(0..open.len())])
    }

    /// Feed back the result of attacking `p`.
    pub fn record_attack_result(&mut self, p: Point, outcome: AttackOutcome) {
        let marked = grid_coords(&self.attacked, p)
            .is_some_and(|(r, c)| self.attacked.set(r, c).is_ok());
        if !marked {
            debug!("recorded shot {} lies off the grid", p);
        }
        self.history.push(p);
        if !outcome.accepted {
            return;
        }
        let (hit, destroyed) = (outcome.hit, outcome.destroyed);
        match self.state {
            TargetingState::Hunt => {
                if hit && !destroyed {
                    self.enter_probe(p);
                }
            }
            TargetingState::Probe => {
                if destroyed {
                    self.enter_hunt();
                } else if hit {
                    self.enter_track(p);
                }
            }
            TargetingState::Track => {
                if destroyed {
                    self.finish_track(p, outcome.ship);
                } else if hit {
                    self.extend_track(p);
                } else {
                    self.close_frontier(p);
                }
            }
            TargetingState::Widen => {
                if destroyed {
                    self.enter_hunt();
                } else if hit {
                    push_neighbours(&mut self.leads.widen, p);
                }
            }
            TargetingState::Cleanup => {
                if hit && !destroyed {
                    push_neighbours(&mut self.leads.cleanup, p);
                }
            }
        }
    }

    fn set_state(&mut self, next: TargetingState) {
        if self.state != next {
            debug!("targeting {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }

    fn enter_hunt(&mut self) {
        self.leads.clear();
        self.set_state(TargetingState::Hunt);
    }

    fn enter_probe(&mut self, anchor: Point) {
        self.leads.clear();
        push_neighbours(&mut self.leads.probe, anchor);
        self.leads.anchor = anchor;
        self.set_state(TargetingState::Probe);
    }

    /// Coordinate of `p` along the tracked axis.
    fn along(&self, p: Point) -> i32 {
        match self.leads.axis {
            Some(Orientation::Vertical) => p.row,
            _ => p.col,
        }
    }

    fn on_line(&self, p: Point) -> bool {
        let a = self.leads.anchor;
        match self.leads.axis {
            Some(Orientation::Horizontal) => p.row == a.row,
            Some(Orientation::Vertical) => p.col == a.col,
            None => false,
        }
    }

    fn side_of(&self, p: Point) -> Option<Side> {
        if !self.on_line(p) {
            return None;
        }
        let (at, anchor) = (self.along(p), self.along(self.leads.anchor));
        if at < anchor {
            Some(Side::Low)
        } else if at > anchor {
            Some(Side::High)
        } else {
            None
        }
    }

    /// Queue the next cell beyond `end` on `side`, or close that side.
    fn open_frontier(&mut self, side: Side, end: Point) {
        let Some(axis) = self.leads.axis else { return };
        let (dr, dc) = axis.step();
        let next = match side {
            Side::Low => end.offset(-dr, -dc),
            Side::High => end.offset(dr, dc),
        };
        let open = is_candidate(&self.attacked, next);
        if open {
            self.leads.track.push(next);
        }
        match side {
            Side::Low => self.leads.low_open = open,
            Side::High => self.leads.high_open = open,
        }
    }

    fn enter_track(&mut self, p: Point) {
        let anchor = self.leads.anchor;
        let axis = if p.row == anchor.row {
            Orientation::Horizontal
        } else if p.col == anchor.col {
            Orientation::Vertical
        } else {
            debug!("second hit {} is off the anchor's lines; re-anchoring", p);
            self.enter_probe(p);
            return;
        };
        self.leads.axis = Some(axis);
        self.leads.track.clear();
        self.leads.tracked.clear();
        self.leads.tracked.extend([anchor, p]);
        self.set_state(TargetingState::Track);
        // The anchor's side is pushed last so it is tried first.
        if self.along(p) > self.along(anchor) {
            self.open_frontier(Side::High, p);
            self.open_frontier(Side::Low, anchor);
        } else {
            self.open_frontier(Side::Low, p);
            self.open_frontier(Side::High, anchor);
        }
        self.widen_if_closed();
    }

    fn extend_track(&mut self, p: Point) {
        self.leads.tracked.push(p);
        if let Some(side) = self.side_of(p) {
            self.open_frontier(side, p);
        }
        self.widen_if_closed();
    }

    fn close_frontier(&mut self, p: Point) {
        match self.side_of(p) {
            Some(Side::Low) => self.leads.low_open = false,
            Some(Side::High) => self.leads.high_open = false,
            None => {}
        }
        self.widen_if_closed();
    }

    fn widen_if_closed(&mut self) {
        if self.leads.low_open || self.leads.high_open {
            return;
        }
        let Some(axis) = self.leads.axis else { return };
        let (pr, pc) = perpendicular(axis);
        let mut queue = core::mem::take(&mut self.leads.widen);
        queue.clear();
        for q in &self.leads.tracked {
            queue.extend([q.offset(pr, pc), q.offset(-pr, -pc)]);
        }
        self.leads.track.clear();
        self.leads.widen = queue;
        self.set_state(TargetingState::Widen);
    }

    fn finish_track(&mut self, p: Point, ship: Option<ShipId>) {
        self.leads.tracked.push(p);
        let length = ship.and_then(|id| self.ship_lengths.get(id).copied());
        match length {
            Some(len) if self.leads.tracked.len() > len => self.enter_cleanup(p),
            _ => self.enter_hunt(),
        }
    }

    /// Seed around both ends of the line plus the cell that sank the ship.
    fn enter_cleanup(&mut self, last: Point) {
        let Some(axis) = self.leads.axis else {
            self.enter_hunt();
            return;
        };
        let (dr, dc) = axis.step();
        let (pr, pc) = perpendicular(axis);
        let mut queue = Vec::new();
        let lo = self.leads.tracked.iter().copied().min_by_key(|q| self.along(*q));
        let hi = self.leads.tracked.iter().copied().max_by_key(|q| self.along(*q));
        if let (Some(lo), Some(hi)) = (lo, hi) {
            queue.extend([lo.offset(pr, pc), lo.offset(-pr, -pc), lo.offset(-dr, -dc)]);
            queue.extend([hi.offset(pr, pc), hi.offset(-pr, -pc), hi.offset(dr, dc)]);
        }
        queue.extend([last.south(), last.north(), last.east(), last.west()]);
        self.leads.clear();
        self.leads.cleanup = queue;
        self.set_state(TargetingState::Cleanup);
    }
}

fn perpendicular(axis: Orientation) -> (i32, i32) {
    match axis {
        Orientation::Horizontal => Orientation::Vertical.step(),
        Orientation::Vertical => Orientation::Horizontal.step(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn machine(rows: usize, cols: usize, lengths: &[usize]) -> Targeting {
        let mut cfg = GameConfig::new(rows, cols).unwrap();
        for (i, len) in lengths.iter().enumerate() {
            cfg.add_ship(*len, (b'A' + i as u8) as char, "ship").unwrap();
        }
        Targeting::new(&cfg).unwrap()
    }

    #[test]
    fn parity_cell_matches_requested_parity() {
        let mut rng = SmallRng::seed_from_u64(7);
        for parity in 0..2 {
            for _ in 0..500 {
                if let Some(p) = parity_cell(&mut rng, 7, 9, parity) {
                    assert_eq!(((p.row + p.col) % 2) as usize, parity);
                    assert!(p.row < 7 && p.col < 9);
                }
            }
        }
    }

    #[test]
    fn parity_cell_single_column_has_gaps() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut seen_none = false;
        for _ in 0..100 {
            match parity_cell(&mut rng, 4, 1, 1) {
                Some(p) => assert_eq!(p.col, 0),
                None => seen_none = true,
            }
        }
        assert!(seen_none);
    }

    #[test]
    fn track_at_edge_closes_frontier_immediately() {
        let mut m = machine(10, 10, &[3]);
        m.record_attack_result(Point::new(0, 1), AttackOutcome::hit(0));
        assert_eq!(m.state(), TargetingState::Probe);
        m.record_attack_result(Point::new(0, 0), AttackOutcome::hit(0));
        assert_eq!(m.state(), TargetingState::Track);
        assert!(!m.leads.low_open);
        assert!(m.leads.high_open);
        assert_eq!(m.pending(), &[Point::new(0, 2)]);
    }

    #[test]
    fn both_frontiers_blocked_goes_straight_to_widen() {
        let mut m = machine(1, 2, &[2]);
        m.record_attack_result(Point::new(0, 0), AttackOutcome::hit(0));
        m.record_attack_result(Point::new(0, 1), AttackOutcome::hit(0));
        assert_eq!(m.state(), TargetingState::Widen);
        assert_eq!(m.tracked().len(), 2);
    }

    #[test]
    fn off_line_probe_hit_reanchors() {
        let mut m = machine(10, 10, &[3, 3]);
        m.record_attack_result(Point::new(5, 5), AttackOutcome::hit(0));
        m.record_attack_result(Point::new(2, 7), AttackOutcome::hit(1));
        assert_eq!(m.state(), TargetingState::Probe);
        assert_eq!(m.pending().last(), Some(&Point::new(1, 7)));
    }

    #[test]
    fn off_grid_results_are_logged_not_marked() {
        let mut m = machine(3, 3, &[2]);
        m.record_attack_result(Point::new(-1, 1), AttackOutcome::rejected());
        m.record_attack_result(Point::new(1, 3), AttackOutcome::rejected());
        assert_eq!(m.history().len(), 2);
        assert_eq!(m.state(), TargetingState::Hunt);
        assert_eq!((!m.attacked).iter_set_bits().count(), 9);
    }

    #[test]
    fn grid_coords_rejects_every_edge() {
        let cells = CellSet::try_new(2, 4).unwrap();
        assert_eq!(grid_coords(&cells, Point::new(1, 3)), Some((1, 3)));
        for p in [Point::new(-1, 0), Point::new(0, -1), Point::new(2, 0), Point::new(0, 4)] {
            assert_eq!(grid_coords(&cells, p), None);
        }
    }

    #[test]
    fn rejected_results_only_extend_history() {
        let mut m = machine(10, 10, &[2]);
        m.record_attack_result(Point::new(3, 3), AttackOutcome::rejected());
        assert_eq!(m.state(), TargetingState::Hunt);
        assert_eq!(m.history(), &[Point::new(3, 3)]);
        assert!(!m.is_valid_target(Point::new(3, 3)));
    }
}
