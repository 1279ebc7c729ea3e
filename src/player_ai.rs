use alloc::string::String;
use alloc::vec::Vec;

use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::{
    ai::{Targeting, TargetingState},
    bitboard::CellSet,
    board::Board,
    common::{AttackOutcome, BoardError, Point},
    config::GameConfig,
    placement,
    ship::Orientation,
};

use crate::player::Player;

/// Stacks every ship against the left edge and sweeps the grid backwards.
pub struct AwfulPlayer {
    name: String,
    config: GameConfig,
    last: Point,
}

impl AwfulPlayer {
    pub fn new(name: impl Into<String>, config: &GameConfig) -> Self {
        Self {
            name: name.into(),
            config: config.clone(),
            last: Point::new(0, 0),
        }
    }
}

impl Player for AwfulPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn place_ships(&mut self, _rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        for k in 0..self.config.ship_count() {
            board.place_ship(Point::new(k as i32, 0), k, Orientation::Horizontal)?;
        }
        Ok(())
    }

    fn recommend_attack(&mut self, _rng: &mut SmallRng) -> Option<Point> {
        let (rows, cols) = (self.config.rows() as i32, self.config.cols() as i32);
        if self.last.col > 0 {
            self.last.col -= 1;
        } else {
            self.last.col = cols - 1;
            self.last.row = if self.last.row > 0 { self.last.row - 1 } else { rows - 1 };
        }
        Some(self.last)
    }
}

/// Reach of the mediocre player's cross around its anchor hit.
const CROSS_REACH: i32 = 4;

/// Random hunting, then random shots along the row and column of the last lead.
pub struct MediocrePlayer {
    name: String,
    config: GameConfig,
    attacked: CellSet,
    anchor: Option<Point>,
}

impl MediocrePlayer {
    pub fn new(name: impl Into<String>, config: &GameConfig) -> Result<Self, BoardError> {
        Ok(Self {
            name: name.into(),
            config: config.clone(),
            attacked: CellSet::try_new(config.rows(), config.cols())?,
            anchor: None,
        })
    }

    fn is_open(&self, p: Point) -> bool {
        self.config.is_valid(p) && !self.attacked.get(p.row as usize, p.col as usize).unwrap_or(true)
    }

    /// Untried cells within `CROSS_REACH` of `anchor` along its row and column.
    fn cross(&self, anchor: Point) -> Vec<Point> {
        (1..=CROSS_REACH)
            .flat_map(|k| {
                [
                    anchor.offset(-k, 0),
                    anchor.offset(k, 0),
                    anchor.offset(0, -k),
                    anchor.offset(0, k),
                ]
            })
            .filter(|p| self.is_open(*p))
            .collect()
    }

    fn random_open(&self, rng: &mut SmallRng) -> Option<Point> {
        let open: Vec<Point> = (!self.attacked)
            .iter_set_bits()
            .map(|(r, c)| Point::new(r as i32, c as i32))
            .collect();
        if open.is_empty() {
            None
        } else {
            Some(open[rng.random_range(0..open.len())])
        }
    }
}

impl Player for MediocrePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        placement::place_fleet(rng, board)
    }

    fn recommend_attack(&mut self, rng: &mut SmallRng) -> Option<Point> {
        if let Some(anchor) = self.anchor {
            let cross = self.cross(anchor);
            if !cross.is_empty() {
                return Some(cross[rng.random_range(0..cross.len())]);
            }
            self.anchor = None;
        }
        self.random_open(rng)
    }

    fn record_attack_result(&mut self, p: Point, outcome: AttackOutcome) {
        if !self.config.is_valid(p) || self.attacked.set(p.row as usize, p.col as usize).is_err() {
            debug!("{} recorded a shot off the grid at {}", self.name, p);
        }
        if outcome.destroyed {
            self.anchor = None;
        } else if outcome.hit && self.anchor.is_none() {
            self.anchor = Some(p);
        }
    }
}

/// Backtracking placement and the five-state targeting machine.
pub struct GoodPlayer {
    name: String,
    targeting: Targeting,
}

impl GoodPlayer {
    pub fn new(name: impl Into<String>, config: &GameConfig) -> Result<Self, BoardError> {
        Ok(Self {
            name: name.into(),
            targeting: Targeting::new(config)?,
        })
    }

    pub fn targeting_state(&self) -> TargetingState {
        self.targeting.state()
    }
}

impl Player for GoodPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        placement::place_fleet(rng, board)
    }

    fn recommend_attack(&mut self, rng: &mut SmallRng) -> Option<Point> {
        self.targeting.next_target(rng)
    }

    fn record_attack_result(&mut self, p: Point, outcome: AttackOutcome) {
        self.targeting.record_attack_result(p, outcome);
    }
}
