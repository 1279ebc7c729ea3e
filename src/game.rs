use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;

use log::{debug, info, warn};
use rand::rngs::SmallRng;

use crate::{
    board::Board,
    common::{AttackOutcome, BoardError, Point},
    config::{GameConfig, PLACEMENT_ATTEMPTS},
    player::Player,
    player_ai::{AwfulPlayer, GoodPlayer, MediocrePlayer},
};

/// Which strategy drives a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum, serde::Serialize))]
pub enum PlayerKind {
    Human,
    Awful,
    Mediocre,
    Good,
}

/// Errors that stop a match from being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The registry holds no ships.
    NoShips,
    /// Side `player` (0 or 1) could not lay out its fleet.
    PlacementFailed { player: usize },
    /// The requested player kind is not available in this build.
    UnsupportedPlayer(PlayerKind),
    Board(BoardError),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NoShips => write!(f, "No ships are registered"),
            GameError::PlacementFailed { player } => {
                write!(f, "Player {} could not place its ships", player + 1)
            }
            GameError::UnsupportedPlayer(kind) => {
                write!(f, "Player kind {:?} is not available", kind)
            }
            GameError::Board(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Build a player of `kind` for `config`.
pub fn create_player(
    kind: PlayerKind,
    name: &str,
    config: &GameConfig,
) -> Result<Box<dyn Player>, GameError> {
    let player: Box<dyn Player> = match kind {
        PlayerKind::Awful => Box::new(AwfulPlayer::new(name, config)),
        PlayerKind::Mediocre => Box::new(MediocrePlayer::new(name, config)?),
        PlayerKind::Good => Box::new(GoodPlayer::new(name, config)?),
        #[cfg(feature = "std")]
        PlayerKind::Human => Box::new(crate::player_cli::HumanPlayer::stdio(name, config)),
        #[cfg(not(feature = "std"))]
        PlayerKind::Human => return Err(GameError::UnsupportedPlayer(kind)),
    };
    Ok(player)
}

/// Hooks for rendering a match; every method defaults to doing nothing.
pub trait GameObserver {
    fn turn_started(&mut self, _attacker: &dyn Player, _target: &Board) {}

    /// `p` is `None` when the attacker had no move to offer.
    fn attack_resolved(
        &mut self,
        _attacker: &dyn Player,
        _p: Option<Point>,
        _outcome: AttackOutcome,
        _target: &Board,
    ) {
    }

    fn match_won(&mut self, _winner: &dyn Player, _loser: &dyn Player, _winner_board: &Board) {}
}

/// Observer that ignores every event.
pub struct SilentObserver;

impl GameObserver for SilentObserver {}

/// Per-side shot counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct SideStats {
    pub shots: usize,
    pub hits: usize,
    pub wasted: usize,
    pub ships_destroyed: usize,
}

/// Summary of a finished match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct MatchReport {
    /// Index of the winning side, 0 or 1.
    pub winner: usize,
    pub winner_name: String,
    /// Number of rounds started by the first player.
    pub turns: usize,
    pub sides: [SideStats; 2],
    /// True when the loser ran out of moves instead of losing its fleet.
    pub forfeit: bool,
}

/// A match between two players on boards laid out by one registry.
pub struct Game {
    config: GameConfig,
}

enum TurnEnd {
    Continue,
    FleetDestroyed,
    Forfeit,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Place both fleets, then alternate attacks until one fleet is gone.
    pub fn play(
        &self,
        p1: &mut dyn Player,
        p2: &mut dyn Player,
        rng: &mut SmallRng,
        observer: &mut dyn GameObserver,
    ) -> Result<MatchReport, GameError> {
        if self.config.ship_count() == 0 {
            return Err(GameError::NoShips);
        }
        let mut b1 = Board::new(&self.config);
        let mut b2 = Board::new(&self.config);
        if !place_side(p1, &mut b1, rng) {
            return Err(GameError::PlacementFailed { player: 0 });
        }
        if !place_side(p2, &mut b2, rng) {
            return Err(GameError::PlacementFailed { player: 1 });
        }
        info!("{} vs {}: fleets placed", p1.name(), p2.name());

        let mut sides = [SideStats::default(); 2];
        let mut turns = 0;
        let (winner, forfeit) = loop {
            turns += 1;
            match take_turn(p1, p2, &mut b2, rng, observer, &mut sides[0]) {
                TurnEnd::Continue => {}
                TurnEnd::FleetDestroyed => {
                    observer.match_won(&*p1, &*p2, &b1);
                    break (0, false);
                }
                TurnEnd::Forfeit => break (1, true),
            }
            match take_turn(p2, p1, &mut b1, rng, observer, &mut sides[1]) {
                TurnEnd::Continue => {}
                TurnEnd::FleetDestroyed => {
                    observer.match_won(&*p2, &*p1, &b2);
                    break (1, false);
                }
                TurnEnd::Forfeit => break (0, true),
            }
        };
        let winner_name = if winner == 0 { p1.name() } else { p2.name() }.to_string();
        info!("{} wins after {} turns", winner_name, turns);
        Ok(MatchReport {
            winner,
            winner_name,
            turns,
            sides,
            forfeit,
        })
    }
}

fn place_side(player: &mut dyn Player, board: &mut Board, rng: &mut SmallRng) -> bool {
    for attempt in 1..=PLACEMENT_ATTEMPTS {
        board.clear();
        match player.place_ships(rng, board) {
            Ok(()) => return true,
            Err(e) => debug!("{} placement attempt {} failed: {}", player.name(), attempt, e),
        }
    }
    board.clear();
    warn!("{} could not place its ships", player.name());
    false
}

fn take_turn(
    attacker: &mut dyn Player,
    defender: &mut dyn Player,
    target: &mut Board,
    rng: &mut SmallRng,
    observer: &mut dyn GameObserver,
    stats: &mut SideStats,
) -> TurnEnd {
    observer.turn_started(&*attacker, target);
    let Some(p) = attacker.recommend_attack(rng) else {
        warn!("{} has no move left and forfeits", attacker.name());
        observer.attack_resolved(&*attacker, None, AttackOutcome::rejected(), target);
        return TurnEnd::Forfeit;
    };
    let outcome = AttackOutcome::from(target.attack(p));
    stats.shots += 1;
    if !outcome.accepted {
        stats.wasted += 1;
        warn!("{} wasted a shot at {}", attacker.name(), p);
    } else if outcome.hit {
        stats.hits += 1;
        if outcome.destroyed {
            stats.ships_destroyed += 1;
        }
    }
    attacker.record_attack_result(p, outcome);
    defender.record_attack_by_opponent(p);
    observer.attack_resolved(&*attacker, Some(p), outcome, target);
    if target.all_destroyed() {
        TurnEnd::FleetDestroyed
    } else {
        TurnEnd::Continue
    }
}
