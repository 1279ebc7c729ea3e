//! Commonly used types and utilities for ease of import.

pub use crate::{
    create_player, AttackOutcome, Board, Game, GameConfig, GameObserver, MatchReport,
    Orientation, Player, PlayerKind, Point, Targeting, TargetingState,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, ConsoleObserver, HumanPlayer};
