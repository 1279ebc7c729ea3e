use crate::{
    board::Board,
    common::{AttackOutcome, BoardError, Point},
};
use rand::rngs::SmallRng;

/// Interface implemented by different player types.
pub trait Player {
    /// Display name used in turn messages.
    fn name(&self) -> &str;

    /// Whether a person drives this player; controls what the console reveals.
    fn is_human(&self) -> bool {
        false
    }

    /// Place all ships onto the provided board.
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError>;

    /// Choose the next cell to attack, or `None` when the player has no move.
    fn recommend_attack(&mut self, rng: &mut SmallRng) -> Option<Point>;

    /// Inform the player of the result of its last attack.
    fn record_attack_result(&mut self, _p: Point, _outcome: AttackOutcome) {}

    /// Inform the player of an opponent attack against its board.
    fn record_attack_by_opponent(&mut self, _p: Point) {}
}
