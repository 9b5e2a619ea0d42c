//! Play decisions.
//!
//! Policies are trait-based so alternative play styles can be compared
//! against the same rules:
//! - `DecisionPolicy`: every choice the player makes about Lux and danger
//! - `ThresholdPolicy`: the fixed heuristics the balance numbers are tuned on
//!
//! Policies only read state. Engines perform the spend when a policy says yes.

mod threshold;

pub use threshold::ThresholdPolicy;

use crate::cards::Card;
use crate::core::PlayerState;

/// The player's resource and danger decisions.
pub trait DecisionPolicy: Send + Sync {
    /// Spend a Lux to heal now?
    fn should_heal(&self, state: &PlayerState) -> bool;

    /// Spend a Lux to peek at the lineup? (single-stage only)
    fn should_peek(&self, state: &PlayerState) -> bool;

    /// Shuffle this peeked card back into the deck?
    fn should_shuffle_back(&self, state: &PlayerState, card: &Card) -> bool;

    /// Spend a Lux to negate a combat round that deals `incoming` damage?
    fn should_reroll_combat(&self, state: &PlayerState, incoming: u8) -> bool;

    /// Spend a Lux to undo a failed Pit roll that deals `damage`?
    fn should_reroll_pit(&self, state: &PlayerState, damage: u8) -> bool;

    /// Pay a Lux instead of taking Terror damage?
    fn should_avoid_terror(&self, state: &PlayerState) -> bool;
}
