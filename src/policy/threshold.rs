//! Fixed-threshold heuristics.
//!
//! These constants are part of the game's balance data. Changing any of them
//! changes every reported number.

use crate::cards::{Card, CardKind};
use crate::core::{PlayerState, LUX_CAP};

use super::DecisionPolicy;

/// Heal while hp is below this.
pub const HEAL_BELOW_HP: u8 = 12;

/// Peeking needs at least this much Lux.
pub const PEEK_MIN_LUX: u8 = 2;

/// Peek while hp is in this band.
pub const PEEK_DANGER_BAND: std::ops::RangeInclusive<u8> = 8..=14;

/// With full Lux, also peek while hp is above this.
pub const PEEK_FULL_LUX_ABOVE_HP: u8 = 10;

/// Shuffle-back is only considered at or below this hp.
pub const SHUFFLE_BACK_AT_OR_BELOW_HP: u8 = 10;

/// A fight is dangerous when the enemy's hp reaches within this of ours.
pub const COMBAT_DANGER_MARGIN: i16 = 3;

/// Pit failures are rerolled when they leave us at or below this hp.
pub const PIT_DANGER_HP: u8 = 5;

/// Terror is paid with Lux while hp is below this.
pub const TERROR_SAFE_HP: u8 = 12;

/// The tuned heuristic player.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThresholdPolicy;

impl ThresholdPolicy {
    /// Lux may be spent and the tool unlocks it.
    fn tool_lux_available(state: &PlayerState) -> bool {
        state.has_tool() && state.can_spend_lux()
    }
}

impl DecisionPolicy for ThresholdPolicy {
    fn should_heal(&self, state: &PlayerState) -> bool {
        Self::tool_lux_available(state) && state.hp < HEAL_BELOW_HP
    }

    fn should_peek(&self, state: &PlayerState) -> bool {
        if !Self::tool_lux_available(state) || state.lux < PEEK_MIN_LUX {
            return false;
        }

        PEEK_DANGER_BAND.contains(&state.hp)
            || (state.lux == LUX_CAP && state.hp > PEEK_FULL_LUX_ABOVE_HP)
    }

    fn should_shuffle_back(&self, state: &PlayerState, card: &Card) -> bool {
        if state.hp > SHUFFLE_BACK_AT_OR_BELOW_HP {
            return false;
        }

        match card.kind {
            CardKind::Beast { hp } | CardKind::Hollow { hp } => {
                i16::from(hp) >= i16::from(state.hp) - COMBAT_DANGER_MARGIN
            }
            CardKind::Terror | CardKind::Pit => true,
            CardKind::Item { .. }
            | CardKind::Equipment(_)
            | CardKind::Snare
            | CardKind::Blessing { .. }
            | CardKind::Caesura => false,
        }
    }

    fn should_reroll_combat(&self, state: &PlayerState, incoming: u8) -> bool {
        incoming >= state.hp && Self::tool_lux_available(state)
    }

    fn should_reroll_pit(&self, state: &PlayerState, damage: u8) -> bool {
        state.hp.saturating_sub(damage) <= PIT_DANGER_HP && Self::tool_lux_available(state)
    }

    fn should_avoid_terror(&self, state: &PlayerState) -> bool {
        state.can_spend_lux() && state.hp < TERROR_SAFE_HP
    }
}
