//! Resolving a single card against the player.
//!
//! This is the dispatch point for every card kind, and where the resource
//! economy lives: Caesuras earn Lux, Equipment fills slots, Snare and Blessing
//! toggle the Lux block, and the heal policy runs once the card is done.

use crate::cards::{Card, CardKind};
use crate::core::{Equipment, GameRng, LuxSpend, PlayerState, RulesProfile};
use crate::policy::DecisionPolicy;

use super::challenge::{resolve_pit, resolve_terror, PitReport, TerrorOutcome};
use super::combat::{resolve_combat, CombatReport};

/// Healing bought with one Lux.
pub const LUX_HEAL: u8 = 5;

/// What a card did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Item used; hp actually restored.
    Item { healed: u8 },
    /// Equipment went into a free slot.
    Equipped,
    /// Both slots full; the card was discarded.
    EquipmentDiscarded,
    /// A Beast or Hollow was fought.
    Combat(CombatReport),
    Pit(PitReport),
    Terror(TerrorOutcome),
    /// Snare is now active.
    Snared,
    /// hp restored and Snare cleared.
    Blessed { healed: u8 },
    /// Lux gained (false when already capped).
    Caesura { gained: bool },
}

/// Result of resolving one card, including the heals that followed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub effect: Effect,
    /// Lux heals bought after the card.
    pub lux_heals: u32,
    /// Player is still alive.
    pub survived: bool,
}

/// Resolve `card`, then let the policy heal with Lux while it wants to.
pub fn resolve_card<P: DecisionPolicy + ?Sized>(
    state: &mut PlayerState,
    card: &Card,
    profile: &RulesProfile,
    policy: &P,
    rng: &mut GameRng,
) -> Resolution {
    let effect = match card.kind {
        CardKind::Item { heal } => Effect::Item {
            healed: state.heal(heal),
        },
        CardKind::Equipment(_) => {
            let equipped = Equipment::from_card(card).is_some_and(|item| state.equip(item));
            if equipped {
                Effect::Equipped
            } else {
                Effect::EquipmentDiscarded
            }
        }
        CardKind::Beast { hp } | CardKind::Hollow { hp } => {
            Effect::Combat(resolve_combat(state, hp, policy, rng))
        }
        CardKind::Pit => Effect::Pit(resolve_pit(state, profile.pit_damage, policy, rng)),
        CardKind::Terror => Effect::Terror(resolve_terror(state, profile.terror_damage, policy)),
        CardKind::Snare => {
            state.snare_active = true;
            Effect::Snared
        }
        CardKind::Blessing { heal } => {
            let healed = state.heal(heal);
            state.snare_active = false;
            Effect::Blessed { healed }
        }
        CardKind::Caesura => Effect::Caesura {
            gained: state.gain_lux(),
        },
    };

    let survived = state.is_alive();
    let mut lux_heals = 0;

    if survived && profile.auto_heal {
        while policy.should_heal(state) && state.spend_lux(LuxSpend::Heal) {
            state.heal(LUX_HEAL);
            lux_heals += 1;
        }
    }

    state.debug_check();
    tracing::trace!(card = %card, hp = state.hp, lux = state.lux, survived, "card.resolved");

    Resolution {
        effect,
        lux_heals,
        survived,
    }
}
