//! Player state and the Lux economy.
//!
//! `PlayerState` is owned by exactly one trial and passed by `&mut` into each
//! engine call. Every mutation goes through a method that keeps the
//! invariants:
//!
//! - `hp` stays within `0..=max_hp`
//! - `lux` stays within `0..=LUX_CAP`
//! - at most `EQUIPMENT_SLOTS` pieces of equipment
//! - no Lux is spent while a Snare is active

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::{EQUIPMENT_SLOTS, LUX_CAP, MAX_HP};
use crate::cards::{Card, CardKind, EquipmentKind};

/// An equipped item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    /// Name of the card it came from.
    pub name: String,
    /// What it does.
    pub kind: EquipmentKind,
}

impl Equipment {
    /// The Empty Prism the campaign starts with.
    #[must_use]
    pub fn starting_prism() -> Self {
        Self {
            name: "Empty Prism (Starting)".to_string(),
            kind: EquipmentKind::Tool,
        }
    }

    /// Equipment granted by an Equipment card, if it is one.
    #[must_use]
    pub fn from_card(card: &Card) -> Option<Self> {
        match card.kind {
            CardKind::Equipment(kind) => Some(Self {
                name: card.name.clone(),
                kind,
            }),
            _ => None,
        }
    }
}

/// What a Lux was spent on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LuxSpend {
    /// Negated a lethal combat round.
    CombatReroll,
    /// Undid a failed Pit roll.
    PitReroll,
    /// Paid off a Terror.
    Terror,
    /// Healed 5 hp.
    Heal,
    /// Peeked at the lineup.
    Peek,
}

/// Lux spent during one trial, by purpose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuxLedger {
    pub combat_reroll: u32,
    pub pit_reroll: u32,
    pub terror: u32,
    pub heal: u32,
    pub peek: u32,
}

impl LuxLedger {
    /// Record one spend.
    pub fn record(&mut self, purpose: LuxSpend) {
        match purpose {
            LuxSpend::CombatReroll => self.combat_reroll += 1,
            LuxSpend::PitReroll => self.pit_reroll += 1,
            LuxSpend::Terror => self.terror += 1,
            LuxSpend::Heal => self.heal += 1,
            LuxSpend::Peek => self.peek += 1,
        }
    }

    /// Total Lux spent.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.combat_reroll + self.pit_reroll + self.terror + self.heal + self.peek
    }

    /// Spending recorded after `earlier` was taken from the same ledger.
    #[must_use]
    pub fn since(&self, earlier: &Self) -> Self {
        Self {
            combat_reroll: self.combat_reroll.saturating_sub(earlier.combat_reroll),
            pit_reroll: self.pit_reroll.saturating_sub(earlier.pit_reroll),
            terror: self.terror.saturating_sub(earlier.terror),
            heal: self.heal.saturating_sub(earlier.heal),
            peek: self.peek.saturating_sub(earlier.peek),
        }
    }

    /// Add another ledger's counts to this one.
    pub fn absorb(&mut self, other: &Self) {
        self.combat_reroll += other.combat_reroll;
        self.pit_reroll += other.pit_reroll;
        self.terror += other.terror;
        self.heal += other.heal;
        self.peek += other.peek;
    }
}

/// Mutable state of the player for one trial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current health (0 = dead).
    pub hp: u8,

    /// Health cap.
    pub max_hp: u8,

    /// Current Lux (0..=3).
    pub lux: u8,

    /// Equipped items, in the order they were equipped.
    pub equipment: SmallVec<[Equipment; EQUIPMENT_SLOTS]>,

    /// A Snare is blocking Lux.
    pub snare_active: bool,

    /// Stage being played (1-based).
    pub current_stage: u8,

    /// Lux spent so far.
    pub ledger: LuxLedger,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    /// Fresh player: full health, no Lux, empty hands.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hp: MAX_HP,
            max_hp: MAX_HP,
            lux: 0,
            equipment: SmallVec::new(),
            snare_active: false,
            current_stage: 1,
            ledger: LuxLedger::default(),
        }
    }

    /// Fresh player already holding the Empty Prism.
    #[must_use]
    pub fn with_starting_prism() -> Self {
        let mut state = Self::new();
        state.equipment.push(Equipment::starting_prism());
        state
    }

    /// Still standing.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Holds the Lux-enabling tool.
    #[must_use]
    pub fn has_tool(&self) -> bool {
        self.equipment.iter().any(|e| e.kind == EquipmentKind::Tool)
    }

    /// Tier of the first weapon held, or 0 without one.
    #[must_use]
    pub fn weapon_tier(&self) -> u8 {
        self.equipment
            .iter()
            .find_map(|e| match e.kind {
                EquipmentKind::Weapon { tier } => Some(tier),
                EquipmentKind::Tool => None,
            })
            .unwrap_or(0)
    }

    /// Lose up to `amount` hp. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: u8) -> u8 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Gain up to `amount` hp, capped at `max_hp`. Returns the hp gained.
    pub fn heal(&mut self, amount: u8) -> u8 {
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Restore to `max_hp`.
    pub fn full_heal(&mut self) {
        self.hp = self.max_hp;
    }

    /// Gain one Lux unless already at the cap. Returns whether Lux went up.
    pub fn gain_lux(&mut self) -> bool {
        if self.lux < LUX_CAP {
            self.lux += 1;
            true
        } else {
            false
        }
    }

    /// Has Lux and isn't snared.
    #[must_use]
    pub fn can_spend_lux(&self) -> bool {
        self.lux > 0 && !self.snare_active
    }

    /// Spend one Lux on `purpose`.
    ///
    /// Refuses (returns `false`) while snared or with no Lux.
    pub fn spend_lux(&mut self, purpose: LuxSpend) -> bool {
        if !self.can_spend_lux() {
            return false;
        }
        self.lux -= 1;
        self.ledger.record(purpose);
        tracing::trace!(?purpose, lux = self.lux, hp = self.hp, "lux.spent");
        true
    }

    /// Equip into a free slot. Returns `false` (and drops the item) when both
    /// slots are full.
    pub fn equip(&mut self, item: Equipment) -> bool {
        if self.equipment.len() < EQUIPMENT_SLOTS {
            self.equipment.push(item);
            true
        } else {
            false
        }
    }

    /// Check every state invariant (debug builds only).
    pub fn debug_check(&self) {
        debug_assert!(self.hp <= self.max_hp, "hp {} above max {}", self.hp, self.max_hp);
        debug_assert!(self.lux <= LUX_CAP, "lux {} above cap", self.lux);
        debug_assert!(
            self.equipment.len() <= EQUIPMENT_SLOTS,
            "{} pieces of equipment",
            self.equipment.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon(tier: u8) -> Equipment {
        Equipment {
            name: format!("Weapon {tier}"),
            kind: EquipmentKind::Weapon { tier },
        }
    }

    #[test]
    fn test_ledger_since_and_absorb() {
        let mut ledger = LuxLedger::default();
        ledger.record(LuxSpend::Heal);
        let checkpoint = ledger;

        ledger.record(LuxSpend::Heal);
        ledger.record(LuxSpend::Terror);
        let delta = ledger.since(&checkpoint);
        assert_eq!(delta.heal, 1);
        assert_eq!(delta.terror, 1);
        assert_eq!(delta.total(), 2);

        let mut rebuilt = checkpoint;
        rebuilt.absorb(&delta);
        assert_eq!(rebuilt, ledger);
    }

    #[test]
    fn test_new_player() {
        let state = PlayerState::new();
        assert_eq!(state.hp, 20);
        assert_eq!(state.max_hp, 20);
        assert_eq!(state.lux, 0);
        assert!(!state.has_tool());
        assert_eq!(state.weapon_tier(), 0);

        let campaign = PlayerState::with_starting_prism();
        assert!(campaign.has_tool());
        assert_eq!(campaign.equipment.len(), 1);
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut state = PlayerState::new();

        assert_eq!(state.take_damage(5), 5);
        assert_eq!(state.hp, 15);

        assert_eq!(state.heal(10), 5);
        assert_eq!(state.hp, 20);

        assert_eq!(state.take_damage(30), 20);
        assert_eq!(state.hp, 0);
        assert!(!state.is_alive());
    }

    #[test]
    fn test_lux_cap() {
        let mut state = PlayerState::new();
        assert!(state.gain_lux());
        assert!(state.gain_lux());
        assert!(state.gain_lux());
        assert!(!state.gain_lux());
        assert_eq!(state.lux, 3);
    }

    #[test]
    fn test_snare_blocks_spending() {
        let mut state = PlayerState::new();
        state.gain_lux();
        state.snare_active = true;

        assert!(!state.spend_lux(LuxSpend::Heal));
        assert_eq!(state.lux, 1);
        assert_eq!(state.ledger.total(), 0);

        state.snare_active = false;
        assert!(state.spend_lux(LuxSpend::Heal));
        assert_eq!(state.lux, 0);
        assert_eq!(state.ledger.heal, 1);

        assert!(!state.spend_lux(LuxSpend::Peek));
    }

    #[test]
    fn test_equipment_slots() {
        let mut state = PlayerState::with_starting_prism();
        assert!(state.equip(weapon(2)));
        assert!(!state.equip(weapon(3)));

        assert_eq!(state.equipment.len(), 2);
        assert_eq!(state.weapon_tier(), 2);
    }

    #[test]
    fn test_first_weapon_sets_tier() {
        let mut state = PlayerState::new();
        state.equip(weapon(1));
        state.equip(weapon(3));
        assert_eq!(state.weapon_tier(), 1);
    }

    #[test]
    fn test_ledger_total() {
        let mut ledger = LuxLedger::default();
        ledger.record(LuxSpend::CombatReroll);
        ledger.record(LuxSpend::Terror);
        ledger.record(LuxSpend::Peek);
        ledger.record(LuxSpend::Peek);

        assert_eq!(ledger.peek, 2);
        assert_eq!(ledger.total(), 4);
    }
}
