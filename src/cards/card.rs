//! Card values.
//!
//! A `Card` is created once when its stage deck is built and is never
//! mutated afterwards. The per-kind numbers (toughness, healing, weapon tier)
//! live inside the [`CardKind`] variant that uses them, so every engine has to
//! match the kind exhaustively.

use serde::{Deserialize, Serialize};

/// What an Equipment card does once equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentKind {
    /// The Empty Prism: unlocks Lux-funded rerolls, heals, and peeks.
    Tool,
    /// A weapon that upgrades the player's dice table.
    Weapon {
        /// Dice-table upgrade level (1-3).
        tier: u8,
    },
}

/// The nine card kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Consumable that heals on resolution (inert when `heal` is 0).
    Item { heal: u8 },
    /// Goes into a free equipment slot.
    Equipment(EquipmentKind),
    /// Ordinary combat encounter.
    Beast { hp: u8 },
    /// The stage boss.
    Hollow { hp: u8 },
    /// Pay a Lux or take damage.
    Terror,
    /// Dice skill challenge.
    Pit,
    /// Blocks Lux spending until a Blessing.
    Snare,
    /// Heals and clears Snare.
    Blessing { heal: u8 },
    /// Grants a Lux.
    Caesura,
}

impl CardKind {
    /// Short display label ("Beast", "Pit", ...).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CardKind::Item { .. } => "Item",
            CardKind::Equipment(_) => "Equipment",
            CardKind::Beast { .. } => "Beast",
            CardKind::Hollow { .. } => "Hollow",
            CardKind::Terror => "Terror",
            CardKind::Pit => "Pit",
            CardKind::Snare => "Snare",
            CardKind::Blessing { .. } => "Blessing",
            CardKind::Caesura => "Caesura",
        }
    }
}

/// A single card in a stage deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Display name.
    pub name: String,

    /// Kind plus the kind-specific numbers.
    pub kind: CardKind,

    /// Difficulty tier the card was built for (1-3).
    pub tier: u8,

    /// Stage whose deck this card belongs to.
    pub stage: u8,
}

impl Card {
    /// Create a new card.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: CardKind, tier: u8, stage: u8) -> Self {
        Self {
            name: name.into(),
            kind,
            tier,
            stage,
        }
    }

    /// Encounter toughness for Beasts and Hollows.
    #[must_use]
    pub fn hp(&self) -> Option<u8> {
        match self.kind {
            CardKind::Beast { hp } | CardKind::Hollow { hp } => Some(hp),
            _ => None,
        }
    }

    /// Healing amount for Items and Blessings.
    #[must_use]
    pub fn heal(&self) -> Option<u8> {
        match self.kind {
            CardKind::Item { heal } | CardKind::Blessing { heal } => Some(heal),
            _ => None,
        }
    }

    /// Beast or Hollow.
    #[must_use]
    pub fn is_combat(&self) -> bool {
        matches!(self.kind, CardKind::Beast { .. } | CardKind::Hollow { .. })
    }

    /// The Empty Prism tool card.
    #[must_use]
    pub fn is_tool(&self) -> bool {
        matches!(self.kind, CardKind::Equipment(EquipmentKind::Tool))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.hp() {
            Some(hp) => write!(f, "{} [{} {}hp]", self.name, self.kind.label(), hp),
            None => write!(f, "{} [{}]", self.name, self.kind.label()),
        }
    }
}
