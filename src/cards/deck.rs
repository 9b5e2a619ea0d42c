//! Stage decks and placement rules.
//!
//! Every stage deck has the same composition: 2 Items, 1-2 Equipment,
//! 5 Beasts, 1 Hollow, 1 Terror, 3 Pits, 1 Snare, 1 Blessing, 3 Caesuras.
//! The numbers on the cards come from the stage's [`TierTable`].
//!
//! Two placement policies follow the shuffle:
//!
//! - [`Placement::PinTool`]: the Empty Prism is guaranteed to be the first card
//!   drawn (single-stage playtest).
//! - [`Placement::BossInLastThree`]: the Hollow sits uniformly in one of the
//!   last three positions (campaign).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, TierTable};

use super::card::{Card, CardKind, EquipmentKind};

/// Cards in a stage deck that carries only the weapon.
pub const BASE_DECK_SIZE: usize = 18;

/// Named Location 1 roster, in deck-building order.
mod location_one {
    pub const ITEMS: [&str; 2] = ["Old Boot", "Older Boot"];
    pub const TOOL: &str = "Empty Prism";
    pub const BEASTS: [&str; 5] = [
        "Ravenous Boar",
        "Mangy Wolf",
        "Feral Dog Pack",
        "Territorial Stag",
        "Carrion Crow Flock",
    ];
    pub const HOLLOW: &str = "Magistrate's Lackeys";
    pub const TERROR: &str = "Parents Slain";
    pub const PITS: [&str; 3] = ["Trapped Corridor", "Treacherous Ravine", "Escape Through Flames"];
    pub const SNARE: &str = "Overwhelming Dread";
    pub const BLESSING: &str = "A Moment of Grace";
    pub const CAESURAS: [&str; 3] = ["Cold Hearth Shadows", "Moon on the Well", "Orchard at Dusk"];
}

/// Post-shuffle placement rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Shuffle the rest, then put the tool on top.
    PinTool,
    /// Shuffle the rest, then insert the Hollow among the last three slots.
    BossInLastThree,
}

/// An ordered draw pile. The front is the top of the deck.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Create a deck with the given top-to-bottom order.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards: cards.into() }
    }

    /// Build, shuffle, and place a stage deck.
    #[must_use]
    pub fn build(stage: u8, table: &TierTable, placement: Placement, rng: &mut GameRng) -> Self {
        let mut cards = stage_cards(stage, table);

        match placement {
            Placement::PinTool => {
                let tool = take_first(&mut cards, Card::is_tool);
                rng.shuffle(&mut cards);
                if let Some(tool) = tool {
                    cards.insert(0, tool);
                }
            }
            Placement::BossInLastThree => {
                let hollow = take_first(&mut cards, |c| matches!(c.kind, CardKind::Hollow { .. }));
                rng.shuffle(&mut cards);
                if let Some(hollow) = hollow {
                    let offset = rng.gen_range_usize(0..3).min(cards.len());
                    cards.insert(cards.len() - offset, hollow);
                }
            }
        }

        Self::new(cards)
    }

    /// Number of cards left to draw.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// No cards left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw the top card. An empty deck yields `None`.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Draw up to `count` cards from the top.
    pub fn draw_up_to(&mut self, count: usize) -> Vec<Card> {
        let count = count.min(self.cards.len());
        self.cards.drain(..count).collect()
    }

    /// Put cards on the bottom, in order.
    pub fn put_bottom(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Uniformly reshuffle the remaining cards.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(self.cards.make_contiguous());
    }

    /// Iterate top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Position of the first card matching `pred`, counted from the top.
    #[must_use]
    pub fn position(&self, pred: impl Fn(&Card) -> bool) -> Option<usize> {
        self.cards.iter().position(pred)
    }
}

fn take_first(cards: &mut Vec<Card>, pred: impl Fn(&Card) -> bool) -> Option<Card> {
    cards.iter().position(pred).map(|i| cards.remove(i))
}

/// The unshuffled composition of a stage deck.
#[must_use]
pub fn stage_cards(stage: u8, table: &TierTable) -> Vec<Card> {
    let tier = table.tier;
    let named = table.includes_tool;
    let card = |name: String, kind: CardKind| Card::new(name, kind, tier, stage);
    let label = |fallback: String, roster: &str| {
        if named {
            roster.to_string()
        } else {
            format!("{} (L{})", fallback, stage)
        }
    };

    let mut cards = Vec::with_capacity(BASE_DECK_SIZE + 1);

    for (i, name) in location_one::ITEMS.iter().enumerate() {
        let fallback = format!("Item {}", (b'A' + i as u8) as char);
        cards.push(card(label(fallback, name), CardKind::Item { heal: table.item_heal }));
    }

    if table.includes_tool {
        cards.push(card(
            location_one::TOOL.to_string(),
            CardKind::Equipment(EquipmentKind::Tool),
        ));
    }
    cards.push(card(
        label(table.weapon_name.to_string(), table.weapon_name),
        CardKind::Equipment(EquipmentKind::Weapon { tier: table.weapon_tier }),
    ));

    for (i, (&hp, name)) in table.beast_hp.iter().zip(location_one::BEASTS).enumerate() {
        cards.push(card(label(format!("Beast {}", i + 1), name), CardKind::Beast { hp }));
    }

    cards.push(card(
        label("Hollow".to_string(), location_one::HOLLOW),
        CardKind::Hollow { hp: table.hollow_hp },
    ));
    cards.push(card(label("Terror".to_string(), location_one::TERROR), CardKind::Terror));

    for (i, name) in location_one::PITS.iter().enumerate() {
        cards.push(card(label(format!("Pit {}", i + 1), name), CardKind::Pit));
    }

    cards.push(card(label("Snare".to_string(), location_one::SNARE), CardKind::Snare));
    cards.push(card(
        label("Blessing".to_string(), location_one::BLESSING),
        CardKind::Blessing { heal: table.blessing_heal },
    ));

    for (i, name) in location_one::CAESURAS.iter().enumerate() {
        cards.push(card(label(format!("Caesura {}", i + 1), name), CardKind::Caesura));
    }

    cards
}
