//! Card model: typed card values and stage decks.
//!
//! ## Key Types
//!
//! - `Card`: Immutable card value
//! - `CardKind`: Closed set of the nine card kinds with their numbers
//! - `EquipmentKind`: Tool or weapon
//! - `Deck`: Ordered draw pile with the two placement policies
//!
//! Cards are built once per stage and moved, never mutated: from the deck,
//! into a lineup, and finally onto the resolved pile.

pub mod card;
pub mod deck;

pub use card::{Card, CardKind, EquipmentKind};
pub use deck::{stage_cards, Deck, Placement, BASE_DECK_SIZE};
