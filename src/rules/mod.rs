//! Game rules: dice tables, combat, challenges, and card resolution.
//!
//! Engines take the player state by `&mut`, the policy and RNG explicitly,
//! and return a report value describing what happened.

pub mod challenge;
pub mod combat;
pub mod dice;
pub mod resolve;

pub use challenge::{resolve_pit, resolve_terror, PitReport, TerrorOutcome};
pub use combat::{resolve_combat, CombatReport};
pub use dice::{roll_opponent, roll_player, table, RollOutcome, MAX_ROUND_DAMAGE, PLAYER_DICE};
pub use resolve::{resolve_card, Effect, Resolution, LUX_HEAL};
