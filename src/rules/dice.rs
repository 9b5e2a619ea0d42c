//! d6 roll tables shared by the player and the opponent.
//!
//! | Face | Base result          | Weapon upgrade             |
//! |------|----------------------|----------------------------|
//! | 1    | miss                 | tier 1+: hit 1             |
//! | 2    | block                | tier 2+: hit 1             |
//! | 3-4  | hit 1                | tier 3+: hit 2             |
//! | 5    | hit 2                |                            |
//! | 6    | counter (block + 1)  |                            |
//!
//! The opponent rolls one die on the base table. The player rolls three,
//! keeps the highest, and reads it through their weapon tier.

use crate::core::GameRng;

/// Dice the player rolls each combat round.
pub const PLAYER_DICE: usize = 3;

/// Most damage either side can deal in one round.
pub const MAX_ROUND_DAMAGE: u8 = 2;

/// Result of one side's roll for a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RollOutcome {
    /// Damage dealt to the other side, before blocks.
    pub damage: u8,
    /// Blocks the other side's damage this round.
    pub block: bool,
    /// Counter: blocks and deals damage.
    pub counter: bool,
}

impl RollOutcome {
    const MISS: Self = Self::new(0, false, false);
    const BLOCK: Self = Self::new(0, true, false);
    const HIT: Self = Self::new(1, false, false);
    const HIT_TWO: Self = Self::new(2, false, false);
    const COUNTER: Self = Self::new(1, true, true);

    const fn new(damage: u8, block: bool, counter: bool) -> Self {
        Self { damage, block, counter }
    }

    /// Stops the other side's damage (block or counter).
    #[must_use]
    pub fn negates_incoming(&self) -> bool {
        self.block || self.counter
    }
}

/// Read a face through the table for `weapon_tier` (0 = base table).
#[must_use]
pub fn table(face: u8, weapon_tier: u8) -> RollOutcome {
    match face {
        1 if weapon_tier >= 1 => RollOutcome::HIT,
        1 => RollOutcome::MISS,
        2 if weapon_tier >= 2 => RollOutcome::HIT,
        2 => RollOutcome::BLOCK,
        3 | 4 if weapon_tier >= 3 => RollOutcome::HIT_TWO,
        3 | 4 => RollOutcome::HIT,
        5 => RollOutcome::HIT_TWO,
        6 => RollOutcome::COUNTER,
        _ => unreachable!("d6 face out of range: {face}"),
    }
}

/// The opponent's roll: one die, base table.
pub fn roll_opponent(rng: &mut GameRng) -> RollOutcome {
    table(rng.roll_d6(), 0)
}

/// The player's roll: best of three dice, read through the weapon tier.
pub fn roll_player(rng: &mut GameRng, weapon_tier: u8) -> RollOutcome {
    let best = (0..PLAYER_DICE).map(|_| rng.roll_d6()).max().unwrap_or(1);
    table(best, weapon_tier)
}
