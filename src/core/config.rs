//! Rules profiles and difficulty tables.
//!
//! All numeric balance constants live here. The single-stage playtest and the
//! nine-stage campaign drifted apart in their Pit/Terror damage and deck
//! contents, so each gets an explicit [`RulesProfile`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Starting and maximum player health.
pub const MAX_HP: u8 = 20;

/// Lux can never exceed this.
pub const LUX_CAP: u8 = 3;

/// Equipment slots available to the player.
pub const EQUIPMENT_SLOTS: usize = 2;

/// Number of stages in a full campaign.
pub const CAMPAIGN_STAGES: u8 = 9;

/// Cards drawn into the single-stage lineup.
pub const LINEUP_SIZE: usize = 3;

/// Successes (or failures) that end a Pit.
pub const PIT_TARGET: u8 = 3;

/// A Pit roll at or above this succeeds.
pub const PIT_SUCCESS_ROLL: u8 = 3;

/// Which run shape a profile drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// One location played through a three-card lineup with peeking.
    SingleStage,
    /// Nine locations drawn one card at a time.
    Campaign,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::SingleStage => write!(f, "single-stage"),
            Mode::Campaign => write!(f, "campaign"),
        }
    }
}

/// Per-mode rule constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesProfile {
    /// Run shape.
    pub mode: Mode,

    /// Damage dealt by each failed Pit roll.
    pub pit_damage: u8,

    /// Damage taken when a Terror isn't paid off with Lux.
    pub terror_damage: u8,

    /// Run the Lux heal policy after every card resolution.
    pub auto_heal: bool,
}

impl RulesProfile {
    /// The Location 1 playtest rules.
    #[must_use]
    pub fn single_stage() -> Self {
        Self {
            mode: Mode::SingleStage,
            pit_damage: 2,
            terror_damage: 5,
            auto_heal: true,
        }
    }

    /// The full nine-location campaign rules.
    #[must_use]
    pub fn campaign() -> Self {
        Self {
            mode: Mode::Campaign,
            pit_damage: 1,
            terror_damage: 4,
            auto_heal: true,
        }
    }

    /// Default profile for a mode.
    #[must_use]
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::SingleStage => Self::single_stage(),
            Mode::Campaign => Self::campaign(),
        }
    }

    /// Enable or disable Lux healing between cards.
    #[must_use]
    pub fn with_auto_heal(mut self, auto_heal: bool) -> Self {
        self.auto_heal = auto_heal;
        self
    }

    /// Deck table used for `stage` under this profile.
    #[must_use]
    pub fn tier_table(&self, stage: u8) -> TierTable {
        match self.mode {
            Mode::SingleStage => TierTable::location_one(),
            Mode::Campaign => TierTable::for_stage(stage),
        }
    }

    /// Like [`tier_table`](Self::tier_table), rejecting stages outside 1-9.
    pub fn checked_tier_table(&self, stage: u8) -> Result<TierTable> {
        if !(1..=CAMPAIGN_STAGES).contains(&stage) {
            return Err(SimError::InvalidStage(stage));
        }
        Ok(self.tier_table(stage))
    }
}

impl Default for RulesProfile {
    fn default() -> Self {
        Self::single_stage()
    }
}

/// Difficulty tier for a stage: 1-3 map to 1, 4-6 to 2, 7-9 to 3.
///
/// Stages past 9 stay at tier 3.
#[must_use]
pub fn tier_for_stage(stage: u8) -> u8 {
    debug_assert!(stage >= 1, "stages are numbered from 1");
    ((stage.saturating_sub(1) / 3) + 1).min(3)
}

/// Numeric deck parameters for one stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierTable {
    /// Difficulty tier (1-3).
    pub tier: u8,

    /// Toughness of the five Beasts, weakest first.
    pub beast_hp: [u8; 5],

    /// Toughness of the stage boss.
    pub hollow_hp: u8,

    /// Healing from each Item card.
    pub item_heal: u8,

    /// Healing from the Blessing card.
    pub blessing_heal: u8,

    /// Tier of the stage's weapon card.
    pub weapon_tier: u8,

    /// Name of the stage's weapon card.
    pub weapon_name: &'static str,

    /// The deck also carries the Empty Prism tool.
    pub includes_tool: bool,
}

impl TierTable {
    /// Campaign table for `stage`.
    #[must_use]
    pub fn for_stage(stage: u8) -> Self {
        let tier = tier_for_stage(stage);
        let (beast_hp, hollow_hp) = match tier {
            1 => ([2, 2, 2, 4, 4], 6),
            2 => ([4, 4, 4, 6, 6], 8),
            _ => ([6, 6, 6, 8, 8], 9),
        };
        let idx = usize::from(tier - 1);

        Self {
            tier,
            beast_hp,
            hollow_hp,
            item_heal: [3, 5, 8][idx],
            blessing_heal: 10 + (tier - 1) * 2,
            weapon_tier: tier,
            weapon_name: ["Gnarled Branch", "Sturdy Blade", "Masterwork Blade"][idx],
            includes_tool: false,
        }
    }

    /// The Location 1 playtest table: tougher beasts, inert items, and both
    /// Equipment cards shuffled into the deck.
    #[must_use]
    pub fn location_one() -> Self {
        Self {
            tier: 1,
            beast_hp: [3, 3, 3, 5, 5],
            hollow_hp: 7,
            item_heal: 0,
            blessing_heal: 10,
            weapon_tier: 1,
            weapon_name: "Gnarled Branch",
            includes_tool: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_tier_table_bounds() {
        let profile = RulesProfile::campaign();
        assert!(matches!(profile.checked_tier_table(0), Err(SimError::InvalidStage(0))));
        assert!(matches!(profile.checked_tier_table(10), Err(SimError::InvalidStage(10))));
        assert_eq!(profile.checked_tier_table(9).unwrap().tier, 3);
    }

    #[test]
    fn test_tier_for_stage() {
        let tiers: Vec<_> = (1..=9).map(tier_for_stage).collect();
        assert_eq!(tiers, vec![1, 1, 1, 2, 2, 2, 3, 3, 3]);
        assert_eq!(tier_for_stage(12), 3);
    }

    #[test]
    fn test_campaign_tables() {
        let t1 = TierTable::for_stage(2);
        assert_eq!(t1.beast_hp, [2, 2, 2, 4, 4]);
        assert_eq!(t1.hollow_hp, 6);
        assert_eq!(t1.item_heal, 3);
        assert_eq!(t1.blessing_heal, 10);
        assert_eq!(t1.weapon_name, "Gnarled Branch");

        let t2 = TierTable::for_stage(5);
        assert_eq!(t2.hollow_hp, 8);
        assert_eq!(t2.item_heal, 5);
        assert_eq!(t2.blessing_heal, 12);
        assert_eq!(t2.weapon_tier, 2);

        let t3 = TierTable::for_stage(9);
        assert_eq!(t3.beast_hp, [6, 6, 6, 8, 8]);
        assert_eq!(t3.hollow_hp, 9);
        assert_eq!(t3.item_heal, 8);
        assert_eq!(t3.blessing_heal, 14);
        assert!(!t3.includes_tool);
    }

    #[test]
    fn test_location_one_table() {
        let t = TierTable::location_one();
        assert_eq!(t.beast_hp, [3, 3, 3, 5, 5]);
        assert_eq!(t.hollow_hp, 7);
        assert_eq!(t.item_heal, 0);
        assert!(t.includes_tool);
    }

    #[test]
    fn test_profiles() {
        let single = RulesProfile::single_stage();
        assert_eq!(single.pit_damage, 2);
        assert_eq!(single.terror_damage, 5);
        assert_eq!(single.tier_table(4), TierTable::location_one());

        let campaign = RulesProfile::campaign().with_auto_heal(false);
        assert_eq!(campaign.pit_damage, 1);
        assert_eq!(campaign.terror_damage, 4);
        assert!(!campaign.auto_heal);
        assert_eq!(campaign.tier_table(4), TierTable::for_stage(4));
    }

    #[test]
    fn test_profile_serialization() {
        let profile = RulesProfile::campaign();
        let json = serde_json::to_string(&profile).unwrap();
        let deserialized: RulesProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, deserialized);
    }
}
