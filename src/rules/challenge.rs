//! Pit and Terror cards.

use crate::core::{GameRng, LuxSpend, PlayerState, PIT_SUCCESS_ROLL, PIT_TARGET};
use crate::policy::DecisionPolicy;

/// How a Pit went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PitReport {
    pub successes: u8,
    pub failures: u8,
    /// Failures undone with Lux.
    pub rerolls: u32,
}

/// How a Terror was paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerrorOutcome {
    /// One Lux spent, no damage.
    PaidLux,
    /// Took this much damage.
    TookDamage(u8),
}

/// Race to three successes (roll of 3+) before three failures.
///
/// Each failure deals `damage`. A failure the policy considers too dangerous
/// is rerolled with Lux: no damage, and it doesn't count.
pub fn resolve_pit<P: DecisionPolicy + ?Sized>(
    state: &mut PlayerState,
    damage: u8,
    policy: &P,
    rng: &mut GameRng,
) -> PitReport {
    let mut report = PitReport::default();

    while report.successes < PIT_TARGET && report.failures < PIT_TARGET && state.is_alive() {
        if rng.roll_d6() >= PIT_SUCCESS_ROLL {
            report.successes += 1;
            continue;
        }

        if policy.should_reroll_pit(state, damage) && state.spend_lux(LuxSpend::PitReroll) {
            report.rerolls += 1;
            continue;
        }

        report.failures += 1;
        state.take_damage(damage);
    }

    tracing::trace!(
        successes = report.successes,
        failures = report.failures,
        rerolls = report.rerolls,
        hp = state.hp,
        "pit.resolved"
    );
    report
}

/// Pay a Lux or take `damage`. There's no reroll.
pub fn resolve_terror<P: DecisionPolicy + ?Sized>(
    state: &mut PlayerState,
    damage: u8,
    policy: &P,
) -> TerrorOutcome {
    if policy.should_avoid_terror(state) && state.spend_lux(LuxSpend::Terror) {
        TerrorOutcome::PaidLux
    } else {
        TerrorOutcome::TookDamage(state.take_damage(damage))
    }
}
