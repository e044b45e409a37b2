//! Testing utilities for the battle engine.
//!
//! This module provides tools for integration testing:
//! - `TestHarness` for scripted battles with a fixed seed
//! - Assertion helpers for verifying battle state

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::battle::{Battle, TurnReport};
use crate::class_data::{HeroClass, MonsterKind};
use crate::combatant::{Combatant, CombatantId};
use crate::error::BattleError;
use crate::events::BattleOutcome;

/// Seed used when a test does not pick one.
pub const TEST_SEED: u64 = 0x5eed;

/// Test harness for running battle scenarios.
pub struct TestHarness {
    /// The battle under test.
    pub battle: Battle,
    /// Every log line produced so far.
    pub log: Vec<String>,
}

impl TestHarness {
    /// Create a battle from explicit combatants.
    pub fn new(party: Vec<Combatant>, monsters: Vec<Combatant>) -> Self {
        Self::with_seed(party, monsters, TEST_SEED)
    }

    pub fn with_seed(party: Vec<Combatant>, monsters: Vec<Combatant>, seed: u64) -> Self {
        let mut battle = Battle::new(party, monsters, ChaCha8Rng::seed_from_u64(seed));
        let log = battle.take_log();
        Self { battle, log }
    }

    /// Create a battle of level-1 heroes against level-1 monsters.
    pub fn skirmish(classes: &[HeroClass], kinds: &[MonsterKind]) -> Self {
        Self::new(
            classes.iter().map(|class| Combatant::hero(*class, 1)).collect(),
            kinds.iter().map(|kind| Combatant::monster(*kind, 1)).collect(),
        )
    }

    /// Play one monster turn.
    pub fn monster_turn(&mut self) -> Result<TurnReport, BattleError> {
        let report = self.battle.advance_monster_turn()?;
        self.log.extend(report.log.iter().cloned());
        Ok(report)
    }

    /// Play monster turns until a hero must act or the battle ends.
    pub fn run_monsters(&mut self) -> Result<(), BattleError> {
        while self.battle.is_monster_turn() {
            self.monster_turn()?;
        }
        Ok(())
    }

    /// Have the current hero use `ability` on the combatant named `target`.
    pub fn hero_uses(&mut self, ability: &str, target: &str) -> Result<TurnReport, BattleError> {
        let target = self.id_of(target);
        let report = self.battle.execute_command(ability, target)?;
        self.log.extend(report.log.iter().cloned());
        Ok(report)
    }

    /// Look up a combatant by display name.
    ///
    /// Unknown names map to a fresh id so the engine can reject them.
    pub fn id_of(&self, name: &str) -> CombatantId {
        self.find(name).map(|c| c.id).unwrap_or_default()
    }

    pub fn find(&self, name: &str) -> Option<&Combatant> {
        self.battle.participants().iter().find(|c| c.name == name)
    }

    /// Current HP of the named combatant.
    pub fn hp(&self, name: &str) -> Option<i32> {
        self.find(name).map(|c| c.hp)
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.battle.is_over()
    }

    /// Name of whoever acts next.
    pub fn current(&self) -> Option<&str> {
        self.battle.current_attacker().map(|c| c.name.as_str())
    }

    pub fn log_contains(&self, line: &str) -> bool {
        self.log.iter().any(|l| l == line)
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the named combatant has exactly `expected` HP.
#[track_caller]
pub fn assert_hp(harness: &TestHarness, name: &str, expected: i32) {
    let actual = harness.hp(name);
    assert_eq!(
        actual,
        Some(expected),
        "Expected {name} to have {expected} HP, got {actual:?}"
    );
}

/// Assert the battle ended with `expected`.
#[track_caller]
pub fn assert_outcome(harness: &TestHarness, expected: BattleOutcome) {
    assert_eq!(
        harness.outcome(),
        Some(expected),
        "Expected the battle to end in {expected}"
    );
}

/// Assert the battle is still running.
#[track_caller]
pub fn assert_running(harness: &TestHarness) {
    assert!(
        harness.outcome().is_none(),
        "Expected the battle to be running, got {:?}",
        harness.outcome()
    );
}

/// Assert a log line was produced.
#[track_caller]
pub fn assert_logged(harness: &TestHarness, line: &str) {
    assert!(
        harness.log_contains(line),
        "Expected log line '{line}', log was:\n{}",
        harness.log.join("\n")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_records_encounter() {
        let harness = TestHarness::skirmish(&[HeroClass::Warrior], &[MonsterKind::Orc]);
        assert_logged(&harness, "Monsters appear: Orc!");
        assert_eq!(harness.current(), Some("Orc"));
        assert_running(&harness);
    }

    #[test]
    fn test_harness_unknown_name() {
        let harness = TestHarness::skirmish(&[HeroClass::Mage], &[MonsterKind::Troll]);
        assert!(harness.find("Goblin").is_none());
        assert!(harness.hp("Goblin").is_none());
        assert_hp(&harness, "Troll", 20);
    }
}
