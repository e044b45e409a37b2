//! Monster groups the party can run into.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::class_data::MonsterKind;
use crate::combatant::Combatant;

/// Every group an encounter can draw from.
pub const ENCOUNTERS: &[&[MonsterKind]] = &[
    &[MonsterKind::Orc, MonsterKind::Orc, MonsterKind::Orc],
    &[MonsterKind::Orc, MonsterKind::Troll],
    &[MonsterKind::Skeleton, MonsterKind::Skeleton],
    &[MonsterKind::Vampire],
    &[MonsterKind::RedDragon],
    &[MonsterKind::GreenDragon],
];

/// Floored mean level of the party, fallen heroes included.
pub fn party_level(party: &[Combatant]) -> u32 {
    if party.is_empty() {
        return 1;
    }
    let total: u32 = party.iter().map(|hero| hero.level).sum();
    (total / party.len() as u32).max(1)
}

/// Pick a group at random and build it one level above the party.
pub fn generate<R: Rng>(party_level: u32, rng: &mut R) -> Vec<Combatant> {
    let group = ENCOUNTERS.choose(rng).copied().unwrap_or(&[MonsterKind::Orc]);
    let level = party_level.max(1) + 1;

    tracing::debug!(level, ?group, "encounter generated");
    group
        .iter()
        .map(|kind| Combatant::monster(*kind, level))
        .collect()
}
