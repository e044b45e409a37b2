//! Combat log entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::abilities::AbilityId;

/// Terminal result of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleOutcome::Victory => write!(f, "Victory"),
            BattleOutcome::Defeat => write!(f, "Defeat"),
        }
    }
}

/// Something that happened during a battle.
///
/// The `Display` form is the line shown in the combat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    Encounter { monsters: Vec<String> },
    AbilityUsed {
        actor: String,
        ability: AbilityId,
        target: Option<String>,
    },
    Damaged { target: String, amount: i32 },
    Healed { target: String, amount: i32 },
    /// Healing that hurt an undead target.
    HealingBurned { target: String, amount: i32 },
    PaidHp { actor: String, amount: i32 },
    MaxHpSapped { target: String, amount: i32 },
    Died { name: String },
    GainedXp { hero: String, amount: u32 },
    LeveledUp { hero: String, level: u32 },
    Ended(BattleOutcome),
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::Encounter { monsters } => {
                write!(f, "Monsters appear: {}!", monsters.join(", "))
            }
            BattleEvent::AbilityUsed {
                actor,
                ability,
                target: Some(target),
            } => write!(f, "{actor} uses {ability} on {target}."),
            BattleEvent::AbilityUsed {
                actor,
                ability,
                target: None,
            } => write!(f, "{actor} uses {ability}."),
            BattleEvent::Damaged { target, amount: 0 } => {
                write!(f, "{target} shrugs off the blow.")
            }
            BattleEvent::Damaged { target, amount } => {
                write!(f, "{target} takes {amount} damage.")
            }
            BattleEvent::Healed { target, amount } => write!(f, "{target} recovers {amount} HP."),
            BattleEvent::HealingBurned { target, amount } => {
                write!(f, "The healing sears {target} for {amount} damage.")
            }
            BattleEvent::PaidHp { actor, amount } => write!(f, "{actor} pays {amount} HP."),
            BattleEvent::MaxHpSapped { target, amount } => {
                write!(f, "{target}'s maximum HP drops by {amount}.")
            }
            BattleEvent::Died { name } => write!(f, "{name} has died."),
            BattleEvent::GainedXp { hero, amount } => write!(f, "{hero} gains {amount} XP."),
            BattleEvent::LeveledUp { hero, level } => {
                write!(f, "{hero} reaches level {level}!")
            }
            BattleEvent::Ended(BattleOutcome::Victory) => write!(f, "Victory!"),
            BattleEvent::Ended(BattleOutcome::Defeat) => write!(f, "The party has fallen."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines() {
        let used = BattleEvent::AbilityUsed {
            actor: "Warrior".to_string(),
            ability: AbilityId::ShieldSlam,
            target: Some("Orc".to_string()),
        };
        assert_eq!(used.to_string(), "Warrior uses Shield Slam on Orc.");

        let regen = BattleEvent::AbilityUsed {
            actor: "Troll".to_string(),
            ability: AbilityId::Regenerate,
            target: None,
        };
        assert_eq!(regen.to_string(), "Troll uses Regenerate.");

        let blocked = BattleEvent::Damaged {
            target: "Red Dragon".to_string(),
            amount: 0,
        };
        assert_eq!(blocked.to_string(), "Red Dragon shrugs off the blow.");

        assert_eq!(BattleEvent::Ended(BattleOutcome::Victory).to_string(), "Victory!");
    }
}
