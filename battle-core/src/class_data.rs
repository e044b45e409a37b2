//! Hero class and monster definitions.
//!
//! Every class-specific number lives here: stat modifiers, ability lists,
//! base HP, stat multipliers and command queues. Combat code reads these
//! records instead of branching on the concrete kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::abilities::AbilityId;

/// Stat value every hero starts from before class modifiers.
pub const HERO_BASE_STAT: i32 = 6;

/// Stat value every monster starts from before multipliers.
pub const MONSTER_BASE_STAT: i32 = 8;

/// Flat reduction applied to every hit a dragon takes.
pub const DRAGON_MITIGATION: i32 = 5;

/// Player-selectable hero classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroClass {
    Warrior,
    Mage,
    Cleric,
    Rogue,
}

/// Signed per-stat deltas for a hero class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatModifiers {
    pub strength: i32,
    pub intelligence: i32,
    pub constitution: i32,
    pub speed: i32,
}

/// Class-specific data for hero creation and growth.
pub struct ClassData {
    /// Applied once at creation; positive entries also add to each level-up.
    pub modifiers: StatModifiers,
    /// Abilities beyond the universal `fight`.
    pub abilities: &'static [AbilityId],
}

impl HeroClass {
    /// Get class data for hero creation.
    pub fn data(&self) -> ClassData {
        match self {
            HeroClass::Warrior => ClassData {
                modifiers: StatModifiers {
                    strength: 1,
                    intelligence: -2,
                    constitution: 2,
                    speed: -1,
                },
                abilities: &[AbilityId::ShieldSlam, AbilityId::RecklessCharge],
            },
            HeroClass::Mage => ClassData {
                modifiers: StatModifiers {
                    strength: -2,
                    intelligence: 3,
                    constitution: -2,
                    speed: 0,
                },
                abilities: &[AbilityId::Fireball, AbilityId::Frostbolt],
            },
            HeroClass::Cleric => ClassData {
                modifiers: StatModifiers {
                    strength: 0,
                    intelligence: 0,
                    constitution: 1,
                    speed: -1,
                },
                abilities: &[AbilityId::Heal, AbilityId::Smite],
            },
            HeroClass::Rogue => ClassData {
                modifiers: StatModifiers {
                    strength: 1,
                    intelligence: -1,
                    constitution: -2,
                    speed: 2,
                },
                abilities: &[AbilityId::Backstab, AbilityId::RapidStrike],
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HeroClass::Warrior => "Warrior",
            HeroClass::Mage => "Mage",
            HeroClass::Cleric => "Cleric",
            HeroClass::Rogue => "Rogue",
        }
    }

    /// Get a short description of the class.
    pub fn description(&self) -> &'static str {
        match self {
            HeroClass::Warrior => "A sturdy fighter who trades blood for heavy blows",
            HeroClass::Mage => "A frail caster who burns mana on fire and frost",
            HeroClass::Cleric => "A healer whose holy light also smites the unliving",
            HeroClass::Rogue => "A quick striker who punishes unwary foes",
        }
    }

    /// Get all hero classes.
    pub fn all() -> &'static [HeroClass] {
        &[
            HeroClass::Warrior,
            HeroClass::Mage,
            HeroClass::Cleric,
            HeroClass::Rogue,
        ]
    }

    /// Parse a class name, ignoring case.
    pub fn from_name(name: &str) -> Option<HeroClass> {
        HeroClass::all()
            .iter()
            .copied()
            .find(|class| class.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for HeroClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Monster families share a passive trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterFamily {
    Humanoid,
    Dragon,
    Undead,
}

impl MonsterFamily {
    /// Flat amount subtracted from each incoming hit.
    pub fn damage_mitigation(&self) -> i32 {
        match self {
            MonsterFamily::Dragon => DRAGON_MITIGATION,
            MonsterFamily::Humanoid | MonsterFamily::Undead => 0,
        }
    }

    /// Whether healing from others hurts instead.
    pub fn inverts_healing(&self) -> bool {
        matches!(self, MonsterFamily::Undead)
    }
}

/// Monster kinds that appear in encounters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Orc,
    Troll,
    RedDragon,
    GreenDragon,
    Skeleton,
    Vampire,
}

/// Multipliers applied to the monster base stat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatMultipliers {
    pub strength: f64,
    pub intelligence: f64,
    pub constitution: f64,
    pub speed: f64,
}

impl StatMultipliers {
    const NONE: StatMultipliers = StatMultipliers {
        strength: 1.0,
        intelligence: 1.0,
        constitution: 1.0,
        speed: 1.0,
    };
}

/// Monster-specific data.
pub struct MonsterData {
    pub family: MonsterFamily,
    pub base_hp: i32,
    pub multipliers: StatMultipliers,
    /// Abilities performed in rotation, one per turn.
    pub command_queue: &'static [AbilityId],
    /// Scales the XP awarded on death.
    pub xp_multiplier: f64,
}

impl MonsterKind {
    /// Get the definition record for this monster.
    pub fn data(&self) -> MonsterData {
        match self {
            MonsterKind::Orc => MonsterData {
                family: MonsterFamily::Humanoid,
                base_hp: 16,
                multipliers: StatMultipliers {
                    strength: 1.75,
                    ..StatMultipliers::NONE
                },
                command_queue: &[AbilityId::BloodRage, AbilityId::Slash, AbilityId::Fight],
                xp_multiplier: 0.5,
            },
            MonsterKind::Troll => MonsterData {
                family: MonsterFamily::Humanoid,
                base_hp: 20,
                multipliers: StatMultipliers {
                    strength: 1.75,
                    constitution: 1.5,
                    ..StatMultipliers::NONE
                },
                command_queue: &[AbilityId::Slash, AbilityId::Fight, AbilityId::Regenerate],
                xp_multiplier: 1.0,
            },
            MonsterKind::RedDragon => MonsterData {
                family: MonsterFamily::Dragon,
                base_hp: 100,
                multipliers: StatMultipliers {
                    strength: 2.0,
                    intelligence: 1.5,
                    constitution: 2.0,
                    speed: 1.0,
                },
                command_queue: &[AbilityId::FireBreath, AbilityId::TailSwipe, AbilityId::Fight],
                xp_multiplier: 2.0,
            },
            MonsterKind::GreenDragon => MonsterData {
                family: MonsterFamily::Dragon,
                base_hp: 100,
                multipliers: StatMultipliers {
                    strength: 1.5,
                    intelligence: 1.0,
                    constitution: 2.0,
                    speed: 1.5,
                },
                command_queue: &[
                    AbilityId::PoisonBreath,
                    AbilityId::TailSwipe,
                    AbilityId::Fight,
                ],
                xp_multiplier: 2.0,
            },
            MonsterKind::Skeleton => MonsterData {
                family: MonsterFamily::Undead,
                base_hp: 10,
                multipliers: StatMultipliers {
                    strength: 1.25,
                    intelligence: 0.25,
                    constitution: 0.25,
                    speed: 0.5,
                },
                command_queue: &[AbilityId::Bash, AbilityId::Fight, AbilityId::LifeDrain],
                xp_multiplier: 1.0,
            },
            MonsterKind::Vampire => MonsterData {
                family: MonsterFamily::Undead,
                base_hp: 30,
                multipliers: StatMultipliers {
                    intelligence: 2.0,
                    constitution: 0.25,
                    ..StatMultipliers::NONE
                },
                command_queue: &[AbilityId::Fight, AbilityId::Bite, AbilityId::LifeDrain],
                xp_multiplier: 1.0,
            },
        }
    }

    pub fn family(&self) -> MonsterFamily {
        self.data().family
    }

    pub fn name(&self) -> &'static str {
        match self {
            MonsterKind::Orc => "Orc",
            MonsterKind::Troll => "Troll",
            MonsterKind::RedDragon => "Red Dragon",
            MonsterKind::GreenDragon => "Green Dragon",
            MonsterKind::Skeleton => "Skeleton",
            MonsterKind::Vampire => "Vampire",
        }
    }

    /// Get all monster kinds.
    pub fn all() -> &'static [MonsterKind] {
        &[
            MonsterKind::Orc,
            MonsterKind::Troll,
            MonsterKind::RedDragon,
            MonsterKind::GreenDragon,
            MonsterKind::Skeleton,
            MonsterKind::Vampire,
        ]
    }
}

impl fmt::Display for MonsterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_classes_have_two_abilities() {
        for class in HeroClass::all() {
            let data = class.data();
            assert_eq!(data.abilities.len(), 2, "{class} ability count");
            assert!(!data.abilities.contains(&AbilityId::Fight));
        }
    }

    #[test]
    fn test_warrior_modifiers() {
        let data = HeroClass::Warrior.data();
        assert_eq!(data.modifiers.strength, 1);
        assert_eq!(data.modifiers.intelligence, -2);
        assert_eq!(data.modifiers.constitution, 2);
        assert_eq!(data.modifiers.speed, -1);
    }

    #[test]
    fn test_class_from_name() {
        assert_eq!(HeroClass::from_name("cleric"), Some(HeroClass::Cleric));
        assert_eq!(HeroClass::from_name(" ROGUE "), Some(HeroClass::Rogue));
        assert_eq!(HeroClass::from_name("bard"), None);
    }

    #[test]
    fn test_monster_queues_have_three_commands() {
        for kind in MonsterKind::all() {
            assert_eq!(kind.data().command_queue.len(), 3, "{kind} queue length");
        }
    }

    #[test]
    fn test_family_traits() {
        assert_eq!(MonsterKind::RedDragon.family().damage_mitigation(), 5);
        assert_eq!(MonsterKind::Orc.family().damage_mitigation(), 0);
        assert!(MonsterKind::Vampire.family().inverts_healing());
        assert!(!MonsterKind::Troll.family().inverts_healing());
    }
}
