//! Ability catalog and resolution.
//!
//! Resolving an ability is split in two steps, mirroring how intents become
//! effects elsewhere in the engine:
//! 1. [`resolve`] checks the ability's restriction and computes its
//!    [`Effect`]s from the actor's stats and the target. Nothing is mutated,
//!    so a rejected ability leaves the battle untouched.
//! 2. [`Resolution::apply`] mutates the actor and target and reports what
//!    happened as [`BattleEvent`]s.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::combatant::Combatant;
use crate::error::BattleError;
use crate::events::BattleEvent;

/// Every ability a hero or monster can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityId {
    Fight,
    // Warrior
    ShieldSlam,
    RecklessCharge,
    // Mage
    Fireball,
    Frostbolt,
    // Cleric
    Heal,
    Smite,
    // Rogue
    Backstab,
    RapidStrike,
    // Dragons
    TailSwipe,
    FireBreath,
    PoisonBreath,
    // Undead
    LifeDrain,
    Bite,
    Bash,
    // Humanoids
    Slash,
    Regenerate,
    BloodRage,
}

/// What performing an ability costs the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityCost {
    Free,
    Mp(i32),
    Hp(i32),
}

impl AbilityId {
    /// Identifier used in commands, e.g. `shield_slam`.
    pub fn name(&self) -> &'static str {
        match self {
            AbilityId::Fight => "fight",
            AbilityId::ShieldSlam => "shield_slam",
            AbilityId::RecklessCharge => "reckless_charge",
            AbilityId::Fireball => "fireball",
            AbilityId::Frostbolt => "frostbolt",
            AbilityId::Heal => "heal",
            AbilityId::Smite => "smite",
            AbilityId::Backstab => "backstab",
            AbilityId::RapidStrike => "rapid_strike",
            AbilityId::TailSwipe => "tail_swipe",
            AbilityId::FireBreath => "fire_breath",
            AbilityId::PoisonBreath => "poison_breath",
            AbilityId::LifeDrain => "life_drain",
            AbilityId::Bite => "bite",
            AbilityId::Bash => "bash",
            AbilityId::Slash => "slash",
            AbilityId::Regenerate => "regenerate",
            AbilityId::BloodRage => "blood_rage",
        }
    }

    /// Human-readable name, e.g. `Shield Slam`.
    pub fn title(&self) -> String {
        self.name()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse either form of the name (`shield_slam`, `Shield Slam`).
    pub fn from_name(name: &str) -> Option<AbilityId> {
        let normalized = name.trim().to_ascii_lowercase().replace(' ', "_");
        AbilityId::all()
            .iter()
            .copied()
            .find(|ability| ability.name() == normalized)
    }

    pub fn all() -> &'static [AbilityId] {
        &[
            AbilityId::Fight,
            AbilityId::ShieldSlam,
            AbilityId::RecklessCharge,
            AbilityId::Fireball,
            AbilityId::Frostbolt,
            AbilityId::Heal,
            AbilityId::Smite,
            AbilityId::Backstab,
            AbilityId::RapidStrike,
            AbilityId::TailSwipe,
            AbilityId::FireBreath,
            AbilityId::PoisonBreath,
            AbilityId::LifeDrain,
            AbilityId::Bite,
            AbilityId::Bash,
            AbilityId::Slash,
            AbilityId::Regenerate,
            AbilityId::BloodRage,
        ]
    }

    /// Cost for `actor` to perform this ability.
    pub fn cost(&self, actor: &Combatant) -> AbilityCost {
        match self {
            AbilityId::ShieldSlam => AbilityCost::Mp(5),
            AbilityId::RecklessCharge => AbilityCost::Hp(4),
            AbilityId::Fireball => AbilityCost::Mp(8),
            AbilityId::Frostbolt => AbilityCost::Mp(3),
            AbilityId::Heal => AbilityCost::Mp(4),
            AbilityId::Smite => AbilityCost::Mp(7),
            AbilityId::RapidStrike => AbilityCost::Mp(5),
            AbilityId::BloodRage => AbilityCost::Hp(truncate(0.5 * actor.stats.constitution as f64)),
            _ => AbilityCost::Free,
        }
    }

    /// Abilities that only ever affect the actor.
    pub fn targets_self(&self) -> bool {
        matches!(self, AbilityId::Regenerate)
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A single state change produced by an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Deduct MP from the actor.
    SpendMp(i32),
    /// Deduct HP from the actor, bypassing mitigation.
    PayHp(i32),
    /// Damage the target through its mitigation.
    Damage(i32),
    /// Heal the target from outside (inverted for undead).
    Heal(i32),
    /// Heal the actor with its own ability.
    Regenerate(i32),
    /// Heal the actor by the damage just dealt; optionally shrink the
    /// target's maximum HP by the same amount.
    Drain { sap_max_hp: bool },
}

/// Outcome of resolving an ability, before it is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub ability: AbilityId,
    pub effects: Vec<Effect>,
}

impl Resolution {
    fn new(ability: AbilityId) -> Self {
        Self {
            ability,
            effects: Vec::new(),
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Apply every effect in order.
    ///
    /// `target` is `None` when the actor targets itself.
    pub fn apply(&self, actor: &mut Combatant, mut target: Option<&mut Combatant>) -> Vec<BattleEvent> {
        let target_name = match (&target, self.ability.targets_self()) {
            (_, true) => None,
            (Some(target), false) => Some(target.name.clone()),
            (None, false) => Some(actor.name.clone()),
        };
        let mut events = vec![BattleEvent::AbilityUsed {
            actor: actor.name.clone(),
            ability: self.ability,
            target: target_name,
        }];

        let mut last_damage = 0;
        for effect in &self.effects {
            match *effect {
                Effect::SpendMp(amount) => actor.spend_mp(amount),
                Effect::PayHp(amount) => {
                    let lost = actor.lose_hp(amount);
                    events.push(BattleEvent::PaidHp {
                        actor: actor.name.clone(),
                        amount: lost,
                    });
                }
                Effect::Damage(amount) => {
                    let subject = match target.as_deref_mut() {
                        Some(target) => target,
                        None => &mut *actor,
                    };
                    last_damage = subject.take_damage(amount);
                    events.push(BattleEvent::Damaged {
                        target: subject.name.clone(),
                        amount: last_damage,
                    });
                }
                Effect::Heal(amount) => {
                    let subject = match target.as_deref_mut() {
                        Some(target) => target,
                        None => &mut *actor,
                    };
                    let change = subject.heal(amount);
                    let name = subject.name.clone();
                    if change < 0 {
                        events.push(BattleEvent::HealingBurned {
                            target: name,
                            amount: -change,
                        });
                    } else {
                        events.push(BattleEvent::Healed {
                            target: name,
                            amount: change,
                        });
                    }
                }
                Effect::Regenerate(amount) => {
                    let restored = actor.regenerate(amount);
                    events.push(BattleEvent::Healed {
                        target: actor.name.clone(),
                        amount: restored,
                    });
                }
                Effect::Drain { sap_max_hp } => {
                    if sap_max_hp {
                        let subject = match target.as_deref_mut() {
                            Some(target) => target,
                            None => &mut *actor,
                        };
                        subject.reduce_max_hp(last_damage);
                        events.push(BattleEvent::MaxHpSapped {
                            target: subject.name.clone(),
                            amount: last_damage,
                        });
                    }
                    let restored = actor.regenerate(last_damage);
                    events.push(BattleEvent::Healed {
                        target: actor.name.clone(),
                        amount: restored,
                    });
                }
            }
        }

        tracing::trace!(ability = %self.ability, effects = ?self.effects, "ability applied");
        events
    }
}

/// Integer part of a real-valued formula.
fn truncate(value: f64) -> i32 {
    value.trunc() as i32
}

/// Check the restriction of `ability` and compute its effects.
///
/// Pure with respect to the combatants: nothing is mutated, so an `Err`
/// leaves both sides unchanged. The RNG is only consumed by abilities with
/// a random multiplier.
pub fn resolve<R: Rng>(
    ability: AbilityId,
    actor: &Combatant,
    target: &Combatant,
    rng: &mut R,
) -> Result<Resolution, BattleError> {
    let stats = actor.stats;
    let resolution = Resolution::new(ability);

    let resolution = match ability.cost(actor) {
        AbilityCost::Mp(cost) => {
            if actor.mp < cost {
                return Err(BattleError::InsufficientMp {
                    actor: actor.name.clone(),
                    ability,
                    required: cost,
                    available: actor.mp,
                });
            }
            resolution.with_effect(Effect::SpendMp(cost))
        }
        AbilityCost::Hp(cost) => resolution.with_effect(Effect::PayHp(cost)),
        AbilityCost::Free => resolution,
    };

    let resolution = match ability {
        AbilityId::Fight => resolution.with_effect(Effect::Damage(stats.strength)),
        AbilityId::ShieldSlam => {
            resolution.with_effect(Effect::Damage(truncate(1.5 * stats.strength as f64)))
        }
        AbilityId::RecklessCharge => resolution.with_effect(Effect::Damage(2 * stats.strength)),
        AbilityId::Fireball => resolution.with_effect(Effect::Damage(truncate(
            6.0 + 0.5 * stats.intelligence as f64,
        ))),
        AbilityId::Frostbolt => resolution.with_effect(Effect::Damage(3 + actor.level as i32)),
        AbilityId::Heal => resolution.with_effect(Effect::Heal(stats.constitution)),
        AbilityId::Smite => resolution.with_effect(Effect::Damage(truncate(
            4.0 + 0.5 * (stats.intelligence + stats.constitution) as f64,
        ))),
        AbilityId::Backstab => {
            if !target.has_full_hp() {
                return Err(BattleError::invalid_target(
                    target.name.clone(),
                    "backstab needs an unharmed target",
                ));
            }
            resolution.with_effect(Effect::Damage(2 * stats.strength))
        }
        AbilityId::RapidStrike => resolution.with_effect(Effect::Damage(4 + stats.speed)),
        AbilityId::TailSwipe | AbilityId::Slash => {
            resolution.with_effect(Effect::Damage(stats.strength + stats.speed))
        }
        AbilityId::FireBreath => {
            let multiplier = rng.gen_range(2.5..=3.0);
            resolution.with_effect(Effect::Damage(truncate(
                stats.intelligence as f64 * multiplier,
            )))
        }
        AbilityId::PoisonBreath => resolution.with_effect(Effect::Damage(truncate(
            1.5 * (stats.intelligence + stats.constitution) as f64,
        ))),
        AbilityId::LifeDrain => resolution
            .with_effect(Effect::Damage(truncate(1.5 * stats.intelligence as f64)))
            .with_effect(Effect::Drain { sap_max_hp: false }),
        AbilityId::Bite => {
            let multiplier = rng.gen_range(0.5..=2.0);
            resolution
                .with_effect(Effect::Damage(truncate(stats.speed as f64 * multiplier)))
                .with_effect(Effect::Drain { sap_max_hp: true })
        }
        AbilityId::Bash | AbilityId::BloodRage => {
            resolution.with_effect(Effect::Damage(2 * stats.strength))
        }
        AbilityId::Regenerate => resolution.with_effect(Effect::Regenerate(stats.constitution)),
    };

    tracing::trace!(
        actor = %actor.name,
        target = %target.name,
        ability = %ability,
        "ability resolved"
    );
    Ok(resolution)
}
