//! Heroes and monsters as battle participants.
//!
//! A [`Combatant`] carries stats and pools for either side. The class or
//! monster kind only selects a definition record from [`crate::class_data`];
//! the damage and healing primitives below are shared.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::abilities::AbilityId;
use crate::class_data::{HeroClass, MonsterFamily, MonsterKind, HERO_BASE_STAT, MONSTER_BASE_STAT};

/// HP a level-1 hero has before adding half its constitution.
pub const HERO_BASE_HP: i32 = 100;

/// MP a level-1 hero has before adding half its intelligence.
pub const HERO_BASE_MP: i32 = 50;

/// Unique identifier for battle participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub Uuid);

impl CombatantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CombatantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four attributes every combatant has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub strength: i32,
    pub intelligence: i32,
    pub constitution: i32,
    pub speed: i32,
}

impl Stats {
    pub fn total(&self) -> i32 {
        self.strength + self.intelligence + self.constitution + self.speed
    }

    /// Floored mean of the four stats.
    pub fn average(&self) -> i32 {
        self.total().div_euclid(4)
    }
}

/// Which side a combatant fights for, and what it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantKind {
    Hero(HeroClass),
    Monster(MonsterKind),
}

/// A hero or monster taking part in battles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    /// Display name; the class or monster name unless disambiguated.
    pub name: String,
    pub kind: CombatantKind,
    pub level: u32,
    pub stats: Stats,
    pub hp: i32,
    pub maxhp: i32,
    pub mp: i32,
    pub maxmp: i32,
    /// Experience toward the next level. Always 0 for monsters.
    pub xp: u32,
    pub abilities: Vec<AbilityId>,
    /// Index of the next command queue entry (monsters only).
    pub command_cursor: usize,
}

impl Combatant {
    /// Create a hero of the given class, levelled up to `level`.
    pub fn hero(class: HeroClass, level: u32) -> Self {
        let data = class.data();
        let modifiers = data.modifiers;
        let stats = Stats {
            strength: HERO_BASE_STAT + modifiers.strength,
            intelligence: HERO_BASE_STAT + modifiers.intelligence,
            constitution: HERO_BASE_STAT + modifiers.constitution,
            speed: HERO_BASE_STAT + modifiers.speed,
        };
        let maxhp = HERO_BASE_HP + stats.constitution / 2;
        let maxmp = HERO_BASE_MP + stats.intelligence / 2;

        let mut abilities = vec![AbilityId::Fight];
        abilities.extend_from_slice(data.abilities);

        let mut hero = Self {
            id: CombatantId::new(),
            name: class.name().to_string(),
            kind: CombatantKind::Hero(class),
            level: 1,
            stats,
            hp: maxhp,
            maxhp,
            mp: maxmp,
            maxmp,
            xp: 0,
            abilities,
            command_cursor: 0,
        };

        for _ in 1..level.max(1) {
            hero.level_up();
        }
        hero
    }

    /// Create a monster of the given kind at `level`.
    pub fn monster(kind: MonsterKind, level: u32) -> Self {
        let data = kind.data();
        let scale = |multiplier: f64| (MONSTER_BASE_STAT as f64 * multiplier).floor() as i32;
        let stats = Stats {
            strength: scale(data.multipliers.strength),
            intelligence: scale(data.multipliers.intelligence),
            constitution: scale(data.multipliers.constitution),
            speed: scale(data.multipliers.speed),
        };
        let level = level.max(1);
        let bonus_levels = (level - 1) as i32;
        let maxhp = data.base_hp + bonus_levels * stats.constitution / 2;

        let mut abilities: Vec<AbilityId> = Vec::new();
        for ability in data.command_queue {
            if !abilities.contains(ability) {
                abilities.push(*ability);
            }
        }

        Self {
            id: CombatantId::new(),
            name: kind.name().to_string(),
            kind: CombatantKind::Monster(kind),
            level,
            stats,
            hp: maxhp,
            maxhp,
            mp: 0,
            maxmp: 0,
            xp: 0,
            abilities,
            command_cursor: 0,
        }
    }

    /// Replace the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.kind, CombatantKind::Hero(_))
    }

    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CombatantKind::Monster(_))
    }

    pub fn hero_class(&self) -> Option<HeroClass> {
        match self.kind {
            CombatantKind::Hero(class) => Some(class),
            CombatantKind::Monster(_) => None,
        }
    }

    pub fn monster_kind(&self) -> Option<MonsterKind> {
        match self.kind {
            CombatantKind::Hero(_) => None,
            CombatantKind::Monster(kind) => Some(kind),
        }
    }

    pub fn family(&self) -> Option<MonsterFamily> {
        self.monster_kind().map(|kind| kind.family())
    }

    /// Class or monster name, independent of the display name.
    pub fn class_name(&self) -> &'static str {
        match self.kind {
            CombatantKind::Hero(class) => class.name(),
            CombatantKind::Monster(kind) => kind.name(),
        }
    }

    /// Reduce HP by `amount` after family mitigation. Returns the HP lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let mitigation = self.family().map_or(0, |family| family.damage_mitigation());
        let damage = (amount - mitigation).max(0);
        self.lose_hp(damage)
    }

    /// Restore HP from an outside source.
    ///
    /// Undead take the amount as damage instead. Returns the signed change
    /// in HP.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.family().is_some_and(|family| family.inverts_healing()) {
            -self.lose_hp(amount)
        } else {
            self.regenerate(amount)
        }
    }

    /// Restore HP from the combatant's own ability. Never inverted.
    pub fn regenerate(&mut self, amount: i32) -> i32 {
        debug_assert!(amount >= 0, "negative healing");
        let old = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.maxhp);
        self.hp - old
    }

    /// Remove HP directly, bypassing mitigation. Returns the HP lost.
    pub fn lose_hp(&mut self, amount: i32) -> i32 {
        debug_assert!(amount >= 0, "negative damage");
        let old = self.hp;
        self.hp = (self.hp - amount.max(0)).max(0);
        old - self.hp
    }

    /// Lower maximum HP, dragging current HP down with it.
    pub fn reduce_max_hp(&mut self, amount: i32) {
        self.maxhp = (self.maxhp - amount.max(0)).max(0);
        self.hp = self.hp.min(self.maxhp);
    }

    pub fn spend_mp(&mut self, amount: i32) {
        debug_assert!(amount <= self.mp, "spent more MP than available");
        self.mp = (self.mp - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn has_full_hp(&self) -> bool {
        self.hp == self.maxhp
    }

    pub fn has_ability(&self, ability: AbilityId) -> bool {
        self.abilities.contains(&ability)
    }

    /// The ability this monster will perform next, without advancing.
    pub fn peek_command(&self) -> Option<AbilityId> {
        let queue = self.monster_kind()?.data().command_queue;
        queue.get(self.command_cursor % queue.len()).copied()
    }

    /// Take the next queued ability and advance the cursor.
    pub fn next_command(&mut self) -> Option<AbilityId> {
        let queue = self.monster_kind()?.data().command_queue;
        let ability = queue.get(self.command_cursor % queue.len()).copied()?;
        self.command_cursor = (self.command_cursor + 1) % queue.len();
        Some(ability)
    }

    /// HP as a fraction of maximum, for gauges.
    pub fn hp_ratio(&self) -> f32 {
        if self.maxhp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.maxhp as f32).clamp(0.0, 1.0)
    }

    pub fn mp_ratio(&self) -> f32 {
        if self.maxmp <= 0 {
            return 0.0;
        }
        (self.mp as f32 / self.maxmp as f32).clamp(0.0, 1.0)
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
