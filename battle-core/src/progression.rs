//! Experience and leveling.

use crate::combatant::{Combatant, CombatantKind};

/// XP needed per level to advance to the next one.
pub const XP_PER_LEVEL: u32 = 10;

impl Combatant {
    /// XP required to leave the current level.
    pub fn xp_for_next_level(&self) -> u32 {
        XP_PER_LEVEL * self.level
    }

    /// Add experience, leveling up as many times as it covers.
    ///
    /// Leftover XP carries into the next level. Returns each level reached.
    pub fn gain_xp(&mut self, amount: u32) -> Vec<u32> {
        let mut reached = Vec::new();
        if !self.is_hero() {
            return reached;
        }

        self.xp += amount;
        while self.xp >= self.xp_for_next_level() {
            self.xp -= self.xp_for_next_level();
            self.level_up();
            reached.push(self.level);
        }
        reached
    }

    /// Advance one level: grow stats and pools, then restore both pools.
    pub(crate) fn level_up(&mut self) {
        let CombatantKind::Hero(class) = self.kind else {
            return;
        };
        let modifiers = class.data().modifiers;
        let growth = |modifier: i32| 1 + modifier.max(0);

        self.level += 1;
        self.stats.strength += growth(modifiers.strength);
        self.stats.intelligence += growth(modifiers.intelligence);
        self.stats.constitution += growth(modifiers.constitution);
        self.stats.speed += growth(modifiers.speed);

        self.maxhp += self.stats.constitution / 2;
        self.maxmp += self.stats.intelligence / 2;
        self.hp = self.maxhp;
        self.mp = self.maxmp;

        tracing::debug!(hero = %self.name, level = self.level, "level up");
    }

    /// XP every surviving hero receives when this monster dies.
    pub fn xp_value(&self) -> u32 {
        let CombatantKind::Monster(kind) = self.kind else {
            return 0;
        };
        let base = self.stats.average() + self.maxhp / 10;
        (base.max(0) as f64 * kind.data().xp_multiplier).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_data::{HeroClass, MonsterKind};

    #[test]
    fn test_xp_below_threshold() {
        let mut hero = Combatant::hero(HeroClass::Warrior, 1);
        assert!(hero.gain_xp(9).is_empty());
        assert_eq!(hero.xp, 9);
        assert_eq!(hero.level, 1);
    }

    #[test]
    fn test_level_up_growth() {
        let mut warrior = Combatant::hero(HeroClass::Warrior, 1);
        warrior.take_damage(50);
        warrior.spend_mp(10);

        assert_eq!(warrior.gain_xp(10), vec![2]);
        assert_eq!(warrior.xp, 0);
        // str +2, int +1, con +3, spd +1
        assert_eq!(warrior.stats.strength, 9);
        assert_eq!(warrior.stats.intelligence, 5);
        assert_eq!(warrior.stats.constitution, 11);
        assert_eq!(warrior.stats.speed, 6);
        assert_eq!(warrior.maxhp, 104 + 5);
        assert_eq!(warrior.maxmp, 52 + 2);
        assert_eq!(warrior.hp, warrior.maxhp);
        assert_eq!(warrior.mp, warrior.maxmp);
    }

    #[test]
    fn test_multiple_level_ups_roll_over() {
        let mut mage = Combatant::hero(HeroClass::Mage, 1);
        // 10 for level 2, 20 for level 3, 5 left over
        assert_eq!(mage.gain_xp(35), vec![2, 3]);
        assert_eq!(mage.level, 3);
        assert_eq!(mage.xp, 5);
    }

    #[test]
    fn test_split_awards_match_single_award() {
        let mut split = Combatant::hero(HeroClass::Rogue, 1);
        split.gain_xp(5);
        split.gain_xp(7);

        let mut single = Combatant::hero(HeroClass::Rogue, 1);
        single.gain_xp(12);

        assert_eq!(split.level, single.level);
        assert_eq!(split.xp, single.xp);
        assert_eq!(split.stats, single.stats);
        assert_eq!(split.maxhp, single.maxhp);
    }

    #[test]
    fn test_hero_created_at_level() {
        let built = Combatant::hero(HeroClass::Cleric, 3);
        let mut grown = Combatant::hero(HeroClass::Cleric, 1);
        grown.gain_xp(30);
        assert_eq!(built.level, 3);
        assert_eq!(built.xp, 0);
        assert_eq!(built.stats, grown.stats);
        assert_eq!(built.maxhp, grown.maxhp);
        assert_eq!(built.maxmp, grown.maxmp);
    }

    #[test]
    fn test_monster_xp_values() {
        // avg 9, hp 16 / 10 = 1, halved
        assert_eq!(Combatant::monster(MonsterKind::Orc, 1).xp_value(), 5);
        // avg 10, hp 20 / 10 = 2
        assert_eq!(Combatant::monster(MonsterKind::Troll, 1).xp_value(), 12);
        // avg 13, hp 100 / 10 = 10, doubled
        assert_eq!(Combatant::monster(MonsterKind::RedDragon, 1).xp_value(), 46);
        assert_eq!(Combatant::hero(HeroClass::Warrior, 1).xp_value(), 0);
    }

    #[test]
    fn test_monsters_do_not_gain_xp() {
        let mut orc = Combatant::monster(MonsterKind::Orc, 1);
        assert!(orc.gain_xp(100).is_empty());
        assert_eq!(orc.xp, 0);
        assert_eq!(orc.level, 1);
    }
}
