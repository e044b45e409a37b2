//! QA tests for combat resolution through the public battle API.
//!
//! Every scenario uses level-1 combatants and a fixed seed so the numbers
//! below follow directly from the class and monster tables.

use battle_core::testing::{assert_hp, assert_logged, assert_outcome, assert_running, TestHarness};
use battle_core::{BattleError, BattleEvent, BattleOutcome, Combatant, HeroClass, MonsterKind};

// =============================================================================
// Damage and mitigation
// =============================================================================

#[test]
fn test_warrior_fight_on_fresh_orc() {
    // Speed only decides turn order; give the warrior the first move
    let mut warrior = Combatant::hero(HeroClass::Warrior, 1);
    warrior.stats.speed = 9;
    let mut harness = TestHarness::new(vec![warrior], vec![Combatant::monster(MonsterKind::Orc, 1)]);
    assert_eq!(harness.current(), Some("Warrior"));

    harness.hero_uses("fight", "Orc").unwrap();
    assert_hp(&harness, "Orc", 9);
    assert_logged(&harness, "Orc takes 7 damage.");
    assert_eq!(harness.current(), Some("Orc"));
}

#[test]
fn test_dragon_shrugs_off_weak_hits() {
    let mut harness = TestHarness::skirmish(&[HeroClass::Mage], &[MonsterKind::GreenDragon]);
    harness.run_monsters().unwrap();

    // Mage strength 4 is below the dragon's mitigation
    let report = harness.hero_uses("fight", "Green Dragon").unwrap();
    assert_hp(&harness, "Green Dragon", 100);
    assert!(report.log.contains(&"Green Dragon shrugs off the blow.".to_string()));
}

// =============================================================================
// Rejected commands
// =============================================================================

#[test]
fn test_backstab_on_damaged_target_is_rejected() {
    let mut harness = TestHarness::skirmish(&[HeroClass::Rogue, HeroClass::Warrior], &[MonsterKind::Troll]);
    assert_eq!(harness.current(), Some("Rogue"));
    harness.hero_uses("fight", "Troll").unwrap();
    harness.run_monsters().unwrap();
    assert_eq!(harness.current(), Some("Warrior"));
    harness.hero_uses("fight", "Troll").unwrap();
    harness.run_monsters().unwrap();

    assert_eq!(harness.current(), Some("Rogue"));
    let before = harness.hp("Troll").unwrap();
    let err = harness.hero_uses("backstab", "Troll").unwrap_err();
    assert!(matches!(err, BattleError::InvalidTarget { .. }));
    assert_hp(&harness, "Troll", before);
    // The rogue still has the turn
    assert_eq!(harness.current(), Some("Rogue"));
}

#[test]
fn test_insufficient_mp_keeps_the_turn() {
    let mut mage = Combatant::hero(HeroClass::Mage, 1);
    mage.mp = 2;
    let mut harness = TestHarness::new(vec![mage], vec![Combatant::monster(MonsterKind::Skeleton, 1)]);
    assert_eq!(harness.current(), Some("Mage"));

    let err = harness.hero_uses("frostbolt", "Skeleton").unwrap_err();
    assert_eq!(
        err,
        BattleError::InsufficientMp {
            actor: "Mage".to_string(),
            ability: battle_core::AbilityId::Frostbolt,
            required: 3,
            available: 2,
        }
    );
    assert_eq!(harness.current(), Some("Mage"));
    assert_eq!(harness.battle.turns(), 0);
    assert_hp(&harness, "Skeleton", 10);
}

#[test]
fn test_ability_of_another_class_is_invalid_command() {
    let mut harness = TestHarness::skirmish(&[HeroClass::Cleric], &[MonsterKind::Skeleton]);
    let err = harness.hero_uses("fireball", "Skeleton").unwrap_err();
    assert!(matches!(err, BattleError::InvalidCommand(_)));
}

#[test]
fn test_unknown_target_is_invalid_target() {
    let mut harness = TestHarness::skirmish(&[HeroClass::Cleric], &[MonsterKind::Skeleton]);
    let err = harness.hero_uses("smite", "Goblin").unwrap_err();
    assert!(matches!(err, BattleError::InvalidTarget { .. }));
}

// =============================================================================
// Family traits in battle
// =============================================================================

#[test]
fn test_cleric_heal_burns_skeleton() {
    let mut harness = TestHarness::skirmish(&[HeroClass::Cleric], &[MonsterKind::Skeleton]);
    harness.hero_uses("heal", "Skeleton").unwrap();
    assert_hp(&harness, "Skeleton", 3);
    assert_logged(&harness, "The healing sears Skeleton for 7 damage.");
}

#[test]
fn test_cleric_heals_an_ally() {
    let mut warrior = Combatant::hero(HeroClass::Warrior, 1);
    warrior.hp = 50;
    let mut harness = TestHarness::new(
        vec![Combatant::hero(HeroClass::Cleric, 1), warrior],
        vec![Combatant::monster(MonsterKind::Skeleton, 1)],
    );
    harness.hero_uses("heal", "Warrior").unwrap();
    assert_hp(&harness, "Warrior", 57);
    assert_logged(&harness, "Warrior recovers 7 HP.");
}

#[test]
fn test_troll_regenerates_on_third_turn() {
    let mut harness = TestHarness::skirmish(&[HeroClass::Warrior], &[MonsterKind::Troll]);

    // slash, then fight
    for _ in 0..2 {
        harness.monster_turn().unwrap();
        harness.hero_uses("fight", "Troll").unwrap();
    }
    assert_hp(&harness, "Troll", 6);
    assert_hp(&harness, "Warrior", 104 - 22 - 14);

    let report = harness.monster_turn().unwrap();
    assert_eq!(report.log[0], "Troll uses Regenerate.");
    assert_hp(&harness, "Troll", 18);
    assert_running(&harness);
}

// =============================================================================
// Death, victory and defeat
// =============================================================================

#[test]
fn test_monster_kills_lone_hero() {
    let mut warrior = Combatant::hero(HeroClass::Warrior, 1);
    warrior.hp = 1;
    let mut harness = TestHarness::new(vec![warrior], vec![Combatant::monster(MonsterKind::Orc, 1)]);
    assert_eq!(harness.current(), Some("Orc"));

    let report = harness.monster_turn().unwrap();
    assert_eq!(report.outcome, Some(BattleOutcome::Defeat));
    assert_outcome(&harness, BattleOutcome::Defeat);
    assert_logged(&harness, "Warrior has died.");
    assert_logged(&harness, "The party has fallen.");

    assert!(harness.current().is_none());
    let err = harness.monster_turn().unwrap_err();
    assert!(matches!(err, BattleError::InvalidCommand(_)));
}

#[test]
fn test_victory_wins_over_simultaneous_hero_death() {
    // Warrior and Cleric tie on speed; the warrior is listed first
    let mut warrior = Combatant::hero(HeroClass::Warrior, 1);
    warrior.hp = 4;
    let mut harness = TestHarness::new(
        vec![warrior, Combatant::hero(HeroClass::Cleric, 1)],
        vec![Combatant::monster(MonsterKind::Skeleton, 1)],
    );
    assert_eq!(harness.current(), Some("Warrior"));

    // Reckless charge costs the warrior's last 4 HP and deals 14
    let report = harness.hero_uses("reckless_charge", "Skeleton").unwrap();
    assert_eq!(report.outcome, Some(BattleOutcome::Victory));
    assert_hp(&harness, "Warrior", 0);
    assert_logged(&harness, "Skeleton has died.");
    assert_logged(&harness, "Warrior has died.");

    // Skeleton: avg 4 + 10 / 10
    let awards: Vec<&String> = report.log.iter().filter(|l| l.contains("gains")).collect();
    assert_eq!(awards, vec!["Cleric gains 5 XP."]);
    assert_eq!(harness.find("Cleric").unwrap().xp, 5);
    assert_eq!(harness.find("Warrior").unwrap().xp, 0);
}

#[test]
fn test_xp_awarded_once_per_kill() {
    let mut harness = TestHarness::skirmish(
        &[HeroClass::Rogue, HeroClass::Warrior],
        &[MonsterKind::Skeleton, MonsterKind::Skeleton],
    );
    harness.hero_uses("backstab", "Skeleton 1").unwrap();
    assert_eq!(harness.find("Rogue").unwrap().xp, 5);
    assert_eq!(harness.find("Warrior").unwrap().xp, 5);

    // Another action doesn't award the dead skeleton again
    harness.hero_uses("fight", "Skeleton 2").unwrap();
    assert_eq!(harness.find("Rogue").unwrap().xp, 5);
    assert_eq!(harness.find("Warrior").unwrap().xp, 5);
}

#[test]
fn test_big_kill_levels_twice() {
    let mut dragon = Combatant::monster(MonsterKind::RedDragon, 1);
    dragon.hp = 2;
    // Rogue and Red Dragon share speed 8
    let mut harness = TestHarness::new(vec![Combatant::hero(HeroClass::Rogue, 1)], vec![dragon]);
    assert_eq!(harness.current(), Some("Rogue"));

    // Strength 7 minus mitigation 5
    harness.hero_uses("fight", "Red Dragon").unwrap();
    assert_outcome(&harness, BattleOutcome::Victory);
    assert_logged(&harness, "Rogue gains 46 XP.");
    assert_logged(&harness, "Rogue reaches level 2!");
    assert_logged(&harness, "Rogue reaches level 3!");

    let rogue = harness.find("Rogue").unwrap();
    assert_eq!(rogue.level, 3);
    assert_eq!(rogue.xp, 16);
    assert_eq!(rogue.hp, rogue.maxhp);
}

#[test]
fn test_fallen_heroes_take_no_turns() {
    let mut fallen = Combatant::hero(HeroClass::Rogue, 1);
    fallen.hp = 0;
    let harness = TestHarness::new(
        vec![fallen, Combatant::hero(HeroClass::Cleric, 1)],
        vec![Combatant::monster(MonsterKind::Skeleton, 1)],
    );
    let order: Vec<&str> = harness
        .battle
        .initiative()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(order, vec!["Cleric", "Skeleton"]);
}

#[test]
fn test_monsters_never_target_fallen_heroes() {
    for seed in 0..200 {
        let mut fallen = Combatant::hero(HeroClass::Rogue, 1);
        fallen.hp = 0;
        let mut harness = TestHarness::with_seed(
            vec![fallen, Combatant::hero(HeroClass::Warrior, 1)],
            vec![Combatant::monster(MonsterKind::Orc, 1)],
            seed,
        );

        while harness.battle.is_over().is_none() {
            if !harness.battle.is_monster_turn() {
                harness.hero_uses("fight", "Orc").unwrap();
                continue;
            }
            let report = harness.monster_turn().unwrap();
            for event in &report.events {
                let hit_fallen = match event {
                    BattleEvent::AbilityUsed { target, .. } => target.as_deref() == Some("Rogue"),
                    BattleEvent::Damaged { target, .. } => target == "Rogue",
                    _ => false,
                };
                assert!(!hit_fallen, "seed {seed}: monster targeted the fallen Rogue: {event:?}");
            }
        }
        assert_hp(&harness, "Rogue", 0);
    }
}
