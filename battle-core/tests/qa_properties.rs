//! Property tests for combat and progression invariants.

use battle_core::battle::initiative_order;
use battle_core::{create_battle, Combatant, HeroClass, MonsterKind};
use proptest::prelude::*;

fn hero_class() -> impl Strategy<Value = HeroClass> {
    prop::sample::select(HeroClass::all().to_vec())
}

fn monster_kind() -> impl Strategy<Value = MonsterKind> {
    prop::sample::select(MonsterKind::all().to_vec())
}

fn any_combatant() -> impl Strategy<Value = Combatant> {
    prop_oneof![
        (hero_class(), 1u32..6).prop_map(|(class, level)| Combatant::hero(class, level)),
        (monster_kind(), 1u32..6).prop_map(|(kind, level)| Combatant::monster(kind, level)),
    ]
}

proptest! {
    /// Damage never pushes HP outside 0..=maxhp.
    #[test]
    fn prop_damage_keeps_hp_in_range(
        mut combatant in any_combatant(),
        hits in prop::collection::vec(0i32..200, 1..10)
    ) {
        for hit in hits {
            let before = combatant.hp;
            let lost = combatant.take_damage(hit);
            prop_assert!(combatant.hp >= 0);
            prop_assert!(combatant.hp <= combatant.maxhp);
            prop_assert_eq!(before - combatant.hp, lost);
            prop_assert!(lost <= hit);
        }
    }

    /// Healing never pushes HP outside 0..=maxhp, inverted or not.
    #[test]
    fn prop_heal_keeps_hp_in_range(
        mut combatant in any_combatant(),
        damage in 0i32..200,
        heal in 0i32..200
    ) {
        combatant.take_damage(damage);
        combatant.heal(heal);
        prop_assert!(combatant.hp >= 0);
        prop_assert!(combatant.hp <= combatant.maxhp);
    }

    /// Splitting an award gives the same hero as a single award.
    #[test]
    fn prop_xp_awards_are_associative(
        class in hero_class(),
        first in 0u32..150,
        second in 0u32..150
    ) {
        let mut split = Combatant::hero(class, 1);
        split.gain_xp(first);
        split.gain_xp(second);

        let mut single = Combatant::hero(class, 1);
        single.gain_xp(first + second);

        prop_assert_eq!(split.level, single.level);
        prop_assert_eq!(split.xp, single.xp);
        prop_assert_eq!(split.stats, single.stats);
        prop_assert_eq!(split.maxhp, single.maxhp);
        prop_assert_eq!(split.maxmp, single.maxmp);
        prop_assert!(single.xp < single.xp_for_next_level());
    }

    /// Stats never shrink when leveling.
    #[test]
    fn prop_level_up_never_lowers_stats(class in hero_class(), xp in 0u32..500) {
        let start = Combatant::hero(class, 1);
        let mut hero = start.clone();
        hero.gain_xp(xp);
        prop_assert!(hero.stats.strength >= start.stats.strength);
        prop_assert!(hero.stats.intelligence >= start.stats.intelligence);
        prop_assert!(hero.stats.constitution >= start.stats.constitution);
        prop_assert!(hero.stats.speed >= start.stats.speed);
    }

    /// A monster repeats its command queue with period equal to its length.
    #[test]
    fn prop_command_queue_is_periodic(kind in monster_kind(), offset in 0usize..10) {
        let mut monster = Combatant::monster(kind, 1);
        let period = kind.data().command_queue.len();
        for _ in 0..offset {
            monster.next_command();
        }
        let commands: Vec<_> = (0..period * 2).filter_map(|_| monster.next_command()).collect();
        prop_assert_eq!(&commands[..period], &commands[period..]);
    }

    /// Sorting an already sorted order changes nothing.
    #[test]
    fn prop_initiative_is_idempotent(
        combatants in prop::collection::vec(any_combatant(), 1..8),
        speeds in prop::collection::vec(0i32..20, 8)
    ) {
        let mut combatants = combatants;
        for (combatant, speed) in combatants.iter_mut().zip(speeds) {
            combatant.stats.speed = speed;
        }

        let order = initiative_order(&combatants);
        prop_assert_eq!(&order, &initiative_order(&combatants));

        let sorted: Vec<Combatant> = order
            .iter()
            .filter_map(|id| combatants.iter().find(|c| c.id == *id).cloned())
            .collect();
        prop_assert_eq!(initiative_order(&sorted), order.clone());

        for pair in sorted.windows(2) {
            prop_assert!(pair[0].stats.speed >= pair[1].stats.speed);
        }
    }

    /// Every battle ends when heroes only ever fight the first living monster.
    #[test]
    fn prop_battles_terminate(
        classes in prop::collection::vec(hero_class(), 1..5),
        kinds in prop::collection::vec(monster_kind(), 1..4),
        seed in any::<u64>()
    ) {
        let party = classes.iter().map(|class| Combatant::hero(*class, 1)).collect();
        let monsters = kinds.iter().map(|kind| Combatant::monster(*kind, 1)).collect();
        let mut battle = create_battle(party, monsters, seed);

        let mut turns = 0;
        while battle.is_over().is_none() {
            prop_assert!(turns < 10_000, "battle did not end");
            if battle.is_monster_turn() {
                battle.advance_monster_turn().unwrap();
            } else {
                let target = battle.monsters().find(|m| m.is_alive()).map(|m| m.id).unwrap();
                battle.execute_command("fight", target).unwrap();
            }
            for combatant in battle.participants() {
                prop_assert!(combatant.hp >= 0 && combatant.hp <= combatant.maxhp);
            }
            turns += 1;
        }
        prop_assert!(battle.current_attacker().is_none());
    }
}
