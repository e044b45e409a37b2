//! QA tests for runs of several battles and the headless interface.

use battle_core::headless::{HeadlessConfig, HeadlessError, HeadlessGame};
use battle_core::{
    BattleEvent, BattleOutcome, Combatant, HeroClass, RunSession, SessionConfig, SessionError,
};

/// Fight every battle with `fight` on the first living monster.
fn play_out(session: &mut RunSession) -> BattleOutcome {
    let battle = session.battle_mut().expect("battle should be running");
    while battle.is_over().is_none() {
        if battle.is_monster_turn() {
            battle.advance_monster_turn().unwrap();
        } else {
            let target = battle.monsters().find(|m| m.is_alive()).unwrap().id;
            battle.execute_command("fight", target).unwrap();
        }
    }
    session.finish_battle().unwrap()
}

fn full_session(seed: u64) -> RunSession {
    let mut session = RunSession::new(SessionConfig::new().with_seed(seed));
    for class in HeroClass::all() {
        session.recruit(*class).unwrap();
    }
    session
}

#[test]
fn test_run_continues_until_defeat() {
    let mut session = full_session(9);
    let mut outcomes = Vec::new();

    while !session.is_run_over() && outcomes.len() < 50 {
        session.start_battle().unwrap();
        outcomes.push(play_out(&mut session));
        assert_eq!(session.party().len(), 4);
    }

    let victories = outcomes.iter().filter(|o| **o == BattleOutcome::Victory).count();
    assert_eq!(session.victories() as usize, victories);
    if session.is_run_over() {
        assert_eq!(outcomes.last(), Some(&BattleOutcome::Defeat));
        assert_eq!(session.start_battle().unwrap_err(), SessionError::RunOver);

        session.new_run();
        assert_eq!(session.victories(), 0);
        assert!(session.party().is_empty());
    }
}

#[test]
fn test_same_seed_same_run() {
    let run = |seed| {
        let mut session = full_session(seed);
        session.start_battle().unwrap();
        let monsters: Vec<String> = session
            .battle()
            .unwrap()
            .monsters()
            .map(|m| m.name.clone())
            .collect();
        let outcome = play_out(&mut session);
        let hp: Vec<i32> = session.party().iter().map(|h| h.hp).collect();
        (monsters, outcome, hp)
    };
    assert_eq!(run(21), run(21));
}

#[test]
fn test_encounters_scale_with_party_level() {
    let mut session = RunSession::new(SessionConfig::new().with_seed(4).with_party_size(1));
    session.recruit(HeroClass::Warrior).unwrap();
    let battle = session.start_battle().unwrap();
    assert!(battle.monsters().all(|m| m.level == 2));
}

#[test]
fn test_battle_log_serializes() {
    let mut session = full_session(5);
    session.start_battle().unwrap();
    play_out_until_first_report(&mut session);

    let battle = session.battle().unwrap();
    let json = serde_json::to_string(battle.history()).unwrap();
    let events: Vec<BattleEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(events, battle.history());
    assert!(matches!(events[0], BattleEvent::Encounter { .. }));

    let snapshot = serde_json::to_value(&battle.participants()[0]).unwrap();
    assert_eq!(snapshot["name"], "Warrior");
    let hero: Combatant = serde_json::from_value(snapshot).unwrap();
    assert_eq!(hero.hero_class(), Some(HeroClass::Warrior));
}

fn play_out_until_first_report(session: &mut RunSession) {
    let battle = session.battle_mut().unwrap();
    if battle.is_monster_turn() {
        battle.advance_monster_turn().unwrap();
    } else {
        let target = battle.monsters().next().unwrap().id;
        battle.execute_command("fight", target).unwrap();
    }
}

// =============================================================================
// Headless interface
// =============================================================================

#[test]
fn test_headless_recruit_and_fight() {
    let mut game = HeadlessGame::new(HeadlessConfig::new().with_party_size(2).with_seed(8)).unwrap();
    assert_eq!(
        game.fight().unwrap_err(),
        HeadlessError::Session(SessionError::PartyIncomplete { missing: 2 })
    );

    game.recruit(HeroClass::Warrior).unwrap();
    let lines = game.recruit(HeroClass::Cleric).unwrap();
    assert_eq!(lines.last().unwrap(), "The party is ready. Type #fight to begin.");

    let lines = game.fight().unwrap();
    assert!(lines[0].starts_with("Monsters appear: "));
    assert!(game.in_battle());

    let status = game.status();
    assert_eq!(status[0], "Victories: 0");
    assert!(status[1].starts_with("  1. Warrior (level 1)"));
    assert!(status[2].starts_with("  2. Cleric (level 1)"));
}

#[test]
fn test_headless_plays_a_whole_run() {
    let mut game = HeadlessGame::new(HeadlessConfig::quick_start().with_seed(13)).unwrap();
    let mut battles = 0;

    while !game.session().is_run_over() && battles < 20 {
        game.fight().unwrap();
        battles += 1;
        while let Some(battle) = game.session().battle() {
            let hero_count = battle.heroes().count();
            let target = battle
                .participants()
                .iter()
                .position(|c| c.is_monster() && c.is_alive())
                .unwrap();
            assert!(target >= hero_count);
            game.use_ability("fight", target + 1).unwrap();
        }
    }

    assert!(!game.in_battle());
    if game.session().is_run_over() {
        let lines = game.new_run().unwrap();
        assert_eq!(lines, vec!["A new run begins."]);
        assert!(game.session().is_party_complete());
        assert_eq!(game.victories(), 0);
    }
}

#[test]
fn test_headless_rejects_bad_target() {
    let mut game = HeadlessGame::new(HeadlessConfig::quick_start().with_seed(2)).unwrap();
    game.fight().unwrap();
    assert_eq!(
        game.use_ability("fight", 99).unwrap_err(),
        HeadlessError::NoSuchTarget(99)
    );
    assert!(game.session().battle().unwrap().is_hero_turn());
}
