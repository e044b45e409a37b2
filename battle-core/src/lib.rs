//! Turn-based party-vs-monster battle engine.
//!
//! This crate provides:
//! - Heroes and monsters with stats, HP/MP pools and family traits
//! - The ability catalog with a resolve-then-apply model
//! - Experience, leveling and monster XP values
//! - The initiative-driven turn engine with victory/defeat detection
//! - Encounter generation and a run session for the terminal client
//!
//! # Quick Start
//!
//! ```
//! use battle_core::{create_battle, Combatant, HeroClass, MonsterKind};
//!
//! let party = vec![Combatant::hero(HeroClass::Warrior, 1)];
//! let monsters = vec![Combatant::monster(MonsterKind::Orc, 1)];
//! let mut battle = create_battle(party, monsters, 42);
//!
//! while battle.is_over().is_none() {
//!     if battle.is_monster_turn() {
//!         let report = battle.advance_monster_turn().unwrap();
//!         println!("{}", report.log.join("\n"));
//!     } else {
//!         let orc = battle.monsters().find(|m| m.is_alive()).unwrap().id;
//!         let report = battle.execute_command("fight", orc).unwrap();
//!         println!("{}", report.log.join("\n"));
//!     }
//! }
//! ```

pub mod abilities;
pub mod battle;
pub mod class_data;
pub mod combatant;
pub mod encounter;
pub mod error;
pub mod events;
pub mod headless;
pub mod progression;
pub mod session;
pub mod testing;

// Primary public API
pub use abilities::{AbilityCost, AbilityId, Effect, Resolution};
pub use battle::{create_battle, Battle, BattlePhase, TurnReport};
pub use class_data::{HeroClass, MonsterFamily, MonsterKind};
pub use combatant::{Combatant, CombatantId, Stats};
pub use error::BattleError;
pub use events::{BattleEvent, BattleOutcome};
pub use headless::{HeadlessConfig, HeadlessError, HeadlessGame};
pub use session::{RunSession, SessionConfig, SessionError, MAX_PARTY_SIZE};
pub use testing::TestHarness;
