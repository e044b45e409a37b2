//! Headless game interface for programmatic use.
//!
//! This wraps a [`RunSession`] in a line-oriented API for scripted runs,
//! automated testing and the binary's `--headless` mode. Monster turns are
//! played automatically; every call returns the log lines it produced.
//!
//! # Example
//!
//! ```
//! use battle_core::headless::{HeadlessConfig, HeadlessGame};
//!
//! let config = HeadlessConfig::quick_start().with_seed(7);
//! let mut game = HeadlessGame::new(config).unwrap();
//!
//! for line in game.fight().unwrap() {
//!     println!("{line}");
//! }
//! for line in game.status() {
//!     println!("{line}");
//! }
//! ```

use thiserror::Error;

use crate::battle::Battle;
use crate::class_data::HeroClass;
use crate::combatant::Combatant;
use crate::error::BattleError;
use crate::events::BattleOutcome;
use crate::session::{RunSession, SessionConfig, SessionError, MAX_PARTY_SIZE};

/// Errors surfaced by headless commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("No target numbered {0}")]
    NoSuchTarget(usize),
}

/// Configuration for a headless run.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Heroes recruited before the first command.
    pub party: Vec<HeroClass>,
    pub seed: Option<u64>,
    pub party_size: usize,
}

impl HeadlessConfig {
    /// Start with an empty party of four.
    pub fn new() -> Self {
        Self {
            party: Vec::new(),
            seed: None,
            party_size: MAX_PARTY_SIZE,
        }
    }

    /// One hero of every class, ready to fight.
    pub fn quick_start() -> Self {
        Self::new().with_party(HeroClass::all().to_vec())
    }

    /// Recruit these classes up front.
    pub fn with_party(mut self, party: Vec<HeroClass>) -> Self {
        self.party = party;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_party_size(mut self, size: usize) -> Self {
        self.party_size = size;
        self
    }

    fn session_config(&self) -> SessionConfig {
        let config = SessionConfig::new().with_party_size(self.party_size);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A run driven by text commands.
pub struct HeadlessGame {
    session: RunSession,
    config: HeadlessConfig,
}

impl HeadlessGame {
    pub fn new(config: HeadlessConfig) -> Result<Self, HeadlessError> {
        let mut game = Self {
            session: RunSession::new(config.session_config()),
            config,
        };
        game.recruit_preset()?;
        Ok(game)
    }

    pub fn session(&self) -> &RunSession {
        &self.session
    }

    pub fn in_battle(&self) -> bool {
        self.session.battle().is_some()
    }

    pub fn victories(&self) -> u32 {
        self.session.victories()
    }

    /// Add a hero to the party.
    pub fn recruit(&mut self, class: HeroClass) -> Result<Vec<String>, HeadlessError> {
        let hero = self.session.recruit(class)?;
        let mut lines = vec![format!("{} joins the party.", hero.name)];
        if self.session.is_party_complete() {
            lines.push("The party is ready. Type #fight to begin.".to_string());
        }
        Ok(lines)
    }

    /// Start the next battle and play monster turns up to the first hero turn.
    pub fn fight(&mut self) -> Result<Vec<String>, HeadlessError> {
        let battle = self.session.start_battle()?;
        let mut lines = battle.take_log();
        self.settle(&mut lines)?;
        Ok(lines)
    }

    /// Perform `ability` for the current hero against target number `target`.
    ///
    /// Targets are numbered from 1 in the order `#status` lists them.
    pub fn use_ability(&mut self, ability: &str, target: usize) -> Result<Vec<String>, HeadlessError> {
        let battle = self.session.battle_mut().ok_or(SessionError::NoBattle)?;
        let target_id = target
            .checked_sub(1)
            .and_then(|index| battle.participants().get(index))
            .map(|combatant| combatant.id)
            .ok_or(HeadlessError::NoSuchTarget(target))?;

        let report = battle.execute_command(ability, target_id)?;
        let mut lines = report.log;
        self.settle(&mut lines)?;
        Ok(lines)
    }

    /// Drop everything and recruit the configured party again.
    pub fn new_run(&mut self) -> Result<Vec<String>, HeadlessError> {
        self.session.new_run();
        self.recruit_preset()?;
        Ok(vec!["A new run begins.".to_string()])
    }

    /// Party, battle and streak summary.
    pub fn status(&self) -> Vec<String> {
        let mut lines = vec![format!("Victories: {}", self.session.victories())];
        if self.session.is_run_over() {
            lines.push("The party has fallen. Type #new to start a new run.".to_string());
        }

        match self.session.battle() {
            Some(battle) => {
                for (number, combatant) in battle.participants().iter().enumerate() {
                    lines.push(format!("  {}. {}", number + 1, describe(combatant)));
                }
                if let Some(attacker) = battle.current_attacker() {
                    lines.push(format!("Turn: {}", attacker.name));
                }
            }
            None => {
                lines.push(format!(
                    "Party ({}/{}):",
                    self.session.party().len(),
                    self.session.config().party_size
                ));
                for hero in self.session.party() {
                    lines.push(format!("  {}", describe(hero)));
                }
            }
        }
        lines
    }

    fn recruit_preset(&mut self) -> Result<(), HeadlessError> {
        for class in self.config.party.clone() {
            self.session.recruit(class)?;
        }
        Ok(())
    }

    /// Play monster turns until a hero must act, then close a finished battle.
    fn settle(&mut self, lines: &mut Vec<String>) -> Result<(), HeadlessError> {
        let Some(battle) = self.session.battle_mut() else {
            return Ok(());
        };
        while battle.is_monster_turn() {
            let report = battle.advance_monster_turn()?;
            lines.extend(report.log);
        }

        if battle.is_over().is_none() {
            lines.extend(turn_prompt(battle));
            return Ok(());
        }

        match self.session.finish_battle()? {
            BattleOutcome::Victory => {
                lines.push(format!("Victories this run: {}", self.session.victories()));
                lines.push("Type #fight for the next battle.".to_string());
            }
            BattleOutcome::Defeat => {
                lines.push(format!("Run over after {} victories.", self.session.victories()));
                lines.push("Type #new to start a new run.".to_string());
            }
        }
        Ok(())
    }
}

fn turn_prompt(battle: &Battle) -> Option<String> {
    let hero = battle.current_attacker()?;
    let abilities: Vec<&str> = hero.abilities.iter().map(|a| a.name()).collect();
    Some(format!("{}'s turn. Abilities: {}", hero.name, abilities.join(", ")))
}

fn describe(combatant: &Combatant) -> String {
    if combatant.is_dead() {
        return format!("{} (level {}) DEAD", combatant.name, combatant.level);
    }
    if combatant.is_hero() {
        format!(
            "{} (level {}) HP {}/{} MP {}/{} XP {}/{}",
            combatant.name,
            combatant.level,
            combatant.hp,
            combatant.maxhp,
            combatant.mp,
            combatant.maxmp,
            combatant.xp,
            combatant.xp_for_next_level()
        )
    } else {
        format!(
            "{} (level {}) HP {}/{}",
            combatant.name, combatant.level, combatant.hp, combatant.maxhp
        )
    }
}
