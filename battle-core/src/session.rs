//! RunSession - a party fighting one encounter after another.
//!
//! This is the API the terminal client drives. A session owns the party
//! between battles, generates encounters from the party level and keeps the
//! victory streak until the party is wiped out.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::battle::Battle;
use crate::class_data::HeroClass;
use crate::combatant::Combatant;
use crate::encounter;
use crate::events::BattleOutcome;

/// Largest party a session allows.
pub const MAX_PARTY_SIZE: usize = 4;

/// Errors from RunSession operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("The party already has {0} heroes")]
    PartyFull(usize),

    #[error("Recruit {missing} more hero(es) before fighting")]
    PartyIncomplete { missing: usize },

    #[error("A battle is already in progress")]
    BattleInProgress,

    #[error("No battle is in progress")]
    NoBattle,

    #[error("The party has fallen - start a new run")]
    RunOver,
}

/// Configuration for a new run.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Seed for encounters and combat rolls. Entropy when unset.
    pub seed: Option<u64>,

    /// Heroes to recruit before the first battle.
    pub party_size: usize,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            seed: None,
            party_size: MAX_PARTY_SIZE,
        }
    }

    /// Make every encounter and roll reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the party size, clamped to 1..=4.
    pub fn with_party_size(mut self, size: usize) -> Self {
        self.party_size = size.clamp(1, MAX_PARTY_SIZE);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A run: party creation, then battles until defeat.
pub struct RunSession {
    config: SessionConfig,
    rng: ChaCha8Rng,
    party: Vec<Combatant>,
    battle: Option<Battle>,
    victories: u32,
    run_over: bool,
}

impl RunSession {
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            config,
            rng,
            party: Vec::new(),
            battle: None,
            victories: 0,
            run_over: false,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Add a level-1 hero of `class` to the party.
    pub fn recruit(&mut self, class: HeroClass) -> Result<&Combatant, SessionError> {
        if self.party.len() >= self.config.party_size {
            return Err(SessionError::PartyFull(self.config.party_size));
        }

        let count = self
            .party
            .iter()
            .filter(|hero| hero.hero_class() == Some(class))
            .count();
        let mut hero = Combatant::hero(class, 1);
        if count > 0 {
            hero = hero.with_name(format!("{} {}", class.name(), count + 1));
        }

        tracing::info!(class = %class, name = %hero.name, "hero recruited");
        self.party.push(hero);
        Ok(&self.party[self.party.len() - 1])
    }

    pub fn is_party_complete(&self) -> bool {
        self.party.len() >= self.config.party_size
    }

    /// Generate an encounter for the party and start fighting it.
    pub fn start_battle(&mut self) -> Result<&mut Battle, SessionError> {
        if self.run_over {
            return Err(SessionError::RunOver);
        }
        if self.battle.is_some() {
            return Err(SessionError::BattleInProgress);
        }
        if !self.is_party_complete() {
            return Err(SessionError::PartyIncomplete {
                missing: self.config.party_size - self.party.len(),
            });
        }

        let level = encounter::party_level(&self.party);
        let monsters = encounter::generate(level, &mut self.rng);
        let rng = ChaCha8Rng::seed_from_u64(self.rng.gen());
        let party = std::mem::take(&mut self.party);

        tracing::debug!(party_level = level, victories = self.victories, "starting battle");
        Ok(self.battle.insert(Battle::new(party, monsters, rng)))
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn battle_mut(&mut self) -> Option<&mut Battle> {
        self.battle.as_mut()
    }

    /// Take the party back from a finished battle and record its outcome.
    pub fn finish_battle(&mut self) -> Result<BattleOutcome, SessionError> {
        let outcome = match &self.battle {
            None => return Err(SessionError::NoBattle),
            Some(battle) => battle.is_over().ok_or(SessionError::BattleInProgress)?,
        };
        let battle = self.battle.take().ok_or(SessionError::NoBattle)?;
        self.party = battle.into_party();

        match outcome {
            BattleOutcome::Victory => self.victories += 1,
            BattleOutcome::Defeat => self.run_over = true,
        }
        tracing::info!(%outcome, victories = self.victories, "battle finished");
        Ok(outcome)
    }

    /// Drop a running battle, keeping the party as it was when it ended.
    pub fn abandon_battle(&mut self) {
        if let Some(battle) = self.battle.take() {
            tracing::debug!("battle abandoned");
            self.party = battle.into_party();
        }
    }

    /// Start over with an empty party.
    pub fn new_run(&mut self) {
        self.party.clear();
        self.battle = None;
        self.victories = 0;
        self.run_over = false;
        tracing::info!("new run");
    }

    /// Victories in the current run.
    pub fn victories(&self) -> u32 {
        self.victories
    }

    /// The party between battles. Empty while a battle holds it.
    pub fn party(&self) -> &[Combatant] {
        &self.party
    }

    pub fn is_run_over(&self) -> bool {
        self.run_over
    }
}
