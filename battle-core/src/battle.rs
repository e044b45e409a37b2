//! Turn engine for a single encounter.
//!
//! A [`Battle`] owns every participant for its lifetime. The shell drives it
//! one turn at a time: [`Battle::advance_monster_turn`] when a monster is at
//! the front of the initiative order, [`Battle::execute_command`] when a
//! hero is. Both return a [`TurnReport`] with the log produced by that turn.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};

use crate::abilities::{self, AbilityId, Resolution};
use crate::combatant::{Combatant, CombatantId};
use crate::error::BattleError;
use crate::events::{BattleEvent, BattleOutcome};

/// Where the turn state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    AwaitingTurn,
    MonsterActing,
    HeroActing,
    PostActionCleanup,
    Victory,
    Defeat,
}

impl BattlePhase {
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self {
            BattlePhase::Victory => Some(BattleOutcome::Victory),
            BattlePhase::Defeat => Some(BattleOutcome::Defeat),
            _ => None,
        }
    }
}

/// Everything that happened during one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Log lines, in order.
    pub log: Vec<String>,
    pub events: Vec<BattleEvent>,
    /// Set when this turn ended the battle.
    pub outcome: Option<BattleOutcome>,
}

impl TurnReport {
    fn new(events: Vec<BattleEvent>, outcome: Option<BattleOutcome>) -> Self {
        Self {
            log: events.iter().map(ToString::to_string).collect(),
            events,
            outcome,
        }
    }
}

/// Create a battle with an RNG seeded from `seed`.
pub fn create_battle(party: Vec<Combatant>, monsters: Vec<Combatant>, seed: u64) -> Battle {
    Battle::new(party, monsters, ChaCha8Rng::seed_from_u64(seed))
}

/// Initiative order for `combatants`: the living ones, fastest first.
///
/// Ties keep their order in the input.
pub fn initiative_order(combatants: &[Combatant]) -> Vec<CombatantId> {
    let mut living: Vec<&Combatant> = combatants.iter().filter(|c| c.is_alive()).collect();
    living.sort_by_key(|c| Reverse(c.stats.speed));
    living.into_iter().map(|c| c.id).collect()
}

/// A party fighting a group of monsters.
#[derive(Debug, Clone)]
pub struct Battle {
    /// Heroes first, then monsters. Dead combatants stay here.
    participants: Vec<Combatant>,
    initiative: VecDeque<CombatantId>,
    phase: BattlePhase,
    rng: ChaCha8Rng,
    /// Events not yet handed out in a report.
    pending: Vec<BattleEvent>,
    history: Vec<BattleEvent>,
    turns: u32,
}

impl Battle {
    /// Start a battle. Initiative is fixed here from the participants' speed.
    pub fn new(party: Vec<Combatant>, monsters: Vec<Combatant>, rng: ChaCha8Rng) -> Self {
        let monsters = disambiguate_names(monsters);
        let encounter = BattleEvent::Encounter {
            monsters: monsters.iter().map(|m| m.name.clone()).collect(),
        };

        let mut participants = party;
        participants.extend(monsters);
        let initiative: VecDeque<CombatantId> = initiative_order(&participants).into();

        let mut battle = Self {
            participants,
            initiative,
            phase: BattlePhase::AwaitingTurn,
            rng,
            pending: vec![encounter],
            history: Vec::new(),
            turns: 0,
        };

        tracing::info!(
            heroes = battle.heroes().count(),
            monsters = battle.monsters().count(),
            "battle started"
        );

        // A side may already be wiped out, e.g. a party with no survivors
        battle.check_outcome();
        battle
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Terminal outcome, if the battle has ended.
    pub fn is_over(&self) -> Option<BattleOutcome> {
        self.phase.outcome()
    }

    /// Combatant whose turn it is. `None` once the battle is over.
    pub fn current_attacker(&self) -> Option<&Combatant> {
        if self.is_over().is_some() {
            return None;
        }
        self.initiative.front().and_then(|id| self.combatant(*id))
    }

    pub fn is_monster_turn(&self) -> bool {
        self.current_attacker().is_some_and(Combatant::is_monster)
    }

    pub fn is_hero_turn(&self) -> bool {
        self.current_attacker().is_some_and(Combatant::is_hero)
    }

    pub fn participants(&self) -> &[Combatant] {
        &self.participants
    }

    pub fn heroes(&self) -> impl Iterator<Item = &Combatant> {
        self.participants.iter().filter(|c| c.is_hero())
    }

    pub fn monsters(&self) -> impl Iterator<Item = &Combatant> {
        self.participants.iter().filter(|c| c.is_monster())
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.participants.iter().find(|c| c.id == id)
    }

    /// Living combatants in the order they will act, starting with the current one.
    pub fn initiative(&self) -> Vec<&Combatant> {
        self.initiative
            .iter()
            .filter_map(|id| self.combatant(*id))
            .collect()
    }

    /// Every event reported so far.
    pub fn history(&self) -> &[BattleEvent] {
        &self.history
    }

    /// Completed turns.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Hand out events produced outside a turn, such as the encounter line.
    pub fn take_log(&mut self) -> Vec<String> {
        let events = std::mem::take(&mut self.pending);
        let lines = events.iter().map(ToString::to_string).collect();
        self.history.extend(events);
        lines
    }

    /// Let the monster at the front of the order act against a random living hero.
    pub fn advance_monster_turn(&mut self) -> Result<TurnReport, BattleError> {
        self.ensure_running()?;
        let actor_index = self.current_index()?;
        if !self.participants[actor_index].is_monster() {
            return Err(BattleError::invalid_command("it is not a monster's turn"));
        }

        let living_heroes: Vec<usize> = self
            .participants
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_hero() && c.is_alive())
            .map(|(index, _)| index)
            .collect();
        let target_index = *living_heroes
            .choose(&mut self.rng)
            .ok_or_else(|| BattleError::invalid_command("no hero left to attack"))?;

        let actor = &self.participants[actor_index];
        let ability = actor
            .peek_command()
            .ok_or_else(|| BattleError::invalid_command(format!("{} has no commands", actor.name)))?;

        self.transition(BattlePhase::MonsterActing);
        let resolved = abilities::resolve(
            ability,
            &self.participants[actor_index],
            &self.participants[target_index],
            &mut self.rng,
        );
        let resolution = match resolved {
            Ok(resolution) => resolution,
            Err(err) => {
                self.transition(BattlePhase::AwaitingTurn);
                return Err(err);
            }
        };
        self.participants[actor_index].next_command();

        Ok(self.perform(actor_index, target_index, resolution))
    }

    /// Perform `ability_name` for the hero whose turn it is.
    ///
    /// Every error leaves the battle unchanged and the hero still to act.
    pub fn execute_command(
        &mut self,
        ability_name: &str,
        target: CombatantId,
    ) -> Result<TurnReport, BattleError> {
        self.ensure_running()?;
        let actor_index = self.current_index()?;
        let actor = &self.participants[actor_index];
        if !actor.is_hero() {
            return Err(BattleError::invalid_command("it is not a hero's turn"));
        }

        let ability = AbilityId::from_name(ability_name)
            .filter(|ability| actor.has_ability(*ability))
            .ok_or_else(|| {
                BattleError::invalid_command(format!(
                    "{} cannot use {}",
                    actor.name,
                    ability_name.trim()
                ))
            })?;

        let target_index = self
            .participants
            .iter()
            .position(|c| c.id == target)
            .ok_or_else(|| BattleError::invalid_target(target.to_string(), "no such combatant"))?;
        let target_combatant = &self.participants[target_index];
        if target_combatant.is_dead() {
            return Err(BattleError::invalid_target(
                target_combatant.name.clone(),
                "target is already dead",
            ));
        }

        let resolution = abilities::resolve(ability, actor, target_combatant, &mut self.rng)?;
        self.transition(BattlePhase::HeroActing);
        Ok(self.perform(actor_index, target_index, resolution))
    }

    /// Hand the surviving and fallen heroes back, in party order.
    pub fn into_party(self) -> Vec<Combatant> {
        self.participants
            .into_iter()
            .filter(Combatant::is_hero)
            .collect()
    }

    fn ensure_running(&self) -> Result<(), BattleError> {
        match self.is_over() {
            Some(outcome) => Err(BattleError::invalid_command(format!(
                "the battle is over ({outcome})"
            ))),
            None => Ok(()),
        }
    }

    fn current_index(&self) -> Result<usize, BattleError> {
        self.initiative
            .front()
            .and_then(|id| self.index_of(*id))
            .ok_or_else(|| BattleError::invalid_command("nobody is left to act"))
    }

    fn index_of(&self, id: CombatantId) -> Option<usize> {
        self.participants.iter().position(|c| c.id == id)
    }

    fn transition(&mut self, phase: BattlePhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "battle phase");
        self.phase = phase;
    }

    fn perform(&mut self, actor_index: usize, target_index: usize, resolution: Resolution) -> TurnReport {
        let (actor, target) = pair_mut(&mut self.participants, actor_index, target_index);
        tracing::debug!(actor = %actor.name, ability = %resolution.ability, "turn");
        let events = resolution.apply(actor, target);
        self.pending.extend(events);

        self.cleanup();
        self.turns += 1;

        let events = std::mem::take(&mut self.pending);
        self.history.extend(events.iter().cloned());
        TurnReport::new(events, self.is_over())
    }

    /// Rotate the order, sweep the dead, award XP and check for an outcome.
    fn cleanup(&mut self) {
        self.transition(BattlePhase::PostActionCleanup);
        if let Some(front) = self.initiative.pop_front() {
            self.initiative.push_back(front);
        }

        let fallen: Vec<CombatantId> = self
            .initiative
            .iter()
            .copied()
            .filter(|id| self.combatant(*id).is_some_and(Combatant::is_dead))
            .collect();
        self.initiative.retain(|id| !fallen.contains(id));

        for id in fallen {
            let Some(dead) = self.combatant(id) else {
                continue;
            };
            let name = dead.name.clone();
            let xp = dead.is_monster().then(|| dead.xp_value());

            tracing::info!(%name, "combatant died");
            self.pending.push(BattleEvent::Died { name });
            if let Some(xp) = xp {
                self.award_xp(xp);
            }
        }

        self.check_outcome();
    }

    fn award_xp(&mut self, amount: u32) {
        for hero in self
            .participants
            .iter_mut()
            .filter(|c| c.is_hero() && c.is_alive())
        {
            self.pending.push(BattleEvent::GainedXp {
                hero: hero.name.clone(),
                amount,
            });
            for level in hero.gain_xp(amount) {
                tracing::info!(hero = %hero.name, level, "hero leveled up");
                self.pending.push(BattleEvent::LeveledUp {
                    hero: hero.name.clone(),
                    level,
                });
            }
        }
    }

    fn check_outcome(&mut self) {
        let next = if !self.monsters().any(Combatant::is_alive) {
            BattlePhase::Victory
        } else if !self.heroes().any(Combatant::is_alive) {
            BattlePhase::Defeat
        } else {
            BattlePhase::AwaitingTurn
        };

        self.transition(next);
        if let Some(outcome) = next.outcome() {
            tracing::info!(%outcome, turns = self.turns, "battle ended");
            self.initiative.clear();
            self.pending.push(BattleEvent::Ended(outcome));
        }
    }
}

/// Borrow the actor and, unless it targets itself, the target.
fn pair_mut(
    participants: &mut [Combatant],
    actor: usize,
    target: usize,
) -> (&mut Combatant, Option<&mut Combatant>) {
    if actor == target {
        return (&mut participants[actor], None);
    }
    if actor < target {
        let (left, right) = participants.split_at_mut(target);
        (&mut left[actor], Some(&mut right[0]))
    } else {
        let (left, right) = participants.split_at_mut(actor);
        (&mut right[0], Some(&mut left[target]))
    }
}

/// Number repeated monster names: two orcs become "Orc 1" and "Orc 2".
fn disambiguate_names(monsters: Vec<Combatant>) -> Vec<Combatant> {
    let mut totals: HashMap<String, usize> = HashMap::new();
    for monster in &monsters {
        *totals.entry(monster.name.clone()).or_default() += 1;
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    monsters
        .into_iter()
        .map(|monster| {
            if totals.get(&monster.name).copied().unwrap_or(0) < 2 {
                return monster;
            }
            let count = seen.entry(monster.name.clone()).or_default();
            *count += 1;
            let name = format!("{} {}", monster.name, count);
            monster.with_name(name)
        })
        .collect()
}
