//! Main application state and logic

use battle_core::{
    AbilityId, BattleOutcome, CombatantId, HeroClass, RunSession, TurnReport,
};

use crate::ui::theme::GameTheme;
use crate::ui::widgets::combat_log::{LogItem, LogKind};

/// Ticks a monster waits before acting, so its turn can be read.
pub const MONSTER_TURN_TICKS: u8 = 5;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Picking classes until the party is full
    PartyCreation,
    Battle,
    /// Victory dialog over the battle screen
    Victory,
    /// Defeat dialog over the battle screen
    Defeat,
}

/// What the current hero is being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroInput {
    ChoosingAbility,
    ChoosingTarget(AbilityId),
}

/// Main application state
pub struct App {
    pub session: RunSession,
    pub screen: Screen,
    pub hero_input: HeroInput,

    // UI state
    pub theme: GameTheme,

    // Combat log display
    pub log: Vec<LogItem>,
    pub log_scroll: usize,
    pub scroll_locked_to_bottom: bool,

    // Status
    status_message: Option<String>,

    monster_delay: u8,
    battles_fought: u32,
}

impl App {
    /// Create a new application around a session
    pub fn new(session: RunSession) -> Self {
        let mut app = Self {
            session,
            screen: Screen::PartyCreation,
            hero_input: HeroInput::ChoosingAbility,
            theme: GameTheme::default(),
            log: Vec::new(),
            log_scroll: 0,
            scroll_locked_to_bottom: true,
            status_message: None,
            monster_delay: MONSTER_TURN_TICKS,
            battles_fought: 0,
        };

        app.add_log(
            "Recruit your party with keys 1-4, or press q to quit.".to_string(),
            LogKind::System,
        );
        if app.session.is_party_complete() {
            app.start_battle();
        }
        app
    }

    pub fn battles_fought(&self) -> u32 {
        self.battles_fought
    }

    /// Add a log entry
    pub fn add_log(&mut self, content: String, kind: LogKind) {
        self.log.push(LogItem { content, kind });
        if self.scroll_locked_to_bottom {
            self.scroll_to_bottom();
        }
    }

    /// Scroll log to bottom and lock to bottom
    pub fn scroll_to_bottom(&mut self) {
        // The widget caps this to the real maximum
        self.log_scroll = usize::MAX / 2;
        self.scroll_locked_to_bottom = true;
    }

    pub fn scroll_up(&mut self, amount: usize) {
        let max_scroll = self.log.len();
        self.log_scroll = self.log_scroll.min(max_scroll).saturating_sub(amount);
        self.scroll_locked_to_bottom = false;
    }

    pub fn scroll_down(&mut self, amount: usize) {
        let max_scroll = self.log.len();
        self.log_scroll = self.log_scroll.min(max_scroll).saturating_add(amount);
        if self.log_scroll >= max_scroll {
            self.scroll_to_bottom();
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Recruit the class at `index` in the class list.
    pub fn recruit(&mut self, index: usize) {
        let Some(class) = HeroClass::all().get(index).copied() else {
            return;
        };
        match self.session.recruit(class) {
            Ok(hero) => {
                let line = format!("{} joins the party.", hero.name);
                self.add_log(line, LogKind::System);
                self.clear_status();
            }
            Err(e) => self.set_status(e.to_string()),
        }

        if self.session.is_party_complete() {
            self.start_battle();
        }
    }

    /// Generate the next encounter and switch to the battle screen.
    pub fn start_battle(&mut self) {
        let lines = match self.session.start_battle() {
            Ok(battle) => battle.take_log(),
            Err(e) => {
                self.set_status(e.to_string());
                return;
            }
        };

        self.battles_fought += 1;
        self.screen = Screen::Battle;
        self.hero_input = HeroInput::ChoosingAbility;
        self.monster_delay = MONSTER_TURN_TICKS;
        self.clear_status();
        for line in lines {
            self.add_log(line, LogKind::System);
        }
    }

    /// Abilities of the hero whose turn it is.
    pub fn current_abilities(&self) -> Vec<AbilityId> {
        self.session
            .battle()
            .and_then(|battle| battle.current_attacker())
            .filter(|attacker| attacker.is_hero())
            .map(|hero| hero.abilities.clone())
            .unwrap_or_default()
    }

    /// Pick the ability at `index` for the current hero.
    pub fn select_ability(&mut self, index: usize) {
        if !self.is_hero_turn() {
            return;
        }
        if let Some(ability) = self.current_abilities().get(index).copied() {
            self.hero_input = HeroInput::ChoosingTarget(ability);
            self.clear_status();
        }
    }

    /// Back out of target selection.
    pub fn cancel_selection(&mut self) {
        self.hero_input = HeroInput::ChoosingAbility;
    }

    /// Resolve a target key: `1`-`9` for monsters, `a`-`d` for heroes.
    pub fn target_for_key(&self, key: char) -> Option<CombatantId> {
        let battle = self.session.battle()?;
        if let Some(digit) = key.to_digit(10) {
            let index = (digit as usize).checked_sub(1)?;
            return battle.monsters().nth(index).map(|m| m.id);
        }
        let index = ('a'..='d').position(|letter| letter == key)?;
        battle.heroes().nth(index).map(|h| h.id)
    }

    /// Perform the chosen ability on the target behind `key`.
    pub fn select_target(&mut self, key: char) {
        let HeroInput::ChoosingTarget(ability) = self.hero_input else {
            return;
        };
        let Some(target) = self.target_for_key(key) else {
            self.set_status(format!("No target on key '{key}'"));
            return;
        };
        let Some(battle) = self.session.battle_mut() else {
            return;
        };

        let result = battle.execute_command(ability.name(), target);
        self.hero_input = HeroInput::ChoosingAbility;
        match result {
            Ok(report) => {
                self.clear_status();
                self.record_turn(report, LogKind::Hero);
            }
            Err(e) => {
                tracing::debug!(error = %e, "command rejected");
                self.set_status(e.to_string());
                self.add_log(e.to_string(), LogKind::Error);
            }
        }
    }

    pub fn is_hero_turn(&self) -> bool {
        self.screen == Screen::Battle && self.session.battle().is_some_and(|b| b.is_hero_turn())
    }

    pub fn is_monster_turn(&self) -> bool {
        self.screen == Screen::Battle
            && self.session.battle().is_some_and(|b| b.is_monster_turn())
    }

    /// Advance timers; monsters act when their delay runs out.
    pub fn tick(&mut self) {
        if !self.is_monster_turn() {
            self.monster_delay = MONSTER_TURN_TICKS;
            return;
        }
        self.monster_delay = self.monster_delay.saturating_sub(1);
        if self.monster_delay > 0 {
            return;
        }
        self.monster_delay = MONSTER_TURN_TICKS;

        let Some(battle) = self.session.battle_mut() else {
            return;
        };
        match battle.advance_monster_turn() {
            Ok(report) => self.record_turn(report, LogKind::Monster),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    fn record_turn(&mut self, report: TurnReport, kind: LogKind) {
        for line in report.log {
            self.add_log(line, kind);
        }
        if let Some(outcome) = report.outcome {
            self.end_battle(outcome);
        }
    }

    fn end_battle(&mut self, outcome: BattleOutcome) {
        match self.session.finish_battle() {
            Ok(_) => {}
            Err(e) => {
                self.set_status(e.to_string());
                return;
            }
        }
        self.screen = match outcome {
            BattleOutcome::Victory => Screen::Victory,
            BattleOutcome::Defeat => Screen::Defeat,
        };
    }

    /// Answer the victory dialog: fight the next encounter.
    pub fn continue_run(&mut self) {
        if self.screen == Screen::Victory {
            self.start_battle();
        }
    }

    /// Answer the defeat dialog: rebuild a party from scratch.
    pub fn start_new_run(&mut self) {
        if self.screen != Screen::Defeat {
            return;
        }
        self.session.new_run();
        self.screen = Screen::PartyCreation;
        self.add_log(
            "A new run begins. Recruit your party with keys 1-4.".to_string(),
            LogKind::System,
        );
    }

    /// Heroes as they stand right now, in battle or between battles.
    pub fn heroes(&self) -> Vec<&battle_core::Combatant> {
        match self.session.battle() {
            Some(battle) => battle.heroes().collect(),
            None => self.session.party().iter().collect(),
        }
    }
}
