//! Event handling for the battle TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, HeroInput, Screen};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.scroll_up(3);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.scroll_down(3);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    match app.screen {
        Screen::PartyCreation => handle_party_creation(app, key),
        Screen::Battle => handle_battle(app, key),
        Screen::Victory | Screen::Defeat => handle_outcome_dialog(app, key),
    }
}

fn handle_party_creation(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => EventResult::Quit,
        KeyCode::Char(c @ '1'..='4') => {
            app.recruit(c as usize - '1' as usize);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_battle(app: &mut App, key: KeyEvent) -> EventResult {
    // Log navigation works on anyone's turn
    match key.code {
        KeyCode::Char('q') => return EventResult::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_down(1);
            return EventResult::NeedsRedraw;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_up(1);
            return EventResult::NeedsRedraw;
        }
        KeyCode::PageUp => {
            app.scroll_up(10);
            return EventResult::NeedsRedraw;
        }
        KeyCode::PageDown => {
            app.scroll_down(10);
            return EventResult::NeedsRedraw;
        }
        KeyCode::Char('G') => {
            app.scroll_to_bottom();
            return EventResult::NeedsRedraw;
        }
        _ => {}
    }

    if !app.is_hero_turn() {
        return EventResult::Continue;
    }

    match (app.hero_input, key.code) {
        (HeroInput::ChoosingAbility, KeyCode::Char(c @ '1'..='9')) => {
            app.select_ability(c as usize - '1' as usize);
            EventResult::NeedsRedraw
        }
        (HeroInput::ChoosingTarget(_), KeyCode::Esc) => {
            app.cancel_selection();
            EventResult::NeedsRedraw
        }
        (HeroInput::ChoosingTarget(_), KeyCode::Char(c)) => {
            app.select_target(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_outcome_dialog(app: &mut App, key: KeyEvent) -> EventResult {
    match (app.screen, key.code) {
        (_, KeyCode::Char('q')) | (_, KeyCode::Char('n')) => EventResult::Quit,
        (Screen::Victory, KeyCode::Enter | KeyCode::Char('y')) => {
            app.continue_run();
            EventResult::NeedsRedraw
        }
        (Screen::Defeat, KeyCode::Enter | KeyCode::Char('y')) => {
            app.start_new_run();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
