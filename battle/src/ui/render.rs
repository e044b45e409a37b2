//! Render orchestration for the battle TUI

use battle_core::{AbilityCost, HeroClass, MAX_PARTY_SIZE};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, HeroInput, Screen};
use crate::ui::layout::{centered_rect_fixed, BattleLayout};
use crate::ui::widgets::{CombatLogWidget, InitiativeWidget, MonsterPanelWidget, PartyPanelWidget};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match app.screen {
        Screen::PartyCreation => render_party_creation(frame, app, area),
        Screen::Battle => render_battle(frame, app, area),
        Screen::Victory | Screen::Defeat => {
            render_battle(frame, app, area);
            render_outcome_dialog(frame, app, area);
        }
    }
}

fn render_party_creation(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                " Recruit {} heroes ",
                app.session.config().party_size.min(MAX_PARTY_SIZE)
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, class) in HeroClass::all().iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}) ", i + 1), Style::default().add_modifier(Modifier::DIM)),
            Span::styled(class.name(), app.theme.hero_style().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(format!("     {}", class.description())));
        lines.push(Line::from(""));
    }
    if let Some(message) = app.status_message() {
        lines.push(Line::from(Span::styled(message.to_string(), app.theme.error_style())));
    }
    lines.push(Line::from(Span::styled(
        "  q to quit",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(" New Party ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        columns[0],
    );

    let heroes = app.heroes();
    frame.render_widget(PartyPanelWidget::new(&heroes, &app.theme), columns[1]);
}

fn render_battle(frame: &mut Frame, app: &App, area: Rect) {
    let Some(battle) = app.session.battle() else {
        // Between battles the log is all there is to show
        frame.render_widget(
            CombatLogWidget::new(&app.log, &app.theme).scroll(app.log_scroll),
            area,
        );
        return;
    };

    let monsters: Vec<_> = battle.monsters().collect();
    let heroes: Vec<_> = battle.heroes().collect();
    let order = battle.initiative();
    let current = battle.current_attacker().map(|c| c.name.as_str());

    let layout = BattleLayout::calculate(area, monsters.len());

    render_title_bar(frame, app, layout.title_area);
    frame.render_widget(
        MonsterPanelWidget::new(&monsters, &app.theme).current(current),
        layout.monster_area,
    );
    frame.render_widget(InitiativeWidget::new(&order, &app.theme), layout.initiative_area);
    frame.render_widget(
        CombatLogWidget::new(&app.log, &app.theme)
            .scroll(app.log_scroll)
            .focused(!app.scroll_locked_to_bottom),
        layout.log_area,
    );
    frame.render_widget(
        PartyPanelWidget::new(&heroes, &app.theme)
            .current(current)
            .focused(app.is_hero_turn()),
        layout.party_area,
    );
    render_prompt(frame, app, layout.prompt_area);
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let turns = app.session.battle().map(|b| b.turns()).unwrap_or(0);
    let title = format!(
        " Battle {} | Turn {} | Victories: {} ",
        app.battles_fought(),
        turns + 1,
        app.session.victories()
    );

    let line = Line::from(Span::styled(
        title,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// The bottom bar: ability choices, target keys or whose turn it is.
fn render_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.session.battle().and_then(|b| b.current_attacker());

    let mut spans = Vec::new();
    match (current, app.hero_input) {
        (Some(hero), HeroInput::ChoosingAbility) if hero.is_hero() => {
            spans.push(Span::styled(
                format!("{}: ", hero.name),
                app.theme.initiative_style(true, true),
            ));
            for (i, ability) in hero.abilities.iter().enumerate() {
                let cost = match ability.cost(hero) {
                    AbilityCost::Free => String::new(),
                    AbilityCost::Mp(mp) => format!(" ({mp} MP)"),
                    AbilityCost::Hp(hp) => format!(" ({hp} HP)"),
                };
                spans.push(Span::styled(
                    format!("{}", i + 1),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(format!(" {}{cost}  ", ability.title())));
            }
        }
        (Some(hero), HeroInput::ChoosingTarget(ability)) if hero.is_hero() => {
            spans.push(Span::styled(
                format!("{} > {}: ", hero.name, ability.title()),
                app.theme.initiative_style(true, true),
            ));
            spans.push(Span::raw("target 1-9 for monsters, a-d for heroes, Esc to cancel"));
        }
        (Some(monster), _) => {
            spans.push(Span::styled(
                format!("{} is acting...", monster.name),
                app.theme.monster_style(),
            ));
        }
        (None, _) => {}
    }

    if let Some(message) = app.status_message() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(message.to_string(), app.theme.error_style()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(app.is_hero_turn()));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_outcome_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(44, 7, area);
    frame.render_widget(Clear, popup_area);

    let (title, color, body, hint) = match app.screen {
        Screen::Victory => (
            " Victory ",
            Color::LightGreen,
            format!("Victories this run: {}", app.session.victories()),
            "Enter: next battle   q: quit",
        ),
        _ => (
            " Defeat ",
            Color::LightRed,
            format!("Run over after {} victories.", app.session.victories()),
            "Enter: new run   q: quit",
        ),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(body, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().add_modifier(Modifier::DIM))),
    ];

    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(ratatui::layout::Alignment::Center),
        popup_area,
    );
}
