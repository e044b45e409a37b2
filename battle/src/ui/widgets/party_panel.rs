//! Party panel widget for the sidebar

use battle_core::Combatant;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use crate::ui::theme::GameTheme;

/// Rows used by one hero: header, HP and MP.
const HERO_ROWS: u16 = 3;

/// Heroes with their pools, keyed `a`-`d` for targeting
pub struct PartyPanelWidget<'a> {
    heroes: &'a [&'a Combatant],
    theme: &'a GameTheme,
    current: Option<&'a str>,
    focused: bool,
}

impl<'a> PartyPanelWidget<'a> {
    pub fn new(heroes: &'a [&'a Combatant], theme: &'a GameTheme) -> Self {
        Self {
            heroes,
            theme,
            current: None,
            focused: false,
        }
    }

    /// Highlight the hero with this name.
    pub fn current(mut self, name: Option<&'a str>) -> Self {
        self.current = name;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for PartyPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(" Party ", self.theme.title_style(self.focused)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.heroes
                    .iter()
                    .map(|_| Constraint::Length(HERO_ROWS))
                    .chain(std::iter::once(Constraint::Min(0))),
            )
            .split(inner);

        for ((hero, key), row) in self.heroes.iter().zip('a'..='d').zip(rows.iter()) {
            let is_current = self.current == Some(hero.name.as_str());
            render_hero(hero, key, is_current, self.theme, *row, buf);
        }
    }
}

fn render_hero(
    hero: &Combatant,
    key: char,
    is_current: bool,
    theme: &GameTheme,
    area: Rect,
    buf: &mut Buffer,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let name_style = if hero.is_dead() {
        theme.dead_style()
    } else if is_current {
        theme.initiative_style(true, true)
    } else {
        Style::default().fg(theme.foreground)
    };
    let header = Line::from(vec![
        Span::styled(format!("{key}) "), Style::default().add_modifier(Modifier::DIM)),
        Span::styled(hero.name.clone(), name_style),
        Span::styled(
            format!("  Lv {} ({}/{} xp)", hero.level, hero.xp, hero.xp_for_next_level()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    Paragraph::new(header).render(chunks[0], buf);

    if hero.is_dead() {
        Paragraph::new(Span::styled("   DEAD", theme.dead_style())).render(chunks[1], buf);
        return;
    }

    let hp_ratio = hero.hp_ratio();
    Gauge::default()
        .gauge_style(Style::default().fg(theme.hp_color(hp_ratio)))
        .ratio(hp_ratio.clamp(0.0, 1.0) as f64)
        .label(format!("HP: {}/{}", hero.hp, hero.maxhp))
        .render(chunks[1], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(theme.mp))
        .ratio(hero.mp_ratio().clamp(0.0, 1.0) as f64)
        .label(format!("MP: {}/{}", hero.mp, hero.maxmp))
        .render(chunks[2], buf);
}
