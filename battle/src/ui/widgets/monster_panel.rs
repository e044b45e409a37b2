//! Monster panel widget

use battle_core::Combatant;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use crate::ui::theme::GameTheme;

/// Monsters keyed `1`-`9` for targeting, each with an HP bar
pub struct MonsterPanelWidget<'a> {
    monsters: &'a [&'a Combatant],
    theme: &'a GameTheme,
    current: Option<&'a str>,
}

impl<'a> MonsterPanelWidget<'a> {
    pub fn new(monsters: &'a [&'a Combatant], theme: &'a GameTheme) -> Self {
        Self {
            monsters,
            theme,
            current: None,
        }
    }

    pub fn current(mut self, name: Option<&'a str>) -> Self {
        self.current = name;
        self
    }
}

impl Widget for MonsterPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Monsters ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.monsters
                    .iter()
                    .map(|_| Constraint::Length(1))
                    .chain(std::iter::once(Constraint::Min(0))),
            )
            .split(inner);

        for ((index, monster), row) in self.monsters.iter().enumerate().zip(rows.iter()) {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(28), Constraint::Min(10)])
                .split(*row);

            let is_current = self.current == Some(monster.name.as_str());
            let name_style = if monster.is_dead() {
                self.theme.dead_style()
            } else {
                self.theme.initiative_style(is_current, false)
            };
            let label = Line::from(vec![
                Span::styled(
                    format!("{}) ", index + 1),
                    Style::default().add_modifier(Modifier::DIM),
                ),
                Span::styled(monster.name.clone(), name_style),
                Span::styled(
                    format!(" Lv {}", monster.level),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ]);
            Paragraph::new(label).render(columns[0], buf);

            if monster.is_dead() {
                Paragraph::new(Span::styled("DEAD", self.theme.dead_style()))
                    .render(columns[1], buf);
                continue;
            }

            let ratio = monster.hp_ratio();
            Gauge::default()
                .gauge_style(Style::default().fg(self.theme.hp_color(ratio)))
                .ratio(ratio.clamp(0.0, 1.0) as f64)
                .label(format!("{}/{}", monster.hp, monster.maxhp))
                .render(columns[1], buf);
        }
    }
}
