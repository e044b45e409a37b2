//! Initiative strip showing who acts next

use battle_core::Combatant;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::GameTheme;

pub struct InitiativeWidget<'a> {
    order: &'a [&'a Combatant],
    theme: &'a GameTheme,
}

impl<'a> InitiativeWidget<'a> {
    /// `order` starts with the combatant whose turn it is.
    pub fn new(order: &'a [&'a Combatant], theme: &'a GameTheme) -> Self {
        Self { order, theme }
    }
}

impl Widget for InitiativeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Initiative ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let mut spans = Vec::new();
        for (i, combatant) in self.order.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" > ", Style::default().fg(self.theme.border)));
            }
            spans.push(Span::styled(
                combatant.name.clone(),
                self.theme.initiative_style(i == 0, combatant.is_hero()),
            ));
        }

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}
