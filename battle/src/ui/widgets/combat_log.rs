//! Scrolling combat log widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
};

use crate::ui::theme::GameTheme;

/// Who produced a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Hero,
    Monster,
    System,
    Error,
}

/// A single line in the combat log
#[derive(Debug, Clone)]
pub struct LogItem {
    pub content: String,
    pub kind: LogKind,
}

/// Widget for displaying the combat log
pub struct CombatLogWidget<'a> {
    items: &'a [LogItem],
    scroll: usize,
    theme: &'a GameTheme,
    focused: bool,
}

impl<'a> CombatLogWidget<'a> {
    pub fn new(items: &'a [LogItem], theme: &'a GameTheme) -> Self {
        Self {
            items,
            scroll: 0,
            theme,
            focused: false,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn style_for(&self, kind: LogKind) -> Style {
        match kind {
            LogKind::Hero => self.theme.hero_style(),
            LogKind::Monster => self.theme.monster_style(),
            LogKind::System => self.theme.system_style(),
            LogKind::Error => self.theme.error_style(),
        }
    }
}

impl Widget for CombatLogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.focused {
            " Combat Log [j/k scroll] "
        } else {
            " Combat Log "
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .items
            .iter()
            .map(|item| {
                let prefix = match item.kind {
                    LogKind::Error => "! ",
                    LogKind::System => "- ",
                    _ => "",
                };
                Line::from(Span::styled(
                    format!("{prefix}{}", item.content),
                    self.style_for(item.kind),
                ))
            })
            .collect();

        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .wrap(Wrap { trim: false })
            .render(inner, buf);

        if total_lines > visible_height {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black))
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);

            // More below
            if scroll < max_scroll {
                let hint = format!(" ↓{} more ", max_scroll - scroll);
                let hint_y = inner.y + inner.height.saturating_sub(1);
                let hint_style = Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM);
                for (i, ch) in hint.chars().enumerate() {
                    let x = inner.x + (i as u16);
                    if x < inner.x + inner.width.saturating_sub(2) {
                        buf[(x, hint_y)].set_char(ch).set_style(hint_style);
                    }
                }
            }
        }
    }
}
