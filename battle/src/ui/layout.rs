//! Screen layout calculation

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the battle screen
pub struct BattleLayout {
    pub title_area: Rect,
    pub monster_area: Rect,
    pub initiative_area: Rect,
    pub log_area: Rect,
    pub party_area: Rect,
    pub prompt_area: Rect,
}

impl BattleLayout {
    /// Log on the left, party in a sidebar, monsters across the top.
    pub fn calculate(area: Rect, monster_count: usize) -> Self {
        let monster_height = (monster_count as u16).clamp(1, 9) + 2;

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(monster_height),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(rows[3]);

        Self {
            title_area: rows[0],
            monster_area: rows[1],
            initiative_area: rows[2],
            log_area: body[0],
            party_area: body[1],
            prompt_area: rows[4],
        }
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_small_areas() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect_fixed(50, 40, area), area);
    }

    #[test]
    fn test_monster_panel_grows_with_encounter() {
        let area = Rect::new(0, 0, 100, 40);
        let small = BattleLayout::calculate(area, 1);
        let large = BattleLayout::calculate(area, 4);
        assert_eq!(small.monster_area.height, 3);
        assert_eq!(large.monster_area.height, 6);
        assert!(large.log_area.height < small.log_area.height);
    }
}
