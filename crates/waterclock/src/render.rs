//! Drawing the field into terminal lines.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use waterclock_core::{Cell, Direction, HEIGHT, Species, WIDTH};
use waterclock_engine::Engine;

/// Background colour of open cells.
pub const BACKGROUND_COLOR: Color = Color::Rgb(0xC0, 0xC0, 0xC0);

/// Colour of wall cells.
pub const WALL_COLOR: Color = Color::Rgb(0x20, 0x20, 0x20);

/// Terminal colour of a liquid species.
pub fn species_color(species: Species) -> Color {
    match species {
        Species::Pale => Color::Rgb(0x84, 0xC2, 0xDA),
        Species::Mist => Color::Rgb(0x81, 0xB8, 0xCF),
        Species::Azure => Color::Rgb(0x4C, 0xA4, 0xC4),
        Species::Indigo => Color::Rgb(0x3B, 0x6E, 0xA8),
        Species::Coral => Color::Rgb(0xF3, 0x8C, 0x79),
    }
}

/// Colour shown at `(x, y)`.
///
/// With `trail` on, a cell that just emptied keeps the colour of the liquid
/// that was last there, which hides single-frame flicker as droplets move.
pub fn cell_color(engine: &Engine, x: usize, y: usize, trail: bool) -> Color {
    match engine.field().get(x, y) {
        Cell::Wall => WALL_COLOR,
        Cell::Liquid(species) => species_color(species),
        Cell::Background => {
            let recent = trail.then(|| engine.history().last_liquid(x, y)).flatten();
            recent.map_or(BACKGROUND_COLOR, species_color)
        }
    }
}

/// Where the field sits on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldView {
    /// Terminal column of the left edge.
    pub x: u16,
    /// Terminal row of the top edge.
    pub y: u16,
    /// Characters per cell horizontally.
    pub cell_width: u16,
}

impl FieldView {
    /// Centre the field horizontally in a region `width` columns wide at
    /// `(x, y)`, using two characters per cell when there is room.
    pub fn centered(x: u16, y: u16, width: u16) -> Self {
        let cell_width = if width as usize >= WIDTH * 2 { 2 } else { 1 };
        let used = (WIDTH as u16).saturating_mul(cell_width);
        Self {
            x: x + width.saturating_sub(used) / 2,
            y,
            cell_width,
        }
    }

    /// Field cell under a terminal position. May lie outside the field.
    pub fn cell_at(&self, column: u16, row: u16) -> (isize, isize) {
        let dx = column as isize - self.x as isize;
        let x = dx.div_euclid(self.cell_width.max(1) as isize);
        (x, row as isize - self.y as isize)
    }

    /// Lines for the visible field.
    pub fn lines(&self, engine: &Engine, trail: bool) -> Vec<Line<'static>> {
        let glyph = "█".repeat(self.cell_width.max(1) as usize);
        (0..HEIGHT)
            .map(|y| {
                let spans: Vec<Span> = (0..WIDTH)
                    .map(|x| {
                        let color = cell_color(engine, x, y, trail);
                        Span::styled(glyph.clone(), Style::new().fg(color))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Direction of a drag between two cells, along the dominant axis.
pub fn drag_direction(from: (isize, isize), to: (isize, isize)) -> Option<Direction> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    if dx == 0 && dy == 0 {
        None
    } else if dx.abs() >= dy.abs() {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use waterclock_core::EngineConfig;

    #[test]
    fn test_species_colors_are_distinct() {
        let mut colors: Vec<Color> = Species::ALL.iter().map(|&s| species_color(s)).collect();
        colors.push(WALL_COLOR);
        colors.push(BACKGROUND_COLOR);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_view_centers_field() {
        let wide = FieldView::centered(0, 3, 200);
        assert_eq!(wide.cell_width, 2);
        assert_eq!(wide.x, (200 - 2 * WIDTH as u16) / 2);
        assert_eq!(wide.cell_at(wide.x, 3), (0, 0));
        assert_eq!(wide.cell_at(wide.x + 3, 5), (1, 2));
        assert_eq!(wide.cell_at(wide.x - 1, 3), (-1, 0));

        let narrow = FieldView::centered(0, 0, 60);
        assert_eq!(narrow.cell_width, 1);
        assert_eq!(narrow.cell_at(narrow.x + 7, 1), (7, 1));
    }

    #[test]
    fn test_lines_cover_field() {
        let now = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let engine = Engine::new(now, &EngineConfig::default(), 1);
        let view = FieldView::centered(0, 0, 200);
        let lines = view.lines(&engine, true);
        assert_eq!(lines.len(), HEIGHT);
        assert!(lines.iter().all(|line| line.width() == 2 * WIDTH));
    }

    #[test]
    fn test_cell_color_uses_material() {
        let now = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let engine = Engine::new(now, &EngineConfig::default(), 1);
        assert_eq!(cell_color(&engine, 0, 0, true), BACKGROUND_COLOR);
        assert_eq!(cell_color(&engine, 0, HEIGHT - 1, true), WALL_COLOR);
    }

    #[test]
    fn test_drag_direction() {
        assert_eq!(drag_direction((5, 5), (5, 5)), None);
        assert_eq!(drag_direction((5, 5), (7, 6)), Some(Direction::Right));
        assert_eq!(drag_direction((5, 5), (4, 5)), Some(Direction::Left));
        assert_eq!(drag_direction((5, 5), (5, 2)), Some(Direction::Up));
        assert_eq!(drag_direction((5, 5), (6, 8)), Some(Direction::Down));
    }
}
