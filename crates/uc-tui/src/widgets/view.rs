//! First-person wireframe widget.
//!
//! Draws the quad outlines of a `ViewScene` into the terminal buffer.
//! Quads arrive far to near, so near geometry overwrites far geometry
//! exactly as a painter's pass would.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use uc_core::render::{ViewQuad, ViewScene, WallFace};

use crate::theme::Theme;

pub struct ViewWidget<'a> {
    scene: &'a ViewScene,
    theme: Theme,
}

impl<'a> ViewWidget<'a> {
    pub fn new(scene: &'a ViewScene, theme: Theme) -> Self {
        Self { scene, theme }
    }

    fn face_color(&self, face: WallFace) -> Color {
        match face {
            WallFace::Floor => self.theme.view_floor,
            WallFace::Ceiling => self.theme.view_ceiling,
            WallFace::Left | WallFace::Right => self.theme.view_wall,
            WallFace::Front => self.theme.view_front,
        }
    }
}

impl Widget for ViewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" View ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_accent));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 2 || inner.height < 2 {
            return;
        }

        for quad in &self.scene.quads {
            draw_quad(buf, inner, quad, self.face_color(quad.face));
        }
    }
}

/// Draw the four edges of a quad, corners wound clockwise from the
/// top-left.
fn draw_quad(buf: &mut Buffer, area: Rect, quad: &ViewQuad, color: Color) {
    let to_cell = |(u, v): (f32, f32)| -> (i32, i32) {
        let x = area.x as f32 + u * (area.width.saturating_sub(1)) as f32;
        let y = area.y as f32 + v * (area.height.saturating_sub(1)) as f32;
        (x.round() as i32, y.round() as i32)
    };
    let pts: Vec<(i32, i32)> = quad.corners.iter().map(|c| to_cell(*c)).collect();
    for i in 0..4 {
        let (x0, y0) = pts[i];
        let (x1, y1) = pts[(i + 1) % 4];
        draw_line(buf, area, x0, y0, x1, y1, color);
    }
}

/// Bresenham over terminal cells, with a glyph picked from the segment
/// direction so corridors read as lines instead of dot clouds.
fn draw_line(buf: &mut Buffer, area: Rect, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let ch = if dy == 0 {
        '─'
    } else if dx == 0 {
        '│'
    } else if (x1 > x0) == (y1 > y0) {
        '╲'
    } else {
        '╱'
    };

    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);
    loop {
        if x >= area.x as i32 && y >= area.y as i32 && x < area.right() as i32 && y < area.bottom() as i32
        {
            buf[(x as u16, y as u16)]
                .set_char(ch)
                .set_style(Style::default().fg(color));
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line_fills_row() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        draw_line(&mut buf, area, 0, 2, 9, 2, Color::White);
        for x in 0..10u16 {
            assert_eq!(buf[(x, 2)].symbol(), "─");
        }
    }

    #[test]
    fn test_line_clips_to_area() {
        let area = Rect::new(0, 0, 4, 4);
        let mut buf = Buffer::empty(area);
        // Endpoint far outside the pane must not panic.
        draw_line(&mut buf, area, 0, 0, 20, 20, Color::White);
        assert_eq!(buf[(3, 3)].symbol(), "╲");
    }
}
