//! Minimap widget.
//!
//! Replays a `MapScene` into the terminal buffer. The scene is already
//! ordered back to front, so compositing is just drawing the nodes in
//! sequence; opacity becomes shade characters.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use uc_core::render::{MapNode, MapScene};
use uc_core::{Cell, Facing};

use crate::icons::GlyphArt;
use crate::theme::Theme;

/// Widget rendering one composited minimap frame.
pub struct MinimapWidget<'a> {
    scene: &'a MapScene,
    art: &'a GlyphArt,
    theme: Theme,
}

impl<'a> MinimapWidget<'a> {
    pub fn new(scene: &'a MapScene, art: &'a GlyphArt, theme: Theme) -> Self {
        Self { scene, art, theme }
    }
}

impl Widget for MinimapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Map ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.scene.size <= 0 {
            return;
        }

        // One terminal cell per grid cell; larger maps get clipped at
        // the pane edge rather than scaled.
        let paint = |buf: &mut Buffer, cell: Cell, ch: char, color: Color| {
            if cell.x < 0 || cell.y < 0 {
                return;
            }
            let x = inner.x as i32 + cell.x;
            let y = inner.y as i32 + cell.y;
            if x < inner.right() as i32 && y < inner.bottom() as i32 {
                buf[(x as u16, y as u16)]
                    .set_char(ch)
                    .set_style(Style::default().fg(color));
            }
        };

        for node in &self.scene.nodes {
            match node {
                MapNode::Sprite { cell, sprite } => {
                    if let Some((ch, color)) = self.art.glyph(*sprite) {
                        paint(buf, *cell, ch, color);
                    }
                }
                MapNode::Fill {
                    cell,
                    color,
                    opacity,
                } => {
                    paint(
                        buf,
                        *cell,
                        shade_char(*opacity),
                        Color::Rgb(color.r, color.g, color.b),
                    );
                }
                MapNode::Marker { cell, facing } => {
                    paint(buf, *cell, facing_arrow(*facing), self.theme.map_player);
                }
            }
        }
    }
}

/// Approximate a fill's opacity with a shade block.
fn shade_char(opacity: f32) -> char {
    if opacity >= 0.95 {
        '█'
    } else if opacity >= 0.5 {
        '▒'
    } else {
        '░'
    }
}

fn facing_arrow(facing: Facing) -> char {
    match facing {
        Facing::North => '▲',
        Facing::East => '▶',
        Facing::South => '▼',
        Facing::West => '◀',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_shade_steps() {
        assert_eq!(shade_char(1.0), '█');
        assert_eq!(shade_char(0.75), '▒');
        assert_eq!(shade_char(0.2), '░');
    }

    #[test]
    fn test_arrow_per_facing() {
        let arrows: Vec<char> = Facing::iter().map(facing_arrow).collect();
        assert_eq!(arrows, vec!['▲', '▶', '▼', '◀']);
    }
}
