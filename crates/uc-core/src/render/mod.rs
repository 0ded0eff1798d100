//! Renderer-agnostic scene building.
//!
//! The minimap and the first-person view are both produced as plain data
//! (colored cells, sprite references, viewport-space quads) that any
//! host backend can draw. Scenes are rebuilt from session state on every
//! redraw request and never persisted.

mod minimap;
mod wireframe;

pub use minimap::render_minimap;
pub use wireframe::project_view;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::grid::{Cell, Facing};

/// A flat RGB color. Opacity travels separately where a layer needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Opaque handle to host-side tile art, handed back unchanged in scene
/// nodes so the host can blit whatever it registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// Sprite lookup provided by the host. A `None` means "no asset": the
/// renderer substitutes the tile's deterministic flat color and carries
/// on — a missing bitmap can never break a frame.
pub trait TileArt {
    fn sprite(&self, key: TileKey) -> Option<SpriteId>;
}

/// Host with no art at all; everything renders as flat color.
pub struct NoArt;

impl TileArt for NoArt {
    fn sprite(&self, _key: TileKey) -> Option<SpriteId> {
        None
    }
}

/// One bitmap key per drawable tile category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TileKey {
    Wall,
    StairsUp,
    StairsDown,
    Chute,
    Monster,
    Treasure,
    Trap,
    Water,
    Antimagic,
    Teleporter,
    Rotator,
    Stud,
    Extinguisher,
}

impl TileKey {
    /// Flat fallback color used when the host has no sprite for this
    /// key. Fixed per key so frames stay stable across redraws.
    pub const fn fallback_color(self) -> Color {
        match self {
            TileKey::Wall => Color::rgb(96, 84, 72),
            TileKey::StairsUp => Color::rgb(220, 220, 120),
            TileKey::StairsDown => Color::rgb(190, 150, 60),
            TileKey::Chute => Color::rgb(40, 40, 40),
            TileKey::Monster => Color::rgb(200, 60, 60),
            TileKey::Treasure => Color::rgb(230, 190, 60),
            TileKey::Trap => Color::rgb(160, 60, 160),
            TileKey::Water => Color::rgb(60, 110, 220),
            TileKey::Antimagic => Color::rgb(130, 80, 200),
            TileKey::Teleporter => Color::rgb(80, 200, 200),
            TileKey::Rotator => Color::rgb(90, 170, 90),
            TileKey::Stud => Color::rgb(140, 140, 140),
            TileKey::Extinguisher => Color::rgb(200, 120, 80),
        }
    }
}

/// One minimap draw command. Nodes are emitted back to front; the host
/// draws them in order.
#[derive(Debug, Clone, PartialEq)]
pub enum MapNode {
    /// Host-registered art at a cell.
    Sprite { cell: Cell, sprite: SpriteId },
    /// Flat-color cell: tile fallback, fog, or breadcrumb dot.
    Fill {
        cell: Cell,
        color: Color,
        opacity: f32,
    },
    /// The player arrowhead, rotated to the current facing. Always the
    /// last node.
    Marker { cell: Cell, facing: Facing },
}

/// A composited minimap frame.
#[derive(Debug, Clone, Default)]
pub struct MapScene {
    pub size: i32,
    pub nodes: Vec<MapNode>,
}

/// Which face of the corridor a view quad belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum WallFace {
    Floor,
    Ceiling,
    Left,
    Right,
    Front,
}

/// A quad in unit viewport coordinates (x right, y down, both in
/// `[0, 1]`), wound clockwise from the top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewQuad {
    pub face: WallFace,
    pub corners: [(f32, f32); 4],
}

/// A first-person wireframe frame, quads ordered far to near.
#[derive(Debug, Clone, Default)]
pub struct ViewScene {
    pub quads: Vec<ViewQuad>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_fallback_colors_are_distinct_enough() {
        // Every key has its own fallback so a sprite-less board is still
        // readable.
        let colors: Vec<Color> = TileKey::iter().map(|k| k.fallback_color()).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_no_art_always_falls_back() {
        for key in TileKey::iter() {
            assert!(NoArt.sprite(key).is_none());
        }
    }
}
