//! Tile art for the minimap.
//!
//! The terminal's "sprites" are glyph + color pairs. `GlyphArt` is the
//! `TileArt` provider handed to the minimap renderer; keys it declines
//! come back as flat-color fills, which is also how a genuinely missing
//! asset degrades.

use ratatui::style::Color;
use strum::{Display, EnumString, IntoEnumIterator, VariantNames};

use uc_core::render::{SpriteId, TileArt, TileKey};

/// Available graphics modes for the TUI.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames, Default,
)]
#[strum(serialize_all = "lowercase")]
pub enum GraphicsMode {
    /// Plain ASCII; decorative overlays fall back to flat color.
    Classic,
    /// Unicode glyphs for everything.
    Fancy,
    /// Detect terminal support.
    #[default]
    Auto,
}

/// Glyph registry backing `TileArt`. Sprite ids index into the table so
/// the widget can turn a scene node back into a styled character.
pub struct GlyphArt {
    glyphs: Vec<(TileKey, char, Color)>,
}

impl GlyphArt {
    pub fn new(mode: GraphicsMode) -> Self {
        let fancy = match mode {
            GraphicsMode::Classic => false,
            GraphicsMode::Fancy => true,
            GraphicsMode::Auto => supports_unicode(),
        };

        let mut glyphs = Vec::new();
        for key in TileKey::iter() {
            if let Some(glyph) = glyph_for(key, fancy) {
                glyphs.push(glyph);
            }
        }
        Self { glyphs }
    }

    /// Glyph and color for a sprite id previously handed out.
    pub fn glyph(&self, sprite: SpriteId) -> Option<(char, Color)> {
        self.glyphs
            .get(sprite.0 as usize)
            .map(|(_, ch, color)| (*ch, *color))
    }
}

impl TileArt for GlyphArt {
    fn sprite(&self, key: TileKey) -> Option<SpriteId> {
        self.glyphs
            .iter()
            .position(|(k, _, _)| *k == key)
            .map(|idx| SpriteId(idx as u32))
    }
}

/// The glyph table. Classic mode covers the structural tiles only;
/// overlays return `None` and render as fallback color blocks.
fn glyph_for(key: TileKey, fancy: bool) -> Option<(TileKey, char, Color)> {
    let fancy_glyph = match key {
        TileKey::Wall => ('▓', Color::Gray),
        TileKey::StairsUp => ('<', Color::Yellow),
        TileKey::StairsDown => ('>', Color::Yellow),
        TileKey::Chute => ('○', Color::DarkGray),
        TileKey::Monster => ('☠', Color::Red),
        TileKey::Treasure => ('▣', Color::Yellow),
        TileKey::Trap => ('^', Color::Magenta),
        TileKey::Water => ('≈', Color::Blue),
        TileKey::Antimagic => ('¤', Color::LightMagenta),
        TileKey::Teleporter => ('◊', Color::Cyan),
        TileKey::Rotator => ('↻', Color::Green),
        TileKey::Stud => ('•', Color::DarkGray),
        TileKey::Extinguisher => ('§', Color::LightRed),
    };

    if fancy {
        return Some((key, fancy_glyph.0, fancy_glyph.1));
    }

    let classic = match key {
        TileKey::Wall => Some(('#', Color::Gray)),
        TileKey::StairsUp => Some(('<', Color::Yellow)),
        TileKey::StairsDown => Some(('>', Color::Yellow)),
        TileKey::Chute => Some(('o', Color::DarkGray)),
        TileKey::Monster => Some(('M', Color::Red)),
        TileKey::Treasure => Some(('$', Color::Yellow)),
        TileKey::Trap => Some(('^', Color::Magenta)),
        // No good single ASCII character; let the fallback color show.
        TileKey::Water
        | TileKey::Antimagic
        | TileKey::Teleporter
        | TileKey::Rotator
        | TileKey::Stud
        | TileKey::Extinguisher => None,
    };
    classic.map(|(ch, color)| (key, ch, color))
}

/// Detect if the terminal supports Unicode/UTF-8.
pub fn supports_unicode() -> bool {
    for var in ["LANG", "LC_ALL", "LC_CTYPE"] {
        if let Ok(val) = std::env::var(var) {
            let upper = val.to_uppercase();
            if upper.contains("UTF-8") || upper.contains("UTF8") {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fancy_covers_every_key() {
        let art = GlyphArt::new(GraphicsMode::Fancy);
        for key in TileKey::iter() {
            let sprite = art.sprite(key).expect("fancy mode has art for all keys");
            assert!(art.glyph(sprite).is_some());
        }
    }

    #[test]
    fn test_classic_declines_overlays() {
        let art = GlyphArt::new(GraphicsMode::Classic);
        assert!(art.sprite(TileKey::Wall).is_some());
        assert!(art.sprite(TileKey::Water).is_none());
        assert!(art.sprite(TileKey::Teleporter).is_none());
    }

    #[test]
    fn test_sprite_ids_round_trip() {
        let art = GlyphArt::new(GraphicsMode::Fancy);
        let sprite = art.sprite(TileKey::Monster).unwrap();
        let (ch, color) = art.glyph(sprite).unwrap();
        assert_eq!(ch, '☠');
        assert_eq!(color, Color::Red);
    }
}
