//! Minimap compositing.
//!
//! Builds the top-down scene back to front: walls, stairs, special
//! tiles, fog over unrevealed floor, the fading breadcrumb trail, and
//! finally the player marker. Every layer except the marker honors the
//! fog of war.

use std::collections::{HashMap, HashSet};

use crate::dungeon::Level;
use crate::grid::Cell;
use crate::session::PlayerState;
use crate::visibility::VisibilityTracker;

use super::{Color, MapNode, MapScene, TileArt, TileKey};

/// Fog opacity over unrevealed floor.
const FOG_OPACITY: f32 = 0.75;

/// Opacity of the newest breadcrumb; older dots fade toward zero.
const TRAIL_OPACITY: f32 = 0.6;

const FOG_COLOR: Color = Color::rgb(20, 20, 28);
const TRAIL_COLOR: Color = Color::rgb(120, 200, 250);

/// Composite a minimap frame from the level, player and fog state.
/// `trail` is the breadcrumb list, oldest first.
pub fn render_minimap(
    level: &Level,
    player: &PlayerState,
    visibility: &VisibilityTracker,
    trail: &[Cell],
    art: &dyn TileArt,
) -> MapScene {
    let mut scene = MapScene {
        size: level.size,
        nodes: Vec::new(),
    };

    // Walls. Rock is never in the visited set, so a wall shows once any
    // neighboring floor cell has been revealed.
    for cell in sorted(&level.obstacles) {
        if wall_visible(level, visibility, cell) {
            push_tile(&mut scene, art, TileKey::Wall, cell);
        }
    }

    push_if_seen(&mut scene, art, visibility, TileKey::StairsUp, level.stairs_up);
    push_if_seen(&mut scene, art, visibility, TileKey::StairsDown, level.stairs_down);

    push_set(&mut scene, art, visibility, TileKey::Chute, &level.chutes);
    push_keys(&mut scene, art, visibility, TileKey::Monster, &level.monsters);
    push_keys(&mut scene, art, visibility, TileKey::Treasure, &level.treasures);
    push_keys(&mut scene, art, visibility, TileKey::Trap, &level.traps);

    // Overlay tiles.
    push_set(&mut scene, art, visibility, TileKey::Antimagic, &level.antimagic);
    push_set(&mut scene, art, visibility, TileKey::Rotator, &level.rotators);
    push_set(&mut scene, art, visibility, TileKey::Water, &level.water);
    push_set(&mut scene, art, visibility, TileKey::Teleporter, &level.teleporters);
    push_set(&mut scene, art, visibility, TileKey::Stud, &level.studs);
    push_set(
        &mut scene,
        art,
        visibility,
        TileKey::Extinguisher,
        &level.extinguishers,
    );

    // Fog over unrevealed floor; reveal-all drops the layer entirely.
    if !visibility.reveal_all() {
        for cell in level.floor_cells() {
            if !visibility.is_revealed(cell) {
                scene.nodes.push(MapNode::Fill {
                    cell,
                    color: FOG_COLOR,
                    opacity: FOG_OPACITY,
                });
            }
        }
    }

    // Breadcrumbs fade with age: the oldest dot is the faintest.
    let len = trail.len();
    for (i, &cell) in trail.iter().enumerate() {
        let age_frac = (i + 1) as f32 / len as f32;
        scene.nodes.push(MapNode::Fill {
            cell,
            color: TRAIL_COLOR,
            opacity: TRAIL_OPACITY * age_frac,
        });
    }

    // The player marker is drawn unconditionally, fog or not.
    scene.nodes.push(MapNode::Marker {
        cell: player.pos,
        facing: player.facing,
    });

    scene
}

/// Deterministic iteration over a hash set of cells.
fn sorted(cells: &HashSet<Cell>) -> Vec<Cell> {
    let mut v: Vec<Cell> = cells.iter().copied().collect();
    v.sort();
    v
}

/// A wall cell is drawn once any of its eight neighbors is revealed
/// floor (or the reveal-all override is on).
fn wall_visible(level: &Level, visibility: &VisibilityTracker, cell: Cell) -> bool {
    if visibility.reveal_all() {
        return true;
    }
    for dx in -1..=1 {
        for dy in -1..=1 {
            if (dx, dy) == (0, 0) {
                continue;
            }
            let neighbor = cell.offset(dx, dy);
            if level.is_floor(neighbor) && visibility.is_revealed(neighbor) {
                return true;
            }
        }
    }
    false
}

fn push_tile(scene: &mut MapScene, art: &dyn TileArt, key: TileKey, cell: Cell) {
    let node = match art.sprite(key) {
        Some(sprite) => MapNode::Sprite { cell, sprite },
        None => MapNode::Fill {
            cell,
            color: key.fallback_color(),
            opacity: 1.0,
        },
    };
    scene.nodes.push(node);
}

fn push_if_seen(
    scene: &mut MapScene,
    art: &dyn TileArt,
    visibility: &VisibilityTracker,
    key: TileKey,
    cell: Cell,
) {
    if visibility.is_revealed(cell) {
        push_tile(scene, art, key, cell);
    }
}

fn push_set(
    scene: &mut MapScene,
    art: &dyn TileArt,
    visibility: &VisibilityTracker,
    key: TileKey,
    cells: &HashSet<Cell>,
) {
    for cell in sorted(cells) {
        push_if_seen(scene, art, visibility, key, cell);
    }
}

fn push_keys<V>(
    scene: &mut MapScene,
    art: &dyn TileArt,
    visibility: &VisibilityTracker,
    key: TileKey,
    cells: &HashMap<Cell, V>,
) {
    let mut v: Vec<Cell> = cells.keys().copied().collect();
    v.sort();
    for cell in v {
        push_if_seen(scene, art, visibility, key, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{GenConfig, generate};
    use crate::grid::Facing;
    use crate::render::{NoArt, SpriteId};
    use crate::{REVEAL_RADIUS, render::TileArt};

    fn scene_for(reveal_all: bool) -> MapScene {
        let level = generate(1, &GenConfig::default());
        let player = PlayerState {
            pos: level.entry,
            facing: Facing::North,
            depth: 1,
        };
        let mut visibility = VisibilityTracker::new();
        visibility.reveal(level.entry, REVEAL_RADIUS, &level);
        visibility.set_reveal_all(reveal_all);
        render_minimap(&level, &player, &visibility, &[], &NoArt)
    }

    #[test]
    fn test_marker_is_last_node() {
        let scene = scene_for(false);
        match scene.nodes.last() {
            Some(MapNode::Marker { facing, .. }) => assert_eq!(*facing, Facing::North),
            other => panic!("expected trailing player marker, got {other:?}"),
        }
    }

    #[test]
    fn test_fog_layer_dropped_under_reveal_all() {
        let foggy = scene_for(false);
        let clear = scene_for(true);

        let fog_nodes = |s: &MapScene| {
            s.nodes
                .iter()
                .filter(|n| matches!(n, MapNode::Fill { color, .. } if *color == FOG_COLOR))
                .count()
        };
        assert!(fog_nodes(&foggy) > 0);
        assert_eq!(fog_nodes(&clear), 0);
    }

    #[test]
    fn test_reveal_all_shows_every_wall() {
        let level = generate(1, &GenConfig::default());
        let clear = scene_for(true);
        // Under reveal-all every obstacle produces a node; under fresh
        // fog only the entry room's surroundings do.
        let foggy = scene_for(false);
        assert!(clear.nodes.len() > foggy.nodes.len());
        assert!(clear.nodes.len() > level.obstacles.len());
    }

    #[test]
    fn test_trail_fades_with_age() {
        let level = generate(1, &GenConfig::default());
        let player = PlayerState {
            pos: level.entry,
            facing: Facing::East,
            depth: 1,
        };
        let mut visibility = VisibilityTracker::new();
        visibility.set_reveal_all(true);
        let trail = vec![Cell::new(2, 2), Cell::new(2, 3), Cell::new(2, 4)];

        let scene = render_minimap(&level, &player, &visibility, &trail, &NoArt);

        let dots: Vec<f32> = scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                MapNode::Fill { color, opacity, .. } if *color == TRAIL_COLOR => Some(*opacity),
                _ => None,
            })
            .collect();
        assert_eq!(dots.len(), 3);
        assert!(dots[0] < dots[1] && dots[1] < dots[2]);
    }

    #[test]
    fn test_sprites_used_when_art_exists() {
        struct WallArt;
        impl TileArt for WallArt {
            fn sprite(&self, key: TileKey) -> Option<SpriteId> {
                (key == TileKey::Wall).then_some(SpriteId(7))
            }
        }

        let level = generate(1, &GenConfig::default());
        let player = PlayerState {
            pos: level.entry,
            facing: Facing::North,
            depth: 1,
        };
        let mut visibility = VisibilityTracker::new();
        visibility.set_reveal_all(true);

        let scene = render_minimap(&level, &player, &visibility, &[], &WallArt);
        assert!(scene
            .nodes
            .iter()
            .any(|n| matches!(n, MapNode::Sprite { sprite, .. } if sprite.0 == 7)));
    }
}
