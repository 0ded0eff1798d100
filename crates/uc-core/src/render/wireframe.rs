//! First-person corridor projection.
//!
//! A pseudo-3D line drawing built by scanning a few cells ahead of the
//! player along its facing. Each scan depth has a perspective rectangle
//! inset toward the vanishing point; floor and ceiling trapezoids bridge
//! consecutive rectangles, and wall quads appear wherever the ahead/left/
//! right tests hit rock. Cells beyond the grid edge count as walls, so
//! the dungeon always looks enclosed.

use crate::VIEW_DEPTH;
use crate::dungeon::Level;
use crate::grid::{Cell, Step};
use crate::session::PlayerState;

use super::{ViewQuad, ViewScene, WallFace};

/// Inset of the perspective rectangle at `depth`: each step halves the
/// remaining distance to the vanishing point at (0.5, 0.5).
fn inset(depth: i32) -> f32 {
    0.5 * (1.0 - 0.5f32.powi(depth))
}

/// Perspective rectangle at `depth` as (left, top, right, bottom).
fn frame(depth: i32) -> (f32, f32, f32, f32) {
    let m = inset(depth);
    (m, m, 1.0 - m, 1.0 - m)
}

/// Wall test at the cell `depth` steps ahead, displaced one step to the
/// given side relative to the facing. This reuses the movement delta
/// table, so "left" here is exactly where a `StepLeft` would go.
fn wall_at_side(level: &Level, player: &PlayerState, depth: i32, side: Step) -> bool {
    let (fx, fy) = player.facing.forward_delta();
    let (sx, sy) = player.facing.step_delta(side);
    let cell = player.pos.offset(fx * depth + sx, fy * depth + sy);
    level.is_wall_at(cell)
}

fn wall_ahead(level: &Level, player: &PlayerState, depth: i32) -> bool {
    let (fx, fy) = player.facing.forward_delta();
    level.is_wall_at(player.pos.offset(fx * depth, fy * depth))
}

/// Project the forward view. Quads are emitted far to near (painter's
/// order); within a depth, floor and ceiling come before wall faces.
pub fn project_view(level: &Level, player: &PlayerState) -> ViewScene {
    let mut scene = ViewScene::default();

    for depth in (0..=VIEW_DEPTH).rev() {
        let (nl, nt, nr, nb) = frame(depth);
        let (fl, ft, fr, fb) = frame(depth + 1);

        // Floor and ceiling trapezoids between this depth and the next.
        scene.quads.push(ViewQuad {
            face: WallFace::Floor,
            corners: [(nl, nb), (nr, nb), (fr, fb), (fl, fb)],
        });
        scene.quads.push(ViewQuad {
            face: WallFace::Ceiling,
            corners: [(nl, nt), (nr, nt), (fr, ft), (fl, ft)],
        });

        if wall_at_side(level, player, depth, Step::StepLeft) {
            scene.quads.push(ViewQuad {
                face: WallFace::Left,
                corners: [(nl, nt), (fl, ft), (fl, fb), (nl, nb)],
            });
        }
        if wall_at_side(level, player, depth, Step::StepRight) {
            scene.quads.push(ViewQuad {
                face: WallFace::Right,
                corners: [(nr, nt), (fr, ft), (fr, fb), (nr, nb)],
            });
        }
        if depth > 0 && wall_ahead(level, player, depth) {
            scene.quads.push(ViewQuad {
                face: WallFace::Front,
                corners: [(nl, nt), (nr, nt), (nr, nb), (nl, nb)],
            });
        }
    }

    scene
}
