//! Grid coordinates, facings and relative movement.
//!
//! `Cell` is the key type of every tile set. It has structural equality and
//! hashing so sets and maps behave identically across platforms; nothing in
//! the engine relies on tuple hashing.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// An integer coordinate pair on the level grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell displaced by `(dx, dy)`. May land outside the grid.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Check that a cell lies inside a `size` x `size` grid.
pub const fn in_bounds(cell: Cell, size: i32) -> bool {
    cell.x >= 0 && cell.y >= 0 && cell.x < size && cell.y < size
}

/// Absolute facing of the player. The declaration order is the rotation
/// ring: turning right steps forward through it, turning left steps back.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum Facing {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

/// A movement request relative to the current facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Step {
    Forward,
    Backward,
    StepLeft,
    StepRight,
}

impl Facing {
    const RING: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Facing after turning `step` quarter turns (+1 right, -1 left).
    pub fn rotated(self, step: i32) -> Facing {
        let idx = (self as i32 + step).rem_euclid(4);
        Self::RING[idx as usize]
    }

    /// Grid delta for one step straight ahead. North is negative y.
    pub const fn forward_delta(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::East => (1, 0),
            Facing::South => (0, 1),
            Facing::West => (-1, 0),
        }
    }

    /// Grid delta for a relative movement request. This table and the
    /// wireframe side-wall tests must stay in agreement: `StepLeft` is the
    /// direction the left-hand wall is looked up in.
    pub const fn step_delta(self, step: Step) -> (i32, i32) {
        let (fx, fy) = self.forward_delta();
        match step {
            Step::Forward => (fx, fy),
            Step::Backward => (-fx, -fy),
            // Left of (fx, fy) is the forward vector rotated a quarter
            // turn counter-clockwise in screen coordinates.
            Step::StepLeft => (fy, -fx),
            Step::StepRight => (-fy, fx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_rotation_ring() {
        assert_eq!(Facing::North.rotated(1), Facing::East);
        assert_eq!(Facing::North.rotated(-1), Facing::West);
        assert_eq!(Facing::West.rotated(1), Facing::North);
        for facing in Facing::iter() {
            assert_eq!(facing.rotated(4), facing);
            assert_eq!(facing.rotated(-4), facing);
            assert_eq!(facing.rotated(2), facing.rotated(-2));
        }
    }

    #[test]
    fn test_forward_deltas() {
        assert_eq!(Facing::North.step_delta(Step::Forward), (0, -1));
        assert_eq!(Facing::East.step_delta(Step::Forward), (1, 0));
        assert_eq!(Facing::South.step_delta(Step::Forward), (0, 1));
        assert_eq!(Facing::West.step_delta(Step::Forward), (-1, 0));
    }

    #[test]
    fn test_relative_deltas_rotate_with_facing() {
        // Stepping left while facing north goes west; facing east it goes
        // north, and so on around the ring.
        assert_eq!(Facing::North.step_delta(Step::StepLeft), (-1, 0));
        assert_eq!(Facing::East.step_delta(Step::StepLeft), (0, -1));
        assert_eq!(Facing::South.step_delta(Step::StepLeft), (1, 0));
        assert_eq!(Facing::West.step_delta(Step::StepLeft), (0, 1));

        for facing in Facing::iter() {
            let (fx, fy) = facing.step_delta(Step::Forward);
            assert_eq!(facing.step_delta(Step::Backward), (-fx, -fy));
            let (lx, ly) = facing.step_delta(Step::StepLeft);
            assert_eq!(facing.step_delta(Step::StepRight), (-lx, -ly));
        }
    }

    #[test]
    fn test_bounds() {
        assert!(in_bounds(Cell::new(0, 0), 24));
        assert!(in_bounds(Cell::new(23, 23), 24));
        assert!(!in_bounds(Cell::new(24, 0), 24));
        assert!(!in_bounds(Cell::new(0, -1), 24));
    }
}
