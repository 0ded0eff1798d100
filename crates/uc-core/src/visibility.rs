//! Fog-of-war tracking.
//!
//! Accumulates the floor cells the player has seen on the current level.
//! The set only grows while a level is active; it is cleared wholesale
//! when a new level is generated (levels are never cached, so there is
//! nothing to restore).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dungeon::Level;
use crate::grid::Cell;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisibilityTracker {
    seen: HashSet<Cell>,
    reveal_all: bool,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every floor cell within a square neighborhood of `center` as
    /// seen, clipped to the grid. Rock is never recorded individually;
    /// the minimap draws a wall tile once an adjacent floor cell is seen.
    pub fn reveal(&mut self, center: Cell, radius: i32, level: &Level) {
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                let cell = center.offset(dx, dy);
                if level.is_floor(cell) {
                    self.seen.insert(cell);
                }
            }
        }
    }

    pub fn is_revealed(&self, cell: Cell) -> bool {
        self.reveal_all || self.seen.contains(&cell)
    }

    /// Toggle the debug full-map mode. The underlying seen set is kept,
    /// so switching the mode off restores the real fog.
    pub fn set_reveal_all(&mut self, on: bool) {
        self.reveal_all = on;
    }

    pub fn reveal_all(&self) -> bool {
        self.reveal_all
    }

    /// Forget everything. Called on every level transition.
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
