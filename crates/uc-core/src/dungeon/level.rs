//! Level structure: obstacle grid plus sparse special-tile sets.
//!
//! The floor is the complement of the obstacle set within the grid, so the
//! two always partition the level exactly. Everything else is a sparse
//! overlay keyed by `Cell`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, in_bounds};

use super::tiles::{TrapKind, Treasure};

/// A generated dungeon level.
///
/// Levels are rebuilt from the layout seed on every visit; nothing here
/// outlives a level transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Depth of this level, 1 at the dungeon entrance.
    pub depth: u32,

    /// Edge length of the square grid.
    pub size: i32,

    /// Cells that are solid rock. Floor is everything else in bounds.
    pub obstacles: HashSet<Cell>,

    /// Floor cells carved as part of a room (as opposed to a corridor).
    pub room_floor: HashSet<Cell>,

    /// Stairs leading toward the surface.
    pub stairs_up: Cell,

    /// Stairs leading deeper.
    pub stairs_down: Cell,

    /// Cell inside the seed room where the player starts on depth 1.
    pub entry: Cell,

    /// Wandering monsters by cell.
    pub monsters: HashMap<Cell, String>,

    /// Unopened chests by cell.
    pub treasures: HashMap<Cell, Treasure>,

    /// Armed traps by cell. One-shot: resolved traps are removed.
    pub traps: HashMap<Cell, TrapKind>,

    /// Knee-deep water.
    pub water: HashSet<Cell>,

    /// Fields that suppress spellcasting.
    pub antimagic: HashSet<Cell>,

    /// Magical flame extinguishers.
    pub extinguishers: HashSet<Cell>,

    /// Chutes that drop the player one level down. Room floor only.
    pub chutes: HashSet<Cell>,

    /// Teleporters that fling the player across the level. Room floor only.
    pub teleporters: HashSet<Cell>,

    /// Rotator plates that spin the player to a random facing.
    pub rotators: HashSet<Cell>,

    /// Wall studs. Decorative minimap markers with no effect.
    pub studs: HashSet<Cell>,
}

impl Level {
    /// Create a level of the given size with every cell solid rock.
    /// Generation carves floor out of this.
    pub fn solid(depth: u32, size: i32) -> Self {
        let mut obstacles = HashSet::with_capacity((size * size) as usize);
        for x in 0..size {
            for y in 0..size {
                obstacles.insert(Cell::new(x, y));
            }
        }
        Self {
            depth,
            size,
            obstacles,
            room_floor: HashSet::new(),
            stairs_up: Cell::default(),
            stairs_down: Cell::default(),
            entry: Cell::default(),
            monsters: HashMap::new(),
            treasures: HashMap::new(),
            traps: HashMap::new(),
            water: HashSet::new(),
            antimagic: HashSet::new(),
            extinguishers: HashSet::new(),
            chutes: HashSet::new(),
            teleporters: HashSet::new(),
            rotators: HashSet::new(),
            studs: HashSet::new(),
        }
    }

    /// Check that a cell lies inside the grid.
    pub const fn in_bounds(&self, cell: Cell) -> bool {
        in_bounds(cell, self.size)
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// Floor means in bounds and not rock.
    pub fn is_floor(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.obstacles.contains(&cell)
    }

    /// Wall test for the first-person view: rock blocks, and so does
    /// anything beyond the grid edge (the dungeon is always enclosed).
    pub fn is_wall_at(&self, cell: Cell) -> bool {
        !self.in_bounds(cell) || self.obstacles.contains(&cell)
    }

    /// Carve a cell out of the rock.
    pub fn carve(&mut self, cell: Cell) {
        self.obstacles.remove(&cell);
    }

    /// All floor cells in scan order.
    pub fn floor_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::new();
        for x in 0..self.size {
            for y in 0..self.size {
                let cell = Cell::new(x, y);
                if !self.obstacles.contains(&cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// True if any special-tile set claims this cell. Used by generation
    /// to keep payloads from stacking.
    pub fn has_special(&self, cell: Cell) -> bool {
        self.monsters.contains_key(&cell)
            || self.treasures.contains_key(&cell)
            || self.traps.contains_key(&cell)
            || self.water.contains(&cell)
            || self.antimagic.contains(&cell)
            || self.extinguishers.contains(&cell)
            || self.chutes.contains(&cell)
            || self.teleporters.contains(&cell)
            || self.rotators.contains(&cell)
            || self.studs.contains(&cell)
    }
}
