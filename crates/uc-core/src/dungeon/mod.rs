//! Dungeon levels: data model and procedural generation.

mod generation;
mod level;
mod tiles;

pub use generation::{GenConfig, Room, generate};
pub use level::Level;
pub use tiles::{MONSTER_NAMES, Treasure, TreasureKind, TrapKind};
