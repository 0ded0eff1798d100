//! uc-core: Dungeon exploration engine for Undercroft
//!
//! This crate contains all game logic with no terminal or I/O dependencies
//! beyond the ledger snapshot. It is designed to be pure and testable: the
//! session owns the level and player state, renderers produce backend-agnostic
//! scene descriptions, and every external concern (party stats, sprites,
//! message display) goes through a narrow trait.

pub mod dungeon;
pub mod effects;
pub mod party;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod visibility;

mod consts;
mod grid;
mod rng;

pub use consts::*;
pub use grid::{Cell, Facing, Step, in_bounds};
pub use rng::GameRng;
pub use session::{DungeonSession, PlayerState, Redraw, TransitionKind};
