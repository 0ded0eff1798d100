//! Tunable constants for the dungeon engine.
//!
//! Grid size, room count and special-tile count are construction-time
//! configuration (see `GenConfig`); these are the defaults and the fixed
//! gameplay caps.

/// Default edge length of the square level grid.
pub const GRID_SIZE: i32 = 24;

/// Smallest usable grid: a 5-cell seed room plus the one-cell rock
/// margin on each side. Generation clamps smaller requests up to this.
pub const MIN_GRID_SIZE: i32 = 8;

/// Maximum breadcrumb-trail length; the oldest entry is evicted first.
pub const TRAIL_CAP: usize = 20;

/// Half-width of the square neighborhood revealed around the player.
pub const REVEAL_RADIUS: i32 = 2;

/// How many cells ahead the first-person view scans.
pub const VIEW_DEPTH: i32 = 2;

/// Added to the level depth to derive the layout RNG seed.
pub const LEVEL_SEED_SALT: u64 = 0x5EED_CA5E;

/// Chutes guaranteed per level, drawn from room floor only.
pub const GUARANTEED_CHUTES: usize = 4;

/// Teleporters guaranteed per level, drawn from room floor only.
pub const GUARANTEED_TELEPORTERS: usize = 4;

/// Retry cap for the guaranteed room-floor placements.
pub const ROOM_PLACE_RETRIES: usize = 100;

/// Retry cap for each weighted special-tile roll.
pub const FLOOR_PLACE_RETRIES: usize = 500;

/// Default number of rooms the generator aims for.
pub const DEFAULT_ROOM_TARGET: usize = 12;

/// Default number of weighted special-tile rolls.
pub const DEFAULT_SPECIAL_TARGET: usize = 20;
