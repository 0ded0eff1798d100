//! Procedural level generation.
//!
//! Room-and-corridor carving on a solid-rock grid: a seed room in one of
//! two opposite corners, then a queue of open rooms each trying to sprout
//! a neighbor in the four cardinal directions. Layout is a pure function
//! of `(depth, config)` — the layout RNG is re-seeded from the depth, and
//! every candidate list is walked in deterministic scan order.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::grid::{Cell, Facing};
use crate::rng::GameRng;
use crate::{
    DEFAULT_ROOM_TARGET, DEFAULT_SPECIAL_TARGET, FLOOR_PLACE_RETRIES, GRID_SIZE,
    GUARANTEED_CHUTES, GUARANTEED_TELEPORTERS, LEVEL_SEED_SALT, MIN_GRID_SIZE,
    ROOM_PLACE_RETRIES,
};

use super::Level;
use super::tiles::{MONSTER_NAMES, TrapKind, Treasure};

/// Construction-time generation parameters. There is no external schema
/// for these; hosts pick them once when the session starts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenConfig {
    /// Edge length of the square grid.
    pub size: i32,
    /// Stop sprouting once this many rooms exist.
    pub room_target: usize,
    /// Number of weighted special-tile rolls.
    pub special_target: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            room_target: DEFAULT_ROOM_TARGET,
            special_target: DEFAULT_SPECIAL_TARGET,
        }
    }
}

/// A carved room rectangle. `x, y` is the top-left floor cell; walls are
/// the rock left around it, not part of the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn center(&self) -> Cell {
        Cell::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check overlap with another room, padded by `buffer` cells on every
    /// side so rooms keep at least one wall between them.
    pub const fn overlaps(&self, other: &Room, buffer: i32) -> bool {
        self.x - buffer < other.x + other.width
            && other.x - buffer < self.x + self.width
            && self.y - buffer < other.y + other.height
            && other.y - buffer < self.y + self.height
    }

    /// True if the room sits inside the grid with a one-cell rock margin.
    pub const fn fits(&self, size: i32) -> bool {
        self.x >= 1
            && self.y >= 1
            && self.x + self.width <= size - 1
            && self.y + self.height <= size - 1
    }

    /// A uniformly random cell inside the room.
    pub fn random_cell(&self, rng: &mut GameRng) -> Cell {
        Cell::new(
            self.x + rng.rn2(self.width as u32) as i32,
            self.y + rng.rn2(self.height as u32) as i32,
        )
    }

    fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.x..self.x + self.width)
            .flat_map(move |x| (self.y..self.y + self.height).map(move |y| Cell::new(x, y)))
    }
}

/// Generate the level at `depth`. Deterministic for a fixed
/// `(depth, config)` pair: the layout seed is `LEVEL_SEED_SALT + depth`.
///
/// Grid sizes below `MIN_GRID_SIZE` cannot hold the largest seed room
/// inside the one-cell rock margin; they are clamped up rather than
/// allowed to fail.
pub fn generate(depth: u32, config: &GenConfig) -> Level {
    let config = GenConfig {
        size: config.size.max(MIN_GRID_SIZE),
        ..*config
    };
    let mut rng = GameRng::new(LEVEL_SEED_SALT + depth as u64);
    let mut level = Level::solid(depth, config.size);

    let rooms = carve_rooms(&mut level, &config, &mut rng);
    level.entry = rooms[0].random_cell(&mut rng);

    place_stairs(&mut level, &mut rng);
    place_guaranteed_specials(&mut level, &mut rng);
    place_weighted_specials(&mut level, config.special_target, &mut rng);

    level
}

/// Random room side length, 3-5 cells.
fn room_extent(rng: &mut GameRng) -> i32 {
    rng.rnd(3) as i32 + 2
}

/// Carve the seed room plus sprouted neighbors until the room target is
/// hit or no open room can grow. Room interiors are recorded into
/// `room_floor`; corridors are plain floor.
fn carve_rooms(level: &mut Level, config: &GenConfig, rng: &mut GameRng) -> Vec<Room> {
    let width = room_extent(rng);
    let height = room_extent(rng);

    // Seed room anchored in one of two opposite corners.
    let seed = if rng.one_in(2) {
        Room::new(1, 1, width, height)
    } else {
        Room::new(config.size - 1 - width, config.size - 1 - height, width, height)
    };
    carve_room(level, &seed);

    let mut placed = vec![seed];
    let mut open = VecDeque::from([seed]);

    while placed.len() < config.room_target {
        let Some(room) = open.pop_front() else {
            break;
        };

        let mut directions: Vec<Facing> = Facing::iter().collect();
        rng.shuffle(&mut directions);

        for dir in directions {
            if placed.len() >= config.room_target {
                break;
            }
            if let Some(new_room) = try_sprout(level, &placed, &room, dir, rng) {
                carve_corridor(level, room.center(), new_room.center());
                carve_room(level, &new_room);
                placed.push(new_room);
                open.push_back(new_room);
            }
        }
    }

    placed
}

/// Attempt to grow a new room off `source` in direction `dir`: random
/// corridor length 2-4 and room size 3-5 per side, accepted only inside
/// the one-cell grid margin and clear of every placed room by a one-cell
/// buffer.
fn try_sprout(
    level: &Level,
    placed: &[Room],
    source: &Room,
    dir: Facing,
    rng: &mut GameRng,
) -> Option<Room> {
    let corridor = rng.rnd(3) as i32 + 1;
    let width = room_extent(rng);
    let height = room_extent(rng);

    let center = source.center();
    let candidate = match dir {
        Facing::North => Room::new(
            center.x - width / 2,
            source.y - corridor - height,
            width,
            height,
        ),
        Facing::South => Room::new(
            center.x - width / 2,
            source.y + source.height + corridor,
            width,
            height,
        ),
        Facing::West => Room::new(
            source.x - corridor - width,
            center.y - height / 2,
            width,
            height,
        ),
        Facing::East => Room::new(
            source.x + source.width + corridor,
            center.y - height / 2,
            width,
            height,
        ),
    };

    if !candidate.fits(level.size) {
        return None;
    }
    if placed.iter().any(|r| candidate.overlaps(r, 1)) {
        return None;
    }
    Some(candidate)
}

fn carve_room(level: &mut Level, room: &Room) {
    for cell in room.cells() {
        level.carve(cell);
        level.room_floor.insert(cell);
    }
}

/// Carve a corridor between two room centers, stepping one axis at a time
/// toward the target.
fn carve_corridor(level: &mut Level, from: Cell, to: Cell) {
    let mut cur = from;
    level.carve(cur);
    while cur != to {
        if cur.x != to.x {
            cur.x += (to.x - cur.x).signum();
        } else {
            cur.y += (to.y - cur.y).signum();
        }
        level.carve(cur);
    }
}

/// Place both stairs on random floor cells: never the entry cell, never
/// each other. Carving again is defensive; floor cells are already clear.
fn place_stairs(level: &mut Level, rng: &mut GameRng) {
    let floor = level.floor_cells();

    level.stairs_up = loop {
        let cell = floor[rng.rn2(floor.len() as u32) as usize];
        if cell != level.entry {
            break cell;
        }
    };
    level.stairs_down = loop {
        let cell = floor[rng.rn2(floor.len() as u32) as usize];
        if cell != level.entry && cell != level.stairs_up {
            break cell;
        }
    };

    level.carve(level.stairs_up);
    level.carve(level.stairs_down);
}

/// True if generation must keep this cell clear of special tiles.
fn is_reserved(level: &Level, cell: Cell) -> bool {
    cell == level.entry || cell == level.stairs_up || cell == level.stairs_down
}

/// Bounded rejection sampling over a candidate list. Returns `None` once
/// the retry budget runs out; the caller skips that single placement.
fn pick_cell(
    level: &Level,
    candidates: &[Cell],
    retries: usize,
    reject: impl Fn(&Level, Cell) -> bool,
    rng: &mut GameRng,
) -> Option<Cell> {
    if candidates.is_empty() {
        return None;
    }
    for _ in 0..retries {
        let cell = candidates[rng.rn2(candidates.len() as u32) as usize];
        if is_reserved(level, cell) || reject(level, cell) {
            continue;
        }
        return Some(cell);
    }
    None
}

/// Room-floor cells in deterministic order. `room_floor` is a hash set,
/// so it must be sorted before any seeded sampling touches it.
fn room_cells_sorted(level: &Level) -> Vec<Cell> {
    let mut cells: Vec<Cell> = level.room_floor.iter().copied().collect();
    cells.sort();
    cells
}

/// Guarantee a handful of chutes and teleporters per level, drawn from
/// room floor only. An exhausted retry loop skips that placement.
fn place_guaranteed_specials(level: &mut Level, rng: &mut GameRng) {
    let room_cells = room_cells_sorted(level);

    for _ in 0..GUARANTEED_CHUTES {
        if let Some(cell) = pick_cell(
            level,
            &room_cells,
            ROOM_PLACE_RETRIES,
            |l, c| l.chutes.contains(&c) || l.teleporters.contains(&c),
            rng,
        ) {
            level.chutes.insert(cell);
        }
    }

    for _ in 0..GUARANTEED_TELEPORTERS {
        if let Some(cell) = pick_cell(
            level,
            &room_cells,
            ROOM_PLACE_RETRIES,
            |l, c| l.chutes.contains(&c) || l.teleporters.contains(&c),
            rng,
        ) {
            level.teleporters.insert(cell);
        }
    }
}

/// Weighted scatter rolls over the whole floor. Monsters, treasure,
/// water and antimagic use the fixed historical weights; the remainder
/// covers traps, extinguishers, rotators, studs and extra chutes. Chute
/// rolls draw from room floor so the room-floor invariant holds.
fn place_weighted_specials(level: &mut Level, count: usize, rng: &mut GameRng) {
    let floor = level.floor_cells();
    let room_cells = room_cells_sorted(level);
    let no_treasure = |l: &Level, c: Cell| l.treasures.contains_key(&c);

    for _ in 0..count {
        let roll = rng.rn2(100);
        match roll {
            0..=14 => {
                if let Some(cell) =
                    pick_cell(level, &floor, FLOOR_PLACE_RETRIES, no_treasure, rng)
                {
                    let name = rng.choose(&MONSTER_NAMES).copied().unwrap_or("Cave Rat");
                    level.monsters.insert(cell, name.to_string());
                }
            }
            15..=29 => {
                if let Some(cell) =
                    pick_cell(level, &floor, FLOOR_PLACE_RETRIES, no_treasure, rng)
                {
                    let treasure = Treasure::random(rng);
                    level.treasures.insert(cell, treasure);
                }
            }
            30..=54 => {
                if let Some(cell) =
                    pick_cell(level, &floor, FLOOR_PLACE_RETRIES, no_treasure, rng)
                {
                    level.water.insert(cell);
                }
            }
            55..=64 => {
                if let Some(cell) =
                    pick_cell(level, &floor, FLOOR_PLACE_RETRIES, no_treasure, rng)
                {
                    level.antimagic.insert(cell);
                }
            }
            65..=74 => {
                if let Some(cell) =
                    pick_cell(level, &floor, FLOOR_PLACE_RETRIES, no_treasure, rng)
                {
                    let kind = TrapKind::random(rng);
                    level.traps.insert(cell, kind);
                }
            }
            75..=79 => {
                if let Some(cell) =
                    pick_cell(level, &floor, FLOOR_PLACE_RETRIES, no_treasure, rng)
                {
                    level.extinguishers.insert(cell);
                }
            }
            80..=84 => {
                if let Some(cell) =
                    pick_cell(level, &floor, FLOOR_PLACE_RETRIES, no_treasure, rng)
                {
                    level.rotators.insert(cell);
                }
            }
            85..=89 => {
                if let Some(cell) =
                    pick_cell(level, &floor, FLOOR_PLACE_RETRIES, no_treasure, rng)
                {
                    level.studs.insert(cell);
                }
            }
            _ => {
                // Extra chutes keep to room floor like the guaranteed ones.
                if let Some(cell) =
                    pick_cell(level, &room_cells, FLOOR_PLACE_RETRIES, no_treasure, rng)
                {
                    level.chutes.insert(cell);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn big_config() -> GenConfig {
        GenConfig {
            size: GRID_SIZE,
            room_target: 40,
            special_target: 20,
        }
    }

    #[test]
    fn test_room_overlap_buffer() {
        let a = Room::new(5, 5, 4, 4);
        let b = Room::new(10, 5, 4, 4); // one rock column between walls
        let c = Room::new(11, 5, 4, 4);
        assert!(!a.overlaps(&b, 1));
        assert!(a.overlaps(&b, 2));
        assert!(!a.overlaps(&c, 1));
        assert!(a.overlaps(&a, 0));
    }

    #[test]
    fn test_grid_partitions_into_floor_and_rock() {
        let level = generate(1, &GenConfig::default());
        let floor = level.floor_cells();
        assert_eq!(
            level.obstacles.len() + floor.len(),
            (level.size * level.size) as usize
        );
        for cell in &floor {
            assert!(!level.obstacles.contains(cell));
        }
    }

    #[test]
    fn test_stairs_distinct_and_on_floor() {
        for depth in 1..20 {
            let level = generate(depth, &GenConfig::default());
            assert_ne!(level.stairs_up, level.stairs_down);
            assert!(level.is_floor(level.stairs_up));
            assert!(level.is_floor(level.stairs_down));
            assert_ne!(level.stairs_up, level.entry);
            assert_ne!(level.stairs_down, level.entry);
        }
    }

    #[test]
    fn test_chutes_and_teleporters_on_room_floor() {
        for depth in 1..20 {
            let level = generate(depth, &big_config());
            for cell in &level.chutes {
                assert!(level.room_floor.contains(cell), "chute off room floor");
            }
            for cell in &level.teleporters {
                assert!(
                    level.room_floor.contains(cell),
                    "teleporter off room floor"
                );
            }
        }
    }

    #[test]
    fn test_entry_is_inside_seed_room() {
        let level = generate(1, &GenConfig::default());
        assert!(level.room_floor.contains(&level.entry));
    }

    #[test]
    fn test_specials_avoid_stairs_and_entry() {
        for depth in 1..20 {
            let level = generate(depth, &big_config());
            for reserved in [level.entry, level.stairs_up, level.stairs_down] {
                assert!(!level.has_special(reserved));
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = big_config();
        let a = generate(3, &config);
        let b = generate(3, &config);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.stairs_up, b.stairs_up);
        assert_eq!(a.stairs_down, b.stairs_down);
        assert_eq!(a.entry, b.entry);
        assert_eq!(a.monsters, b.monsters);
        assert_eq!(a.treasures, b.treasures);
        assert_eq!(a.chutes, b.chutes);
    }

    #[test]
    fn test_different_depths_differ() {
        let config = GenConfig::default();
        let a = generate(1, &config);
        let b = generate(2, &config);
        // Not a hard guarantee, but two identical 24x24 layouts from
        // different seeds would mean the seed is being ignored.
        assert_ne!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_undersized_grids_are_clamped() {
        // Degenerate sizes must neither panic in stair placement nor
        // let the corner-anchored seed room spill off the grid.
        for size in [-3, 0, 1, 5, 7] {
            let config = GenConfig {
                size,
                ..GenConfig::default()
            };
            let level = generate(1, &config);

            assert_eq!(level.size, MIN_GRID_SIZE);
            assert!(level.in_bounds(level.entry));
            assert!(level.room_floor.contains(&level.entry));
            for cell in &level.room_floor {
                assert!(level.in_bounds(*cell), "room cell {cell:?} off grid");
            }
            assert!(level.is_floor(level.stairs_up));
            assert!(level.is_floor(level.stairs_down));
            for cell in level.chutes.iter().chain(&level.teleporters) {
                assert!(level.in_bounds(*cell));
            }
        }
    }

    #[test]
    fn test_corridor_connects_endpoints() {
        let mut level = Level::solid(1, 24);
        carve_corridor(&mut level, Cell::new(2, 2), Cell::new(9, 6));
        assert!(level.is_floor(Cell::new(2, 2)));
        assert!(level.is_floor(Cell::new(9, 6)));
        // Axis-stepped path length: dx + dy + 1 cells.
        assert_eq!(level.floor_cells().len(), 7 + 4 + 1);
    }

    proptest! {
        #[test]
        fn prop_generation_invariants(
            depth in 1u32..60,
            size in -4i32..48,
            rooms in 2usize..40,
            specials in 0usize..40,
        ) {
            let config = GenConfig {
                size,
                room_target: rooms,
                special_target: specials,
            };
            let level = generate(depth, &config);

            // Undersized requests come back clamped, never panicking.
            prop_assert!(level.size >= MIN_GRID_SIZE);

            // Obstacles and floor partition the grid.
            prop_assert_eq!(
                level.obstacles.len() + level.floor_cells().len(),
                (level.size * level.size) as usize
            );

            // Stairs are distinct floor cells.
            prop_assert_ne!(level.stairs_up, level.stairs_down);
            prop_assert!(!level.obstacles.contains(&level.stairs_up));
            prop_assert!(!level.obstacles.contains(&level.stairs_down));

            // Room floor is a subset of floor.
            for cell in &level.room_floor {
                prop_assert!(level.is_floor(*cell));
            }

            // Chutes and teleporters keep to room floor.
            for cell in level.chutes.iter().chain(&level.teleporters) {
                prop_assert!(level.room_floor.contains(cell));
            }

            // Every special payload sits on floor.
            for cell in level.monsters.keys().chain(level.treasures.keys()).chain(level.traps.keys()) {
                prop_assert!(level.is_floor(*cell));
            }
            for cell in level.water.iter().chain(&level.antimagic).chain(&level.extinguishers).chain(&level.rotators).chain(&level.studs) {
                prop_assert!(level.is_floor(*cell));
            }
        }
    }
}
