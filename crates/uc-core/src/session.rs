//! The active dungeon session.
//!
//! `DungeonSession` owns the level, the player state, the fog-of-war and
//! the breadcrumb trail, and exposes every player-facing operation as a
//! plain method. It is not a widget: the host UI polls the redraw flags
//! and the message queue after each operation and draws whatever scenes
//! it wants. Everything runs to completion on the caller's thread.

use std::collections::VecDeque;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::dungeon::{GenConfig, Level, generate};
use crate::effects;
use crate::grid::{Cell, Facing, Step, in_bounds};
use crate::party::{PartyState, PartyStateExt, keys};
use crate::rng::GameRng;
use crate::visibility::VisibilityTracker;
use crate::{REVEAL_RADIUS, TRAIL_CAP};

bitflags! {
    /// Scenes invalidated by the last batch of operations. The host
    /// drains these with `take_redraw` and repaints what is dirty;
    /// there is no event bus because nothing here is asynchronous.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Redraw: u8 {
        const MINIMAP = 0x01;
        const VIEW = 0x02;
    }
}

/// Which way the player wants to leave the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Ascend,
    Descend,
}

/// Where the player lands after a level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrival {
    /// Fresh delve: the seed room's entry cell.
    Entry,
    /// Coming down (stairs or chute): the new level's up stairs.
    StairsUp,
    /// Coming up: the new level's down stairs.
    StairsDown,
}

/// Current position, facing and depth of the party.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Cell,
    pub facing: Facing,
    pub depth: u32,
}

/// An in-progress dungeon delve.
#[derive(Debug, Clone)]
pub struct DungeonSession {
    pub level: Level,
    pub player: PlayerState,
    pub visibility: VisibilityTracker,
    config: GenConfig,
    /// Rolls for in-dungeon events (trap damage, chest gold, teleport
    /// destinations). Deliberately separate from the layout RNG so event
    /// order can never perturb level layouts.
    pub events: GameRng,
    trail: VecDeque<Cell>,
    messages: Vec<String>,
    history: Vec<String>,
    redraw: Redraw,
    exited: bool,
}

impl DungeonSession {
    /// Start a delve at depth 1. `events` drives every non-layout roll;
    /// pass a seeded RNG for a reproducible session.
    pub fn new(config: GenConfig, events: GameRng, store: &mut dyn PartyState) -> Self {
        let level = generate(1, &config);
        let player = PlayerState {
            pos: level.entry,
            facing: Facing::North,
            depth: 1,
        };
        let mut session = Self {
            level,
            player,
            visibility: VisibilityTracker::new(),
            config,
            events,
            trail: VecDeque::with_capacity(TRAIL_CAP),
            messages: Vec::new(),
            history: Vec::new(),
            redraw: Redraw::all(),
            exited: false,
        };
        session
            .visibility
            .reveal(session.player.pos, REVEAL_RADIUS, &session.level);
        session.mirror_out(store);
        session
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    /// Move one cell relative to the current facing. Walking into the
    /// grid edge or into rock is a normal game event: a log line and no
    /// state change.
    pub fn step(&mut self, step: Step, store: &mut dyn PartyState) {
        let (dx, dy) = self.player.facing.step_delta(step);
        let target = self.player.pos.offset(dx, dy);

        if !in_bounds(target, self.level.size) {
            self.message("You walk into the dungeon wall.");
            return;
        }
        if self.level.is_obstacle(target) {
            self.message("A solid rock wall blocks your path.");
            return;
        }

        self.push_breadcrumb(self.player.pos);
        self.arrive_at(target, store);
    }

    /// Turn a quarter circle: +1 right, -1 left. The first-person view
    /// depends on facing, so this dirties it even though nothing moved.
    pub fn rotate(&mut self, step: i32, store: &mut dyn PartyState) {
        self.player.facing = self.player.facing.rotated(step);
        if step >= 0 {
            self.message("You turn right.");
        } else {
            self.message("You turn left.");
        }
        self.invalidate(Redraw::MINIMAP | Redraw::VIEW);
        self.mirror_out(store);
    }

    /// Drop the player on a uniformly random floor cell. Rejection
    /// sampling is unbounded: carved levels always have floor, so this
    /// terminates. The destination skips wall validation (it is already
    /// known to be floor) but gets the full post-move effect pass.
    pub fn teleport_random(&mut self, store: &mut dyn PartyState) {
        let size = self.level.size as u32;
        let dest = loop {
            let cell = Cell::new(
                self.events.rn2(size) as i32,
                self.events.rn2(size) as i32,
            );
            if !self.level.is_obstacle(cell) {
                break cell;
            }
        };
        self.arrive_at(dest, store);
    }

    /// Take the stairs. Rejected unless the player is standing on the
    /// stair cell matching `kind`. Ascending from depth 1 ends the
    /// session instead of regenerating.
    pub fn transition(&mut self, kind: TransitionKind, store: &mut dyn PartyState) {
        let stair = match kind {
            TransitionKind::Ascend => self.level.stairs_up,
            TransitionKind::Descend => self.level.stairs_down,
        };
        if self.player.pos != stair {
            self.message("There are no stairs here.");
            return;
        }

        match kind {
            TransitionKind::Descend => {
                self.message("You descend deeper into the undercroft.");
                self.regenerate(self.player.depth + 1, Arrival::StairsUp, store);
            }
            TransitionKind::Ascend if self.player.depth == 1 => {
                self.message("You climb the stairs back into daylight.");
                self.exited = true;
            }
            TransitionKind::Ascend => {
                self.message("You climb toward the surface.");
                self.regenerate(self.player.depth - 1, Arrival::StairsDown, store);
            }
        }
    }

    /// Fall one level, as a chute does. Lands on the new level's up
    /// stairs, the same place a stair descent arrives.
    pub fn fall_to_next_level(&mut self, store: &mut dyn PartyState) {
        self.regenerate(self.player.depth + 1, Arrival::StairsUp, store);
    }

    /// Open a chest on the current cell, if any.
    pub fn open_treasure(&mut self, store: &mut dyn PartyState) {
        effects::open_treasure(self, store);
    }

    // ------------------------------------------------------------------
    // Messages, redraws, exit
    // ------------------------------------------------------------------

    /// Append a line to the message log.
    pub fn message(&mut self, msg: impl Into<String>) {
        let line = msg.into();
        self.messages.push(line.clone());
        self.history.push(line);
    }

    /// Drain the lines queued since the last call.
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// Full message history for the session.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn invalidate(&mut self, flags: Redraw) {
        self.redraw |= flags;
    }

    /// Drain the dirty flags. The host repaints what was set.
    pub fn take_redraw(&mut self) -> Redraw {
        std::mem::take(&mut self.redraw)
    }

    /// True once the player has climbed out of depth 1: the dungeon
    /// session is over and the host takes back control.
    pub fn exited(&self) -> bool {
        self.exited
    }

    /// Breadcrumb trail, oldest first.
    pub fn trail(&self) -> impl Iterator<Item = Cell> + '_ {
        self.trail.iter().copied()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn push_breadcrumb(&mut self, cell: Cell) {
        if self.trail.len() == TRAIL_CAP {
            self.trail.pop_front();
        }
        self.trail.push_back(cell);
    }

    /// Land on a validated cell: update position, reveal around it,
    /// mirror out, then run the tile-effect pass (which may displace the
    /// player again and recurse back in here).
    fn arrive_at(&mut self, cell: Cell, store: &mut dyn PartyState) {
        self.player.pos = cell;
        self.visibility
            .reveal(cell, REVEAL_RADIUS, &self.level);
        self.invalidate(Redraw::MINIMAP | Redraw::VIEW);
        self.mirror_out(store);
        effects::resolve(self, store);
    }

    /// Replace the level wholesale. Levels are regenerated, never
    /// cached, so monster and treasure placement re-rolls each visit.
    fn regenerate(&mut self, depth: u32, arrival: Arrival, store: &mut dyn PartyState) {
        self.level = generate(depth, &self.config);
        self.player.depth = depth;
        self.player.pos = match arrival {
            Arrival::Entry => self.level.entry,
            Arrival::StairsUp => self.level.stairs_up,
            Arrival::StairsDown => self.level.stairs_down,
        };
        self.visibility.clear();
        self.trail.clear();
        self.visibility
            .reveal(self.player.pos, REVEAL_RADIUS, &self.level);
        self.invalidate(Redraw::MINIMAP | Redraw::VIEW);
        self.mirror_out(store);
    }

    /// Re-mirror facing alone, for effects that spin the player in place.
    pub(crate) fn mirror_facing(&mut self, store: &mut dyn PartyState) {
        store.set(keys::FACING, self.player.facing.to_string());
    }

    /// Mirror position, facing and depth into the party store so the
    /// other application surfaces see a consistent picture.
    fn mirror_out(&mut self, store: &mut dyn PartyState) {
        store.set_i64(keys::DEPTH, self.player.depth as i64);
        store.set_i64(keys::POS_X, self.player.pos.x as i64);
        store.set_i64(keys::POS_Y, self.player.pos.y as i64);
        store.set(keys::FACING, self.player.facing.to_string());
    }
}
