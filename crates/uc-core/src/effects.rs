//! Tile-effect resolution.
//!
//! A fixed, ordered list of handlers runs whenever the player lands on a
//! cell, whether by stepping or teleporting. Each handler independently
//! checks membership of its tile set; most just log, a few mutate party
//! state, and two displace the player entirely. A displacing handler
//! ends the pass — the destination cell gets its own pass.

use crate::dungeon::TreasureKind;
use crate::party::{PartyState, PartyStateExt};
use crate::session::{DungeonSession, Redraw};

/// What a handler did to the player's whereabouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Continue,
    /// The player is no longer on the cell this pass started from.
    Displaced,
}

type Handler = fn(&mut DungeonSession, &mut dyn PartyState) -> Outcome;

/// Handler order is part of the game's behavior: the chest notice comes
/// before trap damage, and water gets the chance to douse flames before
/// a chute drops the player out of the level.
const HANDLERS: [Handler; 9] = [
    treasure_notice,
    water,
    antimagic,
    trap,
    chute,
    extinguisher,
    encounter,
    teleporter,
    rotator,
];

/// Run the effect pass for the player's current cell.
pub fn resolve(session: &mut DungeonSession, store: &mut dyn PartyState) {
    for handler in HANDLERS {
        if handler(session, store) == Outcome::Displaced {
            break;
        }
    }
}

fn treasure_notice(session: &mut DungeonSession, _store: &mut dyn PartyState) -> Outcome {
    if session.level.treasures.contains_key(&session.player.pos) {
        session.message("There is a chest here. Perhaps you should open it.");
    }
    Outcome::Continue
}

fn water(session: &mut DungeonSession, store: &mut dyn PartyState) -> Outcome {
    if session.level.water.contains(&session.player.pos) {
        if store.on_fire() {
            store.set_on_fire(false);
            session.message("You wade into the water and the flames sizzle out.");
        } else {
            session.message("You wade through the water. You are soaking wet.");
        }
    }
    Outcome::Continue
}

fn antimagic(session: &mut DungeonSession, _store: &mut dyn PartyState) -> Outcome {
    if session.level.antimagic.contains(&session.player.pos) {
        session.message("The air feels dead here. Your magic is suppressed.");
    }
    Outcome::Continue
}

/// Traps are one-shot: the damage roll is `[1,10)` and the trap is gone
/// once it has fired.
fn trap(session: &mut DungeonSession, store: &mut dyn PartyState) -> Outcome {
    let pos = session.player.pos;
    if let Some(kind) = session.level.traps.get(&pos).copied() {
        let damage = session.events.range(1, 10);
        store.damage_active(damage);
        session.message(format!("You set off a {kind}! You take {damage} damage."));
        session.level.traps.remove(&pos);
        session.invalidate(Redraw::MINIMAP);
    }
    Outcome::Continue
}

/// Fall damage is `[5,15)`; the player lands on the next level down at
/// its up stairs, exactly where a stair descent arrives.
fn chute(session: &mut DungeonSession, store: &mut dyn PartyState) -> Outcome {
    if session.level.chutes.contains(&session.player.pos) {
        let damage = session.events.range(5, 15);
        store.damage_active(damage);
        session.message(format!(
            "The floor gives way! You fall down a chute and take {damage} damage."
        ));
        session.fall_to_next_level(store);
        return Outcome::Displaced;
    }
    Outcome::Continue
}

fn extinguisher(session: &mut DungeonSession, store: &mut dyn PartyState) -> Outcome {
    if session.level.extinguishers.contains(&session.player.pos) {
        if store.on_fire() {
            store.set_on_fire(false);
            session.message("A burst of foam snuffs out the flames on you.");
        } else {
            session.message("A wall nozzle sputters a little foam at you.");
        }
    }
    Outcome::Continue
}

/// Encounters only announce themselves; starting combat is the host's
/// business.
fn encounter(session: &mut DungeonSession, store: &mut dyn PartyState) -> Outcome {
    if let Some(name) = session.level.monsters.get(&session.player.pos).cloned() {
        let attitude = store.monster_attitude(&name);
        session.message(format!("A {name} is here. It looks {attitude}."));
    }
    Outcome::Continue
}

fn teleporter(session: &mut DungeonSession, store: &mut dyn PartyState) -> Outcome {
    if session.level.teleporters.contains(&session.player.pos) {
        session.message("The tile flashes and space folds around you!");
        session.teleport_random(store);
        return Outcome::Displaced;
    }
    Outcome::Continue
}

fn rotator(session: &mut DungeonSession, store: &mut dyn PartyState) -> Outcome {
    if session.level.rotators.contains(&session.player.pos) {
        // 1-3 quarter turns: the plate never leaves the facing as it was.
        let spin = session.events.rnd(3) as i32;
        session.player.facing = session.player.facing.rotated(spin);
        let facing = session.player.facing;
        session.message(format!("The floor plate spins you about! You face {facing}."));
        session.invalidate(Redraw::MINIMAP | Redraw::VIEW);
        session.mirror_facing(store);
    }
    Outcome::Continue
}

/// Open the chest on the player's cell, if there is one. A distinct,
/// explicit action: walking onto a chest only announces it.
pub fn open_treasure(session: &mut DungeonSession, store: &mut dyn PartyState) {
    let pos = session.player.pos;
    let Some(treasure) = session.level.treasures.get(&pos).cloned() else {
        session.message("There is no chest here.");
        return;
    };

    match treasure.kind {
        TreasureKind::Gold => {
            let amount = session.events.range(500, 5000);
            store.add_gold(amount);
            session.message(format!(
                "You open the {} and count out {amount} gold!",
                treasure.name
            ));
        }
        TreasureKind::Item => {
            store.push_inventory(&treasure.name);
            session.message(format!("You open the chest and find: {}.", treasure.name));
        }
    }

    session.level.treasures.remove(&pos);
    session.invalidate(Redraw::MINIMAP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{GenConfig, TrapKind, Treasure};
    use crate::grid::Cell;
    use crate::party::{PartyLedger, keys};
    use crate::rng::GameRng;
    use crate::session::DungeonSession;

    fn quiet_session() -> (DungeonSession, PartyLedger) {
        let mut ledger = PartyLedger::new_delve(50, 0);
        let mut session =
            DungeonSession::new(GenConfig::default(), GameRng::new(7), &mut ledger);
        // Strip the generated specials so each test stages exactly the
        // tiles it is about.
        session.level.monsters.clear();
        session.level.treasures.clear();
        session.level.traps.clear();
        session.level.water.clear();
        session.level.antimagic.clear();
        session.level.extinguishers.clear();
        session.level.chutes.clear();
        session.level.teleporters.clear();
        session.level.rotators.clear();
        session.take_messages();
        (session, ledger)
    }

    #[test]
    fn test_trap_fires_once() {
        let (mut session, mut ledger) = quiet_session();
        let pos = session.player.pos;
        session.level.traps.insert(pos, TrapKind::Dart);

        resolve(&mut session, &mut ledger);

        let damage = 50 - ledger.get_i64(keys::HP);
        assert!((1..10).contains(&damage), "damage {damage} out of range");
        assert!(!session.level.traps.contains_key(&pos));
        assert!(session.take_messages().iter().any(|m| m.contains("dart trap")));

        // Second pass over the same cell: trap is spent, nothing happens.
        let hp_after = ledger.get_i64(keys::HP);
        resolve(&mut session, &mut ledger);
        assert_eq!(ledger.get_i64(keys::HP), hp_after);
        assert!(session.take_messages().is_empty());
    }

    #[test]
    fn test_chute_drops_a_level() {
        let (mut session, mut ledger) = quiet_session();
        session.level.chutes.insert(session.player.pos);

        resolve(&mut session, &mut ledger);

        assert_eq!(session.player.depth, 2);
        assert_eq!(session.player.pos, session.level.stairs_up);
        let damage = 50 - ledger.get_i64(keys::HP);
        assert!((5..15).contains(&damage), "fall damage {damage} out of range");
    }

    #[test]
    fn test_water_douses_fire() {
        let (mut session, mut ledger) = quiet_session();
        session.level.water.insert(session.player.pos);
        ledger.set_on_fire(true);

        resolve(&mut session, &mut ledger);
        assert!(!ledger.on_fire());
        assert!(session.take_messages().iter().any(|m| m.contains("sizzle")));

        // Not burning: just wet.
        resolve(&mut session, &mut ledger);
        assert!(session
            .take_messages()
            .iter()
            .any(|m| m.contains("soaking wet")));
    }

    #[test]
    fn test_antimagic_is_notice_only() {
        let (mut session, mut ledger) = quiet_session();
        session.level.antimagic.insert(session.player.pos);
        let hp = ledger.get_i64(keys::HP);

        resolve(&mut session, &mut ledger);

        assert_eq!(ledger.get_i64(keys::HP), hp);
        assert!(session
            .take_messages()
            .iter()
            .any(|m| m.contains("suppressed")));
    }

    #[test]
    fn test_encounter_reads_attitude_from_store() {
        let (mut session, mut ledger) = quiet_session();
        session
            .level
            .monsters
            .insert(session.player.pos, "Kobold".to_string());

        resolve(&mut session, &mut ledger);
        assert!(session
            .take_messages()
            .iter()
            .any(|m| m.contains("Kobold") && m.contains("Hostile")));

        ledger.set("attitude.Kobold", "Timid".to_string());
        resolve(&mut session, &mut ledger);
        assert!(session.take_messages().iter().any(|m| m.contains("Timid")));
    }

    #[test]
    fn test_chest_notice_precedes_trap_damage() {
        let (mut session, mut ledger) = quiet_session();
        let pos = session.player.pos;
        session
            .level
            .treasures
            .insert(pos, Treasure::gold("Gold Pouch"));
        session.level.traps.insert(pos, TrapKind::Spear);

        resolve(&mut session, &mut ledger);

        let msgs = session.take_messages();
        let chest = msgs.iter().position(|m| m.contains("chest")).unwrap();
        let trap = msgs.iter().position(|m| m.contains("spear trap")).unwrap();
        assert!(chest < trap);
    }

    #[test]
    fn test_open_gold_treasure() {
        let (mut session, mut ledger) = quiet_session();
        let pos = session.player.pos;
        session
            .level
            .treasures
            .insert(pos, Treasure::gold("Gold Pouch"));

        session.open_treasure(&mut ledger);

        let gold = ledger.get_i64(keys::GOLD);
        assert!((500..5000).contains(&gold), "gold {gold} out of range");
        assert!(!session.level.treasures.contains_key(&pos));

        // Re-opening is a no-op.
        session.take_messages();
        session.open_treasure(&mut ledger);
        assert_eq!(ledger.get_i64(keys::GOLD), gold);
        assert!(session
            .take_messages()
            .iter()
            .any(|m| m.contains("no chest")));
    }

    #[test]
    fn test_open_item_treasure_goes_to_inventory() {
        let (mut session, mut ledger) = quiet_session();
        let pos = session.player.pos;
        session
            .level
            .treasures
            .insert(pos, Treasure::item("Silver Ring"));

        session.open_treasure(&mut ledger);

        assert_eq!(ledger.get(keys::INVENTORY).as_deref(), Some("Silver Ring"));
        assert_eq!(ledger.get_i64(keys::GOLD), 0);
        assert!(!session.level.treasures.contains_key(&pos));
    }

    #[test]
    fn test_rotator_always_changes_facing() {
        // The spin is 1-3 quarter turns, so the facing can never come
        // out unchanged no matter what the event RNG rolls.
        for seed in 0..20 {
            let mut ledger = PartyLedger::new_delve(50, 0);
            let mut session =
                DungeonSession::new(GenConfig::default(), GameRng::new(seed), &mut ledger);
            session.level.rotators.clear();
            session.level.rotators.insert(session.player.pos);
            let before = session.player.facing;

            resolve(&mut session, &mut ledger);

            assert_ne!(session.player.facing, before, "seed {seed} left facing fixed");
            assert!(session
                .take_messages()
                .iter()
                .any(|m| m.contains("spins you about")));
        }
    }

    #[test]
    fn test_teleporter_displaces() {
        let (mut session, mut ledger) = quiet_session();
        session.level.teleporters.insert(session.player.pos);

        resolve(&mut session, &mut ledger);

        assert!(session.level.is_floor(session.player.pos));
        assert!(session
            .take_messages()
            .iter()
            .any(|m| m.contains("space folds")));
    }
}
