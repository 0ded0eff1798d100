//! The keyed party-state store.
//!
//! The dungeon engine does not own character sheets, gold or status
//! effects; it reads and writes them through this narrow string-keyed
//! interface so the surrounding application can keep a single source of
//! truth. There is no ambient global: a store reference is passed into
//! every mutating session operation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Well-known ledger keys. The engine mirrors player position and depth
/// out after every change so other surfaces stay consistent.
pub mod keys {
    pub const HP: &str = "hp";
    pub const GOLD: &str = "gold";
    pub const ON_FIRE: &str = "on_fire";
    pub const DEPTH: &str = "depth";
    pub const POS_X: &str = "pos.x";
    pub const POS_Y: &str = "pos.y";
    pub const FACING: &str = "facing";
    pub const INVENTORY: &str = "inventory";

    /// Prefix for per-monster attitude overrides, e.g. `attitude.Slime`.
    pub const ATTITUDE_PREFIX: &str = "attitude.";
}

/// Opaque string-keyed store owned by the host application.
pub trait PartyState {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// Typed helpers layered over the raw keys. Everything degrades to a sane
/// default when a key is missing or malformed; the store is host data and
/// the engine never trusts it enough to fail on it.
pub trait PartyStateExt: PartyState {
    fn get_i64(&self, key: &str) -> i64 {
        self.get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    fn set_i64(&mut self, key: &str, value: i64) {
        self.set(key, value.to_string());
    }

    /// Apply damage to the active party member.
    fn damage_active(&mut self, amount: i64) {
        let hp = self.get_i64(keys::HP);
        self.set_i64(keys::HP, hp - amount);
    }

    fn add_gold(&mut self, amount: i64) {
        let gold = self.get_i64(keys::GOLD);
        self.set_i64(keys::GOLD, gold + amount);
    }

    fn on_fire(&self) -> bool {
        self.get(keys::ON_FIRE).as_deref() == Some("1")
    }

    fn set_on_fire(&mut self, burning: bool) {
        self.set(keys::ON_FIRE, if burning { "1" } else { "0" }.to_string());
    }

    /// Append an item to the active character's inventory. The inventory
    /// is a semicolon-separated list under one key.
    fn push_inventory(&mut self, item: &str) {
        let line = match self.get(keys::INVENTORY) {
            Some(existing) if !existing.is_empty() => format!("{existing};{item}"),
            _ => item.to_string(),
        };
        self.set(keys::INVENTORY, line);
    }

    /// Display attitude for an encountered monster. Hostile unless the
    /// host says otherwise.
    fn monster_attitude(&self, monster: &str) -> String {
        self.get(&format!("{}{monster}", keys::ATTITUDE_PREFIX))
            .unwrap_or_else(|| "Hostile".to_string())
    }
}

impl<T: PartyState + ?Sized> PartyStateExt for T {}

/// In-memory ledger used by the terminal front end and by tests. Hosts
/// with their own store just implement `PartyState` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartyLedger {
    entries: HashMap<String, String>,
}

impl PartyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh ledger with the stats a new delve starts from.
    pub fn new_delve(hp: i64, gold: i64) -> Self {
        let mut ledger = Self::new();
        ledger.set_i64(keys::HP, hp);
        ledger.set_i64(keys::GOLD, gold);
        ledger
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }
}

impl PartyState for PartyLedger {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_defaults() {
        let ledger = PartyLedger::new();
        assert_eq!(ledger.get_i64(keys::GOLD), 0);
        assert!(!ledger.on_fire());
        assert_eq!(ledger.monster_attitude("Slime"), "Hostile");
    }

    #[test]
    fn test_damage_and_gold() {
        let mut ledger = PartyLedger::new_delve(30, 100);
        ledger.damage_active(7);
        assert_eq!(ledger.get_i64(keys::HP), 23);
        ledger.add_gold(500);
        assert_eq!(ledger.get_i64(keys::GOLD), 600);
    }

    #[test]
    fn test_fire_status_round_trip() {
        let mut ledger = PartyLedger::new();
        ledger.set_on_fire(true);
        assert!(ledger.on_fire());
        ledger.set_on_fire(false);
        assert!(!ledger.on_fire());
    }

    #[test]
    fn test_inventory_appends() {
        let mut ledger = PartyLedger::new();
        ledger.push_inventory("Torch");
        ledger.push_inventory("Iron Key");
        assert_eq!(ledger.get(keys::INVENTORY).as_deref(), Some("Torch;Iron Key"));
    }

    #[test]
    fn test_attitude_override() {
        let mut ledger = PartyLedger::new();
        ledger.set("attitude.Kobold", "Friendly".to_string());
        assert_eq!(ledger.monster_attitude("Kobold"), "Friendly");
    }
}
