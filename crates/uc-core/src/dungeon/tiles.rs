//! Special-tile payloads: traps, treasure, monster flavor.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::GameRng;

/// Trap variety. Purely flavor plus the log line; damage is rolled the
/// same way for all of them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TrapKind {
    #[strum(serialize = "dart trap")]
    Dart,
    #[strum(serialize = "spear trap")]
    Spear,
    #[strum(serialize = "spiked pit")]
    SpikedPit,
    #[strum(serialize = "gas vent")]
    GasVent,
}

impl TrapKind {
    const ALL: [TrapKind; 4] = [
        TrapKind::Dart,
        TrapKind::Spear,
        TrapKind::SpikedPit,
        TrapKind::GasVent,
    ];

    pub fn random(rng: &mut GameRng) -> TrapKind {
        *rng.choose(&Self::ALL).unwrap_or(&TrapKind::Dart)
    }
}

/// Whether opening a chest pays out coin or an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreasureKind {
    Gold,
    Item,
}

/// Payload of a treasure tile. The chest stays on the tile until the
/// player explicitly opens it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasure {
    pub name: String,
    pub kind: TreasureKind,
}

impl Treasure {
    pub fn new(name: impl Into<String>, kind: TreasureKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn gold(name: impl Into<String>) -> Self {
        Self::new(name, TreasureKind::Gold)
    }

    pub fn item(name: impl Into<String>) -> Self {
        Self::new(name, TreasureKind::Item)
    }

    /// Roll a random chest payload; roughly half the table is coin.
    pub fn random(rng: &mut GameRng) -> Treasure {
        const GOLD: [&str; 3] = ["Gold Pouch", "Gold Chest", "Coin Purse"];
        const ITEMS: [&str; 6] = [
            "Rusty Dagger",
            "Healing Draught",
            "Silver Ring",
            "Torch",
            "Iron Key",
            "Moldy Tome",
        ];
        if rng.percent(50) {
            Treasure::gold(*rng.choose(&GOLD).unwrap_or(&GOLD[0]))
        } else {
            Treasure::item(*rng.choose(&ITEMS).unwrap_or(&ITEMS[0]))
        }
    }
}

/// Monster display names scattered by the generator. Attitude comes from
/// the party ledger at encounter time, not from this table.
pub const MONSTER_NAMES: [&str; 8] = [
    "Cave Rat",
    "Skeleton",
    "Giant Spider",
    "Goblin",
    "Slime",
    "Wraith",
    "Kobold",
    "Dungeon Troll",
];
