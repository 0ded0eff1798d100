//! Ledger snapshots.
//!
//! The only persistence this engine owns: the party ledger serialized to
//! a JSON file so a delve's stats survive between runs. Level layouts are
//! never saved — they are regenerated from the depth seed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::party::PartyLedger;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("could not access snapshot file: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("no data directory available on this platform")]
    NoDataDir,
}

/// Default snapshot location under the platform data directory.
pub fn default_snapshot_path() -> Result<PathBuf, SnapshotError> {
    let base = dirs::data_dir().ok_or(SnapshotError::NoDataDir)?;
    Ok(base.join("undercroft").join("ledger.json"))
}

/// Write the ledger to `path`, creating parent directories as needed.
pub fn save_ledger(ledger: &PartyLedger, path: &Path) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(ledger)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a ledger back from `path`.
pub fn load_ledger(path: &Path) -> Result<PartyLedger, SnapshotError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::{PartyState, PartyStateExt, keys};

    #[test]
    fn test_snapshot_round_trip() {
        let mut ledger = PartyLedger::new_delve(30, 1200);
        ledger.set("attitude.Slime", "Indifferent".to_string());

        let dir = std::env::temp_dir().join("uc-snapshot-test");
        let path = dir.join("ledger.json");
        save_ledger(&ledger, &path).unwrap();

        let restored = load_ledger(&path).unwrap();
        assert_eq!(restored.get_i64(keys::HP), 30);
        assert_eq!(restored.get_i64(keys::GOLD), 1200);
        assert_eq!(restored.monster_attitude("Slime"), "Indifferent");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("uc-snapshot-missing/none.json");
        match load_ledger(&path) {
            Err(SnapshotError::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
