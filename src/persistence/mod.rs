//! Best-score persistence
//!
//! The simulation never touches storage. The frame driver loads the best
//! score once at construction and saves it on the game-over transition
//! when a round beats it.
//!
//! Stores:
//! - `MemoryStore`: in-process (tests, headless runs)
//! - `FileStore`: JSON file (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures at the storage edge (logged, never propagated into the sim)
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("storage rejected write")]
    WriteRejected,
}

/// On-disk / in-storage document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub best_score: u64,
}

impl BestScoreRecord {
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Where the best score lives between sessions
pub trait ScoreStore {
    /// Best score so far (0 when nothing is stored)
    fn load(&self) -> u64;
    /// Record a new best score
    fn save(&mut self, best: u64);
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
    saves: u32,
}

impl MemoryStore {
    pub fn new(best: u64) -> Self {
        Self { best, saves: 0 }
    }

    /// Number of `save` calls observed
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, best: u64) {
        self.best = best;
        self.saves += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip_format() {
        let json = BestScoreRecord { best_score: 321 }.to_json().unwrap();
        assert_eq!(json, r#"{"best_score":321}"#);
        assert_eq!(BestScoreRecord::from_json(&json).unwrap().best_score, 321);
    }

    #[test]
    fn test_malformed_record() {
        assert!(matches!(
            BestScoreRecord::from_json("{\"best\":"),
            Err(PersistenceError::Malformed(_))
        ));
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryStore::new(5);
        assert_eq!(store.load(), 5);
        store.save(9);
        assert_eq!(store.load(), 9);
        assert_eq!(store.saves(), 1);
    }
}
