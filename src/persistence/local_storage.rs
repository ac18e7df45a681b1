//! Browser LocalStorage store

use super::{BestScoreRecord, PersistenceError, ScoreStore};

/// Best score kept under a LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::STORAGE_KEY)
    }
}

impl LocalStorageStore {
    /// Default LocalStorage key
    pub const STORAGE_KEY: &'static str = "cat_runner_best_score";

    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable)
    }

    fn read(&self) -> Result<u64, PersistenceError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(json)) => Ok(BestScoreRecord::from_json(&json)?.best_score),
            Ok(None) => Ok(0),
            Err(_) => Err(PersistenceError::Unavailable),
        }
    }

    fn write(&self, best: u64) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        let json = BestScoreRecord { best_score: best }.to_json()?;
        storage
            .set_item(&self.key, &json)
            .map_err(|_| PersistenceError::WriteRejected)
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        match self.read() {
            Ok(best) => {
                log::info!("Loaded best score {}", best);
                best
            }
            Err(e) => {
                log::warn!("Best score unavailable ({}), starting fresh", e);
                0
            }
        }
    }

    fn save(&mut self, best: u64) {
        match self.write(best) {
            Ok(()) => log::info!("Best score {} saved", best),
            Err(e) => log::warn!("Failed to save best score: {}", e),
        }
    }
}
