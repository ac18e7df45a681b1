//! JSON file store for native builds

use std::fs;
use std::path::{Path, PathBuf};

use super::{BestScoreRecord, PersistenceError, ScoreStore};

/// Best score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<u64, PersistenceError> {
        let json = fs::read_to_string(&self.path)?;
        Ok(BestScoreRecord::from_json(&json)?.best_score)
    }

    fn write(&self, best: u64) -> Result<(), PersistenceError> {
        let json = BestScoreRecord { best_score: best }.to_json()?;
        // Write-then-rename so a crash never leaves a truncated record
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> u64 {
        match self.read() {
            Ok(best) => {
                log::info!("Loaded best score {} from {}", best, self.path.display());
                best
            }
            Err(PersistenceError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                0
            }
            Err(e) => {
                log::warn!("Ignoring best score at {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, best: u64) {
        match self.write(best) {
            Ok(()) => log::info!("Best score {} saved", best),
            Err(e) => log::warn!("Failed to save best score to {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cat-runner-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved");
        let mut store = FileStore::new(&path);
        store.save(77);
        assert_eq!(FileStore::new(&path).load(), 77);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_loads_zero() {
        let path = temp_path("corrupt");
        fs::write(&path, "garbage").unwrap();
        assert_eq!(FileStore::new(&path).load(), 0);
        let _ = fs::remove_file(&path);
    }
}
