use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Keeps the high score as a single integer in a text file.
///
/// Both directions are best-effort: a missing or garbled file reads as 0 and
/// a failed write is only logged.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    pub fn load(&self) -> u32 {
        match read_score(&self.path) {
            Ok(score) => score,
            Err(err) => {
                debug!("no high score loaded: {:#}", err);
                0
            }
        }
    }

    /// Raises `best` to `score` and writes it out, but only for a strictly
    /// higher score. Returns whether it did.
    pub fn record(&self, best: &mut u32, score: u32) -> bool {
        if score <= *best {
            return false;
        }

        *best = score;
        self.save(score);
        true
    }

    pub fn save(&self, score: u32) {
        if let Err(err) = write_score(&self.path, score) {
            warn!("high score not saved: {:#}", err);
        }
    }
}

fn read_score(path: &Path) -> Result<u32> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    text.trim()
        .parse()
        .with_context(|| format!("parsing {:?} from {}", text.trim(), path.display()))
}

fn write_score(path: &Path, score: u32) -> Result<()> {
    fs::write(path, score.to_string())
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("high_score.txt"));

        store.save(42);
        assert_eq!(store.load(), 42);
        assert_eq!(fs::read_to_string(dir.path().join("high_score.txt")).unwrap(), "42");
    }

    #[test]
    fn save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("high_score.txt"));

        store.save(120);
        store.save(7);
        assert_eq!(store.load(), 7);
    }

    #[test]
    fn higher_score_is_recorded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("high_score.txt");
        let store = HighScoreStore::new(&path);
        let mut best = 12;

        assert!(store.record(&mut best, 13));
        assert_eq!(best, 13);
        assert_eq!(store.load(), 13);
    }

    #[test]
    fn equal_or_lower_score_leaves_the_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("high_score.txt");
        let store = HighScoreStore::new(&path);
        let mut best = 12;

        assert!(!store.record(&mut best, 12));
        assert!(!store.record(&mut best, 3));
        assert_eq!(best, 12);
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("nope.txt"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn corrupt_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("high_score.txt");

        fs::write(&path, "lots").unwrap();
        assert_eq!(HighScoreStore::new(&path).load(), 0);

        fs::write(&path, "-3").unwrap();
        assert_eq!(HighScoreStore::new(&path).load(), 0);
    }

    #[test]
    fn surrounding_whitespace_is_fine() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("high_score.txt");

        fs::write(&path, " 31\n").unwrap();
        assert_eq!(HighScoreStore::new(&path).load(), 31);
    }

    #[test]
    fn unwritable_path_is_ignored() {
        let dir = TempDir::new().unwrap();
        // a directory can't be overwritten as a file
        let store = HighScoreStore::new(dir.path());
        store.save(10);
        assert_eq!(store.load(), 0);
    }
}
