//! Persistent top-5 high-score table.
//!
//! The board lives in a single JSON file. Every record re-reads the file,
//! merges the new entry, truncates and rewrites it through a temporary file
//! so an interrupted write never leaves a half-written board behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_LEADERBOARD_PATH: &str = "leaderboard.json";

/// Number of entries kept on the board.
pub const MAX_ENTRIES: usize = 5;

/// One line of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub nickname: String,
    pub avatar: String,
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn new(nickname: impl Into<String>, avatar: impl Into<String>, score: u32) -> Self {
        Self {
            nickname: nickname.into(),
            avatar: avatar.into(),
            score,
        }
    }
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("failed to write leaderboard {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode leaderboard: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Appends `entry`, sorts by score (highest first) and keeps the top entries.
///
/// The sort is stable: an entry tying with existing ones ranks after them.
pub fn merge(mut board: Vec<LeaderboardEntry>, entry: LeaderboardEntry) -> Vec<LeaderboardEntry> {
    board.push(entry);
    board.sort_by(|a, b| b.score.cmp(&a.score));
    board.truncate(MAX_ENTRIES);
    board
}

/// File-backed leaderboard.
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored board.
    ///
    /// A missing or unreadable file counts as an empty board.
    pub fn load(&self) -> Vec<LeaderboardEntry> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read leaderboard {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&json) {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!("Ignoring corrupt leaderboard {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Adds an entry to the stored board and returns the board as written.
    pub fn record(
        &self,
        entry: LeaderboardEntry,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        tracing::info!("Recording {} coins for {}", entry.score, entry.nickname);

        let board = merge(self.load(), entry);
        self.save(&board)?;
        Ok(board)
    }

    fn save(&self, board: &[LeaderboardEntry]) -> Result<(), LeaderboardError> {
        let temp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(board)?;

        let io_err = |source| LeaderboardError::Io {
            path: self.path.clone(),
            source,
        };

        // Write to temp file, then swap it in
        fs::write(&temp_path, json).map_err(io_err)?;
        fs::rename(&temp_path, &self.path).map_err(io_err)?;

        tracing::debug!("Saved leaderboard: {}", self.path.display());
        Ok(())
    }
}

impl Default for LeaderboardStore {
    fn default() -> Self {
        Self::new(DEFAULT_LEADERBOARD_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(nickname: &str, score: u32) -> LeaderboardEntry {
        LeaderboardEntry::new(nickname, "🧠", score)
    }

    fn store(temp_dir: &TempDir) -> LeaderboardStore {
        LeaderboardStore::new(temp_dir.path().join("leaderboard.json"))
    }

    fn is_sorted_desc(board: &[LeaderboardEntry]) -> bool {
        board.windows(2).all(|pair| pair[0].score >= pair[1].score)
    }

    #[test]
    fn test_merge_sorts_and_truncates() {
        let mut board = Vec::new();
        for (i, score) in [30, 10, 50, 20, 40, 0, 60].into_iter().enumerate() {
            board = merge(board, entry(&format!("p{}", i), score));
            assert!(board.len() <= MAX_ENTRIES);
            assert!(is_sorted_desc(&board));
        }

        let scores: Vec<u32> = board.iter().map(|e| e.score).collect();
        assert_eq!(scores, [60, 50, 40, 30, 20]);
    }

    #[test]
    fn test_merge_ties_keep_insertion_order() {
        let board = vec![entry("first", 20), entry("second", 10)];
        let board = merge(board, entry("late", 20));

        let names: Vec<&str> = board.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(names, ["first", "late", "second"]);
    }

    #[test]
    fn test_low_score_does_not_displace_full_board() {
        let full: Vec<_> = (1..=5).rev().map(|i| entry(&format!("p{}", i), i * 10)).collect();

        let once = merge(full.clone(), entry("low", 10));
        let twice = merge(once.clone(), entry("low", 10));
        assert_eq!(once, full);
        assert_eq!(twice, full);
    }

    #[test]
    fn test_duplicate_appears_only_when_ranked() {
        let board = vec![entry("a", 50), entry("b", 40), entry("c", 30)];
        let board = merge(board, entry("d", 45));
        let board = merge(board, entry("d", 45));

        let names: Vec<&str> = board.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(names, ["a", "d", "d", "b", "c"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(store(&temp_dir).load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        fs::write(store.path(), "[{\"nickname\": ").unwrap();
        assert!(store.load().is_empty());

        fs::write(store.path(), "{\"nickname\": \"x\"}").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_record_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        store.record(entry("Alice", 30)).unwrap();
        store.record(entry("Bob", 50)).unwrap();
        let written = store.record(entry("Carol", 30)).unwrap();

        assert_eq!(store.load(), written);
        let names: Vec<&str> = written.iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(names, ["Bob", "Alice", "Carol"]);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_record_many_stays_bounded() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        for score in [10, 100, 0, 70, 70, 30, 90, 20] {
            let board = store.record(entry("p", score)).unwrap();
            assert!(board.len() <= MAX_ENTRIES);
            assert!(is_sorted_desc(&board));
        }

        let scores: Vec<u32> = store.load().iter().map(|e| e.score).collect();
        assert_eq!(scores, [100, 90, 70, 70, 30]);
    }

    #[test]
    fn test_failed_write_keeps_previous_board() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        let before = store.record(entry("Alice", 30)).unwrap();

        // A directory where the temp file should go makes the write fail
        fs::create_dir(store.path().with_extension("json.tmp")).unwrap();

        let err = store.record(entry("Bob", 50)).unwrap_err();
        assert!(matches!(err, LeaderboardError::Io { .. }));
        assert_eq!(store.load(), before);
    }

    #[test]
    fn test_failed_rename_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        fs::create_dir(store.path()).unwrap();
        fs::write(store.path().join("keep.txt"), "x").unwrap();

        let err = store.record(entry("Bob", 50)).unwrap_err();
        assert!(matches!(err, LeaderboardError::Io { .. }));
        assert!(store.path().is_dir());
        assert_eq!(fs::read_to_string(store.path().join("keep.txt")).unwrap(), "x");
    }

    #[test]
    fn test_record_over_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        fs::write(store.path(), "garbage").unwrap();

        let board = store.record(entry("Alice", 20)).unwrap();
        assert_eq!(board, vec![entry("Alice", 20)]);
    }

    #[test]
    fn test_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        store.record(entry("Alice", 20)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "nickname": "Alice", "avatar": "🧠", "score": 20 }])
        );
    }
}
