//! Recent searches
//!
//! `RecentSearches` is the bounded, case-insensitively deduplicated,
//! newest-first list of place names. `RecentStore` persists it as a JSON array
//! in an XDG-compliant data directory (`~/.local/share/skycast/` on Linux).

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Maximum number of remembered searches
pub const MAX_RECENT: usize = 5;

/// File name of the persisted list
const RECENT_FILE: &str = "recent_searches.json";

/// Errors from writing the recent-searches file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write recent searches: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode recent searches: {0}")]
    Json(#[from] serde_json::Error),
}

/// Most-recent-first list of searched place names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches {
    names: Vec<String>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from stored names, re-applying the dedup and size rules
    ///
    /// Stored files may have been edited by hand; the oldest-first replay
    /// keeps the first occurrence of each name in front.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut recent = Self::new();
        for name in names.into_iter().rev() {
            recent.record(name);
        }
        recent
    }

    /// Records a search: drops any case-insensitive duplicate, puts `name`
    /// in front, and keeps at most `MAX_RECENT` entries
    pub fn record(&mut self, name: impl Into<String>) {
        let name = name.into();
        let lowered = name.to_lowercase();
        self.names.retain(|existing| existing.to_lowercase() != lowered);
        self.names.insert(0, name);
        self.names.truncate(MAX_RECENT);
    }

    /// Names, newest first
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Reads and writes the recent-searches file
#[derive(Debug, Clone)]
pub struct RecentStore {
    /// Directory holding the file
    data_dir: PathBuf,
}

impl RecentStore {
    /// Creates a store in the XDG data directory
    ///
    /// Returns `None` if the directory cannot be determined (e.g., no home
    /// directory).
    pub fn new() -> Option<Self> {
        default_data_dir().map(Self::with_dir)
    }

    /// Creates a store in a custom directory
    pub fn with_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Path of the JSON file
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(RECENT_FILE)
    }

    /// Loads the persisted list
    ///
    /// A missing or unparsable file yields an empty list.
    pub fn load(&self) -> RecentSearches {
        let path = self.path();
        let Ok(content) = fs::read_to_string(&path) else {
            return RecentSearches::new();
        };

        match serde_json::from_str::<Vec<String>>(&content) {
            Ok(names) => RecentSearches::from_names(names),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable recent searches");
                RecentSearches::new()
            }
        }
    }

    /// Rewrites the file with the full list
    pub fn save(&self, recent: &RecentSearches) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string(recent)?;
        fs::write(self.path(), json)?;
        Ok(())
    }
}

/// XDG data directory for the application
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "skycast").map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (RecentStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = RecentStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_record_puts_newest_first() {
        let mut recent = RecentSearches::new();
        recent.record("London");
        recent.record("Paris");
        recent.record("Tokyo");
        assert_eq!(recent.names(), ["Tokyo", "Paris", "London"]);
    }

    #[test]
    fn test_record_dedups_case_insensitively_last_casing_wins() {
        let mut recent = RecentSearches::new();
        recent.record("Paris");
        recent.record("paris");
        assert_eq!(recent.names(), ["paris"]);
    }

    #[test]
    fn test_record_moves_existing_to_front() {
        let mut recent = RecentSearches::new();
        recent.record("London");
        recent.record("Paris");
        recent.record("Berlin");
        recent.record("LONDON");
        assert_eq!(recent.names(), ["LONDON", "Berlin", "Paris"]);
    }

    #[test]
    fn test_record_caps_at_five() {
        let mut recent = RecentSearches::new();
        for name in ["A", "B", "C", "D", "E", "F", "G"] {
            recent.record(name);
        }
        assert_eq!(recent.len(), MAX_RECENT);
        assert_eq!(recent.names(), ["G", "F", "E", "D", "C"]);
    }

    #[test]
    fn test_record_sequences_hold_invariants() {
        let inputs = [
            "Oslo", "oslo", "Rome", "Lima", "ROME", "Kyiv", "Quito", "lima", "Doha", "OSLO",
            "Kyiv", "Bern", "bern", "Riga",
        ];
        let mut recent = RecentSearches::new();
        let mut history: Vec<&str> = Vec::new();

        for name in inputs {
            recent.record(name);
            history.push(name);

            assert!(recent.len() <= MAX_RECENT);

            let lowered: Vec<String> = recent.names().iter().map(|n| n.to_lowercase()).collect();
            for (i, a) in lowered.iter().enumerate() {
                for b in lowered.iter().skip(i + 1) {
                    assert_ne!(a, b, "duplicate entry in {:?}", recent.names());
                }
            }

            // Expected order: most recent distinct names, newest first
            let mut expected: Vec<&str> = Vec::new();
            for candidate in history.iter().rev().copied() {
                if !expected
                    .iter()
                    .any(|e| e.to_lowercase() == candidate.to_lowercase())
                {
                    expected.push(candidate);
                }
            }
            expected.truncate(MAX_RECENT);
            assert_eq!(recent.names(), expected.as_slice());
        }
    }

    #[test]
    fn test_from_names_enforces_rules() {
        let recent = RecentSearches::from_names(["Paris", "paris", "A", "B", "C", "D", "E"]);
        assert_eq!(recent.names(), ["Paris", "A", "B", "C", "D"]);
    }

    #[test]
    fn test_load_returns_empty_for_missing_file() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_returns_empty_for_unparsable_file() {
        let (store, temp_dir) = create_test_store();
        fs::write(temp_dir.path().join(RECENT_FILE), "not json").expect("Should write");
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_writes_json_array() {
        let (store, temp_dir) = create_test_store();
        let mut recent = RecentSearches::new();
        recent.record("London");
        recent.record("Paris");

        store.save(&recent).expect("Save should succeed");

        let content =
            fs::read_to_string(temp_dir.path().join(RECENT_FILE)).expect("Should read file");
        assert_eq!(content, r#"["Paris","London"]"#);
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let (store, _temp_dir) = create_test_store();
        let mut recent = RecentSearches::new();
        for name in ["Oslo", "Rome", "Lima"] {
            recent.record(name);
        }

        store.save(&recent).expect("Save should succeed");
        assert_eq!(store.load(), recent);
    }

    #[test]
    fn test_save_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested").join("data");
        let store = RecentStore::with_dir(nested.clone());

        store
            .save(&RecentSearches::from_names(["Oslo"]))
            .expect("Save should succeed");

        assert!(nested.join(RECENT_FILE).exists());
    }

    #[test]
    fn test_new_uses_xdg_compliant_path() {
        if let Some(store) = RecentStore::new() {
            let path_str = store.path().to_string_lossy().to_string();
            assert!(path_str.contains("skycast"));
        }
        // Passes when no home directory exists (e.g., CI)
    }
}
