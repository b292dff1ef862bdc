//! Core WeekStore implementation

use eyre::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Identifier for a week: the ISO date (`YYYY-MM-DD`) of its Monday
pub type WeekId = String;

/// Directory-backed store holding one JSON record per week
///
/// Generic over the record type so the inspection CLI can work with raw
/// `serde_json::Value` while the planner uses its own domain type.
pub struct WeekStore<T> {
    /// Base path for storage
    base_path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> WeekStore<T> {
    /// Open or create a week store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;
        debug!(?base_path, "Opened week store");
        Ok(Self {
            base_path,
            _record: PhantomData,
        })
    }

    /// Load the record for a week
    ///
    /// Returns `Ok(None)` when no record exists. A record that exists but
    /// cannot be read or parsed is also reported as `None`: a corrupt blob
    /// left behind by an interrupted write must not take the planner down,
    /// so the caller falls back to an empty week the same way it does for
    /// a week never visited.
    pub fn load(&self, week_id: &str) -> Result<Option<T>> {
        let path = self.record_path(week_id);
        if !path.exists() {
            debug!(week_id, "No record on disk");
            return Ok(None);
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(week_id, error = %e, "Unreadable record, treating as absent");
                return Ok(None);
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(week_id, error = %e, "Corrupt record, treating as absent");
                Ok(None)
            }
        }
    }

    /// Durably write the record for a week
    ///
    /// Whole-record replacement, idempotent. The write goes to a temp file
    /// first and is renamed into place so a crash mid-write leaves the old
    /// record intact rather than a truncated one.
    pub fn save(&self, week_id: &str, record: &T) -> Result<()> {
        let path = self.record_path(week_id);
        let tmp = path.with_extension("json.tmp");

        let raw = serde_json::to_string_pretty(record).context("Failed to serialize record")?;
        fs::write(&tmp, raw).context(format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path).context(format!("Failed to replace {}", path.display()))?;

        debug!(week_id, "Saved record");
        Ok(())
    }

    /// Delete the record for a week, if any
    pub fn delete(&self, week_id: &str) -> Result<bool> {
        let path = self.record_path(week_id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).context(format!("Failed to delete {}", path.display()))?;
        debug!(week_id, "Deleted record");
        Ok(true)
    }

    /// List all stored week ids, sorted ascending
    pub fn list_weeks(&self) -> Result<Vec<WeekId>> {
        let mut weeks = Vec::new();
        for entry in fs::read_dir(&self.base_path).context("Failed to read store directory")? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                weeks.push(stem.to_string());
            }
        }
        weeks.sort();
        Ok(weeks)
    }

    /// Raw record contents, for inspection tooling
    pub fn cat(&self, week_id: &str) -> Result<String> {
        let path = self.record_path(week_id);
        fs::read_to_string(&path).context(format!("No record for week {}", week_id))
    }

    /// Base directory of the store
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    fn record_path(&self, week_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", week_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Rec {
        label: String,
        count: u32,
    }

    fn store(dir: &TempDir) -> WeekStore<Rec> {
        WeekStore::open(dir.path()).expect("open store")
    }

    #[test]
    fn test_load_absent_week() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).load("2024-06-03").unwrap().is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let rec = Rec {
            label: "hello".to_string(),
            count: 3,
        };

        store.save("2024-06-03", &rec).unwrap();
        let loaded = store.load("2024-06-03").unwrap().expect("record present");
        assert_eq!(loaded, rec);
    }

    #[test]
    fn test_save_is_idempotent_replacement() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let a = Rec {
            label: "a".to_string(),
            count: 1,
        };
        let b = Rec {
            label: "b".to_string(),
            count: 2,
        };

        store.save("2024-06-03", &a).unwrap();
        store.save("2024-06-03", &b).unwrap();
        store.save("2024-06-03", &b).unwrap();

        assert_eq!(store.load("2024-06-03").unwrap().unwrap(), b);
        assert_eq!(store.list_weeks().unwrap(), vec!["2024-06-03".to_string()]);
    }

    #[test]
    fn test_corrupt_record_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::write(dir.path().join("2024-06-03.json"), "{not json").unwrap();

        assert!(store.load("2024-06-03").unwrap().is_none());
    }

    #[test]
    fn test_list_weeks_sorted() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let rec = Rec {
            label: "x".to_string(),
            count: 0,
        };

        store.save("2024-06-10", &rec).unwrap();
        store.save("2024-05-27", &rec).unwrap();
        store.save("2024-06-03", &rec).unwrap();

        assert_eq!(
            store.list_weeks().unwrap(),
            vec![
                "2024-05-27".to_string(),
                "2024-06-03".to_string(),
                "2024-06-10".to_string()
            ]
        );
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let rec = Rec {
            label: "x".to_string(),
            count: 0,
        };

        store.save("2024-06-03", &rec).unwrap();
        assert!(store.delete("2024-06-03").unwrap());
        assert!(!store.delete("2024-06-03").unwrap());
        assert!(store.load("2024-06-03").unwrap().is_none());
    }
}
