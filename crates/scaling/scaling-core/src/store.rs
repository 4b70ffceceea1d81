//! Scale record stores.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

use scaling_spi::{Result, ScaleRecord, ScaleStore, ScalingError};

type RecordMap = BTreeMap<String, Vec<f64>>;

/// Scale records kept in one JSON file shaped `{ "<name>": [f64, ...] }`.
///
/// A missing or empty file reads as an empty store. Every save re-reads the
/// file and rewrites the merged mapping; saves through the same store are
/// serialized, the last writer wins.
#[derive(Debug)]
pub struct JsonScaleStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonScaleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<RecordMap> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RecordMap::new()),
            Err(e) => return Err(self.read_error(e)),
        };
        if text.trim().is_empty() {
            return Ok(RecordMap::new());
        }
        serde_json::from_str(&text).map_err(|e| self.read_error(e))
    }

    fn read_error(&self, reason: impl std::fmt::Display) -> ScalingError {
        ScalingError::PersistenceRead {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    fn write_error(&self, reason: impl std::fmt::Display) -> ScalingError {
        ScalingError::PersistenceWrite {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl ScaleStore for JsonScaleStore {
    fn load(&self, name: &str) -> Result<Option<ScaleRecord>> {
        Ok(self
            .read_all()?
            .remove(name)
            .map(|factors| ScaleRecord::new(name, factors)))
    }

    fn save(&self, record: &ScaleRecord) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // An unreadable file cannot be merged into; refuse to overwrite it.
        let mut records = self.read_all().map_err(|e| self.write_error(e))?;
        records.insert(record.name.clone(), record.factors.clone());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        let json = serde_json::to_string_pretty(&records).map_err(|e| self.write_error(e))?;
        fs::write(&self.path, json).map_err(|e| self.write_error(e))?;

        tracing::debug!(path = %self.path.display(), name = %record.name, "scale record saved");
        Ok(())
    }

    fn names(&self) -> Result<Vec<String>> {
        Ok(self.read_all()?.into_keys().collect())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process scale record store.
#[derive(Debug, Default)]
pub struct MemoryScaleStore {
    records: RwLock<RecordMap>,
}

impl MemoryScaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `record`.
    pub fn with_record(self, record: ScaleRecord) -> Self {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.name, record.factors);
        self
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScaleStore for MemoryScaleStore {
    fn load(&self, name: &str) -> Result<Option<ScaleRecord>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records
            .get(name)
            .map(|factors| ScaleRecord::new(name, factors.clone())))
    }

    fn save(&self, record: &ScaleRecord) -> Result<()> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.name.clone(), record.factors.clone());
        Ok(())
    }

    fn names(&self) -> Result<Vec<String>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.keys().cloned().collect())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonScaleStore::new(dir.path().join("input_log.json"));
        assert!(store.load("scaling").unwrap().is_none());
        assert!(store.names().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonScaleStore::new(dir.path().join("input_log.json"));
        store
            .save(&ScaleRecord::new("scaling", vec![0.5, 2.0, 1e-3]))
            .unwrap();

        let record = store.load("scaling").unwrap().unwrap();
        assert_eq!(record.name, "scaling");
        assert_eq!(record.factors, vec![0.5, 2.0, 1e-3]);
    }

    #[test]
    fn test_save_merges_other_denominators() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output_log.json");
        std::fs::write(&path, r#"{"pretrain": [1.0, 2.0]}"#).unwrap();

        let store = JsonScaleStore::new(&path);
        store.save(&ScaleRecord::new("finetune", vec![3.0])).unwrap();

        assert_eq!(store.names().unwrap(), vec!["finetune", "pretrain"]);
        assert_eq!(store.load("pretrain").unwrap().unwrap().factors, vec![1.0, 2.0]);
    }

    #[test]
    fn test_save_replaces_same_denominator() {
        let dir = TempDir::new().unwrap();
        let store = JsonScaleStore::new(dir.path().join("log.json"));
        store.save(&ScaleRecord::new("scaling", vec![1.0])).unwrap();
        store.save(&ScaleRecord::new("scaling", vec![9.0])).unwrap();

        assert_eq!(store.load("scaling").unwrap().unwrap().factors, vec![9.0]);
        assert_eq!(store.names().unwrap().len(), 1);
    }

    #[test]
    fn test_file_shape_is_plain_mapping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");
        JsonScaleStore::new(&path)
            .save(&ScaleRecord::new("scaling", vec![1.5, 2.5]))
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "scaling": [1.5, 2.5] }));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("input_log.json");
        JsonScaleStore::new(&path)
            .save(&ScaleRecord::new("scaling", vec![1.0]))
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_read_and_write_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonScaleStore::new(&path);

        assert!(matches!(
            store.load("scaling"),
            Err(ScalingError::PersistenceRead { .. })
        ));
        assert!(matches!(
            store.save(&ScaleRecord::new("scaling", vec![1.0])),
            Err(ScalingError::PersistenceWrite { .. })
        ));
        // The unreadable file is left as it was
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryScaleStore::new().with_record(ScaleRecord::new("a", vec![1.0]));
        store.save(&ScaleRecord::new("b", vec![2.0])).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.load("a").unwrap().unwrap().factors, vec![1.0]);
        assert!(store.load("c").unwrap().is_none());
    }
}
