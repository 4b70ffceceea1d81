//! Persistence store trait for scale records

use crate::error::Result;
use crate::model::ScaleRecord;

/// Durable keyed storage of scale records for one dataset side.
///
/// Saving a record replaces only the entry with the same name; records
/// stored under other names are kept.
pub trait ScaleStore: Send + Sync {
    /// Load the record stored under `name`, `None` when absent.
    fn load(&self, name: &str) -> Result<Option<ScaleRecord>>;

    /// Insert or replace `record`, merging with the stored records.
    fn save(&self, record: &ScaleRecord) -> Result<()>;

    /// Names of all stored records.
    fn names(&self) -> Result<Vec<String>>;

    /// Short description used in log output.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Mock implementation: map guarded by a mutex
    struct MapStore {
        records: Mutex<BTreeMap<String, Vec<f64>>>,
    }

    impl ScaleStore for MapStore {
        fn load(&self, name: &str) -> Result<Option<ScaleRecord>> {
            let records = self.records.lock().unwrap();
            Ok(records
                .get(name)
                .map(|f| ScaleRecord::new(name, f.clone())))
        }

        fn save(&self, record: &ScaleRecord) -> Result<()> {
            self.records
                .lock()
                .unwrap()
                .insert(record.name.clone(), record.factors.clone());
            Ok(())
        }

        fn names(&self) -> Result<Vec<String>> {
            Ok(self.records.lock().unwrap().keys().cloned().collect())
        }

        fn describe(&self) -> String {
            "map".to_string()
        }
    }

    #[test]
    fn test_store_is_object_safe() {
        let store: Box<dyn ScaleStore> = Box::new(MapStore {
            records: Mutex::new(BTreeMap::new()),
        });
        store.save(&ScaleRecord::new("a", vec![1.0])).unwrap();
        store.save(&ScaleRecord::new("b", vec![2.0, 3.0])).unwrap();

        assert_eq!(store.names().unwrap(), vec!["a", "b"]);
        assert_eq!(store.load("b").unwrap().unwrap().factors, vec![2.0, 3.0]);
        assert!(store.load("c").unwrap().is_none());
    }
}
