//! File-backed contact store
//!
//! One JSON object mapping each encoded handle to its record. The whole file
//! is rewritten on every store through a temp file in the same directory, so
//! a crash mid-write leaves the previous contents intact.
//!
//! Each store costs a full serialize and fsync of every cached record. A pass
//! that changes `n` of `m` contacts writes `n` files of size `m`; fine for an
//! address book, not for bulk loads of large directories.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use rostercore::directory::ContactStore;
use rostercore::model::{ContactId, ContactRecord};

use crate::error::{Error, Result};

type RecordMap = BTreeMap<ContactId, ContactRecord>;

/// Contact records persisted to a single JSON file
///
/// A store that fails to persist is rolled back in memory, so reads never see
/// a record the file does not hold.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: RwLock<RecordMap>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = if path.is_file() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                RecordMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| Error::Input {
                    path: path.clone(),
                    message: e.to_string(),
                })?
            }
        } else {
            RecordMap::new()
        };
        tracing::debug!("Opened contact store {} ({} records)", path.display(), records.len());
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// The store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, records: &RecordMap) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_vec_pretty(records)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl ContactStore for JsonFileStore {
    fn load(&self, id: ContactId) -> rostercore::Result<Option<ContactRecord>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(&id).cloned())
    }

    fn store(&self, record: &ContactRecord) -> rostercore::Result<()> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let previous = records.insert(record.id, record.clone());

        if let Err(e) = self.persist(&records) {
            match previous {
                Some(previous) => records.insert(record.id, previous),
                None => records.remove(&record.id),
            };
            tracing::warn!("Failed to write {}: {}", self.path.display(), e);
            return Err(rostercore::Error::StoreWrite {
                id: record.id,
                message: e.to_string(),
            });
        }
        Ok(())
    }

    fn records(&self) -> rostercore::Result<Vec<ContactRecord>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("contacts.json")).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.load(ContactId(1)).unwrap(), None);
    }

    #[test]
    fn test_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("contacts.json");

        let store = JsonFileStore::open(&path).unwrap();
        let record = ContactRecord::new(7u64, "ana@x.com").with_nickname("Annie");
        store.store(&record).unwrap();
        drop(store);

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.load(ContactId(7)).unwrap(), Some(record));
    }

    #[test]
    fn test_file_is_keyed_by_encoded_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.store(&ContactRecord::new(1u64, "a@x.com")).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[ContactId(1).encode()]["email"], "a@x.com");
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(Error::Input { .. })));
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() {
        let dir = tempfile::tempdir().unwrap();
        // The store path is a directory, so the final rename fails
        let path = dir.path().join("contacts.json");
        fs::create_dir(&path).unwrap();
        let store = JsonFileStore {
            path,
            records: RwLock::new(RecordMap::new()),
        };

        let err = store.store(&ContactRecord::new(3u64, "c@x.com")).unwrap_err();
        assert!(matches!(err, rostercore::Error::StoreWrite { id: ContactId(3), .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_replace_restores_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        fs::create_dir(&path).unwrap();
        let original = ContactRecord::new(3u64, "c@x.com").with_nickname("Cee");
        let store = JsonFileStore {
            path,
            records: RwLock::new(RecordMap::from([(original.id, original.clone())])),
        };

        let renamed = original.clone().with_nickname("Sea");
        assert!(store.store(&renamed).is_err());
        assert_eq!(store.load(ContactId(3)).unwrap(), Some(original));
        assert_eq!(store.len(), 1);
    }
}
