//! In-memory contact store

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::Result;
use crate::model::{ContactId, ContactRecord};

use super::ContactStore;

/// A [`ContactStore`] backed by a hash map.
///
/// Used by tests and by hosts that persist elsewhere and only need the
/// directory semantics.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<ContactId, ContactRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = ContactRecord>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().map(|r| (r.id, r)).collect()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContactStore for MemoryStore {
    fn load(&self, id: ContactId) -> Result<Option<ContactRecord>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(&id).cloned())
    }

    fn store(&self, record: &ContactRecord) -> Result<()> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.insert(record.id, record.clone());
        Ok(())
    }

    fn records(&self) -> Result<Vec<ContactRecord>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }
}
