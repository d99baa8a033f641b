//! Local contact directory
//!
//! [`ContactDirectory`] is the read/write face of the locally cached contacts.
//! Persistence is delegated to a [`ContactStore`]; every write for a given
//! contact id runs under that id's lock, so a read-compare-write sequence
//! cannot interleave with another writer of the same contact.
//!
//! ```
//! use rostercore::directory::{ContactDirectory, MemoryStore};
//! use rostercore::model::ContactRecord;
//!
//! let directory = ContactDirectory::new(MemoryStore::new());
//! directory.insert(&ContactRecord::new(1u64, "ana@x.com").with_first_name("Ana"))?;
//! directory.set_nickname(1u64.into(), Some("Annie"))?;
//!
//! assert_eq!(directory.contact_name(1u64.into())?.as_deref(), Some("Annie"));
//! # Ok::<(), rostercore::Error>(())
//! ```

mod locks;
mod memory;

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::{AccountContact, ContactId, ContactRecord};
use crate::names;

use locks::ContactLocks;

pub use memory::MemoryStore;

/// External key-value store holding contact records by id.
pub trait ContactStore: Send + Sync {
    /// Load the record for `id`, if cached.
    fn load(&self, id: ContactId) -> Result<Option<ContactRecord>>;

    /// Durably write `record`, replacing any record with the same id.
    fn store(&self, record: &ContactRecord) -> Result<()>;

    /// All cached records, ordered by id.
    fn records(&self) -> Result<Vec<ContactRecord>>;
}

/// Called after a first or last name write so contact views can redraw.
pub trait ViewRefresh: Send + Sync {
    fn refresh(&self);
}

impl<F> ViewRefresh for F
where
    F: Fn() + Send + Sync,
{
    fn refresh(&self) {
        self();
    }
}

/// Result of a guarded nickname update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NicknameWrite {
    /// Nothing cached for the id; nothing was written.
    NotCached,
    /// The decision left the nickname as it was.
    Unchanged,
    /// The new nickname was durably stored.
    Written {
        old: Option<String>,
        new: Option<String>,
    },
}

/// Cached contacts with per-contact write serialization.
pub struct ContactDirectory<S> {
    store: S,
    locks: ContactLocks,
    refresh: Option<Arc<dyn ViewRefresh>>,
}

impl<S: fmt::Debug> fmt::Debug for ContactDirectory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactDirectory")
            .field("store", &self.store)
            .field("refresh", &self.refresh.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: ContactStore> ContactDirectory<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: ContactLocks::default(),
            refresh: None,
        }
    }

    /// Attach the view refresh hook fired after name writes.
    #[must_use]
    pub fn with_refresh(mut self, refresh: impl ViewRefresh + 'static) -> Self {
        self.refresh = Some(Arc::new(refresh));
        self
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The cached record for `id`, or `None` if the contact is not cached.
    pub fn lookup(&self, id: ContactId) -> Result<Option<ContactRecord>> {
        self.store.load(id)
    }

    /// Cache a record for a contact that became visible.
    pub fn insert(&self, record: &ContactRecord) -> Result<()> {
        self.locks.with(record.id, || self.store.store(record))
    }

    /// All cached records, ordered by id.
    pub fn records(&self) -> Result<Vec<ContactRecord>> {
        self.store.records()
    }

    /// Persist `nickname` for `id` (`None` clears it).
    ///
    /// Setting the value already stored is a no-op.
    ///
    /// # Errors
    /// [`Error::ContactNotCached`] if nothing is cached for `id`, or the
    /// store's write error.
    pub fn set_nickname(&self, id: ContactId, nickname: Option<&str>) -> Result<()> {
        let write = self.compare_and_set_nickname(id, |old| {
            (old != nickname).then(|| nickname.map(str::to_string))
        })?;
        match write {
            NicknameWrite::NotCached => Err(Error::ContactNotCached(id)),
            NicknameWrite::Unchanged | NicknameWrite::Written { .. } => Ok(()),
        }
    }

    /// Read, decide and write a nickname as one critical section for `id`.
    ///
    /// `decide` sees the currently stored nickname and returns `Some(new)` to
    /// write `new`, or `None` to leave the record untouched.
    pub fn compare_and_set_nickname<F>(&self, id: ContactId, decide: F) -> Result<NicknameWrite>
    where
        F: FnOnce(Option<&str>) -> Option<Option<String>>,
    {
        self.locks.with(id, || {
            let Some(mut record) = self.store.load(id)? else {
                return Ok(NicknameWrite::NotCached);
            };
            let Some(new) = decide(record.nickname.as_deref()) else {
                return Ok(NicknameWrite::Unchanged);
            };
            let old = std::mem::replace(&mut record.nickname, new.clone());
            self.store.store(&record)?;
            Ok(NicknameWrite::Written { old, new })
        })
    }

    /// Persist the first name for `id`, then refresh contact views.
    pub fn set_first_name(&self, id: ContactId, first_name: Option<&str>) -> Result<()> {
        self.update_record(id, |record| record.first_name = first_name.map(str::to_string))?;
        tracing::debug!("First name updated for {}", id);
        self.refresh_views();
        Ok(())
    }

    /// Persist the last name for `id`, then refresh contact views.
    pub fn set_last_name(&self, id: ContactId, last_name: Option<&str>) -> Result<()> {
        self.update_record(id, |record| record.last_name = last_name.map(str::to_string))?;
        tracing::debug!("Last name updated for {}", id);
        self.refresh_views();
        Ok(())
    }

    fn update_record(&self, id: ContactId, apply: impl FnOnce(&mut ContactRecord)) -> Result<()> {
        self.locks.with(id, || {
            let mut record = self.store.load(id)?.ok_or(Error::ContactNotCached(id))?;
            apply(&mut record);
            self.store.store(&record)
        })
    }

    fn refresh_views(&self) {
        if let Some(refresh) = &self.refresh {
            refresh.refresh();
        }
    }

    /// Join the account's visible contacts with their cached records.
    ///
    /// Contacts that are not visible, or visible but not cached yet, are left
    /// out. Order follows `contacts`.
    pub fn list_visible_contacts(
        &self,
        contacts: &[AccountContact],
    ) -> Result<Vec<(ContactId, ContactRecord)>> {
        let mut visible = Vec::new();
        for contact in contacts.iter().filter(|c| c.visibility.is_visible()) {
            if let Some(record) = self.store.load(contact.id)? {
                visible.push((contact.id, record));
            }
        }
        Ok(visible)
    }

    // ==================== Name queries ====================

    /// Display name of a cached contact (nickname first).
    pub fn contact_name(&self, id: ContactId) -> Result<Option<String>> {
        Ok(self.lookup(id)?.as_ref().map(names::resolve_display_name))
    }

    /// Cached nickname, `None` when unset or not cached.
    pub fn nickname(&self, id: ContactId) -> Result<Option<String>> {
        Ok(self.lookup(id)?.and_then(|r| r.nickname))
    }

    /// Short label for a contact, empty if not cached.
    pub fn first_line_name(&self, id: ContactId) -> Result<String> {
        Ok(self
            .lookup(id)?
            .as_ref()
            .map(names::resolve_first_line_name)
            .unwrap_or_default())
    }

    /// Cached display name, falling back to the account email.
    pub fn user_display_name(&self, id: ContactId, email: &str) -> Result<String> {
        Ok(self.contact_name(id)?.unwrap_or_else(|| email.to_string()))
    }
}
