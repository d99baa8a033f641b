#![allow(non_snake_case)]
//! Roster - contact directory toolkit
//!
//! Wraps [`rostercore`] with a file-backed store, a settings file and the
//! `roster` command line.

use std::path::Path;

// Re-export rostercore
pub use rostercore;

pub mod config;
pub mod error;
pub mod input;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

use rostercore::directory::ContactDirectory;
use rostercore::events::EventSink;
use rostercore::model::{AccountContact, ContactId, ContactRecord, NicknameSnapshot};
use rostercore::names;
use rostercore::reconcile::{NicknameReconciler, ReconcileOptions, ReconcileReport};

pub use config::Settings;
pub use error::{Error, Result};
pub use store::JsonFileStore;

/// A cached contact with its resolved names
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContactView {
    pub display_name: String,
    pub first_line_name: String,
    #[serde(flatten)]
    pub record: ContactRecord,
}

impl From<ContactRecord> for ContactView {
    fn from(record: ContactRecord) -> Self {
        Self {
            display_name: names::resolve_display_name(&record),
            first_line_name: names::resolve_first_line_name(&record),
            record,
        }
    }
}

/// Main toolkit interface
#[derive(Debug)]
pub struct Roster {
    settings: Settings,
    directory: ContactDirectory<JsonFileStore>,
}

impl Roster {
    /// Open the contact store named by `settings`
    pub fn open(settings: Settings) -> Result<Self> {
        let store = JsonFileStore::open(&settings.store_path)?;
        let directory = ContactDirectory::new(store).with_refresh(|| {
            tracing::debug!("Contact names changed, views refreshed");
        });
        Ok(Self {
            settings,
            directory,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn directory(&self) -> &ContactDirectory<JsonFileStore> {
        &self.directory
    }

    /// Cache records, replacing any with the same handle. Returns the count.
    pub fn import(&self, records: impl IntoIterator<Item = ContactRecord>) -> Result<usize> {
        let mut count = 0;
        for record in records {
            self.directory.insert(&record)?;
            count += 1;
        }
        tracing::info!("Imported {} contact(s)", count);
        Ok(count)
    }

    /// Reconcile cached nicknames with a remote snapshot
    pub fn sync_nicknames(
        &self,
        contacts: &[AccountContact],
        snapshot: &NicknameSnapshot,
        sink: &dyn EventSink,
    ) -> ReconcileReport {
        let options = ReconcileOptions {
            parallel: self.settings.parallel,
        };
        NicknameReconciler::new(&self.directory, sink)
            .with_options(options)
            .reconcile(contacts, snapshot)
    }

    /// Load contacts and snapshot from JSON files, then reconcile
    pub fn sync_files(
        &self,
        contacts: &Path,
        snapshot: &Path,
        sink: &dyn EventSink,
    ) -> Result<ReconcileReport> {
        let contacts = input::load_account_contacts(contacts)?;
        let snapshot = input::load_snapshot(snapshot)?;
        Ok(self.sync_nicknames(&contacts, &snapshot, sink))
    }

    pub fn set_first_name(&self, id: ContactId, first_name: Option<&str>) -> Result<()> {
        Ok(self.directory.set_first_name(id, first_name)?)
    }

    pub fn set_last_name(&self, id: ContactId, last_name: Option<&str>) -> Result<()> {
        Ok(self.directory.set_last_name(id, last_name)?)
    }

    /// A cached contact, or `None`
    pub fn show(&self, id: ContactId) -> Result<Option<ContactView>> {
        Ok(self.directory.lookup(id)?.map(ContactView::from))
    }

    /// Every cached contact, ordered by handle
    pub fn list(&self) -> Result<Vec<ContactView>> {
        Ok(self
            .directory
            .records()?
            .into_iter()
            .map(ContactView::from)
            .collect())
    }
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
