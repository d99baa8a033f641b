//! Nickname reconciliation pass

use std::collections::HashSet;

use rayon::prelude::*;

use crate::codec::{Base64Codec, SnapshotCodec};
use crate::directory::{ContactDirectory, ContactStore, NicknameWrite};
use crate::events::{self, ContactEvent, EventSink};
use crate::model::{AccountContact, ContactId, NicknameSnapshot};

use super::index::SnapshotIndex;
use super::types::{ContactOutcome, NicknameChange, ReconcileOptions, ReconcileReport};

/// The change predicate: a write is due unless both sides are absent or
/// both hold the same string.
#[must_use]
pub fn nickname_changed(old: Option<&str>, new: Option<&str>) -> bool {
    match (old, new) {
        (None, None) => false,
        (Some(old), Some(new)) => old != new,
        _ => true,
    }
}

/// Brings cached nicknames in line with a remote snapshot.
///
/// Holds only borrowed collaborators; build one per pass.
pub struct NicknameReconciler<'a, S> {
    directory: &'a ContactDirectory<S>,
    sink: &'a dyn EventSink,
    codec: &'a dyn SnapshotCodec,
    options: ReconcileOptions,
}

impl<'a, S: ContactStore> NicknameReconciler<'a, S> {
    /// Reconciler using the default base64 codec.
    pub fn new(directory: &'a ContactDirectory<S>, sink: &'a dyn EventSink) -> Self {
        Self {
            directory,
            sink,
            codec: &Base64Codec,
            options: ReconcileOptions::default(),
        }
    }

    #[must_use]
    pub fn with_codec(mut self, codec: &'a dyn SnapshotCodec) -> Self {
        self.codec = codec;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.options = options;
        self
    }

    /// Run one pass over the visible subset of `contacts`.
    ///
    /// Each visible contact is handled independently: its pre-pass nickname is
    /// compared with the snapshot's value under the contact's lock, written
    /// only if it differs, and one [`ContactEvent::NicknameChanged`] is
    /// emitted after a successful write. A contact listed twice is handled
    /// once.
    pub fn reconcile(&self, contacts: &[AccountContact], snapshot: &NicknameSnapshot) -> ReconcileReport {
        let index = if snapshot.is_empty() {
            SnapshotIndex::default()
        } else {
            SnapshotIndex::build(snapshot, self.codec)
        };

        let mut seen = HashSet::new();
        let visible: Vec<ContactId> = contacts
            .iter()
            .filter(|c| c.visibility.is_visible())
            .map(|c| c.id)
            .filter(|id| seen.insert(*id))
            .collect();

        tracing::debug!(
            "Reconciling {} visible contact(s) against {} snapshot entries{}",
            visible.len(),
            index.len(),
            if snapshot.is_absent() { " (no nicknames)" } else { "" }
        );

        let outcomes: Vec<(ContactId, bool, ContactOutcome)> = if self.options.parallel {
            visible
                .par_iter()
                .map(|&id| self.reconcile_contact(id, &index))
                .collect()
        } else {
            visible
                .iter()
                .map(|&id| self.reconcile_contact(id, &index))
                .collect()
        };

        let mut report = ReconcileReport::default();
        for (id, decode_failed, outcome) in outcomes {
            report.record(id, decode_failed, outcome);
        }

        tracing::info!("Nickname reconciliation: {}", report.summary());
        report
    }

    fn reconcile_contact(&self, id: ContactId, index: &SnapshotIndex<'_>) -> (ContactId, bool, ContactOutcome) {
        let mut decode_failed = false;
        let new_nickname = index.get(id).and_then(|encoded| {
            self.codec
                .decode_nickname(encoded)
                .map_err(|e| {
                    tracing::warn!("Could not decode nickname for {}: {}", id, e);
                    decode_failed = true;
                })
                .ok()
        });

        let write = self.directory.compare_and_set_nickname(id, |old| {
            nickname_changed(old, new_nickname.as_deref()).then(|| new_nickname.clone())
        });

        let outcome = match write {
            Ok(NicknameWrite::NotCached) => ContactOutcome::NotCached,
            Ok(NicknameWrite::Unchanged) => ContactOutcome::Unchanged,
            Ok(NicknameWrite::Written { old, new }) => {
                tracing::debug!("Nickname for {} changed: {:?} -> {:?}", id, old, new);
                events::deliver(self.sink, ContactEvent::NicknameChanged(id));
                ContactOutcome::Changed(NicknameChange { id, old, new })
            }
            Err(error) => {
                tracing::warn!("Nickname write failed for {}: {}", id, error);
                ContactOutcome::WriteFailed(error)
            }
        };
        (id, decode_failed, outcome)
    }
}

/// Run a sequential pass with the default codec.
///
/// ```
/// use rostercore::prelude::*;
///
/// let directory = ContactDirectory::new(MemoryStore::with_records([
///     ContactRecord::new(1u64, "bob@x.com").with_first_name("Bob"),
/// ]));
/// let snapshot = NicknameSnapshot::from_entries([
///     (ContactId(1).encode(), Base64Codec::encode_nickname("Robert")),
/// ]);
/// let log = EventLog::new();
///
/// let report = reconcile_nicknames(&directory, &[AccountContact::visible(1u64)], &snapshot, &log);
///
/// assert_eq!(report.changed_ids(), vec![ContactId(1)]);
/// assert_eq!(directory.nickname(ContactId(1))?.as_deref(), Some("Robert"));
/// # Ok::<(), rostercore::Error>(())
/// ```
pub fn reconcile_nicknames<S: ContactStore>(
    directory: &ContactDirectory<S>,
    contacts: &[AccountContact],
    snapshot: &NicknameSnapshot,
    sink: &dyn EventSink,
) -> ReconcileReport {
    NicknameReconciler::new(directory, sink).reconcile(contacts, snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_predicate() {
        assert!(!nickname_changed(None, None));
        assert!(!nickname_changed(Some("a"), Some("a")));
        assert!(!nickname_changed(Some(""), Some("")));
        assert!(nickname_changed(Some("a"), Some("b")));
        assert!(nickname_changed(Some("a"), None));
        assert!(nickname_changed(None, Some("a")));
        assert!(nickname_changed(Some(""), None));
    }
}
