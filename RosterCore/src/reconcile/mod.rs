//! Remote nickname reconciliation
//!
//! Compare the cached nicknames of visible contacts with a remote snapshot,
//! persist the differences and notify once per changed contact.
//!
//! # Running a Pass
//!
//! ```
//! use rostercore::prelude::*;
//! use rostercore::reconcile::{NicknameReconciler, ReconcileOptions};
//!
//! let directory = ContactDirectory::new(MemoryStore::with_records([
//!     ContactRecord::new(1u64, "ana@x.com").with_nickname("Annie"),
//! ]));
//! let log = EventLog::new();
//!
//! // The "no nicknames" sentinel clears every cached nickname
//! let report = NicknameReconciler::new(&directory, &log)
//!     .with_options(ReconcileOptions { parallel: true })
//!     .reconcile(&[AccountContact::visible(1u64)], &NicknameSnapshot::Absent);
//!
//! println!("{}", report.summary());
//! assert_eq!(report.cleared_count(), 1);
//! assert_eq!(log.events(), vec![ContactEvent::NicknameChanged(ContactId(1))]);
//! ```
//!

mod index;
mod reconciler;
mod types;

pub use index::SnapshotIndex;
pub use reconciler::{NicknameReconciler, nickname_changed, reconcile_nicknames};
pub use types::{NicknameChange, ReconcileOptions, ReconcileReport, WriteFailure};
