#![allow(non_snake_case)]
//! # `RosterCore`
//!
//! The contact directory engine behind Roster: display name resolution and
//! reconciliation of cached nicknames with the account's remote snapshot.
//!
//! ## Modules
//!
//! - **names** - Display name precedence (nickname, full name, email)
//! - **directory** - Cached contacts over a pluggable store, with per-contact locking
//! - **reconcile** - Snapshot diff-and-apply with exactly-once change notification
//! - **codec** - Account handle and nickname value decoding
//! - **events** - The `NicknameChanged` event and sink implementations
//!
//! ## Quick Start
//!
//! ```
//! use rostercore::prelude::*;
//!
//! let directory = ContactDirectory::new(MemoryStore::with_records([
//!     ContactRecord::new(1u64, "bob@x.com").with_first_name("Bob"),
//!     ContactRecord::new(2u64, "rob@x.com").with_nickname("Bobby"),
//! ]));
//! let contacts = [AccountContact::visible(1u64), AccountContact::visible(2u64)];
//! let snapshot = NicknameSnapshot::from_entries([
//!     (ContactId(1).encode(), Base64Codec::encode_nickname("Robert")),
//! ]);
//!
//! let log = EventLog::new();
//! let report = reconcile_nicknames(&directory, &contacts, &snapshot, &log);
//!
//! // Contact 2 is absent from a non-empty snapshot, so its nickname is cleared
//! assert_eq!(report.changed_ids(), vec![ContactId(1), ContactId(2)]);
//! assert_eq!(directory.contact_name(ContactId(1))?.as_deref(), Some("Robert"));
//! assert_eq!(directory.contact_name(ContactId(2))?.as_deref(), Some("rob@x.com"));
//! # Ok::<(), rostercore::Error>(())
//! ```

pub mod codec;
pub mod directory;
pub mod error;
pub mod events;
pub mod model;
pub mod names;
pub mod reconcile;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::codec::{Base64Codec, SnapshotCodec};
    pub use crate::directory::{ContactDirectory, ContactStore, MemoryStore, ViewRefresh};
    pub use crate::error::{Error, Result};
    pub use crate::events::{ContactEvent, EventLog, EventSink, NullSink};
    pub use crate::model::{AccountContact, ContactId, ContactRecord, NicknameSnapshot, Visibility};
    pub use crate::names::{build_full_name, resolve_display_name, resolve_first_line_name};
    pub use crate::reconcile::{ReconcileOptions, ReconcileReport, reconcile_nicknames};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
