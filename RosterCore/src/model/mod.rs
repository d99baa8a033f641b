//! Contact data model
//!
//! - [`ContactRecord`] - a locally cached contact
//! - [`AccountContact`] - a contact as the account system reports it
//! - [`NicknameSnapshot`] - the remote nickname mapping or its "none" sentinel

mod contact;
mod snapshot;

pub use contact::{AccountContact, ContactId, ContactRecord, Visibility};
pub use snapshot::NicknameSnapshot;
