//! Error types for `RosterCore`

use thiserror::Error;

use crate::model::ContactId;

/// The error type for `RosterCore` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Codec Errors ====================
    /// An encoded account handle is not valid base64.
    #[error("invalid encoded handle '{encoded}': {message}")]
    InvalidHandle {
        /// The encoded handle as received.
        encoded: String,
        /// What was wrong with it.
        message: String,
    },

    /// An encoded account handle decoded to the wrong number of bytes.
    #[error("encoded handle '{encoded}' decodes to {len} bytes (expected 8)")]
    HandleLength {
        /// The encoded handle as received.
        encoded: String,
        /// Number of decoded bytes.
        len: usize,
    },

    /// A nickname value could not be decoded from its transport encoding.
    #[error("failed to decode nickname: {message}")]
    NicknameDecode {
        /// The decoder error message.
        message: String,
    },

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== Directory Errors ====================
    /// The contact is not present in the local directory.
    #[error("contact {0} is not cached")]
    ContactNotCached(ContactId),

    /// The backing store rejected a write.
    #[error("store write failed for contact {id}: {message}")]
    StoreWrite {
        /// The contact whose record could not be persisted.
        id: ContactId,
        /// The store's error message.
        message: String,
    },

    /// The backing store could not be read.
    #[error("store read failed: {0}")]
    StoreRead(String),
}

/// A specialized Result type for `RosterCore` operations.
pub type Result<T> = std::result::Result<T, Error>;
