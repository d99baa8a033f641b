//! Contact identifiers and cached contact records

use std::fmt;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// URL-safe alphabet, unpadded on encode, padding optional on decode.
const HANDLE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Stable account user handle identifying a contact.
///
/// The external form used in remote snapshots is the 8 little-endian bytes of
/// the handle in URL-safe base64 without padding (11 characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u64);

impl ContactId {
    /// Decode a handle from its external base64 form.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] for malformed base64 and
    /// [`Error::HandleLength`] when the payload is not exactly 8 bytes.
    pub fn from_encoded(encoded: &str) -> Result<Self> {
        let bytes = HANDLE_ENGINE
            .decode(encoded.trim())
            .map_err(|e| Error::InvalidHandle {
                encoded: encoded.to_string(),
                message: e.to_string(),
            })?;
        let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| Error::HandleLength {
            encoded: encoded.to_string(),
            len: bytes.len(),
        })?;
        Ok(Self(u64::from_le_bytes(raw)))
    }

    /// Encode the handle into its external base64 form.
    #[must_use]
    pub fn encode(self) -> String {
        HANDLE_ENGINE.encode(self.0.to_le_bytes())
    }

    /// The raw 64-bit handle.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ContactId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl Serialize for ContactId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_encoded(&encoded).map_err(serde::de::Error::custom)
    }
}

/// A locally cached contact.
///
/// `None` and `Some("")` are distinct for every optional field: an absent
/// nickname means "no nickname set", an empty one is still a nickname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: ContactId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl ContactRecord {
    #[must_use]
    pub fn new(id: impl Into<ContactId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            first_name: None,
            last_name: None,
            nickname: None,
        }
    }

    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }
}

/// Account-side visibility of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Unknown,
    Hidden,
    Visible,
    Inactive,
    Blocked,
}

impl Visibility {
    /// Only visible contacts take part in reconciliation.
    #[must_use]
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Hidden => "hidden",
            Self::Visible => "visible",
            Self::Inactive => "inactive",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contact as reported by the account system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountContact {
    #[serde(rename = "handle")]
    pub id: ContactId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub visibility: Visibility,
}

impl AccountContact {
    #[must_use]
    pub fn new(id: impl Into<ContactId>, visibility: Visibility) -> Self {
        Self {
            id: id.into(),
            email: String::new(),
            visibility,
        }
    }

    #[must_use]
    pub fn visible(id: impl Into<ContactId>) -> Self {
        Self::new(id, Visibility::Visible)
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}
