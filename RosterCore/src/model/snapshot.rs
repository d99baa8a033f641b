//! Remote nickname snapshot

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Point-in-time remote mapping of encoded handle to encoded nickname.
///
/// `Absent` is the "no nicknames exist remotely" sentinel. Both the sentinel
/// and an empty mapping mean every local nickname should be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Option<BTreeMap<String, String>>",
    into = "Option<BTreeMap<String, String>>"
)]
pub enum NicknameSnapshot {
    #[default]
    Absent,
    Entries(BTreeMap<String, String>),
}

impl NicknameSnapshot {
    /// Build a snapshot from `(encoded handle, encoded nickname)` pairs.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Entries(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// True for the sentinel and for an empty mapping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Entries(map) => map.is_empty(),
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Absent => 0,
            Self::Entries(map) => map.len(),
        }
    }

    /// Raw `(encoded handle, encoded nickname)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        let map = match self {
            Self::Absent => None,
            Self::Entries(map) => Some(map),
        };
        map.into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

impl From<Option<BTreeMap<String, String>>> for NicknameSnapshot {
    fn from(map: Option<BTreeMap<String, String>>) -> Self {
        map.map_or(Self::Absent, Self::Entries)
    }
}

impl From<NicknameSnapshot> for Option<BTreeMap<String, String>> {
    fn from(snapshot: NicknameSnapshot) -> Self {
        match snapshot {
            NicknameSnapshot::Absent => None,
            NicknameSnapshot::Entries(map) => Some(map),
        }
    }
}
