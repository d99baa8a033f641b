//! Per-pass snapshot lookup table

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::codec::SnapshotCodec;
use crate::model::{ContactId, NicknameSnapshot};

/// Decoded-id view of a snapshot, built once per pass.
///
/// Keys are decoded up front; values stay encoded until a visible contact
/// actually needs them, so undecodable values of contacts outside the pass
/// never surface.
#[derive(Debug, Default)]
pub struct SnapshotIndex<'a> {
    entries: HashMap<ContactId, &'a str>,
}

impl<'a> SnapshotIndex<'a> {
    /// Index `snapshot`, skipping keys `codec` cannot decode.
    ///
    /// When two keys decode to the same id, the first in key order wins.
    pub fn build(snapshot: &'a NicknameSnapshot, codec: &dyn SnapshotCodec) -> Self {
        let mut entries = HashMap::with_capacity(snapshot.len());
        for (key, value) in snapshot.entries() {
            match codec.decode_id(key) {
                Ok(id) => match entries.entry(id) {
                    Entry::Occupied(_) => {
                        tracing::warn!("Duplicate snapshot entry for {} (key '{}'), keeping the first", id, key);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                },
                Err(e) => tracing::warn!("Skipping snapshot key '{}': {}", key, e),
            }
        }
        Self { entries }
    }

    /// The encoded nickname for `id`, if the snapshot has one.
    pub fn get(&self, id: ContactId) -> Option<&'a str> {
        self.entries.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Base64Codec;

    #[test]
    fn test_index_decodes_keys() {
        let snapshot = NicknameSnapshot::from_entries([
            (ContactId(1).encode(), "Um9iZXJ0".to_string()),
            (ContactId(2).encode(), "%%%".to_string()),
        ]);
        let index = SnapshotIndex::build(&snapshot, &Base64Codec);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(ContactId(1)), Some("Um9iZXJ0"));
        assert_eq!(index.get(ContactId(2)), Some("%%%"));
        assert_eq!(index.get(ContactId(3)), None);
    }

    #[test]
    fn test_index_skips_malformed_keys() {
        let snapshot = NicknameSnapshot::from_entries([
            ("bad key", "Um9iZXJ0"),
            ("AAAA", "Um9iZXJ0"),
        ]);
        let index = SnapshotIndex::build(&snapshot, &Base64Codec);
        assert!(index.is_empty());
    }

    #[test]
    fn test_sentinel_builds_empty_index() {
        let snapshot = NicknameSnapshot::Absent;
        assert!(SnapshotIndex::build(&snapshot, &Base64Codec).is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first_key() {
        let id = ContactId(5);
        let unpadded = id.encode();
        let padded = format!("{unpadded}=");
        // "...=" sorts after the bare key in the BTreeMap
        let snapshot = NicknameSnapshot::from_entries([
            (padded, "c2Vjb25k".to_string()),
            (unpadded, "Zmlyc3Q=".to_string()),
        ]);
        let index = SnapshotIndex::build(&snapshot, &Base64Codec);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(id), Some("Zmlyc3Q="));
    }
}
