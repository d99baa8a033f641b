//! Loaders for account contact lists, nickname snapshots and record imports

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use rostercore::model::{AccountContact, ContactRecord, NicknameSnapshot};

use crate::error::{Error, Result};

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| Error::Input {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| Error::Input {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load `[{"handle": "...", "visibility": "visible"}, ...]`
pub fn load_account_contacts(path: &Path) -> Result<Vec<AccountContact>> {
    let contacts: Vec<AccountContact> = load_json(path)?;
    tracing::debug!("Loaded {} account contacts from {}", contacts.len(), path.display());
    Ok(contacts)
}

/// Load a nickname snapshot; `null` is the "no nicknames" sentinel.
pub fn load_snapshot(path: &Path) -> Result<NicknameSnapshot> {
    let snapshot: NicknameSnapshot = load_json(path)?;
    if snapshot.is_absent() {
        tracing::debug!("Snapshot {} carries no nickname mapping", path.display());
    }
    Ok(snapshot)
}

/// Load contact records to cache
pub fn load_records(path: &Path) -> Result<Vec<ContactRecord>> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rostercore::model::{ContactId, Visibility};

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_account_contacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "contacts.json",
            &format!(
                r#"[{{"handle": "{}", "visibility": "visible"}}, {{"handle": "{}"}}]"#,
                ContactId(1).encode(),
                ContactId(2).encode()
            ),
        );
        let contacts = load_account_contacts(&path).unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].visibility, Visibility::Visible);
        assert_eq!(contacts[1].id, ContactId(2));
        assert_eq!(contacts[1].visibility, Visibility::Unknown);
    }

    #[test]
    fn test_null_snapshot_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "snapshot.json", "null");
        assert!(load_snapshot(&path).unwrap().is_absent());
    }

    #[test]
    fn test_object_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "snapshot.json", r#"{"AQAAAAAAAAA": "Um9iZXJ0"}"#);
        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_missing_input_names_the_path() {
        let err = load_records(Path::new("/no/such/records.json")).unwrap_err();
        assert!(err.to_string().contains("/no/such/records.json"));
    }
}
