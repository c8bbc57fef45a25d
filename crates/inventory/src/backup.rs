//! JSON backup files.
//!
//! A backup is exactly the stored collection: a JSON array of item objects.
//! Import is all-or-nothing; nothing is written unless every entry checks out.

use serde_json::Value;
use thiserror::Error;

use trove_store::{KeyValueStore, StoreError};

use crate::item::InventoryItem;
use crate::repository::{ITEMS_KEY, decode_entries};

/// Suggested file name for exported backups.
pub const BACKUP_FILE_NAME: &str = "inventory_backup.json";

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("backup is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("backup must be a JSON array of items")]
    NotAnArray,

    #[error("backup entry {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("could not encode restored inventory: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("could not write restored inventory: {0}")]
    Store(#[from] StoreError),
}

impl BackupError {
    fn invalid_entry(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            index,
            reason: reason.into(),
        }
    }
}

/// Backup contents split into items and entries kept verbatim.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedBackup {
    pub items: Vec<InventoryItem>,
    /// Entries with `id` and `name` that still do not decode as an item.
    pub unreadable: Vec<Value>,
}

/// Validate backup contents and decode them.
///
/// The file must be an array whose every element is an object carrying `id`
/// and `name`; anything else rejects the whole backup. Accepted entries that
/// do not decode as an item are kept as-is rather than dropped.
pub fn parse_backup(contents: &str) -> Result<ParsedBackup, BackupError> {
    let value: Value = serde_json::from_str(contents).map_err(BackupError::Parse)?;
    let Value::Array(entries) = value else {
        return Err(BackupError::NotAnArray);
    };

    for (index, entry) in entries.iter().enumerate() {
        let Some(fields) = entry.as_object() else {
            return Err(BackupError::invalid_entry(index, "not an object"));
        };
        for required in ["id", "name"] {
            if !fields.contains_key(required) {
                return Err(BackupError::invalid_entry(
                    index,
                    format!("missing `{required}`"),
                ));
            }
        }
    }

    let (items, unreadable) = decode_entries(entries);
    Ok(ParsedBackup { items, unreadable })
}

/// The stored collection verbatim, or `None` if it is absent or an empty array.
pub fn export_backup<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<String>, StoreError> {
    let Some(raw) = store.get(ITEMS_KEY)? else {
        return Ok(None);
    };
    let is_empty_array = matches!(
        serde_json::from_str::<Value>(&raw),
        Ok(Value::Array(ref entries)) if entries.is_empty()
    );
    if raw.trim().is_empty() || is_empty_array {
        return Ok(None);
    }
    Ok(Some(raw))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use trove_store::InMemoryStore;

    use super::*;
    use crate::item::NewItem;
    use crate::repository::InventoryRepository;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn export_is_none_when_nothing_stored() {
        let store = InMemoryStore::new();
        assert_eq!(export_backup(&store).unwrap(), None);

        store.seed(ITEMS_KEY, "[]");
        assert_eq!(export_backup(&store).unwrap(), None);
    }

    #[test]
    fn export_then_import_reproduces_collection() {
        let source = Arc::new(InMemoryStore::new());
        let mut repo = InventoryRepository::open(source.clone()).unwrap();
        let mut coat = NewItem::new("Winter Coat", date("2023-11-02"));
        coat.target_date = Some(date("2026-11-02"));
        coat.photo = Some("data:image/png;base64,AAAA".to_string());
        repo.add(coat).unwrap();
        repo.add(NewItem::new("Drill", date("2024-01-01"))).unwrap();

        let exported = repo.export_backup().unwrap().unwrap();

        let target = Arc::new(InMemoryStore::new());
        let mut restored = InventoryRepository::open(target.clone()).unwrap();
        assert_eq!(restored.restore_backup(&exported).unwrap(), 2);

        assert_eq!(restored.items(), repo.items());
        assert_eq!(target.get(ITEMS_KEY).unwrap(), source.get(ITEMS_KEY).unwrap());
    }

    #[test]
    fn rejects_non_array() {
        assert!(matches!(
            parse_backup(r#"{"id":"1","name":"Drill"}"#),
            Err(BackupError::NotAnArray)
        ));
        assert!(matches!(parse_backup("not json"), Err(BackupError::Parse(_))));
    }

    #[test]
    fn rejects_entries_missing_required_fields() {
        let err = parse_backup(r#"[{"id":"1","name":"Drill","purchaseDate":"2024-01-01"},{"name":"Saw"}]"#)
            .unwrap_err();
        match err {
            BackupError::InvalidEntry { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("id"));
            }
            other => panic!("Expected InvalidEntry, got {other:?}"),
        }

        assert!(matches!(
            parse_backup("[42]"),
            Err(BackupError::InvalidEntry { index: 0, .. })
        ));
    }

    #[test]
    fn accepts_entries_with_only_id_and_name() {
        let parsed = parse_backup(r#"[{"id":"1","name":"Drill"}]"#).unwrap();
        assert!(parsed.items.is_empty());
        assert_eq!(parsed.unreadable.len(), 1);
    }

    #[test]
    fn minimal_entries_survive_restore_and_later_saves() {
        let store = Arc::new(InMemoryStore::new());
        let mut repo = InventoryRepository::open(store.clone()).unwrap();
        let restored = repo
            .restore_backup(
                r#"[{"id":"1","name":"Drill"},
                    {"id":"2","name":"Saw","purchaseDate":"2024-01-01T08:00:00Z"}]"#,
            )
            .unwrap();
        assert_eq!(restored, 1);
        assert_eq!(repo.unreadable_count(), 1);

        repo.add(NewItem::new("Lamp", date("2024-05-05"))).unwrap();
        let raw = store.get(ITEMS_KEY).unwrap().unwrap();
        assert!(raw.contains(r#"{"id":"1","name":"Drill"}"#));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn empty_array_is_a_valid_backup() {
        assert_eq!(parse_backup("[]").unwrap(), ParsedBackup::default());
    }

    #[test]
    fn rejected_import_leaves_storage_and_memory_untouched() {
        let store = Arc::new(InMemoryStore::new());
        let mut repo = InventoryRepository::open(store.clone()).unwrap();
        repo.add(NewItem::new("Drill", date("2024-01-01"))).unwrap();
        let before = store.get(ITEMS_KEY).unwrap();

        let err = repo.restore_backup(r#"[{"name":"No id"}]"#).unwrap_err();
        assert!(matches!(err, BackupError::InvalidEntry { .. }));

        assert_eq!(store.get(ITEMS_KEY).unwrap(), before);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn restore_preserves_backup_order() {
        let store = Arc::new(InMemoryStore::new());
        let mut repo = InventoryRepository::open(store).unwrap();
        repo.restore_backup(
            r#"[{"id":"2","name":"Saw","purchaseDate":"2024-01-01"},
                {"id":"1","name":"Anvil","purchaseDate":"2024-01-01"}]"#,
        )
        .unwrap();
        let names: Vec<_> = repo.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Saw", "Anvil"]);
    }
}
