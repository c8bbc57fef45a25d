//! Item collection persisted under a single storage key.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use trove_core::{ItemId, collate};
use trove_store::{KeyValueStore, StoreError};

use crate::backup::{self, BackupError};
use crate::item::{InventoryItem, NewItem};

/// Storage key holding the JSON-encoded item collection.
pub const ITEMS_KEY: &str = "inventoryAppItems";

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The collection could not be written; nothing was changed in memory.
    #[error("could not save inventory: {0}")]
    Store(#[from] StoreError),

    #[error("could not encode inventory: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Decode each stored entry on its own.
///
/// Entries that do not decode as an item are logged and returned separately,
/// untouched, so a save can write them back.
pub(crate) fn decode_entries(entries: Vec<Value>) -> (Vec<InventoryItem>, Vec<Value>) {
    let mut items = Vec::with_capacity(entries.len());
    let mut unreadable = Vec::new();

    for (index, entry) in entries.into_iter().enumerate() {
        match InventoryItem::deserialize(&entry) {
            Ok(item) => items.push(item),
            Err(err) => {
                let id = entry.get("id").and_then(Value::as_str).unwrap_or_default();
                tracing::warn!(index, id, error = %err, "unreadable inventory entry kept as-is");
                unreadable.push(entry);
            }
        }
    }

    (items, unreadable)
}

/// Stored entries, items first, in the order they are written.
#[derive(Serialize)]
#[serde(untagged)]
enum StoredEntry<'a> {
    Item(&'a InventoryItem),
    Kept(&'a Value),
}

pub(crate) fn encode_entries(
    items: &[InventoryItem],
    unreadable: &[Value],
) -> Result<String, serde_json::Error> {
    let entries: Vec<StoredEntry<'_>> = items
        .iter()
        .map(StoredEntry::Item)
        .chain(unreadable.iter().map(StoredEntry::Kept))
        .collect();
    serde_json::to_string(&entries)
}

fn load_entries<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<(Vec<InventoryItem>, Vec<Value>), StoreError> {
    let Some(raw) = store.get(ITEMS_KEY)? else {
        return Ok(Default::default());
    };

    match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(entries) => Ok(decode_entries(entries)),
        Err(err) => {
            tracing::warn!(error = %err, "failed to parse stored inventory; treating as empty");
            Ok(Default::default())
        }
    }
}

/// Read the stored collection.
///
/// Absent → empty. Not a JSON array → logged and treated as empty; the stored
/// value is left as-is until the next successful write replaces it. Single
/// entries that do not decode are skipped with a warning.
pub fn load_items<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<InventoryItem>, StoreError> {
    Ok(load_entries(store)?.0)
}

fn sort_by_name(items: &mut [InventoryItem]) {
    items.sort_by(|a, b| collate(&a.name, &b.name));
}

fn entry_has_id(entry: &Value, id: &ItemId) -> bool {
    entry.get("id").and_then(Value::as_str) == Some(id.as_str())
}

/// CRUD over the item collection.
///
/// Holds the loaded collection in memory. Every mutation builds the next
/// collection, writes it whole, and only then swaps it in, so a failed write
/// leaves both storage and memory at the previous state.
///
/// Stored entries that cannot be read as items are carried along unchanged and
/// written after the items on every save.
#[derive(Debug)]
pub struct InventoryRepository<S> {
    store: S,
    items: Vec<InventoryItem>,
    unreadable: Vec<Value>,
}

impl<S> InventoryRepository<S>
where
    S: KeyValueStore,
{
    /// Load the collection from `store`.
    pub fn open(store: S) -> Result<Self, RepositoryError> {
        let (items, unreadable) = load_entries(&store)?;
        tracing::debug!(count = items.len(), unreadable = unreadable.len(), "inventory loaded");
        Ok(Self {
            store,
            items,
            unreadable,
        })
    }

    /// Re-read storage, discarding the in-memory copy.
    ///
    /// Front ends call this when a view regains focus or otherwise suspects
    /// another writer.
    pub fn refresh(&mut self) -> Result<(), RepositoryError> {
        (self.items, self.unreadable) = load_entries(&self.store)?;
        Ok(())
    }

    /// Items in stored order (name-sorted after any add/update).
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Stored entries that could not be read as items.
    pub fn unreadable_count(&self) -> usize {
        self.unreadable.len()
    }

    /// Lookup against the loaded collection; does not re-read storage.
    pub fn get_by_id(&self, id: &ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Assign an id, insert, re-sort, persist.
    pub fn add(&mut self, new_item: NewItem) -> Result<InventoryItem, RepositoryError> {
        let item = new_item.with_id(ItemId::generate());

        let mut next = self.items.clone();
        next.push(item.clone());
        sort_by_name(&mut next);
        self.save(next, None)?;

        tracing::info!(id = %item.id, name = %item.name, "item added");
        Ok(item)
    }

    /// Replace every entry with the same id, re-sort, persist.
    ///
    /// An unknown id is a silent no-op: nothing is written.
    pub fn update(&mut self, item: InventoryItem) -> Result<(), RepositoryError> {
        if !self.items.iter().any(|i| i.id == item.id) {
            tracing::debug!(id = %item.id, "update for unknown item ignored");
            return Ok(());
        }

        let mut next: Vec<InventoryItem> = self
            .items
            .iter()
            .map(|i| if i.id == item.id { item.clone() } else { i.clone() })
            .collect();
        sort_by_name(&mut next);
        self.save(next, None)?;

        tracing::info!(id = %item.id, "item updated");
        Ok(())
    }

    /// Remove every entry with `id`, persist. An unknown id is a no-op.
    pub fn delete(&mut self, id: &ItemId) -> Result<(), RepositoryError> {
        let in_items = self.items.iter().any(|i| &i.id == id);
        let in_unreadable = self.unreadable.iter().any(|e| entry_has_id(e, id));
        if !in_items && !in_unreadable {
            tracing::debug!(id = %id, "delete for unknown item ignored");
            return Ok(());
        }

        let next: Vec<InventoryItem> = self
            .items
            .iter()
            .filter(|i| &i.id != id)
            .cloned()
            .collect();
        let kept: Vec<Value> = self
            .unreadable
            .iter()
            .filter(|e| !entry_has_id(e, id))
            .cloned()
            .collect();
        self.save(next, Some(kept))?;

        tracing::info!(id = %id, "item deleted");
        Ok(())
    }

    /// Raw stored collection for a backup file; `None` when there is nothing
    /// to export.
    pub fn export_backup(&self) -> Result<Option<String>, RepositoryError> {
        Ok(backup::export_backup(&self.store)?)
    }

    /// Replace the whole collection from a backup file.
    ///
    /// Validation happens before any write; a rejected backup leaves storage
    /// and memory untouched. Returns the number of readable items restored;
    /// see [`unreadable_count`](Self::unreadable_count) for the rest.
    pub fn restore_backup(&mut self, contents: &str) -> Result<usize, BackupError> {
        let parsed = backup::parse_backup(contents)?;
        let encoded =
            encode_entries(&parsed.items, &parsed.unreadable).map_err(BackupError::Encode)?;
        self.store.set(ITEMS_KEY, &encoded)?;

        let count = parsed.items.len();
        self.items = parsed.items;
        self.unreadable = parsed.unreadable;
        tracing::info!(count, unreadable = self.unreadable.len(), "inventory restored from backup");
        Ok(count)
    }

    /// Write `next` (and `kept`, or the current unreadable entries), then swap
    /// them in.
    fn save(
        &mut self,
        next: Vec<InventoryItem>,
        kept: Option<Vec<Value>>,
    ) -> Result<(), RepositoryError> {
        let unreadable = kept.as_deref().unwrap_or(&self.unreadable);
        let encoded = encode_entries(&next, unreadable)?;
        if let Err(err) = self.store.set(ITEMS_KEY, &encoded) {
            tracing::error!(error = %err, "failed to save inventory");
            return Err(err.into());
        }
        self.items = next;
        if let Some(kept) = kept {
            self.unreadable = kept;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use trove_store::InMemoryStore;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn new_item(name: &str) -> NewItem {
        NewItem::new(name, date("2024-01-01"))
    }

    fn repo() -> (Arc<InMemoryStore>, InventoryRepository<Arc<InMemoryStore>>) {
        let store = Arc::new(InMemoryStore::new());
        let repo = InventoryRepository::open(store.clone()).unwrap();
        (store, repo)
    }

    fn names<S: KeyValueStore>(repo: &InventoryRepository<S>) -> Vec<String> {
        repo.items().iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn empty_storage_loads_empty() {
        let (_, repo) = repo();
        assert!(repo.is_empty());
    }

    #[test]
    fn corrupt_storage_loads_empty_without_error() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(ITEMS_KEY, "{not json");
        let repo = InventoryRepository::open(store.clone()).unwrap();
        assert!(repo.is_empty());
        // Left in place until overwritten
        assert_eq!(store.get(ITEMS_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn add_assigns_id_and_get_by_id_returns_it() {
        let (_, mut repo) = repo();
        let input = new_item("Drill");
        let created = repo.add(input.clone()).unwrap();

        assert!(!created.id.as_str().is_empty());
        let fetched = repo.get_by_id(&created.id).unwrap();
        assert_eq!(fetched, &input.with_id(created.id.clone()));
    }

    #[test]
    fn add_keeps_collection_name_sorted_and_persisted() {
        let (store, mut repo) = repo();
        for name in ["saw", "Drill", "anvil", "Chisel"] {
            repo.add(new_item(name)).unwrap();
        }
        assert_eq!(names(&repo), vec!["anvil", "Chisel", "Drill", "saw"]);

        let reopened = InventoryRepository::open(store).unwrap();
        assert_eq!(reopened.items(), repo.items());
    }

    #[test]
    fn update_replaces_and_resorts() {
        let (_, mut repo) = repo();
        let a = repo.add(new_item("Anvil")).unwrap();
        repo.add(new_item("Hammer")).unwrap();

        let mut renamed = a.clone();
        renamed.name = "Zinc Bucket".to_string();
        repo.update(renamed).unwrap();

        assert_eq!(names(&repo), vec!["Hammer", "Zinc Bucket"]);
        assert_eq!(repo.get_by_id(&a.id).unwrap().name, "Zinc Bucket");
    }

    #[test]
    fn update_with_unknown_id_writes_nothing() {
        let (store, mut repo) = repo();
        repo.add(new_item("Drill")).unwrap();
        let before = store.get(ITEMS_KEY).unwrap();

        let ghost = new_item("Ghost").with_id(ItemId::from("missing"));
        repo.update(ghost).unwrap();

        assert_eq!(store.get(ITEMS_KEY).unwrap(), before);
        assert_eq!(names(&repo), vec!["Drill"]);
    }

    #[test]
    fn delete_removes_entry_and_ignores_unknown_ids() {
        let (store, mut repo) = repo();
        let drill = repo.add(new_item("Drill")).unwrap();
        repo.add(new_item("Saw")).unwrap();

        repo.delete(&ItemId::from("missing")).unwrap();
        assert_eq!(repo.len(), 2);

        repo.delete(&drill.id).unwrap();
        assert_eq!(names(&repo), vec!["Saw"]);
        assert_eq!(load_items(&*store).unwrap().len(), 1);
    }

    #[test]
    fn failed_write_surfaces_and_memory_does_not_diverge() {
        let store = Arc::new(InMemoryStore::with_quota(400));
        let mut repo = InventoryRepository::open(store.clone()).unwrap();
        repo.add(new_item("Drill")).unwrap();
        let saved = store.get(ITEMS_KEY).unwrap();

        let mut big = new_item("Camera");
        big.photo = Some("x".repeat(1_000));
        let err = repo.add(big).unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::Store(StoreError::QuotaExceeded { .. })
        ));
        assert_eq!(names(&repo), vec!["Drill"]);
        assert_eq!(store.get(ITEMS_KEY).unwrap(), saved);
    }

    #[test]
    fn refresh_picks_up_another_writer() {
        let store = Arc::new(InMemoryStore::new());
        let mut first = InventoryRepository::open(store.clone()).unwrap();
        let mut second = InventoryRepository::open(store).unwrap();

        second.add(new_item("Drill")).unwrap();
        assert!(first.is_empty());

        first.refresh().unwrap();
        assert_eq!(names(&first), vec!["Drill"]);
    }

    #[test]
    fn reads_do_not_resort_stored_order() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(
            ITEMS_KEY,
            r#"[{"id":"2","name":"Saw","purchaseDate":"2024-01-01"},
                {"id":"1","name":"Anvil","purchaseDate":"2024-01-01"}]"#,
        );
        let repo = InventoryRepository::open(store).unwrap();
        assert_eq!(names(&repo), vec!["Saw", "Anvil"]);
    }

    #[test]
    fn one_bad_entry_does_not_cost_the_others() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(
            ITEMS_KEY,
            r#"[{"id":"1","name":"Coat","purchaseDate":"2023-11-02"},
                {"id":"2","name":"Drill","purchaseDate":"2024-01-01T10:00:00.000Z"},
                {"id":"3","name":"Broken","purchaseDate":"someday"}]"#,
        );

        let mut repo = InventoryRepository::open(store.clone()).unwrap();
        assert_eq!(names(&repo), vec!["Coat", "Drill"]);
        assert_eq!(repo.get_by_id(&ItemId::from("2")).unwrap().purchase_date, date("2024-01-01"));
        assert_eq!(repo.unreadable_count(), 1);

        repo.add(new_item("Lamp")).unwrap();

        let raw = store.get(ITEMS_KEY).unwrap().unwrap();
        let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        let stored_names: Vec<_> = stored.iter().map(|e| e["name"].as_str().unwrap()).collect();
        assert_eq!(stored_names, vec!["Coat", "Drill", "Lamp", "Broken"]);
        assert_eq!(stored[3]["purchaseDate"], "someday");

        let reopened = InventoryRepository::open(store).unwrap();
        assert_eq!(reopened.items(), repo.items());
        assert_eq!(reopened.unreadable_count(), 1);
    }

    #[test]
    fn delete_also_drops_unreadable_entries_with_that_id() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(
            ITEMS_KEY,
            r#"[{"id":"1","name":"Coat","purchaseDate":"2023-11-02"},
                {"id":"3","name":"Broken"}]"#,
        );
        let mut repo = InventoryRepository::open(store.clone()).unwrap();

        repo.delete(&ItemId::from("3")).unwrap();

        assert_eq!(repo.unreadable_count(), 0);
        assert_eq!(names(&repo), vec!["Coat"]);
        assert!(!store.get(ITEMS_KEY).unwrap().unwrap().contains("Broken"));
    }

    #[test]
    fn update_replaces_every_entry_sharing_the_id() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(
            ITEMS_KEY,
            r#"[{"id":"dup","name":"Saw","purchaseDate":"2024-01-01"},
                {"id":"other","name":"Hammer","purchaseDate":"2024-01-01"},
                {"id":"dup","name":"Saw copy","purchaseDate":"2024-01-01"}]"#,
        );
        let mut repo = InventoryRepository::open(store).unwrap();

        let mut renamed = repo.get_by_id(&ItemId::from("dup")).unwrap().clone();
        renamed.name = "Anvil".to_string();
        repo.update(renamed).unwrap();

        assert_eq!(names(&repo), vec!["Anvil", "Anvil", "Hammer"]);
    }

    /// Store whose quota is already used up by another key, so every write fails.
    fn full_store_with(names: &[&str]) -> (Arc<InMemoryStore>, InventoryRepository<Arc<InMemoryStore>>) {
        let store = Arc::new(InMemoryStore::with_quota(2_000));
        let mut repo = InventoryRepository::open(store.clone()).unwrap();
        for name in names {
            repo.add(new_item(name)).unwrap();
        }
        store.seed("ballast", &"x".repeat(2_000));
        (store, repo)
    }

    #[test]
    fn failed_update_leaves_memory_and_storage_unchanged() {
        let (store, mut repo) = full_store_with(&["Drill", "Saw"]);
        let saved = store.get(ITEMS_KEY).unwrap();
        let before = repo.items().to_vec();

        let mut renamed = before[0].clone();
        renamed.name = "Zinc Bucket".to_string();
        let err = repo.update(renamed).unwrap_err();

        assert!(matches!(err, RepositoryError::Store(StoreError::QuotaExceeded { .. })));
        assert_eq!(repo.items(), before.as_slice());
        assert_eq!(store.get(ITEMS_KEY).unwrap(), saved);
    }

    #[test]
    fn failed_delete_leaves_memory_and_storage_unchanged() {
        let (store, mut repo) = full_store_with(&["Drill", "Saw"]);
        let saved = store.get(ITEMS_KEY).unwrap();
        let drill = repo.items()[0].id.clone();

        let err = repo.delete(&drill).unwrap_err();

        assert!(matches!(err, RepositoryError::Store(StoreError::QuotaExceeded { .. })));
        assert_eq!(names(&repo), vec!["Drill", "Saw"]);
        assert_eq!(store.get(ITEMS_KEY).unwrap(), saved);
    }

    #[test]
    fn failed_restore_leaves_memory_and_storage_unchanged() {
        let (store, mut repo) = full_store_with(&["Drill"]);
        let saved = store.get(ITEMS_KEY).unwrap();

        let err = repo
            .restore_backup(r#"[{"id":"9","name":"Kettle","purchaseDate":"2024-02-02"}]"#)
            .unwrap_err();

        assert!(matches!(err, BackupError::Store(StoreError::QuotaExceeded { .. })));
        assert_eq!(names(&repo), vec!["Drill"]);
        assert_eq!(store.get(ITEMS_KEY).unwrap(), saved);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(String),
            Rename(usize, String),
            Delete(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                "[A-Za-z][A-Za-z ]{0,10}".prop_map(Op::Add),
                (0usize..8, "[A-Za-z][A-Za-z ]{0,10}").prop_map(|(i, n)| Op::Rename(i, n)),
                (0usize..8).prop_map(Op::Delete),
            ]
        }

        proptest! {
            /// Property: after any mix of add/update/delete the collection is name-sorted.
            #[test]
            fn collection_stays_sorted(ops in proptest::collection::vec(op(), 1..24)) {
                let (store, mut repo) = repo();
                for op in ops {
                    match op {
                        Op::Add(name) => { repo.add(new_item(&name)).unwrap(); }
                        Op::Rename(i, name) => {
                            if let Some(existing) = repo.items().get(i).cloned() {
                                let mut changed = existing;
                                changed.name = name;
                                repo.update(changed).unwrap();
                            }
                        }
                        Op::Delete(i) => {
                            if let Some(id) = repo.items().get(i).map(|it| it.id.clone()) {
                                repo.delete(&id).unwrap();
                            }
                        }
                    }
                }

                for pair in repo.items().windows(2) {
                    prop_assert_ne!(collate(&pair[0].name, &pair[1].name), core::cmp::Ordering::Greater);
                }
                let reloaded = load_items(&*store).unwrap();
                prop_assert_eq!(reloaded.as_slice(), repo.items());
            }
        }
    }
}
