//! Inventory domain module.
//!
//! Item records, the name-sorted repository over a key/value store, browse
//! queries, date-status derivation and JSON backups.

pub mod backup;
pub mod item;
pub mod query;
pub mod repository;
pub mod status;

pub use backup::{BACKUP_FILE_NAME, BackupError, ParsedBackup, export_backup, parse_backup};
pub use item::{InventoryItem, NewItem};
pub use query::{ItemQuery, SortOrder};
pub use repository::{ITEMS_KEY, InventoryRepository, RepositoryError, load_items};
pub use status::{
    ItemStatus, PurchaseAge, TargetStatus, classify_purchase, classify_target, days_between,
    should_alert, today,
};
