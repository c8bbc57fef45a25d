//! `trove-store`: string-keyed, string-valued persistence.
//!
//! The inventory and category crates never talk to a concrete backend; they
//! take anything implementing [`KeyValueStore`].

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use store::KeyValueStore;
