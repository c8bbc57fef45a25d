use thiserror::Error;

use trove_store::StoreError;

/// Why a custom category could not be added.
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,

    #[error("category {0:?} already exists")]
    DuplicateName(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
