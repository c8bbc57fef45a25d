//! Category and sound catalogs.
//!
//! Predefined categories and sound options are code-defined; custom categories
//! are persisted as a plain list of names and materialized on every read.

pub mod category;
pub mod error;
pub mod icon;
pub mod registry;
pub mod sound;

pub use category::{Category, CategoryKind, PredefinedCategory};
pub use error::CategoryError;
pub use icon::{Icon, icon_for};
pub use registry::{
    CUSTOM_CATEGORIES_KEY, CategoryRegistry, UNKNOWN_CATEGORY_ID, UNKNOWN_CATEGORY_NAME,
    merge_categories, resolve_in,
};
pub use sound::{DEFAULT_SOUND, SILENT_SOUND, SOUND_OPTIONS, SoundOption};
