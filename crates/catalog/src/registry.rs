//! Effective category list: predefined + persisted custom names.

use std::collections::HashSet;

use trove_core::{collate, fold_case, same_name};
use trove_store::{KeyValueStore, StoreError};

use crate::category::{Category, PredefinedCategory};
use crate::error::CategoryError;

/// Storage key holding the JSON array of custom category names.
pub const CUSTOM_CATEGORIES_KEY: &str = "inventoryAppCustomCategories";

/// Sentinel returned when nothing else can stand in for a blank category.
pub const UNKNOWN_CATEGORY_ID: &str = "unknown";
pub const UNKNOWN_CATEGORY_NAME: &str = "Select Category";

/// Category registry over a key/value store.
///
/// Nothing is cached: every call re-reads the custom-name list, so a registry
/// shared between views never serves a stale list.
#[derive(Debug, Clone)]
pub struct CategoryRegistry<S> {
    store: S,
}

impl<S> CategoryRegistry<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The ordered category list front ends should offer.
    ///
    /// Alphabetical by name, with "Other" always last. Malformed stored data
    /// is reset rather than reported.
    pub fn effective_categories(&self) -> Result<Vec<Category>, StoreError> {
        let names = self.load_custom_names()?;
        Ok(merge_categories(&names))
    }

    /// Validate and persist a new custom category name.
    pub fn add_custom_category(&self, raw_name: &str) -> Result<Category, CategoryError> {
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }

        let current = self.effective_categories()?;
        if current
            .iter()
            .any(|c| same_name(&c.id, name) || same_name(&c.name, name))
        {
            return Err(CategoryError::DuplicateName(name.to_string()));
        }

        let mut names = self.load_custom_names()?;
        names.push(name.to_string());
        let encoded = encode_names(&names)?;
        self.store.set(CUSTOM_CATEGORIES_KEY, &encoded)?;

        tracing::info!(category = name, "custom category added");
        Ok(Category::custom(name))
    }

    /// Resolve an item's category reference for display.
    ///
    /// Unknown ids become placeholder categories; blank ids fall back to
    /// "Other". See [`resolve_in`].
    pub fn resolve(&self, category_id: &str) -> Result<Category, StoreError> {
        let categories = self.effective_categories()?;
        Ok(resolve_in(&categories, category_id))
    }

    /// Category preselected for a new item: the first effective entry.
    pub fn default_category_id(&self) -> Result<String, StoreError> {
        let categories = self.effective_categories()?;
        Ok(categories
            .first()
            .map(|c| c.id.clone())
            .unwrap_or_else(|| PredefinedCategory::Other.id().to_string()))
    }

    fn load_custom_names(&self) -> Result<Vec<String>, StoreError> {
        let Some(raw) = self.store.get(CUSTOM_CATEGORIES_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(names) => Ok(names),
            Err(err) => {
                tracing::warn!(error = %err, "invalid custom categories in storage; resetting");
                if let Err(err) = self.store.set(CUSTOM_CATEGORIES_KEY, "[]") {
                    tracing::error!(error = %err, "failed to reset custom categories");
                }
                Ok(Vec::new())
            }
        }
    }
}

fn encode_names(names: &[String]) -> Result<String, StoreError> {
    serde_json::to_string(names)
        .map_err(|e| StoreError::Unavailable(format!("failed to encode category names: {e}")))
}

/// Merge predefined categories with raw custom names.
///
/// Custom names are trimmed, blanks dropped, deduplicated case-insensitively
/// (first wins) and dropped when they collide with a predefined id or name.
pub fn merge_categories(custom_names: &[String]) -> Vec<Category> {
    let mut seen: HashSet<String> = HashSet::new();
    let custom = custom_names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(fold_case(n)))
        .filter(|n| {
            !PredefinedCategory::ALL
                .iter()
                .any(|p| same_name(p.id(), n) || same_name(p.name(), n))
        })
        .map(Category::custom);

    let mut categories: Vec<Category> = PredefinedCategory::ALL
        .into_iter()
        .filter(|p| *p != PredefinedCategory::Other)
        .map(PredefinedCategory::category)
        .chain(custom)
        .collect();

    // Stable: predefined entries stay ahead of custom ones that collate equal.
    categories.sort_by(|a, b| collate(&a.name, &b.name));
    categories.push(PredefinedCategory::Other.category());
    categories
}

/// Resolve `category_id` against an already computed category list.
///
/// - exact id match → that category;
/// - blank → "Other", else the first entry, else the "Select Category" sentinel;
/// - anything else → a placeholder whose id and name are the raw input.
///
/// The blank case is the only one that returns a different id than was asked
/// for; callers able to write the item back should store the returned id.
pub fn resolve_in(categories: &[Category], category_id: &str) -> Category {
    if let Some(found) = categories.iter().find(|c| c.id == category_id) {
        return found.clone();
    }

    if category_id.trim().is_empty() {
        return categories
            .iter()
            .find(|c| c.is_other())
            .or_else(|| categories.first())
            .cloned()
            .unwrap_or_else(|| Category::placeholder(UNKNOWN_CATEGORY_ID, UNKNOWN_CATEGORY_NAME));
    }

    Category::placeholder(category_id, category_id)
}
