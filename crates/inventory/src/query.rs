//! Browse queries: search, category filter and sort over a loaded collection.

use core::cmp::Ordering;
use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use trove_core::{DomainError, collate, fold_case};

use crate::item::InventoryItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    PurchaseNewest,
    PurchaseOldest,
    /// Items without a target date go last.
    TargetSoonest,
    /// Items without a target date go last.
    TargetLatest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::PurchaseNewest,
        SortOrder::PurchaseOldest,
        SortOrder::TargetSoonest,
        SortOrder::TargetLatest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::NameAsc => "name_asc",
            SortOrder::NameDesc => "name_desc",
            SortOrder::PurchaseNewest => "purchase_date_newest",
            SortOrder::PurchaseOldest => "purchase_date_oldest",
            SortOrder::TargetSoonest => "target_date_soonest",
            SortOrder::TargetLatest => "target_date_latest",
        }
    }

    fn compare(self, a: &InventoryItem, b: &InventoryItem) -> Ordering {
        match self {
            SortOrder::NameAsc => collate(&a.name, &b.name),
            SortOrder::NameDesc => collate(&b.name, &a.name),
            SortOrder::PurchaseNewest => b.purchase_date.cmp(&a.purchase_date),
            SortOrder::PurchaseOldest => a.purchase_date.cmp(&b.purchase_date),
            SortOrder::TargetSoonest => missing_last(a.target_date, b.target_date, |x, y| x.cmp(&y)),
            SortOrder::TargetLatest => missing_last(a.target_date, b.target_date, |x, y| y.cmp(&x)),
        }
    }
}

fn missing_last(
    a: Option<NaiveDate>,
    b: Option<NaiveDate>,
    cmp: impl Fn(NaiveDate, NaiveDate) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl core::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = SortOrder::ALL.iter().map(|o| o.as_str()).collect();
                DomainError::validation(format!(
                    "unknown sort order {s:?}; expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}

/// What a browse view asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    /// Case-insensitive substring of name or description. Blank matches all.
    pub search: Option<String>,
    /// Exact category id; `None` means all categories.
    pub category: Option<String>,
    pub sort: SortOrder,
}

impl ItemQuery {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let term = fold_case(term);
            if !fold_case(&item.name).contains(&term)
                && !fold_case(&item.description).contains(&term)
            {
                return false;
            }
        }
        match &self.category {
            Some(category) => &item.category == category,
            None => true,
        }
    }

    /// Filtered and sorted view; the input slice is not reordered.
    pub fn apply<'a>(&self, items: &'a [InventoryItem]) -> Vec<&'a InventoryItem> {
        let mut out: Vec<&InventoryItem> = items.iter().filter(|i| self.matches(i)).collect();
        out.sort_by(|a, b| self.sort.compare(a, b));
        out
    }
}
