//! Due/overdue status derived from an item's dates.
//!
//! Everything here works on calendar days; time of day never enters the
//! calculation. Functions take `today` explicitly so callers (and tests) pin
//! the clock.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use trove_catalog::SoundOption;
use trove_core::ValueObject;

use crate::item::InventoryItem;

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Signed day count from `today` to `target`; positive means the future.
pub fn days_between(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

fn days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

/// How long ago an item was bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseAge {
    /// Negative for a purchase date in the future.
    pub days_ago: i64,
    pub is_today: bool,
}

impl ValueObject for PurchaseAge {}

impl PurchaseAge {
    /// `"Today"`, `"3 days ago"`, or `"2 days away"` for a future date.
    pub fn label(&self) -> String {
        match self.days_ago {
            0 => "Today".to_string(),
            n if n > 0 => format!("{} ago", days(n)),
            n => format!("{} away", days(-n)),
        }
    }
}

pub fn classify_purchase(purchase_date: NaiveDate, today: NaiveDate) -> PurchaseAge {
    let delta = days_between(purchase_date, today);
    PurchaseAge {
        days_ago: -delta,
        is_today: delta == 0,
    }
}

/// Distance to an item's replacement/expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetStatus {
    pub days_remaining: i64,
    /// Reached today or already passed.
    pub is_due_or_past: bool,
}

impl ValueObject for TargetStatus {}

impl TargetStatus {
    /// `"Target Today"`, `"5 days left"`, or `"2 days ago"`.
    pub fn label(&self) -> String {
        match self.days_remaining {
            0 => "Target Today".to_string(),
            n if n > 0 => format!("{} left", days(n)),
            n => format!("{} ago", days(-n)),
        }
    }
}

pub fn classify_target(target_date: NaiveDate, today: NaiveDate) -> TargetStatus {
    let days_remaining = days_between(target_date, today);
    TargetStatus {
        days_remaining,
        is_due_or_past: days_remaining <= 0,
    }
}

/// Both derived views for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemStatus {
    pub purchase: PurchaseAge,
    pub target: Option<TargetStatus>,
}

impl ValueObject for ItemStatus {}

impl ItemStatus {
    pub fn of(item: &InventoryItem, today: NaiveDate) -> Self {
        Self {
            purchase: classify_purchase(item.purchase_date, today),
            target: item.target_date.map(|t| classify_target(t, today)),
        }
    }

    pub fn is_due(&self) -> bool {
        self.target.is_some_and(|t| t.is_due_or_past)
    }
}

/// Whether interacting with `item` should play its notification sound:
/// the target is due or past and a sound is selected.
pub fn should_alert(item: &InventoryItem, today: NaiveDate) -> bool {
    ItemStatus::of(item, today).is_due() && !SoundOption::is_silent(&item.notification_sound)
}
