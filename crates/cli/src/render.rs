//! Text and JSON presentation of items.

use std::io::{self, Write};

use chrono::NaiveDate;
use serde::Serialize;

use trove_catalog::{Category, CategoryKind, SoundOption, icon_for};
use trove_inventory::{InventoryItem, ItemStatus, should_alert};

use crate::photo;

/// An item plus everything derived from it, for `list --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView<'a> {
    #[serde(flatten)]
    pub item: &'a InventoryItem,
    pub category_name: String,
    pub icon: &'static str,
    pub status: ItemStatus,
    pub alert: bool,
}

impl<'a> ItemView<'a> {
    pub fn new(item: &'a InventoryItem, category: &Category, today: NaiveDate) -> Self {
        Self {
            item,
            category_name: category.name.clone(),
            icon: icon_for(&category.id).as_str(),
            status: ItemStatus::of(item, today),
            alert: should_alert(item, today),
        }
    }
}

/// One-line summary: id, name, category, purchase age and target status.
pub fn item_line(item: &InventoryItem, category: &Category, today: NaiveDate) -> String {
    let status = ItemStatus::of(item, today);
    let mut line = format!(
        "{}  {}  [{}]  bought {}",
        item.id,
        item.name,
        category.name,
        status.purchase.label()
    );
    match status.target {
        Some(target) if target.days_remaining == 0 => {
            line.push_str(&format!("  {}", target.label()));
        }
        Some(target) => line.push_str(&format!("  target {}", target.label())),
        None => {}
    }
    if status.is_due() {
        line.push_str("  (due)");
    }
    line
}

fn sound_name(id: &str) -> String {
    SoundOption::find(id)
        .map(|s| s.name.to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Every field of `item`, one per line.
pub fn write_details<W: Write>(
    out: &mut W,
    item: &InventoryItem,
    category: &Category,
    today: NaiveDate,
) -> io::Result<()> {
    let status = ItemStatus::of(item, today);

    writeln!(out, "Name:         {}", item.name)?;
    writeln!(out, "Id:           {}", item.id)?;
    if !item.description.is_empty() {
        writeln!(out, "Description:  {}", item.description)?;
    }
    let suffix = match category.kind {
        CategoryKind::Placeholder => " (unknown category)",
        _ => "",
    };
    writeln!(
        out,
        "Category:     {} [{}]{suffix}",
        category.name,
        icon_for(&category.id).as_str()
    )?;
    writeln!(
        out,
        "Purchased:    {} ({})",
        item.purchase_date,
        status.purchase.label()
    )?;
    match (item.target_date, status.target) {
        (Some(date), Some(target)) => writeln!(out, "Target:       {date} ({})", target.label())?,
        _ => writeln!(out, "Target:       none")?,
    }
    writeln!(out, "Sound:        {}", sound_name(&item.notification_sound))?;
    match &item.photo {
        Some(data) => writeln!(out, "Photo:        {}", photo::describe(data))?,
        None => writeln!(out, "Photo:        none")?,
    }
    if should_alert(item, today) {
        writeln!(out, "Alert:        due, plays {}", sound_name(&item.notification_sound))?;
    }
    Ok(())
}
