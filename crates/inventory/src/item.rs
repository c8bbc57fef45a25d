use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use trove_catalog::{DEFAULT_SOUND, PredefinedCategory, SILENT_SOUND};
use trove_core::{DomainError, DomainResult, Entity, ItemId};

fn silent_sound() -> String {
    SILENT_SOUND.to_string()
}

/// Stored dates are usually `YYYY-MM-DD`, but older writers sometimes left a
/// full timestamp. Timestamps are cut down to their calendar date.
mod lenient_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        raw.parse::<NaiveDate>()
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
            .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
    }

    pub(super) fn required<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date {raw:?}")))
    }

    /// Blank strings count as "no date".
    pub(super) fn optional<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date {raw:?}"))),
        }
    }
}

/// A purchased item as persisted.
///
/// Field names are camelCase on disk so collections written by earlier
/// clients load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Encoded image (typically a `data:` URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(deserialize_with = "lenient_date::required")]
    pub purchase_date: NaiveDate,
    #[serde(
        default,
        deserialize_with = "lenient_date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_date: Option<NaiveDate>,
    /// Category id. Not guaranteed to match a known category.
    #[serde(default)]
    pub category: String,
    #[serde(default = "silent_sound")]
    pub notification_sound: String,
}

impl InventoryItem {
    /// The editable fields, without the id.
    pub fn to_new_item(&self) -> NewItem {
        NewItem {
            name: self.name.clone(),
            description: self.description.clone(),
            photo: self.photo.clone(),
            purchase_date: self.purchase_date,
            target_date: self.target_date,
            category: self.category.clone(),
            notification_sound: self.notification_sound.clone(),
        }
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// An item that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub photo: Option<String>,
    pub purchase_date: NaiveDate,
    pub target_date: Option<NaiveDate>,
    pub category: String,
    pub notification_sound: String,
}

impl NewItem {
    /// Form defaults: no description or photo, no target date, "Other" and the
    /// default sound.
    pub fn new(name: impl Into<String>, purchase_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            photo: None,
            purchase_date,
            target_date: None,
            category: PredefinedCategory::Other.id().to_string(),
            notification_sound: DEFAULT_SOUND.to_string(),
        }
    }

    /// Required-field check applied by front ends before saving.
    ///
    /// The repository itself stores whatever it is given.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        Ok(())
    }

    pub fn with_id(self, id: ItemId) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name,
            description: self.description,
            photo: self.photo,
            purchase_date: self.purchase_date,
            target_date: self.target_date,
            category: self.category,
            notification_sound: self.notification_sound,
        }
    }
}
