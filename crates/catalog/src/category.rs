use serde::{Deserialize, Serialize};

use trove_core::Entity;

/// Built-in category labels, always present.
///
/// The id of a predefined category is its display label, which is also what
/// items store in their `category` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredefinedCategory {
    Food,
    Electronics,
    Clothing,
    HomeGoods,
    ToolsHardware,
    HealthBeauty,
    BooksMedia,
    SportsOutdoors,
    ToysGames,
    Automotive,
    PetSupplies,
    OfficeSupplies,
    /// Catch-all; always listed last.
    Other,
}

impl PredefinedCategory {
    pub const ALL: [PredefinedCategory; 13] = [
        PredefinedCategory::Food,
        PredefinedCategory::Electronics,
        PredefinedCategory::Clothing,
        PredefinedCategory::HomeGoods,
        PredefinedCategory::ToolsHardware,
        PredefinedCategory::HealthBeauty,
        PredefinedCategory::BooksMedia,
        PredefinedCategory::SportsOutdoors,
        PredefinedCategory::ToysGames,
        PredefinedCategory::Automotive,
        PredefinedCategory::PetSupplies,
        PredefinedCategory::OfficeSupplies,
        PredefinedCategory::Other,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PredefinedCategory::Food => "Food & Groceries",
            PredefinedCategory::Electronics => "Electronics",
            PredefinedCategory::Clothing => "Apparel & Accessories",
            PredefinedCategory::HomeGoods => "Home Goods",
            PredefinedCategory::ToolsHardware => "Tools & Hardware",
            PredefinedCategory::HealthBeauty => "Health & Beauty",
            PredefinedCategory::BooksMedia => "Books & Media",
            PredefinedCategory::SportsOutdoors => "Sports & Outdoors",
            PredefinedCategory::ToysGames => "Toys & Games",
            PredefinedCategory::Automotive => "Automotive",
            PredefinedCategory::PetSupplies => "Pet Supplies",
            PredefinedCategory::OfficeSupplies => "Office Supplies",
            PredefinedCategory::Other => "Other",
        }
    }

    pub fn name(self) -> &'static str {
        self.id()
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn category(self) -> Category {
        Category {
            id: self.id().to_string(),
            name: self.name().to_string(),
            kind: CategoryKind::Predefined,
        }
    }
}

/// Where a category came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Predefined,
    Custom,
    /// Synthesized for an item whose category no longer matches any known id.
    Placeholder,
}

/// A category as presented to front ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub kind: CategoryKind,
}

impl Category {
    /// Custom categories use their (trimmed) name as id.
    pub fn custom(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            kind: CategoryKind::Custom,
        }
    }

    pub fn placeholder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: CategoryKind::Placeholder,
        }
    }

    pub fn is_other(&self) -> bool {
        self.kind == CategoryKind::Predefined && self.id == PredefinedCategory::Other.id()
    }
}

impl Entity for Category {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
