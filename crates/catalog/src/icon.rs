//! Category id → icon token lookup.
//!
//! Front ends map each token to whatever glyph or asset they render.

use serde::{Deserialize, Serialize};

use crate::category::PredefinedCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Cake,
    Bolt,
    ShoppingBag,
    Home,
    WrenchScrewdriver,
    Heart,
    AcademicCap,
    GlobeAlt,
    Gift,
    Tag,
    /// Generic fallback for custom and unknown categories.
    QuestionMarkCircle,
}

impl Icon {
    pub fn as_str(self) -> &'static str {
        match self {
            Icon::Cake => "cake",
            Icon::Bolt => "bolt",
            Icon::ShoppingBag => "shopping_bag",
            Icon::Home => "home",
            Icon::WrenchScrewdriver => "wrench_screwdriver",
            Icon::Heart => "heart",
            Icon::AcademicCap => "academic_cap",
            Icon::GlobeAlt => "globe_alt",
            Icon::Gift => "gift",
            Icon::Tag => "tag",
            Icon::QuestionMarkCircle => "question_mark_circle",
        }
    }
}

/// Icon for a category id. Anything that is not a predefined id gets the
/// fallback.
pub fn icon_for(category_id: &str) -> Icon {
    match PredefinedCategory::from_id(category_id) {
        Some(PredefinedCategory::Food) => Icon::Cake,
        Some(PredefinedCategory::Electronics) => Icon::Bolt,
        Some(PredefinedCategory::Clothing) => Icon::ShoppingBag,
        Some(PredefinedCategory::HomeGoods) => Icon::Home,
        Some(PredefinedCategory::ToolsHardware) | Some(PredefinedCategory::Automotive) => {
            Icon::WrenchScrewdriver
        }
        Some(PredefinedCategory::HealthBeauty) => Icon::Heart,
        Some(PredefinedCategory::BooksMedia) | Some(PredefinedCategory::OfficeSupplies) => {
            Icon::AcademicCap
        }
        Some(PredefinedCategory::SportsOutdoors) => Icon::GlobeAlt,
        Some(PredefinedCategory::ToysGames) => Icon::Gift,
        Some(PredefinedCategory::PetSupplies) => Icon::Tag,
        Some(PredefinedCategory::Other) | None => Icon::QuestionMarkCircle,
    }
}
