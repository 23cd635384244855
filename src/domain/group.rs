use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryId};

/// Group ids are opaque strings (GUIDs on the live API)
pub type GroupId = String;

/// Name of the group whose categories are the daily achievements
pub const DAILY_GROUP: &str = "Daily";

/// Name of the group that is never shown in any view
pub const BONUS_EVENTS_GROUP: &str = "Bonus Events";

/// Top-level grouping of categories (e.g. "Daily", "Story")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: i32,
    /// Category ids in API order
    #[serde(default, rename = "categories")]
    pub category_ids: Vec<CategoryId>,
    /// Resolved categories, rebuilt whenever the catalog is linked
    #[serde(default, rename = "categoryDetails")]
    pub category_details: Vec<Category>,
}

impl Group {
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
            category_ids: Vec::new(),
            category_details: Vec::new(),
        }
    }

    pub fn with_categories(mut self, ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.category_ids = ids.into_iter().collect();
        self
    }

    pub fn is_daily(&self) -> bool {
        self.name == DAILY_GROUP
    }

    pub fn is_bonus_events(&self) -> bool {
        self.name.eq_ignore_ascii_case(BONUS_EVENTS_GROUP)
    }
}
