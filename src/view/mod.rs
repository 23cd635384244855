//! Read-only projections over the catalog and overlay
//!
//! Nothing here mutates the repository. Every function can be rerun at any
//! time to get a fresh view.

mod filter;
mod search;
mod tree;

pub use filter::{category_achievements, hide_completed};
pub use search::search;
pub use tree::{CatalogTree, project_tree};

use crate::domain::{AchievementId, Category, CategoryId, Group, GroupId};

/// A group as displayed
#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    pub id: GroupId,
    pub name: String,
    pub order: i32,
    pub categories: Vec<CategoryView>,
}

impl GroupView {
    fn from_group(group: &Group, categories: Vec<CategoryView>) -> Self {
        Self {
            id: group.id.clone(),
            name: group.name.clone(),
            order: group.order,
            categories,
        }
    }
}

/// A category as displayed.
///
/// `filtered` is set by search and replaces `achievement_ids` for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
    pub order: i32,
    pub achievement_ids: Vec<AchievementId>,
    pub filtered: Option<Vec<AchievementId>>,
}

impl CategoryView {
    pub fn displayed_ids(&self) -> &[AchievementId] {
        self.filtered.as_deref().unwrap_or(&self.achievement_ids)
    }
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            icon: category.icon.clone(),
            order: category.order,
            achievement_ids: category.achievement_ids.clone(),
            filtered: None,
        }
    }
}
