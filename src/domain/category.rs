use serde::{Deserialize, Serialize};

use super::achievement::AchievementId;

pub type CategoryId = u32;

/// A named collection of achievements within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default, rename = "achievements")]
    pub achievement_ids: Vec<AchievementId>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, order: i32) -> Self {
        Self {
            id,
            name: name.into(),
            icon: String::new(),
            order,
            achievement_ids: Vec::new(),
        }
    }

    pub fn with_achievements(mut self, ids: impl IntoIterator<Item = AchievementId>) -> Self {
        self.achievement_ids = ids.into_iter().collect();
        self
    }

    /// Categories in the "Daily" group with order 0 or 1 rotate with the seasons
    pub fn is_seasonal_order(&self) -> bool {
        self.order == 0 || self.order == 1
    }
}
