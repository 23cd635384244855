use serde::{Deserialize, Serialize};

use super::achievement::{Achievement, AchievementId};

/// One entry from the account completion feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAchievement {
    pub id: AchievementId,
    #[serde(default)]
    pub done: bool,
}

/// Locally tracked state for a single achievement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievementProgress {
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub current_tier: usize,
}

impl From<&Achievement> for UserAchievementProgress {
    fn from(achievement: &Achievement) -> Self {
        Self {
            is_complete: achievement.is_complete,
            progress: achievement.progress,
            current_tier: achievement.current_tier,
        }
    }
}
