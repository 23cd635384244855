//! API stand-in for offline runs: every request fails as a transport error

use async_trait::async_trait;

use super::{AchievementApi, ApiError};
use crate::domain::{Achievement, AchievementId, ApiKey, Category, CategoryId, Group, GroupId, PlayerAchievement};

#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineApi;

fn offline<T>(endpoint: &str) -> Result<T, ApiError> {
    Err(ApiError::Transport {
        url: endpoint.to_string(),
        message: "offline mode".to_string(),
    })
}

#[async_trait]
impl AchievementApi for OfflineApi {
    async fn group_ids(&self) -> Result<Vec<GroupId>, ApiError> {
        offline("/achievements/groups")
    }

    async fn groups(&self, _ids: &[GroupId]) -> Result<Vec<Group>, ApiError> {
        offline("/achievements/groups")
    }

    async fn categories(&self, _ids: &[CategoryId]) -> Result<Vec<Category>, ApiError> {
        offline("/achievements/categories")
    }

    async fn achievements(&self, _ids: &[AchievementId]) -> Result<Vec<Achievement>, ApiError> {
        offline("/achievements")
    }

    async fn account_achievements(&self, _key: &ApiKey) -> Result<Vec<PlayerAchievement>, ApiError> {
        offline("/account/achievements")
    }
}
