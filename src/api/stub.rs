//! In-memory API used by unit tests

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AchievementApi, ApiError};
use crate::domain::{Achievement, AchievementId, ApiKey, Category, CategoryId, Group, GroupId, PlayerAchievement};

#[derive(Default)]
pub(crate) struct StubApi {
    pub groups: Vec<Group>,
    pub categories: BTreeMap<CategoryId, Category>,
    pub achievements: BTreeMap<AchievementId, Achievement>,
    pub account: Vec<PlayerAchievement>,
    /// Endpoints that fail: "group_ids", "groups", "categories", "achievements", "account"
    pub failing: HashSet<&'static str>,
    pub calls: Mutex<Vec<String>>,
}

impl StubApi {
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category.id, category);
        self
    }

    pub fn with_achievement(mut self, achievement: Achievement) -> Self {
        self.achievements.insert(achievement.id, achievement);
        self
    }

    pub fn failing(mut self, endpoint: &'static str) -> Self {
        self.failing.insert(endpoint);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    fn record(&self, endpoint: &'static str, detail: String) -> Result<(), ApiError> {
        self.calls.lock().expect("lock").push(format!("{}{}", endpoint, detail));
        if self.failing.contains(endpoint) {
            return Err(ApiError::Transport {
                url: endpoint.to_string(),
                message: "stubbed failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AchievementApi for StubApi {
    async fn group_ids(&self) -> Result<Vec<GroupId>, ApiError> {
        self.record("group_ids", String::new())?;
        Ok(self.groups.iter().map(|g| g.id.clone()).collect())
    }

    async fn groups(&self, ids: &[GroupId]) -> Result<Vec<Group>, ApiError> {
        self.record("groups", format!("{:?}", ids))?;
        Ok(self.groups.iter().filter(|g| ids.contains(&g.id)).cloned().collect())
    }

    async fn categories(&self, ids: &[CategoryId]) -> Result<Vec<Category>, ApiError> {
        self.record("categories", format!("{:?}", ids))?;
        Ok(ids.iter().filter_map(|id| self.categories.get(id).cloned()).collect())
    }

    async fn achievements(&self, ids: &[AchievementId]) -> Result<Vec<Achievement>, ApiError> {
        self.record("achievements", format!("{:?}", ids))?;
        Ok(ids.iter().filter_map(|id| self.achievements.get(id).cloned()).collect())
    }

    async fn account_achievements(&self, _key: &ApiKey) -> Result<Vec<PlayerAchievement>, ApiError> {
        self.record("account", String::new())?;
        Ok(self.account.clone())
    }
}
