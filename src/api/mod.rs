//! Remote achievements API
//!
//! [`AchievementApi`] is the seam the catalog and overlay talk to. It is
//! stateless: no retries, no caching. Every failure comes back as an
//! [`ApiError`] and the caller degrades to whatever it already holds.

mod client;
mod error;
mod offline;

pub use client::{DEFAULT_BASE_URL, HttpApi, MAX_IDS_PER_REQUEST, redact_token};
pub use error::ApiError;
pub use offline::OfflineApi;

use async_trait::async_trait;

use crate::domain::{Achievement, AchievementId, ApiKey, Category, CategoryId, Group, GroupId, PlayerAchievement};

/// Read-only access to the achievement hierarchy and the account feed
#[async_trait]
pub trait AchievementApi: Send + Sync {
    /// `GET /achievements/groups`
    async fn group_ids(&self) -> Result<Vec<GroupId>, ApiError>;

    /// `GET /achievements/groups?ids=...`
    async fn groups(&self, ids: &[GroupId]) -> Result<Vec<Group>, ApiError>;

    /// `GET /achievements/categories?ids=...`
    async fn categories(&self, ids: &[CategoryId]) -> Result<Vec<Category>, ApiError>;

    /// `GET /achievements?ids=...`
    async fn achievements(&self, ids: &[AchievementId]) -> Result<Vec<Achievement>, ApiError>;

    /// `GET /account/achievements?access_token=...`
    async fn account_achievements(&self, key: &ApiKey) -> Result<Vec<PlayerAchievement>, ApiError>;
}

#[cfg(test)]
pub(crate) mod stub;
