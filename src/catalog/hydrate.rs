//! Catalog hydration: cache first, then the API hierarchy
//!
//! ```text
//! group ids -> groups -> missing categories -> missing achievements
//! ```
//!
//! Group failures fail the hydration. A failed category or achievement batch
//! only aborts that branch; the rest of the walk continues and whatever was
//! retrieved is kept and persisted.

use std::fmt;

use super::CatalogRepository;
use crate::api::{AchievementApi, ApiError};
use crate::cache::CacheStore;
use crate::domain::{AchievementId, CategoryId};

/// Where the catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    /// Already loaded, nothing to do
    Memory,
    Cache,
    Api,
}

impl fmt::Display for HydrationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Cache => write!(f, "cache"),
            Self::Api => write!(f, "API"),
        }
    }
}

/// Result of one hydration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationOutcome {
    Loaded(HydrationSource),
    Failed(String),
}

impl CatalogRepository {
    /// Populate the catalog if it is empty.
    ///
    /// Never fails hard: a broken cache falls through to the API, a broken
    /// API leaves the repository with whatever it holds.
    pub async fn hydrate(&mut self, store: &CacheStore, api: &dyn AchievementApi) -> HydrationOutcome {
        if !self.is_empty() {
            return HydrationOutcome::Loaded(HydrationSource::Memory);
        }

        match self.load_from_cache(store) {
            Ok(()) => return HydrationOutcome::Loaded(HydrationSource::Cache),
            Err(e) if e.is_not_found() => {
                tracing::info!("No catalog cache ({}), fetching from API", e);
            }
            Err(e) => {
                tracing::warn!("Catalog cache unusable, fetching from API: {}", e);
            }
        }

        match self.fetch_from_api(store, api).await {
            Ok(()) => HydrationOutcome::Loaded(HydrationSource::Api),
            Err(e) => {
                tracing::error!("Failed to fetch catalog: {}", e);
                HydrationOutcome::Failed(e.to_string())
            }
        }
    }

    /// Walk the API hierarchy, fetching only ids not already in memory,
    /// then persist the catalog and rebuild the seasonal pool.
    pub async fn fetch_from_api(&mut self, store: &CacheStore, api: &dyn AchievementApi) -> Result<(), ApiError> {
        let ticket = self.begin_fetch();

        let group_ids = api.group_ids().await?;
        if group_ids.is_empty() {
            tracing::warn!("API returned no achievement groups");
            return Ok(());
        }

        let mut groups = api.groups(&group_ids).await?;
        groups.sort_by_key(|g| g.order);
        let fetched_groups = self.apply_groups(ticket, groups);
        if !self.is_current(ticket) {
            return Ok(());
        }

        let mut fetched_categories = 0;
        let mut fetched_achievements = 0;

        for (group_name, is_daily, category_ids) in self.group_walk_order() {
            let missing = self.missing_categories(&category_ids);
            if !missing.is_empty() {
                match api.categories(&missing).await {
                    Ok(categories) => fetched_categories += self.apply_categories(ticket, categories),
                    Err(e) => {
                        tracing::warn!("Skipping categories of group '{}': {}", group_name, e);
                        continue;
                    }
                }
            }

            for category_id in category_ids {
                let Some((icon, missing)) = self.missing_achievements(category_id) else {
                    continue;
                };
                if missing.is_empty() {
                    continue;
                }
                match api.achievements(&missing).await {
                    Ok(achievements) => {
                        fetched_achievements += self.apply_achievements(ticket, achievements, is_daily, &icon)
                    }
                    Err(e) => {
                        tracing::warn!("Skipping achievements of category {}: {}", category_id, e);
                    }
                }
            }

            if !self.is_current(ticket) {
                return Ok(());
            }
        }

        tracing::info!(
            "Fetched {} groups, {} categories, {} achievements",
            fetched_groups,
            fetched_categories,
            fetched_achievements
        );

        self.link_groups();
        if let Err(e) = self.save_catalog(store) {
            tracing::warn!("Failed to persist catalog: {}", e);
        }
        self.rebuild_seasonal_daily_categories();
        Ok(())
    }

    /// Fetch whichever achievements of one category are not in memory yet.
    ///
    /// Returns how many achievements were added.
    pub async fn ensure_category_achievements(
        &mut self,
        category_id: CategoryId,
        store: &CacheStore,
        api: &dyn AchievementApi,
    ) -> Result<usize, ApiError> {
        let Some((icon, missing)) = self.missing_achievements(category_id) else {
            return Ok(0);
        };
        if missing.is_empty() {
            return Ok(0);
        }

        let is_daily = self.group_of(category_id).is_some_and(|g| g.is_daily());
        let ticket = self.begin_fetch();
        tracing::debug!("Fetching {} missing achievements for category {}", missing.len(), category_id);
        let achievements = api.achievements(&missing).await?;
        let added = self.apply_achievements(ticket, achievements, is_daily, &icon);

        if added > 0 {
            self.link_groups();
            if let Err(e) = self.save_achievements(store) {
                tracing::warn!("Failed to persist achievements: {}", e);
            }
        }
        Ok(added)
    }

    /// Snapshot of (name, is_daily, category ids) in group display order
    fn group_walk_order(&self) -> Vec<(String, bool, Vec<CategoryId>)> {
        self.groups_by_order()
            .into_iter()
            .map(|g| (g.name.clone(), g.is_daily(), g.category_ids.clone()))
            .collect()
    }

    fn missing_categories(&self, ids: &[CategoryId]) -> Vec<CategoryId> {
        let mut missing: Vec<CategoryId> = Vec::new();
        for id in ids {
            if !self.categories.contains_key(id) && !missing.contains(id) {
                missing.push(*id);
            }
        }
        missing
    }

    /// Category icon plus the achievement ids not yet in memory
    fn missing_achievements(&self, category_id: CategoryId) -> Option<(String, Vec<AchievementId>)> {
        let category = self.categories.get(&category_id)?;
        let mut missing: Vec<AchievementId> = Vec::new();
        for id in &category.achievement_ids {
            if !self.achievements.contains_key(id) && !missing.contains(id) {
                missing.push(*id);
            }
        }
        Some((category.icon.clone(), missing))
    }
}
