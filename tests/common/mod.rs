//! Shared fixtures for tracker integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use achtrack::api::{AchievementApi, ApiError};
use achtrack::cache::CacheStore;
use achtrack::tracker::Tracker;
use achtrack::{Achievement, AchievementId, ApiKey, Category, CategoryId, Group, GroupId, PlayerAchievement};

/// In-memory API serving a fixed catalog
#[derive(Default)]
pub struct FixtureApi {
    pub groups: Vec<Group>,
    pub categories: BTreeMap<CategoryId, Category>,
    pub achievements: BTreeMap<AchievementId, Achievement>,
    pub account: Mutex<Vec<PlayerAchievement>>,
    pub requests: AtomicUsize,
}

impl FixtureApi {
    /// Daily (seasonal 1 and 2, regular 3 and 4), Story, Festival and Bonus Events
    pub fn standard() -> Self {
        let mut api = Self::default();
        api.groups = vec![
            Group::new("G-DAILY", "Daily", 0).with_categories([1, 2, 3, 4]),
            Group::new("G-STORY", "Story", 1).with_categories([10, 11]),
            Group::new("G-FEST", "Festivals", 2).with_categories([20]),
            Group::new("G-BONUS", "Bonus Events", 3).with_categories([30]),
        ];

        let mut festival = Category::new(20, "Festival", 0).with_achievements([200, 201]);
        festival.icon = "festival.png".to_string();

        for category in [
            Category::new(1, "Lunar New Year", 0).with_achievements([100]),
            Category::new(2, "Halloween", 1).with_achievements([101]),
            Category::new(3, "Daily PvE", 2).with_achievements([102, 103]),
            Category::new(4, "Daily WvW", 3).with_achievements([104]),
            Category::new(10, "Prologue", 0).with_achievements([110, 111]),
            Category::new(11, "Chapter One", 1).with_achievements([112]),
            festival,
            Category::new(30, "Bonus", 0).with_achievements([300]),
        ] {
            api.categories.insert(category.id, category);
        }

        let mut flip = Achievement::new(200, "Do a Flip").with_tiers([5]);
        flip.icon = "flip.png".to_string();

        for achievement in [
            Achievement::new(100, "Lantern Lighter").with_tiers([1]),
            Achievement::new(101, "Mad King's Maze").with_tiers([1]),
            Achievement::new(102, "Daily Gatherer").with_tiers([3]),
            Achievement::new(103, "Daily Vista Viewer").with_tiers([1]),
            Achievement::new(104, "Daily Camp Capturer").with_tiers([2]),
            Achievement::new(110, "Awakening").with_tiers([2, 3]),
            Achievement::new(111, "Into the Mists").with_tiers([1]),
            Achievement::new(112, "First Steps").with_tiers([4, 4, 4]),
            flip,
            Achievement::new(201, "Eat Cake").with_tiers([1, 10]),
            Achievement::new(300, "Bonus Chest").with_tiers([1]),
        ] {
            api.achievements.insert(achievement.id, achievement);
        }
        api
    }

    pub fn with_account(self, records: Vec<(AchievementId, bool)>) -> Self {
        if let Ok(mut account) = self.account.lock() {
            *account = records.into_iter().map(|(id, done)| PlayerAchievement { id, done }).collect();
        }
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AchievementApi for FixtureApi {
    async fn group_ids(&self) -> Result<Vec<GroupId>, ApiError> {
        self.hit();
        Ok(self.groups.iter().map(|g| g.id.clone()).collect())
    }

    async fn groups(&self, ids: &[GroupId]) -> Result<Vec<Group>, ApiError> {
        self.hit();
        Ok(self.groups.iter().filter(|g| ids.contains(&g.id)).cloned().collect())
    }

    async fn categories(&self, ids: &[CategoryId]) -> Result<Vec<Category>, ApiError> {
        self.hit();
        Ok(ids.iter().filter_map(|id| self.categories.get(id).cloned()).collect())
    }

    async fn achievements(&self, ids: &[AchievementId]) -> Result<Vec<Achievement>, ApiError> {
        self.hit();
        Ok(ids.iter().filter_map(|id| self.achievements.get(id).cloned()).collect())
    }

    async fn account_achievements(&self, _key: &ApiKey) -> Result<Vec<PlayerAchievement>, ApiError> {
        self.hit();
        Ok(self.account.lock().map(|a| a.clone()).unwrap_or_default())
    }
}

/// Creates a temporary data directory
pub fn create_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Open and start a tracker over `dir`
pub async fn start_tracker(dir: &TempDir, api: Arc<FixtureApi>) -> Tracker {
    let mut tracker = Tracker::open(CacheStore::new(dir.path()), api);
    tracker.start().await;
    tracker
}
