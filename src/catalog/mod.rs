//! In-memory achievement catalog
//!
//! [`CatalogRepository`] exclusively owns the group, category and
//! achievement maps. It is filled once (from the cache or by walking the
//! API) and only replaced wholesale by [`CatalogRepository::clear`].
//!
//! Every clear bumps the repository epoch. Fetches take a [`FetchTicket`]
//! when they start and their results are dropped if the epoch moved on in
//! the meantime.

mod hydrate;
mod seasonal;

pub use hydrate::{HydrationOutcome, HydrationSource};

use std::collections::BTreeMap;

use crate::cache::{CacheError, CacheKind, CacheStore};
use crate::domain::{Achievement, AchievementId, Category, CategoryId, Group, GroupId};

/// Marks the catalog generation a fetch was started against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
}

/// Owner of the three catalog maps
#[derive(Debug, Default)]
pub struct CatalogRepository {
    groups: BTreeMap<GroupId, Group>,
    categories: BTreeMap<CategoryId, Category>,
    achievements: BTreeMap<AchievementId, Achievement>,
    /// Categories eligible for seasonal daily selection
    seasonal_daily: Vec<Category>,
    /// Incremented on every clear
    epoch: u64,
}

impl CatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================
    // ACCESSORS
    // ========================================

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.get(id)
    }

    pub fn groups(&self) -> &BTreeMap<GroupId, Group> {
        &self.groups
    }

    /// Groups sorted by display order
    pub fn groups_by_order(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.groups.values().collect();
        groups.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        groups
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn categories(&self) -> &BTreeMap<CategoryId, Category> {
        &self.categories
    }

    pub fn achievement(&self, id: AchievementId) -> Option<&Achievement> {
        self.achievements.get(&id)
    }

    pub fn achievements(&self) -> &BTreeMap<AchievementId, Achievement> {
        &self.achievements
    }

    /// Mutable access for the progress overlay
    pub(crate) fn achievement_mut(&mut self, id: AchievementId) -> Option<&mut Achievement> {
        self.achievements.get_mut(&id)
    }

    pub(crate) fn achievements_mut(&mut self) -> impl Iterator<Item = &mut Achievement> {
        self.achievements.values_mut()
    }

    pub fn seasonal_daily_categories(&self) -> &[Category] {
        &self.seasonal_daily
    }

    /// The group a category is listed under, if any
    pub fn group_of(&self, category_id: CategoryId) -> Option<&Group> {
        self.groups_by_order()
            .into_iter()
            .find(|g| g.category_ids.contains(&category_id))
    }

    // ========================================
    // EPOCH
    // ========================================

    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket { epoch: self.epoch }
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.epoch == self.epoch
    }

    fn accept(&self, ticket: FetchTicket, what: &str) -> bool {
        if self.is_current(ticket) {
            true
        } else {
            tracing::warn!(
                "Discarding {} fetched for catalog epoch {} (now {})",
                what,
                ticket.epoch,
                self.epoch
            );
            false
        }
    }

    // ========================================
    // MUTATION
    // ========================================

    /// Store fetched groups, replacing any with the same id
    pub fn apply_groups(&mut self, ticket: FetchTicket, groups: Vec<Group>) -> usize {
        if !self.accept(ticket, "groups") {
            return 0;
        }
        let count = groups.len();
        for group in groups {
            self.groups.insert(group.id.clone(), group);
        }
        count
    }

    pub fn apply_categories(&mut self, ticket: FetchTicket, categories: Vec<Category>) -> usize {
        if !self.accept(ticket, "categories") {
            return 0;
        }
        let count = categories.len();
        for category in categories {
            self.categories.insert(category.id, category);
        }
        count
    }

    /// Store fetched achievements, tagging them with the daily flag and
    /// filling an empty icon from the owning category. Achievements without
    /// tiers are stored as complete.
    pub fn apply_achievements(
        &mut self,
        ticket: FetchTicket,
        achievements: Vec<Achievement>,
        is_daily: bool,
        fallback_icon: &str,
    ) -> usize {
        if !self.accept(ticket, "achievements") {
            return 0;
        }
        let count = achievements.len();
        for mut achievement in achievements {
            achievement.is_daily = is_daily;
            achievement.settle_completion();
            if achievement.icon.is_empty() {
                achievement.icon = fallback_icon.to_string();
            }
            self.achievements.insert(achievement.id, achievement);
        }
        count
    }

    /// Rebuild every group's `category_details`.
    ///
    /// Details follow the group's category order, sorted by category `order`,
    /// and omit categories with no achievement in memory.
    pub fn link_groups(&mut self) {
        let categories = &self.categories;
        let achievements = &self.achievements;

        for group in self.groups.values_mut() {
            let mut details: Vec<Category> = Vec::new();
            for id in &group.category_ids {
                let Some(category) = categories.get(id) else {
                    continue;
                };
                if details.iter().any(|c| c.id == category.id) {
                    continue;
                }
                if category.achievement_ids.iter().any(|a| achievements.contains_key(a)) {
                    details.push(category.clone());
                }
            }
            details.sort_by_key(|c| c.order);
            group.category_details = details;
        }
    }

    /// Drop every map, bump the epoch and delete the catalog documents.
    ///
    /// User progress is untouched.
    pub fn clear(&mut self, store: &CacheStore) {
        self.groups.clear();
        self.categories.clear();
        self.achievements.clear();
        self.seasonal_daily.clear();
        self.epoch += 1;

        for kind in CacheKind::CATALOG {
            if let Err(e) = store.delete(kind) {
                tracing::warn!("Failed to delete {} cache: {}", kind, e);
            }
        }
        tracing::info!("Catalog cleared (epoch {})", self.epoch);
    }

    // ========================================
    // PERSISTENCE
    // ========================================

    /// Load all three catalog documents, or nothing.
    ///
    /// On any error the in-memory maps are left as they were.
    pub fn load_from_cache(&mut self, store: &CacheStore) -> Result<(), CacheError> {
        let groups: BTreeMap<GroupId, Group> = store.load(CacheKind::Groups)?;
        let categories: BTreeMap<CategoryId, Category> = store.load(CacheKind::Categories)?;
        let achievements: BTreeMap<AchievementId, Achievement> = store.load(CacheKind::Achievements)?;

        tracing::info!(
            "Loaded catalog cache: {} groups, {} categories, {} achievements",
            groups.len(),
            categories.len(),
            achievements.len()
        );

        self.groups = groups;
        self.categories = categories;
        self.achievements = achievements;
        self.link_groups();
        self.rebuild_seasonal_daily_categories();
        Ok(())
    }

    /// Persist all three catalog documents
    pub fn save_catalog(&self, store: &CacheStore) -> Result<(), CacheError> {
        store.save(CacheKind::Groups, &self.groups)?;
        store.save(CacheKind::Categories, &self.categories)?;
        store.save(CacheKind::Achievements, &self.achievements)?;
        Ok(())
    }

    pub fn save_achievements(&self, store: &CacheStore) -> Result<(), CacheError> {
        store.save(CacheKind::Achievements, &self.achievements)
    }
}
