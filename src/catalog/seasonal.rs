//! Seasonal daily pool

use super::CatalogRepository;
use crate::domain::Category;

impl CatalogRepository {
    /// Recompute the seasonal daily pool: categories of the "Daily" group
    /// whose order is 0 or 1, deduplicated by id.
    pub fn rebuild_seasonal_daily_categories(&mut self) {
        let mut pool: Vec<Category> = Vec::new();

        for group in self.groups_by_order() {
            if !group.is_daily() {
                continue;
            }
            for id in &group.category_ids {
                let Some(category) = self.categories.get(id) else {
                    continue;
                };
                if category.is_seasonal_order() && !pool.iter().any(|c| c.id == category.id) {
                    pool.push(category.clone());
                }
            }
        }

        tracing::debug!("Seasonal daily pool: {} categories", pool.len());
        self.seasonal_daily = pool;
    }

    pub fn is_seasonal_daily(&self, category_id: u32) -> bool {
        self.seasonal_daily.iter().any(|c| c.id == category_id)
    }
}
