//! User-chosen seasonal daily categories

use std::collections::BTreeSet;

use crate::cache::{CacheError, CacheKind, CacheStore};
use crate::domain::{Category, CategoryId};

/// Category ids picked from the seasonal daily pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonalSelection {
    ids: BTreeSet<CategoryId>,
}

impl SeasonalSelection {
    pub fn new(ids: impl IntoIterator<Item = CategoryId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Missing or unreadable selection means nothing selected
    pub fn load(store: &CacheStore) -> Self {
        match store.load::<Vec<CategoryId>>(CacheKind::SelectedSeasonalIds) {
            Ok(ids) => Self::new(ids),
            Err(e) if e.is_not_found() => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable seasonal selection: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &CacheStore) -> Result<(), CacheError> {
        let ids: Vec<CategoryId> = self.ids.iter().copied().collect();
        store.save(CacheKind::SelectedSeasonalIds, &ids)
    }

    /// Replace the selection, keeping only ids that are in `pool`
    pub fn replace(&mut self, ids: impl IntoIterator<Item = CategoryId>, pool: &[Category]) -> Vec<CategoryId> {
        let mut rejected = Vec::new();
        self.ids = ids
            .into_iter()
            .filter(|id| {
                let in_pool = pool.iter().any(|c| c.id == *id);
                if !in_pool {
                    rejected.push(*id);
                }
                in_pool
            })
            .collect();
        rejected
    }

    /// Drop ids that fell out of the pool (e.g. after a catalog refresh)
    pub fn retain_pool(&mut self, pool: &[Category]) {
        self.ids.retain(|id| pool.iter().any(|c| c.id == *id));
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &BTreeSet<CategoryId> {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
