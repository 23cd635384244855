//! Tracker - the single owner of catalog, overlay and selection
//!
//! Constructed once at startup and handed to every consumer. All mutations
//! go through `&mut Tracker`, which keeps fetch-and-merge sequences
//! serialized: a refresh can't start while a hydration is still running.
//!
//! Startup:
//!
//! ```text
//! hydrate catalog (cache or API)
//!   -> fetch account completion (if an API key is stored)
//!   -> restore: remote "done" flags, then saved tier/progress
//!   -> project tree, recompute summary
//! ```

mod status;

pub use status::HydrationStatus;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::AchievementApi;
use crate::cache::CacheStore;
use crate::catalog::{CatalogRepository, HydrationOutcome};
use crate::domain::{Achievement, AchievementId, ApiKey, Category, CategoryId, PlayerAchievement};
use crate::progress::{Changes, ProgressError, ProgressOverlay, ProgressSummary};
use crate::selection::SeasonalSelection;
use crate::timers::HoldRepeat;
use crate::view::{self, CatalogTree, GroupView};

/// Direction of a held progress button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Increment,
    Decrement,
}

pub struct Tracker {
    store: CacheStore,
    api: Arc<dyn AchievementApi>,
    catalog: CatalogRepository,
    overlay: ProgressOverlay,
    selection: SeasonalSelection,
    api_key: Option<ApiKey>,
    status: HydrationStatus,
    tree: CatalogTree,
}

impl Tracker {
    /// Read local state; nothing is fetched until [`Tracker::start`]
    pub fn open(store: CacheStore, api: Arc<dyn AchievementApi>) -> Self {
        let api_key = store.load_api_key().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable API key: {}", e);
            None
        });
        let overlay = ProgressOverlay::load(store.clone());
        let selection = SeasonalSelection::load(&store);

        Self {
            store,
            api,
            catalog: CatalogRepository::new(),
            overlay,
            selection,
            api_key,
            status: HydrationStatus::Idle,
            tree: CatalogTree::default(),
        }
    }

    /// Hydrate, merge player state and project the tree
    pub async fn start(&mut self) -> &HydrationStatus {
        self.hydrate().await;
        self.merge_player_state().await;
        &self.status
    }

    /// Drop the catalog and its cache files, then start over from the API.
    ///
    /// Saved user progress is reapplied afterwards.
    pub async fn refresh(&mut self) -> &HydrationStatus {
        self.catalog.clear(&self.store);
        self.hydrate().await;
        self.merge_player_state().await;
        &self.status
    }

    async fn merge_player_state(&mut self) {
        let remote = self.fetch_remote().await;
        self.overlay.restore(&mut self.catalog, remote.as_deref());

        // An empty pool means nothing loaded; keep the saved choice for later
        let pool = self.catalog.seasonal_daily_categories();
        if !pool.is_empty() {
            self.selection.retain_pool(pool);
        }
        self.reproject();
    }

    async fn hydrate(&mut self) {
        self.status = HydrationStatus::Loading;
        let outcome = self.catalog.hydrate(&self.store, self.api.as_ref()).await;
        self.status = match outcome {
            HydrationOutcome::Loaded(source) => HydrationStatus::Loaded(source),
            HydrationOutcome::Failed(message) => HydrationStatus::Failed(message),
        };
        tracing::info!("Catalog status: {}", self.status);
    }

    /// Account completion, or `None` without a key or on failure
    async fn fetch_remote(&self) -> Option<Vec<PlayerAchievement>> {
        let key = self.api_key.as_ref()?;
        match self.api.account_achievements(key).await {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::warn!("Failed to fetch account achievements: {}", e);
                None
            }
        }
    }

    fn reproject(&mut self) {
        self.tree = view::project_tree(&self.catalog, &self.selection);
        self.overlay
            .set_visible_daily(&self.catalog, self.tree.visible_daily_ids.clone());
    }

    // ========================================
    // READ
    // ========================================

    pub fn status(&self) -> &HydrationStatus {
        &self.status
    }

    pub fn catalog(&self) -> &CatalogRepository {
        &self.catalog
    }

    pub fn tree(&self) -> &CatalogTree {
        &self.tree
    }

    pub fn summary(&self) -> ProgressSummary {
        self.overlay.summary()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn selection(&self) -> &SeasonalSelection {
        &self.selection
    }

    pub fn seasonal_pool(&self) -> &[Category] {
        self.catalog.seasonal_daily_categories()
    }

    /// Search results, or the full tree for a blank query
    pub fn search(&self, query: &str) -> Vec<GroupView> {
        if query.trim().is_empty() {
            self.tree.groups.clone()
        } else {
            view::search(&self.catalog, query)
        }
    }

    /// Fetch any achievements of a category that are not loaded yet.
    ///
    /// Failures are logged; the category shows what is available.
    pub async fn load_category(&mut self, category_id: CategoryId) -> usize {
        match self
            .catalog
            .ensure_category_achievements(category_id, &self.store, self.api.as_ref())
            .await
        {
            Ok(added) => {
                if added > 0 {
                    self.overlay.apply_persisted_progress(&mut self.catalog);
                    self.reproject();
                }
                added
            }
            Err(e) => {
                tracing::warn!("Failed to load achievements of category {}: {}", category_id, e);
                0
            }
        }
    }

    /// Achievements of a category sorted by name, optionally without completed ones
    pub fn category_achievements(&self, category_id: CategoryId, hide_completed: bool) -> Option<Vec<&Achievement>> {
        let category = self.catalog.category(category_id)?;
        let view = view::CategoryView::from(category);
        let list = view::category_achievements(&self.catalog, &view);
        Some(view::hide_completed(&list, hide_completed))
    }

    // ========================================
    // PROGRESS
    // ========================================

    pub fn increment(&mut self, id: AchievementId) -> Result<Changes, ProgressError> {
        self.overlay.increment(&mut self.catalog, id)
    }

    pub fn decrement(&mut self, id: AchievementId) -> Result<Changes, ProgressError> {
        self.overlay.decrement(&mut self.catalog, id)
    }

    pub fn mark_complete(&mut self, ids: &[AchievementId]) -> Result<usize, ProgressError> {
        self.overlay.mark_all_complete(&mut self.catalog, ids)
    }

    pub fn reset(&mut self, ids: &[AchievementId]) -> Result<usize, ProgressError> {
        self.overlay.reset_many(&mut self.catalog, ids)
    }

    /// "Mark all complete" for every achievement of a category
    pub fn mark_category_complete(&mut self, category_id: CategoryId) -> Result<usize> {
        let ids = self
            .catalog
            .category(category_id)
            .map(|c| c.achievement_ids.clone())
            .with_context(|| format!("Unknown category {}", category_id))?;
        Ok(self.overlay.mark_all_complete(&mut self.catalog, &ids)?)
    }

    pub fn reset_all(&mut self) -> Result<usize, ProgressError> {
        self.overlay.reset_all(&mut self.catalog)
    }

    /// Apply ticks from a held button until it is released or a boundary is
    /// hit. Clearing a tier stops the repeat, like letting go.
    ///
    /// Returns how many steps were applied.
    pub async fn repeat_while_held(
        &mut self,
        id: AchievementId,
        step: Step,
        hold: &HoldRepeat,
        ticks: &mut UnboundedReceiver<()>,
        mut on_step: impl FnMut(&Achievement),
    ) -> Result<u32, ProgressError> {
        let mut applied = 0;

        while ticks.recv().await.is_some() {
            if !hold.is_held() {
                break;
            }

            let changes = match step {
                Step::Increment => self.increment(id)?,
                Step::Decrement => self.decrement(id)?,
            };
            if !changes.any() {
                hold.release();
                break;
            }

            applied += 1;
            if let Some(achievement) = self.catalog.achievement(id) {
                on_step(achievement);
            }
            if changes.current_tier {
                hold.release();
                break;
            }
        }

        Ok(applied)
    }

    // ========================================
    // SETTINGS
    // ========================================

    /// Store a new API key and apply the account's completion right away.
    ///
    /// Returns how many achievements changed.
    pub async fn set_api_key(&mut self, key: ApiKey) -> Result<usize> {
        self.store.save_api_key(&key).context("Failed to save API key")?;
        self.api_key = Some(key.clone());

        if self.catalog.is_empty() {
            self.hydrate().await;
            self.overlay.apply_persisted_progress(&mut self.catalog);
            self.reproject();
        }

        let records = self
            .api
            .account_achievements(&key)
            .await
            .context("Failed to fetch account achievements")?;
        Ok(self.overlay.apply_remote_completion(&mut self.catalog, &records)?)
    }

    /// Forget the API key; with `reset`, every achievement goes back to
    /// not started. Returns how many achievements were reset.
    pub fn remove_api_key(&mut self, reset: bool) -> Result<usize> {
        self.store.delete_api_key().context("Failed to delete API key")?;
        self.api_key = None;

        if reset {
            Ok(self.reset_all()?)
        } else {
            Ok(0)
        }
    }

    /// Replace the seasonal daily selection; ids outside the pool are
    /// rejected and returned.
    pub fn select_seasonal_dailies(&mut self, ids: impl IntoIterator<Item = CategoryId>) -> Result<Vec<CategoryId>> {
        let rejected = self
            .selection
            .replace(ids, self.catalog.seasonal_daily_categories());
        self.selection
            .save(&self.store)
            .context("Failed to save seasonal selection")?;
        self.reproject();
        Ok(rejected)
    }
}
