//! Progress overlay - applies and persists player state

use std::collections::{BTreeMap, BTreeSet};

use super::state::{self, Changes};
use super::stats::ProgressSummary;
use crate::cache::{CacheError, CacheKind, CacheStore};
use crate::catalog::CatalogRepository;
use crate::domain::{Achievement, AchievementId, PlayerAchievement, UserAchievementProgress};

/// Error type for progress mutations
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("Unknown achievement {0}")]
    UnknownAchievement(AchievementId),

    /// The in-memory change stands; only the write failed
    #[error("Failed to save progress: {0}")]
    Persist(#[from] CacheError),
}

/// Owner of the persisted user progress map.
///
/// Mutations go through here so each change lands in `user_progress.json`
/// before the call returns.
pub struct ProgressOverlay {
    store: CacheStore,
    records: BTreeMap<AchievementId, UserAchievementProgress>,
    visible_daily: BTreeSet<AchievementId>,
    summary: ProgressSummary,
}

impl ProgressOverlay {
    /// Read saved progress. A missing document is an empty map; a corrupt
    /// one is logged and treated as empty.
    pub fn load(store: CacheStore) -> Self {
        let records = match store.load::<BTreeMap<AchievementId, UserAchievementProgress>>(CacheKind::UserProgress) {
            Ok(records) => {
                tracing::debug!("Loaded progress for {} achievements", records.len());
                records
            }
            Err(e) if e.is_not_found() => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable user progress: {}", e);
                BTreeMap::new()
            }
        };

        Self {
            store,
            records,
            visible_daily: BTreeSet::new(),
            summary: ProgressSummary::default(),
        }
    }

    pub fn records(&self) -> &BTreeMap<AchievementId, UserAchievementProgress> {
        &self.records
    }

    pub fn summary(&self) -> ProgressSummary {
        self.summary
    }

    /// Daily ids shown in the current tree; the daily denominator
    pub fn set_visible_daily(&mut self, repo: &CatalogRepository, ids: BTreeSet<AchievementId>) {
        self.visible_daily = ids;
        self.recompute(repo);
    }

    pub fn recompute(&mut self, repo: &CatalogRepository) {
        self.summary = ProgressSummary::compute(repo, &self.visible_daily);
    }

    // ========================================
    // MERGING
    // ========================================

    /// Load-time merge: the coarse remote "done" flag first, then saved
    /// tier/progress detail on top. Nothing is written.
    ///
    /// A remote `done: false` never clears an achievement whose tiers are
    /// all cleared.
    pub fn restore(&mut self, repo: &mut CatalogRepository, remote: Option<&[PlayerAchievement]>) {
        if let Some(remote) = remote {
            let mut applied = 0;
            for record in remote {
                if let Some(achievement) = repo.achievement_mut(record.id) {
                    achievement.is_complete = record.done || achievement.all_tiers_cleared();
                    applied += 1;
                }
            }
            tracing::debug!("Applied remote completion to {} achievements", applied);
        }
        self.apply_persisted_progress(repo);
    }

    /// Copy saved records verbatim onto matching achievements
    pub fn apply_persisted_progress(&mut self, repo: &mut CatalogRepository) -> usize {
        let mut applied = 0;
        for (id, record) in &self.records {
            if let Some(achievement) = repo.achievement_mut(*id) {
                achievement.is_complete = record.is_complete;
                achievement.progress = record.progress;
                achievement.current_tier = record.current_tier;
                achievement.settle_completion();
                applied += 1;
            }
        }
        self.recompute(repo);
        applied
    }

    /// Set `is_complete = done` for every known id; unknown ids are ignored.
    /// Achievements with every tier cleared locally stay complete.
    ///
    /// Changed achievements are persisted. Returns how many changed.
    pub fn apply_remote_completion(
        &mut self,
        repo: &mut CatalogRepository,
        remote: &[PlayerAchievement],
    ) -> Result<usize, ProgressError> {
        let mut changed = 0;
        for record in remote {
            let Some(achievement) = repo.achievement_mut(record.id) else {
                continue;
            };
            let done = record.done || achievement.all_tiers_cleared();
            if achievement.is_complete != done {
                achievement.is_complete = done;
                self.records.insert(record.id, UserAchievementProgress::from(&*achievement));
                changed += 1;
            }
        }

        if changed > 0 {
            self.persist()?;
            self.recompute(repo);
        }
        tracing::info!("Remote completion changed {} achievements", changed);
        Ok(changed)
    }

    // ========================================
    // MUTATIONS
    // ========================================

    /// Record one achievement's state and write the whole map
    pub fn on_mutation(&mut self, achievement: &Achievement) -> Result<(), CacheError> {
        self.records.insert(achievement.id, UserAchievementProgress::from(achievement));
        self.persist()
    }

    pub fn increment(&mut self, repo: &mut CatalogRepository, id: AchievementId) -> Result<Changes, ProgressError> {
        self.transition(repo, id, state::increment)
    }

    pub fn decrement(&mut self, repo: &mut CatalogRepository, id: AchievementId) -> Result<Changes, ProgressError> {
        self.transition(repo, id, state::decrement)
    }

    pub fn mark_complete(&mut self, repo: &mut CatalogRepository, id: AchievementId) -> Result<Changes, ProgressError> {
        self.transition(repo, id, state::mark_complete)
    }

    pub fn reset(&mut self, repo: &mut CatalogRepository, id: AchievementId) -> Result<Changes, ProgressError> {
        self.transition(repo, id, state::reset)
    }

    /// Bulk "mark all complete"; unknown ids are skipped
    pub fn mark_all_complete(
        &mut self,
        repo: &mut CatalogRepository,
        ids: &[AchievementId],
    ) -> Result<usize, ProgressError> {
        self.bulk(repo, ids, state::mark_complete)
    }

    pub fn reset_many(&mut self, repo: &mut CatalogRepository, ids: &[AchievementId]) -> Result<usize, ProgressError> {
        self.bulk(repo, ids, state::reset)
    }

    /// Reset every achievement in the catalog
    pub fn reset_all(&mut self, repo: &mut CatalogRepository) -> Result<usize, ProgressError> {
        let mut changed = 0;
        for achievement in repo.achievements_mut() {
            if state::reset(achievement).any() {
                self.records.insert(achievement.id, UserAchievementProgress::from(&*achievement));
                changed += 1;
            }
        }
        self.finish_bulk(repo, changed)
    }

    fn transition(
        &mut self,
        repo: &mut CatalogRepository,
        id: AchievementId,
        apply: fn(&mut Achievement) -> Changes,
    ) -> Result<Changes, ProgressError> {
        let achievement = repo.achievement_mut(id).ok_or(ProgressError::UnknownAchievement(id))?;
        let changes = apply(achievement);
        if !changes.any() {
            return Ok(changes);
        }

        let snapshot = UserAchievementProgress::from(&*achievement);
        self.records.insert(id, snapshot);
        if changes.is_complete {
            self.recompute(repo);
        }
        self.persist()?;
        Ok(changes)
    }

    fn bulk(
        &mut self,
        repo: &mut CatalogRepository,
        ids: &[AchievementId],
        apply: fn(&mut Achievement) -> Changes,
    ) -> Result<usize, ProgressError> {
        let mut changed = 0;
        for id in ids {
            let Some(achievement) = repo.achievement_mut(*id) else {
                tracing::debug!("Skipping unknown achievement {}", id);
                continue;
            };
            if apply(achievement).any() {
                self.records.insert(*id, UserAchievementProgress::from(&*achievement));
                changed += 1;
            }
        }
        self.finish_bulk(repo, changed)
    }

    /// One write for the whole batch
    fn finish_bulk(&mut self, repo: &CatalogRepository, changed: usize) -> Result<usize, ProgressError> {
        if changed > 0 {
            self.recompute(repo);
            self.persist()?;
        }
        Ok(changed)
    }

    fn persist(&self) -> Result<(), CacheError> {
        self.store.save(CacheKind::UserProgress, &self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Group};
    use tempfile::TempDir;

    fn catalog() -> CatalogRepository {
        let mut repo = CatalogRepository::new();
        let ticket = repo.begin_fetch();
        repo.apply_groups(ticket, vec![Group::new("S", "Story", 1).with_categories([1])]);
        repo.apply_categories(ticket, vec![Category::new(1, "Act I", 0).with_achievements([10, 11, 12])]);
        repo.apply_achievements(
            ticket,
            vec![
                Achievement::new(10, "First").with_tiers([2]),
                Achievement::new(11, "Second").with_tiers([1, 5]),
                Achievement::new(12, "Third").with_tiers([3]),
            ],
            false,
            "",
        );
        repo.apply_achievements(ticket, vec![Achievement::new(20, "Daily").with_tiers([1])], true, "");
        repo.link_groups();
        repo
    }

    fn saved(store: &CacheStore) -> BTreeMap<AchievementId, UserAchievementProgress> {
        store.load(CacheKind::UserProgress).unwrap()
    }

    #[test]
    fn test_increment_persists_every_step() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        let mut repo = catalog();
        let mut overlay = ProgressOverlay::load(store.clone());

        overlay.increment(&mut repo, 10).unwrap();
        assert_eq!(saved(&store)[&10].progress, 1);

        let changes = overlay.increment(&mut repo, 10).unwrap();
        assert!(changes.is_complete);
        assert_eq!(
            saved(&store)[&10],
            UserAchievementProgress {
                is_complete: true,
                progress: 0,
                current_tier: 1
            }
        );
        assert_eq!(overlay.summary().overall.completed, 1);
    }

    #[test]
    fn test_noop_transition_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        let mut repo = catalog();
        let mut overlay = ProgressOverlay::load(store.clone());

        let changes = overlay.decrement(&mut repo, 10).unwrap();
        assert!(!changes.any());
        assert!(!store.exists(CacheKind::UserProgress));
    }

    #[test]
    fn test_unknown_achievement_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut repo = catalog();
        let mut overlay = ProgressOverlay::load(CacheStore::new(dir.path()));
        let err = overlay.increment(&mut repo, 999).unwrap_err();
        assert!(matches!(err, ProgressError::UnknownAchievement(999)));
    }

    #[test]
    fn test_remote_completion_ignores_unknown_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        let mut repo = catalog();
        let mut overlay = ProgressOverlay::load(store.clone());

        let remote = [
            PlayerAchievement { id: 10, done: true },
            PlayerAchievement { id: 11, done: false },
            PlayerAchievement { id: 777, done: true },
        ];
        assert_eq!(overlay.apply_remote_completion(&mut repo, &remote).unwrap(), 1);
        let once = repo.achievements().clone();
        let records_once = overlay.records().clone();

        assert_eq!(overlay.apply_remote_completion(&mut repo, &remote).unwrap(), 0);
        assert_eq!(repo.achievements(), &once);
        assert_eq!(overlay.records(), &records_once);
        assert!(repo.achievement(777).is_none());
        assert!(saved(&store)[&10].is_complete);
    }

    #[test]
    fn test_restore_prefers_saved_detail_over_remote_flag() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        let mut records = BTreeMap::new();
        records.insert(
            11u32,
            UserAchievementProgress {
                is_complete: false,
                progress: 3,
                current_tier: 1,
            },
        );
        store.save(CacheKind::UserProgress, &records).unwrap();

        let mut repo = catalog();
        let mut overlay = ProgressOverlay::load(store.clone());
        let remote = [
            PlayerAchievement { id: 11, done: true },
            PlayerAchievement { id: 12, done: true },
        ];
        overlay.restore(&mut repo, Some(&remote));

        let second = repo.achievement(11).unwrap();
        assert_eq!((second.is_complete, second.progress, second.current_tier), (false, 3, 1));
        assert!(repo.achievement(12).unwrap().is_complete);
        assert_eq!(saved(&store), records, "restore does not write");
    }

    #[test]
    fn test_remote_not_done_keeps_locally_cleared_tiers_complete() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        let mut repo = catalog();
        let mut overlay = ProgressOverlay::load(store.clone());

        overlay.increment(&mut repo, 10).unwrap();
        overlay.increment(&mut repo, 10).unwrap();
        assert!(repo.achievement(10).unwrap().is_complete);

        let remote = [
            PlayerAchievement { id: 10, done: false },
            PlayerAchievement { id: 12, done: true },
        ];
        assert_eq!(overlay.apply_remote_completion(&mut repo, &remote).unwrap(), 1);

        let first = repo.achievement(10).unwrap();
        assert_eq!((first.current_tier, first.is_complete), (1, true));
        assert!(saved(&store)[&10].is_complete);
        assert_eq!(overlay.summary().overall.completed, 2);

        // remote completion at tier 0 can still be withdrawn
        let remote = [PlayerAchievement { id: 12, done: false }];
        assert_eq!(overlay.apply_remote_completion(&mut repo, &remote).unwrap(), 1);
        assert!(!repo.achievement(12).unwrap().is_complete);
    }

    #[test]
    fn test_restore_completes_cleared_and_tierless_records() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        let mut records = BTreeMap::new();
        records.insert(
            10u32,
            UserAchievementProgress {
                is_complete: false,
                progress: 0,
                current_tier: 1,
            },
        );
        store.save(CacheKind::UserProgress, &records).unwrap();

        let mut repo = catalog();
        let ticket = repo.begin_fetch();
        repo.apply_achievements(ticket, vec![Achievement::new(30, "NoTiers")], false, "");
        assert!(repo.achievement(30).unwrap().is_complete);

        let mut overlay = ProgressOverlay::load(store);
        overlay.restore(&mut repo, Some(&[PlayerAchievement { id: 30, done: false }]));

        assert!(repo.achievement(10).unwrap().is_complete);
        assert!(repo.achievement(30).unwrap().is_complete);
        assert_eq!(overlay.summary().overall.completed, 2);
    }

    #[test]
    fn test_corrupt_progress_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        std::fs::write(store.path(CacheKind::UserProgress), "[1,2").unwrap();
        let overlay = ProgressOverlay::load(store);
        assert!(overlay.records().is_empty());
    }

    #[test]
    fn test_mark_all_complete_reaches_full_completion() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        let mut repo = catalog();
        let mut overlay = ProgressOverlay::load(store.clone());

        let ids = [10, 11, 12];
        assert_eq!(overlay.mark_all_complete(&mut repo, &ids).unwrap(), 3);
        for id in ids {
            assert!(repo.achievement(id).unwrap().is_complete);
        }
        let subset = super::super::Completion::of(ids.iter().filter_map(|id| repo.achievement(*id)));
        assert_eq!(subset.percent(), 100.0);
        assert_eq!(overlay.summary().overall.percent(), 100.0);
        assert_eq!(saved(&store).len(), 3);
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        let mut repo = catalog();
        let mut overlay = ProgressOverlay::load(store.clone());

        overlay.mark_all_complete(&mut repo, &[10, 11, 12, 20]).unwrap();
        assert_eq!(overlay.reset_all(&mut repo).unwrap(), 4);
        assert!(repo.achievements().values().all(|a| !a.is_complete && a.current_tier == 0));
        assert!(saved(&store).values().all(|r| !r.is_complete));
        assert_eq!(overlay.summary().overall.completed, 0);
    }

    #[test]
    fn test_daily_summary_uses_visible_ids() {
        let dir = TempDir::new().unwrap();
        let mut repo = catalog();
        let mut overlay = ProgressOverlay::load(CacheStore::new(dir.path()));

        overlay.set_visible_daily(&repo, [20u32, 21].into_iter().collect());
        overlay.mark_complete(&mut repo, 20).unwrap();

        let summary = overlay.summary();
        assert_eq!(summary.daily.completed, 1);
        assert_eq!(summary.daily.total, 2);
        assert_eq!(summary.overall.total, 3, "dailies are excluded from overall");
    }
}
