//! Aggregate completion percentages

use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::CatalogRepository;
use crate::domain::{Achievement, AchievementId};

/// Completed out of total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completion {
    pub completed: usize,
    pub total: usize,
}

impl Completion {
    pub fn of<'a>(achievements: impl IntoIterator<Item = &'a Achievement>) -> Self {
        let mut completion = Self::default();
        for achievement in achievements {
            completion.total += 1;
            if achievement.is_complete {
                completion.completed += 1;
            }
        }
        completion
    }

    /// Percentage in `0.0..=100.0`; an empty set counts as 0%
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}% ({}/{})", self.percent(), self.completed, self.total)
    }
}

/// Overall and daily progress bars
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    /// All non-daily achievements
    pub overall: Completion,
    /// Daily achievements currently visible in the tree
    pub daily: Completion,
}

impl ProgressSummary {
    pub fn compute(repo: &CatalogRepository, visible_daily: &BTreeSet<AchievementId>) -> Self {
        let overall = Completion::of(repo.achievements().values().filter(|a| !a.is_daily));
        let daily = Completion::of(visible_daily.iter().filter_map(|id| repo.achievement(*id)));

        // Ids without a loaded achievement still count against the daily total
        let daily = Completion {
            completed: daily.completed,
            total: visible_daily.len(),
        };

        Self { overall, daily }
    }
}
