//! Case-insensitive name search

use super::{CategoryView, GroupView};
use crate::catalog::CatalogRepository;
use crate::domain::AchievementId;

/// Groups and categories with at least one match.
///
/// An achievement matches on its name; a category whose own name matches
/// brings all of its loaded achievements. A blank query yields nothing.
pub fn search(repo: &CatalogRepository, query: &str) -> Vec<GroupView> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for group in repo.groups_by_order() {
        if group.is_bonus_events() {
            continue;
        }

        let mut categories = Vec::new();
        for category in &group.category_details {
            let category_matches = category.name.to_lowercase().contains(&needle);
            let matches: Vec<AchievementId> = category
                .achievement_ids
                .iter()
                .copied()
                .filter(|id| {
                    repo.achievement(*id)
                        .is_some_and(|a| category_matches || a.name.to_lowercase().contains(&needle))
                })
                .collect();

            if !matches.is_empty() {
                let mut view = CategoryView::from(category);
                view.filtered = Some(matches);
                categories.push(view);
            }
        }

        if !categories.is_empty() {
            results.push(GroupView::from_group(group, categories));
        }
    }

    tracing::debug!("Search '{}' matched {} groups", query, results.len());
    results
}
