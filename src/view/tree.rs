//! Full group -> category tree

use std::collections::BTreeSet;

use super::{CategoryView, GroupView};
use crate::catalog::CatalogRepository;
use crate::domain::AchievementId;
use crate::selection::SeasonalSelection;

/// The browsable tree plus the daily ids it exposes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogTree {
    pub groups: Vec<GroupView>,
    /// Achievement ids of every daily category shown
    pub visible_daily_ids: BTreeSet<AchievementId>,
}

/// Groups in display order, minus "Bonus Events", with seasonal daily
/// categories limited to the user's selection. Groups left without
/// categories are omitted.
pub fn project_tree(repo: &CatalogRepository, selection: &SeasonalSelection) -> CatalogTree {
    let mut tree = CatalogTree::default();

    for group in repo.groups_by_order() {
        if group.is_bonus_events() {
            continue;
        }

        let mut categories = Vec::new();
        for category in &group.category_details {
            if repo.is_seasonal_daily(category.id) && !selection.contains(category.id) {
                continue;
            }
            if group.is_daily() {
                tree.visible_daily_ids.extend(category.achievement_ids.iter().copied());
            }
            categories.push(CategoryView::from(category));
        }

        if !categories.is_empty() {
            tree.groups.push(GroupView::from_group(group, categories));
        }
    }

    tree
}
