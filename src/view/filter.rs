//! Achievement lists for a selected category

use super::CategoryView;
use crate::catalog::CatalogRepository;
use crate::domain::Achievement;

/// The achievements a category view displays, in category order.
///
/// Ids not loaded yet are skipped.
pub fn category_achievements<'a>(repo: &'a CatalogRepository, view: &CategoryView) -> Vec<&'a Achievement> {
    view.displayed_ids()
        .iter()
        .filter_map(|id| repo.achievement(*id))
        .collect()
}

/// Sort by name and optionally drop completed achievements
pub fn hide_completed<'a>(achievements: &[&'a Achievement], hide: bool) -> Vec<&'a Achievement> {
    let mut list: Vec<&Achievement> = achievements
        .iter()
        .copied()
        .filter(|a| !(hide && a.is_complete))
        .collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));
    list
}
