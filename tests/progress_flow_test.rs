//! Progress, search and seasonal selection through the tracker

mod common;

use std::sync::Arc;

use achtrack::ApiKey;
use achtrack::progress::Phase;
use achtrack::progress::state::phase;

use common::{FixtureApi, create_data_dir, start_tracker};

#[tokio::test]
async fn test_search_returns_only_matching_achievement() {
    let dir = create_data_dir();
    let tracker = start_tracker(&dir, Arc::new(FixtureApi::standard())).await;

    let results = tracker.search("cake");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].categories.len(), 1);

    let festival = &results[0].categories[0];
    assert_eq!(festival.name, "Festival");
    let names: Vec<&str> = festival
        .displayed_ids()
        .iter()
        .filter_map(|id| tracker.catalog().achievement(*id))
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["Eat Cake"]);
}

#[tokio::test]
async fn test_search_skips_bonus_events_and_blank_shows_tree() {
    let dir = create_data_dir();
    let tracker = start_tracker(&dir, Arc::new(FixtureApi::standard())).await;

    assert!(tracker.search("bonus chest").is_empty());
    assert_eq!(tracker.search("   "), tracker.tree().groups);
}

#[tokio::test]
async fn test_seasonal_pool_is_order_zero_and_one() {
    let dir = create_data_dir();
    let tracker = start_tracker(&dir, Arc::new(FixtureApi::standard())).await;

    let pool: Vec<u32> = tracker.seasonal_pool().iter().map(|c| c.id).collect();
    assert_eq!(pool, vec![1, 2]);

    let daily = &tracker.tree().groups[0];
    assert_eq!(daily.name, "Daily");
    let shown: Vec<u32> = daily.categories.iter().map(|c| c.id).collect();
    assert_eq!(shown, vec![3, 4]);
    assert_eq!(tracker.summary().daily.total, 3);
}

#[tokio::test]
async fn test_selection_persists_and_counts_toward_daily() {
    let dir = create_data_dir();
    let mut tracker = start_tracker(&dir, Arc::new(FixtureApi::standard())).await;

    let rejected = tracker.select_seasonal_dailies([2, 3]).unwrap();
    assert_eq!(rejected, vec![3]);
    assert_eq!(tracker.summary().daily.total, 4);

    tracker.mark_complete(&[101, 102]).unwrap();
    assert_eq!(tracker.summary().daily.completed, 2);

    let reopened = start_tracker(&dir, Arc::new(FixtureApi::standard())).await;
    let shown: Vec<u32> = reopened.tree().groups[0].categories.iter().map(|c| c.id).collect();
    assert_eq!(shown, vec![2, 3, 4]);
    assert_eq!(reopened.summary().daily.completed, 2);
}

#[tokio::test]
async fn test_bulk_mark_complete_reaches_full_overall() {
    let dir = create_data_dir();
    let mut tracker = start_tracker(&dir, Arc::new(FixtureApi::standard())).await;

    let non_daily: Vec<u32> = tracker
        .catalog()
        .achievements()
        .values()
        .filter(|a| !a.is_daily)
        .map(|a| a.id)
        .collect();
    assert_eq!(non_daily.len(), 6);

    let changed = tracker.mark_complete(&non_daily).unwrap();
    assert_eq!(changed, 6);
    assert_eq!(tracker.summary().overall.percent(), 100.0);
    for id in &non_daily {
        assert_eq!(phase(tracker.catalog().achievement(*id).unwrap()), Phase::Complete);
    }
}

#[tokio::test]
async fn test_remote_completion_is_idempotent() {
    let dir = create_data_dir();
    let api = Arc::new(FixtureApi::standard().with_account(vec![(111, true), (112, false), (9999, true)]));
    let mut tracker = start_tracker(&dir, api).await;

    let key = ApiKey::parse("ABCD-1234").unwrap();
    assert_eq!(tracker.set_api_key(key.clone()).await.unwrap(), 1);
    let once = tracker.catalog().achievements().clone();

    assert_eq!(tracker.set_api_key(key).await.unwrap(), 0);
    assert_eq!(tracker.catalog().achievements(), &once);
    assert!(once[&111].is_complete);
    assert!(!once[&112].is_complete);
}

#[tokio::test]
async fn test_local_tier_progress_wins_over_remote_on_restart() {
    let dir = create_data_dir();
    let api = Arc::new(FixtureApi::standard().with_account(vec![(112, true)]));

    let mut tracker = start_tracker(&dir, api.clone()).await;
    tracker.set_api_key(ApiKey::parse("KEY").unwrap()).await.unwrap();
    tracker.decrement(112).unwrap();
    tracker.reset(&[112]).unwrap();
    for _ in 0..5 {
        tracker.increment(112).unwrap();
    }

    let reopened = start_tracker(&dir, api).await;
    let first_steps = reopened.catalog().achievement(112).unwrap();
    assert!(!first_steps.is_complete);
    assert_eq!((first_steps.current_tier, first_steps.progress), (1, 1));
}

#[tokio::test]
async fn test_progress_survives_refresh() {
    let dir = create_data_dir();
    let mut tracker = start_tracker(&dir, Arc::new(FixtureApi::standard())).await;

    for _ in 0..3 {
        tracker.increment(110).unwrap();
    }
    tracker.mark_complete(&[201]).unwrap();

    tracker.refresh().await;

    let awakening = tracker.catalog().achievement(110).unwrap();
    assert_eq!((awakening.current_tier, awakening.progress), (1, 1));
    assert!(tracker.catalog().achievement(201).unwrap().is_complete);
}

#[tokio::test]
async fn test_decrement_never_rolls_back_a_tier() {
    let dir = create_data_dir();
    let mut tracker = start_tracker(&dir, Arc::new(FixtureApi::standard())).await;

    tracker.increment(110).unwrap();
    tracker.increment(110).unwrap();
    let changes = tracker.decrement(110).unwrap();
    assert!(!changes.any());

    let awakening = tracker.catalog().achievement(110).unwrap();
    assert_eq!((awakening.current_tier, awakening.progress), (1, 0));
}

#[tokio::test]
async fn test_remove_key_with_reset_clears_everything() {
    let dir = create_data_dir();
    let api = Arc::new(FixtureApi::standard().with_account(vec![(110, true), (111, true)]));
    let mut tracker = start_tracker(&dir, api).await;
    tracker.set_api_key(ApiKey::parse("KEY").unwrap()).await.unwrap();
    tracker.increment(112).unwrap();

    assert_eq!(tracker.remove_api_key(true).unwrap(), 3);
    assert!(!tracker.has_api_key());
    assert_eq!(tracker.summary().overall.completed, 0);
}
