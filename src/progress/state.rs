//! Tiered progress state machine
//!
//! ```text
//! NotStarted --increment--> InProgress --(progress == tier count)--> next tier
//!                                                 |
//!                                                 +--(last tier)--> Complete
//! ```
//!
//! Every transition returns the fields it changed; an empty [`Changes`]
//! means the call was a no-op at its boundary.
//!
//! Decrement only lowers progress inside the recorded tier. A cleared tier
//! is never rolled back by decrement, only by [`reset`].

use crate::domain::Achievement;

/// Fields touched by a transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub progress: bool,
    pub current_tier: bool,
    pub is_complete: bool,
}

impl Changes {
    pub fn any(&self) -> bool {
        self.progress || self.current_tier || self.is_complete
    }
}

/// Observable state of an achievement.
///
/// "Tier cleared" is never observed: reaching a tier's count advances
/// immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress { tier: usize, progress: u32 },
    Complete,
}

pub fn phase(achievement: &Achievement) -> Phase {
    if achievement.is_complete || achievement.all_tiers_cleared() {
        Phase::Complete
    } else if achievement.current_tier == 0 && achievement.progress == 0 {
        Phase::NotStarted
    } else {
        Phase::InProgress {
            tier: achievement.current_tier,
            progress: achievement.progress,
        }
    }
}

/// Add one objective; clearing the tier advances to the next with progress 0
pub fn increment(achievement: &mut Achievement) -> Changes {
    let mut changes = Changes::default();
    if achievement.is_complete {
        return changes;
    }
    let Some(count) = achievement.active_tier().map(|t| t.count) else {
        return changes;
    };

    if achievement.progress < count {
        achievement.progress += 1;
        changes.progress = true;
    }

    if achievement.progress >= count {
        achievement.current_tier += 1;
        changes.current_tier = true;
        if achievement.progress != 0 {
            achievement.progress = 0;
            changes.progress = true;
        }
        if achievement.all_tiers_cleared() {
            achievement.is_complete = true;
            changes.is_complete = true;
        }
    }

    changes
}

/// Remove one objective within the current tier; clears completion
pub fn decrement(achievement: &mut Achievement) -> Changes {
    let mut changes = Changes::default();
    if achievement.progress == 0 {
        return changes;
    }

    achievement.progress -= 1;
    changes.progress = true;

    if achievement.is_complete && !achievement.all_tiers_cleared() {
        achievement.is_complete = false;
        changes.is_complete = true;
    }
    changes
}

/// Jump past the last tier
pub fn mark_complete(achievement: &mut Achievement) -> Changes {
    let mut changes = Changes::default();
    let last = achievement.tiers.len();

    if achievement.current_tier != last {
        achievement.current_tier = last;
        changes.current_tier = true;
    }
    if achievement.progress != 0 {
        achievement.progress = 0;
        changes.progress = true;
    }
    if !achievement.is_complete {
        achievement.is_complete = true;
        changes.is_complete = true;
    }
    changes
}

/// Back to tier 0 with no progress. An achievement without tiers stays
/// complete.
pub fn reset(achievement: &mut Achievement) -> Changes {
    let mut changes = Changes::default();

    if achievement.progress != 0 {
        achievement.progress = 0;
        changes.progress = true;
    }
    if achievement.current_tier != 0 {
        achievement.current_tier = 0;
        changes.current_tier = true;
    }
    if achievement.is_complete && !achievement.tiers.is_empty() {
        achievement.is_complete = false;
        changes.is_complete = true;
    }
    if achievement.settle_completion() {
        changes.is_complete = true;
    }
    changes
}
