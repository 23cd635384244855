use serde::{Deserialize, Serialize};

pub type AchievementId = u32;

/// One milestone of an achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Objective count required to clear this tier
    pub count: u32,
}

/// A single achievement with its locally tracked progress.
///
/// The catalog fields come from the API; `progress`, `current_tier`,
/// `is_complete` and `is_daily` are local and default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub requirement: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub tiers: Vec<Tier>,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub current_tier: usize,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub is_daily: bool,
}

impl Achievement {
    pub fn new(id: AchievementId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            requirement: String::new(),
            description: String::new(),
            icon: String::new(),
            tiers: Vec::new(),
            progress: 0,
            current_tier: 0,
            is_complete: false,
            is_daily: false,
        }
    }

    pub fn with_tiers(mut self, counts: impl IntoIterator<Item = u32>) -> Self {
        self.tiers = counts.into_iter().map(|count| Tier { count }).collect();
        self
    }

    /// The tier currently being worked on, if any remain
    pub fn active_tier(&self) -> Option<&Tier> {
        self.tiers.get(self.current_tier)
    }

    pub fn all_tiers_cleared(&self) -> bool {
        self.current_tier >= self.tiers.len()
    }

    /// Set `is_complete` when every tier is cleared (trivially so with no
    /// tiers). Returns whether the flag changed.
    pub fn settle_completion(&mut self) -> bool {
        if self.all_tiers_cleared() && !self.is_complete {
            self.is_complete = true;
            true
        } else {
            false
        }
    }

    /// Human-readable progress line, e.g. `Tier 2: Objectives 3/10`
    pub fn progress_display(&self) -> String {
        match self.active_tier() {
            Some(tier) if !self.is_complete => format!(
                "Tier {}: Objectives {}/{}",
                self.current_tier + 1,
                self.progress,
                tier.count
            ),
            _ => "Completed".to_string(),
        }
    }
}
