//! Core domain types for the achievement catalog and player progress

mod achievement;
mod api_key;
mod category;
mod group;
mod player;

pub use achievement::{Achievement, AchievementId, Tier};
pub use api_key::ApiKey;
pub use category::{Category, CategoryId};
pub use group::{Group, GroupId, BONUS_EVENTS_GROUP, DAILY_GROUP};
pub use player::{PlayerAchievement, UserAchievementProgress};
