//! Player progress on top of the catalog
//!
//! - [`state`]: per-achievement transitions
//! - [`ProgressOverlay`]: merges remote and saved state, persists every change
//! - [`ProgressSummary`]: overall and daily percentages

mod overlay;
pub mod state;
mod stats;

pub use overlay::{ProgressError, ProgressOverlay};
pub use state::{Changes, Phase};
pub use stats::{Completion, ProgressSummary};
