use std::fmt;

use crate::catalog::HydrationSource;

/// Catalog loading state as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationStatus {
    Idle,
    Loading,
    Loaded(HydrationSource),
    Failed(String),
}

impl HydrationStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl fmt::Display for HydrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Loaded(source) => write!(f, "loaded from {}", source),
            Self::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}
