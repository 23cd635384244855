use super::CacheKind;
use crate::error::ErrorKind;

/// Error type for cache document I/O
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("No {0} cache on disk")]
    NotFound(CacheKind),

    #[error("Failed to decode {kind} cache: {source}")]
    Decode {
        kind: CacheKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode {kind} cache: {source}")]
    Encode {
        kind: CacheKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {kind} cache: {source}")]
    Io {
        kind: CacheKind,
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CacheError::NotFound(_) => ErrorKind::NotFound,
            CacheError::Decode { .. } | CacheError::Encode { .. } => ErrorKind::Decode,
            CacheError::Io { .. } => ErrorKind::Transport,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }
}
