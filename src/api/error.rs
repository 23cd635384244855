use crate::error::ErrorKind;

/// Failure of a single API request.
///
/// URLs are stored with the access token redacted.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned HTTP {code}")]
    Status { url: String, code: u16 },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Request task failed: {0}")]
    Task(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Decode { .. } => ErrorKind::Decode,
            _ => ErrorKind::Transport,
        }
    }
}
