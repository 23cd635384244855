//! Error taxonomy shared by the I/O boundaries

/// Coarse classification used by call sites to pick a fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Document absent; expected on first run
    NotFound,
    /// Corrupt or incompatible payload
    Decode,
    /// Network, HTTP or filesystem failure
    Transport,
}
