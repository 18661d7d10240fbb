//! The Pix error taxonomy.

/// Domain-level failures of Pix operations.
///
/// This enum is the base of the taxonomy: matching on `PixError` catches
/// any Pix failure, matching on a variant catches one kind. Transport
/// problems (unreachable service, unexpected status, malformed body) are
/// deliberately absent; see [`crate::TransportError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixError {
    /// The key failed format validation. No request was sent.
    #[error("Invalid Pix key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Pix key not found: {0}")]
    KeyNotFound(String),

    /// The service rejected the transfer. Carries the raw response body.
    #[error("Transfer failed: {0}")]
    TransferFailed(String),
}

impl PixError {
    /// Returns the offending key, for the key-related kinds.
    pub fn key(&self) -> Option<&str> {
        match self {
            PixError::InvalidKeyFormat(key) | PixError::KeyNotFound(key) => Some(key),
            PixError::TransferFailed(_) => None,
        }
    }
}
