//! Error types for content providers.

use std::time::Duration;
use thiserror::Error;

/// Errors raised by content providers.
///
/// Both variants are recoverable: the caller is expected to fall back to
/// sampling the static catalog rather than surfacing these to the user.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider failed to produce content (network failure, upstream
    /// outage, malformed response, ...)
    #[error("Content provider unavailable: {0}")]
    Unavailable(String),

    /// The provider did not respond within the caller's deadline
    #[error("Content provider timed out after {0:?}")]
    Timeout(Duration),
}

/// Convenience type alias for Results in this crate
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
