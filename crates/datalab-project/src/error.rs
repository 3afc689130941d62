//! Configuration store error types.

/// Result type for configuration store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting project configuration.
///
/// These originate in whatever backend implements [`ConfigStore`]; the
/// crates operating on configuration values propagate them verbatim and
/// never retry on their own.
///
/// [`ConfigStore`]: crate::ConfigStore
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected the write.
    #[error("write rejected: {0}")]
    WriteRejected(String),

    /// The configuration value could not be encoded for persistence.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Creates a new write rejection error.
    pub fn write_rejected(msg: impl Into<String>) -> Self {
        Self::WriteRejected(msg.into())
    }

    /// Creates a new serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a new unavailability error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Returns whether the write may succeed if repeated later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
