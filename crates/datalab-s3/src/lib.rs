#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_MANAGER: &str = "datalab_s3::manager";

pub mod manager;
pub mod path;

#[doc(hidden)]
pub mod prelude;

pub use datalab_project::{ConfigUsage, CustomS3Config, S3ConfigSet, StoreError};

// Re-export for convenience
pub use crate::manager::{AddCustomS3Config, S3ConfigManager};
pub use crate::path::normalize_working_directory_path;

/// Error type for S3 configuration management operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// No profile exists at the given position.
    ///
    /// Raised when an operation is invoked with an index that does not
    /// correspond to an entry in the set. This is a contract violation by
    /// the caller, not a recoverable condition: callers are expected to
    /// only pass indices of entries they just read.
    #[error("no custom S3 config at index {index} (set has {len})")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// Number of profiles in the set at the time of the call.
        len: usize,
    },

    /// The platform default option cannot be switched off.
    ///
    /// Selecting "no profile" while also disabling it is contradictory;
    /// the default option is only ever switched away from by selecting
    /// another profile.
    #[error("the default configuration cannot be disabled, only switched away from")]
    DefaultAlwaysInUse,

    /// The configuration store failed to persist the updated set.
    ///
    /// Propagated verbatim from the store; no retry is attempted here.
    #[error("configuration store error: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    /// Returns whether this error is a caller contract violation.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::IndexOutOfRange { .. } | Error::DefaultAlwaysInUse)
    }

    /// Returns whether this error originated in the configuration store.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}

/// Specialized [`Result`] type for S3 configuration management.
pub type Result<T, E = Error> = std::result::Result<T, E>;
