//! Prelude module for convenient imports.

pub use crate::error::{StoreError, StoreResult};
pub use crate::project::{ConfigUpdate, ProjectConfigs};
pub use crate::s3::{ConfigUsage, CustomS3Config, InvalidS3Config, S3ConfigSet};
pub use crate::store::ConfigStore;
