//! Prelude module for convenient imports.

pub use datalab_project::{ConfigUsage, CustomS3Config, S3ConfigSet};

pub use crate::manager::{AddCustomS3Config, S3ConfigManager};
pub use crate::path::normalize_working_directory_path;
pub use crate::{Error, Result};
