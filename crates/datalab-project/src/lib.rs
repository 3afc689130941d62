#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod project;
mod s3;
mod store;

#[doc(hidden)]
pub mod prelude;

pub use error::{StoreError, StoreResult};
pub use project::{ConfigUpdate, ProjectConfigs};
pub use s3::{ConfigUsage, CustomS3Config, InvalidS3Config, S3ConfigSet};
pub use store::ConfigStore;
