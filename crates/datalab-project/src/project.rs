//! Project configuration snapshot and keyed updates.

use serde::{Deserialize, Serialize};

use crate::s3::S3ConfigSet;

/// Per-project configuration snapshot.
///
/// Each field corresponds to one key in the backing store. Values are
/// replaced wholesale, one key at a time, via [`ConfigUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfigs {
    /// S3 connection profiles and their usage selection.
    #[serde(default)]
    pub s3: S3ConfigSet,

    /// Password injected into services launched within the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_password: Option<String>,
}

impl ProjectConfigs {
    /// Applies a keyed update to this snapshot.
    pub fn apply(&mut self, update: ConfigUpdate) {
        match update {
            ConfigUpdate::S3(value) => self.s3 = value,
            ConfigUpdate::ServicePassword(value) => self.service_password = value,
        }
    }
}

/// A wholesale replacement of one project configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ConfigUpdate {
    /// Replaces the S3 connection profile set.
    S3(S3ConfigSet),
    /// Replaces the service password.
    ServicePassword(Option<String>),
}

impl ConfigUpdate {
    /// Returns the store key this update replaces.
    pub fn key(&self) -> &'static str {
        match self {
            Self::S3(_) => "s3",
            Self::ServicePassword(_) => "service_password",
        }
    }
}
