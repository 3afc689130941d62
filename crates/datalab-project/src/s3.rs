//! S3 connection profiles.
//!
//! A project carries an ordered list of user-defined S3 connection
//! profiles ([`CustomS3Config`]) plus two independent selections over
//! that list: one for the file explorer and one for credential injection
//! into launched services. Profiles are referenced by position, so the
//! order of [`S3ConfigSet::custom_configs`] is significant.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, IntoStaticStr};
use url::Url;

/// A user-defined S3 connection profile.
///
/// Secrets are part of the persisted value; they are masked in `Debug`
/// output and must never be written to logs directly.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomS3Config {
    /// S3 endpoint URL. Opaque here; see [`validate`](Self::validate).
    pub url: String,

    /// Region sent with requests against this endpoint.
    pub region: String,

    /// Prefix under which the profile operates, in `<prefix>/` form with
    /// no leading slash. Normalized once when the profile is added to a
    /// set; stored as-is afterwards.
    #[serde(default)]
    pub working_directory_path: String,

    /// Access key for authentication.
    pub access_key_id: String,

    /// Secret key for authentication.
    pub secret_access_key: String,

    /// Session token for temporary credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,

    /// Whether to use path-style requests.
    ///
    /// When true, uses URLs like "endpoint/bucket/object".
    /// When false, uses virtual-hosted style like "bucket.endpoint/object".
    #[serde(default)]
    pub path_style_access: bool,
}

impl CustomS3Config {
    /// Creates a new profile with the given endpoint and region.
    pub fn new(url: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            region: region.into(),
            working_directory_path: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            session_token: None,
            path_style_access: false,
        }
    }

    /// Sets the access credentials.
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = access_key_id.into();
        self.secret_access_key = secret_access_key.into();
        self
    }

    /// Sets the session token for temporary credentials.
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }

    /// Sets the working directory prefix.
    pub fn with_working_directory_path(mut self, path: impl Into<String>) -> Self {
        self.working_directory_path = path.into();
        self
    }

    /// Sets whether to use path-style requests.
    pub fn with_path_style_access(mut self, path_style_access: bool) -> Self {
        self.path_style_access = path_style_access;
        self
    }

    /// Returns a masked version of the access key for logging.
    ///
    /// This shows only the first 4 characters followed by asterisks.
    pub fn access_key_id_masked(&self) -> String {
        if self.access_key_id.len() <= 4 {
            "*".repeat(self.access_key_id.len())
        } else {
            format!("{}***", &self.access_key_id[..4])
        }
    }

    /// Checks that the profile is usable for connecting.
    ///
    /// Field contents are not checked when a profile enters a set; this
    /// is for callers that want to reject obviously broken input before
    /// storing it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidS3Config`] when the endpoint does not parse as a
    /// URL with a host, or when either key field is empty.
    pub fn validate(&self) -> Result<(), InvalidS3Config> {
        let url = Url::parse(&self.url).map_err(InvalidS3Config::Endpoint)?;

        if url.host().is_none() {
            return Err(InvalidS3Config::MissingHost);
        }

        if self.access_key_id.is_empty() {
            return Err(InvalidS3Config::EmptyAccessKeyId);
        }

        if self.secret_access_key.is_empty() {
            return Err(InvalidS3Config::EmptySecretAccessKey);
        }

        Ok(())
    }
}

impl fmt::Debug for CustomS3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomS3Config")
            .field("url", &self.url)
            .field("region", &self.region)
            .field("working_directory_path", &self.working_directory_path)
            .field("access_key_id", &self.access_key_id_masked())
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .field("path_style_access", &self.path_style_access)
            .finish()
    }
}

/// Errors produced by [`CustomS3Config::validate`].
#[derive(Debug, thiserror::Error)]
pub enum InvalidS3Config {
    /// The endpoint is not a parseable URL.
    #[error("endpoint is not a valid URL: {0}")]
    Endpoint(url::ParseError),

    /// The endpoint URL has no host component.
    #[error("endpoint URL has no host")]
    MissingHost,

    /// The access key field is empty.
    #[error("access key id cannot be empty")]
    EmptyAccessKeyId,

    /// The secret key field is empty.
    #[error("secret access key cannot be empty")]
    EmptySecretAccessKey,
}

/// The consumers an S3 profile can be selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ConfigUsage {
    /// The file-browsing UI.
    Explorer,
    /// Credential injection into launched services.
    XOnyxia,
}

/// The full S3 configuration value persisted under the `s3` key.
///
/// Profiles are referenced by position. A `None` selection means the
/// platform-provided default configuration is used for that consumer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3ConfigSet {
    /// User-defined profiles, insertion order significant.
    #[serde(default)]
    pub custom_configs: Vec<CustomS3Config>,

    /// Profile selected for the file explorer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_for_explorer: Option<usize>,

    /// Profile selected for service credential injection, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_for_xonyxia: Option<usize>,
}

impl S3ConfigSet {
    /// Returns the selected index for the given consumer.
    pub fn index_for(&self, usage: ConfigUsage) -> Option<usize> {
        match usage {
            ConfigUsage::Explorer => self.index_for_explorer,
            ConfigUsage::XOnyxia => self.index_for_xonyxia,
        }
    }

    /// Sets the selected index for the given consumer.
    pub fn set_index_for(&mut self, usage: ConfigUsage, index: Option<usize>) {
        match usage {
            ConfigUsage::Explorer => self.index_for_explorer = index,
            ConfigUsage::XOnyxia => self.index_for_xonyxia = index,
        }
    }

    /// Resolves the profile selected for the given consumer.
    ///
    /// Returns `None` when the default configuration applies, and also
    /// when the stored index no longer points inside `custom_configs`
    /// (deletions do not re-point later indices, so a stale selection can
    /// end up out of range).
    pub fn config_for(&self, usage: ConfigUsage) -> Option<&CustomS3Config> {
        self.index_for(usage)
            .and_then(|index| self.custom_configs.get(index))
    }
}
