//! S3 configuration set manager.
//!
//! Every operation follows the same shape: take an owned snapshot of the
//! current set from the store, apply one mutation together with its
//! selection side effects, then write the whole set back under the `s3`
//! key in a single call. The write is the only suspension point; there is
//! no partial application and no retry.

use std::fmt;
use std::sync::Arc;

use datalab_project::{ConfigStore, ConfigUpdate, ConfigUsage, CustomS3Config, S3ConfigSet};

use crate::path::normalize_working_directory_path;
use crate::{Error, Result, TRACING_TARGET_MANAGER};

/// Input for [`S3ConfigManager::add_custom_config`].
#[derive(Debug, Clone)]
pub struct AddCustomS3Config {
    /// The profile to append. Its working directory prefix is normalized
    /// before storage; all other fields are stored as given.
    pub config: CustomS3Config,

    /// Select the new profile for service credential injection.
    pub is_used_for_xonyxia: bool,

    /// Select the new profile for the file explorer.
    pub is_used_for_explorer: bool,
}

/// Manages a project's S3 connection profiles.
///
/// Holds no state besides its store handle; the store owns the durable
/// copy and every operation reads it fresh. Concurrent operations are
/// last-writer-wins (see the crate README), so callers serialize
/// mutations against the same project.
#[derive(Clone)]
pub struct S3ConfigManager {
    store: Arc<dyn ConfigStore>,
}

impl S3ConfigManager {
    /// Creates a new manager over the given configuration store.
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Returns an owned snapshot of the current configuration set.
    pub fn config_set(&self) -> S3ConfigSet {
        self.s3()
    }

    /// Resolves the profile currently selected for the given consumer.
    ///
    /// Returns `None` when the platform default configuration applies,
    /// including the case of a selection left out of range by an earlier
    /// deletion.
    pub fn config_in_use(&self, used_for: ConfigUsage) -> Option<CustomS3Config> {
        self.s3().config_for(used_for).cloned()
    }

    /// Appends a profile to the set.
    ///
    /// The working directory prefix is normalized; the profile is stored
    /// at the end of the list, and either selection is pointed at it when
    /// the corresponding flag is set. Field contents are not validated
    /// here.
    ///
    /// # Errors
    ///
    /// Only store failures surface, as [`Error::Store`].
    pub async fn add_custom_config(&self, params: AddCustomS3Config) -> Result<()> {
        let AddCustomS3Config {
            mut config,
            is_used_for_xonyxia,
            is_used_for_explorer,
        } = params;

        let mut s3 = self.s3();

        config.working_directory_path =
            normalize_working_directory_path(&config.working_directory_path);
        s3.custom_configs.push(config);

        let new_index = s3.custom_configs.len() - 1;

        if is_used_for_xonyxia {
            s3.index_for_xonyxia = Some(new_index);
        }

        if is_used_for_explorer {
            s3.index_for_explorer = Some(new_index);
        }

        self.persist(s3).await?;

        tracing::debug!(
            target: TRACING_TARGET_MANAGER,
            index = new_index,
            used_for_xonyxia = is_used_for_xonyxia,
            used_for_explorer = is_used_for_explorer,
            "Custom S3 config added"
        );

        Ok(())
    }

    /// Removes the profile at the given position.
    ///
    /// A selection pointing at exactly that position is cleared. Entries
    /// after the removed one shift down; a selection greater than the
    /// removed position keeps its stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when no profile exists at
    /// `index`; nothing is written in that case. Store failures surface
    /// as [`Error::Store`].
    pub async fn delete_custom_config(&self, index: usize) -> Result<()> {
        let mut s3 = self.s3();

        let len = s3.custom_configs.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }

        if s3.index_for_explorer == Some(index) {
            s3.index_for_explorer = None;
        }

        if s3.index_for_xonyxia == Some(index) {
            s3.index_for_xonyxia = None;
        }

        s3.custom_configs.remove(index);

        self.persist(s3).await?;

        tracing::debug!(
            target: TRACING_TARGET_MANAGER,
            index = index,
            remaining = len - 1,
            "Custom S3 config deleted"
        );

        Ok(())
    }

    /// Selects a profile — or the platform default — for one consumer.
    ///
    /// With `index = None` the consumer is switched to the platform
    /// default; `is_used` must be true in that case, since the default
    /// option cannot be switched off. With `index = Some(i)`, the
    /// consumer's selection is set to `i` when `is_used` is true and
    /// cleared when false.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DefaultAlwaysInUse`] or
    /// [`Error::IndexOutOfRange`] on contract violations, without
    /// writing. Store failures surface as [`Error::Store`].
    pub async fn set_config_usage(
        &self,
        index: Option<usize>,
        used_for: ConfigUsage,
        is_used: bool,
    ) -> Result<()> {
        let mut s3 = self.s3();

        match index {
            None => {
                if !is_used {
                    return Err(Error::DefaultAlwaysInUse);
                }

                s3.set_index_for(used_for, None);
            }
            Some(index) => {
                let len = s3.custom_configs.len();
                if index >= len {
                    return Err(Error::IndexOutOfRange { index, len });
                }

                s3.set_index_for(used_for, is_used.then_some(index));
            }
        }

        self.persist(s3).await?;

        tracing::debug!(
            target: TRACING_TARGET_MANAGER,
            used_for = used_for.as_ref(),
            index = ?index,
            is_used = is_used,
            "S3 config usage updated"
        );

        Ok(())
    }

    fn s3(&self) -> S3ConfigSet {
        self.store.snapshot().s3
    }

    async fn persist(&self, s3: S3ConfigSet) -> Result<()> {
        self.store.update(ConfigUpdate::S3(s3)).await?;
        Ok(())
    }
}

impl fmt::Debug for S3ConfigManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3ConfigManager").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datalab_project::StoreError;
    use datalab_test::MockConfigStore;

    fn profile(url: &str) -> CustomS3Config {
        CustomS3Config::new(url, "us-east-1").with_credentials("AKIATEST12345", "secret")
    }

    fn seeded(set: S3ConfigSet) -> (Arc<MockConfigStore>, S3ConfigManager) {
        let store = Arc::new(MockConfigStore::with_s3(set));
        let manager = S3ConfigManager::new(store.clone());
        (store, manager)
    }

    fn three_profiles() -> S3ConfigSet {
        S3ConfigSet {
            custom_configs: vec![
                profile("https://a.example"),
                profile("https://b.example"),
                profile("https://c.example"),
            ],
            index_for_explorer: Some(1),
            index_for_xonyxia: Some(2),
        }
    }

    #[tokio::test]
    async fn test_add_appends_and_normalizes() {
        let (store, manager) = seeded(S3ConfigSet {
            custom_configs: vec![profile("https://a.example")],
            ..Default::default()
        });

        manager
            .add_custom_config(AddCustomS3Config {
                config: profile("https://b.example")
                    .with_working_directory_path("  //foo/bar "),
                is_used_for_xonyxia: false,
                is_used_for_explorer: false,
            })
            .await
            .unwrap();

        let s3 = store.current().s3;
        assert_eq!(s3.custom_configs.len(), 2);
        assert_eq!(s3.custom_configs[1].url, "https://b.example");
        assert_eq!(s3.custom_configs[1].working_directory_path, "foo/bar/");
        // No selection was requested, so none changed.
        assert!(s3.index_for_explorer.is_none());
        assert!(s3.index_for_xonyxia.is_none());
    }

    #[tokio::test]
    async fn test_add_selects_new_index_when_flagged() {
        let (store, manager) = seeded(S3ConfigSet {
            custom_configs: vec![profile("https://a.example"), profile("https://b.example")],
            index_for_explorer: Some(0),
            index_for_xonyxia: None,
        });

        manager
            .add_custom_config(AddCustomS3Config {
                config: profile("https://c.example"),
                is_used_for_xonyxia: true,
                is_used_for_explorer: true,
            })
            .await
            .unwrap();

        let s3 = store.current().s3;
        assert_eq!(s3.custom_configs.len(), 3);
        assert_eq!(s3.index_for_explorer, Some(2));
        assert_eq!(s3.index_for_xonyxia, Some(2));
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let (store, manager) = seeded(three_profiles());

        manager.delete_custom_config(0).await.unwrap();

        let s3 = store.current().s3;
        assert_eq!(s3.custom_configs.len(), 2);
        assert_eq!(s3.custom_configs[0].url, "https://b.example");
        assert_eq!(s3.custom_configs[1].url, "https://c.example");
    }

    #[tokio::test]
    async fn test_delete_clears_matching_selection_only() {
        let (store, manager) = seeded(three_profiles());

        // explorer points at 1, xonyxia at 2; deleting 1 clears only explorer.
        manager.delete_custom_config(1).await.unwrap();

        let s3 = store.current().s3;
        assert_eq!(s3.custom_configs.len(), 2);
        assert!(s3.index_for_explorer.is_none());
        assert_eq!(s3.index_for_xonyxia, Some(2));
    }

    #[tokio::test]
    async fn test_delete_keeps_greater_selection_value() {
        // Pins the positional-selection shift behavior: after deleting
        // index 1, the stored xonyxia selection still reads 2 even though
        // only indices 0..=1 remain. Readers resolve it as "default".
        let (store, manager) = seeded(three_profiles());

        manager.delete_custom_config(1).await.unwrap();

        let s3 = store.current().s3;
        assert_eq!(s3.index_for_xonyxia, Some(2));
        assert!(s3.config_for(ConfigUsage::XOnyxia).is_none());
        assert!(manager.config_in_use(ConfigUsage::XOnyxia).is_none());
    }

    #[tokio::test]
    async fn test_delete_out_of_range_fails_without_writing() {
        let (store, manager) = seeded(three_profiles());

        let result = manager.delete_custom_config(3).await;
        assert!(matches!(
            result,
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(result.unwrap_err().is_invariant_violation());

        assert_eq!(store.current().s3, three_profiles());
    }

    #[tokio::test]
    async fn test_set_usage_selects_and_clears() {
        let (store, manager) = seeded(S3ConfigSet {
            custom_configs: three_profiles().custom_configs,
            ..Default::default()
        });

        manager
            .set_config_usage(Some(2), ConfigUsage::XOnyxia, true)
            .await
            .unwrap();
        assert_eq!(store.current().s3.index_for_xonyxia, Some(2));

        manager
            .set_config_usage(Some(2), ConfigUsage::XOnyxia, false)
            .await
            .unwrap();
        assert!(store.current().s3.index_for_xonyxia.is_none());
    }

    #[tokio::test]
    async fn test_set_usage_default_clears_selection() {
        let (store, manager) = seeded(three_profiles());

        manager
            .set_config_usage(None, ConfigUsage::Explorer, true)
            .await
            .unwrap();

        let s3 = store.current().s3;
        assert!(s3.index_for_explorer.is_none());
        assert_eq!(s3.index_for_xonyxia, Some(2));
    }

    #[tokio::test]
    async fn test_set_usage_cannot_disable_default() {
        let (store, manager) = seeded(three_profiles());

        let result = manager
            .set_config_usage(None, ConfigUsage::Explorer, false)
            .await;
        assert!(matches!(result, Err(Error::DefaultAlwaysInUse)));

        assert_eq!(store.current().s3, three_profiles());
    }

    #[tokio::test]
    async fn test_set_usage_out_of_range_fails_without_writing() {
        let (store, manager) = seeded(three_profiles());

        let result = manager
            .set_config_usage(Some(7), ConfigUsage::XOnyxia, true)
            .await;
        assert!(matches!(
            result,
            Err(Error::IndexOutOfRange { index: 7, len: 3 })
        ));

        assert_eq!(store.current().s3, three_profiles());
    }

    #[tokio::test]
    async fn test_store_failure_propagates_verbatim() {
        let (store, manager) = seeded(three_profiles());
        store.fail_writes_with(StoreError::unavailable("backend offline"));

        let result = manager.delete_custom_config(0).await;
        match result {
            Err(Error::Store(StoreError::Unavailable(msg))) => {
                assert_eq!(msg, "backend offline");
            }
            other => panic!("expected store error, got {other:?}"),
        }

        // The failed write left the stored set untouched.
        assert_eq!(store.current().s3, three_profiles());
    }

    #[tokio::test]
    async fn test_config_in_use_resolves_selection() {
        let (_store, manager) = seeded(three_profiles());

        assert_eq!(
            manager
                .config_in_use(ConfigUsage::Explorer)
                .map(|c| c.url),
            Some("https://b.example".to_string())
        );

        manager
            .set_config_usage(None, ConfigUsage::Explorer, true)
            .await
            .unwrap();
        assert!(manager.config_in_use(ConfigUsage::Explorer).is_none());
    }
}
