//! Mock configuration store for testing.

use std::sync::Mutex;

use datalab_project::{
    ConfigStore, ConfigUpdate, ProjectConfigs, S3ConfigSet, StoreError, StoreResult,
};

/// In-memory [`ConfigStore`] for tests.
///
/// Keeps a single [`ProjectConfigs`] behind a mutex. Snapshots are
/// clones, so a caller mutating its snapshot never touches the stored
/// copy until it writes back. Writes can be made to fail with an
/// injected [`StoreError`] to exercise error propagation.
#[derive(Debug, Default)]
pub struct MockConfigStore {
    configs: Mutex<ProjectConfigs>,
    failure: Mutex<Option<StoreError>>,
}

impl MockConfigStore {
    /// Creates an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock store seeded with the given snapshot.
    pub fn with_configs(configs: ProjectConfigs) -> Self {
        Self {
            configs: Mutex::new(configs),
            failure: Mutex::new(None),
        }
    }

    /// Creates a mock store seeded with the given S3 configuration set.
    pub fn with_s3(s3: S3ConfigSet) -> Self {
        Self::with_configs(ProjectConfigs {
            s3,
            ..Default::default()
        })
    }

    /// Makes every subsequent write fail with the given error.
    pub fn fail_writes_with(&self, error: StoreError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Restores normal write behavior.
    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Returns the currently stored snapshot, for assertions.
    pub fn current(&self) -> ProjectConfigs {
        self.configs.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ConfigStore for MockConfigStore {
    fn snapshot(&self) -> ProjectConfigs {
        self.configs.lock().unwrap().clone()
    }

    async fn update(&self, update: ConfigUpdate) -> StoreResult<()> {
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }

        self.configs.lock().unwrap().apply(update);
        Ok(())
    }
}
