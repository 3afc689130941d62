//! Configuration store boundary.

use crate::error::StoreResult;
use crate::project::{ConfigUpdate, ProjectConfigs};

/// Read and persist project-level configuration.
///
/// Implementations own the durable copy of [`ProjectConfigs`]. Consumers
/// follow a read-modify-write pattern: take an owned snapshot, mutate it
/// in memory, then replace the stored value under one key with a single
/// [`update`] call.
///
/// There is no mutual exclusion between concurrently running
/// read-modify-write sequences; the last write wins. Callers are expected
/// to serialize mutations against the same project.
///
/// [`update`]: ConfigStore::update
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    /// Returns an owned, independent snapshot of the current project
    /// configuration. Mutating the returned value has no effect on the
    /// stored copy.
    fn snapshot(&self) -> ProjectConfigs;

    /// Replaces one stored configuration value wholesale.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend rejects or cannot
    /// complete the write. An in-flight write cannot be aborted.
    ///
    /// [`StoreError`]: crate::StoreError
    async fn update(&self, update: ConfigUpdate) -> StoreResult<()>;
}
