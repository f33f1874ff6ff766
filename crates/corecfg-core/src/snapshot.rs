//! Snapshot reads of option sets
//!
//! [`SnapshotReader`] fetches the current option set of a key together with
//! the version it was read at. The version is what the conditional write is
//! later pinned to.

use crate::config::OptionsConfig;
use crate::context::Context;
use crate::error::OptionsError;
use crate::option_set::OptionSet;
use corecfg_store::{StoreError, Version, VersionedStore};
use std::sync::Arc;

/// Reads `(OptionSet, Version)` pairs from a versioned store
#[derive(Clone)]
pub struct SnapshotReader {
    store: Arc<dyn VersionedStore>,
    config: OptionsConfig,
}

impl SnapshotReader {
    /// Create reader over `store`
    pub fn new(store: Arc<dyn VersionedStore>, config: OptionsConfig) -> Self {
        Self { store, config }
    }

    /// Store path for `key`
    #[inline]
    #[must_use]
    pub fn path_for(&self, key: &str) -> String {
        self.config.path_for(key)
    }

    /// Read the option set stored for `key`
    ///
    /// Performs exactly one store read. A key that was never written reads as
    /// an empty set at [`Version::ABSENT`].
    ///
    /// # Errors
    /// - `Cancelled` / `DeadlineExceeded` if `ctx` finishes first
    /// - `StorageRead` if the store fails or holds bytes that are not an
    ///   option set
    pub async fn read(&self, ctx: &Context, key: &str) -> Result<(OptionSet, Version), OptionsError> {
        let path = self.path_for(key);
        let ctx = match self.config.read_timeout() {
            Some(timeout) => ctx.clone().with_timeout(timeout),
            None => ctx.clone(),
        };

        let entry = match ctx.run(self.store.get(&path)).await {
            Ok(result) => result?,
            Err(interrupted) => {
                tracing::warn!("Read of {} interrupted: {}", path, interrupted);
                return Err(interrupted.into());
            }
        };

        let set = match entry.value {
            None => OptionSet::new(),
            Some(bytes) => OptionSet::from_bytes(&bytes)
                .map_err(|e| StoreError::corrupt(path.as_str(), e.to_string()))?,
        };

        tracing::debug!("Read {} record(s) from {} at {}", set.len(), path, entry.version);
        Ok((set, entry.version))
    }
}

impl std::fmt::Debug for SnapshotReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotReader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
