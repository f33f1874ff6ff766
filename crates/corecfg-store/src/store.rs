//! Versioned store contract
//!
//! The replicated store itself lives outside this workspace; callers reach it
//! through [`VersionedStore`].

use crate::op::Op;
use crate::version::Version;

/// Value read from the store together with the version it was read at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreEntry {
    /// Stored bytes, `None` if the path has never been written
    pub value: Option<Vec<u8>>,

    /// Version of the path at read time
    pub version: Version,
}

impl StoreEntry {
    /// Entry for a path that has never been written
    #[inline]
    #[must_use]
    pub fn absent() -> Self {
        Self {
            value: None,
            version: Version::ABSENT,
        }
    }

    /// Entry holding `value` at `version`
    #[inline]
    #[must_use]
    pub fn present(value: Vec<u8>, version: Version) -> Self {
        Self {
            value: Some(value),
            version,
        }
    }

    /// Check if the path has never been written
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }
}

/// Versioned key-value store with atomic conditional writes
///
/// # Contract
/// - `get` performs a single read and reports the version observed
/// - `exec` checks every condition of the op and applies every mutation as
///   one atomic step, or applies nothing
#[async_trait::async_trait]
pub trait VersionedStore: Send + Sync {
    /// Read the value stored at `path`
    async fn get(&self, path: &str) -> Result<StoreEntry, StoreError>;

    /// Atomically execute a conditional write
    ///
    /// # Returns
    /// Version assigned to the commit
    ///
    /// # Errors
    /// - `StoreError::Conflict` if a condition does not hold
    async fn exec(&self, op: Op) -> Result<Version, StoreError>;
}

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Condition failed at commit time (optimistic concurrency failure)
    #[error("conflict on {path}: expected {expected}, found {actual}")]
    Conflict {
        /// Path whose condition failed
        path: String,
        /// Version the op was built against
        expected: Version,
        /// Version found at commit
        actual: Version,
    },

    /// Store could not be reached or refused the request
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Stored bytes do not have the expected format
    #[error("corrupt record at {path}: {reason}")]
    Corrupt {
        /// Path holding the bad value
        path: String,
        /// What failed to decode
        reason: String,
    },
}

impl StoreError {
    /// Check if error is a version conflict
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Create corrupt record error
    #[inline]
    pub fn corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_entry_absent() {
        let entry = StoreEntry::absent();
        assert!(entry.is_absent());
        assert_eq!(entry.version, Version::ABSENT);
        assert_eq!(entry, StoreEntry::default());
    }

    #[test]
    fn store_entry_present() {
        let entry = StoreEntry::present(b"x".to_vec(), Version::new(2));
        assert!(!entry.is_absent());
        assert_eq!(entry.version.index(), 2);
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::Conflict {
            path: "/core/config/trusted_host".to_string(),
            expected: Version::new(5),
            actual: Version::new(6),
        };
        assert_eq!(
            err.to_string(),
            "conflict on /core/config/trusted_host: expected v5, found v6"
        );
        assert!(err.is_conflict());
        assert!(!StoreError::Unavailable("down".into()).is_conflict());
    }
}
