//! In-process versioned store
//!
//! [`MemoryStore`] implements [`VersionedStore`] over a mutex-guarded map. It
//! has the same commit semantics as the replicated store: one commit index
//! per successful op, all-or-nothing application.

use crate::op::{Condition, Mutation, Op};
use crate::store::{StoreEntry, StoreError, VersionedStore};
use crate::version::Version;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct State {
    /// Last assigned commit index
    index: Version,
    entries: HashMap<String, (Vec<u8>, Version)>,
}

impl State {
    fn version_of(&self, path: &str) -> Version {
        self.entries
            .get(path)
            .map_or(Version::ABSENT, |(_, version)| *version)
    }
}

/// Versioned store held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `value` at `path` unconditionally
    ///
    /// Bypasses conditions; meant for fixtures and bootstrapping.
    pub fn seed(&self, path: impl Into<String>, value: Vec<u8>) -> Version {
        let mut state = self.state.lock();
        let version = state.index.next();
        state.index = version;
        state.entries.insert(path.into(), (value, version));
        version
    }

    /// Current commit index
    #[inline]
    #[must_use]
    pub fn last_index(&self) -> Version {
        self.state.lock().index
    }

    /// Number of stored paths
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

#[async_trait::async_trait]
impl VersionedStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<StoreEntry, StoreError> {
        let state = self.state.lock();
        Ok(state
            .entries
            .get(path)
            .map_or_else(StoreEntry::absent, |(value, version)| {
                StoreEntry::present(value.clone(), *version)
            }))
    }

    async fn exec(&self, op: Op) -> Result<Version, StoreError> {
        let mut state = self.state.lock();

        for condition in op.conditions() {
            let actual = state.version_of(condition.path());
            if !condition.holds(actual) {
                let Condition::NotModified { path, version } = condition;
                tracing::debug!("rejecting op: {} (now {})", condition, actual);
                return Err(StoreError::Conflict {
                    path: path.clone(),
                    expected: *version,
                    actual,
                });
            }
        }

        let version = state.index.next();
        state.index = version;
        for mutation in op.mutations() {
            match mutation {
                Mutation::Set { path, value } => {
                    state.entries.insert(path.clone(), (value.clone(), version));
                }
            }
        }

        tracing::debug!(
            "committed {} mutation(s) at {}",
            op.mutations().len(),
            version
        );
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_absent_path() {
        let store = MemoryStore::new();
        let entry = store.get("/missing").await.unwrap();
        assert!(entry.is_absent());
        assert_eq!(entry.version, Version::ABSENT);
    }

    #[tokio::test]
    async fn seed_assigns_increasing_versions() {
        let store = MemoryStore::new();
        let v1 = store.seed("/a", b"1".to_vec());
        let v2 = store.seed("/b", b"2".to_vec());
        assert!(v1 < v2);
        assert_eq!(store.last_index(), v2);
        assert_eq!(store.len(), 2);

        let entry = store.get("/a").await.unwrap();
        assert_eq!(entry, StoreEntry::present(b"1".to_vec(), v1));
    }

    #[tokio::test]
    async fn exec_applies_when_condition_holds() {
        let store = MemoryStore::new();
        let op = Op::all([
            Op::if_not_modified("/a", Version::ABSENT),
            Op::set("/a", b"x".to_vec()),
        ]);

        let version = store.exec(op).await.unwrap();
        let entry = store.get("/a").await.unwrap();
        assert_eq!(entry.value.as_deref(), Some(&b"x"[..]));
        assert_eq!(entry.version, version);
    }

    #[tokio::test]
    async fn exec_rejects_stale_version() {
        let store = MemoryStore::new();
        let seen = store.seed("/a", b"old".to_vec());
        store.seed("/a", b"newer".to_vec());

        let op = Op::all([
            Op::if_not_modified("/a", seen),
            Op::set("/a", b"mine".to_vec()),
        ]);
        let err = store.exec(op).await.unwrap_err();
        assert!(err.is_conflict());

        let entry = store.get("/a").await.unwrap();
        assert_eq!(entry.value.as_deref(), Some(&b"newer"[..]));
    }

    #[tokio::test]
    async fn exec_is_all_or_nothing() {
        let store = MemoryStore::new();
        store.seed("/b", b"taken".to_vec());
        let before = store.last_index();

        let op = Op::all([
            Op::set("/a", b"1".to_vec()),
            Op::if_not_modified("/b", Version::ABSENT),
            Op::set("/b", b"2".to_vec()),
        ]);
        assert!(store.exec(op).await.is_err());

        assert!(store.get("/a").await.unwrap().is_absent());
        assert_eq!(store.last_index(), before);
    }

    #[tokio::test]
    async fn exec_uses_one_index_per_commit() {
        let store = MemoryStore::new();
        let op = Op::all([Op::set("/a", b"1".to_vec()), Op::set("/b", b"2".to_vec())]);
        let version = store.exec(op).await.unwrap();

        assert_eq!(store.get("/a").await.unwrap().version, version);
        assert_eq!(store.get("/b").await.unwrap().version, version);
    }

    #[tokio::test]
    async fn concurrent_writers_on_same_version_one_wins() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let seen = store.get("/a").await.unwrap().version;

        let attempts = (0..8u8).map(|i| {
            let store = store.clone();
            async move {
                store
                    .exec(Op::all([
                        Op::if_not_modified("/a", seen),
                        Op::set("/a", vec![i]),
                    ]))
                    .await
            }
        });
        let results = futures::future::join_all(attempts).await;

        let committed = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(committed, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(StoreError::is_conflict));
    }
}
