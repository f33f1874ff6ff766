//! Conditional write descriptions
//!
//! Provides [`Op`], a description of an atomic store transaction made of
//! preconditions and mutations. Ops are built by callers and executed by a
//! [`VersionedStore`](crate::VersionedStore); building one has no effect on
//! the store.

use crate::version::Version;
use std::fmt::{self, Display, Formatter};

/// Precondition checked atomically at commit time
///
/// # Invariants
/// - `version` is the token observed by the read that motivated the write
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Path has not been written since `version` (optimistic concurrency)
    NotModified {
        /// Store path
        path: String,
        /// Version observed by the preceding read
        version: Version,
    },
}

impl Condition {
    /// Path the condition inspects
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::NotModified { path, .. } => path,
        }
    }

    /// Check the condition against the current version of its path
    #[inline]
    #[must_use]
    pub fn holds(&self, current: Version) -> bool {
        match self {
            Self::NotModified { version, .. } => *version == current,
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotModified { path, version } => {
                write!(f, "{path} unmodified since {version}")
            }
        }
    }
}

/// State change applied when all conditions hold
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Mutation {
    /// Replace the value stored at `path`
    Set {
        /// Store path
        path: String,
        /// Serialized record
        value: Vec<u8>,
    },
}

impl Mutation {
    /// Path the mutation writes
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Set { path, .. } => path,
        }
    }

    /// Value written
    #[inline]
    #[must_use]
    pub fn value(&self) -> &[u8] {
        match self {
            Self::Set { value, .. } => value,
        }
    }
}

impl fmt::Debug for Mutation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { path, value } => f
                .debug_struct("Set")
                .field("path", path)
                .field("len", &value.len())
                .finish(),
        }
    }
}

/// Atomic transaction description
///
/// All conditions are checked and all mutations applied as one step; if any
/// condition fails nothing is applied. Ops compose with [`Op::all`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Op {
    conditions: Vec<Condition>,
    mutations: Vec<Mutation>,
}

impl Op {
    /// Create empty op (no conditions, no mutations)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Op that only asserts `path` is unmodified since `version`
    #[inline]
    #[must_use]
    pub fn if_not_modified(path: impl Into<String>, version: Version) -> Self {
        Self {
            conditions: vec![Condition::NotModified {
                path: path.into(),
                version,
            }],
            mutations: Vec::new(),
        }
    }

    /// Op that sets `path` to `value`
    #[inline]
    #[must_use]
    pub fn set(path: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            conditions: Vec::new(),
            mutations: vec![Mutation::Set {
                path: path.into(),
                value,
            }],
        }
    }

    /// Compose ops into one atomic op
    ///
    /// Conditions and mutations keep the order in which the ops are given.
    #[must_use]
    pub fn all(ops: impl IntoIterator<Item = Op>) -> Self {
        ops.into_iter().fold(Self::new(), |mut acc, op| {
            acc.conditions.extend(op.conditions);
            acc.mutations.extend(op.mutations);
            acc
        })
    }

    /// Preconditions
    #[inline]
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Mutations
    #[inline]
    #[must_use]
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Check if op does nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.mutations.is_empty()
    }
}
