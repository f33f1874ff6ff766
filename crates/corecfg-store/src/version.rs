//! Version tokens observed by store reads
//!
//! Provides [`Version`], the opaque marker of store state carried from a read
//! into the condition of a later conditional write.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Commit index at which a path was last written
///
/// Paths that have never been written report [`Version::ABSENT`]. That is a
/// valid, comparable token: a condition built from it holds only while the
/// path is still unwritten.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
    serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Version of a path that has never been written
    pub const ABSENT: Self = Self(0);

    /// Create version from a raw commit index
    #[inline]
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Raw commit index
    #[inline]
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.0
    }

    /// Check if this is the absent version
    #[inline]
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.0 == 0
    }

    /// Version following this one
    #[inline]
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_absent() {
            f.write_str("absent")
        } else {
            write!(f, "v{}", self.0)
        }
    }
}

impl FromStr for Version {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "absent" {
            return Ok(Self::ABSENT);
        }
        s.strip_prefix('v').unwrap_or(s).parse().map(Self)
    }
}

impl From<u64> for Version {
    fn from(index: u64) -> Self {
        Self(index)
    }
}
