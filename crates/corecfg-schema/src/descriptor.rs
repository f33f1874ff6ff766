//! Option descriptors

use crate::codec::CodecError;
use crate::kind::{OptionKind, OptionValue, ValidationError};

/// Schema entry for one configuration key
///
/// # Invariants
/// - Immutable once registered in a [`Schema`](crate::Schema)
/// - `multiple` decides which write path the key accepts: multi-valued keys
///   are appended to, scalar keys are set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionDescriptor {
    key: String,
    kind: OptionKind,
    multiple: bool,
}

impl OptionDescriptor {
    /// Create descriptor
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>, kind: OptionKind, multiple: bool) -> Self {
        Self {
            key: key.into(),
            kind,
            multiple,
        }
    }

    /// Configuration key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Check if the key holds a set of values
    #[inline]
    #[must_use]
    pub fn allows_multiple(&self) -> bool {
        self.multiple
    }

    /// Parse raw inputs into a validated value
    ///
    /// # Errors
    /// Returns the kind parser's error
    #[inline]
    pub fn parse(&self, raw: &[String]) -> Result<OptionValue, ValidationError> {
        self.kind.parse(raw)
    }

    /// Parse raw inputs and encode the value into a record
    ///
    /// Pure and deterministic: identical valid input yields identical bytes.
    ///
    /// # Errors
    /// Returns error if the input fails validation
    pub fn encode(&self, raw: &[String]) -> Result<Vec<u8>, ValidationError> {
        Ok(self.parse(raw)?.encode()?)
    }

    /// Decode a stored record of this option
    ///
    /// # Errors
    /// Returns error if the record is malformed or fails validation
    #[inline]
    pub fn decode(&self, bytes: &[u8]) -> Result<OptionValue, CodecError> {
        self.kind.decode(bytes)
    }
}
