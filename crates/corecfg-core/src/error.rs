//! Error types for the option layer
//!
//! Provides error handling for:
//! - Unknown keys and operations the key does not support
//! - Invalid input values
//! - Interrupted or failed snapshot reads
//! - Stored records that no longer decode

use crate::context::Interrupted;
use corecfg_schema::{CodecError, ValidationError};
use corecfg_store::StoreError;

/// Main option layer error type
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// Key is not registered in the schema
    #[error("unknown config key: {key:?}")]
    KeyNotFound {
        /// Requested key
        key: String,
    },

    /// Key does not support the requested operation
    #[error("{key:?} is a scalar config option; {guidance}")]
    UnsupportedOperation {
        /// Requested key
        key: String,
        /// What to use instead
        guidance: String,
    },

    /// Raw input failed validation for the key's value kind
    #[error("invalid value for {key:?}: {source}")]
    ValidationFailure {
        /// Requested key
        key: String,
        /// Underlying parse or encode failure
        #[source]
        source: ValidationError,
    },

    /// Snapshot read failed
    #[error("storage read failed: {0}")]
    StorageRead(#[source] StoreError),

    /// Caller cancelled before the read completed
    #[error("operation cancelled")]
    Cancelled,

    /// Deadline passed before the read completed
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// A stored record does not decode with the key's codec
    #[error("stored record {index} of {key:?} is corrupt: {source}")]
    CorruptRecord {
        /// Requested key
        key: String,
        /// Position in the option set
        index: usize,
        /// Decode failure
        #[source]
        source: CodecError,
    },

    /// Option set could not be serialized
    #[error("option set encoding failed: {0}")]
    Encoding(#[source] serde_json::Error),
}

impl OptionsError {
    /// Create unknown key error
    #[inline]
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Create the error for an append on a scalar key
    #[inline]
    pub fn unsupported(key: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            key: key.into(),
            guidance: "use the set operation instead".to_string(),
        }
    }

    /// Create validation error
    #[inline]
    pub fn validation(key: impl Into<String>, source: ValidationError) -> Self {
        Self::ValidationFailure {
            key: key.into(),
            source,
        }
    }

    /// Check if re-running the whole invocation may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Cancelled | Self::DeadlineExceeded => true,
            Self::StorageRead(err) => !matches!(err, StoreError::Corrupt { .. }),
            _ => false,
        }
    }

    /// Check if the error came from the snapshot read step
    #[inline]
    #[must_use]
    pub fn is_read_failure(&self) -> bool {
        matches!(
            self,
            Self::StorageRead(_) | Self::Cancelled | Self::DeadlineExceeded
        )
    }
}

impl From<Interrupted> for OptionsError {
    fn from(err: Interrupted) -> Self {
        match err {
            Interrupted::Cancelled => Self::Cancelled,
            Interrupted::DeadlineExceeded => Self::DeadlineExceeded,
        }
    }
}

impl From<StoreError> for OptionsError {
    fn from(err: StoreError) -> Self {
        Self::StorageRead(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corecfg_schema::OptionKind;

    #[test]
    fn unsupported_names_set_operation() {
        let err = OptionsError::unsupported("max_issuance");
        let message = err.to_string();
        assert!(message.contains("\"max_issuance\" is a scalar config option"));
        assert!(message.contains("set operation"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn read_failures_are_retryable() {
        assert!(OptionsError::Cancelled.is_retryable());
        assert!(OptionsError::DeadlineExceeded.is_retryable());
        assert!(OptionsError::StorageRead(StoreError::Unavailable("down".into())).is_retryable());
        assert!(OptionsError::Cancelled.is_read_failure());
    }

    #[test]
    fn corrupt_store_data_is_not_retryable() {
        let err = OptionsError::from(StoreError::corrupt("/core/config/x", "bad"));
        assert!(err.is_read_failure());
        assert!(!err.is_retryable());
    }

    #[test]
    fn validation_keeps_source() {
        let source = OptionKind::Integer.parse(&["ten".to_string()]).unwrap_err();
        let err = OptionsError::validation("max_issuance", source);
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_read_failure());
    }

    #[test]
    fn interrupted_maps_to_variants() {
        assert!(matches!(
            OptionsError::from(Interrupted::Cancelled),
            OptionsError::Cancelled
        ));
        assert!(matches!(
            OptionsError::from(Interrupted::DeadlineExceeded),
            OptionsError::DeadlineExceeded
        ));
    }
}
