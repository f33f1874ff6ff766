//! Value codecs
//!
//! [`ValueCodec`] is the capability each option value type implements to move
//! between its validated form and the opaque record stored in an option set.
//! Encodings are deterministic: equal values always produce equal bytes.

use crate::host::{HostAddr, HostError};
use std::time::Duration;

/// Encode/decode capability for option values
pub trait ValueCodec: Sized {
    /// Serialize value into a record
    ///
    /// # Errors
    /// Returns error if the value cannot be represented
    fn encode(&self) -> Result<Vec<u8>, CodecError>;

    /// Rebuild value from a record, re-validating it
    ///
    /// # Errors
    /// Returns error if bytes are malformed or the value is invalid
    fn decode(bytes: &[u8]) -> Result<Self, CodecError>;
}

impl ValueCodec for HostAddr {
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(self)?)
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let raw: HostAddr = serde_json::from_slice(bytes)?;
        Ok(HostAddr::from_parts(raw.host(), raw.port())?)
    }
}

impl ValueCodec for i64 {
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(self.to_be_bytes().to_vec())
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(i64::from_be_bytes(fixed::<8>(bytes)?))
    }
}

impl ValueCodec for bool {
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(vec![u8::from(*self)])
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        match fixed::<1>(bytes)? {
            [0] => Ok(false),
            [1] => Ok(true),
            [other] => Err(CodecError::InvalidValue(format!("boolean byte {other}"))),
        }
    }
}

/// Durations are stored as whole milliseconds
impl ValueCodec for Duration {
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let millis = u64::try_from(self.as_millis())
            .map_err(|_| CodecError::InvalidValue(format!("duration {self:?} out of range")))?;
        Ok(millis.to_be_bytes().to_vec())
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(Duration::from_millis(u64::from_be_bytes(fixed::<8>(bytes)?)))
    }
}

fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], CodecError> {
    bytes.try_into().map_err(|_| CodecError::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

/// Errors while encoding or decoding records
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Record has the wrong size
    #[error("invalid record length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Size the codec requires
        expected: usize,
        /// Size found
        actual: usize,
    },

    /// Structured record failed to (de)serialize
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Decoded host failed validation
    #[error("invalid host record: {0}")]
    Host(#[from] HostError),

    /// Value outside the representable range
    #[error("invalid value: {0}")]
    InvalidValue(String),
}
