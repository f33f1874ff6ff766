//! Option kinds and their validated values

use crate::codec::{CodecError, ValueCodec};
use crate::host::{HostAddr, HostError};
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;
use std::str::{FromStr, ParseBoolError};
use std::sync::Arc;
use std::time::Duration;

/// Kind of value an option holds
///
/// Each kind owns its input parser and record codec; dispatch happens by
/// matching on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Network host, `host[:port]`
    Host,

    /// Signed 64-bit integer
    Integer,

    /// `true` / `false`
    Boolean,

    /// Duration such as `250ms`, `30s`, `5m`, `2h`
    Duration,
}

impl OptionKind {
    /// Number of raw inputs a value of this kind is parsed from
    #[inline]
    #[must_use]
    pub const fn arity(self) -> usize {
        1
    }

    /// Kind name (for diagnostics)
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Duration => "duration",
        }
    }

    /// Parse raw command inputs into a validated value
    ///
    /// # Errors
    /// Returns error if the number of inputs is wrong or the input is invalid
    pub fn parse(self, raw: &[String]) -> Result<OptionValue, ValidationError> {
        let input = match raw {
            [input] => input.as_str(),
            _ => {
                return Err(ValidationError::Arity {
                    expected: self.arity(),
                    actual: raw.len(),
                })
            }
        };

        match self {
            Self::Host => Ok(OptionValue::Host(input.parse()?)),
            Self::Integer => input
                .parse()
                .map(OptionValue::Integer)
                .map_err(|source| ValidationError::Integer {
                    input: input.to_string(),
                    source,
                }),
            Self::Boolean => input
                .parse()
                .map(OptionValue::Boolean)
                .map_err(|source| ValidationError::Boolean {
                    input: input.to_string(),
                    source,
                }),
            Self::Duration => parse_duration(input).map(OptionValue::Duration),
        }
    }

    /// Decode a stored record as a value of this kind
    ///
    /// # Errors
    /// Returns error if the record is malformed
    pub fn decode(self, bytes: &[u8]) -> Result<OptionValue, CodecError> {
        Ok(match self {
            Self::Host => OptionValue::Host(HostAddr::decode(bytes)?),
            Self::Integer => OptionValue::Integer(i64::decode(bytes)?),
            Self::Boolean => OptionValue::Boolean(bool::decode(bytes)?),
            Self::Duration => OptionValue::Duration(Duration::decode(bytes)?),
        })
    }
}

impl Display for OptionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated option value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionValue {
    /// Host value
    Host(HostAddr),
    /// Integer value
    Integer(i64),
    /// Boolean value
    Boolean(bool),
    /// Duration value
    Duration(Duration),
}

impl OptionValue {
    /// Kind of this value
    #[inline]
    #[must_use]
    pub fn kind(&self) -> OptionKind {
        match self {
            Self::Host(_) => OptionKind::Host,
            Self::Integer(_) => OptionKind::Integer,
            Self::Boolean(_) => OptionKind::Boolean,
            Self::Duration(_) => OptionKind::Duration,
        }
    }

    /// Encode value into a record
    ///
    /// # Errors
    /// Returns error if the value cannot be represented
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Host(v) => v.encode(),
            Self::Integer(v) => v.encode(),
            Self::Boolean(v) => v.encode(),
            Self::Duration(v) => v.encode(),
        }
    }
}

impl Display for OptionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Duration(v) => write!(f, "{}ms", v.as_millis()),
        }
    }
}

/// Parse `<n>ms`, `<n>s`, `<n>m` or `<n>h`
fn parse_duration(input: &str) -> Result<Duration, ValidationError> {
    let invalid = || ValidationError::Duration(input.to_string());

    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (digits, unit) = input.split_at(split);
    let n = u64::from_str(digits).map_err(|_| invalid())?;

    let millis_per_unit: u64 = match unit {
        "ms" => 1,
        "s" => 1_000,
        "m" => 60_000,
        "h" => 3_600_000,
        _ => return Err(invalid()),
    };
    n.checked_mul(millis_per_unit)
        .map(Duration::from_millis)
        .ok_or_else(invalid)
}

/// Input rejected by an option's parser
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    /// Wrong number of raw inputs
    #[error("expected {expected} value(s), got {actual}")]
    Arity {
        /// Inputs the kind takes
        expected: usize,
        /// Inputs given
        actual: usize,
    },

    /// Host syntax error
    #[error(transparent)]
    Host(#[from] HostError),

    /// Integer syntax error
    #[error("invalid integer {input:?}: {source}")]
    Integer {
        /// Input as given
        input: String,
        /// Parse failure
        #[source]
        source: ParseIntError,
    },

    /// Boolean syntax error
    #[error("invalid boolean {input:?}: {source}")]
    Boolean {
        /// Input as given
        input: String,
        /// Parse failure
        #[source]
        source: ParseBoolError,
    },

    /// Duration syntax error
    #[error("invalid duration {0:?} (expected <n>ms, <n>s, <n>m or <n>h)")]
    Duration(String),

    /// Parsed value could not be encoded
    #[error("value cannot be encoded: {0}")]
    Unencodable(#[source] Arc<CodecError>),
}

impl From<CodecError> for ValidationError {
    fn from(err: CodecError) -> Self {
        Self::Unencodable(Arc::new(err))
    }
}
