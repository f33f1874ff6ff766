//! Stored option sets
//!
//! Provides [`OptionSet`], the ordered list of encoded records stored under a
//! multi-valued key, and [`Record`], one opaque encoded value.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Formatter};

/// One encoded option value
///
/// Opaque to this layer; produced by the option's codec. Serialized as hex in
/// human-readable formats and as raw bytes otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Record(Vec<u8>);

impl Record {
    /// Wrap encoded bytes
    #[inline]
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Encoded bytes
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwrap encoded bytes
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Record {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Record {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode(&self.0))
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> serde::de::Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str("a record as hex string or byte array")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                hex::decode(value).map(Record).map_err(E::custom)
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Record(value.to_vec()))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(byte) = seq.next_element()? {
                    bytes.push(byte);
                }
                Ok(Record(bytes))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(RecordVisitor)
        } else {
            deserializer.deserialize_bytes(RecordVisitor)
        }
    }
}

/// All values currently stored for a multi-valued key
///
/// # Invariants
/// - Order is append order; this layer never reorders or deduplicates
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionSet {
    values: Vec<Record>,
}

impl OptionSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a stored option set
    ///
    /// # Errors
    /// Returns error if the bytes are not a serialized option set
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Serialize for storage
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Copy of this set with `record` appended
    #[must_use]
    pub fn appended(&self, record: Record) -> Self {
        let mut values = Vec::with_capacity(self.values.len() + 1);
        values.extend_from_slice(&self.values);
        values.push(record);
        Self { values }
    }

    /// Stored records, in append order
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.values
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over records
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.values.iter()
    }
}

impl FromIterator<Record> for OptionSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
