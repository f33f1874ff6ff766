//! Option layer entry point
//!
//! [`Options`] ties the schema, the snapshot reader and the operation builder
//! together. `add` validates and encodes the input before touching the store,
//! so rejected requests never cause a read.

use crate::builder::OperationBuilder;
use crate::config::{ConfigError, OptionsConfig};
use crate::context::Context;
use crate::error::OptionsError;
use crate::snapshot::SnapshotReader;
use corecfg_schema::{OptionValue, Schema};
use corecfg_store::{Op, VersionedStore};
use std::sync::Arc;

/// Schema-governed access to configuration options
#[derive(Debug, Clone)]
pub struct Options {
    schema: Arc<Schema>,
    reader: SnapshotReader,
    builder: OperationBuilder,
}

impl Options {
    /// Create option layer over `store`
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if `config` fails validation
    pub fn new(
        store: Arc<dyn VersionedStore>,
        schema: Arc<Schema>,
        config: &OptionsConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            schema,
            reader: SnapshotReader::new(store, config.clone()),
            builder: OperationBuilder::new(config.clone()),
        })
    }

    /// Schema in use
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Build the operation adding one value to a multi-valued key
    ///
    /// The returned op appends the encoded value to the option set observed
    /// by this call, conditioned on the key being unmodified since. The
    /// caller executes it; a `Conflict` from the store means another writer
    /// got there first and the whole call should be repeated.
    ///
    /// # Errors
    /// - `KeyNotFound` if `key` is not in the schema
    /// - `UnsupportedOperation` if `key` is scalar
    /// - `ValidationFailure` if `raw` is not a valid value for the key
    /// - `StorageRead`, `Cancelled`, `DeadlineExceeded` from the read
    pub async fn add(&self, ctx: &Context, key: &str, raw: &[String]) -> Result<Op, OptionsError> {
        tracing::debug!("Adding value to {}", key);

        let descriptor = self
            .schema
            .lookup(key)
            .map_err(|_| OptionsError::key_not_found(key))?;

        if !descriptor.allows_multiple() {
            return Err(OptionsError::unsupported(key));
        }

        let encoded = descriptor
            .encode(raw)
            .map_err(|e| OptionsError::validation(key, e))?;

        let (previous, version) = self.reader.read(ctx, key).await?;

        let op = self
            .builder
            .build(key, descriptor, &previous, version, encoded)?;
        tracing::debug!(
            "Built append for {}: {} -> {} record(s) if unmodified since {}",
            key,
            previous.len(),
            previous.len() + 1,
            version
        );
        Ok(op)
    }

    /// Decoded values of a multi-valued key, in stored order
    ///
    /// # Errors
    /// - `KeyNotFound` / `UnsupportedOperation` as for [`Options::add`]
    /// - read errors as for [`Options::add`]
    /// - `CorruptRecord` if a stored record does not decode
    pub async fn values(&self, ctx: &Context, key: &str) -> Result<Vec<OptionValue>, OptionsError> {
        let descriptor = self
            .schema
            .lookup(key)
            .map_err(|_| OptionsError::key_not_found(key))?;

        if !descriptor.allows_multiple() {
            return Err(OptionsError::unsupported(key));
        }

        let (set, _) = self.reader.read(ctx, key).await?;
        set.iter()
            .enumerate()
            .map(|(index, record)| {
                descriptor
                    .decode(record.as_bytes())
                    .map_err(|source| OptionsError::CorruptRecord {
                        key: key.to_string(),
                        index,
                        source,
                    })
            })
            .collect()
    }
}
