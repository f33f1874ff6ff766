//! Schema registry
//!
//! Provides [`Schema`], the immutable map from configuration key to
//! [`OptionDescriptor`]. Build one at startup with [`SchemaBuilder`] and share
//! it by reference (`Arc<Schema>`); there is no way to mutate it afterwards.

use crate::descriptor::OptionDescriptor;
use crate::kind::OptionKind;
use indexmap::IndexMap;

/// Immutable registry of option descriptors
///
/// Lookups take `&self` only, so any number of tasks may read concurrently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    options: IndexMap<String, OptionDescriptor>,
}

impl Schema {
    /// Start building a schema
    #[inline]
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Built-in schema
    ///
    /// | key | kind | values |
    /// |---|---|---|
    /// | `trusted_host` | host | multiple |
    /// | `max_issuance` | integer | scalar |
    /// | `max_issuance_window` | duration | scalar |
    /// | `enforce_access_tokens` | boolean | scalar |
    #[must_use]
    pub fn standard() -> Self {
        let options = [
            OptionDescriptor::new("trusted_host", OptionKind::Host, true),
            OptionDescriptor::new("max_issuance", OptionKind::Integer, false),
            OptionDescriptor::new("max_issuance_window", OptionKind::Duration, false),
            OptionDescriptor::new("enforce_access_tokens", OptionKind::Boolean, false),
        ]
        .into_iter()
        .map(|d| (d.key().to_string(), d))
        .collect();
        Self { options }
    }

    /// Look up the descriptor for `key`
    ///
    /// # Errors
    /// Returns `SchemaError::UnknownKey` if the key is not registered
    #[inline]
    pub fn lookup(&self, key: &str) -> Result<&OptionDescriptor, SchemaError> {
        self.options
            .get(key)
            .ok_or_else(|| SchemaError::UnknownKey(key.to_string()))
    }

    /// Check if key is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Registered keys, in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Registered descriptors, in registration order
    pub fn iter(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.options.values()
    }

    /// Number of registered options
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Check if schema is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Builder for [`Schema`]
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    options: Vec<OptionDescriptor>,
}

impl SchemaBuilder {
    /// Create empty builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a multi-valued option
    #[inline]
    #[must_use]
    pub fn multiple(mut self, key: impl Into<String>, kind: OptionKind) -> Self {
        self.options.push(OptionDescriptor::new(key, kind, true));
        self
    }

    /// Register a scalar option
    #[inline]
    #[must_use]
    pub fn scalar(mut self, key: impl Into<String>, kind: OptionKind) -> Self {
        self.options.push(OptionDescriptor::new(key, kind, false));
        self
    }

    /// Freeze into a schema
    ///
    /// # Errors
    /// - `SchemaError::InvalidKey` if a key is not lowercase alphanumeric/underscore
    /// - `SchemaError::DuplicateKey` if a key is registered twice
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut options = IndexMap::with_capacity(self.options.len());
        for descriptor in self.options {
            let key = descriptor.key().to_string();
            if !is_valid_key(&key) {
                return Err(SchemaError::InvalidKey(key));
            }
            if options.contains_key(&key) {
                return Err(SchemaError::DuplicateKey(key));
            }
            options.insert(key, descriptor);
        }
        Ok(Schema { options })
    }
}

/// Keys become store path segments
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Schema errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Key is not registered
    #[error("unknown config key: {0:?}")]
    UnknownKey(String),

    /// Key registered twice
    #[error("duplicate config key: {0:?}")]
    DuplicateKey(String),

    /// Key is not a valid path segment
    #[error("invalid config key: {0:?} (must be lowercase alphanumeric or underscore)")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn standard_schema() {
        let schema = Schema::standard();
        assert_eq!(schema.len(), 4);
        assert!(schema.lookup("trusted_host").unwrap().allows_multiple());
        assert!(!schema.lookup("max_issuance").unwrap().allows_multiple());
        assert!(!schema.lookup("max_issuance_window").unwrap().allows_multiple());
        assert!(!schema.lookup("enforce_access_tokens").unwrap().allows_multiple());
    }

    #[test]
    fn lookup_unknown_key() {
        let schema = Schema::standard();
        assert_eq!(
            schema.lookup("nonexistent_key"),
            Err(SchemaError::UnknownKey("nonexistent_key".to_string()))
        );
    }

    #[test]
    fn empty_schema() {
        let schema = Schema::default();
        assert!(schema.is_empty());
        assert!(schema.lookup("trusted_host").is_err());
    }

    #[test]
    fn builder_keeps_registration_order() {
        let schema = Schema::builder()
            .scalar("zeta", OptionKind::Integer)
            .multiple("alpha", OptionKind::Host)
            .scalar("mid", OptionKind::Boolean)
            .build()
            .unwrap();

        let keys: Vec<_> = schema.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert!(schema.contains("alpha"));
        assert_eq!(schema.iter().filter(|d| d.allows_multiple()).count(), 1);
    }

    #[test]
    fn builder_rejects_duplicates() {
        let result = Schema::builder()
            .multiple("trusted_host", OptionKind::Host)
            .scalar("trusted_host", OptionKind::Integer)
            .build();
        assert_eq!(result, Err(SchemaError::DuplicateKey("trusted_host".to_string())));
    }

    #[test]
    fn builder_rejects_invalid_keys() {
        for key in ["", "Upper", "with/slash", "dot.ted", "space d"] {
            let result = Schema::builder().scalar(key, OptionKind::Boolean).build();
            assert!(matches!(result, Err(SchemaError::InvalidKey(_))), "{key:?}");
        }
    }

    #[test]
    fn schema_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Schema>();
    }
}
