//! Conditional append operations
//!
//! [`OperationBuilder`] turns a snapshot plus one new record into the store
//! operation that appends it. It never reads, retries or commits.

use crate::config::OptionsConfig;
use crate::error::OptionsError;
use crate::option_set::{OptionSet, Record};
use corecfg_schema::OptionDescriptor;
use corecfg_store::{Op, Version};

/// Builds append operations for multi-valued keys
#[derive(Debug, Clone, Default)]
pub struct OperationBuilder {
    config: OptionsConfig,
}

impl OperationBuilder {
    /// Create builder for keys under the configured namespace
    #[inline]
    #[must_use]
    pub fn new(config: OptionsConfig) -> Self {
        Self { config }
    }

    /// Build the operation appending `encoded` to `previous`
    ///
    /// The result writes `previous ++ [encoded]` only if the key is still at
    /// `version` when the store executes it.
    ///
    /// # Errors
    /// - `UnsupportedOperation` if `descriptor` is scalar
    /// - `Encoding` if the new option set cannot be serialized
    pub fn build(
        &self,
        key: &str,
        descriptor: &OptionDescriptor,
        previous: &OptionSet,
        version: Version,
        encoded: Vec<u8>,
    ) -> Result<Op, OptionsError> {
        if !descriptor.allows_multiple() {
            return Err(OptionsError::unsupported(key));
        }

        let path = self.config.path_for(key);
        let next = previous.appended(Record::new(encoded));
        let bytes = next.to_bytes().map_err(OptionsError::Encoding)?;

        Ok(Op::all([
            Op::if_not_modified(path.clone(), version),
            Op::set(path, bytes),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corecfg_schema::{OptionKind, Schema};
    use corecfg_store::{Condition, Mutation};
    use pretty_assertions::assert_eq;

    fn records(items: &[&[u8]]) -> OptionSet {
        items.iter().map(|b| Record::new(b.to_vec())).collect()
    }

    #[test]
    fn appends_with_version_condition() {
        let schema = Schema::standard();
        let descriptor = schema.lookup("trusted_host").unwrap();
        let previous = records(&[b"one"]);

        let op = OperationBuilder::default()
            .build("trusted_host", descriptor, &previous, Version::new(7), b"two".to_vec())
            .unwrap();

        assert_eq!(
            op.conditions(),
            &[Condition::NotModified {
                path: "/core/config/trusted_host".to_string(),
                version: Version::new(7),
            }]
        );
        let [Mutation::Set { path, value }] = op.mutations() else {
            panic!("expected one set mutation");
        };
        assert_eq!(path, "/core/config/trusted_host");
        assert_eq!(OptionSet::from_bytes(value).unwrap(), records(&[b"one", b"two"]));
    }

    #[test]
    fn absent_version_is_kept() {
        let descriptor = OptionDescriptor::new("trusted_host", OptionKind::Host, true);
        let op = OperationBuilder::default()
            .build("trusted_host", &descriptor, &OptionSet::new(), Version::ABSENT, vec![1])
            .unwrap();

        assert!(op.conditions()[0].holds(Version::ABSENT));
    }

    #[test]
    fn scalar_rejected() {
        let schema = Schema::standard();
        let descriptor = schema.lookup("max_issuance").unwrap();
        let err = OperationBuilder::default()
            .build("max_issuance", descriptor, &OptionSet::new(), Version::ABSENT, vec![0; 8])
            .unwrap_err();

        assert!(matches!(err, OptionsError::UnsupportedOperation { .. }));
    }

    #[test]
    fn namespace_applies() {
        let descriptor = OptionDescriptor::new("trusted_host", OptionKind::Host, true);
        let builder = OperationBuilder::new(OptionsConfig::new().with_namespace("/alt"));
        let op = builder
            .build("trusted_host", &descriptor, &OptionSet::new(), Version::ABSENT, vec![1])
            .unwrap();

        assert_eq!(op.mutations()[0].path(), "/alt/trusted_host");
    }
}
