//! Configuration
//!
//! Settings are read from TOML:
//!
//! ```toml
//! [options]
//! namespace = "/core/config/"
//! read_timeout_ms = 5000
//!
//! [logging]
//! filter = "corecfg_core=debug"
//! json = false
//! ```
//!
//! Every field has a default; an empty document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default store namespace for configuration options
pub const DEFAULT_NAMESPACE: &str = "/core/config/";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Option layer settings
    pub options: OptionsConfig,
    /// Logging settings
    pub logging: LogConfig,
}

impl CoreConfig {
    /// Parse from a TOML document
    ///
    /// # Errors
    /// Returns error if the document is malformed or fails validation
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(document)?;
        config.options.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&document)
    }
}

/// Option layer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsConfig {
    /// Store path prefix under which option keys live
    pub namespace: String,
    /// Upper bound on a single snapshot read, in milliseconds
    pub read_timeout_ms: Option<u64>,
}

impl OptionsConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With namespace
    #[inline]
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// With read timeout
    #[inline]
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Read timeout, if configured
    #[inline]
    #[must_use]
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }

    /// Store path of an option key
    ///
    /// Joins the namespace and the key with exactly one separator.
    #[must_use]
    pub fn path_for(&self, key: &str) -> String {
        format!("{}/{}", self.namespace.trim_end_matches('/'), key)
    }

    /// Check settings
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the namespace is not an absolute path
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.namespace.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "namespace must be absolute, got {:?}",
                self.namespace
            )));
        }
        if self.read_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "read_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            read_timeout_ms: None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing-subscriber` env-filter directive
    pub filter: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or schema error
    #[error("invalid config document: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantically invalid settings
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = CoreConfig::default();
        assert_eq!(config.options.namespace, "/core/config/");
        assert_eq!(config.options.read_timeout(), None);
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(CoreConfig::from_toml_str("").unwrap(), CoreConfig::default());
    }

    #[test]
    fn parse_full_document() {
        let config = CoreConfig::from_toml_str(
            r#"
            [options]
            namespace = "/tenant/a/config"
            read_timeout_ms = 250

            [logging]
            filter = "corecfg_core=debug"
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.options.namespace, "/tenant/a/config");
        assert_eq!(config.options.read_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.logging.filter, "corecfg_core=debug");
        assert!(config.logging.json);
    }

    #[test]
    fn unknown_fields_rejected() {
        let err = CoreConfig::from_toml_str("[options]\nretries = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn relative_namespace_rejected() {
        let err = CoreConfig::from_toml_str("[options]\nnamespace = \"core\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = OptionsConfig::new().with_read_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn path_for_joins_once() {
        let config = OptionsConfig::default();
        assert_eq!(config.path_for("trusted_host"), "/core/config/trusted_host");

        let config = OptionsConfig::new().with_namespace("/other");
        assert_eq!(config.path_for("trusted_host"), "/other/trusted_host");
    }

    #[test]
    fn load_missing_file() {
        let err = CoreConfig::load("/nonexistent/corecfg.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
