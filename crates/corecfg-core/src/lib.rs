//! corecfg Core - schema-governed configuration options
//!
//! Adds values to multi-valued configuration options:
//! - Validates the key and the raw input against the [`Schema`]
//! - Reads the current option set and its version from a [`VersionedStore`]
//! - Builds a conditional [`Op`] appending the encoded value
//!
//! The op is returned, not executed. Committing it is the caller's job; a
//! conflicting commit means another writer appended first.
//!
//! # Core Concepts
//!
//! - [`Options`]: Entry point (`add`, `values`)
//! - [`Context`]: Cancellation and deadline for the store read
//! - [`OptionSet`]: Ordered records stored under one key
//! - [`CoreConfig`]: Namespace, read timeout and logging, loaded from TOML
//!
//! # Example
//!
//! ```rust
//! use corecfg_core::{Context, Options, OptionsConfig};
//! use corecfg_schema::Schema;
//! use corecfg_store::{MemoryStore, VersionedStore};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let options = Options::new(store.clone(), Arc::new(Schema::standard()), &OptionsConfig::default())?;
//!
//! let op = options
//!     .add(&Context::background(), "trusted_host", &["host1:1999".to_string()])
//!     .await?;
//! store.exec(op).await?;
//!
//! let values = options.values(&Context::background(), "trusted_host").await?;
//! assert_eq!(values[0].to_string(), "host1:1999");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod option_set;
pub mod options;
pub mod snapshot;
pub mod telemetry;

// Re-exports for convenience
pub use builder::OperationBuilder;
pub use config::{ConfigError, CoreConfig, LogConfig, OptionsConfig, DEFAULT_NAMESPACE};
pub use context::{CancelHandle, Context, Interrupted};
pub use error::OptionsError;
pub use option_set::{OptionSet, Record};
pub use options::Options;
pub use snapshot::SnapshotReader;
pub use telemetry::TelemetryError;

pub use corecfg_schema::Schema;
pub use corecfg_store::{Op, Version, VersionedStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with corecfg Core
    pub use crate::{Context, CoreConfig, Op, Options, OptionsConfig, OptionsError, Schema, Version, VersionedStore};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
