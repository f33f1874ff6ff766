//! corecfg Schema
//!
//! Typed configuration options: which keys exist, whether they hold one value
//! or a set, and how raw input becomes a stored record.
//!
//! # Core Concepts
//!
//! - [`Schema`]: Immutable key → [`OptionDescriptor`] registry
//! - [`OptionKind`]: Tagged value kind; owns parsing and record codec
//! - [`OptionValue`]: Validated value
//! - [`ValueCodec`]: Encode/decode capability per value type
//!
//! # Example
//!
//! ```rust
//! use corecfg_schema::{OptionKind, Schema};
//!
//! let schema = Schema::builder()
//!     .multiple("trusted_host", OptionKind::Host)
//!     .scalar("max_issuance", OptionKind::Integer)
//!     .build()
//!     .unwrap();
//!
//! let descriptor = schema.lookup("trusted_host").unwrap();
//! let record = descriptor.encode(&["host1:1999".to_string()]).unwrap();
//! assert_eq!(descriptor.decode(&record).unwrap().to_string(), "host1:1999");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod codec;
mod descriptor;
mod host;
mod kind;
mod registry;

pub use codec::{CodecError, ValueCodec};
pub use descriptor::OptionDescriptor;
pub use host::{HostAddr, HostError};
pub use kind::{OptionKind, OptionValue, ValidationError};
pub use registry::{Schema, SchemaBuilder, SchemaError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
