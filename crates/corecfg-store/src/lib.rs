//! corecfg Store Contract
//!
//! Versioned key-value store interface with atomic conditional writes.
//!
//! # Core Concepts
//!
//! - [`Version`]: Opaque token of the store state observed by a read
//! - [`Op`]: Atomic write description (conditions + mutations)
//! - [`VersionedStore`]: Async store interface (`get` / `exec`)
//! - [`MemoryStore`]: In-process implementation with the same commit semantics
//!
//! # Example
//!
//! ```rust,ignore
//! use corecfg_store::{MemoryStore, Op, VersionedStore};
//!
//! let store = MemoryStore::new();
//! let entry = store.get("/core/config/trusted_host").await?;
//!
//! // Write only if nobody else wrote since our read
//! let op = Op::all([
//!     Op::if_not_modified("/core/config/trusted_host", entry.version),
//!     Op::set("/core/config/trusted_host", bytes),
//! ]);
//! store.exec(op).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod memory;
mod op;
mod store;
mod version;

pub use memory::MemoryStore;
pub use op::{Condition, Mutation, Op};
pub use store::{StoreEntry, StoreError, VersionedStore};
pub use version::Version;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
