//! Client-side options for writing new files to tierfs.
//!
//! [`OutStreamOptions`] merges three sources: the [`Configuration`] defaults, a
//! [`FileWriteLocationPolicy`] picked by name from a [`PolicyRegistry`], and the owner returned
//! by an [`IdentityProvider`]. All three travel in a [`ClientContext`] supplied by the caller.
//!
//! ```no_run
//! use tierfs::{ClientContext, Configuration, OutStreamOptions, WriteType};
//!
//! # fn main() -> Result<(), tierfs::Error> {
//! let ctx = ClientContext::new(Configuration::new());
//! let options = OutStreamOptions::defaults(&ctx)?
//!     .with_write_type(WriteType::CacheThrough)
//!     .with_ttl(60_000);
//! assert!(options.under_storage_type().is_sync_persist());
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod options;
pub mod policy;
pub mod security;
mod storage;
mod write_type;

pub use context::ClientContext;
pub use error::{BoxedError, Error, Result};
pub use options::{OutStreamOptions, ResolveWarning, Resolved, NO_TTL};
pub use policy::{FileWriteLocationPolicy, LocationPolicy, PolicyRegistry};
pub use security::{IdentityProvider, Permission};
pub use storage::{StorageType, UnderStorageType};
pub use tierfs_core::{size, ConfError, Configuration, PropertyKey};
pub use write_type::{ParseWriteTypeError, WriteType};
