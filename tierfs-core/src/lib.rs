//! Configuration source for tierfs clients.
//!
//! A [`Configuration`] is a plain key/value store seeded with the defaults of every
//! [`PropertyKey`]. Callers own it and hand it to whatever needs it; nothing in this crate reads
//! process-wide state except [`Configuration::merge_env`], which the caller invokes explicitly.

mod conf;
mod error;
mod key;
pub mod size;

pub use conf::Configuration;
pub use error::{BoxedError, ConfError};
pub use key::PropertyKey;

pub type Result<T, E = ConfError> = core::result::Result<T, E>;
