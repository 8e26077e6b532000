use thiserror::Error;
pub use tierfs_core::BoxedError;
use tierfs_core::ConfError;

/// Errors that abort building write options.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Conf(#[from] ConfError),
    #[error("no location policy registered under `{name}`")]
    UnknownPolicy { name: String },
    #[error("failed to construct location policy `{name}`: {source}")]
    PolicyConstruction { name: String, source: BoxedError },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
