use thiserror::Error;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfError {
    #[error("configuration key `{key}` is not set")]
    NotFound { key: String },
    #[error("invalid value `{value}` for configuration key `{key}`: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    #[error("configuration key `{key}` references itself through `${{...}}` substitution")]
    Recursion { key: String },
    #[error("configuration key `{key}` expands beyond {limit} bytes")]
    ExpansionTooLarge { key: String, limit: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ConfError {
    pub(crate) fn invalid(key: &str, value: &str, reason: impl ToString) -> Self {
        ConfError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
