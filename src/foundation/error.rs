/// Convenience result type used throughout the crate.
pub type PermtraceResult<T> = Result<T, PermtraceError>;

/// Errors surfaced at the crate boundary.
///
/// Generation and playback are total over their preconditions; errors only arise when
/// constructing inputs or decoding configuration.
#[derive(thiserror::Error, Debug)]
pub enum PermtraceError {
    /// An input sequence or configuration value violates a precondition.
    #[error("validation error: {0}")]
    Validation(String),

    /// A configuration document could not be decoded.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, typically IO from a host.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PermtraceError {
    /// Build a [`PermtraceError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PermtraceError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PermtraceError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
