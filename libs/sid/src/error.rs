//! Error types for configuration parsing and validator chains.

use thiserror::Error;

/// Errors raised by strict configuration parsing.
///
/// The lenient constructors on [`crate::EncodingScheme`] and
/// [`crate::SessionIdConfig`] never produce these; they normalize instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The bits-per-character value is not one of 4, 5 or 6.
    #[error("unsupported bits per character: '{0}' (expected 4, 5 or 6)")]
    UnsupportedBitsPerCharacter(String),

    /// The expected length is not a non-negative integer.
    #[error("invalid session id length: '{0}'")]
    InvalidLength(String),
}

impl ConfigError {
    /// Returns true if this error concerns the encoding scheme.
    pub fn is_scheme_error(&self) -> bool {
        matches!(self, ConfigError::UnsupportedBitsPerCharacter(_))
    }
}

/// A validator in a [`crate::ValidatorChain`] rejected the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("session rejected by {validator} (data: '{data}')")]
pub struct ValidationFailure {
    /// Name of the failing validator.
    pub validator: &'static str,

    /// The data the validator evaluated.
    pub data: String,
}
