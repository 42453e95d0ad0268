//! Session identifier validator.

use crate::{SessionIdConfig, SessionIdSource};

/// A named check over session data.
///
/// Object safe so heterogeneous validators can share a [`crate::ValidatorChain`].
pub trait Validator {
    /// Returns true if the stored data passes the check.
    fn is_valid(&self) -> bool;

    /// Returns the data this validator was constructed with.
    fn data(&self) -> &str;

    /// Returns a stable name for this validator type.
    fn name(&self) -> &'static str;
}

/// Checks that a session identifier has the configured alphabet and length.
///
/// The identifier is fixed at construction and never modified; cluster-mode
/// truncation only affects what [`IdValidator::is_valid`] looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdValidator {
    id: String,
    config: SessionIdConfig,
}

impl IdValidator {
    /// Stable name reported through [`Validator::name`].
    pub const NAME: &'static str = "sidguard_id::IdValidator";

    /// Creates a validator for `id`, or for the source's current identifier
    /// when `id` is absent or empty.
    ///
    /// A source without a current session yields an empty identifier.
    pub fn new<S>(id: Option<&str>, source: &S, config: SessionIdConfig) -> Self
    where
        S: SessionIdSource + ?Sized,
    {
        let id = match id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => source.current_session_id().unwrap_or_default(),
        };
        Self { id, config }
    }

    /// Creates a validator for an explicit identifier.
    pub fn for_id(id: impl Into<String>, config: SessionIdConfig) -> Self {
        Self {
            id: id.into(),
            config,
        }
    }

    /// Returns the configuration this validator checks against.
    #[must_use]
    pub const fn config(&self) -> &SessionIdConfig {
        &self.config
    }

    /// Returns the portion of the identifier that is actually checked.
    #[must_use]
    pub fn candidate(&self) -> &str {
        candidate(&self.id, &self.config)
    }
}

impl Validator for IdValidator {
    fn is_valid(&self) -> bool {
        is_valid_id(&self.id, &self.config)
    }

    fn data(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

fn candidate<'a>(id: &'a str, config: &SessionIdConfig) -> &'a str {
    if !config.cluster_mode {
        return id;
    }
    // No dash: the whole identifier is checked.
    match id.rfind('-') {
        Some(pos) => &id[pos + 1..],
        None => id,
    }
}

/// Returns true if `id` matches `^[alphabet]{expected_length}$` for `config`.
pub fn is_valid_id(id: &str, config: &SessionIdConfig) -> bool {
    let body = candidate(id, config);
    let scheme = config.encoding_scheme;
    // Every alphabet is ASCII, so byte length equals character length for
    // any body that passes the class check.
    body.len() == config.expected_length && body.bytes().all(|b| scheme.allows(b))
}
