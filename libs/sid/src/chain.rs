//! Ordered collection of session validators.
//!
//! Run when a session is resumed; the first failing validator tells the
//! caller the session must be discarded and a new one started.

use crate::{ValidationFailure, Validator};

/// Validators evaluated in insertion order.
#[derive(Default)]
pub struct ValidatorChain {
    validators: Vec<Box<dyn Validator + Send + Sync>>,
}

impl ValidatorChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validator.
    pub fn push<V>(&mut self, validator: V)
    where
        V: Validator + Send + Sync + 'static,
    {
        self.validators.push(Box::new(validator));
    }

    /// Builder-style [`ValidatorChain::push`].
    #[must_use]
    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: Validator + Send + Sync + 'static,
    {
        self.push(validator);
        self
    }

    /// Number of validators in the chain.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if the chain has no validators.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Names of the validators, in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Runs validators in order and stops at the first failure.
    ///
    /// An empty chain accepts every session.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        match self.validators.iter().find(|v| !v.is_valid()) {
            Some(v) => Err(failure(&**v)),
            None => Ok(()),
        }
    }

    /// Runs every validator and collects all failures.
    pub fn failures(&self) -> Vec<ValidationFailure> {
        self.validators
            .iter()
            .filter(|v| !v.is_valid())
            .map(|v| failure(&**v))
            .collect()
    }
}

impl std::fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("validators", &self.names())
            .finish()
    }
}

fn failure(validator: &(dyn Validator + Send + Sync)) -> ValidationFailure {
    ValidationFailure {
        validator: validator.name(),
        data: validator.data().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EncodingScheme, IdValidator, SessionIdConfig};

    struct UserAgent(&'static str);

    impl Validator for UserAgent {
        fn is_valid(&self) -> bool {
            self.0 == "test-agent"
        }

        fn data(&self) -> &str {
            self.0
        }

        fn name(&self) -> &'static str {
            "UserAgent"
        }
    }

    fn hex24() -> SessionIdConfig {
        SessionIdConfig::new(EncodingScheme::Hex, 24, false)
    }

    #[test]
    fn test_empty_chain_accepts() {
        let chain = ValidatorChain::new();
        assert!(chain.is_empty());
        assert!(chain.validate().is_ok());
        assert!(chain.failures().is_empty());
    }

    #[test]
    fn test_all_valid() {
        let chain = ValidatorChain::new()
            .with(IdValidator::for_id("deadbeefcafebabe00112233", hex24()))
            .with(UserAgent("test-agent"));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.names(), vec![IdValidator::NAME, "UserAgent"]);
        assert!(chain.validate().is_ok());
    }

    #[test]
    fn test_reports_first_failure() {
        let chain = ValidatorChain::new()
            .with(UserAgent("test-agent"))
            .with(IdValidator::for_id("not-a-hex-id", hex24()))
            .with(UserAgent("curl"));

        let err = chain.validate().unwrap_err();
        assert_eq!(err.validator, IdValidator::NAME);
        assert_eq!(err.data, "not-a-hex-id");
        assert!(err.to_string().contains(IdValidator::NAME));

        let failures = chain.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[1].validator, "UserAgent");
        assert_eq!(failures[1].data, "curl");
    }

    #[test]
    fn test_debug_lists_names() {
        let chain = ValidatorChain::new().with(UserAgent("x"));
        assert_eq!(
            format!("{chain:?}"),
            "ValidatorChain { validators: [\"UserAgent\"] }"
        );
    }
}
