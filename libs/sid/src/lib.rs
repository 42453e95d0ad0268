//! # sidguard-id
//!
//! Shape validation for session identifiers.
//!
//! ## Design Principles
//!
//! - Validation is a pure function of the identifier and an explicit
//!   [`SessionIdConfig`]; there is no global configuration lookup
//! - The "current session" is an injected [`SessionIdSource`], not ambient state
//! - A shape check never fails loudly: malformed input is simply not valid
//! - Validators are named so a [`ValidatorChain`] can report which check failed
//!
//! ## Identifier Format
//!
//! The identifier body is exactly `expected_length` characters drawn from the
//! alphabet of the configured bits-per-character scheme:
//!
//! | bits | alphabet       |
//! |------|----------------|
//! | 4    | `0-9a-f`       |
//! | 5    | `0-9a-v`       |
//! | 6    | `0-9A-Za-z-,`  |
//!
//! In cluster mode identifiers carry a routing prefix
//! (`node1-26rb6fqvsjjqbflna3lrfb2gvv`) and only the part after the last dash
//! is checked.

mod chain;
mod config;
mod error;
mod scheme;
mod source;
mod validator;

pub use chain::ValidatorChain;
pub use config::SessionIdConfig;
pub use error::{ConfigError, ValidationFailure};
pub use scheme::EncodingScheme;
pub use source::{FixedSessionId, NoSession, SessionIdSource};
pub use validator::{is_valid_id, IdValidator, Validator};
