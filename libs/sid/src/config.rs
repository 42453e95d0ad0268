//! Session identifier configuration.
//!
//! Values are read once (from the environment or any other key/value lookup)
//! and handed to validators explicitly.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{ConfigError, EncodingScheme};

/// Bits per character (4, 5 or 6).
pub const ENV_BITS_PER_CHARACTER: &str = "SID_BITS_PER_CHARACTER";

/// Exact identifier body length.
pub const ENV_LENGTH: &str = "SID_LENGTH";

/// Cluster mode flag (`1` or `true`).
pub const ENV_CLUSTER_MODE: &str = "SID_CLUSTER_MODE";

/// Session save handler; the value `cluster` also enables cluster mode.
pub const ENV_SAVE_HANDLER: &str = "SID_SAVE_HANDLER";

/// Default identifier body length.
pub const DEFAULT_LENGTH: usize = 32;

/// Configuration a validator checks identifiers against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionIdConfig {
    /// Alphabet of the identifier body.
    #[serde(rename = "bits_per_character")]
    pub encoding_scheme: EncodingScheme,

    /// Exact number of characters in the identifier body.
    #[serde(deserialize_with = "deserialize_length")]
    pub expected_length: usize,

    /// Identifiers carry a `prefix-` routing token; only the part after the
    /// last dash is validated.
    pub cluster_mode: bool,
}

impl Default for SessionIdConfig {
    fn default() -> Self {
        Self {
            encoding_scheme: EncodingScheme::default(),
            expected_length: DEFAULT_LENGTH,
            cluster_mode: false,
        }
    }
}

impl SessionIdConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(
        encoding_scheme: EncodingScheme,
        expected_length: usize,
        cluster_mode: bool,
    ) -> Self {
        Self {
            encoding_scheme,
            expected_length,
            cluster_mode,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value lookup.
    ///
    /// Never fails: unknown schemes become Base32 and malformed lengths
    /// become 0, so a bad setting rejects identifiers instead of erroring.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bits = lookup(ENV_BITS_PER_CHARACTER);
        let encoding_scheme = EncodingScheme::from_setting(bits.as_deref());
        if let Some(raw) = bits.as_deref() {
            if raw.trim().parse::<u8>().ok() != Some(encoding_scheme.bits()) {
                warn!(
                    value = raw,
                    fallback = encoding_scheme.bits(),
                    "unsupported bits per character, using default"
                );
            }
        }

        let expected_length = lookup(ENV_LENGTH)
            .map(|raw| Self::parse_length(&raw))
            .unwrap_or(DEFAULT_LENGTH);

        let cluster_mode = lookup(ENV_CLUSTER_MODE)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
            || lookup(ENV_SAVE_HANDLER).is_some_and(|v| v == "cluster");

        Self {
            encoding_scheme,
            expected_length,
            cluster_mode,
        }
    }

    /// Strict length parse: only non-negative integers are accepted.
    pub fn try_parse_length(raw: &str) -> Result<usize, ConfigError> {
        raw.trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidLength(raw.to_string()))
    }

    /// Parses a length setting; non-numeric or negative values become 0.
    pub fn parse_length(raw: &str) -> usize {
        Self::try_parse_length(raw).unwrap_or_else(|err| {
            warn!(error = %err, "treating session id length as 0");
            0
        })
    }

    /// Returns a copy with a different encoding scheme.
    #[must_use]
    pub const fn with_encoding_scheme(mut self, encoding_scheme: EncodingScheme) -> Self {
        self.encoding_scheme = encoding_scheme;
        self
    }

    /// Returns a copy with a different expected length.
    #[must_use]
    pub const fn with_expected_length(mut self, expected_length: usize) -> Self {
        self.expected_length = expected_length;
        self
    }

    /// Returns a copy with cluster mode toggled.
    #[must_use]
    pub const fn with_cluster_mode(mut self, cluster_mode: bool) -> Self {
        self.cluster_mode = cluster_mode;
        self
    }
}

/// Length as it may appear in a config file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLength {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

fn deserialize_length<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let length = match RawLength::deserialize(deserializer)? {
        RawLength::Unsigned(n) => SessionIdConfig::parse_length(&n.to_string()),
        RawLength::Signed(n) => SessionIdConfig::parse_length(&n.to_string()),
        RawLength::Float(n) => SessionIdConfig::parse_length(&n.to_string()),
        RawLength::Text(raw) => SessionIdConfig::parse_length(&raw),
    };
    Ok(length)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_empty_lookup_uses_defaults() {
        let config = SessionIdConfig::from_lookup(|_| None);
        assert_eq!(config, SessionIdConfig::default());
        assert_eq!(config.encoding_scheme, EncodingScheme::Base32);
        assert_eq!(config.expected_length, DEFAULT_LENGTH);
        assert!(!config.cluster_mode);
    }

    #[test]
    fn test_lookup_reads_all_values() {
        let config = SessionIdConfig::from_lookup(lookup_from(&[
            (ENV_BITS_PER_CHARACTER, "6"),
            (ENV_LENGTH, "48"),
            (ENV_CLUSTER_MODE, "true"),
        ]));
        assert_eq!(config.encoding_scheme, EncodingScheme::Base64);
        assert_eq!(config.expected_length, 48);
        assert!(config.cluster_mode);
    }

    #[test]
    fn test_unknown_bits_default_to_base32() {
        let config = SessionIdConfig::from_lookup(lookup_from(&[(ENV_BITS_PER_CHARACTER, "8")]));
        assert_eq!(config.encoding_scheme, EncodingScheme::Base32);
    }

    #[test]
    fn test_malformed_length_is_zero() {
        for raw in ["abc", "-5", "", "2.5"] {
            let config = SessionIdConfig::from_lookup(lookup_from(&[(ENV_LENGTH, raw)]));
            assert_eq!(config.expected_length, 0, "length {raw:?}");
        }
    }

    #[test]
    fn test_cluster_save_handler_enables_cluster_mode() {
        let config = SessionIdConfig::from_lookup(lookup_from(&[(ENV_SAVE_HANDLER, "cluster")]));
        assert!(config.cluster_mode);

        let config = SessionIdConfig::from_lookup(lookup_from(&[(ENV_SAVE_HANDLER, "files")]));
        assert!(!config.cluster_mode);
    }

    #[test]
    fn test_builders() {
        let config = SessionIdConfig::default()
            .with_encoding_scheme(EncodingScheme::Hex)
            .with_expected_length(24)
            .with_cluster_mode(true);
        assert_eq!(config, SessionIdConfig::new(EncodingScheme::Hex, 24, true));
    }

    #[test]
    fn test_json_roundtrip_and_defaults() {
        let config = SessionIdConfig::new(EncodingScheme::Hex, 40, true);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"bits_per_character\":4"));
        let parsed: SessionIdConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let partial: SessionIdConfig = serde_json::from_str(r#"{"cluster_mode":true}"#).unwrap();
        assert_eq!(partial, SessionIdConfig::default().with_cluster_mode(true));
    }

    #[test]
    fn test_json_malformed_length_is_zero() {
        for json in [
            r#"{"expected_length":-5}"#,
            r#"{"expected_length":"abc"}"#,
            r#"{"expected_length":""}"#,
            r#"{"expected_length":2.5}"#,
        ] {
            let config: SessionIdConfig = serde_json::from_str(json).unwrap();
            assert_eq!(config.expected_length, 0, "config {json}");
        }

        let config: SessionIdConfig = serde_json::from_str(r#"{"expected_length":"26"}"#).unwrap();
        assert_eq!(config.expected_length, 26);
        let config: SessionIdConfig = serde_json::from_str(r#"{"expected_length":26}"#).unwrap();
        assert_eq!(config.expected_length, 26);
    }

    #[test]
    fn test_try_parse_length_is_strict() {
        assert_eq!(SessionIdConfig::try_parse_length(" 26 "), Ok(26));
        assert_eq!(SessionIdConfig::try_parse_length("0"), Ok(0));
        for raw in ["-1", "abc", "", "2.5"] {
            let err = SessionIdConfig::try_parse_length(raw).unwrap_err();
            assert_eq!(err, ConfigError::InvalidLength(raw.to_string()));
            assert!(!err.is_scheme_error());
        }
    }
}
