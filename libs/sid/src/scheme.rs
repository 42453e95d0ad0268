//! Bits-per-character encoding schemes.

use std::str::FromStr;

use crate::ConfigError;

/// How many bits of entropy each identifier character carries.
///
/// Each scheme maps to a fixed ASCII alphabet. Unknown bit counts fall back to
/// [`EncodingScheme::Base32`] in the lenient constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncodingScheme {
    /// 4 bits per character, `0-9a-f`.
    Hex,
    /// 5 bits per character, `0-9a-v`.
    #[default]
    Base32,
    /// 6 bits per character, `0-9A-Za-z-,`.
    Base64,
}

impl EncodingScheme {
    /// Maps a bits-per-character value to a scheme, defaulting to Base32.
    #[must_use]
    pub const fn from_bits(bits: i64) -> Self {
        match bits {
            4 => Self::Hex,
            6 => Self::Base64,
            _ => Self::Base32,
        }
    }

    /// Maps a raw configuration value to a scheme.
    ///
    /// Absent, empty and non-numeric values yield the default scheme.
    #[must_use]
    pub fn from_setting(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(Self::from_bits)
            .unwrap_or_default()
    }

    /// Returns the number of bits each character encodes.
    #[must_use]
    pub const fn bits(&self) -> u8 {
        match self {
            Self::Hex => 4,
            Self::Base32 => 5,
            Self::Base64 => 6,
        }
    }

    /// Returns true if `byte` belongs to this scheme's alphabet.
    #[must_use]
    pub const fn allows(&self, byte: u8) -> bool {
        match self {
            Self::Hex => matches!(byte, b'0'..=b'9' | b'a'..=b'f'),
            Self::Base32 => matches!(byte, b'0'..=b'9' | b'a'..=b'v'),
            Self::Base64 => {
                matches!(byte, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'-' | b',')
            }
        }
    }

    /// Human-readable character class, as it would appear in a pattern.
    #[must_use]
    pub const fn alphabet(&self) -> &'static str {
        match self {
            Self::Hex => "0-9a-f",
            Self::Base32 => "0-9a-v",
            Self::Base64 => "0-9A-Za-z-,",
        }
    }
}

impl std::fmt::Display for EncodingScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl TryFrom<u8> for EncodingScheme {
    type Error = ConfigError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            4 => Ok(Self::Hex),
            5 => Ok(Self::Base32),
            6 => Ok(Self::Base64),
            other => Err(ConfigError::UnsupportedBitsPerCharacter(other.to_string())),
        }
    }
}

impl FromStr for EncodingScheme {
    type Err = ConfigError;

    /// Strict parse: only `4`, `5` and `6` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| ConfigError::UnsupportedBitsPerCharacter(s.to_string()))
            .and_then(Self::try_from)
    }
}

impl serde::Serialize for EncodingScheme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> serde::Deserialize<'de> for EncodingScheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = i64::deserialize(deserializer)?;
        Ok(Self::from_bits(bits))
    }
}
