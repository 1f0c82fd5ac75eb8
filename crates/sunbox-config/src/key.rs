use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigurationError;

/// Environment variable consulted for the signing key when a profile does
/// not carry one inline. A profile specific variable of the form
/// `TRON_PRIVATE_KEY_<PROFILE>` takes precedence.
pub const PRIVATE_KEY_ENV: &str = "TRON_PRIVATE_KEY";

/// A secp256k1 signing key authorizing deployment transactions.
///
/// Parsed from the 64 character hex encoding TRON tooling uses. `Debug` and
/// `Display` are redacted so the key cannot leak through logs; callers that
/// hand the key to the signer go through [`PrivateKey::reveal`].
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Parses a key from its hex encoding.
    pub fn from_hex(hex_str: &str) -> Result<Self, ConfigurationError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|_| {
            ConfigurationError::InvalidKeyMaterial("expected hex encoded key material".to_string())
        })?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| {
            ConfigurationError::InvalidKeyMaterial("expected exactly 32 bytes".to_string())
        })?;
        if bytes.iter().all(|b| *b == 0) {
            return Err(ConfigurationError::InvalidKeyMaterial(
                "key is all zero".to_string(),
            ));
        }
        Ok(PrivateKey(bytes))
    }

    /// Resolves a key for `profile` from the process environment, preferring
    /// the profile specific variable over the shared one.
    pub fn from_env(profile: &str) -> Result<Self, ConfigurationError> {
        let profile_var = Self::profile_env_var(profile);
        if let Ok(value) = env::var(&profile_var) {
            return Self::from_hex(&value);
        }
        match env::var(PRIVATE_KEY_ENV) {
            Ok(value) => Self::from_hex(&value),
            Err(_) => Err(ConfigurationError::MissingSigningKey(format!(
                "{} or {}",
                profile_var, PRIVATE_KEY_ENV
            ))),
        }
    }

    /// Returns the environment variable name holding the key for `profile`.
    pub fn profile_env_var(profile: &str) -> String {
        let suffix: String = profile
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}_{}", PRIVATE_KEY_ENV, suffix)
    }

    /// Re-encodes the key as lowercase hex for handoff to the external
    /// deployment tool.
    pub fn reveal(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for PrivateKey {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(<redacted>)")
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted>")
    }
}

impl Serialize for PrivateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.reveal())
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        PrivateKey::from_hex(&encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "1111111111111111111111111111111111111111111111111111111111111111";

    #[test]
    fn test_parse_valid_hex() {
        let key = PrivateKey::from_hex(TEST_KEY).unwrap();
        assert_eq!(key.reveal(), TEST_KEY);
    }

    #[test]
    fn test_reject_short_key() {
        assert!(PrivateKey::from_hex("abcdef").is_err());
    }

    #[test]
    fn test_reject_non_hex() {
        let junk = "zz".repeat(32);
        assert!(PrivateKey::from_hex(&junk).is_err());
    }

    #[test]
    fn test_reject_zero_key() {
        let zero = "00".repeat(32);
        assert!(PrivateKey::from_hex(&zero).is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = PrivateKey::from_hex(TEST_KEY).unwrap();
        let printed = format!("{:?} {}", key, key);
        assert!(!printed.contains("1111"));
    }

    #[test]
    fn test_profile_env_var_name() {
        assert_eq!(
            PrivateKey::profile_env_var("development"),
            "TRON_PRIVATE_KEY_DEVELOPMENT"
        );
        assert_eq!(
            PrivateKey::profile_env_var("shasta-ci"),
            "TRON_PRIVATE_KEY_SHASTA_CI"
        );
    }
}
