use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigurationError;
use crate::key::PrivateKey;

/// A public TRON network the deployment tool can target out of the box.
pub struct KnownNetwork {
    pub name: &'static str,
    pub full_host: &'static str,
    pub network_id: &'static str,
}

/// Well known public networks and the TronGrid endpoints serving them.
pub static KNOWN_NETWORKS: Lazy<Vec<KnownNetwork>> = Lazy::new(|| {
    vec![
        KnownNetwork {
            name: "mainnet",
            full_host: "https://api.trongrid.io",
            network_id: "1",
        },
        KnownNetwork {
            name: "shasta",
            full_host: "https://api.shasta.trongrid.io",
            network_id: "2",
        },
        KnownNetwork {
            name: "nile",
            full_host: "https://nile.trongrid.io",
            network_id: "3",
        },
    ]
});

impl KnownNetwork {
    /// Looks up a registered public network by name.
    pub fn by_name(name: &str) -> Option<&'static KnownNetwork> {
        KNOWN_NETWORKS.iter().find(|network| network.name == name)
    }
}

/// Connection and fee parameters for a single deployment target.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// The percentage of the resource consumption ratio the deploying
    /// account covers, as opposed to the resource owner.
    pub user_fee_percentage: u8,
    /// The TRX consumption limit for deployment and trigger calls, in SUN.
    pub fee_limit: u64,
    /// Inline signing key. Rejected by validation unless `allow_inline_key`
    /// is set; keys normally arrive through the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<PrivateKey>,
    /// Fullnode endpoint providing chain access.
    pub full_host: String,
    /// Identifier distinguishing which chain instance the endpoint serves.
    pub network_id: String,
    /// Development escape hatch permitting `private_key` in the file itself.
    #[serde(default)]
    pub allow_inline_key: bool,
}

impl NetworkConfig {
    /// A profile targeting the Shasta testnet with the fee settings the
    /// toolchain ships as its development default.
    pub fn shasta() -> Self {
        let shasta = KnownNetwork::by_name("shasta").expect("shasta is registered");
        NetworkConfig {
            user_fee_percentage: 100,
            fee_limit: 100_000_000,
            private_key: None,
            full_host: shasta.full_host.to_string(),
            network_id: shasta.network_id.to_string(),
            allow_inline_key: false,
        }
    }

    /// Validates the profile. `profile` names the entry for error reporting.
    pub fn validate(&self, profile: &str) -> Result<(), ConfigurationError> {
        if self.user_fee_percentage > 100 {
            return Err(ConfigurationError::validation(
                format!("networks.{}.user_fee_percentage", profile),
                "must lie within 0..=100",
            ));
        }
        let host = Url::parse(&self.full_host).map_err(|e| {
            ConfigurationError::validation(format!("networks.{}.full_host", profile), e.to_string())
        })?;
        if host.scheme() != "https" {
            return Err(ConfigurationError::validation(
                format!("networks.{}.full_host", profile),
                format!("scheme must be https, got {}", host.scheme()),
            ));
        }
        if self.network_id.is_empty() {
            return Err(ConfigurationError::validation(
                format!("networks.{}.network_id", profile),
                "must not be empty",
            ));
        }
        if self.private_key.is_some() {
            if !self.allow_inline_key {
                return Err(ConfigurationError::validation(
                    format!("networks.{}.private_key", profile),
                    "inline keys are rejected; supply the key through the environment",
                ));
            }
            log::warn!("network profile `{}` carries an inline signing key", profile);
        }
        Ok(())
    }

    /// Returns the signing key for this profile. Environment injection wins
    /// over an inline key; an inline key is only consulted when the profile
    /// allows one.
    pub fn signing_key(&self, profile: &str) -> Result<PrivateKey, ConfigurationError> {
        match PrivateKey::from_env(profile) {
            Ok(key) => Ok(key),
            Err(ConfigurationError::MissingSigningKey(var)) => {
                if self.allow_inline_key {
                    if let Some(key) = &self.private_key {
                        return Ok(key.clone());
                    }
                }
                Err(ConfigurationError::MissingSigningKey(var))
            }
            Err(e) => Err(e),
        }
    }
}
