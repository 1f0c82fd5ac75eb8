use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::compiler::{CompilersConfig, SolcSettings};
use crate::error::ConfigurationError;
use crate::network::NetworkConfig;

/// Environment variable naming the configuration file to load.
pub const CONFIG_PATH_ENV: &str = "SUNBOX_CONFIG";

/// Prefix for environment overrides layered over the file source, e.g.
/// `SUNBOX_NETWORKS__DEVELOPMENT__FEE_LIMIT`.
const ENV_PREFIX: &str = "SUNBOX";

/// The deployment configuration record handed to the external tool.
///
/// Immutable once loaded: constructed at process start, held for the
/// duration of a deployment run, discarded on exit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeploymentConfig {
    /// Network profiles keyed by environment name, e.g. "development".
    pub networks: BTreeMap<String, NetworkConfig>,
    #[serde(default)]
    pub compilers: CompilersConfig,
    #[serde(default)]
    pub solc: SolcSettings,
}

impl DeploymentConfig {
    /// Validates the record for structural consistency.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.networks.is_empty() {
            return Err(ConfigurationError::validation(
                "networks",
                "at least one network profile is required",
            ));
        }
        for (name, network) in &self.networks {
            network.validate(name)?;
        }
        self.compilers.solc.validate()?;
        self.solc.validate()?;
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct ConfigurationExporter {
    pub config: DeploymentConfig,
}

impl TryFrom<Config> for ConfigurationExporter {
    type Error = ConfigurationError;

    fn try_from(source: Config) -> Result<Self, Self::Error> {
        let config: DeploymentConfig = source.try_deserialize()?;
        config.validate()?;
        Ok(ConfigurationExporter { config })
    }
}

impl Default for ConfigurationExporter {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert("development".to_string(), NetworkConfig::shasta());
        ConfigurationExporter {
            config: DeploymentConfig {
                networks,
                compilers: CompilersConfig::default(),
                solc: SolcSettings::default(),
            },
        }
    }
}

impl ConfigurationExporter {
    /// Builds the configuration from the file named by `SUNBOX_CONFIG`,
    /// layered with `SUNBOX_*` environment overrides. A `.env` file in the
    /// working directory is loaded first when one is present.
    pub fn new() -> Result<Self, ConfigurationError> {
        dotenvy::dotenv().ok();

        let config_path = env::var(CONFIG_PATH_ENV)
            .map_err(|_| ConfigurationError::MissingEnvVar(CONFIG_PATH_ENV))?;

        Config::builder()
            .add_source(File::with_name(&config_path).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    // Without this the config crate reuses `separator` for
                    // the prefix too, expecting `SUNBOX__NETWORKS...`.
                    .prefix_separator("_")
                    .separator("__")
                    // Env values arrive as strings; numeric fields such as
                    // fee_limit need them parsed.
                    .try_parsing(true),
            )
            .build()?
            .try_into()
    }

    /// Loads the configuration from a TOML file, overriding current settings.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigurationError> {
        let contents = fs::read_to_string(path)?;
        let config: DeploymentConfig = toml::from_str(&contents)?;
        config.validate()?;
        log::debug!(
            "loaded deployment configuration ({} network profiles)",
            config.networks.len()
        );
        self.config = config;
        Ok(())
    }

    /// Selects a network profile by environment name.
    pub fn network(&self, name: &str) -> Result<&NetworkConfig, ConfigurationError> {
        self.config
            .networks
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownProfile(name.to_string()))
    }

    /// Renders the nested mapping the external deployment tool reads by
    /// key name.
    pub fn to_json(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::EvmVersion;

    #[test]
    fn test_default_development_profile() {
        let exporter = ConfigurationExporter::default();
        let network = exporter.network("development").unwrap();
        assert_eq!(network.network_id, "2");
        assert_eq!(network.fee_limit, 100_000_000);
        assert_eq!(network.user_fee_percentage, 100);
        assert_eq!(network.full_host, "https://api.shasta.trongrid.io");
        assert_eq!(exporter.config.compilers.solc.version, "0.8.0");
        assert!(exporter.config.solc.optimizer.enabled);
        assert_eq!(exporter.config.solc.optimizer.runs, 200);
        assert_eq!(exporter.config.solc.evm_version, EvmVersion::Istanbul);
        assert!(exporter.config.validate().is_ok());
    }

    #[test]
    fn test_unknown_profile_is_an_error() {
        let exporter = ConfigurationExporter::default();
        let err = exporter.network("staging").unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownProfile(_)));
    }

    #[test]
    fn test_empty_networks_rejected() {
        let config = DeploymentConfig {
            networks: BTreeMap::new(),
            compilers: CompilersConfig::default(),
            solc: SolcSettings::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_export_exposes_keys_by_name() {
        let exporter = ConfigurationExporter::default();
        let json = exporter.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["networks"]["development"]["network_id"], "2");
        assert_eq!(value["compilers"]["solc"]["version"], "0.8.0");
        assert_eq!(value["solc"]["optimizer"]["runs"], 200);
        assert_eq!(value["solc"]["evm_version"], "istanbul");
    }

    #[test]
    fn test_toml_round_trip_is_identity() {
        let exporter = ConfigurationExporter::default();
        let rendered = toml::to_string(&exporter.config).unwrap();
        let reparsed: DeploymentConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(exporter.config, reparsed);
    }
}
