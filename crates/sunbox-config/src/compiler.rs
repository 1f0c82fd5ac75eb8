use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Compiler selection for contract builds.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CompilersConfig {
    pub solc: SolcConfig,
}

/// Pins the solc release used for builds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SolcConfig {
    /// Release in `MAJOR.MINOR.PATCH` form, e.g. "0.8.0".
    pub version: String,
}

impl Default for SolcConfig {
    fn default() -> Self {
        SolcConfig {
            version: "0.8.0".to_string(),
        }
    }
}

impl SolcConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut parts = self.version.split('.');
        let well_formed = (0..3).all(|_| {
            parts
                .next()
                .map_or(false, |p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
        }) && parts.next().is_none();
        if !well_formed {
            return Err(ConfigurationError::validation(
                "compilers.solc.version",
                format!("`{}` is not a MAJOR.MINOR.PATCH version", self.version),
            ));
        }
        Ok(())
    }
}

/// Bytecode compatibility profile selected for generated output.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EvmVersion {
    Homestead,
    Byzantium,
    Constantinople,
    Petersburg,
    Istanbul,
}

impl Default for EvmVersion {
    fn default() -> Self {
        EvmVersion::Istanbul
    }
}

impl EvmVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvmVersion::Homestead => "homestead",
            EvmVersion::Byzantium => "byzantium",
            EvmVersion::Constantinople => "constantinople",
            EvmVersion::Petersburg => "petersburg",
            EvmVersion::Istanbul => "istanbul",
        }
    }
}

impl fmt::Display for EvmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optimizer and target settings passed through to solc.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SolcSettings {
    // Scalar field stays ahead of the optimizer table so the record can be
    // rendered back to TOML.
    #[serde(default)]
    pub evm_version: EvmVersion,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

/// solc compiler optimize
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OptimizerConfig {
    /// Toggles the solc optimization pass.
    pub enabled: bool,
    /// Expected invocation count the optimizer tunes for, trading
    /// deployment cost against runtime execution cost.
    pub runs: u32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            enabled: true,
            runs: 200,
        }
    }
}

impl SolcSettings {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.optimizer.enabled && self.optimizer.runs == 0 {
            log::warn!("optimizer enabled with runs = 0; output will not be tuned");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_solc_version_is_valid() {
        assert!(SolcConfig::default().validate().is_ok());
    }

    #[test]
    fn test_reject_partial_version() {
        let solc = SolcConfig {
            version: "0.8".to_string(),
        };
        assert!(solc.validate().is_err());
    }

    #[test]
    fn test_reject_non_numeric_version() {
        for bad in ["latest", "0.8.x", "0.8.0-beta", ""] {
            let solc = SolcConfig {
                version: bad.to_string(),
            };
            assert!(solc.validate().is_err(), "accepted `{}`", bad);
        }
    }

    #[test]
    fn test_evm_version_serde_identifier() {
        let settings: SolcSettings = toml::from_str(
            r#"
            evm_version = "istanbul"

            [optimizer]
            enabled = true
            runs = 200
            "#,
        )
        .unwrap();
        assert_eq!(settings.evm_version, EvmVersion::Istanbul);
        assert_eq!(settings.evm_version.to_string(), "istanbul");
    }

    #[test]
    fn test_settings_default_to_tuned_optimizer() {
        let settings = SolcSettings::default();
        assert!(settings.optimizer.enabled);
        assert_eq!(settings.optimizer.runs, 200);
        assert_eq!(settings.evm_version, EvmVersion::Istanbul);
    }
}
