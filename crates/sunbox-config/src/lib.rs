//! sunbox-config crate
//!
//! This crate handles the deployment configuration functionality for the
//! Sunbox toolchain: typed network profiles, compiler settings and signing
//! key resolution for deploying contracts to a TRON network.

pub mod compiler;
pub mod configuration_exporter;
pub mod error;
pub mod key;
pub mod network;

pub use compiler::{CompilersConfig, EvmVersion, OptimizerConfig, SolcConfig, SolcSettings};
pub use configuration_exporter::{ConfigurationExporter, DeploymentConfig, CONFIG_PATH_ENV};
pub use error::ConfigurationError;
pub use key::{PrivateKey, PRIVATE_KEY_ENV};
pub use network::{KnownNetwork, NetworkConfig, KNOWN_NETWORKS};
