//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tariff
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{TariffBookMetadata, TariffConfig, TariffsFile};

/// Loads and provides access to a tariff book.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates them once and then serves read-only lookups for the lifetime
/// of the process.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/transnet_2024_25/
/// ├── tariff_book.yaml  # Book metadata (issuer, edition, currency)
/// └── tariffs.yaml      # Rates per tariff category
/// ```
///
/// # Example
///
/// ```no_run
/// use port_tariff_engine::config::ConfigLoader;
/// use port_tariff_engine::models::Port;
///
/// let loader = ConfigLoader::load("./config/transnet_2024_25").unwrap();
/// let pilotage = loader.config().pilotage_rate(Port::Durban).unwrap();
/// println!("Durban pilotage base fee: R{}", pilotage.base_fee);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TariffConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - A port has no rate in a port-specific category, or a rate is
    ///   negative (`ConfigValidation`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TariffBookMetadata>(&path.join("tariff_book.yaml"))?;
        let tariffs = Self::load_yaml::<TariffsFile>(&path.join("tariffs.yaml"))?;

        let config = TariffConfig::new(metadata, tariffs.tariffs)?;
        debug!(
            edition = %config.metadata().edition,
            path = %path.display(),
            "Loaded tariff book"
        );

        Ok(Self { config })
    }

    /// Builds a loader from in-memory YAML documents.
    ///
    /// Applies the same validation as [`ConfigLoader::load`].
    pub fn from_yaml_str(tariff_book: &str, tariffs: &str) -> EngineResult<Self> {
        let metadata = Self::parse_yaml::<TariffBookMetadata>(tariff_book, "tariff_book.yaml")?;
        let tariffs = Self::parse_yaml::<TariffsFile>(tariffs, "tariffs.yaml")?;

        Ok(Self {
            config: TariffConfig::new(metadata, tariffs.tariffs)?,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&content, &path_str)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, path: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the underlying tariff configuration.
    pub fn config(&self) -> &TariffConfig {
        &self.config
    }
}
