//! Error types for the Port Tariff Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading the tariff book
//! and calculating dues.

use thiserror::Error;

use crate::models::Port;

/// The main error type for the Port Tariff Engine.
///
/// Configuration variants are raised while loading the tariff book;
/// `PortNotConfigured` is the runtime counterpart raised by a per-port rate
/// lookup. Input variants are raised at the boundary when a vessel bundle
/// is constructed.
///
/// # Example
///
/// ```
/// use port_tariff_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tariffs.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tariffs.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The tariff book parsed but is incomplete or inconsistent.
    #[error("Invalid tariff configuration: {message}")]
    ConfigValidation {
        /// A description of the violated rule.
        message: String,
    },

    /// No rate is configured for the port in a port-specific tariff.
    #[error("No {category} rate configured for port '{port}'")]
    PortNotConfigured {
        /// The tariff category that was looked up.
        category: String,
        /// The port that was missing.
        port: Port,
    },

    /// A port name did not match any supported port.
    #[error("Unknown port: {value}")]
    InvalidPort {
        /// The raw value that could not be matched.
        value: String,
    },

    /// A vessel input was missing, non-positive or otherwise unusable.
    #[error("Invalid vessel field '{field}': {message}")]
    InvalidVessel {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/tariffs.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/tariffs.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_port_not_configured_displays_category_and_port() {
        let error = EngineError::PortNotConfigured {
            category: "pilotage_dues".to_string(),
            port: Port::MosselBay,
        };
        assert_eq!(
            error.to_string(),
            "No pilotage_dues rate configured for port 'Mossel_Bay'"
        );
    }

    #[test]
    fn test_invalid_vessel_displays_field_and_message() {
        let error = EngineError::InvalidVessel {
            field: "gt".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid vessel field 'gt': must be greater than zero"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_port() -> EngineResult<()> {
            Err(EngineError::InvalidPort {
                value: "Walvis Bay".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_port()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
