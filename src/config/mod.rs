//! Configuration loading and management for the Port Tariff Engine.
//!
//! This module provides functionality to load a tariff book from YAML files,
//! including book metadata and the rates for every tariff category.
//!
//! # Example
//!
//! ```no_run
//! use port_tariff_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/transnet_2024_25").unwrap();
//! println!("Loaded tariff book: {}", loader.config().metadata().edition);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    LightDuesCalculation, LineRunningRate, MAX_RATE, PilotageRate, PortDuesCalculation, PortTable,
    TariffBookMetadata, TariffConfig, TariffSection, Tariffs, TowageRate, VtsDuesCalculation,
    VtsRate, port_rate,
};
