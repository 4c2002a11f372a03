//! Port Tariff Engine for South African ports
//!
//! This crate prices a vessel's call at a Transnet National Ports Authority
//! port: light dues, port dues, VTS dues, pilotage, towage and running of
//! vessel lines, computed from a YAML tariff book with an audit trace for
//! every amount. An HTTP front end accepts either structured particulars or
//! a free-text vessel description, which a language model translates.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod settings;
pub mod telemetry;
