//! Domain models for the Port Tariff Engine.
//!
//! This module contains the core data structures used throughout the engine
//! for representing ports, vessels and tariff results.

mod port;
mod tariff_result;
mod vessel;

pub use port::Port;
pub use tariff_result::{
    AuditStep, AuditTrace, DueCategory, TariffAssessment, TariffBreakdown,
};
pub use vessel::{MAX_DAYS_ALONGSIDE, MAX_GROSS_TONNAGE, VesselDescription, VesselParticulars};
