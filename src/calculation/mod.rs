//! Calculation logic for the Port Tariff Engine.
//!
//! This module contains one calculator per tariff category (light dues,
//! port dues, VTS dues, pilotage, towage and running of vessel lines), the
//! billing unit helpers they share, and the aggregator producing a full
//! assessment for a port call.

mod aggregate;
mod due_result;
mod light_dues;
mod line_running_dues;
mod pilotage_dues;
mod port_dues;
mod towage_dues;
mod units;
mod vts_dues;

pub use aggregate::{ENGINE_VERSION, calculate_all};
pub use due_result::DueResult;
pub use light_dues::calculate_light_dues;
pub use line_running_dues::calculate_line_running_dues;
pub use pilotage_dues::calculate_pilotage_dues;
pub use port_dues::calculate_port_dues;
pub use towage_dues::{
    TowageBracket, TowageTier, calculate_towage_dues, towage_brackets, towage_increment,
    tug_multiplier,
};
pub use units::{ceil_units, gt_block_size, gt_units, round_currency};
pub use vts_dues::calculate_vts_dues;
