//! # Calculators
//!
//! Small domain calculators built on the unit engine and the shared
//! constants. Each calculator follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! Inputs validate themselves; the unit engine underneath does not.
//!
//! ## Available Calculators
//!
//! - [`fuel_economy`] - mpg / L/100km / km/L conversion
//! - [`fuel_cost`] - Trip fuel cost
//! - [`carbon_footprint`] - Tailpipe CO₂ for a trip
//! - [`ev_range`] - Electric vehicle range and charging cost
//! - [`heating_cost`] - Annual heating fuel cost

pub mod carbon_footprint;
pub mod ev_range;
pub mod fuel_cost;
pub mod fuel_economy;
pub mod heating_cost;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// Re-export commonly used types
pub use carbon_footprint::{CarbonFootprintInput, CarbonFootprintResult, FuelType};
pub use ev_range::{EfficiencyUnit, EvRangeInput, EvRangeResult};
pub use fuel_cost::{FuelCostInput, FuelCostResult};
pub use fuel_economy::{convert_fuel_economy, FuelEconomyUnit};
pub use heating_cost::{EnergyUnit, HeatingCostInput, HeatingCostResult, HeatingFuel};

/// Enum wrapper for all calculator inputs.
///
/// Lets a caller submit any calculation as one JSON document:
///
/// ```json
/// { "type": "FuelCost", "distance": 300.0, "distance_unit": "mi", ... }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculatorInput {
    FuelCost(FuelCostInput),
    CarbonFootprint(CarbonFootprintInput),
    EvRange(EvRangeInput),
    HeatingCost(HeatingCostInput),
}

/// Results matching [`CalculatorInput`] variant for variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculatorOutput {
    FuelCost(FuelCostResult),
    CarbonFootprint(CarbonFootprintResult),
    EvRange(EvRangeResult),
    HeatingCost(HeatingCostResult),
}

impl CalculatorInput {
    /// Get the calculator type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculatorInput::FuelCost(_) => "FuelCost",
            CalculatorInput::CarbonFootprint(_) => "CarbonFootprint",
            CalculatorInput::EvRange(_) => "EvRange",
            CalculatorInput::HeatingCost(_) => "HeatingCost",
        }
    }

    /// Run the wrapped calculation
    pub fn calculate(&self) -> CalcResult<CalculatorOutput> {
        match self {
            CalculatorInput::FuelCost(input) => fuel_cost::calculate(input).map(CalculatorOutput::FuelCost),
            CalculatorInput::CarbonFootprint(input) => {
                carbon_footprint::calculate(input).map(CalculatorOutput::CarbonFootprint)
            }
            CalculatorInput::EvRange(input) => ev_range::calculate(input).map(CalculatorOutput::EvRange),
            CalculatorInput::HeatingCost(input) => {
                heating_cost::calculate(input).map(CalculatorOutput::HeatingCost)
            }
        }
    }
}

/// Reject zero, negative and non-finite values
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
    }
    Ok(())
}

/// Reject negative and non-finite values
pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Cannot be negative"));
    }
    Ok(())
}

/// Reject percentages outside `(0, max]`
pub(crate) fn require_percent(field: &str, value: f64, max: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 || value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Must be greater than 0 and at most {}", max),
        ));
    }
    Ok(())
}
