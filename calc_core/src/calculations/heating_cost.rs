//! # Heating Cost
//!
//! Annual cost to deliver a heat load with a given fuel and system
//! efficiency. Energy units all convert through BTU using the shared
//! constants, so the same kWh/therm figures back every calculator.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::heating_cost::{calculate, EnergyUnit, HeatingCostInput, HeatingFuel};
//!
//! let input = HeatingCostInput {
//!     heat_load: 800.0,
//!     heat_load_unit: EnergyUnit::Therm,
//!     fuel: HeatingFuel::NaturalGas,
//!     efficiency_percent: 80.0,
//!     price_per_unit: 1.25,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.fuel_units - 1000.0).abs() < 1e-9);
//! assert!((result.annual_cost - 1250.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{BTU_PER_GALLON_HEATING_OIL, BTU_PER_GALLON_PROPANE, BTU_PER_KWH, BTU_PER_THERM};
use crate::errors::CalcResult;

use super::{require_non_negative, require_percent};

/// Heat pumps deliver more heat than the electricity they draw (COP > 1)
const MAX_ELECTRIC_EFFICIENCY_PERCENT: f64 = 500.0;
const MAX_COMBUSTION_EFFICIENCY_PERCENT: f64 = 100.0;

/// BTU per million, for the normalized price comparison
const MILLION_BTU: f64 = 1_000_000.0;

/// Units a heat load can be given in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyUnit {
    Btu,
    Kwh,
    Therm,
}

impl EnergyUnit {
    /// All energy units for UI selection
    pub const ALL: [EnergyUnit; 3] = [EnergyUnit::Btu, EnergyUnit::Kwh, EnergyUnit::Therm];

    /// BTU per one of this unit
    pub fn btu(&self) -> f64 {
        match self {
            EnergyUnit::Btu => 1.0,
            EnergyUnit::Kwh => BTU_PER_KWH,
            EnergyUnit::Therm => BTU_PER_THERM,
        }
    }

    /// Short code used in JSON and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            EnergyUnit::Btu => "btu",
            EnergyUnit::Kwh => "kwh",
            EnergyUnit::Therm => "therm",
        }
    }

    /// Look up a unit by its exact code
    pub fn from_code(code: &str) -> Option<Self> {
        EnergyUnit::ALL.into_iter().find(|u| u.code() == code)
    }
}

/// Heating fuels and the unit each is sold in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatingFuel {
    /// Sold per therm
    NaturalGas,
    /// Sold per gallon
    Propane,
    /// Sold per gallon
    HeatingOil,
    /// Sold per kWh
    Electricity,
}

impl HeatingFuel {
    /// All fuels for UI selection
    pub const ALL: [HeatingFuel; 4] = [
        HeatingFuel::NaturalGas,
        HeatingFuel::Propane,
        HeatingFuel::HeatingOil,
        HeatingFuel::Electricity,
    ];

    /// Heat content of one sales unit, BTU
    pub fn btu_per_unit(&self) -> f64 {
        match self {
            HeatingFuel::NaturalGas => BTU_PER_THERM,
            HeatingFuel::Propane => BTU_PER_GALLON_PROPANE,
            HeatingFuel::HeatingOil => BTU_PER_GALLON_HEATING_OIL,
            HeatingFuel::Electricity => BTU_PER_KWH,
        }
    }

    /// Code of the unit the fuel is priced in
    pub fn sales_unit(&self) -> &'static str {
        match self {
            HeatingFuel::NaturalGas => "therm",
            HeatingFuel::Propane | HeatingFuel::HeatingOil => "gal",
            HeatingFuel::Electricity => "kwh",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            HeatingFuel::NaturalGas => "Natural Gas",
            HeatingFuel::Propane => "Propane",
            HeatingFuel::HeatingOil => "Heating Oil",
            HeatingFuel::Electricity => "Electricity",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "natural_gas" | "gas" | "naturalgas" => Some(HeatingFuel::NaturalGas),
            "propane" | "lpg" => Some(HeatingFuel::Propane),
            "heating_oil" | "oil" | "heatingoil" => Some(HeatingFuel::HeatingOil),
            "electricity" | "electric" => Some(HeatingFuel::Electricity),
            _ => None,
        }
    }

    fn max_efficiency_percent(&self) -> f64 {
        match self {
            HeatingFuel::Electricity => MAX_ELECTRIC_EFFICIENCY_PERCENT,
            _ => MAX_COMBUSTION_EFFICIENCY_PERCENT,
        }
    }
}

/// Input parameters for annual heating cost.
///
/// ## JSON Example
///
/// ```json
/// {
///   "heat_load": 60000000.0,
///   "heat_load_unit": "btu",
///   "fuel": "propane",
///   "efficiency_percent": 92.0,
///   "price_per_unit": 2.80
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatingCostInput {
    /// Heat the building needs over the season
    pub heat_load: f64,

    /// Unit of `heat_load`
    pub heat_load_unit: EnergyUnit,

    /// Fuel burned (or electricity drawn)
    pub fuel: HeatingFuel,

    /// Seasonal efficiency, percent. Up to 500 for electric heat pumps.
    pub efficiency_percent: f64,

    /// Price per fuel sales unit (see [`HeatingFuel::sales_unit`])
    pub price_per_unit: f64,
}

impl HeatingCostInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("heat_load", self.heat_load)?;
        require_percent(
            "efficiency_percent",
            self.efficiency_percent,
            self.fuel.max_efficiency_percent(),
        )?;
        require_non_negative("price_per_unit", self.price_per_unit)?;
        Ok(())
    }
}

/// Results from a heating cost calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatingCostResult {
    /// Fuel consumed, in the fuel's sales unit
    pub fuel_units: f64,

    /// The sales unit of `fuel_units`
    pub fuel_unit: String,

    /// Cost for the season
    pub annual_cost: f64,

    /// Price per million BTU of delivered heat, for comparing fuels
    pub cost_per_million_btu: f64,
}

/// Calculate annual heating cost.
pub fn calculate(input: &HeatingCostInput) -> CalcResult<HeatingCostResult> {
    input.validate()?;

    let efficiency = input.efficiency_percent / 100.0;
    let delivered_btu = input.heat_load * input.heat_load_unit.btu();
    let consumed_btu = delivered_btu / efficiency;
    let btu_per_unit = input.fuel.btu_per_unit();

    let fuel_units = consumed_btu / btu_per_unit;
    let annual_cost = fuel_units * input.price_per_unit;

    debug!(fuel = ?input.fuel, delivered_btu, fuel_units, annual_cost, "heating cost calculated");

    Ok(HeatingCostResult {
        fuel_units,
        fuel_unit: input.fuel.sales_unit().to_string(),
        annual_cost,
        cost_per_million_btu: input.price_per_unit / (btu_per_unit * efficiency) * MILLION_BTU,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propane() {
        let input = HeatingCostInput {
            heat_load: 60_000_000.0,
            heat_load_unit: EnergyUnit::Btu,
            fuel: HeatingFuel::Propane,
            efficiency_percent: 90.0,
            price_per_unit: 2.50,
        };
        let result = calculate(&input).unwrap();

        // 60M / 0.9 / 91452 = 728.98 gal
        assert!((result.fuel_units - 728.98).abs() < 0.01);
        assert_eq!(result.fuel_unit, "gal");
        assert!((result.annual_cost - 1822.45).abs() < 0.01);
    }

    #[test]
    fn test_heat_pump_efficiency() {
        let input = HeatingCostInput {
            heat_load: 10_000.0,
            heat_load_unit: EnergyUnit::Kwh,
            fuel: HeatingFuel::Electricity,
            efficiency_percent: 300.0,
            price_per_unit: 0.15,
        };
        let result = calculate(&input).unwrap();
        assert!((result.fuel_units - 3333.333).abs() < 0.001);
        assert!((result.annual_cost - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_combustion_efficiency_capped() {
        let input = HeatingCostInput {
            heat_load: 100.0,
            heat_load_unit: EnergyUnit::Therm,
            fuel: HeatingFuel::NaturalGas,
            efficiency_percent: 150.0,
            price_per_unit: 1.0,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_cost_per_million_btu() {
        let input = HeatingCostInput {
            heat_load: 1.0,
            heat_load_unit: EnergyUnit::Therm,
            fuel: HeatingFuel::NaturalGas,
            efficiency_percent: 100.0,
            price_per_unit: 1.0,
        };
        let result = calculate(&input).unwrap();
        // $1/therm at 100% = $10 per million BTU
        assert!((result.cost_per_million_btu - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_fuel_parsing() {
        assert_eq!(HeatingFuel::from_str_flexible("Natural Gas"), Some(HeatingFuel::NaturalGas));
        assert_eq!(HeatingFuel::from_str_flexible("heating-oil"), Some(HeatingFuel::HeatingOil));
        assert_eq!(HeatingFuel::from_str_flexible("wood"), None);
    }

    #[test]
    fn test_fuel_json_codes() {
        assert_eq!(serde_json::to_string(&HeatingFuel::NaturalGas).unwrap(), r#""natural_gas""#);
        let fuel: HeatingFuel = serde_json::from_str(r#""heating_oil""#).unwrap();
        assert_eq!(fuel, HeatingFuel::HeatingOil);
        assert_eq!(HeatingFuel::Electricity.sales_unit(), EnergyUnit::Kwh.code());
    }
}
