//! # Carbon Footprint
//!
//! Tailpipe CO₂ for a trip: fuel burned times the per-gallon emission
//! factor from [`crate::constants`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    CO2_KG_PER_GALLON_DIESEL, CO2_KG_PER_GALLON_GASOLINE, CO2_LB_PER_GALLON_DIESEL,
    CO2_LB_PER_GALLON_GASOLINE,
};
use crate::convert::convert_linear;
use crate::errors::CalcResult;
use crate::units::{LengthUnit, VolumeUnit};

use super::fuel_economy::{fuel_used_liters, FuelEconomyUnit};
use super::{require_non_negative, require_positive};

/// Liquid fuels with a known CO₂ emission factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    #[default]
    Gasoline,
    Diesel,
}

impl FuelType {
    /// All fuel types for UI selection
    pub const ALL: [FuelType; 2] = [FuelType::Gasoline, FuelType::Diesel];

    /// Kilograms of CO₂ per US gallon burned
    pub fn co2_kg_per_gallon(&self) -> f64 {
        match self {
            FuelType::Gasoline => CO2_KG_PER_GALLON_GASOLINE,
            FuelType::Diesel => CO2_KG_PER_GALLON_DIESEL,
        }
    }

    /// Pounds of CO₂ per US gallon burned
    pub fn co2_lb_per_gallon(&self) -> f64 {
        match self {
            FuelType::Gasoline => CO2_LB_PER_GALLON_GASOLINE,
            FuelType::Diesel => CO2_LB_PER_GALLON_DIESEL,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gasoline" | "petrol" | "gas" => Some(FuelType::Gasoline),
            "diesel" => Some(FuelType::Diesel),
            _ => None,
        }
    }
}

/// Input parameters for a trip's CO₂ emissions.
///
/// ## JSON Example
///
/// ```json
/// {
///   "distance": 1000.0,
///   "distance_unit": "mi",
///   "fuel_economy": 25.0,
///   "fuel_economy_unit": "mpg",
///   "fuel_type": "gasoline"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonFootprintInput {
    /// Distance driven
    pub distance: f64,

    /// Unit of `distance`
    pub distance_unit: LengthUnit,

    /// Vehicle fuel economy
    pub fuel_economy: f64,

    /// Unit of `fuel_economy`
    pub fuel_economy_unit: FuelEconomyUnit,

    /// Fuel burned
    #[serde(default)]
    pub fuel_type: FuelType,
}

impl CarbonFootprintInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("distance", self.distance)?;
        require_positive("fuel_economy", self.fuel_economy)?;
        Ok(())
    }
}

/// Results from a carbon footprint calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonFootprintResult {
    /// Fuel burned, US gallons
    pub fuel_used_gal: f64,

    /// CO₂ emitted, kilograms
    pub co2_kg: f64,

    /// CO₂ emitted, pounds
    pub co2_lb: f64,
}

/// Calculate CO₂ emitted over a trip.
pub fn calculate(input: &CarbonFootprintInput) -> CalcResult<CarbonFootprintResult> {
    input.validate()?;

    let distance_km = convert_linear(input.distance, input.distance_unit, LengthUnit::Kilometer);
    let km_per_l = input.fuel_economy_unit.to_km_per_l(input.fuel_economy);
    let fuel_used_gal = convert_linear(
        fuel_used_liters(distance_km, km_per_l),
        VolumeUnit::Liter,
        VolumeUnit::Gallon,
    );

    let co2_kg = fuel_used_gal * input.fuel_type.co2_kg_per_gallon();

    debug!(fuel_used_gal, co2_kg, fuel = ?input.fuel_type, "carbon footprint calculated");

    Ok(CarbonFootprintResult {
        fuel_used_gal,
        co2_kg,
        co2_lb: fuel_used_gal * input.fuel_type.co2_lb_per_gallon(),
    })
}
