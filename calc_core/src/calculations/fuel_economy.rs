//! # Fuel Economy
//!
//! Fuel economy is a reciprocal quantity when expressed as L/100km, so it
//! cannot live in the multiplicative unit tables. Every unit here converts
//! through kilometers per liter, using the shared mile and gallon constants.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::fuel_economy::{convert_fuel_economy, FuelEconomyUnit};
//!
//! let l_per_100km = convert_fuel_economy(30.0, FuelEconomyUnit::Mpg, FuelEconomyUnit::LPer100Km).unwrap();
//! assert!((l_per_100km - 7.84).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{l_per_100km_to_mpg, mpg_to_l_per_100km};
use crate::errors::CalcResult;

use super::require_positive;

/// Ways of expressing fuel economy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelEconomyUnit {
    /// Miles per US gallon
    #[serde(rename = "mpg")]
    Mpg,
    /// Liters per 100 kilometers
    #[serde(rename = "l_per_100km")]
    LPer100Km,
    /// Kilometers per liter
    #[serde(rename = "km_per_l")]
    KmPerL,
}

impl FuelEconomyUnit {
    /// All fuel economy units for UI selection
    pub const ALL: [FuelEconomyUnit; 3] = [
        FuelEconomyUnit::Mpg,
        FuelEconomyUnit::LPer100Km,
        FuelEconomyUnit::KmPerL,
    ];

    /// Short code used in JSON and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            FuelEconomyUnit::Mpg => "mpg",
            FuelEconomyUnit::LPer100Km => "l_per_100km",
            FuelEconomyUnit::KmPerL => "km_per_l",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FuelEconomyUnit::Mpg => "Miles per Gallon (mpg)",
            FuelEconomyUnit::LPer100Km => "Liters per 100 km (L/100km)",
            FuelEconomyUnit::KmPerL => "Kilometers per Liter (km/L)",
        }
    }

    /// Look up a unit by its exact code
    pub fn from_code(code: &str) -> Option<Self> {
        FuelEconomyUnit::ALL.into_iter().find(|u| u.code() == code)
    }

    /// Express `value` of this unit as kilometers per liter
    pub fn to_km_per_l(&self, value: f64) -> f64 {
        match self {
            FuelEconomyUnit::Mpg => 100.0 / mpg_to_l_per_100km(value),
            FuelEconomyUnit::LPer100Km => 100.0 / value,
            FuelEconomyUnit::KmPerL => value,
        }
    }

    /// Express `km_per_l` in this unit
    pub fn from_km_per_l(&self, km_per_l: f64) -> f64 {
        match self {
            FuelEconomyUnit::Mpg => l_per_100km_to_mpg(100.0 / km_per_l),
            FuelEconomyUnit::LPer100Km => 100.0 / km_per_l,
            FuelEconomyUnit::KmPerL => km_per_l,
        }
    }
}

impl std::fmt::Display for FuelEconomyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Convert a fuel economy figure between units.
///
/// Unlike the unit engine this validates its input: zero or negative
/// economy has no reciprocal.
pub fn convert_fuel_economy(value: f64, from: FuelEconomyUnit, to: FuelEconomyUnit) -> CalcResult<f64> {
    require_positive("fuel_economy", value)?;
    let converted = match (from, to) {
        _ if from == to => value,
        (FuelEconomyUnit::Mpg, FuelEconomyUnit::LPer100Km) => mpg_to_l_per_100km(value),
        (FuelEconomyUnit::LPer100Km, FuelEconomyUnit::Mpg) => l_per_100km_to_mpg(value),
        _ => to.from_km_per_l(from.to_km_per_l(value)),
    };
    Ok(converted)
}

/// Liters of fuel needed to cover `distance_km` at `km_per_l`.
pub(crate) fn fuel_used_liters(distance_km: f64, km_per_l: f64) -> f64 {
    distance_km / km_per_l
}
