//! # Shared Constants
//!
//! One authoritative value per physical constant for every calculator.
//! Anything expressible through the unit tables is derived from them, so a
//! calculator can never disagree with the unit converter.
//!
//! ## Sources
//!
//! - CO₂ per gallon: US EPA, 8,887 g (gasoline) and 10,180 g (diesel)
//! - Gasoline energy content for MPGe: US EPA, 33.7 kWh per gallon
//! - Propane and heating oil heat content: US EIA
//!
//! ## Example
//!
//! ```rust
//! use calc_core::constants::{mpg_to_l_per_100km, CO2_LB_PER_GALLON_GASOLINE};
//!
//! assert!((mpg_to_l_per_100km(30.0) - 7.84).abs() < 0.01);
//! assert!((CO2_LB_PER_GALLON_GASOLINE - 19.59).abs() < 0.01);
//! ```

use crate::units::{LengthUnit, VolumeUnit, WeightUnit};

// ============================================================================
// Derived from the unit tables
// ============================================================================

/// Liters per US gallon
pub const LITERS_PER_GALLON: f64 = VolumeUnit::Gallon.base_factor() / VolumeUnit::Liter.base_factor();

/// Kilometers per mile
pub const KM_PER_MILE: f64 = LengthUnit::Mile.base_factor() / LengthUnit::Kilometer.base_factor();

/// Kilograms per pound
pub const KG_PER_POUND: f64 = WeightUnit::Pound.base_factor() / WeightUnit::Kilogram.base_factor();

/// `l/100km = MPG_TO_L_PER_100KM / mpg` (and the reverse)
pub const MPG_TO_L_PER_100KM: f64 = 100.0 * LITERS_PER_GALLON / KM_PER_MILE;

// ============================================================================
// Energy
// ============================================================================

/// BTU per kilowatt-hour
pub const BTU_PER_KWH: f64 = 3412.14;

/// BTU per therm
pub const BTU_PER_THERM: f64 = 100_000.0;

/// Energy in one gallon of gasoline, used for MPGe
pub const KWH_PER_GALLON_GASOLINE: f64 = 33.7;

/// Heat content of one gallon of propane
pub const BTU_PER_GALLON_PROPANE: f64 = 91_452.0;

/// Heat content of one gallon of No. 2 heating oil
pub const BTU_PER_GALLON_HEATING_OIL: f64 = 138_500.0;

// ============================================================================
// Emissions
// ============================================================================

/// CO₂ from burning one gallon of gasoline
pub const CO2_KG_PER_GALLON_GASOLINE: f64 = 8.887;

/// CO₂ from burning one gallon of diesel
pub const CO2_KG_PER_GALLON_DIESEL: f64 = 10.180;

/// CO₂ from burning one gallon of gasoline, in pounds (≈ 19.59)
pub const CO2_LB_PER_GALLON_GASOLINE: f64 = CO2_KG_PER_GALLON_GASOLINE / KG_PER_POUND;

/// CO₂ from burning one gallon of diesel, in pounds (≈ 22.44)
pub const CO2_LB_PER_GALLON_DIESEL: f64 = CO2_KG_PER_GALLON_DIESEL / KG_PER_POUND;

// ============================================================================
// Reciprocal fuel economy
// ============================================================================

/// Miles per US gallon to liters per 100 km. Zero maps to infinity.
pub fn mpg_to_l_per_100km(mpg: f64) -> f64 {
    MPG_TO_L_PER_100KM / mpg
}

/// Liters per 100 km to miles per US gallon. Zero maps to infinity.
pub fn l_per_100km_to_mpg(l_per_100km: f64) -> f64 {
    MPG_TO_L_PER_100KM / l_per_100km
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::convert;
    use crate::units::Category;

    #[test]
    fn test_derived_constants_match_engine() {
        assert_eq!(LITERS_PER_GALLON, convert(1.0, Category::Volume, "gal", "l").unwrap());
        assert_eq!(KM_PER_MILE, convert(1.0, Category::Length, "mi", "km").unwrap());
        assert_eq!(KG_PER_POUND, convert(1.0, Category::Weight, "lb", "kg").unwrap());
    }

    #[test]
    fn test_mpg_factor() {
        assert!((MPG_TO_L_PER_100KM - 235.215).abs() < 0.001);
    }

    #[test]
    fn test_fuel_economy_reciprocal() {
        let l = mpg_to_l_per_100km(25.0);
        assert!((l - 9.408).abs() < 0.001);
        assert!((l_per_100km_to_mpg(l) - 25.0).abs() < 1e-9);
        assert!(mpg_to_l_per_100km(0.0).is_infinite());
    }

    #[test]
    fn test_co2_pounds() {
        assert!((CO2_LB_PER_GALLON_GASOLINE - 19.592).abs() < 0.001);
        assert!((CO2_LB_PER_GALLON_DIESEL - 22.443).abs() < 0.001);
    }
}
