//! # Fuel Cost
//!
//! Cost of the fuel burned over a trip. Distance, fuel economy and fuel
//! price may each be given in whatever units the caller collected; all
//! scaling goes through the unit engine.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::fuel_cost::{calculate, FuelCostInput};
//! use calc_core::calculations::FuelEconomyUnit;
//! use calc_core::units::{LengthUnit, VolumeUnit};
//!
//! let input = FuelCostInput {
//!     distance: 300.0,
//!     distance_unit: LengthUnit::Mile,
//!     fuel_economy: 30.0,
//!     fuel_economy_unit: FuelEconomyUnit::Mpg,
//!     fuel_price: 3.50,
//!     price_unit: VolumeUnit::Gallon,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.fuel_used_gal - 10.0).abs() < 1e-9);
//! assert!((result.total_cost - 35.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::KM_PER_MILE;
use crate::convert::convert_linear;
use crate::errors::CalcResult;
use crate::units::{LengthUnit, VolumeUnit};

use super::fuel_economy::{fuel_used_liters, FuelEconomyUnit};
use super::{require_non_negative, require_positive};

/// Input parameters for a trip fuel cost.
///
/// ## JSON Example
///
/// ```json
/// {
///   "distance": 300.0,
///   "distance_unit": "mi",
///   "fuel_economy": 30.0,
///   "fuel_economy_unit": "mpg",
///   "fuel_price": 3.5,
///   "price_unit": "gal"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCostInput {
    /// Trip distance
    pub distance: f64,

    /// Unit of `distance`
    pub distance_unit: LengthUnit,

    /// Vehicle fuel economy
    pub fuel_economy: f64,

    /// Unit of `fuel_economy`
    pub fuel_economy_unit: FuelEconomyUnit,

    /// Price per one `price_unit` of fuel
    pub fuel_price: f64,

    /// Volume unit the price is quoted in (e.g. per gallon, per liter)
    pub price_unit: VolumeUnit,
}

impl FuelCostInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("distance", self.distance)?;
        require_positive("fuel_economy", self.fuel_economy)?;
        require_non_negative("fuel_price", self.fuel_price)?;
        Ok(())
    }

    /// Trip distance in kilometers
    pub fn distance_km(&self) -> f64 {
        convert_linear(self.distance, self.distance_unit, LengthUnit::Kilometer)
    }
}

/// Results from a fuel cost calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCostResult {
    /// Fuel burned, liters
    pub fuel_used_l: f64,

    /// Fuel burned, US gallons
    pub fuel_used_gal: f64,

    /// Total fuel cost for the trip
    pub total_cost: f64,

    /// Cost per kilometer driven (0 for a zero-length trip)
    pub cost_per_km: f64,

    /// Cost per mile driven (0 for a zero-length trip)
    pub cost_per_mile: f64,
}

/// Calculate trip fuel cost.
pub fn calculate(input: &FuelCostInput) -> CalcResult<FuelCostResult> {
    input.validate()?;

    let distance_km = input.distance_km();
    let km_per_l = input.fuel_economy_unit.to_km_per_l(input.fuel_economy);
    let fuel_used_l = fuel_used_liters(distance_km, km_per_l);

    let fuel_in_price_units = convert_linear(fuel_used_l, VolumeUnit::Liter, input.price_unit);
    let total_cost = fuel_in_price_units * input.fuel_price;

    let cost_per_km = if distance_km > 0.0 { total_cost / distance_km } else { 0.0 };

    debug!(distance_km, fuel_used_l, total_cost, "fuel cost calculated");

    Ok(FuelCostResult {
        fuel_used_l,
        fuel_used_gal: convert_linear(fuel_used_l, VolumeUnit::Liter, VolumeUnit::Gallon),
        total_cost,
        cost_per_km,
        cost_per_mile: cost_per_km * KM_PER_MILE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_trip() -> FuelCostInput {
        FuelCostInput {
            distance: 500.0,
            distance_unit: LengthUnit::Kilometer,
            fuel_economy: 8.0,
            fuel_economy_unit: FuelEconomyUnit::LPer100Km,
            fuel_price: 1.80,
            price_unit: VolumeUnit::Liter,
        }
    }

    #[test]
    fn test_metric_trip() {
        let result = calculate(&test_trip()).unwrap();

        // 500 km at 8 L/100km = 40 L
        assert!((result.fuel_used_l - 40.0).abs() < 1e-9);
        assert!((result.total_cost - 72.0).abs() < 1e-9);
        assert!((result.cost_per_km - 0.144).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_units() {
        // Distance in miles, economy in L/100km, price per gallon
        let input = FuelCostInput {
            distance: 100.0,
            distance_unit: LengthUnit::Mile,
            fuel_economy: 10.0,
            fuel_economy_unit: FuelEconomyUnit::LPer100Km,
            fuel_price: 4.0,
            price_unit: VolumeUnit::Gallon,
        };
        let result = calculate(&input).unwrap();

        // 160.9344 km * 0.1 L/km = 16.09344 L = 4.2514 gal
        assert!((result.fuel_used_l - 16.09344).abs() < 1e-9);
        assert!((result.fuel_used_gal - 4.25144).abs() < 1e-4);
        assert!((result.total_cost - 17.00575).abs() < 1e-4);
        assert!((result.cost_per_mile - 0.17006).abs() < 1e-4);
    }

    #[test]
    fn test_zero_distance() {
        let input = FuelCostInput {
            distance: 0.0,
            ..test_trip()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.cost_per_km, 0.0);
    }

    #[test]
    fn test_invalid_economy() {
        let input = FuelCostInput {
            fuel_economy: 0.0,
            ..test_trip()
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_negative_distance() {
        let input = FuelCostInput {
            distance: -5.0,
            ..test_trip()
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
