//! # EV Range
//!
//! Driving range from battery capacity and efficiency, plus the cost of a
//! full charge and the MPGe rating.
//!
//! ## Assumptions
//!
//! - Usable capacity is a percentage of nameplate capacity
//! - MPGe uses the EPA equivalence of 33.7 kWh per gallon of gasoline
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::ev_range::{calculate, EfficiencyUnit, EvRangeInput};
//!
//! let input = EvRangeInput {
//!     battery_kwh: 75.0,
//!     efficiency: 25.0,
//!     efficiency_unit: EfficiencyUnit::KwhPer100Mi,
//!     usable_percent: 100.0,
//!     electricity_price: Some(0.15),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.range_mi - 300.0).abs() < 1e-9);
//! assert!((result.equivalent_mpge - 134.8).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{KM_PER_MILE, KWH_PER_GALLON_GASOLINE};
use crate::convert::convert_linear;
use crate::errors::CalcResult;
use crate::units::LengthUnit;

use super::{require_non_negative, require_percent, require_positive};

/// Ways of expressing EV efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EfficiencyUnit {
    /// Kilowatt-hours per 100 miles (EPA label)
    #[serde(rename = "kwh_per_100mi")]
    KwhPer100Mi,
    /// Kilowatt-hours per 100 kilometers
    #[serde(rename = "kwh_per_100km")]
    KwhPer100Km,
    /// Miles per kilowatt-hour (common in-car readout)
    #[serde(rename = "mi_per_kwh")]
    MiPerKwh,
}

impl EfficiencyUnit {
    /// All efficiency units for UI selection
    pub const ALL: [EfficiencyUnit; 3] = [
        EfficiencyUnit::KwhPer100Mi,
        EfficiencyUnit::KwhPer100Km,
        EfficiencyUnit::MiPerKwh,
    ];

    /// Short code used in JSON and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            EfficiencyUnit::KwhPer100Mi => "kwh_per_100mi",
            EfficiencyUnit::KwhPer100Km => "kwh_per_100km",
            EfficiencyUnit::MiPerKwh => "mi_per_kwh",
        }
    }

    /// Look up a unit by its exact code
    pub fn from_code(code: &str) -> Option<Self> {
        EfficiencyUnit::ALL.into_iter().find(|u| u.code() == code)
    }

    /// Express `value` of this unit as miles per kWh
    pub fn to_mi_per_kwh(&self, value: f64) -> f64 {
        match self {
            EfficiencyUnit::KwhPer100Mi => 100.0 / value,
            EfficiencyUnit::KwhPer100Km => 100.0 / value / KM_PER_MILE,
            EfficiencyUnit::MiPerKwh => value,
        }
    }
}

/// Input parameters for EV range.
///
/// ## JSON Example
///
/// ```json
/// {
///   "battery_kwh": 75.0,
///   "efficiency": 25.0,
///   "efficiency_unit": "kwh_per_100mi",
///   "usable_percent": 90.0,
///   "electricity_price": 0.15
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvRangeInput {
    /// Nameplate battery capacity, kWh
    pub battery_kwh: f64,

    /// Vehicle efficiency
    pub efficiency: f64,

    /// Unit of `efficiency`
    pub efficiency_unit: EfficiencyUnit,

    /// Share of the battery actually usable, percent (0, 100]
    #[serde(default = "default_usable_percent")]
    pub usable_percent: f64,

    /// Price per kWh; omit to skip the charging cost
    #[serde(default)]
    pub electricity_price: Option<f64>,
}

fn default_usable_percent() -> f64 {
    100.0
}

impl EvRangeInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("battery_kwh", self.battery_kwh)?;
        require_positive("efficiency", self.efficiency)?;
        require_percent("usable_percent", self.usable_percent, 100.0)?;
        if let Some(price) = self.electricity_price {
            require_non_negative("electricity_price", price)?;
        }
        Ok(())
    }

    /// Energy available for driving, kWh
    pub fn usable_kwh(&self) -> f64 {
        self.battery_kwh * self.usable_percent / 100.0
    }
}

/// Results from an EV range calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvRangeResult {
    /// Energy available for driving, kWh
    pub usable_kwh: f64,

    /// Range, kilometers
    pub range_km: f64,

    /// Range, miles
    pub range_mi: f64,

    /// Cost to charge the usable capacity from empty
    pub cost_full_charge: Option<f64>,

    /// Miles per gallon equivalent
    pub equivalent_mpge: f64,
}

/// Calculate EV range.
pub fn calculate(input: &EvRangeInput) -> CalcResult<EvRangeResult> {
    input.validate()?;

    let usable_kwh = input.usable_kwh();
    let mi_per_kwh = input.efficiency_unit.to_mi_per_kwh(input.efficiency);
    let range_mi = usable_kwh * mi_per_kwh;

    debug!(usable_kwh, mi_per_kwh, range_mi, "ev range calculated");

    Ok(EvRangeResult {
        usable_kwh,
        range_km: convert_linear(range_mi, LengthUnit::Mile, LengthUnit::Kilometer),
        range_mi,
        cost_full_charge: input.electricity_price.map(|price| usable_kwh * price),
        equivalent_mpge: mi_per_kwh * KWH_PER_GALLON_GASOLINE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ev() -> EvRangeInput {
        EvRangeInput {
            battery_kwh: 60.0,
            efficiency: 15.0,
            efficiency_unit: EfficiencyUnit::KwhPer100Km,
            usable_percent: 90.0,
            electricity_price: Some(0.30),
        }
    }

    #[test]
    fn test_metric_efficiency() {
        let result = calculate(&test_ev()).unwrap();

        // 54 kWh usable at 15 kWh/100km = 360 km
        assert!((result.usable_kwh - 54.0).abs() < 1e-9);
        assert!((result.range_km - 360.0).abs() < 1e-9);
        assert!((result.range_mi - 223.694).abs() < 1e-3);
        assert!((result.cost_full_charge.unwrap() - 16.2).abs() < 1e-9);
    }

    #[test]
    fn test_mi_per_kwh() {
        let input = EvRangeInput {
            battery_kwh: 100.0,
            efficiency: 3.5,
            efficiency_unit: EfficiencyUnit::MiPerKwh,
            usable_percent: 100.0,
            electricity_price: None,
        };
        let result = calculate(&input).unwrap();
        assert!((result.range_mi - 350.0).abs() < 1e-9);
        assert_eq!(result.cost_full_charge, None);
    }

    #[test]
    fn test_usable_percent_bounds() {
        let input = EvRangeInput {
            usable_percent: 0.0,
            ..test_ev()
        };
        assert!(calculate(&input).is_err());

        let input = EvRangeInput {
            usable_percent: 120.0,
            ..test_ev()
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_defaults_from_json() {
        let json = r#"{"battery_kwh": 50.0, "efficiency": 4.0, "efficiency_unit": "mi_per_kwh"}"#;
        let input: EvRangeInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.usable_percent, 100.0);
        assert_eq!(input.electricity_price, None);
    }
}
