//! # Display Formatting
//!
//! The engine returns unrounded `f64` values; presentation belongs to the
//! caller. These helpers are the shared way callers render a result:
//! round to a number of significant digits, trim trailing zeros, and
//! optionally group thousands.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::format::{format_value, FormatSettings};
//!
//! let settings = FormatSettings::default();
//! assert_eq!(format_value(1.609344, &settings), "1.609344");
//! assert_eq!(format_value(4046.8564224, &settings), "4046.8564");
//! assert_eq!(format_value(0.1 + 0.2, &settings), "0.3");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Unit;

/// Most significant digits that survive decimal formatting without
/// binary rounding noise
pub const MAX_SIGNIFICANT_DIGITS: u32 = 15;

/// Magnitudes outside `[1e-7, 1e21)` render in scientific notation
const FIXED_MIN_EXPONENT: i32 = -7;
const FIXED_MAX_EXPONENT: i32 = 21;

/// Caller-side display settings.
///
/// ## JSON Example
///
/// ```json
/// { "significant_digits": 6, "thousands_separator": true }
/// ```
///
/// Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Significant digits kept when rounding (1..=15)
    pub significant_digits: u32,

    /// Drop trailing zeros after the decimal point
    pub trim_trailing_zeros: bool,

    /// Group the integer part with commas
    pub thousands_separator: bool,
}

impl Default for FormatSettings {
    fn default() -> Self {
        FormatSettings {
            significant_digits: 8,
            trim_trailing_zeros: true,
            thousands_separator: false,
        }
    }
}

impl FormatSettings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: FormatSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings values
    pub fn validate(&self) -> CalcResult<()> {
        if self.significant_digits == 0 || self.significant_digits > MAX_SIGNIFICANT_DIGITS {
            return Err(CalcError::invalid_input(
                "significant_digits",
                self.significant_digits.to_string(),
                format!("Must be between 1 and {}", MAX_SIGNIFICANT_DIGITS),
            ));
        }
        Ok(())
    }

    /// Copy with a different precision
    pub fn with_significant_digits(mut self, digits: u32) -> Self {
        self.significant_digits = digits;
        self
    }
}

/// Render a value rounded to the configured significant digits.
pub fn format_value(value: f64, settings: &FormatSettings) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = settings.significant_digits.clamp(1, MAX_SIGNIFICANT_DIGITS) as usize;

    // Scientific formatting does the rounding (including carries like 9.99 -> 10.0)
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(FIXED_MIN_EXPONENT..FIXED_MAX_EXPONENT).contains(&exponent) {
        let mantissa = if settings.trim_trailing_zeros {
            trim_zeros(mantissa)
        } else {
            mantissa.to_string()
        };
        return if exponent < 0 {
            format!("{}e{}", mantissa, exponent)
        } else {
            format!("{}e+{}", mantissa, exponent)
        };
    }

    let rounded: f64 = scientific.parse().unwrap_or(value);
    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    let mut fixed = format!("{:.*}", decimals, rounded);
    if settings.trim_trailing_zeros {
        fixed = trim_zeros(&fixed);
    }
    if settings.thousands_separator {
        fixed = group_thousands(&fixed);
    }
    fixed
}

/// Render a value followed by the unit's display symbol.
///
/// ```rust
/// use calc_core::format::{format_quantity, FormatSettings};
/// use calc_core::units::{TemperatureUnit, Unit};
///
/// let s = format_quantity(37.0, Unit::Temperature(TemperatureUnit::Celsius), &FormatSettings::default());
/// assert_eq!(s, "37 °C");
/// ```
pub fn format_quantity(value: f64, unit: Unit, settings: &FormatSettings) -> String {
    format!("{} {}", format_value(value, settings), unit.symbol())
}

fn trim_zeros(number: &str) -> String {
    if !number.contains('.') {
        return number.to_string();
    }
    number.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{AreaUnit, LengthUnit, VolumeUnit};

    #[test]
    fn test_significant_digits() {
        let settings = FormatSettings::default();
        assert_eq!(format_value(30.48, &settings), "30.48");
        assert_eq!(format_value(2.2046226218487757, &settings), "2.2046226");
        assert_eq!(format_value(-40.0, &settings), "-40");
        assert_eq!(format_value(9.999999999, &settings), "10");
    }

    #[test]
    fn test_precision_setting() {
        let settings = FormatSettings::default().with_significant_digits(3);
        assert_eq!(format_value(1.609344, &settings), "1.61");
        assert_eq!(format_value(123456.0, &settings), "123000");
    }

    #[test]
    fn test_max_precision_is_clean() {
        let settings = FormatSettings::default().with_significant_digits(MAX_SIGNIFICANT_DIGITS);
        assert!(settings.validate().is_ok());
        assert_eq!(format_value(0.1, &settings), "0.1");
        assert_eq!(format_value(1e-7, &settings), "0.0000001");
        assert_eq!(format_value(0.1 + 0.2, &settings), "0.3");

        let err = FormatSettings::default().with_significant_digits(16).validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_keep_trailing_zeros() {
        let settings = FormatSettings {
            significant_digits: 4,
            trim_trailing_zeros: false,
            thousands_separator: false,
        };
        assert_eq!(format_value(2.5, &settings), "2.500");
    }

    #[test]
    fn test_thousands_separator() {
        let settings = FormatSettings {
            thousands_separator: true,
            ..FormatSettings::default()
        };
        assert_eq!(format_value(2589988.110336, &settings), "2,589,988.1");
        assert_eq!(format_value(-1234.5, &settings), "-1,234.5");
        assert_eq!(format_value(999.0, &settings), "999");
    }

    #[test]
    fn test_scientific_range() {
        let settings = FormatSettings::default();
        assert_eq!(format_value(1.5e-9, &settings), "1.5e-9");
        assert_eq!(format_value(2.0e22, &settings), "2e+22");
        assert_eq!(format_value(0.00001, &settings), "0.00001");
    }

    #[test]
    fn test_special_values() {
        let settings = FormatSettings::default();
        assert_eq!(format_value(f64::NAN, &settings), "NaN");
        assert_eq!(format_value(f64::INFINITY, &settings), "∞");
        assert_eq!(format_value(f64::NEG_INFINITY, &settings), "-∞");
        assert_eq!(format_value(-0.0, &settings), "0");
    }

    #[test]
    fn test_format_quantity() {
        let settings = FormatSettings::default();
        assert_eq!(
            format_quantity(4046.8564224, Unit::Area(AreaUnit::SquareMeter), &settings),
            "4046.8564 m²"
        );
        assert_eq!(
            format_quantity(1.0, Unit::Length(LengthUnit::Mile), &settings),
            "1 mi"
        );
        // Symbol, not code
        assert_eq!(
            format_quantity(8.0, Unit::Volume(VolumeUnit::FluidOunce), &settings),
            "8 fl oz"
        );
    }

    #[test]
    fn test_settings_from_json() {
        let settings = FormatSettings::from_json(r#"{"significant_digits": 4}"#).unwrap();
        assert_eq!(settings.significant_digits, 4);
        assert!(settings.trim_trailing_zeros);

        let err = FormatSettings::from_json(r#"{"significant_digits": 0}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = FormatSettings::from_json("not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
