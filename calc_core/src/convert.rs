//! # Conversion Engine
//!
//! Converts a numeric quantity between two units of the same category.
//!
//! - Multiplicative categories normalize to the base unit and scale to the
//!   target: `value * factor(from) / factor(to)`.
//! - Temperature dispatches on the ordered unit pair through six explicit
//!   formulas.
//! - Converting a unit to itself returns the input unchanged, bit for bit.
//!
//! The engine performs no range validation and never rounds. NaN and
//! infinities pass through whatever arithmetic produces. The only failure is
//! a unit code that is not in the category's table.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::convert::convert;
//! use calc_core::units::Category;
//!
//! let km = convert(1.0, Category::Length, "mi", "km").unwrap();
//! assert!((km - 1.609344).abs() < 1e-12);
//!
//! let f = convert(100.0, Category::Temperature, "c", "f").unwrap();
//! assert_eq!(f, 212.0);
//!
//! assert!(convert(1.0, Category::Length, "mi", "kg").is_err());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::units::{Category, LinearUnit, TemperatureUnit, Unit};

/// Offset between the Celsius and Kelvin scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// Offset of the Fahrenheit scale at the freezing point of water
const FAHRENHEIT_OFFSET: f64 = 32.0;

/// Convert `value` from one unit code to another within `category`.
///
/// # Errors
///
/// [`CalcError::InvalidUnit`] when `from` or `to` is not a code in the
/// category's unit table.
pub fn convert(value: f64, category: Category, from: &str, to: &str) -> CalcResult<f64> {
    let from = Unit::parse(category, from)?;
    let to = Unit::parse(category, to)?;
    convert_units(value, from, to)
}

/// Convert between two typed units.
///
/// # Errors
///
/// [`CalcError::InvalidUnit`] when `to` does not belong to `from`'s category.
pub fn convert_units(value: f64, from: Unit, to: Unit) -> CalcResult<f64> {
    match (from, to) {
        (Unit::Length(a), Unit::Length(b)) => Ok(convert_linear(value, a, b)),
        (Unit::Weight(a), Unit::Weight(b)) => Ok(convert_linear(value, a, b)),
        (Unit::Volume(a), Unit::Volume(b)) => Ok(convert_linear(value, a, b)),
        (Unit::Area(a), Unit::Area(b)) => Ok(convert_linear(value, a, b)),
        (Unit::Temperature(a), Unit::Temperature(b)) => Ok(a.convert(value, b)),
        _ => Err(CalcError::invalid_unit(from.category().code(), to.code())),
    }
}

/// Convert within a multiplicative category. Cannot fail: both units come
/// from the same table.
pub fn convert_linear<U: LinearUnit>(value: f64, from: U, to: U) -> f64 {
    if from == to {
        return value;
    }
    value * from.factor() / to.factor()
}

impl TemperatureUnit {
    /// Convert a temperature reading to another scale.
    pub fn convert(self, value: f64, to: TemperatureUnit) -> f64 {
        use TemperatureUnit::{Celsius, Fahrenheit, Kelvin};

        match (self, to) {
            (Celsius, Fahrenheit) => value * 9.0 / 5.0 + FAHRENHEIT_OFFSET,
            (Celsius, Kelvin) => value + KELVIN_OFFSET,
            (Fahrenheit, Celsius) => (value - FAHRENHEIT_OFFSET) * 5.0 / 9.0,
            (Fahrenheit, Kelvin) => (value - FAHRENHEIT_OFFSET) * 5.0 / 9.0 + KELVIN_OFFSET,
            (Kelvin, Celsius) => value - KELVIN_OFFSET,
            (Kelvin, Fahrenheit) => (value - KELVIN_OFFSET) * 9.0 / 5.0 + FAHRENHEIT_OFFSET,
            (Celsius, Celsius) | (Fahrenheit, Fahrenheit) | (Kelvin, Kelvin) => value,
        }
    }
}

/// A single conversion as submitted by a caller.
///
/// ## JSON Example
///
/// ```json
/// { "value": 12.0, "category": "length", "from": "in", "to": "cm" }
/// ```
///
/// JSON has no NaN or infinity, so non-finite values travel as the strings
/// `"NaN"`, `"inf"` and `"-inf"` in both the request and the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Quantity to convert
    #[serde(with = "non_finite")]
    pub value: f64,

    /// Category both units belong to
    pub category: Category,

    /// Source unit code
    pub from: String,

    /// Target unit code
    pub to: String,
}

/// The converted value plus the target unit's code and label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Converted quantity, unrounded
    #[serde(with = "non_finite")]
    pub value: f64,

    /// Target unit code
    pub unit: String,

    /// Target unit display label
    pub label: String,
}

impl ConversionRequest {
    /// Create a request from unit codes
    pub fn new(value: f64, category: Category, from: impl Into<String>, to: impl Into<String>) -> Self {
        ConversionRequest {
            value,
            category,
            from: from.into(),
            to: to.into(),
        }
    }

    /// Resolve the unit codes and run the conversion.
    pub fn execute(&self) -> CalcResult<ConversionResult> {
        let from = Unit::parse(self.category, &self.from)?;
        let to = Unit::parse(self.category, &self.to)?;
        let value = convert_units(self.value, from, to)?;

        debug!(
            category = %self.category,
            from = %from,
            to = %to,
            input = self.value,
            output = value,
            "converted"
        );

        Ok(ConversionResult {
            value,
            unit: to.code().to_string(),
            label: to.label().to_string(),
        })
    }
}

/// f64 as a JSON number, or as a string when NaN or infinite
mod non_finite {
    use serde::de::{self, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if *value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(de::Error::invalid_value(
                    Unexpected::Str(other),
                    &"a number, \"NaN\", \"inf\" or \"-inf\"",
                )),
            },
        }
    }
}
