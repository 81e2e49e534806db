//! # Unit Tables
//!
//! Closed enumerations for every measurement category and its units. This
//! module is the single source of truth for unit codes, display labels and
//! conversion factors: the conversion engine reads from it, and so do callers
//! that populate unit selectors (see [`catalog`]).
//!
//! ## Categories and Base Units
//!
//! | Category    | Base unit | Strategy                         |
//! |-------------|-----------|----------------------------------|
//! | Length      | m         | multiplicative factor            |
//! | Weight      | g         | multiplicative factor            |
//! | Volume      | l         | multiplicative factor (US units) |
//! | Area        | sq_m      | multiplicative factor            |
//! | Temperature | -         | explicit offset formulas         |
//!
//! Each factor states how many base units one of the unit equals, so the
//! table grows by one entry per unit rather than one per unit pair.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Category, LengthUnit, LinearUnit, Unit};
//!
//! assert_eq!(LengthUnit::Foot.factor(), 0.3048);
//! assert_eq!(LengthUnit::BASE, LengthUnit::Meter);
//!
//! let unit = Unit::parse(Category::Length, "mi").unwrap();
//! assert_eq!(unit.label(), "Miles (mi)");
//! assert!(Unit::parse(Category::Weight, "mi").is_err());
//! ```

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Category
// ============================================================================

/// A measurement dimension within which units are mutually convertible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Length (base: meters)
    Length,
    /// Weight / mass (base: grams)
    Weight,
    /// Volume (base: liters)
    Volume,
    /// Temperature (no base unit, offset formulas)
    Temperature,
    /// Area (base: square meters)
    Area,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Category::Length,
        Category::Weight,
        Category::Volume,
        Category::Temperature,
        Category::Area,
    ];

    /// Lowercase code used in JSON and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Volume => "volume",
            Category::Temperature => "temperature",
            Category::Area => "area",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Volume => "Volume",
            Category::Temperature => "Temperature",
            Category::Area => "Area",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "length" | "distance" => Ok(Category::Length),
            "weight" | "mass" => Ok(Category::Weight),
            "volume" => Ok(Category::Volume),
            "temperature" | "temp" => Ok(Category::Temperature),
            "area" => Ok(Category::Area),
            _ => Err(CalcError::unknown_category(s)),
        }
    }

    /// True when conversion is a pure scale factor (everything but temperature)
    pub fn is_multiplicative(&self) -> bool {
        !matches!(self, Category::Temperature)
    }

    /// The reference unit whose factor is exactly 1.0, if the category has one
    pub fn base_unit(&self) -> Option<Unit> {
        match self {
            Category::Length => Some(Unit::Length(LengthUnit::BASE)),
            Category::Weight => Some(Unit::Weight(WeightUnit::BASE)),
            Category::Volume => Some(Unit::Volume(VolumeUnit::BASE)),
            Category::Area => Some(Unit::Area(AreaUnit::BASE)),
            Category::Temperature => None,
        }
    }

    /// The category's unit table, in display order
    pub fn units(&self) -> Vec<Unit> {
        match self {
            Category::Length => LengthUnit::ALL.iter().map(|&u| Unit::Length(u)).collect(),
            Category::Weight => WeightUnit::ALL.iter().map(|&u| Unit::Weight(u)).collect(),
            Category::Volume => VolumeUnit::ALL.iter().map(|&u| Unit::Volume(u)).collect(),
            Category::Temperature => TemperatureUnit::ALL
                .iter()
                .map(|&u| Unit::Temperature(u))
                .collect(),
            Category::Area => AreaUnit::ALL.iter().map(|&u| Unit::Area(u)).collect(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Multiplicative units
// ============================================================================

/// A unit converted by a plain scale factor relative to its category's base.
pub trait LinearUnit: Copy + PartialEq + fmt::Debug {
    /// The category every value of this type belongs to
    const CATEGORY: Category;

    /// The base unit (factor exactly 1.0)
    const BASE: Self;

    /// How many base units one of this unit equals. Always strictly positive.
    fn factor(self) -> f64;

    /// Express `value` of this unit in base units
    fn to_base(self, value: f64) -> f64 {
        value * self.factor()
    }

    /// Express `value` base units in this unit
    fn from_base(self, value: f64) -> f64 {
        value / self.factor()
    }
}

/// Generates a unit enum from a table of `Variant => (code, symbol, label[, factor])`.
///
/// With `base = Variant` the enum also gets a [`LinearUnit`] impl.
macro_rules! unit_table {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($code:literal, $symbol:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All units of this category in display order
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Short unit code (e.g. "km")
            pub fn code(self) -> &'static str {
                match self {
                    $( $name::$variant => $code, )+
                }
            }

            /// Symbol for display next to a value (e.g. "m²")
            pub fn symbol(self) -> &'static str {
                match self {
                    $( $name::$variant => $symbol, )+
                }
            }

            /// Human-readable label (e.g. "Kilometers (km)")
            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            /// Look up a unit by its exact code
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $( $code => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        // Units serialize as their bare code
        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = String::deserialize(deserializer)?;
                $name::from_code(&code)
                    .ok_or_else(|| serde::de::Error::unknown_variant(&code, &[ $( $code ),+ ]))
            }
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident in $category:expr, base = $base:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($code:literal, $symbol:literal, $label:literal, $factor:expr) ),+ $(,)?
        }
    ) => {
        unit_table! {
            $(#[$meta])*
            $name {
                $( $(#[$vmeta])* $variant => ($code, $symbol, $label) ),+
            }
        }

        impl $name {
            /// Base units per one of this unit, usable in constant expressions
            pub const fn base_factor(self) -> f64 {
                match self {
                    $( $name::$variant => $factor, )+
                }
            }
        }

        impl LinearUnit for $name {
            const CATEGORY: Category = $category;
            const BASE: Self = $name::$base;

            fn factor(self) -> f64 {
                self.base_factor()
            }
        }
    };
}

unit_table! {
    /// Length units (base: meter). Imperial factors are the exact
    /// international definitions (1 in = 25.4 mm).
    LengthUnit in Category::Length, base = Meter {
        Millimeter => ("mm", "mm", "Millimeters (mm)", 0.001),
        Centimeter => ("cm", "cm", "Centimeters (cm)", 0.01),
        Meter => ("m", "m", "Meters (m)", 1.0),
        Kilometer => ("km", "km", "Kilometers (km)", 1000.0),
        Inch => ("in", "in", "Inches (in)", 0.0254),
        Foot => ("ft", "ft", "Feet (ft)", 0.3048),
        Yard => ("yd", "yd", "Yards (yd)", 0.9144),
        Mile => ("mi", "mi", "Miles (mi)", 1609.344),
    }
}

unit_table! {
    /// Weight units (base: gram). Pound is the international avoirdupois pound.
    WeightUnit in Category::Weight, base = Gram {
        Milligram => ("mg", "mg", "Milligrams (mg)", 0.001),
        Gram => ("g", "g", "Grams (g)", 1.0),
        Kilogram => ("kg", "kg", "Kilograms (kg)", 1000.0),
        /// Metric tonne
        MetricTon => ("t", "t", "Metric Tons (t)", 1_000_000.0),
        Ounce => ("oz", "oz", "Ounces (oz)", 28.349523125),
        Pound => ("lb", "lb", "Pounds (lb)", 453.59237),
        Stone => ("st", "st", "Stone (st)", 6350.29318),
    }
}

unit_table! {
    /// Volume units (base: liter). Customary units are US liquid measures.
    VolumeUnit in Category::Volume, base = Liter {
        Milliliter => ("ml", "mL", "Milliliters (mL)", 0.001),
        Liter => ("l", "L", "Liters (L)", 1.0),
        CubicMeter => ("m3", "m³", "Cubic Meters (m³)", 1000.0),
        Teaspoon => ("tsp", "tsp", "Teaspoons (tsp)", 0.00492892159375),
        Tablespoon => ("tbsp", "tbsp", "Tablespoons (tbsp)", 0.01478676478125),
        FluidOunce => ("fl_oz", "fl oz", "Fluid Ounces (fl oz)", 0.0295735295625),
        Cup => ("cup", "cup", "Cups (cup)", 0.2365882365),
        Pint => ("pt", "pt", "Pints (pt)", 0.473176473),
        Quart => ("qt", "qt", "Quarts (qt)", 0.946352946),
        Gallon => ("gal", "gal", "Gallons (gal)", 3.785411784),
    }
}

unit_table! {
    /// Area units (base: square meter)
    AreaUnit in Category::Area, base = SquareMeter {
        SquareCentimeter => ("sq_cm", "cm²", "Square Centimeters (cm²)", 0.0001),
        SquareMeter => ("sq_m", "m²", "Square Meters (m²)", 1.0),
        Hectare => ("ha", "ha", "Hectares (ha)", 10_000.0),
        SquareKilometer => ("sq_km", "km²", "Square Kilometers (km²)", 1_000_000.0),
        SquareInch => ("sq_in", "in²", "Square Inches (in²)", 0.00064516),
        SquareFoot => ("sq_ft", "ft²", "Square Feet (ft²)", 0.09290304),
        SquareYard => ("sq_yd", "yd²", "Square Yards (yd²)", 0.83612736),
        Acre => ("acre", "ac", "Acres (ac)", 4046.8564224),
        SquareMile => ("sq_mi", "mi²", "Square Miles (mi²)", 2_589_988.110336),
    }
}

unit_table! {
    /// Temperature units. These carry an additive offset, so they are not
    /// [`LinearUnit`]s; see [`crate::convert`] for the formulas.
    TemperatureUnit {
        Celsius => ("c", "°C", "Celsius (°C)"),
        Fahrenheit => ("f", "°F", "Fahrenheit (°F)"),
        Kelvin => ("k", "K", "Kelvin (K)"),
    }
}

// ============================================================================
// Unit (tagged over all categories)
// ============================================================================

/// A unit from any category.
///
/// ## JSON Serialization
///
/// ```json
/// { "category": "length", "unit": "mi" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "unit", rename_all = "lowercase")]
pub enum Unit {
    Length(LengthUnit),
    Weight(WeightUnit),
    Volume(VolumeUnit),
    Temperature(TemperatureUnit),
    Area(AreaUnit),
}

/// Per-category lookup from code to unit, built once from the tables above.
static UNIT_INDEX: Lazy<HashMap<Category, HashMap<&'static str, Unit>>> = Lazy::new(|| {
    Category::ALL
        .iter()
        .map(|&category| {
            let table = category
                .units()
                .into_iter()
                .map(|unit| (unit.code(), unit))
                .collect();
            (category, table)
        })
        .collect()
});

impl Unit {
    /// The category this unit belongs to
    pub fn category(&self) -> Category {
        match self {
            Unit::Length(_) => Category::Length,
            Unit::Weight(_) => Category::Weight,
            Unit::Volume(_) => Category::Volume,
            Unit::Temperature(_) => Category::Temperature,
            Unit::Area(_) => Category::Area,
        }
    }

    /// Short unit code (unique within its category)
    pub fn code(&self) -> &'static str {
        match self {
            Unit::Length(u) => u.code(),
            Unit::Weight(u) => u.code(),
            Unit::Volume(u) => u.code(),
            Unit::Temperature(u) => u.code(),
            Unit::Area(u) => u.code(),
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Length(u) => u.symbol(),
            Unit::Weight(u) => u.symbol(),
            Unit::Volume(u) => u.symbol(),
            Unit::Temperature(u) => u.symbol(),
            Unit::Area(u) => u.symbol(),
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Length(u) => u.label(),
            Unit::Weight(u) => u.label(),
            Unit::Volume(u) => u.label(),
            Unit::Temperature(u) => u.label(),
            Unit::Area(u) => u.label(),
        }
    }

    /// Base units per one of this unit, or `None` for temperature
    pub fn factor(&self) -> Option<f64> {
        match self {
            Unit::Length(u) => Some(u.factor()),
            Unit::Weight(u) => Some(u.factor()),
            Unit::Volume(u) => Some(u.factor()),
            Unit::Area(u) => Some(u.factor()),
            Unit::Temperature(_) => None,
        }
    }

    /// Resolve a unit code within a category.
    ///
    /// Fails with [`CalcError::InvalidUnit`] when the code is not in the
    /// category's table.
    pub fn parse(category: Category, code: &str) -> CalcResult<Unit> {
        UNIT_INDEX
            .get(&category)
            .and_then(|table| table.get(code))
            .copied()
            .ok_or_else(|| CalcError::invalid_unit(category.code(), code))
    }

    /// Find a unit by code in any category (first match in [`Category::ALL`] order)
    pub fn find(code: &str) -> Option<Unit> {
        Category::ALL
            .iter()
            .find_map(|&category| Unit::parse(category, code).ok())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<LengthUnit> for Unit {
    fn from(unit: LengthUnit) -> Self {
        Unit::Length(unit)
    }
}

impl From<WeightUnit> for Unit {
    fn from(unit: WeightUnit) -> Self {
        Unit::Weight(unit)
    }
}

impl From<VolumeUnit> for Unit {
    fn from(unit: VolumeUnit) -> Self {
        Unit::Volume(unit)
    }
}

impl From<TemperatureUnit> for Unit {
    fn from(unit: TemperatureUnit) -> Self {
        Unit::Temperature(unit)
    }
}

impl From<AreaUnit> for Unit {
    fn from(unit: AreaUnit) -> Self {
        Unit::Area(unit)
    }
}

// ============================================================================
// Catalog (for populating unit selectors)
// ============================================================================

/// A (code, label) pair as shown in a unit selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInfo {
    pub code: String,
    pub symbol: String,
    pub label: String,
}

impl From<Unit> for UnitInfo {
    fn from(unit: Unit) -> Self {
        UnitInfo {
            code: unit.code().to_string(),
            symbol: unit.symbol().to_string(),
            label: unit.label().to_string(),
        }
    }
}

/// One category's full unit table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub name: String,
    /// Base unit code, absent for temperature
    pub base: Option<String>,
    pub units: Vec<UnitInfo>,
}

impl From<Category> for CategoryInfo {
    fn from(category: Category) -> Self {
        CategoryInfo {
            category,
            name: category.display_name().to_string(),
            base: category.base_unit().map(|u| u.code().to_string()),
            units: category.units().into_iter().map(UnitInfo::from).collect(),
        }
    }
}

/// Every category with its unit table, in display order.
pub fn catalog() -> Vec<CategoryInfo> {
    Category::ALL.iter().map(|&c| CategoryInfo::from(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!(Category::from_str_flexible("Length").unwrap(), Category::Length);
        assert_eq!(Category::from_str_flexible("mass").unwrap(), Category::Weight);
        assert_eq!(Category::from_str_flexible(" temp ").unwrap(), Category::Temperature);
        assert_eq!(
            Category::from_str_flexible("speed").unwrap_err().error_code(),
            "UNKNOWN_CATEGORY"
        );
    }

    #[test]
    fn test_base_units_have_unit_factor() {
        for category in Category::ALL {
            match category.base_unit() {
                Some(base) => {
                    assert_eq!(base.category(), category);
                    assert_eq!(base.factor(), Some(1.0));
                }
                None => assert!(!category.is_multiplicative()),
            }
        }
    }

    #[test]
    fn test_tables_are_complete() {
        for category in Category::ALL {
            let units = category.units();
            assert!(units.len() >= 2, "{} needs at least two units", category);

            for unit in &units {
                assert_eq!(unit.category(), category);
                if let Some(factor) = unit.factor() {
                    assert!(factor > 0.0, "{} has non-positive factor", unit);
                }
            }
        }
    }

    #[test]
    fn test_codes_unique_within_category() {
        for category in Category::ALL {
            let units = category.units();
            let mut codes: Vec<&str> = units.iter().map(|u| u.code()).collect();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), units.len());
        }
    }

    #[test]
    fn test_codes_unique_across_categories() {
        let mut seen: HashMap<&str, Category> = HashMap::new();
        for category in Category::ALL {
            for unit in category.units() {
                if let Some(previous) = seen.insert(unit.code(), category) {
                    panic!("code `{}` is used by both {} and {}", unit.code(), previous, category);
                }
            }
        }
        assert_eq!(seen.len(), Category::ALL.iter().map(|c| c.units().len()).sum::<usize>());
    }

    #[test]
    fn test_find_matches_parse_for_every_code() {
        for category in Category::ALL {
            for unit in category.units() {
                assert_eq!(Unit::find(unit.code()), Some(unit));
            }
        }
    }

    #[test]
    fn test_parse_every_code() {
        for category in Category::ALL {
            for unit in category.units() {
                assert_eq!(Unit::parse(category, unit.code()).unwrap(), unit);
            }
        }
    }

    #[test]
    fn test_parse_rejects_foreign_code() {
        let err = Unit::parse(Category::Length, "kg").unwrap_err();
        assert_eq!(err, CalcError::invalid_unit("length", "kg"));

        // Codes are exact
        assert!(Unit::parse(Category::Length, "KM").is_err());
    }

    #[test]
    fn test_find_any_category() {
        assert_eq!(Unit::find("acre"), Some(Unit::Area(AreaUnit::Acre)));
        assert_eq!(Unit::find("f"), Some(Unit::Temperature(TemperatureUnit::Fahrenheit)));
        assert_eq!(Unit::find("furlong"), None);
    }

    #[test]
    fn test_unit_serialization() {
        let unit = Unit::Volume(VolumeUnit::FluidOunce);
        let json = serde_json::to_string(&unit).unwrap();
        assert_eq!(json, r#"{"category":"volume","unit":"fl_oz"}"#);

        let roundtrip: Unit = serde_json::from_str(&json).unwrap();
        assert_eq!(unit, roundtrip);
    }

    #[test]
    fn test_catalog() {
        let catalog = catalog();
        assert_eq!(catalog.len(), Category::ALL.len());

        let temperature = catalog
            .iter()
            .find(|c| c.category == Category::Temperature)
            .unwrap();
        assert_eq!(temperature.base, None);
        assert_eq!(temperature.units.len(), 3);

        let area = catalog.iter().find(|c| c.category == Category::Area).unwrap();
        assert_eq!(area.base.as_deref(), Some("sq_m"));
    }
}
