//! # calc_core - Unit Conversion Engine and Calculator Core
//!
//! `calc_core` holds the computational side of Calcsuite: the unit tables
//! every calculator shares, the conversion engine over them, and a handful
//! of small calculators that consume the same constants. All inputs and
//! outputs are JSON-serializable; nothing here touches I/O.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over immutable static tables
//! - **Closed types**: Categories and units are enums; string codes are
//!   resolved once at the boundary
//! - **One source of truth**: Callers populate selectors from the same
//!   tables the engine converts with
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{convert, Category, ConversionRequest};
//!
//! let cm = convert(12.0, Category::Length, "in", "cm").unwrap();
//! assert!((cm - 30.48).abs() < 1e-9);
//!
//! let request = ConversionRequest::new(98.6, Category::Temperature, "f", "c");
//! let result = request.execute().unwrap();
//! assert!((result.value - 37.0).abs() < 1e-9);
//! assert_eq!(result.label, "Celsius (°C)");
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Categories, unit tables, catalog
//! - [`convert`] - The conversion engine
//! - [`constants`] - Shared physical constants for calculators
//! - [`calculations`] - Fuel, emissions, EV and heating calculators
//! - [`format`] - Display rounding and formatting settings
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod constants;
pub mod convert;
pub mod errors;
pub mod format;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use convert::{convert, convert_linear, convert_units, ConversionRequest, ConversionResult};
pub use errors::{CalcError, CalcResult};
pub use format::{format_quantity, format_value, FormatSettings};
pub use units::{catalog, Category, LinearUnit, Unit};
