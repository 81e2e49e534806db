//! Command-line surface and the handlers behind each subcommand.
//!
//! Handlers return the text to print rather than printing it, so the
//! same code path serves both the binary and the tests.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use calc_core::calculations::{
    convert_fuel_economy, CalculatorInput, CalculatorOutput, CarbonFootprintInput, EfficiencyUnit,
    EnergyUnit, EvRangeInput, FuelCostInput, FuelEconomyUnit, FuelType, HeatingCostInput, HeatingFuel,
};
use calc_core::units::{LengthUnit, VolumeUnit};
use calc_core::{
    catalog, format_quantity, format_value, CalcError, CalcResult, Category, ConversionRequest,
    FormatSettings, Unit,
};

use crate::settings::load_settings;

#[derive(Debug, Parser)]
#[command(name = "calc", version, about = "Unit conversions and everyday calculators")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print results (and errors) as JSON; NaN and infinities become strings
    #[arg(long, global = true)]
    pub json: bool,

    /// Significant digits shown in text output
    #[arg(long, global = true, value_name = "N")]
    pub precision: Option<u32>,

    /// JSON file with display settings
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a value between two units of the same category
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Source unit code, e.g. `mi`
        from: String,
        /// Target unit code, e.g. `km`
        to: String,
        /// Category name; inferred from the source unit when omitted
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List categories and their unit codes
    Units {
        /// Only list this category
        category: Option<String>,
    },
    /// Convert between mpg, l_per_100km and km_per_l
    FuelEconomy {
        value: f64,
        from: String,
        to: String,
    },
    /// Fuel and money spent on a trip
    FuelCost {
        distance: f64,
        /// Fuel economy, in `--economy-unit`
        economy: f64,
        /// Price per `--price-unit` of fuel
        price: f64,
        #[arg(long, default_value = "mi")]
        distance_unit: String,
        #[arg(long, default_value = "mpg")]
        economy_unit: String,
        #[arg(long, default_value = "gal")]
        price_unit: String,
    },
    /// Tailpipe CO₂ for a trip
    Carbon {
        distance: f64,
        economy: f64,
        #[arg(long, default_value = "mi")]
        distance_unit: String,
        #[arg(long, default_value = "mpg")]
        economy_unit: String,
        /// gasoline or diesel
        #[arg(long, default_value = "gasoline")]
        fuel: String,
    },
    /// Electric vehicle range and charging cost
    EvRange {
        /// Battery capacity, kWh
        battery_kwh: f64,
        efficiency: f64,
        #[arg(long, default_value = "mi_per_kwh")]
        efficiency_unit: String,
        #[arg(long, default_value_t = 100.0)]
        usable_percent: f64,
        /// Price per kWh
        #[arg(long)]
        price: Option<f64>,
    },
    /// Annual heating cost for a heat load
    HeatingCost {
        heat_load: f64,
        /// natural_gas, propane, heating_oil or electricity
        fuel: String,
        /// Seasonal efficiency, percent
        efficiency: f64,
        /// Price per sales unit of the fuel
        price: f64,
        #[arg(long, default_value = "btu")]
        load_unit: String,
    },
    /// Run any calculator from a JSON document (stdin when no file is given)
    Run { file: Option<PathBuf> },
}

/// Execute the parsed command line and return the text to print.
pub fn execute(cli: &CommandLine) -> Result<String> {
    let settings = load_settings(cli.settings.as_deref(), cli.precision)?;
    let out = Output { json: cli.json, settings };

    debug!(command = ?cli.command, "dispatching");

    match &cli.command {
        Commands::Convert { value, from, to, category } => {
            run_convert(&out, *value, from, to, category.as_deref())
        }
        Commands::Units { category } => run_units(&out, category.as_deref()),
        Commands::FuelEconomy { value, from, to } => run_fuel_economy(&out, *value, from, to),
        Commands::FuelCost {
            distance,
            economy,
            price,
            distance_unit,
            economy_unit,
            price_unit,
        } => {
            let input = FuelCostInput {
                distance: *distance,
                distance_unit: length_unit(distance_unit)?,
                fuel_economy: *economy,
                fuel_economy_unit: economy_unit_from(economy_unit)?,
                fuel_price: *price,
                price_unit: volume_unit(price_unit)?,
            };
            out.calculator(CalculatorInput::FuelCost(input))
        }
        Commands::Carbon {
            distance,
            economy,
            distance_unit,
            economy_unit,
            fuel,
        } => {
            let fuel_type = FuelType::from_str_flexible(fuel)
                .ok_or_else(|| CalcError::invalid_input("fuel", fuel, "Expected gasoline or diesel"))?;
            let input = CarbonFootprintInput {
                distance: *distance,
                distance_unit: length_unit(distance_unit)?,
                fuel_economy: *economy,
                fuel_economy_unit: economy_unit_from(economy_unit)?,
                fuel_type,
            };
            out.calculator(CalculatorInput::CarbonFootprint(input))
        }
        Commands::EvRange {
            battery_kwh,
            efficiency,
            efficiency_unit,
            usable_percent,
            price,
        } => {
            let unit = EfficiencyUnit::from_code(efficiency_unit)
                .ok_or_else(|| CalcError::invalid_unit("efficiency", efficiency_unit.as_str()))?;
            let input = EvRangeInput {
                battery_kwh: *battery_kwh,
                efficiency: *efficiency,
                efficiency_unit: unit,
                usable_percent: *usable_percent,
                electricity_price: *price,
            };
            out.calculator(CalculatorInput::EvRange(input))
        }
        Commands::HeatingCost {
            heat_load,
            fuel,
            efficiency,
            price,
            load_unit,
        } => {
            let fuel = HeatingFuel::from_str_flexible(fuel)
                .ok_or_else(|| CalcError::invalid_input("fuel", fuel, "Unknown heating fuel"))?;
            let heat_load_unit = EnergyUnit::from_code(load_unit)
                .ok_or_else(|| CalcError::invalid_unit("energy", load_unit.as_str()))?;
            let input = HeatingCostInput {
                heat_load: *heat_load,
                heat_load_unit,
                fuel,
                efficiency_percent: *efficiency,
                price_per_unit: *price,
            };
            out.calculator(CalculatorInput::HeatingCost(input))
        }
        Commands::Run { file } => {
            let json = match file {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read `{}`", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read calculator input from stdin")?;
                    buf
                }
            };
            let input: CalculatorInput = serde_json::from_str(&json).map_err(CalcError::from)?;
            out.calculator(input)
        }
    }
}

fn run_convert(out: &Output, value: f64, from: &str, to: &str, category: Option<&str>) -> Result<String> {
    let category = match category {
        Some(name) => Category::from_str_flexible(name)?,
        None => Unit::find(from)
            .map(|unit| unit.category())
            .ok_or_else(|| CalcError::invalid_unit("any", from))?,
    };

    let result = ConversionRequest::new(value, category, from, to).execute()?;
    if out.json {
        return out.to_json(&result);
    }

    let from_unit = Unit::parse(category, from)?;
    let to_unit = Unit::parse(category, to)?;
    Ok(format!(
        "{} = {}",
        format_quantity(value, from_unit, &out.settings),
        format_quantity(result.value, to_unit, &out.settings)
    ))
}

fn run_units(out: &Output, category: Option<&str>) -> Result<String> {
    let mut entries = catalog();
    if let Some(name) = category {
        let wanted = Category::from_str_flexible(name)?;
        entries.retain(|info| info.category == wanted);
    }

    if out.json {
        return out.to_json(&entries);
    }

    let mut text = String::new();
    for info in &entries {
        match &info.base {
            Some(base) => text.push_str(&format!("{} (base: {})\n", info.name, base)),
            None => text.push_str(&format!("{}\n", info.name)),
        }
        for unit in &info.units {
            text.push_str(&format!("  {:<6} {}\n", unit.code, unit.label));
        }
    }
    Ok(text.trim_end().to_string())
}

fn run_fuel_economy(out: &Output, value: f64, from: &str, to: &str) -> Result<String> {
    let from_unit = economy_unit_from(from)?;
    let to_unit = economy_unit_from(to)?;
    let converted = convert_fuel_economy(value, from_unit, to_unit)?;

    if out.json {
        return out.to_json(&json!({ "value": converted, "unit": to_unit.code() }));
    }
    Ok(format!(
        "{} {} = {} {}",
        out.number(value),
        from_unit.display_name(),
        out.number(converted),
        to_unit.display_name()
    ))
}

/// Rendering context shared by every handler
struct Output {
    json: bool,
    settings: FormatSettings,
}

impl Output {
    fn number(&self, value: f64) -> String {
        format_value(value, &self.settings)
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).map_err(|e| CalcError::from(e).into())
    }

    fn calculator(&self, input: CalculatorInput) -> Result<String> {
        let output = input.calculate()?;
        if self.json {
            return self.to_json(&output);
        }
        Ok(self.render(&output))
    }

    fn render(&self, output: &CalculatorOutput) -> String {
        let lines = match output {
            CalculatorOutput::FuelCost(r) => vec![
                format!("Fuel used:     {} L ({} gal)", self.number(r.fuel_used_l), self.number(r.fuel_used_gal)),
                format!("Total cost:    {}", self.number(r.total_cost)),
                format!("Cost per km:   {}", self.number(r.cost_per_km)),
                format!("Cost per mile: {}", self.number(r.cost_per_mile)),
            ],
            CalculatorOutput::CarbonFootprint(r) => vec![
                format!("Fuel used: {} gal", self.number(r.fuel_used_gal)),
                format!("CO₂:       {} kg ({} lb)", self.number(r.co2_kg), self.number(r.co2_lb)),
            ],
            CalculatorOutput::EvRange(r) => {
                let mut lines = vec![
                    format!("Usable energy: {} kWh", self.number(r.usable_kwh)),
                    format!("Range:         {} km ({} mi)", self.number(r.range_km), self.number(r.range_mi)),
                    format!("Equivalent:    {} MPGe", self.number(r.equivalent_mpge)),
                ];
                if let Some(cost) = r.cost_full_charge {
                    lines.push(format!("Full charge:   {}", self.number(cost)));
                }
                lines
            }
            CalculatorOutput::HeatingCost(r) => vec![
                format!("Fuel used:     {} {}", self.number(r.fuel_units), r.fuel_unit),
                format!("Annual cost:   {}", self.number(r.annual_cost)),
                format!("Per MMBtu:     {}", self.number(r.cost_per_million_btu)),
            ],
        };
        lines.join("\n")
    }
}

fn length_unit(code: &str) -> CalcResult<LengthUnit> {
    LengthUnit::from_code(code).ok_or_else(|| CalcError::invalid_unit(Category::Length.code(), code))
}

fn volume_unit(code: &str) -> CalcResult<VolumeUnit> {
    VolumeUnit::from_code(code).ok_or_else(|| CalcError::invalid_unit(Category::Volume.code(), code))
}

fn economy_unit_from(code: &str) -> CalcResult<FuelEconomyUnit> {
    FuelEconomyUnit::from_code(code).ok_or_else(|| CalcError::invalid_unit("fuel_economy", code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Result<String> {
        let cli = CommandLine::try_parse_from(std::iter::once("calc").chain(args.iter().copied()))?;
        execute(&cli)
    }

    fn calc_error(err: &anyhow::Error) -> &CalcError {
        err.downcast_ref::<CalcError>().unwrap()
    }

    #[test]
    fn test_convert_infers_category() {
        assert_eq!(run(&["convert", "1", "mi", "km"]).unwrap(), "1 mi = 1.609344 km");
        assert_eq!(run(&["convert", "-40", "f", "c"]).unwrap(), "-40 °F = -40 °C");
    }

    #[test]
    fn test_convert_explicit_category() {
        let text = run(&["convert", "12", "in", "cm", "--category", "length"]).unwrap();
        assert_eq!(text, "12 in = 30.48 cm");
    }

    #[test]
    fn test_convert_json() {
        let text = run(&["--json", "convert", "0", "c", "k"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["unit"], "k");
        assert!((value["value"].as_f64().unwrap() - 273.15).abs() < 1e-9);
    }

    #[test]
    fn test_convert_json_non_finite() {
        let text = run(&["--json", "convert", "nan", "m", "km"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["value"], "NaN");

        let result: calc_core::ConversionResult = serde_json::from_str(&text).unwrap();
        assert!(result.value.is_nan());
    }

    #[test]
    fn test_convert_cross_category() {
        let err = run(&["convert", "1", "mi", "kg"]).unwrap_err();
        assert_eq!(calc_error(&err).error_code(), "INVALID_UNIT");
    }

    #[test]
    fn test_convert_unknown_unit() {
        let err = run(&["convert", "1", "furlong", "m"]).unwrap_err();
        assert_eq!(calc_error(&err).error_code(), "INVALID_UNIT");

        let err = run(&["convert", "1", "m", "km", "--category", "speed"]).unwrap_err();
        assert_eq!(calc_error(&err).error_code(), "UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_precision_flag() {
        let text = run(&["--precision", "3", "convert", "1", "mi", "km"]).unwrap();
        assert_eq!(text, "1 mi = 1.61 km");
    }

    #[test]
    fn test_units_listing() {
        let text = run(&["units", "temperature"]).unwrap();
        assert!(text.starts_with("Temperature"));
        assert!(text.contains("Kelvin"));
        assert!(!text.contains("Miles"));

        let json = run(&["--json", "units"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), Category::ALL.len());
    }

    #[test]
    fn test_fuel_economy() {
        let text = run(&["--precision", "4", "fuel-economy", "30", "mpg", "l_per_100km"]).unwrap();
        assert!(text.ends_with("= 7.84 Liters per 100 km (L/100km)"), "{}", text);
    }

    #[test]
    fn test_fuel_cost_text() {
        let text = run(&["fuel-cost", "300", "30", "3.5"]).unwrap();
        assert!(text.contains("Total cost:    35\n"), "{}", text);
    }

    #[test]
    fn test_carbon_rejects_unknown_fuel() {
        let err = run(&["carbon", "100", "30", "--fuel", "kerosene"]).unwrap_err();
        assert_eq!(calc_error(&err).error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_heating_cost_json() {
        let text = run(&["--json", "heating-cost", "800", "natural_gas", "80", "1.25", "--load-unit", "therm"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "HeatingCost");
        assert!((value["annual_cost"].as_f64().unwrap() - 1250.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.json");
        std::fs::write(
            &path,
            r#"{"type": "EvRange", "battery_kwh": 75.0, "efficiency": 3.0, "efficiency_unit": "mi_per_kwh"}"#,
        )
        .unwrap();

        let text = run(&["run", path.to_str().unwrap()]).unwrap();
        assert!(text.contains("Range:         362.1024 km (225 mi)"), "{}", text);
        assert!(!text.contains("Full charge"));
    }

    #[test]
    fn test_run_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"type": "Teleport"}"#).unwrap();

        let err = run(&["run", path.to_str().unwrap()]).unwrap_err();
        assert_eq!(calc_error(&err).error_code(), "SERIALIZATION_ERROR");
    }
}
