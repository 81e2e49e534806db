//! # Calcsuite CLI
//!
//! Command-line front end for `calc_core`: unit conversions, the unit
//! catalog, and the fuel, emissions, EV and heating calculators.
//!
//! ```text
//! calc convert 1 mi km
//! calc --json units temperature
//! calc fuel-cost 300 30 3.50
//! echo '{"type": "EvRange", ...}' | calc run
//! ```

mod commands;
mod logging;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use calc_core::CalcError;

use commands::CommandLine;

fn main() -> ExitCode {
    let cli = CommandLine::parse();
    logging::init_logging(cli.verbose);

    match commands::execute(&cli) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(&err, cli.json);
            ExitCode::FAILURE
        }
    }
}

/// Print an error with its stable code. Under `--json` the structured
/// error goes to stdout in place of the result.
fn report_error(err: &anyhow::Error, json: bool) {
    let Some(calc) = err.downcast_ref::<CalcError>() else {
        eprintln!("Error: {:#}", err);
        return;
    };

    if json {
        match serde_json::to_string_pretty(calc) {
            Ok(text) => println!("{}", text),
            Err(_) => eprintln!("Error [{}]: {}", calc.error_code(), calc),
        }
    } else {
        eprintln!("Error [{}]: {}", calc.error_code(), calc);
    }
}
