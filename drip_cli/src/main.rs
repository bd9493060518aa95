//! # Driplay CLI
//!
//! Command line front end for drip_core: size a layout, browse the preset
//! catalog and write SVG or DXF drawings.
//!
//! ```text
//! drip calc --preset orchard
//! drip calc --set plotLength=20 --set pumpPressure=2.5 --json
//! drip presets --category garden
//! drip export --params field.json --format dxf --out drawings/
//! ```

mod commands;
mod logger;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use drip_core::errors::DesignError;

/// Drip irrigation layout calculator
#[derive(Parser)]
#[command(name = "drip")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Size drip irrigation layouts and export SVG/DXF drawings", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); falls back to RUST_LOG
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate system values for a parameter set
    Calc(commands::calc::CalcArgs),
    /// List or show built-in presets
    Presets(commands::presets::PresetsArgs),
    /// Write SVG and/or DXF drawings
    Export(commands::export::ExportArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logging(cli.log_level.as_deref());

    let result = match cli.command {
        Commands::Calc(args) => commands::calc::execute(args),
        Commands::Presets(args) => commands::presets::execute(args),
        Commands::Export(args) => commands::export::execute(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_error(e: &DesignError) {
    log::debug!("command failed with {}", e.error_code());
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}
