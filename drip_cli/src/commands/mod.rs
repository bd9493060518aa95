//! Subcommands and the input options they share.

pub mod calc;
pub mod export;
pub mod presets;

use std::path::PathBuf;

use clap::Args;
use drip_core::errors::{DesignError, DesignResult};
use drip_core::file_io::load_params;
use drip_core::params::{default_params, IrrigationParams};
use drip_core::presets::require as require_preset;

/// Where the parameter set comes from.
///
/// Base values come from `--params` or `--preset` (defaults otherwise);
/// `--set` overrides are applied on top, in order.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Start from a built-in preset
    #[arg(long, conflicts_with = "params")]
    pub preset: Option<String>,

    /// Start from a JSON parameter file
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Override one field by wire name, e.g. plotLength=20 (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub overrides: Vec<String>,
}

impl InputArgs {
    /// Resolve and validate the parameter set.
    pub fn resolve(&self) -> DesignResult<IrrigationParams> {
        let mut params = if let Some(path) = &self.params {
            log::info!("loading parameters from {}", path.display());
            load_params(path)?
        } else if let Some(id) = &self.preset {
            log::info!("using preset '{}'", id);
            require_preset(id)?.params
        } else {
            default_params()
        };

        for item in &self.overrides {
            let (name, value) = parse_override(item)?;
            log::debug!("override {} = {}", name, value);
            params.set_field(name, value)?;
        }

        params.validate()?;
        Ok(params)
    }
}

fn parse_override(item: &str) -> DesignResult<(&str, f64)> {
    let (name, raw) = item
        .split_once('=')
        .ok_or_else(|| DesignError::invalid_input(item, "", "Expected NAME=VALUE"))?;
    let name = name.trim();
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| DesignError::invalid_input(name, raw.trim(), e.to_string()))?;
    Ok((name, value))
}
