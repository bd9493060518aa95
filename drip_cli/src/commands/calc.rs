//! `drip calc`: print calculated system values.

use clap::Args;
use drip_core::calculations::{calculate_system, CalculatedValues};
use drip_core::errors::DesignResult;
use drip_core::numfmt::fixed;
use drip_core::params::IrrigationParams;
use serde::Serialize;

use super::InputArgs;

#[derive(Args, Debug)]
pub struct CalcArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print parameters and results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CalcReport<'a> {
    params: &'a IrrigationParams,
    results: &'a CalculatedValues,
    pressure_status: &'static str,
    system_efficiency_percent: u8,
}

pub fn execute(args: CalcArgs) -> DesignResult<()> {
    let params = args.input.resolve()?;
    let calc = calculate_system(&params);

    if args.json {
        let report = CalcReport {
            params: &params,
            results: &calc,
            pressure_status: calc.pressure_status().label(),
            system_efficiency_percent: calc.system_efficiency_percent(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for line in report_lines(&params, &calc) {
        println!("{}", line);
    }
    Ok(())
}

fn report_lines(params: &IrrigationParams, calc: &CalculatedValues) -> Vec<String> {
    let run_time = match calc.irrigation_time_hours() {
        Some(hours) => format!("{} h", fixed(hours, 2)),
        None => "n/a (no emitters)".to_string(),
    };

    vec![
        "DRIP IRRIGATION SYSTEM".to_string(),
        "======================".to_string(),
        format!(
            "  Plot:              {} x {} m ({} m2)",
            fixed(params.plot_length_m, 1),
            fixed(params.plot_width_m, 1),
            fixed(calc.total_area_m2, 1)
        ),
        format!("  Laterals:          {}", calc.num_laterals),
        format!("  Emitters/lateral:  {}", calc.emitters_per_lateral),
        format!("  Total emitters:    {}", calc.total_emitters),
        format!("  Water required:    {} L/h", fixed(calc.water_required_lph, 1)),
        format!("  Total flow:        {} L/min", fixed(calc.total_flow_lpm, 2)),
        format!("  Flow per lateral:  {} L/min", fixed(calc.flow_per_lateral_lpm, 2)),
        format!("  Irrigation time:   {}", run_time),
        format!(
            "  TDH:               {} bar ({} m head)",
            fixed(calc.total_dynamic_head_bar, 2),
            fixed(calc.total_dynamic_head_m(), 1)
        ),
        format!(
            "  Pressure:          {} ({}% efficiency)",
            calc.pressure_status().label(),
            calc.system_efficiency_percent()
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use drip_core::params::default_params;

    #[test]
    fn test_report_for_defaults() {
        let params = default_params();
        let lines = report_lines(&params, &calculate_system(&params));
        assert!(lines.iter().any(|l| l.ends_with("Total emitters:    330")));
        assert!(lines.iter().any(|l| l.ends_with("Irrigation time:   1.52 h")));
        assert!(lines.iter().any(|l| l.ends_with("TDH:               1.40 bar (14.3 m head)")));
    }

    #[test]
    fn test_report_without_emitters() {
        let mut params = default_params();
        params.emitter_spacing_m = 20.0;
        let lines = report_lines(&params, &calculate_system(&params));
        assert!(lines.iter().any(|l| l.ends_with("n/a (no emitters)")));
    }
}
