//! # System Calculations
//!
//! The single calculation engine. [`calculate_system`] maps an
//! [`IrrigationParams`] to a [`CalculatedValues`]; every renderer and front
//! end consumes that result instead of recomputing counts on its own.
//!
//! ## Formulas
//!
//! ```text
//! area            = L * W
//! laterals        = floor(W / lateral spacing)
//! emitters/lat    = floor(L / emitter spacing)
//! emitters        = laterals * emitters/lat
//! water required  = emitters * emitter flow            (L/h)
//! total flow      = water required / 60                (L/min)
//! flow/lateral    = emitters/lat * emitter flow / 60   (L/min)
//! irrigation time = tank capacity / water required     (h)
//! TDH             = pump pressure - 0.4 - 0.2          (bar)
//! ```
//!
//! Friction loss and elevation head are fixed allowances, not a hydraulic
//! model. Pipe diameters do not enter any formula.
//!
//! ## Example
//!
//! ```rust
//! use drip_core::calculations::calculate_system;
//! use drip_core::params::default_params;
//!
//! let calc = calculate_system(&default_params());
//! assert_eq!(calc.num_laterals, 10);
//! assert_eq!(calc.emitters_per_lateral, 33);
//! assert_eq!(calc.total_emitters, 330);
//! assert!((calc.total_flow_lpm - 11.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::params::IrrigationParams;
use crate::units::{Bar, LitersPerHour, LitersPerMinute, MetersHead};

/// Fixed friction loss allowance along mainline and laterals (bar)
pub const FRICTION_LOSS_BAR: f64 = 0.4;

/// Fixed elevation head allowance (bar)
pub const ELEVATION_HEAD_BAR: f64 = 0.2;

/// Minimum total dynamic head considered adequate for pressure-compensating emitters (bar)
pub const OPTIMAL_TDH_BAR: f64 = 1.4;

/// Derived quantities for one parameter set.
///
/// Plain value, recomputed on every parameter change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatedValues {
    /// Plot area (m²)
    #[serde(rename = "totalArea")]
    pub total_area_m2: f64,

    /// Number of lateral lines
    #[serde(rename = "numLaterals")]
    pub num_laterals: u32,

    /// Emitters on each lateral
    #[serde(rename = "emittersPerLateral")]
    pub emitters_per_lateral: u32,

    /// Emitters in the whole system
    #[serde(rename = "totalEmitters")]
    pub total_emitters: u64,

    /// System flow (L/min)
    #[serde(rename = "totalFlowRate")]
    pub total_flow_lpm: f64,

    /// Flow into one lateral (L/min)
    #[serde(rename = "flowRatePerLateral")]
    pub flow_per_lateral_lpm: f64,

    /// Hours one full tank lasts.
    ///
    /// `+inf` when the layout has no emitters (NaN if the tank is also empty).
    /// Serializes to `null` in JSON in that case.
    #[serde(rename = "irrigationTime")]
    pub irrigation_time_h: f64,

    /// Net usable pressure after fixed losses (bar). May be negative.
    #[serde(rename = "totalDynamicHead")]
    pub total_dynamic_head_bar: f64,

    /// Water drawn per hour of operation (L/h)
    #[serde(rename = "waterRequired")]
    pub water_required_lph: f64,
}

/// Pressure adequacy as shown next to the TDH value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureStatus {
    /// TDH at or above [`OPTIMAL_TDH_BAR`]
    Optimal,
    /// TDH below [`OPTIMAL_TDH_BAR`]; the design needs a closer look
    ReviewNeeded,
}

impl PressureStatus {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            PressureStatus::Optimal => "Optimal Design",
            PressureStatus::ReviewNeeded => "Review Needed",
        }
    }
}

/// Run the calculation engine.
///
/// Total over any input: never fails and performs no I/O. Inputs outside the
/// documented bounds give degenerate but well-defined numbers (zero counts,
/// negative head, infinite or NaN irrigation time).
pub fn calculate_system(params: &IrrigationParams) -> CalculatedValues {
    let total_area_m2 = params.plot_length_m * params.plot_width_m;
    let num_laterals = floor_count(params.plot_width_m / params.lateral_spacing_m);
    let emitters_per_lateral = floor_count(params.plot_length_m / params.emitter_spacing_m);
    let total_emitters = u64::from(num_laterals) * u64::from(emitters_per_lateral);

    let water_required = LitersPerHour(total_emitters as f64 * params.emitter_flow_lph);
    let total_flow = LitersPerMinute::from(water_required);
    let lateral_flow = LitersPerMinute::from(LitersPerHour(
        f64::from(emitters_per_lateral) * params.emitter_flow_lph,
    ));

    // Unguarded on purpose: zero emitters yields +inf (or NaN for an empty tank)
    let irrigation_time_h = params.tank_capacity_l / water_required.0;

    let tdh = Bar(params.pump_pressure_bar) - Bar(FRICTION_LOSS_BAR) - Bar(ELEVATION_HEAD_BAR);

    CalculatedValues {
        total_area_m2,
        num_laterals,
        emitters_per_lateral,
        total_emitters,
        total_flow_lpm: total_flow.0,
        flow_per_lateral_lpm: lateral_flow.0,
        irrigation_time_h,
        total_dynamic_head_bar: tdh.0,
        water_required_lph: water_required.0,
    }
}

/// Floor a ratio into a count. Saturating: NaN and negatives become 0.
fn floor_count(ratio: f64) -> u32 {
    ratio.floor() as u32
}

impl CalculatedValues {
    /// Whether the layout places at least one emitter.
    pub fn has_emitters(&self) -> bool {
        self.total_emitters > 0
    }

    /// Irrigation time, or `None` when it is not a finite number of hours.
    pub fn irrigation_time_hours(&self) -> Option<f64> {
        if self.irrigation_time_h.is_finite() {
            Some(self.irrigation_time_h)
        } else {
            None
        }
    }

    /// Classify the total dynamic head.
    pub fn pressure_status(&self) -> PressureStatus {
        if self.total_dynamic_head_bar >= OPTIMAL_TDH_BAR {
            PressureStatus::Optimal
        } else {
            PressureStatus::ReviewNeeded
        }
    }

    /// Total dynamic head as meters of water column.
    pub fn total_dynamic_head_m(&self) -> f64 {
        MetersHead::from(Bar(self.total_dynamic_head_bar)).0
    }

    /// Headline efficiency figure shown with the pressure status.
    pub fn system_efficiency_percent(&self) -> u8 {
        match self.pressure_status() {
            PressureStatus::Optimal => 95,
            PressureStatus::ReviewNeeded => 78,
        }
    }
}
