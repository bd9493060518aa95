//! # Irrigation Parameters
//!
//! The input data contract: nine metric quantities describing the plot, the
//! drip hardware and the water supply. Field names carry their unit as a
//! suffix; the JSON wire names are the camelCase names front ends use.
//!
//! The calculation engine assumes parameters are already inside
//! [`PARAM_BOUNDS`]. Callers that accept raw user input should run
//! [`IrrigationParams::validate`] first.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "plotLength": 10.0,
//!   "plotWidth": 5.0,
//!   "lateralSpacing": 0.5,
//!   "emitterSpacing": 0.3,
//!   "emitterFlowRate": 2.0,
//!   "mainlineDiameter": 25.0,
//!   "lateralDiameter": 16.0,
//!   "pumpPressure": 2.0,
//!   "tankCapacity": 1000.0
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};

/// Input parameters for one drip irrigation layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrigationParams {
    /// Plot length along the laterals, in meters
    #[serde(rename = "plotLength")]
    pub plot_length_m: f64,

    /// Plot width along the mainline, in meters
    #[serde(rename = "plotWidth")]
    pub plot_width_m: f64,

    /// Distance between adjacent laterals, in meters
    #[serde(rename = "lateralSpacing")]
    pub lateral_spacing_m: f64,

    /// Distance between adjacent emitters on a lateral, in meters
    #[serde(rename = "emitterSpacing")]
    pub emitter_spacing_m: f64,

    /// Discharge of a single emitter, in liters per hour
    #[serde(rename = "emitterFlowRate")]
    pub emitter_flow_lph: f64,

    /// Mainline pipe diameter in millimeters (annotation only)
    #[serde(rename = "mainlineDiameter")]
    pub mainline_diameter_mm: f64,

    /// Lateral pipe diameter in millimeters (annotation only)
    #[serde(rename = "lateralDiameter")]
    pub lateral_diameter_mm: f64,

    /// Pump outlet pressure, in bar
    #[serde(rename = "pumpPressure")]
    pub pump_pressure_bar: f64,

    /// Supply tank capacity, in liters
    #[serde(rename = "tankCapacity")]
    pub tank_capacity_l: f64,
}

/// Create a fresh default parameter set (a 10 m x 5 m residential plot).
///
/// Every call returns a new value; there is no shared default instance.
///
/// ```rust
/// use drip_core::params::default_params;
///
/// let mut params = default_params();
/// params.plot_length_m = 12.0;
/// assert_eq!(default_params().plot_length_m, 10.0);
/// ```
pub fn default_params() -> IrrigationParams {
    IrrigationParams {
        plot_length_m: 10.0,
        plot_width_m: 5.0,
        lateral_spacing_m: 0.5,
        emitter_spacing_m: 0.3,
        emitter_flow_lph: 2.0,
        mainline_diameter_mm: 25.0,
        lateral_diameter_mm: 16.0,
        pump_pressure_bar: 2.0,
        tank_capacity_l: 1000.0,
    }
}

impl Default for IrrigationParams {
    fn default() -> Self {
        default_params()
    }
}

/// Inclusive validity range for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamBounds {
    /// JSON wire name of the field
    pub field: &'static str,
    /// Human readable label
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

impl ParamBounds {
    /// Check whether a value lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Bounds for every field, in declaration order.
pub const PARAM_BOUNDS: [ParamBounds; 9] = [
    ParamBounds { field: "plotLength", label: "Plot Length", min: 1.0, max: 100.0, unit: "m" },
    ParamBounds { field: "plotWidth", label: "Plot Width", min: 1.0, max: 50.0, unit: "m" },
    ParamBounds { field: "lateralSpacing", label: "Lateral Spacing", min: 0.1, max: 5.0, unit: "m" },
    ParamBounds { field: "emitterSpacing", label: "Emitter Spacing", min: 0.1, max: 2.0, unit: "m" },
    ParamBounds { field: "emitterFlowRate", label: "Emitter Flow Rate", min: 0.5, max: 10.0, unit: "L/h" },
    ParamBounds { field: "mainlineDiameter", label: "Mainline Diameter", min: 12.0, max: 75.0, unit: "mm" },
    ParamBounds { field: "lateralDiameter", label: "Lateral Diameter", min: 8.0, max: 32.0, unit: "mm" },
    ParamBounds { field: "pumpPressure", label: "Pump Pressure", min: 0.5, max: 6.0, unit: "bar" },
    ParamBounds { field: "tankCapacity", label: "Tank Capacity", min: 50.0, max: 50000.0, unit: "L" },
];

impl IrrigationParams {
    /// Field values paired with their wire names, in [`PARAM_BOUNDS`] order.
    pub fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("plotLength", self.plot_length_m),
            ("plotWidth", self.plot_width_m),
            ("lateralSpacing", self.lateral_spacing_m),
            ("emitterSpacing", self.emitter_spacing_m),
            ("emitterFlowRate", self.emitter_flow_lph),
            ("mainlineDiameter", self.mainline_diameter_mm),
            ("lateralDiameter", self.lateral_diameter_mm),
            ("pumpPressure", self.pump_pressure_bar),
            ("tankCapacity", self.tank_capacity_l),
        ]
    }

    /// Set a field by its wire name.
    ///
    /// Used by front ends that apply `name=value` overrides.
    pub fn set_field(&mut self, field: &str, value: f64) -> DesignResult<()> {
        let slot = match field {
            "plotLength" => &mut self.plot_length_m,
            "plotWidth" => &mut self.plot_width_m,
            "lateralSpacing" => &mut self.lateral_spacing_m,
            "emitterSpacing" => &mut self.emitter_spacing_m,
            "emitterFlowRate" => &mut self.emitter_flow_lph,
            "mainlineDiameter" => &mut self.mainline_diameter_mm,
            "lateralDiameter" => &mut self.lateral_diameter_mm,
            "pumpPressure" => &mut self.pump_pressure_bar,
            "tankCapacity" => &mut self.tank_capacity_l,
            _ => {
                return Err(DesignError::invalid_input(
                    field,
                    value.to_string(),
                    "Unknown parameter name",
                ))
            }
        };
        *slot = value;
        Ok(())
    }

    /// Validate every field against [`PARAM_BOUNDS`].
    ///
    /// Returns the first violation found. The calculation engine does not
    /// call this; it is for front ends handling raw input.
    pub fn validate(&self) -> DesignResult<()> {
        for ((field, value), bounds) in self.fields().iter().zip(PARAM_BOUNDS.iter()) {
            if !value.is_finite() {
                return Err(DesignError::invalid_input(
                    *field,
                    value.to_string(),
                    "Value must be a finite number",
                ));
            }
            if !bounds.contains(*value) {
                return Err(DesignError::invalid_input(
                    *field,
                    value.to_string(),
                    format!(
                        "{} must be between {} and {} {}",
                        bounds.label, bounds.min, bounds.max, bounds.unit
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Parameter generators for property tests.
#[cfg(test)]
pub(crate) mod strategies {
    use proptest::prelude::*;

    use super::IrrigationParams;

    fn assemble(
        (l, w, ls, es, q, md, ld, p, t): (f64, f64, f64, f64, f64, f64, f64, f64, f64),
    ) -> IrrigationParams {
        IrrigationParams {
            plot_length_m: l,
            plot_width_m: w,
            lateral_spacing_m: ls,
            emitter_spacing_m: es,
            emitter_flow_lph: q,
            mainline_diameter_mm: md,
            lateral_diameter_mm: ld,
            pump_pressure_bar: p,
            tank_capacity_l: t,
        }
    }

    /// Anything inside the bounds table.
    pub fn valid_params() -> impl Strategy<Value = IrrigationParams> {
        (
            1.0..=100.0f64,
            1.0..=50.0f64,
            0.1..=5.0f64,
            0.1..=2.0f64,
            0.5..=10.0f64,
            12.0..=75.0f64,
            8.0..=32.0f64,
            0.5..=6.0f64,
            50.0..=50000.0f64,
        )
            .prop_map(assemble)
    }

    /// In-bounds parameters with at most 100 x 30 emitters, so full
    /// documents stay quick to render.
    pub fn drawable_params() -> impl Strategy<Value = IrrigationParams> {
        (
            1.0..=30.0f64,
            1.0..=15.0f64,
            0.5..=5.0f64,
            0.3..=2.0f64,
            0.5..=10.0f64,
            12.0..=75.0f64,
            8.0..=32.0f64,
            0.5..=6.0f64,
            50.0..=50000.0f64,
        )
            .prop_map(assemble)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(default_params().validate().is_ok());
    }

    #[test]
    fn test_factory_returns_independent_values() {
        let mut a = default_params();
        a.plot_width_m = 42.0;
        let b = default_params();
        assert_eq!(a.plot_width_m, 42.0);
        assert_eq!(b.plot_width_m, 5.0);
        assert_ne!(a, b);
        assert_eq!(IrrigationParams::default(), b);
    }

    #[test]
    fn test_json_uses_wire_names() {
        let json = serde_json::to_string(&default_params()).unwrap();
        assert!(json.contains("\"plotLength\":10.0"));
        assert!(json.contains("\"tankCapacity\":1000.0"));

        let parsed: IrrigationParams = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, default_params());
    }

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        let mut params = default_params();
        params.lateral_spacing_m = 6.0;
        let err = params.validate().unwrap_err();
        match err {
            DesignError::InvalidInput { field, .. } => assert_eq!(field, "lateralSpacing"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_validate_bounds_are_inclusive() {
        let mut params = default_params();
        params.plot_length_m = 100.0;
        params.tank_capacity_l = 50.0;
        params.emitter_spacing_m = 0.1;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut params = default_params();
        params.pump_pressure_bar = f64::NAN;
        let err = params.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_set_field() {
        let mut params = default_params();
        params.set_field("emitterFlowRate", 4.0).unwrap();
        assert_eq!(params.emitter_flow_lph, 4.0);
        assert!(params.set_field("flowRate", 1.0).is_err());
    }

    #[test]
    fn test_fields_follow_bounds_order() {
        let params = default_params();
        for ((field, _), bounds) in params.fields().iter().zip(PARAM_BOUNDS.iter()) {
            assert_eq!(*field, bounds.field);
        }
    }
}
