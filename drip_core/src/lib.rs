//! # drip_core - Drip Irrigation Layout Engine
//!
//! `drip_core` sizes a rectangular drip irrigation system and draws it. From
//! nine plot and hardware parameters it derives lateral and emitter counts,
//! flow, run time and pump head, then renders the layout as an SVG schematic
//! or a layered DXF drawing. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from a parameter snapshot to results
//! - **One Geometry**: SVG and DXF are built from the same [`layout::Layout`]
//! - **JSON-First**: Parameters, results and errors all serialize
//! - **Rich Errors**: Structured error types at the crate edges
//!
//! ## Quick Start
//!
//! ```rust
//! use drip_core::{calculate_system, default_params, render_dxf, render_svg};
//!
//! let params = default_params();
//! let calc = calculate_system(&params);
//! assert_eq!(calc.total_emitters, 330);
//!
//! let svg = render_svg(&params, &calc);
//! let dxf = render_dxf(&params, &calc);
//! assert!(svg.contains("<svg") && dxf.ends_with("EOF\n"));
//! ```
//!
//! ## Modules
//!
//! - [`params`] - Input parameters, defaults and bounds
//! - [`calculations`] - The calculation engine
//! - [`layout`] - Shared positioned geometry
//! - [`export`] - SVG and DXF generators
//! - [`presets`] - Built-in scenario catalog
//! - [`settings`] - Export configuration
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Parameter/settings loading and atomic document writes

pub mod calculations;
pub mod errors;
pub mod export;
pub mod file_io;
pub mod layout;
pub mod numfmt;
pub mod params;
pub mod presets;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate_system, CalculatedValues, PressureStatus};
pub use errors::{DesignError, DesignResult};
pub use export::dxf::render_dxf;
pub use export::svg::render_svg;
pub use export::{export, ExportDocument, ExportFormat, ExportRequest};
pub use params::{default_params, IrrigationParams};
pub use presets::{Preset, PresetCategory};
pub use settings::DesignSettings;
