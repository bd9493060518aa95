//! # Document Export
//!
//! Two output formats share one [`Layout`](crate::layout::Layout):
//!
//! - [`svg`] - annotated schematic for screens and print
//! - [`dxf`] - layered CAD drawing in meters
//!
//! Each generator is a pure function of the parameter snapshot and its
//! calculated values. [`export`] picks one by [`ExportFormat`] and returns the
//! document together with its file name and MIME type, ready for
//! [`write_export`](crate::file_io::write_export) or a download.
//!
//! ## Example
//!
//! ```rust
//! use drip_core::calculations::calculate_system;
//! use drip_core::export::{export, ExportFormat};
//! use drip_core::params::default_params;
//!
//! let params = default_params();
//! let doc = export(&params, &calculate_system(&params), ExportFormat::Dxf);
//! assert_eq!(doc.format.file_name(), "irrigation-layout.dxf");
//! assert_eq!(doc.format.mime_type(), "application/dxf");
//! ```

pub mod dxf;
pub mod svg;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculations::{calculate_system, CalculatedValues};
use crate::errors::DesignError;
use crate::params::IrrigationParams;
use svg::SvgOptions;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Svg,
    Dxf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Svg, ExportFormat::Dxf];

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Dxf => "application/dxf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Dxf => "dxf",
        }
    }

    /// Default download name
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "irrigation-layout.svg",
            ExportFormat::Dxf => "irrigation-layout.dxf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "dxf" => Ok(ExportFormat::Dxf),
            _ => Err(DesignError::UnknownFormat { name: s.to_string() }),
        }
    }
}

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub format: ExportFormat,
    pub content: String,
}

impl ExportDocument {
    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Render one format.
///
/// Documents are always produced, even for a layout without emitters; the
/// laterals and components are still drawn.
pub fn export(params: &IrrigationParams, calc: &CalculatedValues, format: ExportFormat) -> ExportDocument {
    export_with(params, calc, format, &SvgOptions::default())
}

/// Render one format, with explicit SVG options.
pub fn export_with(
    params: &IrrigationParams,
    calc: &CalculatedValues,
    format: ExportFormat,
    svg_options: &SvgOptions,
) -> ExportDocument {
    if !calc.has_emitters() {
        log::warn!("exporting {} for a layout with no emitters", format);
    }
    let content = match format {
        ExportFormat::Svg => svg::render_svg_with(params, calc, svg_options),
        ExportFormat::Dxf => dxf::render_dxf(params, calc),
    };
    ExportDocument { format, content }
}

/// A self-contained export job: parameters plus the wanted format.
///
/// Deserializes from `{"params": {...}, "format": "svg"}`, so front ends can
/// hand a request straight through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub params: IrrigationParams,
    pub format: ExportFormat,
}

impl ExportRequest {
    /// Calculate, then render.
    pub fn render(&self) -> ExportDocument {
        let calc = calculate_system(&self.params);
        export(&self.params, &calc, self.format)
    }
}
