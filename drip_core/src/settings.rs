//! # Design Settings
//!
//! User-level configuration for export: where documents go, what they are
//! called, and how the SVG is scaled. Loaded from a JSON file; every field
//! is optional and falls back to its default.
//!
//! ```json
//! {
//!   "export": { "output_dir": "out", "svg_file_name": "field-a.svg" },
//!   "svg": { "scale": 40.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::export::svg::{SvgOptions, DEFAULT_PADDING, DEFAULT_SCALE};
use crate::export::ExportFormat;

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    pub export: ExportSettings,
    pub svg: SvgSettings,
}

/// Output location and file names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub output_dir: String,
    pub svg_file_name: String,
    pub dxf_file_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            output_dir: ".".to_string(),
            svg_file_name: ExportFormat::Svg.file_name().to_string(),
            dxf_file_name: ExportFormat::Dxf.file_name().to_string(),
        }
    }
}

impl ExportSettings {
    /// Configured file name for a format.
    pub fn file_name(&self, format: ExportFormat) -> &str {
        match format {
            ExportFormat::Svg => &self.svg_file_name,
            ExportFormat::Dxf => &self.dxf_file_name,
        }
    }
}

/// SVG rendering knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgSettings {
    /// Pixels per meter
    pub scale: f64,
    /// Margin around the plot (px)
    pub padding: f64,
}

impl Default for SvgSettings {
    fn default() -> Self {
        SvgSettings {
            scale: DEFAULT_SCALE,
            padding: DEFAULT_PADDING,
        }
    }
}

impl DesignSettings {
    /// Reject SVG knobs that would produce a collapsed or mirrored drawing.
    pub fn validate(&self) -> DesignResult<()> {
        let SvgSettings { scale, padding } = self.svg;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(DesignError::invalid_input(
                "svg.scale",
                scale.to_string(),
                "Must be a finite number greater than 0",
            ));
        }
        if !padding.is_finite() || padding < 0.0 {
            return Err(DesignError::invalid_input(
                "svg.padding",
                padding.to_string(),
                "Must be a finite number of at least 0",
            ));
        }
        Ok(())
    }

    /// SVG options dated today.
    pub fn to_svg_options(&self) -> SvgOptions {
        SvgOptions {
            scale: self.svg.scale,
            padding: self.svg.padding,
            ..SvgOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings: DesignSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, DesignSettings::default());
        assert_eq!(settings.export.output_dir, ".");
        assert_eq!(settings.svg.scale, 50.0);
    }

    #[test]
    fn test_partial_override() {
        let settings: DesignSettings =
            serde_json::from_str(r#"{"export": {"dxf_file_name": "field.dxf"}, "svg": {"scale": 40}}"#).unwrap();
        assert_eq!(settings.export.file_name(ExportFormat::Dxf), "field.dxf");
        assert_eq!(settings.export.file_name(ExportFormat::Svg), "irrigation-layout.svg");
        assert_eq!(settings.svg.scale, 40.0);
        assert_eq!(settings.svg.padding, 150.0);
    }

    #[test]
    fn test_svg_options_follow_settings() {
        let mut settings = DesignSettings::default();
        settings.svg.scale = 25.0;
        let options = settings.to_svg_options();
        assert_eq!(options.scale, 25.0);
        assert_eq!(options.padding, 150.0);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(DesignSettings::default().validate().is_ok());

        let mut settings = DesignSettings::default();
        settings.svg.padding = 0.0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_scale() {
        for scale in [0.0, -20.0, f64::NAN, f64::INFINITY] {
            let mut settings = DesignSettings::default();
            settings.svg.scale = scale;
            match settings.validate().unwrap_err() {
                DesignError::InvalidInput { field, .. } => assert_eq!(field, "svg.scale"),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_bad_padding() {
        for padding in [-1.0, f64::NAN] {
            let mut settings = DesignSettings::default();
            settings.svg.padding = padding;
            match settings.validate().unwrap_err() {
                DesignError::InvalidInput { field, .. } => assert_eq!(field, "svg.padding"),
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
