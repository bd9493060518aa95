//! `drip export`: write drawings to disk.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use drip_core::calculations::calculate_system;
use drip_core::errors::DesignResult;
use drip_core::export::{export_with, ExportFormat};
use drip_core::file_io::{load_settings, write_export};

use super::InputArgs;

/// Which documents to write.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatChoice {
    Svg,
    Dxf,
    All,
}

impl FormatChoice {
    fn formats(self) -> &'static [ExportFormat] {
        match self {
            FormatChoice::Svg => &[ExportFormat::Svg],
            FormatChoice::Dxf => &[ExportFormat::Dxf],
            FormatChoice::All => &ExportFormat::ALL,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Document format
    #[arg(short, long, value_enum, default_value_t = FormatChoice::All)]
    pub format: FormatChoice,

    /// Output directory (overrides the settings file)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// JSON settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: ExportArgs) -> DesignResult<()> {
    let settings = load_settings(args.config.as_deref())?;
    let params = args.input.resolve()?;
    let calc = calculate_system(&params);

    let out_dir = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.export.output_dir));
    let svg_options = settings.to_svg_options();

    for format in args.format.formats() {
        let doc = export_with(&params, &calc, *format, &svg_options);
        let path = write_export(&doc, &out_dir, settings.export.file_name(*format))?;
        println!("{} ({})", path.display(), doc.mime_type());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_choice_expands() {
        assert_eq!(FormatChoice::Svg.formats(), &[ExportFormat::Svg]);
        assert_eq!(FormatChoice::All.formats().len(), 2);
    }
}
