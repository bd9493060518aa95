//! `drip presets`: browse the built-in catalog.

use clap::Args;
use drip_core::errors::DesignResult;
use drip_core::presets::{self, Preset, PresetCategory};

#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Only list one category (residential, commercial, garden, agricultural)
    #[arg(long)]
    pub category: Option<String>,

    /// Show one preset's parameters
    #[arg(long, conflicts_with = "category")]
    pub show: Option<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: PresetsArgs) -> DesignResult<()> {
    if let Some(id) = &args.show {
        let preset = presets::require(id)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(preset)?);
        } else {
            print_preset(preset);
        }
        return Ok(());
    }

    let selected: Vec<&Preset> = match &args.category {
        Some(name) => presets::list_by_category(name.parse::<PresetCategory>()?),
        None => presets::all_presets().iter().collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    for category in PresetCategory::ALL {
        let in_category: Vec<_> = selected.iter().filter(|p| p.category == category).collect();
        if in_category.is_empty() {
            continue;
        }
        println!("{}:", category);
        for preset in in_category {
            println!("  {:<22} {}", preset.id, preset.name);
        }
    }
    Ok(())
}

fn print_preset(preset: &Preset) {
    println!("{} ({})", preset.name, preset.id);
    println!("{}", preset.description);
    println!();
    for (name, value) in preset.params.fields() {
        println!("  {:<18} {}", name, value);
    }
}
