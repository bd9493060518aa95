//! # Preset Catalog
//!
//! Named parameter sets for common irrigation scenarios, grouped by
//! category. The catalog is static: it is built on first access and never
//! changes afterwards.
//!
//! ## Example
//!
//! ```rust
//! use drip_core::presets::{get_by_id, list_by_category, PresetCategory};
//!
//! let gardens = list_by_category(PresetCategory::Garden);
//! assert!(!gardens.is_empty());
//!
//! let orchard = get_by_id("orchard").unwrap();
//! assert_eq!(orchard.params.lateral_spacing_m, 3.0);
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::params::IrrigationParams;

/// Scenario family a preset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Residential,
    Commercial,
    Garden,
    Agricultural,
}

impl PresetCategory {
    /// All categories in display order
    pub const ALL: [PresetCategory; 4] = [
        PresetCategory::Residential,
        PresetCategory::Commercial,
        PresetCategory::Garden,
        PresetCategory::Agricultural,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetCategory::Residential => "residential",
            PresetCategory::Commercial => "commercial",
            PresetCategory::Garden => "garden",
            PresetCategory::Agricultural => "agricultural",
        }
    }
}

impl fmt::Display for PresetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetCategory {
    type Err = DesignError;

    fn from_str(s: &str) -> DesignResult<Self> {
        PresetCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DesignError::UnknownCategory { name: s.to_string() })
    }
}

/// A named, read-only parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    /// Unique identifier (kebab-case)
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: PresetCategory,
    pub params: IrrigationParams,
}

#[allow(clippy::too_many_arguments)]
const fn params(
    plot_length_m: f64,
    plot_width_m: f64,
    lateral_spacing_m: f64,
    emitter_spacing_m: f64,
    emitter_flow_lph: f64,
    mainline_diameter_mm: f64,
    lateral_diameter_mm: f64,
    pump_pressure_bar: f64,
    tank_capacity_l: f64,
) -> IrrigationParams {
    IrrigationParams {
        plot_length_m,
        plot_width_m,
        lateral_spacing_m,
        emitter_spacing_m,
        emitter_flow_lph,
        mainline_diameter_mm,
        lateral_diameter_mm,
        pump_pressure_bar,
        tank_capacity_l,
    }
}

static CATALOG: Lazy<Vec<Preset>> = Lazy::new(|| {
    vec![
        Preset {
            id: "residential-small",
            name: "Small Residential Garden",
            description: "Ideal for home gardens and small lawns (25m\u{b2})",
            category: PresetCategory::Residential,
            params: params(5.0, 5.0, 0.4, 0.3, 2.0, 20.0, 16.0, 1.5, 500.0),
        },
        Preset {
            id: "residential-medium",
            name: "Medium Residential Plot",
            description: "Standard residential irrigation (50m\u{b2})",
            category: PresetCategory::Residential,
            params: params(10.0, 5.0, 0.5, 0.3, 2.0, 25.0, 16.0, 2.0, 1000.0),
        },
        Preset {
            id: "residential-large",
            name: "Large Residential Area",
            description: "Extended residential coverage (100m\u{b2})",
            category: PresetCategory::Residential,
            params: params(10.0, 10.0, 0.5, 0.3, 2.0, 32.0, 16.0, 2.5, 2000.0),
        },
        Preset {
            id: "vegetable-garden",
            name: "Vegetable Garden",
            description: "Optimized for vegetable beds with closer spacing",
            category: PresetCategory::Garden,
            params: params(8.0, 4.0, 0.3, 0.25, 1.5, 20.0, 12.0, 1.5, 500.0),
        },
        Preset {
            id: "greenhouse",
            name: "Greenhouse Setup",
            description: "Dense emitter placement for greenhouse crops",
            category: PresetCategory::Garden,
            params: params(12.0, 6.0, 0.25, 0.2, 1.0, 25.0, 12.0, 2.0, 1000.0),
        },
        Preset {
            id: "orchard",
            name: "Fruit Orchard",
            description: "Wider spacing for tree irrigation",
            category: PresetCategory::Agricultural,
            params: params(20.0, 15.0, 3.0, 2.0, 4.0, 40.0, 20.0, 3.0, 5000.0),
        },
        Preset {
            id: "commercial-landscape",
            name: "Commercial Landscape",
            description: "Large commercial property irrigation",
            category: PresetCategory::Commercial,
            params: params(25.0, 20.0, 0.6, 0.4, 2.5, 50.0, 20.0, 3.5, 10000.0),
        },
        Preset {
            id: "rooftop-garden",
            name: "Rooftop Garden",
            description: "Compact system for urban rooftop gardens",
            category: PresetCategory::Garden,
            params: params(6.0, 3.0, 0.3, 0.25, 1.0, 16.0, 12.0, 1.2, 200.0),
        },
    ]
});

/// Every preset, in catalog order.
pub fn all_presets() -> &'static [Preset] {
    &CATALOG
}

/// Presets in one category, in catalog order.
pub fn list_by_category(category: PresetCategory) -> Vec<&'static Preset> {
    CATALOG.iter().filter(|p| p.category == category).collect()
}

/// Look up a preset by id.
pub fn get_by_id(id: &str) -> Option<&'static Preset> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Like [`get_by_id`], but an unknown id is an error.
pub fn require(id: &str) -> DesignResult<&'static Preset> {
    get_by_id(id).ok_or_else(|| DesignError::preset_not_found(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<_> = all_presets().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), all_presets().len());
        assert_eq!(all_presets().len(), 8);
    }

    #[test]
    fn test_every_preset_is_valid() {
        for preset in all_presets() {
            assert!(preset.params.validate().is_ok(), "{} out of bounds", preset.id);
        }
    }

    #[test]
    fn test_list_by_category() {
        let garden: Vec<_> = list_by_category(PresetCategory::Garden)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(garden, vec!["vegetable-garden", "greenhouse", "rooftop-garden"]);
        assert_eq!(list_by_category(PresetCategory::Commercial).len(), 1);
        assert_eq!(list_by_category(PresetCategory::Residential).len(), 3);
    }

    #[test]
    fn test_get_by_id() {
        let preset = get_by_id("residential-medium").unwrap();
        assert_eq!(preset.params, crate::params::default_params());
        assert!(get_by_id("moon-base").is_none());
        assert_eq!(require("moon-base").unwrap_err().error_code(), "PRESET_NOT_FOUND");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Garden".parse::<PresetCategory>().unwrap(), PresetCategory::Garden);
        assert_eq!(
            " agricultural ".parse::<PresetCategory>().unwrap(),
            PresetCategory::Agricultural
        );
        assert!("industrial".parse::<PresetCategory>().is_err());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&PresetCategory::Commercial).unwrap();
        assert_eq!(json, "\"commercial\"");
    }
}
