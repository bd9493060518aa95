//! # Unit Types
//!
//! Lightweight metric wrappers for the hydraulic quantities the engine
//! produces. They serialize as bare numbers and convert with `From`.
//!
//! ## Units
//!
//! - Length: meters (m), millimeters (mm) for pipe diameters
//! - Flow: liters per hour (L/h) per emitter, liters per minute (L/min) per system
//! - Pressure: bar, with a conversion to meters of water head
//!
//! ## Example
//!
//! ```rust
//! use drip_core::units::{LitersPerHour, LitersPerMinute};
//!
//! let emitter = LitersPerHour(120.0);
//! let per_minute: LitersPerMinute = emitter.into();
//! assert_eq!(per_minute.0, 2.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Meters of water column per bar (at 4 °C, standard gravity)
pub const METERS_HEAD_PER_BAR: f64 = 10.197_162;

// ============================================================================
// Flow Units
// ============================================================================

/// Flow in liters per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LitersPerHour(pub f64);

/// Flow in liters per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LitersPerMinute(pub f64);

impl From<LitersPerHour> for LitersPerMinute {
    fn from(lph: LitersPerHour) -> Self {
        LitersPerMinute(lph.0 / 60.0)
    }
}

impl From<LitersPerMinute> for LitersPerHour {
    fn from(lpm: LitersPerMinute) -> Self {
        LitersPerHour(lpm.0 * 60.0)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in bar
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bar(pub f64);

/// Pressure expressed as meters of water head
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetersHead(pub f64);

impl From<Bar> for MetersHead {
    fn from(bar: Bar) -> Self {
        MetersHead(bar.0 * METERS_HEAD_PER_BAR)
    }
}

impl From<MetersHead> for Bar {
    fn from(head: MetersHead) -> Self {
        Bar(head.0 / METERS_HEAD_PER_BAR)
    }
}

impl Sub for Bar {
    type Output = Bar;
    fn sub(self, rhs: Bar) -> Bar {
        Bar(self.0 - rhs.0)
    }
}

impl Add for Bar {
    type Output = Bar;
    fn add(self, rhs: Bar) -> Bar {
        Bar(self.0 + rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_conversion() {
        let lpm: LitersPerMinute = LitersPerHour(660.0).into();
        assert_eq!(lpm.0, 11.0);

        let back: LitersPerHour = lpm.into();
        assert_eq!(back.0, 660.0);
    }

    #[test]
    fn test_pressure_to_head() {
        let head: MetersHead = Bar(1.0).into();
        assert!((head.0 - 10.197).abs() < 0.001);

        let bar: Bar = MetersHead(20.394_324).into();
        assert!((bar.0 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_bar_subtraction_order() {
        // (2.0 - 0.4) - 0.2 in IEEE arithmetic
        let tdh = Bar(2.0) - Bar(0.4) - Bar(0.2);
        assert_eq!(tdh.0, 2.0 - 0.4 - 0.2);
    }
}
