//! # Layout Geometry
//!
//! Positions of the mainline, laterals, emitters and soil sensors, in plot
//! meters. The plot origin is the corner where the mainline meets the first
//! lateral; x runs along the laterals, y along the mainline.
//!
//! Every renderer builds its drawing from a [`Layout`] and maps it through a
//! [`Viewport`]. Renderers only differ in scale, origin and decoration, so
//! emitter `(i, j)` is always at `(j * emitter spacing, i * lateral spacing)`.
//!
//! ```text
//!   mainline
//!      |  lateral 0  o  o  o  o  o  o ...   (y = 0)
//!      |  lateral 1  o  o  o  o  o  o ...   (y = 1 * spacing)
//!      |  ...
//!   <->  MAINLINE_CLEARANCE_M
//! ```

use serde::Serialize;

use crate::calculations::CalculatedValues;
use crate::params::IrrigationParams;

/// Distance between the mainline and the plot edge (m)
pub const MAINLINE_CLEARANCE_M: f64 = 0.5;

/// Soil moisture sensor positions as fractions of plot length and width
pub const SENSOR_FRACTIONS: [(f64, f64); 2] = [(0.25, 0.33), (0.75, 0.66)];

/// A point in plot meters (or renderer units after mapping).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A straight pipe run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// One emitter on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmitterPosition {
    /// Lateral index `i`
    pub lateral: u32,
    /// Index along the lateral `j`
    pub index: u32,
    pub position: Point,
}

/// One lateral line with its emitter row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lateral {
    pub index: u32,
    /// Runs from the mainline to the far plot edge
    pub segment: Segment,
    emitter_count: u32,
    emitter_spacing_m: f64,
}

impl Lateral {
    /// Offset of this lateral from the near plot edge (m)
    pub fn offset_m(&self) -> f64 {
        self.segment.start.y
    }

    /// The tee where the lateral leaves the mainline
    pub fn header(&self) -> Point {
        self.segment.start
    }

    /// Emitters on this lateral, nearest the mainline first.
    pub fn emitters(&self) -> impl Iterator<Item = EmitterPosition> + '_ {
        let y = self.offset_m();
        (0..self.emitter_count).map(move |j| EmitterPosition {
            lateral: self.index,
            index: j,
            position: Point::new(f64::from(j) * self.emitter_spacing_m, y),
        })
    }
}

/// The complete positioned layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub plot_length_m: f64,
    pub plot_width_m: f64,
    pub mainline: Segment,
    pub laterals: Vec<Lateral>,
    pub sensors: [Point; 2],
}

impl Layout {
    /// Position everything for one parameter snapshot.
    ///
    /// Counts come from `calc`; spacings and plot size from `params`.
    pub fn new(params: &IrrigationParams, calc: &CalculatedValues) -> Self {
        let length = params.plot_length_m;
        let width = params.plot_width_m;
        let mainline_x = -MAINLINE_CLEARANCE_M;

        let laterals = (0..calc.num_laterals)
            .map(|i| {
                let y = f64::from(i) * params.lateral_spacing_m;
                Lateral {
                    index: i,
                    segment: Segment {
                        start: Point::new(mainline_x, y),
                        end: Point::new(length, y),
                    },
                    emitter_count: calc.emitters_per_lateral,
                    emitter_spacing_m: params.emitter_spacing_m,
                }
            })
            .collect();

        let sensors = SENSOR_FRACTIONS.map(|(fx, fy)| Point::new(length * fx, width * fy));

        Layout {
            plot_length_m: length,
            plot_width_m: width,
            mainline: Segment {
                start: Point::new(mainline_x, 0.0),
                end: Point::new(mainline_x, width),
            },
            laterals,
            sensors,
        }
    }

    /// Every emitter, lateral by lateral.
    pub fn emitters(&self) -> impl Iterator<Item = EmitterPosition> + '_ {
        self.laterals.iter().flat_map(|lateral| lateral.emitters())
    }

    /// Number of emitters placed.
    pub fn emitter_count(&self) -> u64 {
        self.laterals.iter().map(|l| u64::from(l.emitter_count)).sum()
    }

    /// x coordinate of the mainline (m)
    pub fn mainline_x(&self) -> f64 {
        self.mainline.start.x
    }
}

/// Maps plot meters into a renderer's coordinate system.
///
/// `mapped = origin + meters * scale` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Renderer units per meter
    pub scale: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Viewport {
    pub fn new(scale: f64, origin_x: f64, origin_y: f64) -> Self {
        Viewport { scale, origin_x, origin_y }
    }

    pub fn x(&self, meters: f64) -> f64 {
        self.origin_x + meters * self.scale
    }

    pub fn y(&self, meters: f64) -> f64 {
        self.origin_y + meters * self.scale
    }

    pub fn point(&self, p: Point) -> Point {
        Point::new(self.x(p.x), self.y(p.y))
    }

    /// Scale a length without translating it.
    pub fn length(&self, meters: f64) -> f64 {
        meters * self.scale
    }

    /// Inverse of [`Viewport::point`].
    pub fn unmap(&self, p: Point) -> Point {
        Point::new((p.x - self.origin_x) / self.scale, (p.y - self.origin_y) / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate_system;
    use crate::params::default_params;

    fn default_layout() -> Layout {
        let params = default_params();
        Layout::new(&params, &calculate_system(&params))
    }

    #[test]
    fn test_lateral_count_and_offsets() {
        let layout = default_layout();
        assert_eq!(layout.laterals.len(), 10);
        assert_eq!(layout.laterals[0].offset_m(), 0.0);
        assert_eq!(layout.laterals[3].offset_m(), 3.0 * 0.5);
        for lateral in &layout.laterals {
            assert_eq!(lateral.segment.start.x, -MAINLINE_CLEARANCE_M);
            assert_eq!(lateral.segment.end.x, 10.0);
        }
    }

    #[test]
    fn test_emitters_lie_on_their_lateral() {
        let layout = default_layout();
        assert_eq!(layout.emitter_count(), 330);
        assert_eq!(layout.emitters().count(), 330);
        for e in layout.emitters() {
            assert_eq!(e.position.y, f64::from(e.lateral) * 0.5);
            assert_eq!(e.position.x, f64::from(e.index) * 0.3);
        }
    }

    #[test]
    fn test_mainline_spans_plot_width() {
        let layout = default_layout();
        assert_eq!(layout.mainline.start, Point::new(-0.5, 0.0));
        assert_eq!(layout.mainline.end, Point::new(-0.5, 5.0));
    }

    #[test]
    fn test_sensor_positions() {
        let layout = default_layout();
        assert_eq!(layout.sensors[0], Point::new(2.5, 5.0 * 0.33));
        assert_eq!(layout.sensors[1], Point::new(7.5, 5.0 * 0.66));
    }

    #[test]
    fn test_no_laterals_means_no_emitters() {
        let mut params = default_params();
        params.lateral_spacing_m = 6.0;
        let layout = Layout::new(&params, &calculate_system(&params));
        assert!(layout.laterals.is_empty());
        assert_eq!(layout.emitters().count(), 0);
    }

    #[test]
    fn test_viewport_roundtrip() {
        let vp = Viewport::new(50.0, 150.0, 150.0);
        let p = Point::new(0.9, 4.5);
        let mapped = vp.point(p);
        assert_eq!(mapped, Point::new(150.0 + 0.9 * 50.0, 150.0 + 4.5 * 50.0));
        let back = vp.unmap(mapped);
        assert!((back.x - p.x).abs() < 1e-12);
        assert!((back.y - p.y).abs() < 1e-12);
        assert_eq!(Viewport::new(1.0, 0.0, 0.0).point(p), p);
    }
}
