//! # DXF Export
//!
//! Builds the layout as a CAD drawing-exchange document. Geometry is drawn at
//! one drawing unit per meter and organized into named layers; component
//! symbols are block definitions placed with INSERT entities.
//!
//! The document is assembled as data ([`DxfDocument`]: layers and entities)
//! and serialized once by [`writer::write_document`]:
//!
//! ```text
//! HEADER    $ACADVER, $INSUNITS (meters), $MEASUREMENT, $LUNITS, $LUPREC
//! TABLES    LTYPE (CONTINUOUS, DASHED), LAYER (one per Layer), STYLE
//! BLOCKS    EMITTER SENSOR TANK PUMP FILTER VALVE CONTROLLER
//! ENTITIES  plot, mainline, laterals, emitters, components, sensors, text
//! EOF
//! ```
//!
//! ## Example
//!
//! ```rust
//! use drip_core::calculations::calculate_system;
//! use drip_core::export::dxf::render_dxf;
//! use drip_core::params::default_params;
//!
//! let params = default_params();
//! let dxf = render_dxf(&params, &calculate_system(&params));
//! assert!(dxf.ends_with("0\nEOF\n"));
//! ```

pub mod reader;
pub mod symbols;
pub mod writer;

use serde::Serialize;

use crate::calculations::CalculatedValues;
use crate::layout::{Layout, Point};
use crate::numfmt::{fixed, num};
use crate::params::IrrigationParams;

pub use symbols::Symbol;

/// Line types defined in the LTYPE table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineType {
    Continuous,
    Dashed,
}

impl LineType {
    pub fn name(&self) -> &'static str {
        match self {
            LineType::Continuous => "CONTINUOUS",
            LineType::Dashed => "DASHED",
        }
    }
}

/// Drawing layers, one per semantic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Layer {
    /// The default layer every DXF reader expects
    Zero,
    PlotBoundary,
    Mainline,
    Laterals,
    Emitters,
    Components,
    Annotations,
    Dimensions,
    Sensors,
}

impl Layer {
    /// LAYER table order
    pub const ALL: [Layer; 9] = [
        Layer::Zero,
        Layer::PlotBoundary,
        Layer::Mainline,
        Layer::Laterals,
        Layer::Emitters,
        Layer::Components,
        Layer::Annotations,
        Layer::Dimensions,
        Layer::Sensors,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Layer::Zero => "0",
            Layer::PlotBoundary => "PLOT_BOUNDARY",
            Layer::Mainline => "MAINLINE",
            Layer::Laterals => "LATERALS",
            Layer::Emitters => "EMITTERS",
            Layer::Components => "COMPONENTS",
            Layer::Annotations => "ANNOTATIONS",
            Layer::Dimensions => "DIMENSIONS",
            Layer::Sensors => "SENSORS",
        }
    }

    /// AutoCAD color index
    pub fn color(&self) -> u8 {
        match self {
            Layer::Zero | Layer::PlotBoundary => 7,
            Layer::Mainline => 5,
            Layer::Laterals => 4,
            Layer::Emitters => 3,
            Layer::Components => 1,
            Layer::Annotations => 2,
            Layer::Dimensions => 6,
            Layer::Sensors => 140,
        }
    }

    pub fn line_type(&self) -> LineType {
        match self {
            Layer::Sensors => LineType::Dashed,
            _ => LineType::Continuous,
        }
    }

    pub fn def(&self) -> LayerDef {
        LayerDef {
            name: self.name(),
            color: self.color(),
            line_type: self.line_type(),
        }
    }
}

/// One row of the LAYER table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerDef {
    pub name: &'static str,
    pub color: u8,
    pub line_type: LineType,
}

/// A drawable entity, in drawing units.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Line {
        layer: Layer,
        start: Point,
        end: Point,
    },
    Circle {
        layer: Layer,
        center: Point,
        radius: f64,
    },
    Text {
        layer: Layer,
        at: Point,
        height: f64,
        text: String,
        /// Degrees counter-clockwise
        rotation: f64,
    },
    LwPolyline {
        layer: Layer,
        points: Vec<Point>,
        closed: bool,
    },
    Insert {
        layer: Layer,
        symbol: Symbol,
        at: Point,
        scale: f64,
        rotation: f64,
    },
}

impl Entity {
    pub fn layer(&self) -> Layer {
        match self {
            Entity::Line { layer, .. }
            | Entity::Circle { layer, .. }
            | Entity::Text { layer, .. }
            | Entity::LwPolyline { layer, .. }
            | Entity::Insert { layer, .. } => *layer,
        }
    }
}

/// An in-memory drawing: layer table plus entity list.
#[derive(Debug, Clone, PartialEq)]
pub struct DxfDocument {
    layers: Vec<LayerDef>,
    entities: Vec<Entity>,
}

impl Default for DxfDocument {
    fn default() -> Self {
        DxfDocument::new()
    }
}

impl DxfDocument {
    /// Empty drawing with the standard layer table.
    pub fn new() -> Self {
        DxfDocument {
            layers: Layer::ALL.iter().map(Layer::def).collect(),
            entities: Vec::new(),
        }
    }

    pub fn layers(&self) -> &[LayerDef] {
        &self.layers
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn add_line(&mut self, layer: Layer, start: Point, end: Point) {
        self.push(Entity::Line { layer, start, end });
    }

    pub fn add_circle(&mut self, layer: Layer, center: Point, radius: f64) {
        self.push(Entity::Circle { layer, center, radius });
    }

    /// Four LINE entities tracing an axis-aligned rectangle.
    pub fn add_rectangle(&mut self, layer: Layer, origin: Point, width: f64, height: f64) {
        let (x, y) = (origin.x, origin.y);
        self.add_line(layer, Point::new(x, y), Point::new(x + width, y));
        self.add_line(layer, Point::new(x + width, y), Point::new(x + width, y + height));
        self.add_line(layer, Point::new(x + width, y + height), Point::new(x, y + height));
        self.add_line(layer, Point::new(x, y + height), Point::new(x, y));
    }

    pub fn add_text(&mut self, layer: Layer, at: Point, height: f64, text: impl Into<String>) {
        self.add_rotated_text(layer, at, height, text, 0.0);
    }

    pub fn add_rotated_text(&mut self, layer: Layer, at: Point, height: f64, text: impl Into<String>, rotation: f64) {
        self.push(Entity::Text {
            layer,
            at,
            height,
            text: text.into(),
            rotation,
        });
    }

    pub fn add_insert(&mut self, symbol: Symbol, layer: Layer, at: Point, scale: f64) {
        self.push(Entity::Insert {
            layer,
            symbol,
            at,
            scale,
            rotation: 0.0,
        });
    }

    /// Serialize to DXF text.
    pub fn to_dxf_string(&self) -> String {
        writer::write_document(self)
    }
}

/// Render the layout as DXF text.
pub fn render_dxf(params: &IrrigationParams, calc: &CalculatedValues) -> String {
    let doc = build_dxf(params, calc);
    let out = doc.to_dxf_string();
    log::debug!(
        "rendered DXF: {} entities, {} bytes",
        doc.entities().len(),
        out.len()
    );
    out
}

/// Build the drawing without serializing it.
///
/// Drawing units are plot meters: layout coordinates are used unmapped.
pub fn build_dxf(params: &IrrigationParams, calc: &CalculatedValues) -> DxfDocument {
    let layout = Layout::new(params, calc);
    let mut doc = DxfDocument::new();

    let length = layout.plot_length_m;
    let width = layout.plot_width_m;
    let mx = layout.mainline_x();

    doc.add_rectangle(Layer::PlotBoundary, Point::new(0.0, 0.0), length, width);
    doc.add_line(Layer::Mainline, layout.mainline.start, layout.mainline.end);

    // Supply train stacked beyond the mainline's far end, controller off the opposite edge
    doc.add_insert(Symbol::Tank, Layer::Components, Point::new(mx, width + 0.5), 1.5);
    doc.add_insert(Symbol::Pump, Layer::Components, Point::new(mx, width + 0.2), 1.0);
    doc.add_insert(Symbol::Filter, Layer::Components, Point::new(mx, width + 0.05), 1.0);
    doc.add_insert(Symbol::Valve, Layer::Components, Point::new(mx, width - 0.1), 1.0);
    doc.add_insert(Symbol::Controller, Layer::Components, Point::new(length + 0.5, width / 2.0), 1.0);

    for lateral in &layout.laterals {
        let header = lateral.header();
        doc.add_line(Layer::Laterals, header, lateral.segment.end);
        doc.add_circle(Layer::Laterals, header, 0.05);
        for emitter in lateral.emitters() {
            doc.add_insert(Symbol::Emitter, Layer::Emitters, emitter.position, 1.0);
        }
    }

    for sensor in &layout.sensors {
        doc.add_insert(Symbol::Sensor, Layer::Sensors, *sensor, 1.0);
    }

    // Plot length, below the plot
    doc.add_line(Layer::Dimensions, Point::new(0.0, -0.3), Point::new(length, -0.3));
    doc.add_line(Layer::Dimensions, Point::new(0.0, -0.25), Point::new(0.0, -0.35));
    doc.add_line(Layer::Dimensions, Point::new(length, -0.25), Point::new(length, -0.35));
    doc.add_text(
        Layer::Dimensions,
        Point::new(length / 2.0, -0.5),
        0.15,
        format!("{}m", num(params.plot_length_m)),
    );

    // Plot width, right of the plot
    doc.add_line(Layer::Dimensions, Point::new(length + 0.3, 0.0), Point::new(length + 0.3, width));
    doc.add_line(Layer::Dimensions, Point::new(length + 0.25, 0.0), Point::new(length + 0.35, 0.0));
    doc.add_line(Layer::Dimensions, Point::new(length + 0.25, width), Point::new(length + 0.35, width));
    doc.add_rotated_text(
        Layer::Dimensions,
        Point::new(length + 0.5, width / 2.0),
        0.15,
        format!("{}m", num(params.plot_width_m)),
        90.0,
    );

    let title_y = width + 1.2;
    for (dy, height, text) in title_block_lines(params, calc) {
        doc.add_text(Layer::Annotations, Point::new(0.0, title_y - dy), height, text);
    }

    doc.add_text(Layer::Annotations, Point::new(length - 1.0, -0.8), 0.08, "Scale 1:100");
    doc.add_text(Layer::Annotations, Point::new(length - 1.0, -0.95), 0.06, "All dimensions in meters");

    doc
}

/// Title and system summary: (offset below title line, text height, text).
fn title_block_lines(params: &IrrigationParams, calc: &CalculatedValues) -> Vec<(f64, f64, String)> {
    vec![
        (0.0, 0.2, "SMART DRIP IRRIGATION SYSTEM".to_string()),
        (
            0.3,
            0.12,
            format!(
                "Plot: {}m x {}m = {}m\u{b2}",
                num(params.plot_length_m),
                num(params.plot_width_m),
                num(calc.total_area_m2)
            ),
        ),
        (
            0.5,
            0.1,
            format!(
                "Laterals: {} @ {}m spacing | Diameter: {}mm",
                calc.num_laterals,
                num(params.lateral_spacing_m),
                num(params.lateral_diameter_mm)
            ),
        ),
        (
            0.65,
            0.1,
            format!(
                "Emitters: {} total @ {} L/h | Spacing: {}m",
                calc.total_emitters,
                num(params.emitter_flow_lph),
                num(params.emitter_spacing_m)
            ),
        ),
        (
            0.8,
            0.1,
            format!(
                "Mainline: {}mm | Pump: {} bar | Tank: {}L",
                num(params.mainline_diameter_mm),
                num(params.pump_pressure_bar),
                num(params.tank_capacity_l)
            ),
        ),
        (
            0.95,
            0.1,
            format!(
                "Total Flow: {} L/min | TDH: {} bar",
                fixed(calc.total_flow_lpm, 2),
                fixed(calc.total_dynamic_head_bar, 2)
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate_system;
    use crate::params::default_params;

    fn default_doc() -> DxfDocument {
        let params = default_params();
        build_dxf(&params, &calculate_system(&params))
    }

    fn inserts_of(doc: &DxfDocument, wanted: Symbol) -> Vec<Point> {
        doc.entities()
            .iter()
            .filter_map(|e| match e {
                Entity::Insert { symbol, at, .. } if *symbol == wanted => Some(*at),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_section_order() {
        let params = default_params();
        let dxf = render_dxf(&params, &calculate_system(&params));
        let header = dxf.find("2\nHEADER\n").unwrap();
        let tables = dxf.find("2\nTABLES\n").unwrap();
        let blocks = dxf.find("2\nBLOCKS\n").unwrap();
        let entities = dxf.find("2\nENTITIES\n").unwrap();
        assert!(header < tables && tables < blocks && blocks < entities);
        assert!(dxf.starts_with("0\nSECTION\n2\nHEADER\n9\n$ACADVER\n1\nAC1027\n"));
        assert!(dxf.ends_with("0\nENDSEC\n0\nEOF\n"));
    }

    #[test]
    fn test_layer_table() {
        let dxf = default_doc().to_dxf_string();
        assert!(dxf.contains("0\nTABLE\n2\nLAYER\n70\n9\n"));
        assert!(dxf.contains("0\nLAYER\n2\nSENSORS\n70\n0\n62\n140\n6\nDASHED\n"));
        assert!(dxf.contains("0\nLAYER\n2\nMAINLINE\n70\n0\n62\n5\n6\nCONTINUOUS\n"));
    }

    #[test]
    fn test_blocks_defined() {
        let dxf = default_doc().to_dxf_string();
        for symbol in Symbol::ALL {
            let needle = format!("0\nBLOCK\n8\n0\n2\n{}\n", symbol.name());
            assert!(dxf.contains(&needle), "missing block {}", symbol.name());
        }
    }

    #[test]
    fn test_one_emitter_insert_per_emitter() {
        let doc = default_doc();
        let emitters = inserts_of(&doc, Symbol::Emitter);
        assert_eq!(emitters.len(), 330);
        assert_eq!(emitters[0], Point::new(0.0, 0.0));
        assert_eq!(emitters[34], Point::new(0.3, 0.5));
    }

    #[test]
    fn test_component_inserts_exactly_once() {
        let doc = default_doc();
        for symbol in [Symbol::Tank, Symbol::Pump, Symbol::Filter, Symbol::Valve, Symbol::Controller] {
            assert_eq!(inserts_of(&doc, symbol).len(), 1, "{}", symbol.name());
        }
        assert_eq!(inserts_of(&doc, Symbol::Tank)[0], Point::new(-0.5, 5.5));
        assert_eq!(inserts_of(&doc, Symbol::Controller)[0], Point::new(10.5, 2.5));
        assert_eq!(inserts_of(&doc, Symbol::Sensor).len(), 2);
    }

    #[test]
    fn test_lateral_lines_start_at_mainline() {
        let doc = default_doc();
        let laterals: Vec<_> = doc
            .entities()
            .iter()
            .filter_map(|e| match e {
                Entity::Line { layer: Layer::Laterals, start, end } => Some((*start, *end)),
                _ => None,
            })
            .collect();
        assert_eq!(laterals.len(), 10);
        assert_eq!(laterals[2], (Point::new(-0.5, 1.0), Point::new(10.0, 1.0)));
    }

    #[test]
    fn test_title_block_text() {
        let dxf = default_doc().to_dxf_string();
        for needle in [
            "1\nSMART DRIP IRRIGATION SYSTEM\n",
            "1\nPlot: 10m x 5m = 50m\\U+00B2\n",
            "1\nLaterals: 10 @ 0.5m spacing | Diameter: 16mm\n",
            "1\nEmitters: 330 total @ 2 L/h | Spacing: 0.3m\n",
            "1\nMainline: 25mm | Pump: 2 bar | Tank: 1000L\n",
            "1\nTotal Flow: 11.00 L/min | TDH: 1.40 bar\n",
            "1\n10m\n",
            "1\n5m\n",
        ] {
            assert!(dxf.contains(needle), "missing {needle:?}");
        }
    }

    #[test]
    fn test_output_is_ascii() {
        assert!(default_doc().to_dxf_string().is_ascii());
    }

    #[test]
    fn test_every_entity_has_a_defined_layer() {
        let doc = default_doc();
        for entity in doc.entities() {
            assert!(doc.layers().iter().any(|l| l.name == entity.layer().name()));
        }
    }

    #[test]
    fn test_degenerate_layout() {
        let mut params = default_params();
        params.emitter_spacing_m = 20.0;
        let doc = build_dxf(&params, &calculate_system(&params));
        assert!(inserts_of(&doc, Symbol::Emitter).is_empty());
        // Laterals still drawn, just without emitters
        assert_eq!(
            doc.entities()
                .iter()
                .filter(|e| matches!(e, Entity::Line { layer: Layer::Laterals, .. }))
                .count(),
            10
        );
    }

    #[test]
    fn test_coordinates_are_plot_meters() {
        let mut params = default_params();
        params.plot_length_m = 12.0;
        params.plot_width_m = 6.0;
        params.lateral_spacing_m = 1.5;
        params.emitter_spacing_m = 0.4;
        let calc = calculate_system(&params);
        let doc = build_dxf(&params, &calc);
        let layout = Layout::new(&params, &calc);

        let expected: Vec<Point> = layout.emitters().map(|e| e.position).collect();
        assert_eq!(inserts_of(&doc, Symbol::Emitter), expected);
        assert_eq!(expected.len(), 4 * 30);
        assert_eq!(inserts_of(&doc, Symbol::Tank), vec![Point::new(layout.mainline_x(), 6.5)]);

        let lateral_starts: Vec<Point> = doc
            .entities()
            .iter()
            .filter_map(|e| match e {
                Entity::Line { layer: Layer::Laterals, start, .. } => Some(*start),
                _ => None,
            })
            .collect();
        assert_eq!(lateral_starts[3], Point::new(layout.mainline_x(), 4.5));
    }

    #[test]
    fn test_title_block_rounds_half_up() {
        let mut params = default_params();
        params.plot_length_m = 3.0;
        params.plot_width_m = 1.0;
        params.lateral_spacing_m = 1.0;
        params.emitter_spacing_m = 1.0;
        params.emitter_flow_lph = 2.5;
        let calc = calculate_system(&params);
        assert_eq!(calc.total_flow_lpm, 0.125);

        let dxf = render_dxf(&params, &calc);
        assert!(dxf.contains("1\nTotal Flow: 0.13 L/min | TDH: 1.40 bar\n"));
    }
}
