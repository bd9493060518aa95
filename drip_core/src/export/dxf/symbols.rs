//! Block definitions for the component symbols.
//!
//! Each symbol is drawn around its insertion point in drawing units (meters)
//! and placed with an INSERT entity.

use serde::Serialize;

use super::{Entity, Layer};
use crate::layout::Point;

/// Named block symbols defined in every document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Symbol {
    Emitter,
    Sensor,
    Tank,
    Pump,
    Filter,
    Valve,
    Controller,
}

impl Symbol {
    /// Definition order in the BLOCKS section
    pub const ALL: [Symbol; 7] = [
        Symbol::Emitter,
        Symbol::Sensor,
        Symbol::Tank,
        Symbol::Pump,
        Symbol::Filter,
        Symbol::Valve,
        Symbol::Controller,
    ];

    /// Block name as written in the file
    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Emitter => "EMITTER",
            Symbol::Sensor => "SENSOR",
            Symbol::Tank => "TANK",
            Symbol::Pump => "PUMP",
            Symbol::Filter => "FILTER",
            Symbol::Valve => "VALVE",
            Symbol::Controller => "CONTROLLER",
        }
    }
}

/// A block: a symbol and the primitives that draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDef {
    pub symbol: Symbol,
    pub entities: Vec<Entity>,
}

fn circle(layer: Layer, radius: f64) -> Entity {
    Entity::Circle {
        layer,
        center: Point::new(0.0, 0.0),
        radius,
    }
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Entity {
    Entity::Line {
        layer: Layer::Components,
        start: Point::new(x1, y1),
        end: Point::new(x2, y2),
    }
}

fn polyline(points: &[(f64, f64)], closed: bool) -> Entity {
    Entity::LwPolyline {
        layer: Layer::Components,
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        closed,
    }
}

/// Closed axis-aligned rectangle centred on the insertion point.
fn box_outline(half_w: f64, half_h: f64) -> Entity {
    polyline(
        &[(-half_w, -half_h), (half_w, -half_h), (half_w, half_h), (-half_w, half_h)],
        true,
    )
}

/// Primitives for one symbol.
pub fn primitives(symbol: Symbol) -> Vec<Entity> {
    match symbol {
        Symbol::Emitter => vec![circle(Layer::Emitters, 0.03)],
        Symbol::Sensor => vec![circle(Layer::Sensors, 0.08), circle(Layer::Sensors, 0.05)],
        Symbol::Tank => vec![box_outline(0.2, 0.2)],
        Symbol::Pump => vec![
            circle(Layer::Components, 0.1),
            line(-0.07, 0.0, 0.07, 0.0),
            line(0.0, -0.07, 0.0, 0.07),
        ],
        Symbol::Filter => vec![
            box_outline(0.08, 0.05),
            line(-0.04, -0.05, -0.04, 0.05),
            line(0.0, -0.05, 0.0, 0.05),
            line(0.04, -0.05, 0.04, 0.05),
        ],
        // Two open triangles forming a bow-tie
        Symbol::Valve => vec![
            polyline(&[(-0.05, -0.05), (0.0, 0.05), (0.05, -0.05)], false),
            polyline(&[(-0.05, 0.05), (0.0, -0.05), (0.05, 0.05)], false),
        ],
        Symbol::Controller => vec![box_outline(0.15, 0.1), circle(Layer::Components, 0.03)],
    }
}

/// All block definitions in BLOCKS section order.
pub fn definitions() -> Vec<BlockDef> {
    Symbol::ALL
        .into_iter()
        .map(|symbol| BlockDef {
            symbol,
            entities: primitives(symbol),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_symbol_has_geometry() {
        let defs = definitions();
        assert_eq!(defs.len(), 7);
        for def in &defs {
            assert!(!def.entities.is_empty(), "{} is empty", def.symbol.name());
        }
    }

    #[test]
    fn test_emitter_lives_on_emitter_layer() {
        match &primitives(Symbol::Emitter)[0] {
            Entity::Circle { layer, radius, .. } => {
                assert_eq!(*layer, Layer::Emitters);
                assert_eq!(*radius, 0.03);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_tank_outline_is_closed_square() {
        match &primitives(Symbol::Tank)[0] {
            Entity::LwPolyline { points, closed, .. } => {
                assert!(*closed);
                assert_eq!(points.len(), 4);
                assert_eq!(points[2], Point::new(0.2, 0.2));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
