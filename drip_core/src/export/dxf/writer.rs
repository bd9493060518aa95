//! Group-code serialization.
//!
//! A DXF file is a flat sequence of `code\nvalue\n` pairs. [`GroupWriter`]
//! appends pairs; [`write_document`] lays out HEADER, TABLES, BLOCKS and
//! ENTITIES in that order and terminates with `0 EOF`.

use std::fmt::Write as _;

use super::symbols::{self, BlockDef};
use super::{DxfDocument, Entity, LayerDef};
use crate::layout::Point;
use crate::numfmt::num;

/// Whether entity coordinates carry explicit Z groups (30/31).
///
/// Top-level entities are written with Z = 0; block members are written 2D.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
    Flat,
    WithZ,
}

/// Accumulates group-code pairs.
#[derive(Debug, Default)]
pub struct GroupWriter {
    out: String,
}

impl GroupWriter {
    pub fn new() -> Self {
        GroupWriter::default()
    }

    /// Append one pair verbatim.
    pub fn pair(&mut self, code: i32, value: impl AsRef<str>) -> &mut Self {
        // Writing into a String cannot fail
        let _ = writeln!(self.out, "{}", code);
        self.out.push_str(value.as_ref());
        self.out.push('\n');
        self
    }

    /// Append a numeric pair in shortest round-trip form.
    pub fn num(&mut self, code: i32, value: f64) -> &mut Self {
        self.pair(code, num(value))
    }

    pub fn int(&mut self, code: i32, value: i64) -> &mut Self {
        self.pair(code, value.to_string())
    }

    /// Append a text value, escaping characters outside ASCII.
    pub fn text(&mut self, code: i32, value: &str) -> &mut Self {
        self.pair(code, escape_text(value))
    }

    /// Append an X/Y coordinate pair using `base` (10, 11, ...) and `base + 10`.
    pub fn point(&mut self, base: i32, p: Point) -> &mut Self {
        self.num(base, p.x).num(base + 10, p.y)
    }

    /// Append X/Y, then Z = 0 at `base + 20` when `dims` asks for it.
    pub fn point_dims(&mut self, base: i32, p: Point, dims: Dimensionality) -> &mut Self {
        self.point(base, p);
        if dims == Dimensionality::WithZ {
            self.num(base + 20, 0.0);
        }
        self
    }

    pub fn begin_section(&mut self, name: &str) -> &mut Self {
        self.pair(0, "SECTION").pair(2, name)
    }

    pub fn end_section(&mut self) -> &mut Self {
        self.pair(0, "ENDSEC")
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Escape text for an ASCII DXF: non-ASCII becomes `\U+XXXX`, line breaks become spaces.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' | '\r' => out.push(' '),
            c if c.is_ascii() => out.push(c),
            c => {
                let _ = write!(out, "\\U+{:04X}", u32::from(c));
            }
        }
    }
    out
}

/// Serialize a whole document.
pub fn write_document(doc: &DxfDocument) -> String {
    let mut w = GroupWriter::new();
    write_header(&mut w);
    write_tables(&mut w, doc.layers());
    write_blocks(&mut w, &symbols::definitions());
    write_entities(&mut w, doc.entities());
    w.pair(0, "EOF");
    w.finish()
}

fn write_header(w: &mut GroupWriter) {
    w.begin_section("HEADER");
    // AutoCAD 2013 format, meters, metric, decimal units, 4 places
    w.pair(9, "$ACADVER").pair(1, "AC1027");
    w.pair(9, "$INSUNITS").int(70, 6);
    w.pair(9, "$MEASUREMENT").int(70, 1);
    w.pair(9, "$LUNITS").int(70, 2);
    w.pair(9, "$LUPREC").int(70, 4);
    w.end_section();
}

fn write_tables(w: &mut GroupWriter, layers: &[LayerDef]) {
    w.begin_section("TABLES");

    w.pair(0, "TABLE").pair(2, "LTYPE").int(70, 2);
    w.pair(0, "LTYPE")
        .pair(2, "CONTINUOUS")
        .int(70, 0)
        .pair(3, "Solid line")
        .int(72, 65)
        .int(73, 0)
        .pair(40, "0.0");
    w.pair(0, "LTYPE")
        .pair(2, "DASHED")
        .int(70, 0)
        .pair(3, "Dashed line")
        .int(72, 65)
        .int(73, 2)
        .pair(40, "0.5")
        .pair(49, "0.25")
        .int(74, 0)
        .pair(49, "-0.25")
        .int(74, 0);
    w.pair(0, "ENDTAB");

    w.pair(0, "TABLE").pair(2, "LAYER").int(70, layers.len() as i64);
    for layer in layers {
        w.pair(0, "LAYER")
            .pair(2, layer.name)
            .int(70, 0)
            .int(62, i64::from(layer.color))
            .pair(6, layer.line_type.name());
    }
    w.pair(0, "ENDTAB");

    w.pair(0, "TABLE").pair(2, "STYLE").int(70, 1);
    w.pair(0, "STYLE")
        .pair(2, "STANDARD")
        .int(70, 0)
        .pair(40, "0.0")
        .pair(41, "1.0")
        .pair(50, "0.0")
        .int(71, 0)
        .pair(42, "0.2")
        .pair(3, "txt")
        .pair(4, "");
    w.pair(0, "ENDTAB");

    w.end_section();
}

fn write_blocks(w: &mut GroupWriter, blocks: &[BlockDef]) {
    w.begin_section("BLOCKS");
    for block in blocks {
        w.pair(0, "BLOCK")
            .pair(8, "0")
            .pair(2, block.symbol.name())
            .int(70, 0)
            .point_dims(10, Point::new(0.0, 0.0), Dimensionality::WithZ);
        for entity in &block.entities {
            write_entity(w, entity, Dimensionality::Flat);
        }
        w.pair(0, "ENDBLK");
    }
    w.end_section();
}

fn write_entities(w: &mut GroupWriter, entities: &[Entity]) {
    w.begin_section("ENTITIES");
    for entity in entities {
        write_entity(w, entity, Dimensionality::WithZ);
    }
    w.end_section();
}

/// Write one entity's group codes.
pub fn write_entity(w: &mut GroupWriter, entity: &Entity, dims: Dimensionality) {
    match entity {
        Entity::Line { layer, start, end } => {
            w.pair(0, "LINE").pair(8, layer.name());
            w.point_dims(10, *start, dims);
            w.point_dims(11, *end, dims);
        }
        Entity::Circle { layer, center, radius } => {
            w.pair(0, "CIRCLE").pair(8, layer.name());
            w.point_dims(10, *center, dims);
            w.num(40, *radius);
        }
        Entity::Text {
            layer,
            at,
            height,
            text,
            rotation,
        } => {
            w.pair(0, "TEXT").pair(8, layer.name());
            w.point_dims(10, *at, dims);
            w.num(40, *height).text(1, text).num(50, *rotation);
        }
        Entity::LwPolyline { layer, points, closed } => {
            w.pair(0, "LWPOLYLINE")
                .pair(8, layer.name())
                .int(90, points.len() as i64)
                .int(70, i64::from(*closed));
            for p in points {
                w.point(10, *p);
            }
        }
        Entity::Insert {
            layer,
            symbol,
            at,
            scale,
            rotation,
        } => {
            w.pair(0, "INSERT").pair(8, layer.name()).pair(2, symbol.name());
            w.point_dims(10, *at, dims);
            w.num(41, *scale).num(42, *scale).num(43, *scale).num(50, *rotation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::dxf::Layer;

    #[test]
    fn test_pair_layout() {
        let mut w = GroupWriter::new();
        w.pair(0, "SECTION").pair(2, "HEADER");
        assert_eq!(w.finish(), "0\nSECTION\n2\nHEADER\n");
    }

    #[test]
    fn test_line_with_and_without_z() {
        let line = Entity::Line {
            layer: Layer::Laterals,
            start: Point::new(-0.5, 1.5),
            end: Point::new(10.0, 1.5),
        };

        let mut w = GroupWriter::new();
        write_entity(&mut w, &line, Dimensionality::WithZ);
        assert_eq!(
            w.finish(),
            "0\nLINE\n8\nLATERALS\n10\n-0.5\n20\n1.5\n30\n0\n11\n10\n21\n1.5\n31\n0\n"
        );

        let mut w = GroupWriter::new();
        write_entity(&mut w, &line, Dimensionality::Flat);
        assert_eq!(w.finish(), "0\nLINE\n8\nLATERALS\n10\n-0.5\n20\n1.5\n11\n10\n21\n1.5\n");
    }

    #[test]
    fn test_insert_groups() {
        let insert = Entity::Insert {
            layer: Layer::Components,
            symbol: crate::export::dxf::Symbol::Tank,
            at: Point::new(-0.5, 5.5),
            scale: 1.5,
            rotation: 0.0,
        };
        let mut w = GroupWriter::new();
        write_entity(&mut w, &insert, Dimensionality::WithZ);
        assert_eq!(
            w.finish(),
            "0\nINSERT\n8\nCOMPONENTS\n2\nTANK\n10\n-0.5\n20\n5.5\n30\n0\n41\n1.5\n42\n1.5\n43\n1.5\n50\n0\n"
        );
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("50m\u{b2}"), "50m\\U+00B2");
        assert_eq!(escape_text("a\nb"), "a b");
        assert_eq!(escape_text("Plot: 10m x 5m"), "Plot: 10m x 5m");
    }
}
