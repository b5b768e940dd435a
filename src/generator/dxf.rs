//! DXF (Drawing Exchange Format) generator.
//!
//! Writes an R12 ASCII drawing with one layer per cut class. Arcs are
//! counter-clockwise from start to end angle, which is also the DXF
//! convention, so they are written as they are stored.

use crate::config::angle::normalize_degrees;
use crate::model::{Arc, Circle, Drawing, Layer, Line, Path, Point};
use std::fmt::{Display, Write};

/// AutoCAD color index of each export layer.
pub fn layer_color(layer: Layer) -> i32 {
    match layer {
        Layer::Outline => 7,    // White
        Layer::Relief => 1,     // Red
        Layer::ToothHoles => 5, // Blue
        Layer::Handles => 3,    // Green
        Layer::VentHoles => 6,  // Magenta
    }
}

/// Millimetres, for `$INSUNITS`.
const UNITS_MM: i32 = 4;

/// Streams a drawing out as DXF group pairs.
#[derive(Default)]
pub struct DxfWriter {
    output: String,
}

impl DxfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.output
    }

    /// One group: the code right-aligned in three columns, then the value.
    fn group(&mut self, code: u16, value: impl Display) {
        writeln!(self.output, "{:>3}\n{}", code, value).unwrap();
    }

    /// X/Y/Z of a point under `code`, `code + 10` and `code + 20`.
    fn point(&mut self, code: u16, p: Point) {
        self.group(code, Self::format_coord(p.x));
        self.group(code + 10, Self::format_coord(p.y));
        self.group(code + 20, Self::format_coord(0.0));
    }

    fn section(&mut self, name: &str) {
        self.group(0, "SECTION");
        self.group(2, name);
    }

    fn end_section(&mut self) {
        self.group(0, "ENDSEC");
    }

    /// Three decimals, halves rounded away from zero, never "-0.000".
    pub fn format_coord(value: f64) -> String {
        let rounded = (value * 1000.0).round() / 1000.0;
        format!("{:.3}", if rounded == 0.0 { 0.0 } else { rounded })
    }

    /// Header: drawing version and units.
    pub fn write_header(&mut self) {
        self.section("HEADER");
        self.group(9, "$ACADVER");
        self.group(1, "AC1009");
        self.group(9, "$INSUNITS");
        self.group(70, UNITS_MM);
        self.end_section();
    }

    /// Tables: the continuous line type and one layer per [`Layer`].
    pub fn write_tables(&mut self) {
        self.section("TABLES");

        self.group(0, "TABLE");
        self.group(2, "LTYPE");
        self.group(70, 1);
        self.group(0, "LTYPE");
        self.group(2, "CONTINUOUS");
        self.group(70, 0);
        self.group(3, "Solid line");
        self.group(72, 65);
        self.group(73, 0);
        self.group(40, Self::format_coord(0.0));
        self.group(0, "ENDTAB");

        self.group(0, "TABLE");
        self.group(2, "LAYER");
        self.group(70, Layer::ALL.len());
        for layer in Layer::ALL {
            self.group(0, "LAYER");
            self.group(2, layer.name());
            self.group(70, 0);
            self.group(62, layer_color(layer));
            self.group(6, "CONTINUOUS");
        }
        self.group(0, "ENDTAB");

        self.end_section();
    }

    pub fn begin_entities(&mut self) {
        self.section("ENTITIES");
    }

    /// Close the entities section and the file.
    pub fn end_entities(&mut self) {
        self.end_section();
        self.group(0, "EOF");
    }

    fn entity(&mut self, kind: &str, layer: Layer) {
        self.group(0, kind);
        self.group(8, layer.name());
        self.group(62, layer_color(layer));
    }

    pub fn write_line(&mut self, layer: Layer, line: &Line) {
        self.entity("LINE", layer);
        self.point(10, line.start);
        self.point(11, line.end);
    }

    pub fn write_arc(&mut self, layer: Layer, arc: &Arc) {
        self.entity("ARC", layer);
        self.point(10, arc.center);
        self.group(40, Self::format_coord(arc.radius));
        self.group(50, Self::format_coord(normalize_degrees(arc.start_angle)));
        self.group(51, Self::format_coord(normalize_degrees(arc.end_angle)));
    }

    pub fn write_circle(&mut self, layer: Layer, circle: &Circle) {
        self.entity("CIRCLE", layer);
        self.point(10, circle.center);
        self.group(40, Self::format_coord(circle.radius));
    }

    pub fn write_path(&mut self, layer: Layer, path: &Path) {
        match path {
            Path::Line(line) => self.write_line(layer, line),
            Path::Arc(arc) => self.write_arc(layer, arc),
            Path::Circle(circle) => self.write_circle(layer, circle),
        }
    }
}

/// Render a whole drawing as DXF text.
pub fn render_dxf(drawing: &Drawing) -> String {
    let mut dxf = DxfWriter::new();
    dxf.write_header();
    dxf.write_tables();
    dxf.begin_entities();

    for placed in &drawing.panels {
        for (layer, path) in placed.panel.layered_paths() {
            dxf.write_path(layer, &path);
        }
    }

    dxf.end_entities();
    dxf.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ==================== formatting tests ====================

    #[test]
    fn test_format_coord_rounds_half_away_from_zero() {
        assert_eq!(DxfWriter::format_coord(2.0625), "2.063");
        assert_eq!(DxfWriter::format_coord(-2.5), "-2.500");
        assert_eq!(DxfWriter::format_coord(-0.0001), "0.000");
        assert_eq!(DxfWriter::format_coord(450.0), "450.000");
    }

    // ==================== entity tests ====================

    #[test]
    fn test_line_entity() {
        let mut dxf = DxfWriter::new();
        dxf.write_line(Layer::Outline, &Line::new(0.0, 0.0, 80.0, 22.5));
        let expected = [
            "  0", "LINE", "  8", "OUTLINE", " 62", "7", //
            " 10", "0.000", " 20", "0.000", " 30", "0.000", //
            " 11", "80.000", " 21", "22.500", " 31", "0.000",
        ];
        assert_eq!(dxf.into_string(), format!("{}\n", expected.join("\n")));
    }

    #[test]
    fn test_arc_angles_are_normalized() {
        let mut dxf = DxfWriter::new();
        dxf.write_path(
            Layer::Relief,
            &Path::Arc(Arc::new(Point::new(1.0, 1.0), 3.0, -45.0, 135.0)),
        );
        let out = dxf.into_string();
        assert!(out.contains("ARC\n  8\nRELIEF\n 62\n1\n"));
        assert!(out.contains(" 50\n315.000\n 51\n135.000\n"));
    }

    #[test]
    fn test_circle_entity() {
        let mut dxf = DxfWriter::new();
        dxf.write_circle(
            Layer::VentHoles,
            &Circle::new(Point::new(60.0, 250.0), 20.0),
        );
        let out = dxf.into_string();
        assert!(out.starts_with("  0\nCIRCLE\n  8\nVENT_HOLES\n"));
        assert!(out.contains(" 10\n60.000\n 20\n250.000\n"));
        assert!(out.ends_with(" 40\n20.000\n"));
    }

    // ==================== document tests ====================

    #[test]
    fn test_empty_drawing_has_all_sections_and_layers() {
        let out = render_dxf(&Drawing::new());
        assert!(out.contains("$ACADVER"));
        assert!(out.contains(" 70\n4\n"));
        assert!(out.contains("ENTITIES"));
        for layer in Layer::ALL {
            assert!(out.contains(&format!("  2\n{}\n", layer.name())));
        }
        assert!(out.trim_end().ends_with("EOF"));
    }
}
