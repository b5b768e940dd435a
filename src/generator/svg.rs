//! SVG generator for previewing a drawing.
//!
//! Drawing coordinates are Y-up; SVG is Y-down. Every point is flipped about
//! the drawing's bounding box so the picture keeps its orientation.

use crate::model::{BoundingBox, Drawing, Layer, Path, Point};
use std::fmt::Write;

/// Stroke color of each export layer.
pub fn layer_stroke(layer: Layer) -> &'static str {
    match layer {
        Layer::Outline => "#000000",
        Layer::Relief => "#ff0000",
        Layer::ToothHoles => "#0000ff",
        Layer::Handles => "#00a000",
        Layer::VentHoles => "#ff00ff",
    }
}

/// Millimetre margin around the drawing.
const MARGIN: f64 = 10.0;

/// SVG writer in the same shape as the DXF one.
pub struct SvgWriter {
    output: String,
    bbox: BoundingBox,
}

impl SvgWriter {
    /// Start a document sized to `bbox` plus a margin.
    pub fn new(bbox: BoundingBox) -> Self {
        let bbox = if bbox.is_empty() {
            BoundingBox::from_points(&[Point::default()])
        } else {
            bbox
        };
        let mut writer = Self {
            output: String::new(),
            bbox,
        };
        let width = bbox.width() + 2.0 * MARGIN;
        let height = bbox.height() + 2.0 * MARGIN;
        writeln!(
            writer.output,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\">",
            w = Self::format_num(width),
            h = Self::format_num(height)
        )
        .unwrap();
        writer
    }

    /// Three decimals, trailing zeros dropped.
    pub fn format_num(value: f64) -> String {
        let s = format!("{:.3}", value);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" {
            "0".to_string()
        } else {
            s.to_string()
        }
    }

    fn x(&self, x: f64) -> String {
        Self::format_num(x - self.bbox.min_x + MARGIN)
    }

    fn y(&self, y: f64) -> String {
        Self::format_num(self.bbox.max_y - y + MARGIN)
    }

    /// Open a group for one layer.
    pub fn begin_layer(&mut self, layer: Layer) {
        writeln!(
            self.output,
            "<g id=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"0.5\">",
            layer.name(),
            layer_stroke(layer)
        )
        .unwrap();
    }

    pub fn end_layer(&mut self) {
        writeln!(self.output, "</g>").unwrap();
    }

    /// Write one path element.
    pub fn write_path(&mut self, path: &Path) {
        let element = match path {
            Path::Line(line) => format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>",
                self.x(line.start.x),
                self.y(line.start.y),
                self.x(line.end.x),
                self.y(line.end.y)
            ),
            Path::Arc(arc) => {
                let start = arc.start_point();
                let end = arc.end_point();
                let large = if arc.sweep() > 180.0 { 1 } else { 0 };
                let r = Self::format_num(arc.radius);
                // Counter-clockwise in Y-up is sweep-flag 0 once Y is flipped.
                format!(
                    "<path d=\"M {} {} A {r} {r} 0 {large} 0 {} {}\"/>",
                    self.x(start.x),
                    self.y(start.y),
                    self.x(end.x),
                    self.y(end.y),
                    r = r,
                    large = large
                )
            }
            Path::Circle(circle) => format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"/>",
                self.x(circle.center.x),
                self.y(circle.center.y),
                Self::format_num(circle.radius)
            ),
        };
        writeln!(self.output, "{}", element).unwrap();
    }

    /// Close the document.
    pub fn into_string(mut self) -> String {
        writeln!(self.output, "</svg>").unwrap();
        self.output
    }
}

/// Render a whole drawing as an SVG document, one group per layer.
pub fn render_svg(drawing: &Drawing) -> String {
    let mut svg = SvgWriter::new(drawing.bounding_box());
    let paths: Vec<(Layer, Path)> = drawing
        .panels
        .iter()
        .flat_map(|p| p.panel.layered_paths())
        .collect();

    for layer in Layer::ALL {
        svg.begin_layer(layer);
        for (_, path) in paths.iter().filter(|(l, _)| *l == layer) {
            svg.write_path(path);
        }
        svg.end_layer();
    }
    svg.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Arc, Circle, Line};

    fn unit_box() -> BoundingBox {
        BoundingBox::from_points(&[Point::new(0.0, 0.0), Point::new(100.0, 50.0)])
    }

    #[test]
    fn test_format_num() {
        assert_eq!(SvgWriter::format_num(12.5), "12.5");
        assert_eq!(SvgWriter::format_num(3.0), "3");
        assert_eq!(SvgWriter::format_num(-0.0001), "0");
        assert_eq!(SvgWriter::format_num(0.1234), "0.123");
    }

    #[test]
    fn test_document_structure() {
        let out = render_svg(&Drawing::new());
        assert!(out.starts_with("<svg"));
        assert!(out.trim_end().ends_with("</svg>"));
        for layer in Layer::ALL {
            assert!(out.contains(&format!("<g id=\"{}\"", layer.name())));
        }
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let mut svg = SvgWriter::new(unit_box());
        svg.write_path(&Path::Line(Line::new(0.0, 0.0, 100.0, 50.0)));
        let out = svg.into_string();
        assert!(out.contains("width=\"120mm\" height=\"70mm\""));
        assert!(out.contains("<line x1=\"10\" y1=\"60\" x2=\"110\" y2=\"10\"/>"));
    }

    #[test]
    fn test_arc_and_circle_elements() {
        let mut svg = SvgWriter::new(unit_box());
        svg.write_path(&Path::Arc(Arc::new(Point::new(50.0, 25.0), 10.0, 0.0, 90.0)));
        svg.write_path(&Path::Circle(Circle::new(Point::new(50.0, 25.0), 5.0)));
        let out = svg.into_string();
        assert!(out.contains("<path d=\"M 70 35 A 10 10 0 0 0 60 25\"/>"));
        assert!(out.contains("<circle cx=\"60\" cy=\"35\" r=\"5\"/>"));
    }
}
