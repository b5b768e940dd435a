//! 2D drawing primitives: points, lines, arcs and circles.

use crate::config::angle::normalize_degrees;
use crate::config::float_cmp::approx_eq;
use serde::{Deserialize, Serialize};

/// Point in the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check if two points coincide within [`crate::config::EPS`].
    pub fn approx_eq(&self, other: &Point) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

/// Straight line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        }
    }
}

/// Circular arc, swept counter-clockwise from `start_angle` to `end_angle`
/// (degrees, DXF convention).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle: normalize_degrees(start_angle),
            end_angle: normalize_degrees(end_angle),
        }
    }

    /// Counter-clockwise sweep in degrees, in (0, 360].
    pub fn sweep(&self) -> f64 {
        let sweep = normalize_degrees(self.end_angle - self.start_angle);
        if sweep == 0.0 {
            360.0
        } else {
            sweep
        }
    }

    fn point_at(&self, degrees: f64) -> Point {
        let rad = degrees.to_radians();
        Point::new(
            self.center.x + self.radius * rad.cos(),
            self.center.y + self.radius * rad.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }

    /// Point halfway along the sweep.
    pub fn mid_point(&self) -> Point {
        self.point_at(self.start_angle + self.sweep() / 2.0)
    }
}

/// Full circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// A single drawable path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Path {
    Line(Line),
    Arc(Arc),
    Circle(Circle),
}

impl Path {
    /// Bounding box of the path. Arcs use their full circle extent.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Path::Line(line) => BoundingBox::from_points(&[line.start, line.end]),
            Path::Arc(arc) => BoundingBox::around(arc.center, arc.radius),
            Path::Circle(circle) => BoundingBox::around(circle.center, circle.radius),
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Path::Line(line) => Some(line),
            _ => None,
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Inverted box that any union replaces.
    pub fn empty() -> Self {
        Self {
            min_x: f64::MAX,
            min_y: f64::MAX,
            max_x: f64::MIN,
            max_y: f64::MIN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn from_points(points: &[Point]) -> Self {
        points.iter().fold(Self::empty(), |mut bbox, p| {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
            bbox
        })
    }

    pub fn around(center: Point, radius: f64) -> Self {
        Self {
            min_x: center.x - radius,
            min_y: center.y - radius,
            max_x: center.x + radius,
            max_y: center.y + radius,
        }
    }

    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if the interiors of two boxes overlap; touching edges do not count.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// Bounding box of a set of paths.
pub fn bounding_box_of<'a>(paths: impl IntoIterator<Item = &'a Path>) -> BoundingBox {
    paths
        .into_iter()
        .fold(BoundingBox::empty(), |bbox, p| bbox.union(&p.bounding_box()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_arc_angles_are_normalized() {
        let arc = Arc::new(Point::default(), 1.0, -90.0, 450.0);
        assert!(approx(arc.start_angle, 270.0));
        assert!(approx(arc.end_angle, 90.0));
        assert!(approx(arc.sweep(), 180.0));
    }

    #[test]
    fn test_arc_points() {
        let arc = Arc::new(Point::new(1.0, 1.0), 2.0, 0.0, 180.0);
        assert!(arc.start_point().approx_eq(&Point::new(3.0, 1.0)));
        assert!(arc.end_point().approx_eq(&Point::new(-1.0, 1.0)));
        assert!(arc.mid_point().approx_eq(&Point::new(1.0, 3.0)));
    }

    #[test]
    fn test_bounding_box_union() {
        let paths = vec![
            Path::Line(Line::new(0.0, 0.0, 10.0, 0.0)),
            Path::Circle(Circle::new(Point::new(5.0, 5.0), 2.0)),
        ];
        let bbox = bounding_box_of(&paths);
        assert!(approx(bbox.min_x, 0.0));
        assert!(approx(bbox.max_x, 10.0));
        assert!(approx(bbox.min_y, 0.0));
        assert!(approx(bbox.max_y, 7.0));
    }

    #[test]
    fn test_empty_bounding_box() {
        assert!(bounding_box_of(&Vec::<Path>::new()).is_empty());
    }

    #[test]
    fn test_overlap_excludes_touching() {
        let a = BoundingBox::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
        let b = BoundingBox::from_points(&[Point::new(10.0, 0.0), Point::new(20.0, 10.0)]);
        let c = BoundingBox::from_points(&[Point::new(5.0, 5.0), Point::new(15.0, 15.0)]);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }
}
