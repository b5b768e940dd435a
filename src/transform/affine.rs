//! Rigid transforms on drawing geometry.
//!
//! Every transform returns a new value; geometry that has been built is never
//! edited in place. Mirroring follows the usual drawing convention:
//! `mirror_x` negates X (flips left/right), `mirror_y` negates Y.

use crate::config::angle::normalize_degrees;
use crate::model::{Arc, Circle, Line, Path, Point};

/// Translate, rotate and mirror.
pub trait Transform: Sized {
    /// Move by `(dx, dy)`.
    fn translate(&self, dx: f64, dy: f64) -> Self;

    /// Rotate counter-clockwise by `degrees` about `origin`.
    fn rotate(&self, degrees: f64, origin: Point) -> Self;

    /// Reflect about the Y axis (`mirror_x`) and/or the X axis (`mirror_y`).
    fn mirror(&self, mirror_x: bool, mirror_y: bool) -> Self;
}

/// Sine and cosine, exact for quarter turns so that rotated joints keep
/// their coordinates bit-for-bit.
fn sin_cos(degrees: f64) -> (f64, f64) {
    let normalized = normalize_degrees(degrees);
    if normalized == 0.0 {
        (0.0, 1.0)
    } else if normalized == 90.0 {
        (1.0, 0.0)
    } else if normalized == 180.0 {
        (0.0, -1.0)
    } else if normalized == 270.0 {
        (-1.0, 0.0)
    } else {
        normalized.to_radians().sin_cos()
    }
}

impl Transform for Point {
    fn translate(&self, dx: f64, dy: f64) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    fn rotate(&self, degrees: f64, origin: Point) -> Self {
        let (sin, cos) = sin_cos(degrees);
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Point::new(
            origin.x + dx * cos - dy * sin,
            origin.y + dx * sin + dy * cos,
        )
    }

    fn mirror(&self, mirror_x: bool, mirror_y: bool) -> Self {
        Point::new(
            if mirror_x { -self.x } else { self.x },
            if mirror_y { -self.y } else { self.y },
        )
    }
}

impl Transform for Line {
    fn translate(&self, dx: f64, dy: f64) -> Self {
        Line {
            start: self.start.translate(dx, dy),
            end: self.end.translate(dx, dy),
        }
    }

    fn rotate(&self, degrees: f64, origin: Point) -> Self {
        Line {
            start: self.start.rotate(degrees, origin),
            end: self.end.rotate(degrees, origin),
        }
    }

    fn mirror(&self, mirror_x: bool, mirror_y: bool) -> Self {
        Line {
            start: self.start.mirror(mirror_x, mirror_y),
            end: self.end.mirror(mirror_x, mirror_y),
        }
    }
}

impl Transform for Arc {
    fn translate(&self, dx: f64, dy: f64) -> Self {
        Arc {
            center: self.center.translate(dx, dy),
            ..*self
        }
    }

    fn rotate(&self, degrees: f64, origin: Point) -> Self {
        Arc::new(
            self.center.rotate(degrees, origin),
            self.radius,
            self.start_angle + degrees,
            self.end_angle + degrees,
        )
    }

    fn mirror(&self, mirror_x: bool, mirror_y: bool) -> Self {
        let center = self.center.mirror(mirror_x, mirror_y);
        // A single reflection reverses the sweep direction, so the
        // reflected end angle becomes the new start.
        let (start, end) = match (mirror_x, mirror_y) {
            (false, false) => (self.start_angle, self.end_angle),
            (true, false) => (180.0 - self.end_angle, 180.0 - self.start_angle),
            (false, true) => (-self.end_angle, -self.start_angle),
            (true, true) => (self.start_angle + 180.0, self.end_angle + 180.0),
        };
        Arc::new(center, self.radius, start, end)
    }
}

impl Transform for Circle {
    fn translate(&self, dx: f64, dy: f64) -> Self {
        Circle::new(self.center.translate(dx, dy), self.radius)
    }

    fn rotate(&self, degrees: f64, origin: Point) -> Self {
        Circle::new(self.center.rotate(degrees, origin), self.radius)
    }

    fn mirror(&self, mirror_x: bool, mirror_y: bool) -> Self {
        Circle::new(self.center.mirror(mirror_x, mirror_y), self.radius)
    }
}

impl Transform for Path {
    fn translate(&self, dx: f64, dy: f64) -> Self {
        match self {
            Path::Line(l) => Path::Line(l.translate(dx, dy)),
            Path::Arc(a) => Path::Arc(a.translate(dx, dy)),
            Path::Circle(c) => Path::Circle(c.translate(dx, dy)),
        }
    }

    fn rotate(&self, degrees: f64, origin: Point) -> Self {
        match self {
            Path::Line(l) => Path::Line(l.rotate(degrees, origin)),
            Path::Arc(a) => Path::Arc(a.rotate(degrees, origin)),
            Path::Circle(c) => Path::Circle(c.rotate(degrees, origin)),
        }
    }

    fn mirror(&self, mirror_x: bool, mirror_y: bool) -> Self {
        match self {
            Path::Line(l) => Path::Line(l.mirror(mirror_x, mirror_y)),
            Path::Arc(a) => Path::Arc(a.mirror(mirror_x, mirror_y)),
            Path::Circle(c) => Path::Circle(c.mirror(mirror_x, mirror_y)),
        }
    }
}

impl<T: Transform + Clone> Transform for Vec<T> {
    fn translate(&self, dx: f64, dy: f64) -> Self {
        self.iter().map(|t| t.translate(dx, dy)).collect()
    }

    fn rotate(&self, degrees: f64, origin: Point) -> Self {
        self.iter().map(|t| t.rotate(degrees, origin)).collect()
    }

    fn mirror(&self, mirror_x: bool, mirror_y: bool) -> Self {
        self.iter().map(|t| t.mirror(mirror_x, mirror_y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    // ==================== point tests ====================

    #[test]
    fn test_quarter_turn_is_exact() {
        let p = Point::new(90.0, 14.0).rotate(90.0, Point::default());
        assert_eq!(p, Point::new(-14.0, 90.0));
    }

    #[test]
    fn test_rotate_about_origin_point() {
        let p = Point::new(2.0, 1.0).rotate(180.0, Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_rotate_arbitrary_angle() {
        let p = Point::new(1.0, 0.0).rotate(45.0, Point::default());
        let half = std::f64::consts::FRAC_1_SQRT_2;
        assert!(approx_eq(p.x, half));
        assert!(approx_eq(p.y, half));
    }

    #[test]
    fn test_mirror_point() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.mirror(true, false), Point::new(-3.0, 4.0));
        assert_eq!(p.mirror(false, true), Point::new(3.0, -4.0));
        assert_eq!(p.mirror(true, true), Point::new(-3.0, -4.0));
    }

    // ==================== arc tests ====================

    #[test]
    fn test_mirror_arc_keeps_endpoints_on_reflected_points() {
        let arc = Arc::new(Point::new(1.0, 1.0), 1.0, 0.0, 90.0);
        let mirrored = arc.mirror(true, false);
        // Reflected endpoint set is the same, only the sweep order flips.
        assert!(mirrored
            .start_point()
            .approx_eq(&arc.end_point().mirror(true, false)));
        assert!(mirrored
            .end_point()
            .approx_eq(&arc.start_point().mirror(true, false)));
        assert!(approx_eq(mirrored.sweep(), 90.0));
    }

    #[test]
    fn test_mirror_arc_twice_is_identity() {
        let arc = Arc::new(Point::new(5.0, -2.0), 3.0, 30.0, 200.0);
        for (mx, my) in [(true, false), (false, true), (true, true)] {
            let back = arc.mirror(mx, my).mirror(mx, my);
            assert!(back.center.approx_eq(&arc.center));
            assert!(approx_eq(back.start_angle, arc.start_angle));
            assert!(approx_eq(back.end_angle, arc.end_angle));
        }
    }

    #[test]
    fn test_rotate_arc() {
        let arc = Arc::new(Point::new(1.0, 0.0), 1.0, 0.0, 90.0);
        let rotated = arc.rotate(90.0, Point::default());
        assert_eq!(rotated.center, Point::new(0.0, 1.0));
        assert!(approx_eq(rotated.start_angle, 90.0));
        assert!(approx_eq(rotated.end_angle, 180.0));
    }

    // ==================== path tests ====================

    #[test]
    fn test_translate_paths() {
        let paths = vec![
            Path::Line(Line::new(0.0, 0.0, 1.0, 0.0)),
            Path::Circle(Circle::new(Point::default(), 2.0)),
        ];
        let moved = paths.translate(10.0, 5.0);
        assert_eq!(moved[0], Path::Line(Line::new(10.0, 5.0, 11.0, 5.0)));
        assert_eq!(
            moved[1],
            Path::Circle(Circle::new(Point::new(10.0, 5.0), 2.0))
        );
    }
}
