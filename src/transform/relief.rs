//! Dogbone relief at inside corners.
//!
//! A round cutter cannot produce a sharp inside corner, so a square tab would
//! not seat fully. At each right-angle corner whose inside is empty, a
//! semicircular cut of the cutter radius is added, centred on the bisector
//! into the turn and passing through the corner point. The ends of the arc
//! lie on both walls, `sqrt(2) * r` away from the corner.

use super::chain::{find_chains, Chain};
use super::Transform;
use crate::config::RIGHT_ANGLE_TOLERANCE_DEG;
use crate::model::{Arc, Path, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which side of a closed chain is material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialSide {
    /// The chain is an outer outline: material inside.
    Inside,
    /// The chain bounds a hole: material outside.
    Outside,
}

/// One relief cut and the corner it serves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliefCut {
    pub corner: Point,
    pub arc: Arc,
}

impl Transform for ReliefCut {
    fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            corner: self.corner.translate(dx, dy),
            arc: self.arc.translate(dx, dy),
        }
    }

    fn rotate(&self, degrees: f64, origin: Point) -> Self {
        Self {
            corner: self.corner.rotate(degrees, origin),
            arc: self.arc.rotate(degrees, origin),
        }
    }

    fn mirror(&self, mirror_x: bool, mirror_y: bool) -> Self {
        Self {
            corner: self.corner.mirror(mirror_x, mirror_y),
            arc: self.arc.mirror(mirror_x, mirror_y),
        }
    }
}

/// Relief cuts for every qualifying corner in `paths`.
///
/// Closed chains only get relief where the inside of the turn is empty
/// according to `material`; open chains get it at every right-angle vertex.
/// `paths` is never modified.
pub fn insert_relief(paths: &[Path], radius: f64, material: MaterialSide) -> Vec<ReliefCut> {
    if radius <= 0.0 {
        return Vec::new();
    }
    let chains = find_chains(paths);
    let cuts: Vec<ReliefCut> = chains
        .iter()
        .flat_map(|chain| chain_relief(chain, radius, material))
        .collect();
    debug!(
        "Relief: {} chain(s), {} cut(s), radius {}",
        chains.len(),
        cuts.len(),
        radius
    );
    cuts
}

/// Relief cuts for a single chain.
pub fn chain_relief(chain: &Chain, radius: f64, material: MaterialSide) -> Vec<ReliefCut> {
    let n = chain.points.len();
    let orientation = chain.signed_area2().signum();

    let corners: Vec<(Point, Point, Point)> = if chain.closed {
        (0..n)
            .map(|i| {
                (
                    chain.points[(i + n - 1) % n],
                    chain.points[i],
                    chain.points[(i + 1) % n],
                )
            })
            .collect()
    } else {
        chain
            .points
            .windows(3)
            .map(|w| (w[0], w[1], w[2]))
            .collect()
    };

    corners
        .into_iter()
        .filter_map(|(prev, corner, next)| {
            let d1 = unit(prev, corner)?;
            let d2 = unit(corner, next)?;
            let cross = d1.x * d2.y - d1.y * d2.x;
            let dot = d1.x * d2.x + d1.y * d2.y;
            let turn = cross.atan2(dot).to_degrees().abs();
            if (turn - 90.0).abs() > RIGHT_ANGLE_TOLERANCE_DEG {
                return None;
            }
            if chain.closed && orientation != 0.0 {
                // cross * orientation > 0: corner is convex for the enclosed region.
                let convex = cross * orientation > 0.0;
                let wanted = match material {
                    MaterialSide::Inside => !convex,
                    MaterialSide::Outside => convex,
                };
                if !wanted {
                    return None;
                }
            }
            Some(dogbone(corner, d1, d2, radius))
        })
        .collect()
}

/// Semicircular relief at `corner`, reached along `d1` and left along `d2`.
pub fn dogbone(corner: Point, d1: Point, d2: Point, radius: f64) -> ReliefCut {
    let bx = d2.x - d1.x;
    let by = d2.y - d1.y;
    let len = (bx * bx + by * by).sqrt();
    let center = Point::new(
        corner.x + radius * bx / len,
        corner.y + radius * by / len,
    );
    let through = (corner.y - center.y)
        .atan2(corner.x - center.x)
        .to_degrees();
    ReliefCut {
        corner,
        arc: Arc::new(center, radius, through - 90.0, through + 90.0),
    }
}

fn unit(from: Point, to: Point) -> Option<Point> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        None
    } else {
        Some(Point::new(dx / len, dy / len))
    }
}
