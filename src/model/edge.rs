//! Runs and toothed edges.

use super::{bounding_box_of, BoundingBox, Line, Path, Point};
use crate::transform::Transform;
use serde::{Deserialize, Serialize};

/// Contiguous stretch of an edge, either raised (a tooth) or flat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub length: f64,
    pub is_convex: bool,
}

impl Run {
    pub fn new(length: f64, is_convex: bool) -> Self {
        Self { length, is_convex }
    }

    /// Line geometry for this run starting at `x`.
    ///
    /// A convex run is a rectangular tab of height `depth`: top, trailing
    /// side, leading side. A flat run is a single line on the base.
    pub fn lines(&self, x: f64, depth: f64) -> Vec<Line> {
        let end = x + self.length;
        if self.is_convex {
            vec![
                Line::new(x, depth, end, depth),
                Line::new(end, 0.0, end, depth),
                Line::new(x, 0.0, x, depth),
            ]
        } else {
            vec![Line::new(x, 0.0, end, 0.0)]
        }
    }
}

/// One synthesized panel edge: its runs and the lines drawn from them.
///
/// Runs stay in the edge's own frame (starting at x = 0); `paths` follow every
/// transform applied to the edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToothedEdge {
    pub runs: Vec<Run>,
    pub depth: f64,
    pub paths: Vec<Path>,
}

impl ToothedEdge {
    /// Draw the runs left to right from x = 0.
    pub fn from_runs(runs: Vec<Run>, depth: f64) -> Self {
        let mut paths = Vec::with_capacity(runs.len() * 3);
        let mut x = 0.0;
        for run in &runs {
            paths.extend(run.lines(x, depth).into_iter().map(Path::Line));
            x += run.length;
        }
        Self { runs, depth, paths }
    }

    /// Sum of run lengths.
    pub fn length(&self) -> f64 {
        self.runs.iter().map(|r| r.length).sum()
    }

    /// Start x of every run in the edge frame, plus the final x.
    pub fn run_offsets(&self) -> Vec<f64> {
        let mut offsets = Vec::with_capacity(self.runs.len() + 1);
        let mut x = 0.0;
        offsets.push(x);
        for run in &self.runs {
            x += run.length;
            offsets.push(x);
        }
        offsets
    }

    pub fn convex_runs(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter().filter(|r| r.is_convex)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.paths.iter().filter_map(Path::as_line)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        bounding_box_of(&self.paths)
    }

    fn with_paths(&self, paths: Vec<Path>) -> Self {
        Self {
            runs: self.runs.clone(),
            depth: self.depth,
            paths,
        }
    }
}

impl Transform for ToothedEdge {
    fn translate(&self, dx: f64, dy: f64) -> Self {
        self.with_paths(self.paths.translate(dx, dy))
    }

    fn rotate(&self, degrees: f64, origin: Point) -> Self {
        self.with_paths(self.paths.rotate(degrees, origin))
    }

    fn mirror(&self, mirror_x: bool, mirror_y: bool) -> Self {
        self.with_paths(self.paths.mirror(mirror_x, mirror_y))
    }
}
