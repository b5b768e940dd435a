//! Chain detection over line segments.
//!
//! Lines whose endpoints coincide within [`EPS`] are linked into maximal
//! chains. Endpoints are merged into vertices through a hash grid, so each
//! lookup only inspects the neighbouring cells instead of every segment.
//! A vertex shared by more or fewer than two segments ends a chain.

use crate::config::EPS;
use crate::model::{Path, Point};
use std::collections::HashMap;

/// Connected run of line segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    /// Vertices in walking order. A closed chain does not repeat its first
    /// vertex, so it has as many points as segments.
    pub points: Vec<Point>,
    /// Indices into the path slice the chain was built from, in walking order.
    pub segments: Vec<usize>,
    pub closed: bool,
}

impl Chain {
    /// Twice the signed area enclosed by a closed chain; positive when
    /// counter-clockwise. Zero for open chains.
    pub fn signed_area2(&self) -> f64 {
        if !self.closed {
            return 0.0;
        }
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum()
    }
}

/// Endpoint-to-vertex index on a grid of `EPS` cells.
struct EndpointIndex {
    cells: HashMap<(i64, i64), Vec<usize>>,
    vertices: Vec<Point>,
}

impl EndpointIndex {
    fn new() -> Self {
        Self {
            cells: HashMap::new(),
            vertices: Vec::new(),
        }
    }

    fn cell(p: &Point) -> (i64, i64) {
        ((p.x / EPS).floor() as i64, (p.y / EPS).floor() as i64)
    }

    /// Vertex id for `p`, merging with an existing vertex within EPS.
    fn vertex(&mut self, p: Point) -> usize {
        let (cx, cy) = Self::cell(&p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(ids) = self.cells.get(&(cx + dx, cy + dy)) {
                    if let Some(&id) = ids.iter().find(|&&id| self.vertices[id].approx_eq(&p)) {
                        return id;
                    }
                }
            }
        }
        let id = self.vertices.len();
        self.vertices.push(p);
        self.cells.entry((cx, cy)).or_default().push(id);
        id
    }
}

/// Segment as seen from the graph: its path index and both vertex ids.
#[derive(Debug, Clone, Copy)]
struct Link {
    path_index: usize,
    a: usize,
    b: usize,
}

impl Link {
    fn other(&self, v: usize) -> usize {
        if self.a == v {
            self.b
        } else {
            self.a
        }
    }
}

/// Group the lines of `paths` into maximal chains.
///
/// Arcs, circles and zero-length lines are ignored.
pub fn find_chains(paths: &[Path]) -> Vec<Chain> {
    let mut index = EndpointIndex::new();
    let mut links = Vec::new();

    for (path_index, path) in paths.iter().enumerate() {
        let Some(line) = path.as_line() else {
            continue;
        };
        let a = index.vertex(line.start);
        let b = index.vertex(line.end);
        if a == b {
            continue;
        }
        links.push(Link { path_index, a, b });
    }

    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); index.vertices.len()];
    for (i, link) in links.iter().enumerate() {
        incident[link.a].push(i);
        incident[link.b].push(i);
    }

    let mut used = vec![false; links.len()];
    let mut chains = Vec::new();

    // Open chains start at vertices that are not simple pass-throughs.
    for start in 0..index.vertices.len() {
        if incident[start].len() == 2 {
            continue;
        }
        for &first in &incident[start] {
            if used[first] {
                continue;
            }
            chains.push(walk(start, first, &links, &incident, &index.vertices, &mut used));
        }
    }

    // Whatever is left forms cycles.
    for first in 0..links.len() {
        if used[first] {
            continue;
        }
        let start = links[first].a;
        chains.push(walk(start, first, &links, &incident, &index.vertices, &mut used));
    }

    chains
}

fn walk(
    start: usize,
    first: usize,
    links: &[Link],
    incident: &[Vec<usize>],
    vertices: &[Point],
    used: &mut [bool],
) -> Chain {
    let mut points = vec![vertices[start]];
    let mut segments = Vec::new();
    let mut current = start;
    let mut link_id = first;

    loop {
        used[link_id] = true;
        let link = links[link_id];
        segments.push(link.path_index);
        current = link.other(current);

        if current == start {
            return Chain {
                points,
                segments,
                closed: incident[start].len() == 2,
            };
        }
        points.push(vertices[current]);

        if incident[current].len() != 2 {
            break;
        }
        match incident[current].iter().find(|&&l| !used[l]) {
            Some(&next) => link_id = next,
            None => break,
        }
    }

    Chain {
        points,
        segments,
        closed: false,
    }
}
