//! Panel composition: side walls, bottom and lid.
//!
//! Every panel is built in its own frame with the core rectangle at
//! `[0, width] x [0, height]`. Edges are synthesized once along the X axis
//! and then rotated or mirrored into place; the opposite edge of a pair is
//! always a reflection of the first, never a second synthesis.

use crate::config::BoxParameters;
use crate::error::{BoxError, Result};
use crate::joint::{synthesize, Alignment, ToothedLineSpec};
use crate::model::{
    Arc, Circle, Feature, FeatureKind, Line, Panel, PanelEdge, PanelKind, Path, Point, ToothedEdge,
};
use crate::transform::{insert_relief, MaterialSide, Transform};
use tracing::debug;

/// Which pair of side walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Walls running along `len_x`. These carry the sockets and the handles.
    X,
    /// Walls running along `len_y`.
    Y,
}

impl Axis {
    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "side_x",
            Axis::Y => "side_y",
        }
    }
}

/// Everything that differs between the two side wall pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideSpec {
    pub axis: Axis,
    pub width: f64,
    /// Vertical joints carry sockets instead of teeth.
    pub mother: bool,
    pub handles: bool,
    /// Length of the lid tab this wall receives.
    pub lid_tooth_length: f64,
}

impl SideSpec {
    pub fn for_axis(params: &BoxParameters, axis: Axis) -> Self {
        match axis {
            Axis::X => Self {
                axis,
                width: params.len_x,
                mother: true,
                handles: params.handles.count > 0,
                lid_tooth_length: params.lid_tooth_len_x(),
            },
            Axis::Y => Self {
                axis,
                width: params.len_y,
                mother: false,
                handles: false,
                lid_tooth_length: params.lid_tooth_len_y(),
            },
        }
    }
}

/// Spec of the bottom panel edge meeting the side walls of `axis`.
///
/// The side's retention holes are placed from the same spec, so holes and
/// teeth line up by construction.
pub fn bottom_edge_spec(params: &BoxParameters, axis: Axis) -> ToothedLineSpec {
    let (len, count) = match axis {
        Axis::X => (params.len_x, params.x_tooth_count),
        Axis::Y => (params.len_y, params.y_tooth_count),
    };
    // Overlong teeth surface as a negative offset, not a negative spacing.
    let spacing = ((len - params.tooth_length * count as f64) / count as f64).max(0.0);
    ToothedLineSpec::single(len, params.tooth_length, params.thickness)
        .with_count(count, spacing)
        .with_tolerance(params.tolerance.length)
}

/// Build one side wall.
pub fn compose_side(params: &BoxParameters, side: SideSpec) -> Result<Panel> {
    let width = side.width;
    let height = params.len_z;
    let segment = height / params.z_segments as f64;

    let vertical = ToothedLineSpec::single(height, segment, params.thickness)
        .with_count(params.z_segments.div_ceil(2), segment)
        .with_mother(side.mother)
        .with_alignment(Alignment::Right)
        .with_tolerance(params.tolerance.length);
    let legs = ToothedLineSpec::single(width, width - 2.0 * params.legs_width, params.legs_length);
    let top = ToothedLineSpec::single(width, side.lid_tooth_length, params.thickness)
        .with_tolerance(-params.tolerance.lid_or_length());

    let mut panel = Panel::new(side.axis.name(), PanelKind::Side);
    push_vertical_pair(&mut panel, &synthesize(&vertical)?, width);
    push_edge(&mut panel, "bottom", synthesize(&legs)?);
    push_edge(
        &mut panel,
        "top",
        synthesize(&top)?.mirror(false, true).translate(0.0, height),
    );
    relieve_outline(&mut panel, params.relief_radius);

    if side.handles {
        add_handles(&mut panel, params, width, height)?;
    }
    add_tooth_holes(&mut panel, params, side)?;

    debug!(
        "Composed {}: {}x{}, {} paths, {} relief cuts",
        panel.name,
        width,
        height,
        panel.path_count(),
        panel.relief.len()
    );
    Ok(panel)
}

/// Build the bottom panel.
pub fn compose_bottom(params: &BoxParameters) -> Result<Panel> {
    let mut panel = Panel::new("bottom", PanelKind::Bottom);
    let vertical = synthesize(&bottom_edge_spec(params, Axis::Y))?;
    let horizontal = synthesize(&bottom_edge_spec(params, Axis::X))?;
    push_vertical_pair(&mut panel, &vertical, params.len_x);
    push_horizontal_pair(&mut panel, &horizontal, params.len_y);
    relieve_outline(&mut panel, params.relief_radius);

    debug!(
        "Composed bottom: {}x{}, {} paths, {} relief cuts",
        params.len_x,
        params.len_y,
        panel.path_count(),
        panel.relief.len()
    );
    Ok(panel)
}

/// Build the lid.
pub fn compose_lid(params: &BoxParameters) -> Result<Panel> {
    let tolerance = params.tolerance.lid_or_length();
    let vertical = ToothedLineSpec::single(params.len_y, params.lid_tooth_len_y(), params.thickness)
        .with_tolerance(tolerance);
    let horizontal =
        ToothedLineSpec::single(params.len_x, params.lid_tooth_len_x(), params.thickness)
            .with_tolerance(tolerance);

    let mut panel = Panel::new("lid", PanelKind::Lid);
    push_vertical_pair(&mut panel, &synthesize(&vertical)?, params.len_x);
    push_horizontal_pair(&mut panel, &synthesize(&horizontal)?, params.len_y);
    relieve_outline(&mut panel, params.relief_radius);

    let d = params.vent.diameter;
    if d > 0.0 {
        let y = params.len_y / 2.0;
        let first = params.vent.offset + d / 2.0;
        let second = params.len_x - params.vent.offset - d / 2.0;
        if second - first < d {
            return Err(BoxError::parameter(
                "vent_hole_offset",
                format!(
                    "vent holes of {} mm overlap on a {} mm lid",
                    d, params.len_x
                ),
            ));
        }
        panel.features.push(Feature {
            kind: FeatureKind::VentHole,
            paths: vec![
                Path::Circle(Circle::new(Point::new(first, y), d / 2.0)),
                Path::Circle(Circle::new(Point::new(second, y), d / 2.0)),
            ],
        });
    }

    debug!(
        "Composed lid: {}x{}, {} paths, {} relief cuts",
        params.len_x,
        params.len_y,
        panel.path_count(),
        panel.relief.len()
    );
    Ok(panel)
}

fn push_edge(panel: &mut Panel, name: &str, edge: ToothedEdge) {
    panel.edges.push(PanelEdge {
        name: name.to_string(),
        edge,
    });
}

/// Left edge rotated up the Y axis, right edge its mirror at `width`.
fn push_vertical_pair(panel: &mut Panel, edge: &ToothedEdge, width: f64) {
    let left = edge.rotate(90.0, Point::default());
    let right = left.mirror(true, false).translate(width, 0.0);
    push_edge(panel, "left", left);
    push_edge(panel, "right", right);
}

/// Teeth pointing down at y = 0 and up at `height`.
fn push_horizontal_pair(panel: &mut Panel, edge: &ToothedEdge, height: f64) {
    push_edge(panel, "bottom", edge.mirror(false, true));
    push_edge(panel, "top", edge.translate(0.0, height));
}

fn relieve_outline(panel: &mut Panel, radius: f64) {
    let outline: Vec<Path> = panel.edge_paths().copied().collect();
    panel
        .relief
        .extend(insert_relief(&outline, radius, MaterialSide::Inside));
}

/// Start positions of `count` items of `length` spread over `total`, with
/// equal gaps between them and half a gap at each end.
fn spread(total: f64, count: usize, length: f64, field: &str) -> Result<Vec<f64>> {
    let spacing = (total - count as f64 * length) / count as f64;
    if spacing < 0.0 {
        return Err(BoxError::parameter(
            field,
            format!(
                "{} x {} mm does not fit into {} mm",
                count, length, total
            ),
        ));
    }
    let spans = ToothedLineSpec::single(total, length, 0.0)
        .with_count(count, spacing)
        .tooth_spans()?;
    Ok(spans.into_iter().map(|(start, _)| start).collect())
}

fn add_handles(panel: &mut Panel, params: &BoxParameters, width: f64, height: f64) -> Result<()> {
    let handles = &params.handles;
    let length = handles.width + 2.0 * handles.radius;
    let y = height - handles.descent - 2.0 * handles.radius - params.thickness;
    if y < 0.0 {
        return Err(BoxError::parameter(
            "handles_descent",
            format!("handles would start below the wall at y = {}", y),
        ));
    }
    for x in spread(width, handles.count, length, "handles_width")? {
        panel.features.push(Feature {
            kind: FeatureKind::Handle,
            paths: oval(x, y, handles.width, handles.radius),
        });
    }
    Ok(())
}

fn add_tooth_holes(panel: &mut Panel, params: &BoxParameters, side: SideSpec) -> Result<()> {
    let tol = params.tolerance.width;
    let hole_height = params.thickness - tol;
    let y = params.tooth_holes_elevation + params.legs_length + tol / 2.0;
    let spans = bottom_edge_spec(params, side.axis).tooth_spans()?;

    let mut hole_paths = Vec::with_capacity(spans.len() * 4);
    for (x, length) in spans {
        let paths = rectangle(x, y, length, hole_height);
        hole_paths.extend(paths.iter().copied());
        panel.features.push(Feature {
            kind: FeatureKind::ToothHole,
            paths,
        });
    }
    panel.relief.extend(insert_relief(
        &hole_paths,
        params.relief_radius,
        MaterialSide::Outside,
    ));
    Ok(())
}

/// Axis-aligned rectangle, counter-clockwise from its lower-left corner.
pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Vec<Path> {
    let (x2, y2) = (x + width, y + height);
    vec![
        Path::Line(Line::new(x, y, x2, y)),
        Path::Line(Line::new(x2, y, x2, y2)),
        Path::Line(Line::new(x2, y2, x, y2)),
        Path::Line(Line::new(x, y2, x, y)),
    ]
}

/// Stadium of straight length `width` and end radius `radius`, lower-left
/// corner of its bounding box at `(x, y)`.
pub fn oval(x: f64, y: f64, width: f64, radius: f64) -> Vec<Path> {
    let left = Point::new(x + radius, y + radius);
    let right = Point::new(x + radius + width, y + radius);
    let mut paths = vec![
        Path::Arc(Arc::new(left, radius, 90.0, 270.0)),
        Path::Arc(Arc::new(right, radius, 270.0, 90.0)),
    ];
    if width > 0.0 {
        paths.push(Path::Line(Line::new(left.x, y, right.x, y)));
        paths.push(Path::Line(Line::new(right.x, y + 2.0 * radius, left.x, y + 2.0 * radius)));
    }
    paths
}
