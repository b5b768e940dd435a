//! Layout of the six panels on one canvas.

use super::panel::{compose_bottom, compose_lid, compose_side, Axis, SideSpec};
use crate::config::BoxParameters;
use crate::error::{BoxError, Result};
use crate::model::{BoundingBox, Drawing, Panel, PlacedPanel, Point};
use crate::transform::Transform;
use tracing::{debug, info};

/// The five distinct panels of a box. Both side pairs are drawn twice.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPanels {
    pub side_x: Panel,
    pub side_y: Panel,
    pub bottom: Panel,
    pub lid: Panel,
}

impl BoxPanels {
    /// Grid of `(name, panel)` by column, top to bottom.
    fn columns(&self) -> [[(&'static str, &Panel); 3]; 2] {
        [
            [
                ("side_x", &self.side_x),
                ("side_x_2", &self.side_x),
                ("bottom", &self.bottom),
            ],
            [
                ("side_y", &self.side_y),
                ("side_y_2", &self.side_y),
                ("lid", &self.lid),
            ],
        ]
    }

    fn iter(&self) -> impl Iterator<Item = &Panel> {
        [&self.side_x, &self.side_y, &self.bottom, &self.lid].into_iter()
    }
}

/// Build every distinct panel once.
pub fn compose_panels(params: &BoxParameters) -> Result<BoxPanels> {
    Ok(BoxPanels {
        side_x: compose_side(params, SideSpec::for_axis(params, Axis::X))?,
        side_y: compose_side(params, SideSpec::for_axis(params, Axis::Y))?,
        bottom: compose_bottom(params)?,
        lid: compose_lid(params)?,
    })
}

/// Place the panels on a two-column grid.
///
/// Both grid pitches are `spacing_coefficient` times the largest panel extent
/// on that axis, and each panel's bounding box starts at its cell origin, so
/// no two panels can overlap. Duplicates are translated clones.
pub fn compose_layout(params: &BoxParameters, panels: &BoxPanels) -> Result<Drawing> {
    let coefficient = params.spacing_coefficient;
    if !coefficient.is_finite() || coefficient < 1.0 {
        return Err(BoxError::parameter(
            "spacing_coefficient",
            format!("{} would let panels overlap, use 1.0 or more", coefficient),
        ));
    }

    let (max_w, max_h) = panels.iter().fold((0.0_f64, 0.0_f64), |(w, h), p| {
        let bbox = p.bounding_box();
        (w.max(bbox.width()), h.max(bbox.height()))
    });
    let pitch_x = coefficient * max_w;
    let pitch_y = coefficient * max_h;
    debug!("Layout pitch: {} x {}", pitch_x, pitch_y);

    let mut drawing = Drawing::new();
    for (col, column) in panels.columns().iter().enumerate() {
        for (row, (name, panel)) in column.iter().enumerate() {
            let cell = Point::new(col as f64 * pitch_x, row as f64 * pitch_y);
            drawing.panels.push(place(name, panel, cell));
        }
    }

    let bbox: BoundingBox = drawing.bounding_box();
    info!(
        "Laid out {} panels on {:.1} x {:.1}, {} paths",
        drawing.panels.len(),
        bbox.width(),
        bbox.height(),
        drawing.path_count()
    );
    Ok(drawing)
}

/// Move `panel` so its bounding box starts at `cell`.
fn place(name: &str, panel: &Panel, cell: Point) -> PlacedPanel {
    let bbox = panel.bounding_box();
    let offset = Point::new(cell.x - bbox.min_x, cell.y - bbox.min_y);
    PlacedPanel {
        name: name.to_string(),
        offset,
        panel: panel.translate(offset.x, offset.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoxConfig;
    use crate::presets;

    fn layout_for(config: &BoxConfig) -> Drawing {
        let params = config.resolve().unwrap();
        let panels = compose_panels(&params).unwrap();
        compose_layout(&params, &panels).unwrap()
    }

    #[test]
    fn test_six_panels_in_order() {
        let drawing = layout_for(&BoxConfig::default());
        let names: Vec<&str> = drawing.panels.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["side_x", "side_x_2", "bottom", "side_y", "side_y_2", "lid"]
        );
    }

    #[test]
    fn test_no_two_panels_overlap() {
        for name in presets::PRESET_NAMES {
            let drawing = layout_for(&presets::preset(name).unwrap());
            for (i, a) in drawing.panels.iter().enumerate() {
                for b in &drawing.panels[i + 1..] {
                    assert!(
                        !a.bounding_box().overlaps(&b.bounding_box()),
                        "{}: {} overlaps {}",
                        name,
                        a.name,
                        b.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_duplicates_are_translated_copies() {
        let drawing = layout_for(&BoxConfig::default());
        for (first, second) in [("side_x", "side_x_2"), ("side_y", "side_y_2")] {
            let a = drawing.panel(first).unwrap();
            let b = drawing.panel(second).unwrap();
            let dx = b.offset.x - a.offset.x;
            let dy = b.offset.y - a.offset.y;
            let moved = a.panel.translate(dx, dy);
            assert_eq!(moved.edges.len(), b.panel.edges.len());
            for (pa, pb) in moved.layered_paths().iter().zip(b.panel.layered_paths()) {
                assert_eq!(pa.0, pb.0);
                let (ba, bb) = (pa.1.bounding_box(), pb.1.bounding_box());
                assert!((ba.min_x - bb.min_x).abs() < 1e-9);
                assert!((ba.min_y - bb.min_y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_panels_start_at_cell_origins() {
        let drawing = layout_for(&BoxConfig::default());
        let side_x = drawing.panel("side_x").unwrap().bounding_box();
        assert!(side_x.min_x.abs() < 1e-9);
        assert!(side_x.min_y.abs() < 1e-9);
    }

    #[test]
    fn test_small_spacing_coefficient_is_rejected() {
        let params = BoxConfig::default().resolve().unwrap();
        let panels = compose_panels(&params).unwrap();
        let tight = BoxParameters {
            spacing_coefficient: 0.9,
            ..params
        };
        let err = compose_layout(&tight, &panels).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
