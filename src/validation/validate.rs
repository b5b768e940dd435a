//! Validation of box parameters and finished drawings.

use crate::config::{BoxParameters, EPS};
use crate::error::{BoxError, Result};
use crate::model::{Drawing, FeatureKind, Path};
use crate::transform::find_chains;
use tracing::warn;

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Check a resolved parameter set for combinations that build but would not
/// assemble well.
pub fn validate_parameters(params: &BoxParameters) -> ValidationResult {
    let mut result = ValidationResult::ok();

    // Vertical fingers
    let segment = params.len_z / params.z_segments as f64;
    if segment < params.thickness {
        result.add_warning(format!(
            "Vertical fingers are {:.1} mm long, shorter than the {} mm material",
            segment, params.thickness
        ));
    }

    // Legs
    for (axis, width) in [("X", params.len_x), ("Y", params.len_y)] {
        if width - 2.0 * params.legs_width <= EPS {
            result.add_error(format!(
                "Side {}: legs of {} mm leave no gap on a {} mm wall",
                axis, params.legs_width, width
            ));
        }
    }

    // Bottom teeth
    for (axis, len, count) in [
        ("X", params.len_x, params.x_tooth_count),
        ("Y", params.len_y, params.y_tooth_count),
    ] {
        if params.tooth_length * count as f64 > len + EPS {
            result.add_error(format!(
                "Bottom {}: {} teeth of {} mm do not fit into {} mm",
                axis, count, params.tooth_length, len
            ));
        }
    }

    // Tolerances
    let tolerances = [
        ("length", params.tolerance.length),
        ("width", params.tolerance.width),
        ("lid", params.tolerance.lid_or_length()),
    ];
    for (name, value) in tolerances {
        if value.abs() > params.thickness * 0.1 {
            result.add_warning(format!(
                "Tolerance '{}' of {} mm is large for {} mm material",
                name, value, params.thickness
            ));
        }
    }

    // Relief
    if params.relief_radius > params.thickness / 2.0 {
        result.add_warning(format!(
            "Relief radius {} mm exceeds half the material thickness",
            params.relief_radius
        ));
    }

    // Handles against tooth holes
    if params.handles.count > 0 {
        let handle_bottom = params.len_z
            - params.handles.descent
            - 2.0 * params.handles.radius
            - params.thickness;
        let hole_top = params.tooth_holes_elevation
            + params.legs_length
            + params.tolerance.width / 2.0
            + params.thickness
            - params.tolerance.width;
        if handle_bottom < hole_top {
            result.add_error(format!(
                "Handles (from y = {:.1}) run into the tooth holes (up to y = {:.1})",
                handle_bottom, hole_top
            ));
        }
    }

    // Vent holes
    if params.vent.diameter <= 0.0 {
        result.add_warning("Lid has no vent holes");
    } else if params.vent.diameter >= params.len_y {
        result.add_error(format!(
            "Vent holes of {} mm do not fit the {} mm lid",
            params.vent.diameter, params.len_y
        ));
    }

    result
}

/// Find pairs of placed panels whose bounding boxes overlap.
pub fn validate_panel_layout(drawing: &Drawing) -> Vec<(usize, usize)> {
    let mut overlaps = Vec::new();

    for i in 0..drawing.panels.len() {
        for j in i + 1..drawing.panels.len() {
            let a = drawing.panels[i].bounding_box();
            let b = drawing.panels[j].bounding_box();
            if a.overlaps(&b) {
                overlaps.push((i, j));
            }
        }
    }

    overlaps
}

/// Check a finished drawing.
pub fn validate_drawing(drawing: &Drawing) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if drawing.panels.is_empty() {
        result.add_error("Drawing has no panels");
        return result;
    }

    for placed in &drawing.panels {
        if placed.panel.edges.len() != 4 {
            result.add_error(format!(
                "Panel {}: expected 4 edges, found {}",
                placed.name,
                placed.panel.edges.len()
            ));
        }
        if placed.panel.path_count() == 0 {
            result.add_error(format!("Panel {}: no geometry", placed.name));
            continue;
        }

        let outline: Vec<Path> = placed.panel.edge_paths().copied().collect();
        let chains = find_chains(&outline);
        if chains.len() != 1 || !chains[0].closed {
            result.add_error(format!(
                "Panel {}: outline is not closed ({} chains, {} closed)",
                placed.name,
                chains.len(),
                chains.iter().filter(|c| c.closed).count()
            ));
        }
    }

    for (i, j) in validate_panel_layout(drawing) {
        result.add_error(format!(
            "Panels {} and {} overlap",
            drawing.panels[i].name, drawing.panels[j].name
        ));
    }

    let handles: usize = drawing
        .panels
        .iter()
        .map(|p| p.panel.features_of(FeatureKind::Handle).count())
        .sum();
    if handles == 0 {
        result.add_warning("Box has no handles");
    }

    result
}

/// Validate parameters and drawing together, logging every warning.
pub fn validate_box(params: &BoxParameters, drawing: &Drawing) -> ValidationResult {
    let mut result = validate_parameters(params);
    result.merge(validate_drawing(drawing));
    for warning in &result.warnings {
        warn!("{}", warning);
    }
    result
}

/// Quick validation check for command-line --validate flag.
pub fn quick_validate(params: &BoxParameters, drawing: &Drawing) -> Result<()> {
    let result = validate_box(params, drawing);

    if !result.passed {
        return Err(BoxError::parameter("validation", result.errors.join("; ")));
    }

    Ok(())
}
