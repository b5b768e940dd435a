//! Configuration constants, box parameters and their derivation rules.

use crate::error::{BoxError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Floating-point comparison epsilon, also the drawing tolerance for
/// coincident endpoints.
pub const EPS: f64 = 0.0001;

/// How far a corner may deviate from 90 degrees and still get a relief cut.
pub const RIGHT_ANGLE_TOLERANCE_DEG: f64 = 1.0;

/// Minimum number of segments on a vertical corner joint.
pub const MIN_Z_SEGMENTS: usize = 3;

/// Legs are never narrower than this.
pub const MIN_LEGS_WIDTH: f64 = 50.0;

/// Legs height as a fraction of the box height.
pub const LEGS_LENGTH_FRACTION: f64 = 0.05;

/// Boxes longer than this get two handles on each long side.
pub const TWO_HANDLES_THRESHOLD: f64 = 750.0;

/// Vent hole distance from the lid edge as a fraction of the lid length.
pub const VENT_OFFSET_FRACTION: f64 = 0.05;

/// Fit tolerances. Positive tightens a fit, negative loosens it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Tooth length tolerance (tooth width against its notch).
    pub length: f64,
    /// Tooth thickness tolerance (height of the retention holes).
    pub width: f64,
    /// Lid fit tolerance, `length` is used when absent.
    pub lid: Option<f64>,
}

impl Tolerance {
    /// Tolerance applied to the lid joint.
    pub fn lid_or_length(&self) -> f64 {
        self.lid.unwrap_or(self.length)
    }
}

/// Flat user-facing parameter set. Fields left as `None` are derived from
/// the box dimensions by [`BoxConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    /// Outer length along X.
    pub len_x: f64,
    /// Outer width along Y.
    pub len_y: f64,
    /// Height along Z.
    pub len_z: f64,
    /// Sheet thickness.
    pub material_thickness: f64,
    /// Tooth length of the bottom joints.
    pub tooth_length: f64,
    /// Fit tolerances.
    pub tolerance: Tolerance,
    /// Desired segment height on vertical corner joints.
    pub z_segment_height: f64,
    /// Desired edge length per bottom tooth.
    pub horizontal_tooth_pitch: f64,
    pub legs_width: Option<f64>,
    pub legs_length: Option<f64>,
    /// Corner relief (dogbone) radius, usually the cutter radius.
    pub relief_radius: f64,
    pub handles_count: Option<usize>,
    pub handles_width: f64,
    pub handles_radius: f64,
    /// Gap between the handle and the top edge of the wall.
    pub handles_descent: Option<f64>,
    pub vent_hole_diameter: f64,
    pub vent_hole_offset: Option<f64>,
    /// Layout pitch as a multiple of the largest panel extent.
    pub spacing_coefficient: f64,
    /// Lid tooth length as a fraction of the lid edge.
    pub lid_tooth_fraction: f64,
    /// Height of the retention holes above the legs.
    pub tooth_holes_elevation: Option<f64>,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            len_x: 800.0,
            len_y: 500.0,
            len_z: 450.0,
            material_thickness: 14.0,
            tooth_length: 100.0,
            tolerance: Tolerance::default(),
            z_segment_height: 100.0,
            horizontal_tooth_pitch: 500.0,
            legs_width: None,
            legs_length: None,
            relief_radius: 3.0,
            handles_count: None,
            handles_width: 150.0,
            handles_radius: 20.0,
            handles_descent: None,
            vent_hole_diameter: 40.0,
            vent_hole_offset: None,
            spacing_coefficient: 1.5,
            lid_tooth_fraction: 0.8,
            tooth_holes_elevation: None,
        }
    }
}

/// Handle cut-out geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleParameters {
    pub count: usize,
    /// Straight part of the oval.
    pub width: f64,
    /// Oval end radius; the oval is `width + 2r` by `2r`.
    pub radius: f64,
    pub descent: f64,
}

/// Lid vent hole geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VentParameters {
    pub diameter: f64,
    pub offset: f64,
}

/// Fully resolved parameters consumed by the composers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxParameters {
    pub len_x: f64,
    pub len_y: f64,
    pub len_z: f64,
    pub thickness: f64,
    pub tooth_length: f64,
    pub tolerance: Tolerance,
    pub z_segments: usize,
    pub x_tooth_count: usize,
    pub y_tooth_count: usize,
    pub legs_width: f64,
    pub legs_length: f64,
    pub relief_radius: f64,
    pub handles: HandleParameters,
    pub vent: VentParameters,
    pub spacing_coefficient: f64,
    pub lid_tooth_fraction: f64,
    pub tooth_holes_elevation: f64,
}

impl BoxParameters {
    /// Lid tooth length along X.
    pub fn lid_tooth_len_x(&self) -> f64 {
        self.len_x * self.lid_tooth_fraction
    }

    /// Lid tooth length along Y.
    pub fn lid_tooth_len_y(&self) -> f64 {
        self.len_y * self.lid_tooth_fraction
    }
}

impl BoxConfig {
    /// Parse a config from JSON text. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BoxError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check the raw values and derive everything left unset.
    pub fn resolve(&self) -> Result<BoxParameters> {
        let len_x = positive("len_x", self.len_x)?;
        let len_y = positive("len_y", self.len_y)?;
        let len_z = positive("len_z", self.len_z)?;
        let thickness = positive("material_thickness", self.material_thickness)?;
        let tooth_length = positive("tooth_length", self.tooth_length)?;
        let z_segment_height = positive("z_segment_height", self.z_segment_height)?;
        let pitch = positive("horizontal_tooth_pitch", self.horizontal_tooth_pitch)?;
        let relief_radius = non_negative("relief_radius", self.relief_radius)?;
        let spacing_coefficient = finite("spacing_coefficient", self.spacing_coefficient)?;
        if spacing_coefficient < 1.0 {
            return Err(BoxError::parameter(
                "spacing_coefficient",
                format!("{} would let panels overlap, use 1.0 or more", spacing_coefficient),
            ));
        }
        let lid_tooth_fraction = positive("lid_tooth_fraction", self.lid_tooth_fraction)?;
        // A full-width lid tooth leaves no offset run to close the outline.
        if lid_tooth_fraction >= 1.0 {
            return Err(BoxError::dimension(
                "lid_tooth_fraction",
                lid_tooth_fraction,
                "in (0, 1)",
            ));
        }

        let tolerance = self.tolerance;
        finite("tolerance.length", tolerance.length)?;
        finite("tolerance.width", tolerance.width)?;
        if let Some(lid) = tolerance.lid {
            finite("tolerance.lid", lid)?;
        }
        if thickness - tolerance.width <= 0.0 {
            return Err(BoxError::parameter(
                "tolerance.width",
                format!(
                    "{} leaves no room for the {} mm retention holes",
                    tolerance.width, thickness
                ),
            ));
        }

        let z_segments = MIN_Z_SEGMENTS.max((len_z / z_segment_height).round() as usize);
        let x_tooth_count = 1.max((len_x / pitch).round() as usize);
        let y_tooth_count = 1.max((len_y / pitch).round() as usize);

        let legs_width = match self.legs_width {
            Some(w) => non_negative("legs_width", w)?,
            None => MIN_LEGS_WIDTH.max(len_x.max(len_y) / 10.0),
        };
        let legs_length = match self.legs_length {
            Some(l) => non_negative("legs_length", l)?,
            None => len_z * LEGS_LENGTH_FRACTION,
        };

        let handles = HandleParameters {
            count: self
                .handles_count
                .unwrap_or(if len_x > TWO_HANDLES_THRESHOLD { 2 } else { 1 }),
            width: non_negative("handles_width", self.handles_width)?,
            radius: non_negative("handles_radius", self.handles_radius)?,
            descent: match self.handles_descent {
                Some(d) => non_negative("handles_descent", d)?,
                None => 4.0 * thickness,
            },
        };

        let vent = VentParameters {
            diameter: non_negative("vent_hole_diameter", self.vent_hole_diameter)?,
            offset: match self.vent_hole_offset {
                Some(o) => non_negative("vent_hole_offset", o)?,
                None => len_x * VENT_OFFSET_FRACTION,
            },
        };

        let tooth_holes_elevation = match self.tooth_holes_elevation {
            Some(e) => non_negative("tooth_holes_elevation", e)?,
            None => 2.0 * thickness,
        };

        Ok(BoxParameters {
            len_x,
            len_y,
            len_z,
            thickness,
            tooth_length,
            tolerance,
            z_segments,
            x_tooth_count,
            y_tooth_count,
            legs_width,
            legs_length,
            relief_radius,
            handles,
            vent,
            spacing_coefficient,
            lid_tooth_fraction,
            tooth_holes_elevation,
        })
    }
}

fn finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BoxError::dimension(field, value, "finite"))
    }
}

fn positive(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BoxError::dimension(field, value, "positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(BoxError::dimension(field, value, "zero or positive"))
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if a float is approximately zero.
    #[inline]
    pub fn approx_zero(a: f64) -> bool {
        a.abs() < EPS
    }
}

/// Utility functions for angle operations.
pub mod angle {
    /// Normalize angle to 0-360 range (exclusive of 360).
    #[inline]
    pub fn normalize_degrees(angle: f64) -> f64 {
        let mut a = angle % 360.0;
        if a < 0.0 {
            a += 360.0;
        }
        // Handle 360.0 and -0.0 cases
        if a >= 360.0 || a == 0.0 {
            a = 0.0;
        }
        a
    }
}
