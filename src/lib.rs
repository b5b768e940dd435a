//! fingerbox - Cut geometry for finger-jointed plywood boxes.
//!
//! This library computes the flat panels of a box with finger (box) joints:
//! toothed edges with fit tolerance, dogbone relief at inside corners,
//! retention holes for the bottom teeth, handles and lid vents. The panels
//! are laid out on one canvas and exported as DXF or SVG for laser or CNC
//! cutting.
//!
//! # Example
//!
//! ```no_run
//! use fingerbox::{build_drawing, presets, render_dxf};
//!
//! let config = presets::preset("storage").unwrap();
//! let drawing = build_drawing(&config).unwrap();
//! std::fs::write("storage.dxf", render_dxf(&drawing)).unwrap();
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod generator;
pub mod joint;
pub mod model;
pub mod presets;
pub mod transform;
pub mod validation;

// Re-exports for convenience
pub use compose::{compose_layout, compose_panels, BoxPanels};
pub use config::{BoxConfig, BoxParameters, Tolerance};
pub use error::{BoxError, ErrorCode, Result};
pub use generator::{render_dxf, render_svg, OutputFormat};
pub use joint::{synthesize, Alignment, ToothedLineSpec};
pub use model::{Drawing, Panel, Path, Point, Run, ToothedEdge};
pub use transform::{insert_relief, MaterialSide, ReliefCut, Transform};
pub use validation::{quick_validate, validate_box, ValidationResult};

use tracing::info;

/// Build the complete drawing for a box.
///
/// This is the main high-level function that performs the full pipeline:
/// 1. Resolve the configuration into concrete parameters
/// 2. Compose the side walls, bottom and lid
/// 3. Lay the six panels out on one canvas
pub fn build_drawing(config: &BoxConfig) -> Result<Drawing> {
    let params = config.resolve()?;
    build_drawing_from(&params)
}

/// Same as [`build_drawing`] for already resolved parameters.
pub fn build_drawing_from(params: &BoxParameters) -> Result<Drawing> {
    info!(
        "Building {}x{}x{} box from {} mm material",
        params.len_x, params.len_y, params.len_z, params.thickness
    );
    let panels = compose_panels(params)?;
    compose_layout(params, &panels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_drawing_default() {
        let drawing = build_drawing(&BoxConfig::default()).unwrap();
        assert_eq!(drawing.panels.len(), 6);
        assert!(drawing.path_count() > 0);
    }

    #[test]
    fn test_build_drawing_rejects_bad_config() {
        let config = BoxConfig {
            len_x: -1.0,
            ..Default::default()
        };
        let err = build_drawing(&config).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidDimension);
    }

    #[test]
    fn test_oversized_tooth_fails_with_negative_offset() {
        let config = BoxConfig {
            tooth_length: 600.0,
            ..Default::default()
        };
        let err = build_drawing(&config).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NegativeOffset);
    }
}
