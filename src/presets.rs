//! Named parameter presets.

use crate::config::{BoxConfig, Tolerance};
use crate::error::{BoxError, Result};

/// Names accepted by [`preset`].
pub const PRESET_NAMES: [&str; 3] = ["storage", "crate", "toybox"];

/// Look up a preset by name (case-insensitive).
pub fn preset(name: &str) -> Result<BoxConfig> {
    match name.trim().to_lowercase().as_str() {
        "storage" => Ok(storage()),
        "crate" => Ok(crate_box()),
        "toybox" => Ok(toybox()),
        _ => Err(BoxError::UnknownPreset {
            name: name.to_string(),
            available: PRESET_NAMES.join(", "),
        }),
    }
}

/// Large storage box from 14 mm plywood with two handles per long side.
pub fn storage() -> BoxConfig {
    BoxConfig::default()
}

/// Medium crate from 12 mm plywood.
pub fn crate_box() -> BoxConfig {
    BoxConfig {
        len_x: 600.0,
        len_y: 400.0,
        len_z: 350.0,
        material_thickness: 12.0,
        tooth_length: 80.0,
        tolerance: Tolerance {
            length: 0.1,
            width: 0.1,
            lid: Some(-0.2),
        },
        handles_width: 120.0,
        ..Default::default()
    }
}

/// Small toy box from 6 mm plywood, cut on a laser.
pub fn toybox() -> BoxConfig {
    BoxConfig {
        len_x: 400.0,
        len_y: 300.0,
        len_z: 250.0,
        material_thickness: 6.0,
        tooth_length: 60.0,
        tolerance: Tolerance {
            length: 0.05,
            width: 0.0,
            lid: None,
        },
        relief_radius: 0.0,
        handles_width: 100.0,
        handles_radius: 15.0,
        vent_hole_diameter: 25.0,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_resolve() {
        for name in PRESET_NAMES {
            let config = preset(name).unwrap();
            assert!(config.resolve().is_ok(), "preset {} failed", name);
        }
    }

    #[test]
    fn test_preset_lookup_is_case_insensitive() {
        assert_eq!(preset(" Crate ").unwrap(), crate_box());
    }

    #[test]
    fn test_unknown_preset() {
        let err = preset("shoebox").unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("storage, crate, toybox"));
    }
}
