//! Drawing: panels placed on one shared canvas.

use super::{BoundingBox, Panel, Point};
use serde::{Deserialize, Serialize};

/// A panel in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPanel {
    /// Unique name within the drawing (e.g. "side_x_2").
    pub name: String,
    /// Translation applied to the panel's local frame.
    pub offset: Point,
    /// Panel geometry, already translated by `offset`.
    pub panel: Panel,
}

impl PlacedPanel {
    pub fn bounding_box(&self) -> BoundingBox {
        self.panel.bounding_box()
    }
}

/// Final exportable drawing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Drawing {
    pub panels: Vec<PlacedPanel>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a placed panel by name.
    pub fn panel(&self, name: &str) -> Option<&PlacedPanel> {
        self.panels.iter().find(|p| p.name == name)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.panels
            .iter()
            .fold(BoundingBox::empty(), |bbox, p| bbox.union(&p.bounding_box()))
    }

    /// Total number of exported paths.
    pub fn path_count(&self) -> usize {
        self.panels.iter().map(|p| p.panel.path_count()).sum()
    }
}
