//! Data model types for box geometry.

mod drawing;
mod edge;
mod geometry;
mod panel;

pub use drawing::{Drawing, PlacedPanel};
pub use edge::{Run, ToothedEdge};
pub use geometry::{bounding_box_of, Arc, BoundingBox, Circle, Line, Path, Point};
pub use panel::{Feature, FeatureKind, Layer, Panel, PanelEdge, PanelKind};
