//! Panel and layout composition.

mod layout;
mod panel;

pub use layout::{compose_layout, compose_panels, BoxPanels};
pub use panel::{
    bottom_edge_spec, compose_bottom, compose_lid, compose_side, oval, rectangle, Axis, SideSpec,
};
