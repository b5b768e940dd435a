//! Finger-joint edge synthesis.

mod toothed_line;

pub use toothed_line::{
    apply_tolerance, net_tolerance, synthesize, tolerance_weight, Alignment, ToothedLineSpec,
};
