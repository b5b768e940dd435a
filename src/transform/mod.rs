//! Geometry transforms and post-processing passes.

mod affine;
mod chain;
mod relief;

pub use affine::Transform;
pub use chain::{find_chains, Chain};
pub use relief::{chain_relief, dogbone, insert_relief, MaterialSide, ReliefCut};
