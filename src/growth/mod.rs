//! Procedural branch geometry
//!
//! Every model here takes *raw* linear progress and eases it internally:
//! the main branch with `ease_out_cubic(p)`, thin branches with
//! `ease_out_cubic` of their progress relative to their start.

pub mod bend;
pub mod trunk;
pub mod surface;
pub mod twig;

pub use bend::{composite_bend, Hook};
pub use trunk::{branch_shape, BranchGeometry, BranchParameters, BranchRoot};
pub use surface::{sample_surface, Side, SurfaceSample};
pub use twig::{
    locate_anchor, thin_branch_shape, OffsetAxis, ThinBranchGeometry, ThinBranchSpec,
    ThinBranchState,
};
