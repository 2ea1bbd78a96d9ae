//! Parametric surface evaluation.
//!
//! User-entered formula strings are parsed into a restricted arithmetic AST
//! (no host-language code execution) and sampled over a uniform `u, v` grid,
//! with every sample pushed through the coordinate mapper.

pub mod expr;
pub mod surface;

pub use expr::Expr;
pub use surface::{tessellate, SurfaceMesh, RESOLUTION};
