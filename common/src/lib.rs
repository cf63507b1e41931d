//! Value types shared by the import core and the target scene graph.

mod color;
mod matrix;
mod mesh;

pub use color::RgbaColor;
pub use matrix::{decompose_matrix, matrix_from_row_major, matrix_to_row_major};
pub use mesh::PolygonMesh;

/// Tolerance used for floating point comparisons.
pub const EPSILON: f32 = 1e-5;
