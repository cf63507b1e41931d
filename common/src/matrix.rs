//! Matrix layout conversion and decomposition.
//!
//! Importers hand out 4x4 transforms as 16 row-major floats using the column
//! vector convention, so the translation lives at indices 3, 7 and 11.
//! cgmath stores matrices column-major, which makes the conversion a transpose
//! of the storage order.

use cgmath::{InnerSpace, Matrix, Matrix3, Matrix4, Point3, Quaternion, SquareMatrix, Vector3};

use crate::EPSILON;

/// Builds a cgmath matrix from 16 row-major floats.
pub fn matrix_from_row_major(v: &[f32; 16]) -> Matrix4<f32> {
    #[rustfmt::skip]
    let m = Matrix4::new(
        v[0], v[4], v[8],  v[12],
        v[1], v[5], v[9],  v[13],
        v[2], v[6], v[10], v[14],
        v[3], v[7], v[11], v[15],
    );
    m
}

/// Flattens a cgmath matrix into 16 row-major floats.
pub fn matrix_to_row_major(m: &Matrix4<f32>) -> [f32; 16] {
    let t = m.transpose();
    let mut out = [0.0; 16];
    for (row, column) in [t.x, t.y, t.z, t.w].iter().enumerate() {
        out[row * 4] = column.x;
        out[row * 4 + 1] = column.y;
        out[row * 4 + 2] = column.z;
        out[row * 4 + 3] = column.w;
    }
    out
}

/// Splits an affine matrix into translation, rotation and scale.
///
/// Shear is discarded. A negative determinant is folded into the X scale.
pub fn decompose_matrix(m: &Matrix4<f32>) -> (Point3<f32>, Quaternion<f32>, Vector3<f32>) {
    let position = Point3::new(m.w.x, m.w.y, m.w.z);

    let x_axis = m.x.truncate();
    let y_axis = m.y.truncate();
    let z_axis = m.z.truncate();

    let mut scale = Vector3::new(x_axis.magnitude(), y_axis.magnitude(), z_axis.magnitude());

    let basis = Matrix3::from_cols(x_axis, y_axis, z_axis);
    if basis.determinant() < 0.0 {
        scale.x = -scale.x;
    }

    if scale.x.abs() < EPSILON || scale.y.abs() < EPSILON || scale.z.abs() < EPSILON {
        return (position, Quaternion::new(1.0, 0.0, 0.0, 0.0), scale);
    }

    let rotation_basis = Matrix3::from_cols(x_axis / scale.x, y_axis / scale.y, z_axis / scale.z);
    let rotation = Quaternion::from(rotation_basis).normalize();

    (position, rotation, scale)
}
