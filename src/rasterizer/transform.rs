//! Model, view, projection and viewport matrix builders

use super::math::{MathError, Vec3};
use super::matrix::Mat4;

/// Object placement; scenes are authored in world space
pub fn model_matrix() -> Mat4 {
    Mat4::identity()
}

/// Look-at camera: rotate into the (x, y, z) camera basis after translating by `-center`
pub fn view_matrix(eye: Vec3, center: Vec3, up: Vec3) -> Result<Mat4, MathError> {
    let z = (eye - center).normalize()?;
    let x = up.cross(z).normalize()?;
    let y = z.cross(x).normalize()?;

    let rotate = Mat4::from_rows([
        [x.x(), x.y(), x.z(), 0.0],
        [y.x(), y.y(), y.z(), 0.0],
        [z.x(), z.y(), z.z(), 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let translate = Mat4::from_rows([
        [1.0, 0.0, 0.0, -center.x()],
        [0.0, 1.0, 0.0, -center.y()],
        [0.0, 0.0, 1.0, -center.z()],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    Ok(rotate * translate)
}

/// Map the box bounded by the six planes onto the [-1, 1] cube.
///
/// The near plane lands on z = 1 and the far plane on z = -1.
pub fn orthographic_projection(near: f64, far: f64, right: f64, left: f64, top: f64, bottom: f64) -> Mat4 {
    let translate = Mat4::from_rows([
        [1.0, 0.0, 0.0, -(left + right) / 2.0],
        [0.0, 1.0, 0.0, -(top + bottom) / 2.0],
        [0.0, 0.0, 1.0, -(near + far) / 2.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let scale = Mat4::from_rows([
        [2.0 / (right - left), 0.0, 0.0, 0.0],
        [0.0, 2.0 / (top - bottom), 0.0, 0.0],
        [0.0, 0.0, 2.0 / (near - far), 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    scale * translate
}

/// Symmetric frustum projection; `fov` is the full vertical angle in degrees.
///
/// The frustum is squashed into a box by the perspective-to-orthographic
/// matrix and then handed to [`orthographic_projection`]. The squash matrix
/// scales x and y by `far` rather than `near`.
pub fn perspective_projection(fov: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
    let top = near * (fov / 2.0).to_radians().tan();
    let bottom = -top;
    let right = top * aspect;
    let left = -right;

    let orth = orthographic_projection(near, far, right, left, top, bottom);
    let pers = Mat4::from_rows([
        [far, 0.0, 0.0, 0.0],
        [0.0, far, 0.0, 0.0],
        [0.0, 0.0, near + far, -near * far],
        [0.0, 0.0, 1.0, 0.0],
    ]);
    orth * pers
}

/// Map the [-1, 1] square onto a `width`×`height` pixel grid
pub fn viewport_matrix(width: usize, height: usize) -> Mat4 {
    let w = width as f64;
    let h = height as f64;
    Mat4::from_rows([
        [w / 2.0, 0.0, 0.0, w / 2.0],
        [0.0, h / 2.0, 0.0, h / 2.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}
