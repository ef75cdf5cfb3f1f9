//! Software triangle rasterizer
//!
//! Features:
//! - Fixed-size vectors and matrices with adjugate inverse
//! - Look-at view, orthographic and perspective projection, viewport mapping
//! - Barycentric coverage test per pixel center
//! - Z-buffer where the larger depth wins
//! - Flat per-face color taken from the geometric normal

mod math;
mod matrix;
mod render;
mod transform;
mod types;

pub use math::*;
pub use matrix::*;
pub use render::*;
pub use transform::*;
pub use types::*;

/// Default frame size of the reference scene
pub const WIDTH: usize = 1000;
pub const HEIGHT: usize = 1000;
