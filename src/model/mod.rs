//! Model module - mesh files on disk
//!
//! Reads Wavefront OBJ geometry into a [`crate::rasterizer::Mesh`].

mod obj;

pub use obj::*;
