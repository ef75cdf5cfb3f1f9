//! softraster: a minimal z-buffered software triangle rasterizer
//!
//! Loads a triangle mesh, pushes its vertices through model, view,
//! projection and viewport matrices, and fills each triangle with a flat
//! color derived from its normal.

pub mod model;
pub mod rasterizer;
pub mod scene;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
