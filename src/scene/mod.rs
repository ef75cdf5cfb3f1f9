//! Scene module - how a mesh is viewed and where the image goes
//!
//! - Frame size and output path
//! - Look-at camera and projection choice
//! - RON files for both

mod description;
mod io;

pub use description::*;
pub use io::*;
