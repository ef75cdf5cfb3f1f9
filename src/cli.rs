use std::path::PathBuf;

use clap::Parser;

/// Rasterize an OBJ mesh into an image file.
#[derive(Parser, Debug)]
#[command(name = "softraster", version, about)]
pub struct Args {
    /// OBJ mesh to render.
    #[arg(required_unless_present = "write_scene")]
    pub mesh: Option<PathBuf>,

    /// RON scene file (camera, projection, frame size, output).
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output image; the extension picks the format (tga, png, bmp, jpg).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Frame width override.
    #[arg(long)]
    pub width: Option<usize>,

    /// Frame height override.
    #[arg(long)]
    pub height: Option<usize>,

    /// Write the effective scene to this RON file and exit.
    #[arg(long)]
    pub write_scene: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
