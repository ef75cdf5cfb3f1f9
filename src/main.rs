//! softraster: render an OBJ mesh to an image with the software rasterizer

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use tracing_subscriber::EnvFilter;

use softraster::model::load_obj;
use softraster::scene::{load_scene, save_scene, Scene};
use softraster::VERSION;

fn main() -> Result<()> {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("softraster=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .with_context(|| format!("invalid log directive '{log_directive}'"))?,
            ),
        )
        .init();

    tracing::info!("softraster v{}", VERSION);

    let mut scene = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => Scene::default(),
    };
    if let Some(width) = args.width {
        scene.width = width;
    }
    if let Some(height) = args.height {
        scene.height = height;
    }
    if let Some(output) = args.output {
        scene.output = output;
    }

    if let Some(path) = &args.write_scene {
        save_scene(&scene, path)
            .with_context(|| format!("failed to write scene {}", path.display()))?;
        tracing::info!("Wrote scene to {}", path.display());
        return Ok(());
    }

    let mesh_path = args.mesh.context("no mesh given")?;
    let mesh = load_obj(&mesh_path)
        .with_context(|| format!("failed to load mesh {}", mesh_path.display()))?;

    let mut rasterizer = scene.rasterizer().context("invalid scene")?;
    rasterizer.load_mesh(&mesh);
    let stats = rasterizer.rasterize().context("rasterize failed")?;
    tracing::info!(
        "Rasterized {} triangles ({} drawn, {} degenerate, {} fragments)",
        stats.triangles,
        stats.drawn,
        stats.degenerate,
        stats.fragments
    );

    let image = rasterizer.to_image(scene.origin);
    write_image(image, &scene.output)
        .with_context(|| format!("failed to write {}", scene.output.display()))?;
    tracing::info!(
        "Wrote {}x{} image to {}",
        scene.width,
        scene.height,
        scene.output.display()
    );
    Ok(())
}

/// Save with the encoder implied by the extension; JPEG has no alpha channel
fn write_image(image: image::RgbaImage, path: &Path) -> image::ImageResult<()> {
    let is_jpeg = path
        .extension()
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == "jpg" || ext == "jpeg"
        })
        .unwrap_or(false);

    if is_jpeg {
        DynamicImage::ImageRgba8(image).to_rgb8().save(path)
    } else {
        image.save(path)
    }
}
