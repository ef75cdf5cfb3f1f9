//! Core rendering functions
//! Z-buffered triangle fill with flat per-face color

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::math::{barycentric, MathError, Vec2, Vec3};
use super::matrix::Mat4;
use super::transform::viewport_matrix;
use super::types::{normal_color, Color, Mesh, MeshError};

/// Errors that abort a rasterize pass before any pixel is written
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),
    #[error("transform failed: {0}")]
    Math(#[from] MathError),
}

/// Which image row the rasterizer's y = 0 lands on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageOrigin {
    /// Viewport y grows upward (TGA convention)
    #[default]
    BottomLeft,
    TopLeft,
}

/// Color and depth grids indexed by `x + y * width`
pub struct FrameBuffers {
    pub colors: Vec<Vec3>,
    /// Largest depth accepted so far; `-inf` means nothing drawn
    pub depths: Vec<f64>,
    pub width: usize,
    pub height: usize,
}

impl FrameBuffers {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            colors: vec![Vec3::ZERO; width * height],
            depths: vec![f64::NEG_INFINITY; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        self.colors.fill(Vec3::ZERO);
        self.depths.fill(f64::NEG_INFINITY);
    }

    fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// Write `color` if `z` is greater than the stored depth
    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, z: f64, color: Vec3) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.index(x, y);
        if z > self.depths[idx] {
            self.depths[idx] = z;
            self.colors[idx] = color;
            return true;
        }
        false
    }
}

/// Counters from one rasterize pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub triangles: usize,
    /// Triangles that won at least one depth test
    pub drawn: usize,
    /// Skipped for a zero-length normal or zero screen-space area
    pub degenerate: usize,
    /// Pixels written, counting overdraw
    pub fragments: usize,
}

/// Software rasterizer owning its transforms, mesh and frame buffers
pub struct Rasterizer {
    model: Mat4,
    view: Mat4,
    projection: Mat4,
    viewport: Mat4,
    mesh: Mesh,
    fb: FrameBuffers,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        let mut r = Self {
            model: Mat4::identity(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            viewport: viewport_matrix(width, height),
            mesh: Mesh::new(),
            fb: FrameBuffers::new(width, height),
        };
        r.reset();
        r
    }

    /// Restore default transforms, drop the mesh and clear both buffers
    pub fn reset(&mut self) {
        self.model = Mat4::identity();
        self.view = Mat4::identity();
        self.projection = Mat4::identity();
        self.viewport = viewport_matrix(self.fb.width, self.fb.height);
        self.mesh.clear();
        self.fb.clear();
    }

    pub fn width(&self) -> usize {
        self.fb.width
    }

    pub fn height(&self) -> usize {
        self.fb.height
    }

    pub fn set_model_matrix(&mut self, m: Mat4) {
        self.model = m;
    }

    pub fn set_view_matrix(&mut self, m: Mat4) {
        self.view = m;
    }

    pub fn set_projection_matrix(&mut self, m: Mat4) {
        self.projection = m;
    }

    pub fn set_viewport_matrix(&mut self, m: Mat4) {
        self.viewport = m;
    }

    pub fn load_vertices(&mut self, vertices: &[Vec3]) {
        self.mesh.load_vertices(vertices);
    }

    pub fn load_indices(&mut self, indices: &[usize]) {
        self.mesh.load_indices(indices);
    }

    pub fn load_mesh(&mut self, mesh: &Mesh) {
        // Offset so the new indices keep pointing at their own vertices
        let base = self.mesh.vertices().len();
        let indices: Vec<usize> = mesh.indices().iter().map(|i| i + base).collect();
        self.mesh.load_vertices(mesh.vertices());
        self.mesh.load_indices(&indices);
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Fill every loaded triangle into the color and depth buffers
    pub fn rasterize(&mut self) -> Result<RasterStats, RasterError> {
        self.mesh.validate()?;
        if self.mesh.is_empty() {
            tracing::debug!("rasterize called with no triangles");
            return Ok(RasterStats::default());
        }

        let mvp = self.viewport * self.projection * self.view * self.model;

        // Project everything up front so a bad w aborts before any pixel changes
        let mut surfaces = Vec::with_capacity(self.mesh.triangle_count());
        for tri in self.mesh.triangles() {
            let [v0, v1, v2] = tri;
            let normal = (v1 - v0).cross(v2 - v1).normalize().ok();
            let mut screen = [Vec3::ZERO; 3];
            for (s, v) in screen.iter_mut().zip(tri) {
                *s = (mvp * v.to_homogeneous(1.0)).perspective_divide()?;
            }
            surfaces.push((screen, normal));
        }

        let mut stats = RasterStats {
            triangles: surfaces.len(),
            ..Default::default()
        };
        for (i, (screen, normal)) in surfaces.into_iter().enumerate() {
            let Some(normal) = normal else {
                tracing::debug!(triangle = i, "skipping triangle with zero-length normal");
                stats.degenerate += 1;
                continue;
            };
            match self.rasterize_triangle(&screen, normal_color(normal)) {
                Some(0) => {}
                Some(written) => {
                    stats.drawn += 1;
                    stats.fragments += written;
                }
                None => {
                    tracing::debug!(triangle = i, "skipping triangle with no screen area");
                    stats.degenerate += 1;
                }
            }
        }

        tracing::debug!(
            triangles = stats.triangles,
            drawn = stats.drawn,
            degenerate = stats.degenerate,
            fragments = stats.fragments,
            "rasterize pass complete"
        );
        Ok(stats)
    }

    /// Fill one screen-space triangle; `None` if it has no area on screen
    fn rasterize_triangle(&mut self, v: &[Vec3; 3], color: Vec3) -> Option<usize> {
        let flat: [Vec2; 3] = [v[0].truncate(), v[1].truncate(), v[2].truncate()];

        let x_lo = v[0].x().min(v[1].x()).min(v[2].x());
        let x_hi = v[0].x().max(v[1].x()).max(v[2].x());
        let y_lo = v[0].y().min(v[1].y()).min(v[2].y());
        let y_hi = v[0].y().max(v[1].y()).max(v[2].y());

        let x_min = (x_lo.floor() as i64).max(0);
        let x_max = (x_hi.ceil() as i64).min(self.fb.width as i64 - 1);
        let y_min = (y_lo.floor() as i64).max(0);
        let y_max = (y_hi.ceil() as i64).min(self.fb.height as i64 - 1);

        // Off screen; a zero-area triangle still counts as degenerate
        if x_min > x_max || y_min > y_max {
            return barycentric(Vec2::ZERO, flat).map(|_| 0);
        }

        let mut written = 0;
        for x in x_min..=x_max {
            for y in y_min..=y_max {
                let sample = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let bc = barycentric(sample, flat)?;
                if !bc.contains() {
                    continue;
                }
                let z = bc.interpolate(v[0].z(), v[1].z(), v[2].z());
                if self.fb.set_pixel_with_depth(x as usize, y as usize, z, color) {
                    written += 1;
                }
            }
        }
        Some(written)
    }

    /// Raw (unclamped) color at a pixel
    pub fn color_at(&self, x: usize, y: usize) -> Option<Vec3> {
        (x < self.fb.width && y < self.fb.height).then(|| self.fb.colors[self.fb.index(x, y)])
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.fb.width && y < self.fb.height).then(|| self.fb.depths[self.fb.index(x, y)])
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.fb.colors
    }

    pub fn depths(&self) -> &[f64] {
        &self.fb.depths
    }

    /// Copy the color grid into `image`, clamping channels to bytes.
    ///
    /// Pixels outside either the image or the grid are left alone.
    pub fn draw_to_image(&self, image: &mut RgbaImage, origin: ImageOrigin) {
        let width = self.fb.width.min(image.width() as usize);
        let height = self.fb.height.min(image.height() as usize);
        for y in 0..height {
            let row = match origin {
                ImageOrigin::BottomLeft => image.height() as usize - 1 - y,
                ImageOrigin::TopLeft => y,
            };
            for x in 0..width {
                let color = Color::from_vec3(self.fb.colors[self.fb.index(x, y)]);
                image.put_pixel(x as u32, row as u32, Rgba(color.to_bytes()));
            }
        }
    }

    /// Render the color grid into a new image of the same size
    pub fn to_image(&self, origin: ImageOrigin) -> RgbaImage {
        let mut image = RgbaImage::new(self.fb.width as u32, self.fb.height as u32);
        self.draw_to_image(&mut image, origin);
        image
    }
}
