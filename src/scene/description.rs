//! Scene description: frame size, camera and projection

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::SceneError;
use crate::rasterizer::{
    model_matrix, orthographic_projection, perspective_projection, view_matrix, viewport_matrix,
    ImageOrigin, Mat4, Rasterizer, Vec3, HEIGHT, WIDTH,
};

/// Look-at camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: [f64; 3],
    pub center: [f64; 3],
    pub up: [f64; 3],
}

impl Camera {
    pub fn view_matrix(&self) -> Result<Mat4, SceneError> {
        Ok(view_matrix(
            Vec3::from(self.eye),
            Vec3::from(self.center),
            Vec3::from(self.up),
        )?)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 1.0],
            center: [0.0, 0.0, 2.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

/// Projection stage of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Geometry is already in [-1, 1]
    Identity,
    Orthographic {
        near: f64,
        far: f64,
        right: f64,
        left: f64,
        top: f64,
        bottom: f64,
    },
    /// `fov` is the full vertical angle in degrees
    Perspective {
        fov: f64,
        aspect: f64,
        near: f64,
        far: f64,
    },
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Identity => Mat4::identity(),
            Projection::Orthographic { near, far, right, left, top, bottom } => {
                orthographic_projection(near, far, right, left, top, bottom)
            }
            Projection::Perspective { fov, aspect, near, far } => {
                perspective_projection(fov, aspect, near, far)
            }
        }
    }

    /// Reject bounds that would divide by zero when the matrix is built
    pub fn validate(&self) -> Result<(), SceneError> {
        let invalid = |msg: &str| Err(SceneError::Invalid(msg.to_string()));
        match *self {
            Projection::Identity => Ok(()),
            Projection::Orthographic { near, far, right, left, top, bottom } => {
                if near == far || right == left || top == bottom {
                    return invalid("orthographic box has zero extent");
                }
                Ok(())
            }
            Projection::Perspective { fov, aspect, near, far } => {
                if !(fov > 0.0 && fov < 360.0) {
                    return invalid("fov must be between 0 and 360 degrees");
                }
                if aspect <= 0.0 {
                    return invalid("aspect must be positive");
                }
                if near == far || near == 0.0 {
                    return invalid("near must be non-zero and differ from far");
                }
                Ok(())
            }
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective {
            fov: 150.0,
            aspect: 1.0,
            near: 2.0,
            far: 3.0,
        }
    }
}

/// Everything needed to turn a mesh into an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    /// `None` keeps the view matrix at identity
    pub camera: Option<Camera>,
    pub projection: Projection,
    pub origin: ImageOrigin,
    pub output: PathBuf,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            camera: Some(Camera::default()),
            projection: Projection::default(),
            origin: ImageOrigin::BottomLeft,
            output: PathBuf::from("framebuffer.tga"),
        }
    }
}

impl Scene {
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::Invalid(format!(
                "frame size {}x{} must be positive",
                self.width, self.height
            )));
        }
        self.projection.validate()
    }

    pub fn view_matrix(&self) -> Result<Mat4, SceneError> {
        match &self.camera {
            Some(camera) => camera.view_matrix(),
            None => Ok(Mat4::identity()),
        }
    }

    /// Build a rasterizer sized for this scene with all four matrices set
    pub fn rasterizer(&self) -> Result<Rasterizer, SceneError> {
        self.validate()?;
        let mut r = Rasterizer::new(self.width, self.height);
        r.set_model_matrix(model_matrix());
        r.set_view_matrix(self.view_matrix()?);
        r.set_projection_matrix(self.projection.matrix());
        r.set_viewport_matrix(viewport_matrix(self.width, self.height));
        Ok(r)
    }
}
