//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::Scene;
use crate::rasterizer::MathError;

/// Error type for scene loading
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid scene: {0}")]
    Invalid(String),
    #[error("Camera error: {0}")]
    Math(#[from] MathError),
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(scene, config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load a scene from a RON string; missing fields take their defaults
pub fn load_scene_from_str(s: &str) -> Result<Scene, SceneError> {
    let scene: Scene = ron::from_str(s)?;
    scene.validate()?;
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::ImageOrigin;
    use crate::scene::Projection;

    #[test]
    fn test_partial_scene_fills_defaults() {
        let scene = load_scene_from_str("(width: 320, height: 240, camera: None)").unwrap();
        assert_eq!((scene.width, scene.height), (320, 240));
        assert_eq!(scene.camera, None);
        assert_eq!(scene.projection, Projection::default());
        assert_eq!(scene.origin, ImageOrigin::BottomLeft);
    }

    #[test]
    fn test_orthographic_scene() {
        let src = r#"(
            projection: Orthographic(near: 1.0, far: -1.0, right: 1.0, left: -1.0, top: 1.0, bottom: -1.0),
            origin: TopLeft,
            output: "out.png",
        )"#;
        let scene = load_scene_from_str(src).unwrap();
        assert!(matches!(scene.projection, Projection::Orthographic { .. }));
        assert_eq!(scene.origin, ImageOrigin::TopLeft);
        assert_eq!(scene.output.to_str(), Some("out.png"));
    }

    #[test]
    fn test_round_trip_through_string() {
        let scene = Scene::default();
        let text = ron::ser::to_string_pretty(&scene, ron::ser::PrettyConfig::new()).unwrap();
        assert_eq!(load_scene_from_str(&text).unwrap(), scene);
    }

    #[test]
    fn test_bundled_scenes_parse() {
        let reference = load_scene_from_str(include_str!("../../assets/scenes/reference.ron")).unwrap();
        assert_eq!(reference, Scene::default());

        let flat = load_scene_from_str(include_str!("../../assets/scenes/flat.ron")).unwrap();
        assert_eq!(flat.projection, Projection::Identity);
        assert_eq!(flat.camera, None);
    }

    #[test]
    fn test_invalid_scene_rejected() {
        assert!(matches!(
            load_scene_from_str("(width: 0)"),
            Err(SceneError::Invalid(_))
        ));
        assert!(matches!(
            load_scene_from_str("(width: \"wide\")"),
            Err(SceneError::Parse(_))
        ));
    }
}
