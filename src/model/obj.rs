//! Wavefront OBJ loading
//!
//! Only positions (`v`) and faces (`f`) are read. Texture coordinates,
//! normals, groups and materials are skipped.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::rasterizer::{Mesh, MeshError, Vec3};

/// Error type for mesh loading
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

fn parse_error(line: usize, message: impl Into<String>) -> ObjError {
    ObjError::Parse { line, message: message.into() }
}

/// Load a mesh from an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, ObjError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let mesh = parse_obj(&contents)?;
    tracing::info!(
        "Loaded mesh {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertices().len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Parse OBJ text; polygons with more than three corners become triangle fans
pub fn parse_obj(s: &str) -> Result<Mesh, ObjError> {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for (n, raw) in s.lines().enumerate() {
        let line = n + 1;
        let content = raw.split_once('#').map_or(raw, |(before, _)| before);
        let mut tokens = content.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let mut coord = [0.0; 3];
                for c in coord.iter_mut() {
                    let token = tokens
                        .next()
                        .ok_or_else(|| parse_error(line, "vertex needs three coordinates"))?;
                    *c = token
                        .parse()
                        .map_err(|_| parse_error(line, format!("bad coordinate '{}'", token)))?;
                }
                vertices.push(Vec3::from(coord));
            }
            Some("f") => {
                let corners = tokens
                    .map(|t| resolve_index(t, vertices.len(), line))
                    .collect::<Result<Vec<_>, _>>()?;
                if corners.len() < 3 {
                    return Err(parse_error(line, format!("face has {} corners", corners.len())));
                }
                for i in 1..corners.len() - 1 {
                    indices.extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {}
        }
    }

    let mesh = Mesh::from_parts(vertices, indices);
    mesh.validate()?;
    if mesh.is_empty() {
        tracing::warn!("OBJ data contains no faces");
    }
    Ok(mesh)
}

/// Turn a face corner (`i`, `i/t`, `i//n` or `i/t/n`) into a 0-based vertex index.
///
/// Negative indices count back from the most recent vertex.
fn resolve_index(token: &str, vertex_count: usize, line: usize) -> Result<usize, ObjError> {
    let position = token.split('/').next().unwrap_or(token);
    let i: i64 = position
        .parse()
        .map_err(|_| parse_error(line, format!("bad face corner '{}'", token)))?;

    if i > 0 {
        Ok(i as usize - 1)
    } else if i < 0 && (i.unsigned_abs() as usize) <= vertex_count {
        Ok(vertex_count - i.unsigned_abs() as usize)
    } else {
        Err(parse_error(line, format!("vertex index {} out of range", i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_FACE: &str = "\
# one quad
o face
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1 4/1/1
";

    #[test]
    fn test_parse_quad_fans_into_triangles() {
        let mesh = parse_obj(CUBE_FACE).unwrap();
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_parse_plain_and_double_slash_corners() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2//1 3\n").unwrap();
        assert_eq!(mesh.indices(), &[0, 1, 2]);
        assert_eq!(mesh.vertices()[1], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let mesh = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
        assert_eq!(mesh.indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_trailing_comment_ignored() {
        let mesh = parse_obj("v 0.5 -1.5 2 # apex\n").unwrap();
        assert_eq!(mesh.vertices(), &[Vec3::new(0.5, -1.5, 2.0)]);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_bad_coordinate_reports_line() {
        let err = parse_obj("v 0 0 0\nv 1 x 0\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_zero_index_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_two_corner_face_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_index_past_end_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n").unwrap_err();
        assert!(matches!(
            err,
            ObjError::Mesh(MeshError::IndexOutOfRange { index: 8, vertex_count: 3, .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_obj("/nonexistent/softraster/mesh.obj").unwrap_err();
        assert!(matches!(err, ObjError::Io(_)));
    }
}
