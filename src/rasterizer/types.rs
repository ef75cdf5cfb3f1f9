//! Core types for the rasterizer

use thiserror::Error;

use super::math::Vec3;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Clamp each channel of a floating color into 0-255; alpha is always opaque
    pub fn from_vec3(c: Vec3) -> Self {
        let channel = |v: f64| v.clamp(0.0, 255.0) as u8;
        Self::new(channel(c.x()), channel(c.y()), channel(c.z()))
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Flat face color: each axis of the unit normal scaled to [-255, 255].
///
/// Left unclamped; negative channels only go to 0 when the color is written out.
pub fn normal_color(normal: Vec3) -> Vec3 {
    normal * 255.0
}

/// Errors from an index list that does not describe whole, in-range triangles
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of three")]
    IndexCount(usize),
    #[error("triangle {triangle} references vertex {index}, but only {vertex_count} are loaded")]
    IndexOutOfRange {
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Triangle mesh: vertex positions plus index triples into them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    indices: Vec<usize>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(vertices: Vec<Vec3>, indices: Vec<usize>) -> Self {
        Self { vertices, indices }
    }

    /// Append vertices after the ones already loaded
    pub fn load_vertices(&mut self, vertices: &[Vec3]) {
        self.vertices.extend_from_slice(vertices);
    }

    /// Append indices after the ones already loaded
    pub fn load_indices(&mut self, indices: &[usize]) {
        self.indices.extend_from_slice(indices);
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Check that the indices form whole triangles that stay inside the vertex list
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount(self.indices.len()));
        }
        let vertex_count = self.vertices.len();
        match self.indices.iter().position(|&i| i >= vertex_count) {
            Some(pos) => Err(MeshError::IndexOutOfRange {
                triangle: pos / 3,
                index: self.indices[pos],
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Vertex positions of each triangle, in index order.
    ///
    /// Call [`Mesh::validate`] first; out-of-range indices panic.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [self.vertices[t[0]], self.vertices[t[1]], self.vertices[t[2]]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh::from_parts(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn test_color_clamps_channels() {
        let c = Color::from_vec3(Vec3::new(-255.0, 128.7, 400.0));
        assert_eq!(c, Color::new(0, 128, 255));
        assert_eq!(c.to_bytes(), [0, 128, 255, 255]);
    }

    #[test]
    fn test_default_color_is_opaque_black() {
        assert_eq!(Color::default(), Color::BLACK);
        assert_eq!(Color::default().to_bytes(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_normal_color_keeps_sign() {
        let c = normal_color(Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(c, Vec3::new(0.0, -255.0, 0.0));
        assert_eq!(Color::from_vec3(c), Color::BLACK);
    }

    #[test]
    fn test_load_appends() {
        let mut mesh = Mesh::new();
        mesh.load_vertices(&[Vec3::ZERO]);
        mesh.load_vertices(&[Vec3::UP, Vec3::new(1.0, 0.0, 0.0)]);
        mesh.load_indices(&[0, 1]);
        mesh.load_indices(&[2]);
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.indices(), &[0, 1, 2]);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut mesh = quad();
        mesh.load_indices(&[1]);
        assert_eq!(mesh.validate(), Err(MeshError::IndexCount(7)));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut mesh = quad();
        mesh.load_indices(&[0, 4, 1]);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange { triangle: 2, index: 4, vertex_count: 4 })
        );
    }

    #[test]
    fn test_triangles_iterates_in_order() {
        let mesh = quad();
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[1][2], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_clear() {
        let mut mesh = quad();
        mesh.clear();
        assert!(mesh.is_empty());
        assert!(mesh.vertices().is_empty());
    }
}
