//! Vector math for 3D rendering
//!
//! One fixed-size vector type parameterized over its component count, plus
//! the 2D barycentric evaluator used by the triangle fill.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use thiserror::Error;

/// Threshold below which a pivot, determinant or screen area is treated as zero
pub const EPSILON: f64 = 1e-8;

/// Precondition failures in the math kernel
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
    #[error("perspective divide with w = 0")]
    ZeroW,
    #[error("matrix is singular (determinant {determinant})")]
    Singular { determinant: f64 },
}

/// N-component vector of doubles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize> {
    pub data: [f64; N],
}

pub type Vec2 = Vector<2>;
pub type Vec3 = Vector<3>;
pub type Vec4 = Vector<4>;

impl<const N: usize> Vector<N> {
    pub const ZERO: Self = Self { data: [0.0; N] };

    pub fn from_array(data: [f64; N]) -> Self {
        Self { data }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Euclidean length
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; fails only for a zero or non-finite length
    pub fn normalize(self) -> Result<Self, MathError> {
        let l = self.norm();
        if !(l > 0.0) || !l.is_finite() {
            return Err(MathError::ZeroLength);
        }
        Ok(self / l)
    }

    /// In-place variant of [`Vector::normalize`]; leaves `self` untouched on error
    pub fn normalize_mut(&mut self) -> Result<(), MathError> {
        *self = self.normalize()?;
        Ok(())
    }

    pub fn map(self, f: impl FnMut(f64) -> f64) -> Self {
        Self { data: self.data.map(f) }
    }

    fn zip_with(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut data = self.data;
        for (a, b) in data.iter_mut().zip(other.data.iter()) {
            *a = f(*a, *b);
        }
        Self { data }
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> From<[f64; N]> for Vector<N> {
    fn from(data: [f64; N]) -> Self {
        Self { data }
    }
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { data: [x, y] }
    }

    pub fn x(self) -> f64 {
        self.data[0]
    }

    pub fn y(self) -> f64 {
        self.data[1]
    }
}

impl Vec3 {
    pub const UP: Vec3 = Vec3 { data: [0.0, 1.0, 0.0] };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { data: [x, y, z] }
    }

    pub fn x(self) -> f64 {
        self.data[0]
    }

    pub fn y(self) -> f64 {
        self.data[1]
    }

    pub fn z(self) -> f64 {
        self.data[2]
    }

    /// Right-handed cross product
    pub fn cross(self, other: Vec3) -> Vec3 {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Vec3::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Append a homogeneous coordinate (1 for points, 0 for directions)
    pub fn to_homogeneous(self, w: f64) -> Vec4 {
        let [x, y, z] = self.data;
        Vec4::new(x, y, z, w)
    }

    /// Drop the z component
    pub fn truncate(self) -> Vec2 {
        Vec2::new(self.data[0], self.data[1])
    }
}

impl Vec4 {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { data: [x, y, z, w] }
    }

    pub fn x(self) -> f64 {
        self.data[0]
    }

    pub fn y(self) -> f64 {
        self.data[1]
    }

    pub fn z(self) -> f64 {
        self.data[2]
    }

    pub fn w(self) -> f64 {
        self.data[3]
    }

    /// Divide x, y, z by w
    pub fn perspective_divide(self) -> Result<Vec3, MathError> {
        let [x, y, z, w] = self.data;
        if w == 0.0 {
            return Err(MathError::ZeroW);
        }
        Ok(Vec3::new(x / w, y / w, z / w))
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.data[i]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.data[i]
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }
}

impl<const N: usize> AddAssign for Vector<N> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl<const N: usize> SubAssign for Vector<N> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        self.map(|a| a * s)
    }
}

impl<const N: usize> Mul<Vector<N>> for f64 {
    type Output = Vector<N>;
    fn mul(self, v: Vector<N>) -> Vector<N> {
        v * self
    }
}

impl<const N: usize> Div<f64> for Vector<N> {
    type Output = Self;
    fn div(self, s: f64) -> Self {
        self.map(|a| a / s)
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

/// Barycentric weights of a sample point relative to a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Barycentric {
    /// Inside or on an edge
    pub fn contains(&self) -> bool {
        self.alpha >= 0.0 && self.beta >= 0.0 && self.gamma >= 0.0
    }

    pub fn interpolate(&self, a: f64, b: f64, c: f64) -> f64 {
        self.alpha * a + self.beta * b + self.gamma * c
    }
}

/// Calculate barycentric coordinates of `p` in triangle `v`.
///
/// Returns `None` for a degenerate (collinear or zero-area) triangle,
/// regardless of where `p` lies.
pub fn barycentric(p: Vec2, v: [Vec2; 3]) -> Option<Barycentric> {
    let [v0, v1, v2] = v;
    let (x, y) = (p.x(), p.y());

    let alpha_den = -(v0.x() - v1.x()) * (v2.y() - v1.y()) + (v0.y() - v1.y()) * (v2.x() - v1.x());
    let beta_den = -(v1.x() - v2.x()) * (v0.y() - v2.y()) + (v1.y() - v2.y()) * (v0.x() - v2.x());
    if alpha_den.abs() < EPSILON || beta_den.abs() < EPSILON {
        return None;
    }

    let alpha = (-(x - v1.x()) * (v2.y() - v1.y()) + (y - v1.y()) * (v2.x() - v1.x())) / alpha_den;
    let beta = (-(x - v2.x()) * (v0.y() - v2.y()) + (y - v2.y()) * (v0.x() - v2.x())) / beta_den;
    let gamma = 1.0 - alpha - beta;

    Some(Barycentric { alpha, beta, gamma })
}
