//! Row-major matrices built from row vectors

use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

use super::math::{MathError, Vector, EPSILON};

/// R×C matrix stored as R row vectors of length C
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const R: usize, const C: usize> {
    rows: [Vector<C>; R],
}

pub type Mat3 = Matrix<3, 3>;
pub type Mat4 = Matrix<4, 4>;

impl<const R: usize, const C: usize> Matrix<R, C> {
    pub const ZERO: Self = Self { rows: [Vector::ZERO; R] };

    pub fn from_rows(rows: [[f64; C]; R]) -> Self {
        Self { rows: rows.map(Vector::from_array) }
    }

    pub fn row(&self, r: usize) -> Vector<C> {
        self.rows[r]
    }

    pub fn transpose(&self) -> Matrix<C, R> {
        let mut res = Matrix::<C, R>::ZERO;
        for i in 0..R {
            for j in 0..C {
                res[j][i] = self[i][j];
            }
        }
        res
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self { rows: self.rows.map(|row| row.map(&f)) }
    }

    fn zip_with(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut res = self;
        for i in 0..R {
            for j in 0..C {
                res[i][j] = f(self[i][j], other[i][j]);
            }
        }
        res
    }
}

impl<const N: usize> Matrix<N, N> {
    pub fn identity() -> Self {
        let mut res = Self::ZERO;
        for i in 0..N {
            res[i][i] = 1.0;
        }
        res
    }

    fn to_array(self) -> [[f64; N]; N] {
        self.rows.map(|row| row.data)
    }

    /// Determinant by Gaussian elimination with partial pivoting.
    ///
    /// A pivot smaller than [`EPSILON`] makes the matrix singular and the
    /// result exactly 0.
    pub fn determinant(&self) -> f64 {
        eliminate(self.to_array(), N)
    }

    /// Determinant of the submatrix with row `r` and column `c` removed
    pub fn minor(&self, r: usize, c: usize) -> f64 {
        let mut sub = [[0.0; N]; N];
        for i in (0..N).filter(|&i| i != r) {
            let mi = if i < r { i } else { i - 1 };
            for j in (0..N).filter(|&j| j != c) {
                let mj = if j < c { j } else { j - 1 };
                sub[mi][mj] = self[i][j];
            }
        }
        eliminate(sub, N - 1)
    }

    pub fn cofactor(&self, r: usize, c: usize) -> f64 {
        let sign = if (r + c) % 2 == 1 { -1.0 } else { 1.0 };
        sign * self.minor(r, c)
    }

    /// Inverse via the adjugate: entry (j, i) is cofactor (i, j) / det
    pub fn invert(&self) -> Result<Self, MathError> {
        let det = self.determinant();
        if det.abs() <= EPSILON {
            return Err(MathError::Singular { determinant: det });
        }
        let mut res = Self::ZERO;
        for i in 0..N {
            for j in 0..N {
                res[j][i] = self.cofactor(i, j) / det;
            }
        }
        Ok(res)
    }
}

/// Eliminate the leading `size`×`size` block of `m` and return its determinant
fn eliminate<const N: usize>(mut m: [[f64; N]; N], size: usize) -> f64 {
    let mut det = 1.0;
    for i in 0..size {
        let pivot = (i..size)
            .max_by(|&a, &b| m[a][i].abs().total_cmp(&m[b][i].abs()))
            .unwrap_or(i);
        if m[pivot][i].abs() < EPSILON {
            return 0.0;
        }
        if pivot != i {
            m.swap(i, pivot);
            det = -det;
        }
        det *= m[i][i];
        for j in (i + 1)..size {
            let factor = m[j][i] / m[i][i];
            for k in i..size {
                m[j][k] -= factor * m[i][k];
            }
        }
    }
    det
}

impl<const R: usize, const C: usize> Default for Matrix<R, C> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const R: usize, const C: usize> Index<usize> for Matrix<R, C> {
    type Output = Vector<C>;
    fn index(&self, r: usize) -> &Vector<C> {
        &self.rows[r]
    }
}

impl<const R: usize, const C: usize> IndexMut<usize> for Matrix<R, C> {
    fn index_mut(&mut self, r: usize) -> &mut Vector<C> {
        &mut self.rows[r]
    }
}

impl<const R: usize, const C: usize> Add for Matrix<R, C> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }
}

impl<const R: usize, const C: usize> Sub for Matrix<R, C> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }
}

impl<const R: usize, const C: usize> Mul<f64> for Matrix<R, C> {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        self.map(|a| a * s)
    }
}

impl<const R: usize, const C: usize> Div<f64> for Matrix<R, C> {
    type Output = Self;
    fn div(self, s: f64) -> Self {
        self.map(|a| a / s)
    }
}

impl<const R: usize, const C: usize> Mul<Vector<C>> for Matrix<R, C> {
    type Output = Vector<R>;
    fn mul(self, v: Vector<C>) -> Vector<R> {
        let mut res = Vector::<R>::ZERO;
        for i in 0..R {
            res[i] = self.rows[i].dot(v);
        }
        res
    }
}

impl<const R: usize, const K: usize, const C: usize> Mul<Matrix<K, C>> for Matrix<R, K> {
    type Output = Matrix<R, C>;
    fn mul(self, other: Matrix<K, C>) -> Matrix<R, C> {
        let mut res = Matrix::<R, C>::ZERO;
        for i in 0..R {
            for j in 0..C {
                res[i][j] = (0..K).map(|k| self[i][k] * other[k][j]).sum();
            }
        }
        res
    }
}

impl<const R: usize, const C: usize> fmt::Display for Matrix<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::math::{Vec3, Vec4};

    const TOL: f64 = 1e-9;

    fn assert_close<const N: usize>(a: &Matrix<N, N>, b: &Matrix<N, N>) {
        for i in 0..N {
            for j in 0..N {
                assert!((a[i][j] - b[i][j]).abs() < TOL, "({i}, {j}): {} vs {}", a[i][j], b[i][j]);
            }
        }
    }

    #[test]
    fn test_identity_determinant() {
        assert!((Mat4::identity().determinant() - 1.0).abs() < TOL);
        assert!((Mat3::identity().determinant() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_determinant_with_row_swap() {
        // Largest pivot in column 0 is in row 1, forcing a swap
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]);
        assert!((m.determinant() - (-3.0)).abs() < TOL);
    }

    #[test]
    fn test_singular_determinant_is_zero() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
        assert_eq!(m.determinant(), 0.0);
        assert!(matches!(m.invert(), Err(MathError::Singular { .. })));
    }

    #[test]
    fn test_cofactor_signs() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 4.0, 5.0], [1.0, 0.0, 6.0]]);
        assert!((m.minor(0, 1) + 5.0).abs() < TOL);
        assert!((m.cofactor(0, 1) - 5.0).abs() < TOL);
        assert!((m.minor(2, 2) - 4.0).abs() < TOL);
        // minor(0,0) = det([[4,5],[0,6]]) = 24
        assert!((m.cofactor(0, 0) - 24.0).abs() < TOL);
    }

    #[test]
    fn test_inverse_times_matrix_is_identity() {
        let m = Mat4::from_rows([
            [2.0, 0.0, 1.0, 3.0],
            [1.0, 3.0, 0.0, -1.0],
            [0.0, 1.0, 4.0, 2.0],
            [5.0, -2.0, 1.0, 1.0],
        ]);
        let inv = m.invert().unwrap();
        assert_close(&(m * inv), &Mat4::identity());
        assert_close(&(inv * m), &Mat4::identity());
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::<2, 3>::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t = m.transpose();
        assert_eq!(t, Matrix::<3, 2>::from_rows([[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_rectangular_product() {
        let a = Matrix::<2, 3>::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = Matrix::<3, 2>::from_rows([[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);
        assert_eq!(a * b, Matrix::<2, 2>::from_rows([[58.0, 64.0], [139.0, 154.0]]));
    }

    #[test]
    fn test_matrix_vector_product() {
        let translate = Mat4::from_rows([
            [1.0, 0.0, 0.0, 5.0],
            [0.0, 1.0, 0.0, -2.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let p = translate * Vec3::new(1.0, 1.0, 1.0).to_homogeneous(1.0);
        assert_eq!(p, Vec4::new(6.0, -1.0, 2.0, 1.0));
    }

    #[test]
    fn test_elementwise_and_scalar_ops() {
        let a = Mat3::identity();
        let b = a * 3.0;
        assert_eq!((b - a)[1][1], 2.0);
        assert_eq!((b + a)[2][2], 4.0);
        assert_eq!(b / 3.0, a);
        assert_eq!((b + a)[0][1], 0.0);
    }
}
