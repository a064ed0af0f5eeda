//! 4x4 matrix: homogeneous transforms and planar projections.
//!
//! The projection builders map points onto the plane `normal · (X - point)
//! = 0` in homogeneous coordinates; divide by `w` after transforming.

use crate::eigen::EigenSolver;
use crate::fixed::Fixed;
use crate::matrix::{Layout, VectorLayout, impl_matrix};
use crate::real::Real;
use crate::vec3::Vec3;
use crate::vec4::Vec4;

/// A 4x4 row-major matrix over any [`Real`] backing.
///
/// `Default` is the zero matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat4<R> {
    m: [R; 16],
}

/// `f32` 4x4 matrix.
pub type Mat4f = Mat4<f32>;
/// `f64` 4x4 matrix.
pub type Mat4d = Mat4<f64>;
/// Fixed-point 4x4 matrix.
pub type Mat4x = Mat4<Fixed>;

impl_matrix!(Mat4, Vec4, 4, 16);

impl<R: Real> Mat4<R> {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            R::ONE, R::ZERO, R::ZERO, R::ZERO,
            R::ZERO, R::ONE, R::ZERO, R::ZERO,
            R::ZERO, R::ZERO, R::ONE, R::ZERO,
            R::ZERO, R::ZERO, R::ZERO, R::ONE,
        ],
    };

    /// Creates a matrix from row arrays.
    #[inline]
    pub fn from_rows(rows: [[R; 4]; 4]) -> Self {
        let mut out = Self::ZERO;
        for (r, row) in rows.iter().enumerate() {
            out.m[r * 4..r * 4 + 4].copy_from_slice(row);
        }
        out
    }

    /// Entries as row arrays.
    pub fn to_rows(&self) -> [[R; 4]; 4] {
        let mut rows = [[R::ZERO; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(self.row_slice(r));
        }
        rows
    }

    // Laplace expansion over the 2x2 minors of the top and bottom rows.
    fn expand_determinant(&self) -> R {
        let (a, b) = self.minors();
        a[0] * b[5] - a[1] * b[4] + a[2] * b[3] + a[3] * b[2] - a[4] * b[1] + a[5] * b[0]
    }

    fn expand_adjoint(&self) -> Self {
        let m = &self.m;
        let (a, b) = self.minors();
        Self {
            m: [
                m[5] * b[5] - m[6] * b[4] + m[7] * b[3],
                -m[1] * b[5] + m[2] * b[4] - m[3] * b[3],
                m[13] * a[5] - m[14] * a[4] + m[15] * a[3],
                -m[9] * a[5] + m[10] * a[4] - m[11] * a[3],
                -m[4] * b[5] + m[6] * b[2] - m[7] * b[1],
                m[0] * b[5] - m[2] * b[2] + m[3] * b[1],
                -m[12] * a[5] + m[14] * a[2] - m[15] * a[1],
                m[8] * a[5] - m[10] * a[2] + m[11] * a[1],
                m[4] * b[4] - m[5] * b[2] + m[7] * b[0],
                -m[0] * b[4] + m[1] * b[2] - m[3] * b[0],
                m[12] * a[4] - m[13] * a[2] + m[15] * a[0],
                -m[8] * a[4] + m[9] * a[2] - m[11] * a[0],
                -m[4] * b[3] + m[5] * b[1] - m[6] * b[0],
                m[0] * b[3] - m[1] * b[1] + m[2] * b[0],
                -m[12] * a[3] + m[13] * a[1] - m[14] * a[0],
                m[8] * a[3] - m[9] * a[1] + m[10] * a[0],
            ],
        }
    }

    // 2x2 minors of the top two rows (a) and the bottom two rows (b).
    fn minors(&self) -> ([R; 6], [R; 6]) {
        let m = &self.m;
        let a = [
            m[0] * m[5] - m[1] * m[4],
            m[0] * m[6] - m[2] * m[4],
            m[0] * m[7] - m[3] * m[4],
            m[1] * m[6] - m[2] * m[5],
            m[1] * m[7] - m[3] * m[5],
            m[2] * m[7] - m[3] * m[6],
        ];
        let b = [
            m[8] * m[13] - m[9] * m[12],
            m[8] * m[14] - m[10] * m[12],
            m[8] * m[15] - m[11] * m[12],
            m[9] * m[14] - m[10] * m[13],
            m[9] * m[15] - m[11] * m[13],
            m[10] * m[15] - m[11] * m[14],
        ];
        (a, b)
    }

    /// Oblique projection onto the plane through `point` with unit
    /// `normal`, along `direction`.
    pub fn make_oblique_projection(normal: Vec3<R>, point: Vec3<R>, direction: Vec3<R>) -> Self {
        let n_dot_d = normal.dot(direction);
        let n_dot_p = normal.dot(point);
        let mut out = Self::ZERO;
        for r in 0..3 {
            for c in 0..3 {
                out.m[r * 4 + c] = direction[r] * normal[c];
            }
            out.m[r * 4 + r] -= n_dot_d;
            out.m[r * 4 + 3] = -n_dot_p * direction[r];
        }
        out.m[15] = -n_dot_d;
        out
    }

    /// Perspective projection from `eye` onto the plane through `point`
    /// with unit `normal`.
    pub fn make_perspective_projection(normal: Vec3<R>, point: Vec3<R>, eye: Vec3<R>) -> Self {
        let n_dot_e_minus_p = normal.dot(eye - point);
        let mut out = Self::ZERO;
        for r in 0..3 {
            for c in 0..3 {
                out.m[r * 4 + c] = -eye[r] * normal[c];
            }
            out.m[r * 4 + r] += n_dot_e_minus_p;
            out.m[r * 4 + 3] = -(out.m[r * 4] * eye.x + out.m[r * 4 + 1] * eye.y + out.m[r * 4 + 2] * eye.z);
        }
        out.m[12] = -normal.x;
        out.m[13] = -normal.y;
        out.m[14] = -normal.z;
        out.m[15] = normal.dot(eye);
        out
    }

    /// Reflection through the plane through `point` with unit `normal`.
    pub fn make_reflection(normal: Vec3<R>, point: Vec3<R>) -> Self {
        let two_n_dot_p = R::TWO * normal.dot(point);
        let mut out = Self::IDENTITY;
        for r in 0..3 {
            for c in 0..3 {
                out.m[r * 4 + c] -= R::TWO * normal[r] * normal[c];
            }
            out.m[r * 4 + 3] = two_n_dot_p * normal[r];
        }
        out
    }

    /// Factors a symmetric matrix as `rot * diag * rotᵀ` with the default
    /// [`EigenSolver`]; eigenvalues ascend along `diag`.
    pub fn eigen_decomposition(&self) -> (Self, Self) {
        self.eigen_decomposition_with(&EigenSolver::default())
    }

    /// [`eigen_decomposition`](Self::eigen_decomposition) with explicit
    /// solver settings.
    pub fn eigen_decomposition_with(&self, solver: &EigenSolver<R>) -> (Self, Self) {
        let (vectors, values) = solver.solve(self.to_rows());
        (Self::from_rows(vectors), Self::diagonal(Vec4::from_array(values)))
    }
}

impl<R: Real> From<[[R; 4]; 4]> for Mat4<R> {
    #[inline]
    fn from(rows: [[R; 4]; 4]) -> Self {
        Self::from_rows(rows)
    }
}
