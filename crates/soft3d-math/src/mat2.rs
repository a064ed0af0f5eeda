//! 2x2 matrix: planar rotations and symmetric eigen decomposition.
//!
//! # Usage
//!
//! ```rust
//! use soft3d_math::{Mat2d, Vec2d};
//!
//! let rot = Mat2d::from_angle(std::f64::consts::FRAC_PI_2);
//! let v = rot * Vec2d::UNIT_X;
//! assert!((v - Vec2d::UNIT_Y).length() < 1e-12);
//! ```

use crate::fixed::Fixed;
use crate::matrix::{Layout, VectorLayout, impl_matrix};
use crate::real::Real;
use crate::vec2::Vec2;

/// A 2x2 row-major matrix over any [`Real`] backing.
///
/// `Default` is the zero matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat2<R> {
    m: [R; 4],
}

/// `f32` 2x2 matrix.
pub type Mat2f = Mat2<f32>;
/// `f64` 2x2 matrix.
pub type Mat2d = Mat2<f64>;
/// Fixed-point 2x2 matrix.
pub type Mat2x = Mat2<Fixed>;

impl_matrix!(Mat2, Vec2, 2, 4);

impl<R: Real> Mat2<R> {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [R::ONE, R::ZERO, R::ZERO, R::ONE],
    };

    /// Creates a matrix from its entries in row-major order.
    #[inline]
    pub const fn new(m00: R, m01: R, m10: R, m11: R) -> Self {
        Self { m: [m00, m01, m10, m11] }
    }

    /// Counterclockwise rotation by `angle` radians:
    /// `[cos -sin; sin cos]`.
    pub fn from_angle(angle: R) -> Self {
        let (s, c) = (angle.sin(), angle.cos());
        Self::new(c, -s, s, c)
    }

    /// Angle of a rotation matrix.
    ///
    /// Only meaningful when self is a rotation; any other matrix yields an
    /// arbitrary angle.
    #[inline]
    pub fn to_angle(&self) -> R {
        self.m[2].atan2(self.m[0])
    }

    #[inline]
    fn expand_determinant(&self) -> R {
        self.m[0] * self.m[3] - self.m[1] * self.m[2]
    }

    #[inline]
    fn expand_adjoint(&self) -> Self {
        Self::new(self.m[3], -self.m[1], -self.m[2], self.m[0])
    }

    /// Re-orthonormalizes the columns of a rotation matrix by Gram-Schmidt,
    /// removing accumulated rounding drift.
    pub fn orthonormalize(&mut self) {
        let mut c0 = self.column(0);
        let mut c1 = self.column(1);
        Vec2::orthonormalize(&mut c0, &mut c1);
        self.set_column(0, c0);
        self.set_column(1, c1);
    }

    /// Factors a symmetric matrix as `rot * diag * rotᵀ`.
    ///
    /// Returns `(rot, diag)`: `rot` is a rotation whose columns are the
    /// eigenvectors, `diag` holds the eigenvalues in ascending order. A
    /// repeated eigenvalue yields the identity rotation.
    pub fn eigen_decomposition(&self) -> (Self, Self) {
        let (m00, m01, m11) = (self.m[0], self.m[1], self.m[3]);
        let trace = m00 + m11;
        let diff = m00 - m11;
        let discr = (diff * diff + R::from_i32(4) * m01 * m01).sqrt();
        let eval0 = R::HALF * (trace - discr);
        let eval1 = R::HALF * (trace + discr);

        let (cos, sin) = if diff >= R::ZERO {
            (m01, eval0 - m00)
        } else {
            (eval0 - m11, m01)
        };
        let mut dir = Vec2::new(cos, sin);
        let rot = if dir.normalize() == R::ZERO {
            Self::IDENTITY
        } else {
            Self::new(dir.x, -dir.y, dir.y, dir.x)
        };

        let diag = Self::diagonal(Vec2::new(eval0, eval1));
        (rot, diag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_mat_eq(a: &Mat2d, b: &Mat2d, eps: f64) {
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert_abs_diff_eq!(*x, *y, epsilon = eps);
        }
    }

    #[test]
    fn test_mat2_rotation_quarter_turn() {
        let v = Mat2d::from_angle(std::f64::consts::FRAC_PI_2) * Vec2::new(1.0, 0.0);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mat2_to_angle() {
        let rot = Mat2d::from_angle(-2.5);
        assert_abs_diff_eq!(rot.to_angle(), -2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_mat2_inverse() {
        let m = Mat2d::new(4.0, 7.0, 2.0, 6.0);
        assert_mat_eq(&(m * m.inverse()), &Mat2d::IDENTITY, 1e-12);
        assert_eq!(m.adjoint(), Mat2d::new(6.0, -7.0, -2.0, 4.0));
    }

    #[test]
    fn test_mat2_singular() {
        let m = Mat2d::new(1.0, 2.0, 2.0, 4.0);
        assert_eq!(m.inverse(), Mat2d::ZERO);
        assert!(m.checked_inverse().is_none());
    }

    #[test]
    fn test_mat2_layouts() {
        let row = Mat2f::from_slice(&[1.0, 2.0, 3.0, 4.0], Layout::RowMajor);
        let col = Mat2f::from_slice(&[1.0, 3.0, 2.0, 4.0], Layout::ColumnMajor);
        assert_eq!(row, col);
        assert_eq!(row[(0, 1)], 2.0);
        assert_eq!(row.to_column_major(), [1.0, 3.0, 2.0, 4.0]);

        let cols = Mat2f::from_vectors([Vec2::new(1.0, 3.0), Vec2::new(2.0, 4.0)], VectorLayout::Columns);
        assert_eq!(cols, row);
    }

    #[test]
    fn test_mat2_orthonormalize() {
        let mut m = Mat2d::from_angle(0.3);
        m *= 1.001;
        m.orthonormalize();
        assert_mat_eq(&m.transpose_times(&m), &Mat2d::IDENTITY, 1e-12);
    }

    #[test]
    fn test_mat2_eigen() {
        let m = Mat2d::new(2.0, 1.0, 1.0, 3.0);
        let (rot, diag) = m.eigen_decomposition();
        assert!(diag[(0, 0)] <= diag[(1, 1)]);
        assert_abs_diff_eq!(rot.determinant(), 1.0, epsilon = 1e-12);
        assert_mat_eq(&(rot * diag).times_transpose(&rot), &m, 1e-12);
    }

    #[test]
    fn test_mat2_eigen_repeated() {
        let m = Mat2d::diagonal(Vec2::new(5.0, 5.0));
        let (rot, diag) = m.eigen_decomposition();
        assert_eq!(rot, Mat2d::IDENTITY);
        assert_eq!(diag, m);
    }

    #[test]
    fn test_mat2_default_is_zero() {
        assert_eq!(Mat2x::default(), Mat2x::ZERO);
    }
}
