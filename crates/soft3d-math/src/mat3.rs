//! 3x3 matrix: rotations, Euler angles and symmetric eigen decomposition.
//!
//! # Convention
//!
//! Row-major storage, column vectors (see [`crate::matrix`]). Rotations are
//! counterclockwise for a positive angle when looking down the axis toward
//! the origin.
//!
//! # Euler angles
//!
//! [`Mat3::from_euler`] composes `R_i(a) * R_j(b) * R_k(c)` for an
//! [`EulerOrder`] naming axes `i, j, k`. [`Mat3::to_euler`] inverts it; at
//! gimbal lock (`b = ±π/2`) only the sum or difference of `a` and `c` is
//! determined, reported through [`EulerKind`] with `c = 0`.
//!
//! # Usage
//!
//! ```rust
//! use soft3d_math::{EulerOrder, Mat3d, Vec3d};
//!
//! let rot = Mat3d::from_axis_angle(Vec3d::UNIT_Z, std::f64::consts::FRAC_PI_2);
//! let v = rot * Vec3d::UNIT_X;
//! assert!((v - Vec3d::UNIT_Y).length() < 1e-12);
//!
//! let e = rot.to_euler(EulerOrder::Xyz);
//! assert!((e.angles[2] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
//! ```

use crate::eigen::EigenSolver;
use crate::fixed::Fixed;
use crate::math;
use crate::matrix::{Layout, VectorLayout, impl_matrix};
use crate::real::Real;
use crate::vec3::Vec3;

/// A 3x3 row-major matrix over any [`Real`] backing.
///
/// `Default` is the zero matrix.
///
/// # Example
///
/// ```rust
/// use soft3d_math::{Mat3f, Vec3f};
///
/// let v = Vec3f::new(1.0, 2.0, 3.0);
/// assert_eq!(Mat3f::IDENTITY * v, v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat3<R> {
    m: [R; 9],
}

/// `f32` 3x3 matrix.
pub type Mat3f = Mat3<f32>;
/// `f64` 3x3 matrix.
pub type Mat3d = Mat3<f64>;
/// Fixed-point 3x3 matrix.
pub type Mat3x = Mat3<Fixed>;

/// Axis order of an Euler-angle rotation `R_i(a) * R_j(b) * R_k(c)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EulerOrder {
    /// `Rx * Ry * Rz`
    Xyz,
    /// `Rx * Rz * Ry`
    Xzy,
    /// `Ry * Rx * Rz`
    Yxz,
    /// `Ry * Rz * Rx`
    Yzx,
    /// `Rz * Rx * Ry`
    Zxy,
    /// `Rz * Ry * Rx`
    Zyx,
}

impl EulerOrder {
    /// All six orders.
    pub const ALL: [EulerOrder; 6] = [Self::Xyz, Self::Xzy, Self::Yxz, Self::Yzx, Self::Zxy, Self::Zyx];

    /// Axis indices `(i, j, k)`.
    #[inline]
    pub fn axes(self) -> (usize, usize, usize) {
        match self {
            Self::Xyz => (0, 1, 2),
            Self::Xzy => (0, 2, 1),
            Self::Yxz => (1, 0, 2),
            Self::Yzx => (1, 2, 0),
            Self::Zxy => (2, 0, 1),
            Self::Zyx => (2, 1, 0),
        }
    }

    // Cyclic orders follow x -> y -> z -> x.
    #[inline]
    fn is_cyclic(self) -> bool {
        matches!(self, Self::Xyz | Self::Yzx | Self::Zxy)
    }
}

/// Whether extracted Euler angles are unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EulerKind {
    /// The angles are the unique solution.
    Unique,
    /// Gimbal lock at `b = +π/2` (for the sign convention of the order):
    /// only `a + c` is determined; `c` is reported as 0.
    NotUniqueSum,
    /// Gimbal lock at `b = -π/2`: only `a - c` is determined; `c` is
    /// reported as 0.
    NotUniqueDif,
}

/// Result of [`Mat3::to_euler`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EulerAngles<R> {
    /// `[a, b, c]` for `R_i(a) * R_j(b) * R_k(c)`.
    pub angles: [R; 3],
    /// Uniqueness of the solution.
    pub kind: EulerKind,
}

impl_matrix!(Mat3, Vec3, 3, 9);

impl<R: Real> Mat3<R> {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            R::ONE, R::ZERO, R::ZERO,
            R::ZERO, R::ONE, R::ZERO,
            R::ZERO, R::ZERO, R::ONE,
        ],
    };

    /// Creates a matrix from row arrays.
    ///
    /// # Example
    ///
    /// ```rust
    /// use soft3d_math::Mat3f;
    ///
    /// let m = Mat3f::from_rows([
    ///     [1.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    ///     [0.0, 0.0, 1.0],
    /// ]);
    /// assert_eq!(m, Mat3f::IDENTITY);
    /// ```
    #[inline]
    pub fn from_rows(rows: [[R; 3]; 3]) -> Self {
        let [[m0, m1, m2], [m3, m4, m5], [m6, m7, m8]] = rows;
        Self { m: [m0, m1, m2, m3, m4, m5, m6, m7, m8] }
    }

    /// Entries as row arrays.
    #[inline]
    pub fn to_rows(&self) -> [[R; 3]; 3] {
        let m = &self.m;
        [[m[0], m[1], m[2]], [m[3], m[4], m[5]], [m[6], m[7], m[8]]]
    }

    /// Rotation by `angle` radians about the unit-length `axis`.
    pub fn from_axis_angle(axis: Vec3<R>, angle: R) -> Self {
        let (sn, cs) = (angle.sin(), angle.cos());
        let omc = R::ONE - cs;
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let (xym, xzm, yzm) = (x * y * omc, x * z * omc, y * z * omc);
        let (xs, ys, zs) = (x * sn, y * sn, z * sn);

        Self::from_rows([
            [x * x * omc + cs, xym - zs, xzm + ys],
            [xym + zs, y * y * omc + cs, yzm - xs],
            [xzm - ys, yzm + xs, z * z * omc + cs],
        ])
    }

    /// Axis and angle (in `[0, π]`) of a rotation matrix.
    ///
    /// A zero angle reports the X axis. At `π` the axis sign is arbitrary.
    pub fn to_axis_angle(&self) -> (Vec3<R>, R) {
        let m = &self.m;
        let cs = R::HALF * (m[0] + m[4] + m[8] - R::ONE);
        let angle = math::acos(cs);

        let mut antisym = Vec3::new(m[7] - m[5], m[2] - m[6], m[3] - m[1]);
        if cs >= R::ZERO {
            // Small angles: the antisymmetric part is well conditioned.
            if antisym.normalize() == R::ZERO {
                return (Vec3::UNIT_X, R::ZERO);
            }
            return (antisym, angle);
        }

        // Large angles: read the axis from the symmetric part
        // (R + Rᵀ)/2 = cs*I + (1 - cs) a aᵀ, largest diagonal first.
        let omc = R::ONE - cs;
        let i = if m[0] >= m[4] {
            if m[0] >= m[8] { 0 } else { 2 }
        } else if m[4] >= m[8] {
            1
        } else {
            2
        };
        let mut axis = Vec3::ZERO;
        axis[i] = ((m[i * 4] - cs) / omc).sqrt();
        let denom = R::TWO * omc * axis[i];
        for j in (0..3).filter(|&j| j != i) {
            axis[j] = (m[i * 3 + j] + m[j * 3 + i]) / denom;
        }
        axis.normalize();

        if axis.dot(antisym) < R::ZERO {
            axis = -axis;
        }
        (axis, angle)
    }

    /// Composes `R_i(angles[0]) * R_j(angles[1]) * R_k(angles[2])`.
    pub fn from_euler(order: EulerOrder, angles: [R; 3]) -> Self {
        let (i, j, k) = order.axes();
        Self::axis_rotation(i, angles[0])
            * Self::axis_rotation(j, angles[1])
            * Self::axis_rotation(k, angles[2])
    }

    /// Decomposes a rotation into Euler angles for `order`.
    ///
    /// The middle angle lies in `[-π/2, π/2]`, the outer ones in `[-π, π]`.
    pub fn to_euler(&self, order: EulerOrder) -> EulerAngles<R> {
        let (i, j, k) = order.axes();
        let s = if order.is_cyclic() { R::ONE } else { -R::ONE };
        let e = |r: usize, c: usize| self.m[r * 3 + c];

        let sb = s * e(i, k);
        if sb < R::ONE {
            if sb > -R::ONE {
                EulerAngles {
                    angles: [
                        (-s * e(j, k)).atan2(e(k, k)),
                        sb.asin(),
                        (-s * e(i, j)).atan2(e(i, i)),
                    ],
                    kind: EulerKind::Unique,
                }
            } else {
                EulerAngles {
                    angles: [(-e(j, i)).atan2(e(j, j)), -R::HALF_PI, R::ZERO],
                    kind: EulerKind::NotUniqueDif,
                }
            }
        } else {
            EulerAngles {
                angles: [e(j, i).atan2(e(j, j)), R::HALF_PI, R::ZERO],
                kind: EulerKind::NotUniqueSum,
            }
        }
    }

    /// Spherical interpolation between rotations: `t = 0` gives `r0`,
    /// `t = 1` gives `r1`.
    pub fn slerp(t: R, r0: &Self, r1: &Self) -> Self {
        let (axis, angle) = r0.transpose_times(r1).to_axis_angle();
        *r0 * Self::from_axis_angle(axis, t * angle)
    }

    /// `self * diag(d)`: scales column `c` by `d[c]`.
    pub fn times_diagonal(&self, d: Vec3<R>) -> Self {
        let mut out = *self;
        for r in 0..3 {
            for c in 0..3 {
                out.m[r * 3 + c] *= d[c];
            }
        }
        out
    }

    /// `diag(d) * self`: scales row `r` by `d[r]`.
    pub fn diagonal_times(&self, d: Vec3<R>) -> Self {
        let mut out = *self;
        for r in 0..3 {
            for c in 0..3 {
                out.m[r * 3 + c] *= d[r];
            }
        }
        out
    }

    // Cofactor expansion along the first row.
    #[inline]
    fn expand_determinant(&self) -> R {
        let m = &self.m;
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    fn expand_adjoint(&self) -> Self {
        let m = &self.m;
        Self::from_rows([
            [
                m[4] * m[8] - m[5] * m[7],
                m[2] * m[7] - m[1] * m[8],
                m[1] * m[5] - m[2] * m[4],
            ],
            [
                m[5] * m[6] - m[3] * m[8],
                m[0] * m[8] - m[2] * m[6],
                m[2] * m[3] - m[0] * m[5],
            ],
            [
                m[3] * m[7] - m[4] * m[6],
                m[1] * m[6] - m[0] * m[7],
                m[0] * m[4] - m[1] * m[3],
            ],
        ])
    }

    /// Re-orthonormalizes the columns by Gram-Schmidt.
    pub fn orthonormalize(&mut self) {
        let mut c0 = self.column(0);
        let mut c1 = self.column(1);
        let mut c2 = self.column(2);
        Vec3::orthonormalize(&mut c0, &mut c1, &mut c2);
        *self = Self::from_vectors([c0, c1, c2], VectorLayout::Columns);
    }

    /// Factors a symmetric matrix as `rot * diag * rotᵀ` with the default
    /// [`EigenSolver`].
    ///
    /// `rot` is a rotation whose columns are eigenvectors; `diag` holds the
    /// eigenvalues in ascending order.
    pub fn eigen_decomposition(&self) -> (Self, Self) {
        self.eigen_decomposition_with(&EigenSolver::default())
    }

    /// [`eigen_decomposition`](Self::eigen_decomposition) with explicit
    /// solver settings.
    pub fn eigen_decomposition_with(&self, solver: &EigenSolver<R>) -> (Self, Self) {
        let (vectors, values) = solver.solve(self.to_rows());
        (Self::from_rows(vectors), Self::diagonal(Vec3::from_array(values)))
    }

    fn axis_rotation(axis: usize, angle: R) -> Self {
        let (j, k) = [(1, 2), (2, 0), (0, 1)][axis];
        let (sn, cs) = (angle.sin(), angle.cos());
        let mut out = Self::IDENTITY;
        out.m[j * 3 + j] = cs;
        out.m[j * 3 + k] = -sn;
        out.m[k * 3 + j] = sn;
        out.m[k * 3 + k] = cs;
        out
    }
}

impl<R: Real> From<[[R; 3]; 3]> for Mat3<R> {
    #[inline]
    fn from(rows: [[R; 3]; 3]) -> Self {
        Self::from_rows(rows)
    }
}
