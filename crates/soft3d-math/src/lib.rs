//! # soft3d-math
//!
//! Numeric kernel for real-time 3D graphics and physics.
//!
//! Every type is generic over a [`Real`] backing, so the same code runs in
//! `f32`, `f64` or deterministic fixed point ([`Fixed`]):
//!
//! - [`math`] - scalar wrappers and the `fast_*` polynomial approximations
//! - [`Vec2`], [`Vec3`], [`Vec4`] - fixed-size vectors
//! - [`Mat2`], [`Mat3`], [`Mat4`] - square matrices with inverse, adjoint,
//!   rotation builders and symmetric eigen decomposition
//! - [`EigenSolver`] - cyclic Jacobi diagonalization
//! - [`Random`] - seedable random stream
//! - typed [`SharedArray`] aliases such as [`Vec3fArray`]
//!
//! # Design
//!
//! Matrices are stored **row-major** and act on **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! `vector * matrix` is also provided and equals `transpose(matrix) * vector`.
//!
//! Degenerate inputs never panic: normalizing a zero vector yields zero, and
//! inverting a singular matrix yields the zero matrix (use
//! `checked_inverse` to detect it). Lengths, dot products, determinants and
//! inverses rescale instead of overflowing when a [`Fixed`] value's square
//! would leave its range; other `Fixed` products follow the `fixed` crate's
//! overflow rules.
//!
//! # Usage
//!
//! ```rust
//! use soft3d_math::{EulerOrder, Mat3d, Vec3d};
//!
//! let rot = Mat3d::from_euler(EulerOrder::Zyx, [0.3, -0.2, 1.1]);
//! let back = rot.to_euler(EulerOrder::Zyx);
//! assert!((back.angles[2] - 1.1).abs() < 1e-12);
//!
//! let v = rot * Vec3d::UNIT_X;
//! assert!((v.length() - 1.0).abs() < 1e-12);
//! ```
//!
//! Fixed point uses the same API:
//!
//! ```rust
//! use soft3d_math::{Fixed, Vec3x};
//!
//! let mut v = Vec3x::new(Fixed::from_num(3), Fixed::from_num(4), Fixed::ZERO);
//! let len = v.normalize();
//! assert_eq!(len, Fixed::from_num(5));
//! ```
//!
//! # Dependencies
//!
//! - `fixed` - fixed-point backing
//! - [`rand`] - random stream
//! - `soft3d-core` - shared arrays and binary streaming

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod arrays;
mod eigen;
mod fixed;
mod mat2;
mod mat3;
mod mat4;
pub mod math;
mod matrix;
mod random;
mod real;
mod vec2;
mod vec3;
mod vec4;
mod vector;

pub use crate::arrays::*;
pub use crate::eigen::EigenSolver;
pub use crate::fixed::Fixed;
pub use crate::mat2::{Mat2, Mat2d, Mat2f, Mat2x};
pub use crate::mat3::{EulerAngles, EulerKind, EulerOrder, Mat3, Mat3d, Mat3f, Mat3x};
pub use crate::mat4::{Mat4, Mat4d, Mat4f, Mat4x};
pub use crate::matrix::{Layout, VectorLayout};
pub use crate::random::Random;
pub use crate::real::Real;
pub use crate::vec2::{Vec2, Vec2d, Vec2f, Vec2x};
pub use crate::vec3::{Vec3, Vec3d, Vec3f, Vec3x};
pub use crate::vec4::{Vec4, Vec4d, Vec4f, Vec4x};

pub use soft3d_core::{CopyMode, SharedArray, StreamElement};
