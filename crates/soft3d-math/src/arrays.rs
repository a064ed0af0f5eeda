//! Typed [`SharedArray`] aliases for the math types.
//!
//! Every vector and matrix type streams as its components in storage order
//! (row-major for matrices), so a `Mat3fArray` of `n` elements occupies
//! `4 + n * 36` bytes.
//!
//! # Usage
//!
//! ```rust
//! use soft3d_math::{Vec3f, Vec3fArray};
//!
//! let mut normals = Vec3fArray::new(3);
//! normals[1] = Vec3f::UNIT_Y;
//!
//! let bytes = normals.to_bytes().unwrap();
//! let back = Vec3fArray::from_bytes(&bytes).unwrap();
//! assert_eq!(back[1], Vec3f::UNIT_Y);
//! ```

use soft3d_core::SharedArray;

use crate::fixed::Fixed;
use crate::mat2::Mat2;
use crate::mat3::Mat3;
use crate::mat4::Mat4;
use crate::vec2::Vec2;
use crate::vec3::Vec3;
use crate::vec4::Vec4;

/// Shared `i32` buffer (index data).
pub type IntArray = SharedArray<i32>;
/// Shared `f32` buffer.
pub type FloatArray = SharedArray<f32>;
/// Shared `f64` buffer.
pub type DoubleArray = SharedArray<f64>;
/// Shared fixed-point buffer.
pub type FixedArray = SharedArray<Fixed>;

/// Shared `Vec2<f32>` buffer (texture coordinates).
pub type Vec2fArray = SharedArray<Vec2<f32>>;
/// Shared `Vec3<f32>` buffer (positions, normals).
pub type Vec3fArray = SharedArray<Vec3<f32>>;
/// Shared `Vec4<f32>` buffer.
pub type Vec4fArray = SharedArray<Vec4<f32>>;
/// Shared `Mat2<f32>` buffer.
pub type Mat2fArray = SharedArray<Mat2<f32>>;
/// Shared `Mat3<f32>` buffer.
pub type Mat3fArray = SharedArray<Mat3<f32>>;
/// Shared `Mat4<f32>` buffer (bone palettes).
pub type Mat4fArray = SharedArray<Mat4<f32>>;

/// Shared `Vec2<f64>` buffer.
pub type Vec2dArray = SharedArray<Vec2<f64>>;
/// Shared `Vec3<f64>` buffer.
pub type Vec3dArray = SharedArray<Vec3<f64>>;
/// Shared `Vec4<f64>` buffer.
pub type Vec4dArray = SharedArray<Vec4<f64>>;
/// Shared `Mat2<f64>` buffer.
pub type Mat2dArray = SharedArray<Mat2<f64>>;
/// Shared `Mat3<f64>` buffer.
pub type Mat3dArray = SharedArray<Mat3<f64>>;
/// Shared `Mat4<f64>` buffer.
pub type Mat4dArray = SharedArray<Mat4<f64>>;

/// Shared fixed-point `Vec2` buffer.
pub type Vec2xArray = SharedArray<Vec2<Fixed>>;
/// Shared fixed-point `Vec3` buffer.
pub type Vec3xArray = SharedArray<Vec3<Fixed>>;
/// Shared fixed-point `Vec4` buffer.
pub type Vec4xArray = SharedArray<Vec4<Fixed>>;
/// Shared fixed-point `Mat2` buffer.
pub type Mat2xArray = SharedArray<Mat2<Fixed>>;
/// Shared fixed-point `Mat3` buffer.
pub type Mat3xArray = SharedArray<Mat3<Fixed>>;
/// Shared fixed-point `Mat4` buffer.
pub type Mat4xArray = SharedArray<Mat4<Fixed>>;
