//! 2D vector.
//!
//! # Usage
//!
//! ```rust
//! use soft3d_math::Vec2f;
//!
//! let mut v = Vec2f::new(3.0, 4.0);
//! let len = v.normalize();
//! assert_eq!(len, 5.0);
//! assert_eq!(v.perp(), Vec2f::new(0.8, -0.6));
//! ```

use crate::fixed::Fixed;
use crate::real::Real;
use crate::vector::impl_vector;

/// A 2D vector over any [`Real`] backing.
///
/// Comparison operators order vectors lexicographically (`x`, then `y`),
/// so they can key ordered containers wherever the backing is `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec2<R> {
    /// X component
    pub x: R,
    /// Y component
    pub y: R,
}

/// `f32` 2D vector.
pub type Vec2f = Vec2<f32>;
/// `f64` 2D vector.
pub type Vec2d = Vec2<f64>;
/// Fixed-point 2D vector.
pub type Vec2x = Vec2<Fixed>;

impl_vector!(Vec2, 2, { 0 => x, 1 => y });

impl<R: Real> Vec2<R> {
    /// Unit X axis (1, 0).
    pub const UNIT_X: Self = Self { x: R::ONE, y: R::ZERO };

    /// Unit Y axis (0, 1).
    pub const UNIT_Y: Self = Self { x: R::ZERO, y: R::ONE };

    /// The vector rotated 90° clockwise: `(y, -x)`.
    #[inline]
    pub fn perp(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Unit-length [`perp`](Self::perp).
    #[inline]
    pub fn unit_perp(self) -> Self {
        self.perp().normalized()
    }

    /// `self · other.perp()`, i.e. `x * other.y - y * other.x`.
    #[inline]
    pub fn dot_perp(self, other: Self) -> R {
        self.x * other.y - self.y * other.x
    }

    /// Gram-Schmidt: makes `u` unit length and `v` a unit vector
    /// perpendicular to it.
    pub fn orthonormalize(u: &mut Self, v: &mut Self) {
        u.normalize();
        let d = u.dot(*v);
        *v -= *u * d;
        v.normalize();
    }

    /// Builds a right-handed orthonormal basis `(u, v)` from `v`, which is
    /// normalized first.
    pub fn generate_orthonormal_basis(v: Self) -> (Self, Self) {
        let v = v.normalized();
        (v.perp(), v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vec2_normalize_returns_length() {
        let mut v = Vec2d::new(3.0, 4.0);
        assert_eq!(v.normalize(), 5.0);
        assert_relative_eq!(v.length(), 1.0);
    }

    #[test]
    fn test_vec2_normalize_zero() {
        let mut v = Vec2f::new(1e-9, 0.0);
        assert_eq!(v.normalize(), 0.0);
        assert_eq!(v, Vec2f::ZERO);
        assert_eq!(Vec2d::ZERO.normalized(), Vec2d::ZERO);
    }

    #[test]
    fn test_vec2_perp() {
        let v = Vec2f::new(1.0, 2.0);
        assert_eq!(v.perp(), Vec2f::new(2.0, -1.0));
        assert_eq!(v.dot(v.perp()), 0.0);
        assert_eq!(v.dot_perp(Vec2f::new(3.0, 4.0)), -2.0);
    }

    #[test]
    fn test_vec2_orthonormalize() {
        let mut u = Vec2d::new(2.0, 0.5);
        let mut v = Vec2d::new(1.0, 3.0);
        Vec2d::orthonormalize(&mut u, &mut v);
        assert_relative_eq!(u.length(), 1.0);
        assert_relative_eq!(v.length(), 1.0);
        assert!(u.dot(v).abs() < 1e-12);
    }

    #[test]
    fn test_vec2_basis() {
        let (u, v) = Vec2d::generate_orthonormal_basis(Vec2d::new(0.0, 5.0));
        assert_eq!(v, Vec2d::UNIT_Y);
        assert_eq!(u, Vec2d::UNIT_X);
    }

    #[test]
    fn test_vec2_ordering() {
        let a = Vec2x::new(Fixed::from_num(1), Fixed::from_num(5));
        let b = Vec2x::new(Fixed::from_num(2), Fixed::from_num(0));
        assert!(a < b);
        let mut set = std::collections::BTreeSet::new();
        set.insert(b);
        set.insert(a);
        assert_eq!(set.iter().next(), Some(&a));
    }

    #[test]
    fn test_vec2_scalar_mul_both_sides() {
        let v = Vec2f::new(1.0, -2.0);
        assert_eq!(2.0 * v, v * 2.0);
        assert_eq!(-v, Vec2f::new(-1.0, 2.0));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_vec2_index_out_of_range() {
        let v = Vec2f::ONE;
        let _ = v[2];
    }
}
