//! 4D vector, used for homogeneous points and matrix rows.

use crate::fixed::Fixed;
use crate::real::Real;
use crate::vector::impl_vector;

/// A 4D vector over any [`Real`] backing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec4<R> {
    /// X component
    pub x: R,
    /// Y component
    pub y: R,
    /// Z component
    pub z: R,
    /// W component
    pub w: R,
}

/// `f32` 4D vector.
pub type Vec4f = Vec4<f32>;
/// `f64` 4D vector.
pub type Vec4d = Vec4<f64>;
/// Fixed-point 4D vector.
pub type Vec4x = Vec4<Fixed>;

impl_vector!(Vec4, 4, { 0 => x, 1 => y, 2 => z, 3 => w });

impl<R: Real> Vec4<R> {
    /// Unit X axis.
    pub const UNIT_X: Self = Self { x: R::ONE, y: R::ZERO, z: R::ZERO, w: R::ZERO };
    /// Unit Y axis.
    pub const UNIT_Y: Self = Self { x: R::ZERO, y: R::ONE, z: R::ZERO, w: R::ZERO };
    /// Unit Z axis.
    pub const UNIT_Z: Self = Self { x: R::ZERO, y: R::ZERO, z: R::ONE, w: R::ZERO };
    /// Unit W axis.
    pub const UNIT_W: Self = Self { x: R::ZERO, y: R::ZERO, z: R::ZERO, w: R::ONE };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec4_length() {
        let v = Vec4d::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(v.length(), 2.0);
        assert_eq!(v.normalized(), Vec4d::splat(0.5));
    }

    #[test]
    fn test_vec4_from_slice() {
        let v = Vec4f::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0]);
        let back: [f32; 4] = v.into();
        assert_eq!(Vec4f::from(back), v);
    }

    #[test]
    fn test_vec4_fixed_ops() {
        let one = <Fixed as Real>::ONE;
        let v = Vec4x::new(one, one, one, one) * Fixed::from_num(3);
        assert_eq!(v.dot(Vec4x::UNIT_W), Fixed::from_num(3));
        assert_eq!(Fixed::from_num(2) * Vec4x::UNIT_X, Vec4x::UNIT_X * Fixed::from_num(2));
    }

    #[test]
    #[should_panic]
    fn test_vec4_from_short_slice() {
        let _ = Vec4f::from_slice(&[1.0, 2.0]);
    }
}
