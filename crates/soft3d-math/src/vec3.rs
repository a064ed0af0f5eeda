//! 3D vector.
//!
//! [`Vec3`] carries positions, directions and normals. It adds the cross
//! product and 3D Gram-Schmidt helpers to the common vector surface.
//!
//! # Usage
//!
//! ```rust
//! use soft3d_math::Vec3d;
//!
//! let n = Vec3d::UNIT_X.cross(Vec3d::UNIT_Y);
//! assert_eq!(n, Vec3d::UNIT_Z);
//! ```

use crate::fixed::Fixed;
use crate::real::Real;
use crate::vector::impl_vector;

/// A 3D vector over any [`Real`] backing.
///
/// # Components
///
/// Access via `.x`, `.y`, `.z` or index `[0]`, `[1]`, `[2]`.
///
/// # Example
///
/// ```rust
/// use soft3d_math::Vec3f;
///
/// let v = Vec3f::new(0.5, 0.5, 0.5);
/// assert_eq!(v.x, 0.5);
/// assert_eq!(v[2], 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec3<R> {
    /// X component
    pub x: R,
    /// Y component
    pub y: R,
    /// Z component
    pub z: R,
}

/// `f32` 3D vector.
pub type Vec3f = Vec3<f32>;
/// `f64` 3D vector.
pub type Vec3d = Vec3<f64>;
/// Fixed-point 3D vector.
pub type Vec3x = Vec3<Fixed>;

impl_vector!(Vec3, 3, { 0 => x, 1 => y, 2 => z });

impl<R: Real> Vec3<R> {
    /// Unit X vector (1, 0, 0).
    pub const UNIT_X: Self = Self { x: R::ONE, y: R::ZERO, z: R::ZERO };

    /// Unit Y vector (0, 1, 0).
    pub const UNIT_Y: Self = Self { x: R::ZERO, y: R::ONE, z: R::ZERO };

    /// Unit Z vector (0, 0, 1).
    pub const UNIT_Z: Self = Self { x: R::ZERO, y: R::ZERO, z: R::ONE };

    /// Cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Unit-length cross product, or zero for parallel inputs.
    #[inline]
    pub fn unit_cross(self, other: Self) -> Self {
        self.cross(other).normalized()
    }

    /// Gram-Schmidt over three vectors: `u` is normalized, then `v` and `w`
    /// have the components along the earlier vectors removed and are
    /// normalized.
    pub fn orthonormalize(u: &mut Self, v: &mut Self, w: &mut Self) {
        u.normalize();

        let d0 = u.dot(*v);
        *v -= *u * d0;
        v.normalize();

        let d1 = u.dot(*w);
        let d2 = v.dot(*w);
        *w -= *u * d1 + *v * d2;
        w.normalize();
    }

    /// Builds a right-handed orthonormal basis `(u, v, w)` around `w`,
    /// which is normalized first. `u × v == w`.
    pub fn generate_orthonormal_basis(w: Self) -> (Self, Self, Self) {
        let w = w.normalized();
        let u = if w.x.abs() >= w.y.abs() {
            // w.x or w.z is the largest magnitude component.
            let inv = crate::math::inv_sqrt(w.x * w.x + w.z * w.z);
            Self::new(-w.z * inv, R::ZERO, w.x * inv)
        } else {
            // w.y or w.z is the largest magnitude component.
            let inv = crate::math::inv_sqrt(w.y * w.y + w.z * w.z);
            Self::new(R::ZERO, w.z * inv, -w.y * inv)
        };
        let v = w.cross(u);
        (u, v, w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vec3_new() {
        let v = Vec3f::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(v[2], 3.0);
    }

    #[test]
    fn test_vec3_dot_cross() {
        let a = Vec3f::new(1.0, 2.0, 3.0);
        let b = Vec3f::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Vec3f::new(-3.0, 6.0, -3.0));
        assert_eq!(a.cross(b).dot(a), 0.0);
    }

    #[test]
    fn test_vec3_unit_cross_parallel() {
        let a = Vec3d::new(1.0, 2.0, 3.0);
        assert_eq!(a.unit_cross(a * 2.0), Vec3d::ZERO);
    }

    #[test]
    fn test_vec3_ops() {
        let a = Vec3f::new(1.0, 2.0, 3.0);
        let b = Vec3f::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3f::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3f::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3f::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Vec3f::new(2.0, 2.5, 3.0));

        let mut c = a;
        c += b;
        c *= 2.0;
        assert_eq!(c, Vec3f::new(10.0, 14.0, 18.0));
    }

    #[test]
    fn test_vec3_lerp_min_max() {
        let a = Vec3f::ZERO;
        let b = Vec3f::ONE;
        assert_eq!(a.lerp(b, 0.5), Vec3f::splat(0.5));
        let p = Vec3f::new(1.0, 5.0, -1.0);
        let q = Vec3f::new(2.0, 0.0, -3.0);
        assert_eq!(p.min(q), Vec3f::new(1.0, 0.0, -3.0));
        assert_eq!(p.max(q), Vec3f::new(2.0, 5.0, -1.0));
    }

    #[test]
    fn test_vec3_orthonormalize() {
        let mut u = Vec3d::new(1.0, 1.0, 0.0);
        let mut v = Vec3d::new(1.0, 0.0, 1.0);
        let mut w = Vec3d::new(0.0, 1.0, 1.0);
        Vec3d::orthonormalize(&mut u, &mut v, &mut w);
        for x in [u, v, w] {
            assert_relative_eq!(x.length(), 1.0, epsilon = 1e-12);
        }
        assert!(u.dot(v).abs() < 1e-12);
        assert!(u.dot(w).abs() < 1e-12);
        assert!(v.dot(w).abs() < 1e-12);
    }

    #[test]
    fn test_vec3_basis_right_handed() {
        for w in [
            Vec3d::new(0.3, -2.0, 0.7),
            Vec3d::new(5.0, 0.1, 0.2),
            Vec3d::UNIT_Z,
        ] {
            let (u, v, w) = Vec3d::generate_orthonormal_basis(w);
            let c = u.cross(v);
            assert_relative_eq!(c.x, w.x, epsilon = 1e-12);
            assert_relative_eq!(c.y, w.y, epsilon = 1e-12);
            assert_relative_eq!(c.z, w.z, epsilon = 1e-12);
            assert!(u.dot(w).abs() < 1e-12);
        }
    }

    #[test]
    fn test_vec3_total_cmp() {
        use std::cmp::Ordering;
        let a = Vec3f::new(1.0, f32::NAN, 0.0);
        let b = Vec3f::new(1.0, 2.0, 0.0);
        assert_eq!(b.total_cmp(&a), Ordering::Less);
        assert_eq!(a.total_cmp(&a), Ordering::Equal);
    }

    #[test]
    fn test_vec3_index() {
        let mut v = Vec3f::new(1.0, 2.0, 3.0);
        v[1] = 7.0;
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 7.0);
        assert_eq!(v[2], 3.0);
    }

    #[test]
    #[should_panic(expected = "Vec3 index out of bounds: 3")]
    fn test_vec3_index_out_of_bounds() {
        let v = Vec3f::ZERO;
        let _ = v[3];
    }

    #[test]
    fn test_vec3x_length_of_large_vectors() {
        let v = Vec3x::new(Fixed::from_num(50000), Fixed::ZERO, Fixed::ZERO);
        assert_eq!(v.length(), Fixed::from_num(50000));

        let w = Vec3x::new(Fixed::from_num(-30000), Fixed::from_num(40000), Fixed::ZERO);
        assert!((w.length().to_f64() - 50000.0).abs() < 1e-4);
    }

    #[test]
    fn test_vec3x_normalize_large_vector() {
        let mut v = Vec3x::new(Fixed::from_num(40000), Fixed::from_num(40000), Fixed::ZERO);
        let len = v.normalize();
        assert!((len.to_f64() - 40000.0 * std::f64::consts::SQRT_2).abs() < 1e-4);
        assert!((v.x.to_f64() - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-8);
        assert_eq!(v.x, v.y);
        assert_eq!(v.z, Fixed::ZERO);
    }

    #[test]
    fn test_vec3x_dot_beyond_range() {
        let a = Vec3x::new(Fixed::from_num(40000), Fixed::from_num(40000), Fixed::ZERO);
        let b = Vec3x::new(Fixed::from_num(40000), Fixed::from_num(-40000), Fixed::ZERO);
        assert_eq!(a.squared_length(), Fixed::MAX);
        assert_eq!(a.dot(-a), Fixed::MIN);
        assert_eq!(a.dot(b), Fixed::ZERO);
    }
}
