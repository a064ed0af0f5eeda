//! Operations shared by [`Vec2`](crate::Vec2), [`Vec3`](crate::Vec3) and
//! [`Vec4`](crate::Vec4).
//!
//! Each vector type declares its fields and invokes `impl_vector!` for the
//! common surface: constants, construction, dot product, length and
//! normalization, operators and indexing.
//!
//! # Range
//!
//! `dot`, `squared_length` and `length` never overflow an intermediate
//! product. When the backing cannot hold the squares of the components
//! (large `Fixed` vectors), `length` rescales by the largest component and
//! `dot` accumulates in `f64`; a result beyond the backing's range
//! saturates to `±MAX_REAL`.

/// Generates the common vector surface for a struct whose fields are all
/// `R`, listed with their index.
macro_rules! impl_vector {
    ($V:ident, $n:literal, { $($i:literal => $f:ident),+ }) => {
        impl<R: Real> $V<R> {
            /// All components zero.
            pub const ZERO: Self = Self { $($f: R::ZERO),+ };

            /// All components one.
            pub const ONE: Self = Self { $($f: R::ONE),+ };

            /// Creates a vector from its components.
            #[inline]
            pub const fn new($($f: R),+) -> Self {
                Self { $($f),+ }
            }

            /// Creates a vector with every component set to `v`.
            #[inline]
            pub fn splat(v: R) -> Self {
                Self { $($f: v),+ }
            }

            /// Creates a vector from an array.
            #[inline]
            pub fn from_array(a: [R; $n]) -> Self {
                let [$($f),+] = a;
                Self { $($f),+ }
            }

            /// Creates a vector from the first components of a slice.
            ///
            /// # Panics
            ///
            /// Panics if `s` is shorter than the vector.
            #[inline]
            pub fn from_slice(s: &[R]) -> Self {
                let mut a = [R::ZERO; $n];
                a.copy_from_slice(&s[..$n]);
                Self::from_array(a)
            }

            /// Converts to an array.
            #[inline]
            pub fn to_array(self) -> [R; $n] {
                [$(self.$f),+]
            }

            /// Largest absolute component.
            #[inline]
            pub fn max_abs(self) -> R {
                let mut m = R::ZERO;
                $(m = Real::max(m, Real::abs(self.$f));)+
                m
            }

            /// Dot product.
            #[inline]
            pub fn dot(self, other: Self) -> R {
                let bound = ($n as f64) * self.max_abs().to_f64() * other.max_abs().to_f64();
                if bound <= R::MAX_REAL.to_f64() {
                    R::ZERO $(+ self.$f * other.$f)+
                } else {
                    R::from_f64(0.0 $(+ self.$f.to_f64() * other.$f.to_f64())+)
                }
            }

            /// Squared length.
            #[inline]
            pub fn squared_length(self) -> R {
                self.dot(self)
            }

            /// Length.
            #[inline]
            pub fn length(self) -> R {
                let big = self.max_abs();
                let big64 = big.to_f64();
                if ($n as f64) * big64 * big64 <= R::MAX_REAL.to_f64() {
                    return Real::sqrt(R::ZERO $(+ self.$f * self.$f)+);
                }
                let unit = self / big;
                R::from_f64(big64 * Real::sqrt(unit.dot(unit)).to_f64())
            }

            /// Scales the vector to unit length in place and returns the
            /// length it had.
            ///
            /// A vector no longer than `ZERO_TOLERANCE` becomes the zero
            /// vector and `0` is returned.
            #[inline]
            pub fn normalize(&mut self) -> R {
                let len = self.length();
                if len > R::ZERO_TOLERANCE {
                    $(self.$f /= len;)+
                    len
                } else {
                    *self = Self::ZERO;
                    R::ZERO
                }
            }

            /// Returns a unit-length copy, or zero for a (near) zero vector.
            #[inline]
            pub fn normalized(self) -> Self {
                let mut v = self;
                v.normalize();
                v
            }

            /// Component-wise minimum.
            #[inline]
            pub fn min(self, other: Self) -> Self {
                Self { $($f: Real::min(self.$f, other.$f)),+ }
            }

            /// Component-wise maximum.
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self { $($f: Real::max(self.$f, other.$f)),+ }
            }

            /// Linear interpolation: `t = 0` gives self, `t = 1` gives other.
            #[inline]
            pub fn lerp(self, other: Self, t: R) -> Self {
                self + (other - self) * t
            }

            /// Lexicographic total order over the components.
            pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
                $(
                    match Real::total_cmp(&self.$f, &other.$f) {
                        std::cmp::Ordering::Equal => {}
                        ord => return ord,
                    }
                )+
                std::cmp::Ordering::Equal
            }
        }

        impl<R: Real> std::ops::Index<usize> for $V<R> {
            type Output = R;

            #[inline]
            fn index(&self, i: usize) -> &R {
                match i {
                    $($i => &self.$f,)+
                    _ => panic!("{} index out of bounds: {}", stringify!($V), i),
                }
            }
        }

        impl<R: Real> std::ops::IndexMut<usize> for $V<R> {
            #[inline]
            fn index_mut(&mut self, i: usize) -> &mut R {
                match i {
                    $($i => &mut self.$f,)+
                    _ => panic!("{} index out of bounds: {}", stringify!($V), i),
                }
            }
        }

        impl<R: Real> std::ops::Add for $V<R> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($f: self.$f + rhs.$f),+ }
            }
        }

        impl<R: Real> std::ops::Sub for $V<R> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($f: self.$f - rhs.$f),+ }
            }
        }

        impl<R: Real> std::ops::Neg for $V<R> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self { $($f: -self.$f),+ }
            }
        }

        impl<R: Real> std::ops::Mul<R> for $V<R> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: R) -> Self {
                Self { $($f: self.$f * rhs),+ }
            }
        }

        impl<R: Real> std::ops::Div<R> for $V<R> {
            type Output = Self;

            #[inline]
            fn div(self, rhs: R) -> Self {
                Self { $($f: self.$f / rhs),+ }
            }
        }

        impl<R: Real> std::ops::AddAssign for $V<R> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                $(self.$f += rhs.$f;)+
            }
        }

        impl<R: Real> std::ops::SubAssign for $V<R> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$f -= rhs.$f;)+
            }
        }

        impl<R: Real> std::ops::MulAssign<R> for $V<R> {
            #[inline]
            fn mul_assign(&mut self, rhs: R) {
                $(self.$f *= rhs;)+
            }
        }

        impl<R: Real> std::ops::DivAssign<R> for $V<R> {
            #[inline]
            fn div_assign(&mut self, rhs: R) {
                $(self.$f /= rhs;)+
            }
        }

        impl<R: Real> From<[R; $n]> for $V<R> {
            #[inline]
            fn from(a: [R; $n]) -> Self {
                Self::from_array(a)
            }
        }

        impl<R: Real> From<$V<R>> for [R; $n] {
            #[inline]
            fn from(v: $V<R>) -> [R; $n] {
                v.to_array()
            }
        }

        impl<R: Real + soft3d_core::StreamElement> soft3d_core::StreamElement for $V<R> {
            const SIZE: usize = $n * R::SIZE;

            fn write_to<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
                $(soft3d_core::StreamElement::write_to(&self.$f, writer)?;)+
                Ok(())
            }

            fn read_from<Rd: std::io::Read>(reader: &mut Rd) -> std::io::Result<Self> {
                Ok(Self { $($f: <R as soft3d_core::StreamElement>::read_from(reader)?),+ })
            }
        }

        $crate::vector::impl_scalar_mul!($V, f32);
        $crate::vector::impl_scalar_mul!($V, f64);
        $crate::vector::impl_scalar_mul!($V, ::fixed::types::I32F32);
    };
}

/// `scalar * vector` for one concrete backing.
macro_rules! impl_scalar_mul {
    ($V:ident, $t:ty) => {
        impl std::ops::Mul<$V<$t>> for $t {
            type Output = $V<$t>;

            #[inline]
            fn mul(self, rhs: $V<$t>) -> $V<$t> {
                rhs * self
            }
        }
    };
}

pub(crate) use impl_scalar_mul;
pub(crate) use impl_vector;
