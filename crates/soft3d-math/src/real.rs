//! The `Real` number abstraction.
//!
//! Every vector, matrix and scalar routine in this crate is written once
//! against [`Real`] and instantiated for three backings:
//!
//! | Backing                   | Use                                          |
//! |---------------------------|----------------------------------------------|
//! | `f32`                     | Default engine precision                     |
//! | `f64`                     | Tools and reference computations             |
//! | [`Fixed`](crate::Fixed)   | Deterministic, bit-reproducible arithmetic   |
//!
//! # Constants
//!
//! | Constant         | f32            | f64            | Fixed         |
//! |------------------|----------------|----------------|---------------|
//! | `EPSILON`        | `f32::EPSILON` | `f64::EPSILON` | 2^-32         |
//! | `ZERO_TOLERANCE` | 1e-6           | 1e-8           | ~1e-6         |
//! | `MAX_REAL`       | `f32::MAX`     | `f64::MAX`     | `I32F32::MAX` |
//!
//! The remaining constants (`PI`, `DEG_TO_RAD`, `LN_2`, ...) are the standard
//! double-precision values rounded to the backing's precision.
//!
//! # Usage
//!
//! ```rust
//! use soft3d_math::Real;
//!
//! fn hypot<R: Real>(a: R, b: R) -> R {
//!     (a * a + b * b).sqrt()
//! }
//!
//! assert_eq!(hypot(3.0f32, 4.0), 5.0);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, Sub, SubAssign};

/// Numeric capability required by the math kernel.
///
/// The primitive elementary functions here carry no domain protection; the
/// clamped and approximate wrappers live in [`crate::math`].
pub trait Real:
    Copy
    + Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Default
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + 'static
{
    /// 0
    const ZERO: Self;
    /// 1
    const ONE: Self;
    /// 2
    const TWO: Self;
    /// 0.5
    const HALF: Self;
    /// Smallest `e` with `1 + e != 1`.
    const EPSILON: Self;
    /// Threshold below which a magnitude is treated as zero.
    const ZERO_TOLERANCE: Self;
    /// Largest finite value.
    const MAX_REAL: Self;
    /// π
    const PI: Self;
    /// 2π
    const TWO_PI: Self;
    /// π/2
    const HALF_PI: Self;
    /// 1/π
    const INV_PI: Self;
    /// 1/(2π)
    const INV_TWO_PI: Self;
    /// π/180
    const DEG_TO_RAD: Self;
    /// 180/π
    const RAD_TO_DEG: Self;
    /// ln 2
    const LN_2: Self;
    /// ln 10
    const LN_10: Self;
    /// 1/ln 2
    const INV_LN_2: Self;
    /// 1/ln 10
    const INV_LN_10: Self;

    /// Square root.
    fn sqrt(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Sine (radians).
    fn sin(self) -> Self;
    /// Cosine (radians).
    fn cos(self) -> Self;
    /// Tangent (radians).
    fn tan(self) -> Self;
    /// Arc sine; the input must lie in [-1, 1].
    fn asin(self) -> Self;
    /// Arc cosine; the input must lie in [-1, 1].
    fn acos(self) -> Self;
    /// Arc tangent.
    fn atan(self) -> Self;
    /// Four-quadrant arc tangent of `self / x`.
    fn atan2(self, x: Self) -> Self;
    /// e^self.
    fn exp(self) -> Self;
    /// Natural logarithm.
    fn ln(self) -> Self;
    /// self^p.
    fn powf(self, p: Self) -> Self;
    /// Largest integer value not greater than self.
    fn floor(self) -> Self;
    /// Smallest integer value not less than self.
    fn ceil(self) -> Self;
    /// Approximate 1/sqrt(self), cheaper than the exact form.
    fn fast_inv_sqrt(self) -> Self;
    /// Total ordering, defined even where `PartialOrd` is not.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Converts from `f64`, saturating where the backing's range is smaller.
    fn from_f64(v: f64) -> Self;
    /// Converts to `f64`.
    fn to_f64(self) -> f64;
    /// Converts from `i32`.
    fn from_i32(v: i32) -> Self;

    /// Remainder of `self / d`, carrying the sign of self.
    #[inline]
    fn fmod(self, d: Self) -> Self {
        self % d
    }

    /// Returns the smaller of two values.
    #[inline]
    fn min(self, other: Self) -> Self {
        if self < other { self } else { other }
    }

    /// Returns the larger of two values.
    #[inline]
    fn max(self, other: Self) -> Self {
        if self > other { self } else { other }
    }

    /// Restricts self to `[lo, hi]`.
    #[inline]
    fn clamp(self, lo: Self, hi: Self) -> Self {
        if self < lo {
            lo
        } else if self > hi {
            hi
        } else {
            self
        }
    }

    /// -1, 0 or +1 according to the sign of self.
    #[inline]
    fn signum(self) -> Self {
        if self > Self::ZERO {
            Self::ONE
        } else if self < Self::ZERO {
            -Self::ONE
        } else {
            Self::ZERO
        }
    }

    /// Returns `false` for NaN and infinities.
    #[inline]
    fn is_finite(self) -> bool {
        true
    }
}

macro_rules! impl_real_float {
    ($t:ident, $zero_tol:expr, $magic:expr, $bits:ty) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const HALF: Self = 0.5;
            const EPSILON: Self = $t::EPSILON;
            const ZERO_TOLERANCE: Self = $zero_tol;
            const MAX_REAL: Self = $t::MAX;
            const PI: Self = std::$t::consts::PI;
            const TWO_PI: Self = std::$t::consts::TAU;
            const HALF_PI: Self = std::$t::consts::FRAC_PI_2;
            const INV_PI: Self = std::$t::consts::FRAC_1_PI;
            const INV_TWO_PI: Self = 0.5 * std::$t::consts::FRAC_1_PI;
            const DEG_TO_RAD: Self = std::$t::consts::PI / 180.0;
            const RAD_TO_DEG: Self = 180.0 / std::$t::consts::PI;
            const LN_2: Self = std::$t::consts::LN_2;
            const LN_10: Self = std::$t::consts::LN_10;
            const INV_LN_2: Self = std::$t::consts::LOG2_E;
            const INV_LN_10: Self = std::$t::consts::LOG10_E;

            #[inline] fn sqrt(self) -> Self { $t::sqrt(self) }
            #[inline] fn abs(self) -> Self { $t::abs(self) }
            #[inline] fn sin(self) -> Self { $t::sin(self) }
            #[inline] fn cos(self) -> Self { $t::cos(self) }
            #[inline] fn tan(self) -> Self { $t::tan(self) }
            #[inline] fn asin(self) -> Self { $t::asin(self) }
            #[inline] fn acos(self) -> Self { $t::acos(self) }
            #[inline] fn atan(self) -> Self { $t::atan(self) }
            #[inline] fn atan2(self, x: Self) -> Self { $t::atan2(self, x) }
            #[inline] fn exp(self) -> Self { $t::exp(self) }
            #[inline] fn ln(self) -> Self { $t::ln(self) }
            #[inline] fn powf(self, p: Self) -> Self { $t::powf(self, p) }
            #[inline] fn floor(self) -> Self { $t::floor(self) }
            #[inline] fn ceil(self) -> Self { $t::ceil(self) }
            #[inline] fn total_cmp(&self, other: &Self) -> Ordering { $t::total_cmp(self, other) }
            #[inline] fn is_finite(self) -> bool { $t::is_finite(self) }

            // Bit-level initial guess refined by one Newton step.
            #[inline]
            fn fast_inv_sqrt(self) -> Self {
                let half = 0.5 * self;
                let guess = $t::from_bits(($magic as $bits).wrapping_sub(self.to_bits() >> 1));
                guess * (1.5 - half * guess * guess)
            }

            #[inline] fn from_f64(v: f64) -> Self { v as $t }
            #[inline] fn to_f64(self) -> f64 { self as f64 }
            #[inline] fn from_i32(v: i32) -> Self { v as $t }
        }
    };
}

impl_real_float!(f32, 1e-6, 0x5f37_59df_u32, u32);
impl_real_float!(f64, 1e-8, 0x5fe6_ec85_e7de_30da_u64, u64);
