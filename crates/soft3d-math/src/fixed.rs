//! Fixed-point backing for [`Real`].
//!
//! [`Fixed`] is a signed 64-bit number with 32 integer and 32 fractional
//! bits. Every operation here is integer arithmetic on the raw bits, so a
//! computation produces the same result on every platform and compiler.
//!
//! The `fixed` crate supplies the arithmetic and `sqrt`. The transcendental
//! functions are built on the high-precision polynomial kernels of
//! [`crate::math`] after range reduction:
//!
//! | Function        | Method                                              |
//! |-----------------|-----------------------------------------------------|
//! | `sin`, `cos`    | reduce to `[-π, π]`, fold to `[0, π/2]`, polynomial |
//! | `tan`           | `sin / cos`, saturating at the poles                |
//! | `atan`, `atan2` | octant reduction onto the arc tangent polynomial    |
//! | `asin`, `acos`  | `atan2(x, sqrt(1 - x²))`                            |
//! | `exp`           | `2^k · e^r` with a Taylor series for `e^r`          |
//! | `ln`            | normalize to `[1, 2)` by bit position, atanh series |
//!
//! Out-of-range results saturate: `exp` above ~21.48 returns `Fixed::MAX`,
//! `ln` of a non-positive value returns `Fixed::MIN`. `fmod` by zero returns
//! zero, where the float backings return NaN.

use std::cmp::Ordering;

use fixed::types::I32F32;

use crate::math;
use crate::real::Real;

/// Fixed-point real: 32 integer bits, 32 fractional bits.
pub type Fixed = I32F32;

const FRAC_BITS: i32 = 32;

// e^x overflows I32F32 past ln(2^31) and underflows below ln(2^-32).
const EXP_MAX_ARG: I32F32 = I32F32::from_bits(22 << 32);
const EXP_MIN_ARG: I32F32 = I32F32::from_bits(-23 << 32);

const EXP_TERMS: i32 = 12;
const LN_SERIES_MAX_POWER: i32 = 21;

impl Real for I32F32 {
    const ZERO: Self = I32F32::ZERO;
    const ONE: Self = I32F32::from_bits(1 << 32);
    const TWO: Self = I32F32::from_bits(2 << 32);
    const HALF: Self = I32F32::from_bits(1 << 31);
    const EPSILON: Self = I32F32::DELTA;
    const ZERO_TOLERANCE: Self = I32F32::from_bits(4_295);
    const MAX_REAL: Self = I32F32::MAX;
    const PI: Self = I32F32::from_bits(13_493_037_705);
    const TWO_PI: Self = I32F32::from_bits(26_986_075_409);
    const HALF_PI: Self = I32F32::from_bits(6_746_518_852);
    const INV_PI: Self = I32F32::from_bits(1_367_130_551);
    const INV_TWO_PI: Self = I32F32::from_bits(683_565_276);
    const DEG_TO_RAD: Self = I32F32::from_bits(74_961_321);
    const RAD_TO_DEG: Self = I32F32::from_bits(246_083_499_208);
    const LN_2: Self = I32F32::from_bits(2_977_044_472);
    const LN_10: Self = I32F32::from_bits(9_889_527_671);
    const INV_LN_2: Self = I32F32::from_bits(6_196_328_019);
    const INV_LN_10: Self = I32F32::from_bits(1_865_280_597);

    #[inline]
    fn sqrt(self) -> Self {
        if self <= I32F32::ZERO {
            I32F32::ZERO
        } else {
            I32F32::sqrt(self)
        }
    }

    #[inline]
    fn abs(self) -> Self {
        self.checked_abs().unwrap_or(I32F32::MAX)
    }

    fn sin(self) -> Self {
        let r = reduce_angle(self);
        let (a, sign) = if r < I32F32::ZERO { (-r, -1) } else { (r, 1) };
        let folded = if a > <Self as Real>::HALF_PI { <Self as Real>::PI - a } else { a };
        let s = math::fast_sin1(folded);
        if sign < 0 { -s } else { s }
    }

    fn cos(self) -> Self {
        let a = Real::abs(reduce_angle(self));
        if a > <Self as Real>::HALF_PI {
            -math::fast_cos1(<Self as Real>::PI - a)
        } else {
            math::fast_cos1(a)
        }
    }

    fn tan(self) -> Self {
        let s = Real::sin(self);
        let c = Real::cos(self);
        s.checked_div(c).unwrap_or(if (s >= I32F32::ZERO) == (c >= I32F32::ZERO) {
            I32F32::MAX
        } else {
            I32F32::MIN
        })
    }

    fn asin(self) -> Self {
        Real::atan2(self, one_minus_square_root(self))
    }

    fn acos(self) -> Self {
        Real::atan2(one_minus_square_root(self), self)
    }

    #[inline]
    fn atan(self) -> Self {
        Real::atan2(self, <Self as Real>::ONE)
    }

    fn atan2(self, x: Self) -> Self {
        let y = self;
        let ax = Real::abs(x);
        let ay = Real::abs(y);
        if ax == I32F32::ZERO && ay == I32F32::ZERO {
            return I32F32::ZERO;
        }

        let mut a = if ax >= ay {
            math::fast_inv_tan1(ay / ax)
        } else {
            <Self as Real>::HALF_PI - math::fast_inv_tan1(ax / ay)
        };
        if x < I32F32::ZERO {
            a = <Self as Real>::PI - a;
        }
        if y < I32F32::ZERO { -a } else { a }
    }

    fn exp(self) -> Self {
        if self > EXP_MAX_ARG {
            return I32F32::MAX;
        }
        if self < EXP_MIN_ARG {
            return I32F32::ZERO;
        }

        let k = I32F32::floor(self * <Self as Real>::INV_LN_2).to_num::<i32>();
        if k >= 31 {
            return I32F32::MAX;
        }
        if k <= -33 {
            return I32F32::ZERO;
        }

        let r = self - I32F32::from_num(k) * <Self as Real>::LN_2;
        let mut term = <Self as Real>::ONE;
        let mut sum = <Self as Real>::ONE;
        for n in 1..=EXP_TERMS {
            term = term * r / I32F32::from_num(n);
            sum += term;
        }

        let bits = sum.to_bits();
        if k >= 0 {
            bits.checked_mul(1i64 << k)
                .map_or(I32F32::MAX, I32F32::from_bits)
        } else {
            I32F32::from_bits(bits >> -k)
        }
    }

    fn ln(self) -> Self {
        if self <= I32F32::ZERO {
            return I32F32::MIN;
        }

        let bits = self.to_bits();
        let top = 63 - (bits as u64).leading_zeros() as i32;
        let k = top - FRAC_BITS;
        let m = I32F32::from_bits(if k >= 0 { bits >> k } else { bits << -k });

        // ln(m) = 2 atanh(s) with s = (m - 1) / (m + 1) in [0, 1/3).
        let s = (m - <Self as Real>::ONE) / (m + <Self as Real>::ONE);
        let s2 = s * s;
        let mut power = s;
        let mut sum = s;
        let mut n = 3;
        while n <= LN_SERIES_MAX_POWER {
            power *= s2;
            sum += power / I32F32::from_num(n);
            n += 2;
        }

        sum * <Self as Real>::TWO + I32F32::from_num(k) * <Self as Real>::LN_2
    }

    fn powf(self, p: Self) -> Self {
        if self > I32F32::ZERO {
            return Real::exp(p.saturating_mul(Real::ln(self)));
        }
        if self == I32F32::ZERO {
            return match p.cmp(&I32F32::ZERO) {
                Ordering::Equal => <Self as Real>::ONE,
                Ordering::Greater => I32F32::ZERO,
                Ordering::Less => I32F32::MAX,
            };
        }
        I32F32::ZERO
    }

    #[inline]
    fn floor(self) -> Self {
        I32F32::from_bits(self.to_bits() & !((1i64 << FRAC_BITS) - 1))
    }

    #[inline]
    fn ceil(self) -> Self {
        -Real::floor(-self)
    }

    #[inline]
    fn fast_inv_sqrt(self) -> Self {
        <Self as Real>::ONE
            .checked_div(Real::sqrt(self))
            .unwrap_or(I32F32::MAX)
    }

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self, other)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        if v.is_nan() {
            I32F32::ZERO
        } else {
            I32F32::saturating_from_num(v)
        }
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_num::<f64>()
    }

    #[inline]
    fn from_i32(v: i32) -> Self {
        I32F32::from_num(v)
    }

    #[inline]
    fn fmod(self, d: Self) -> Self {
        self.checked_rem(d).unwrap_or(I32F32::ZERO)
    }
}

/// Maps an angle onto `[-π, π]` by removing whole turns.
#[inline]
fn reduce_angle(x: I32F32) -> I32F32 {
    let turns = I32F32::round(x * <I32F32 as Real>::INV_TWO_PI);
    x - turns.saturating_mul(<I32F32 as Real>::TWO_PI)
}

#[inline]
fn one_minus_square_root(x: I32F32) -> I32F32 {
    let d = <I32F32 as Real>::ONE - x.saturating_mul(x);
    Real::sqrt(Real::max(d, I32F32::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 2e-7;

    fn fx(v: f64) -> Fixed {
        Fixed::from_f64(v)
    }

    fn close(a: Fixed, b: f64, tol: f64) -> bool {
        (a.to_f64() - b).abs() <= tol
    }

    #[test]
    fn test_constants_match_f64() {
        assert!(close(<Fixed as Real>::PI, std::f64::consts::PI, 1e-9));
        assert!(close(<Fixed as Real>::DEG_TO_RAD, std::f64::consts::PI / 180.0, 1e-9));
        assert!(close(<Fixed as Real>::LN_10, std::f64::consts::LN_10, 1e-9));
        assert!(close(<Fixed as Real>::ZERO_TOLERANCE, 1e-6, 1e-9));
        assert_eq!(<Fixed as Real>::EPSILON.to_bits(), 1);
    }

    #[test]
    fn test_sin_cos_full_turns() {
        let mut x = -10.0f64;
        while x <= 10.0 {
            assert!(close(Real::sin(fx(x)), x.sin(), TOL), "sin({x})");
            assert!(close(Real::cos(fx(x)), x.cos(), TOL), "cos({x})");
            x += 0.173;
        }
    }

    #[test]
    fn test_tan_saturates_at_pole() {
        assert!(close(Real::tan(fx(0.5)), 0.5f64.tan(), 1e-6));
        let t = Real::tan(<Fixed as Real>::HALF_PI);
        assert!(t.to_f64().abs() > 1e5);
    }

    #[test]
    fn test_atan2_quadrants() {
        for &(y, x) in &[(1.0, 2.0), (2.0, 1.0), (1.0, -2.0), (-2.0, -1.0), (-1.0, 3.0), (0.0, -1.0)] {
            assert!(close(Real::atan2(fx(y), fx(x)), f64::atan2(y, x), TOL), "atan2({y}, {x})");
        }
        assert_eq!(Real::atan2(Fixed::ZERO, Fixed::ZERO), Fixed::ZERO);
    }

    #[test]
    fn test_asin_acos() {
        for &v in &[-1.0f64, -0.7, 0.0, 0.25, 0.9, 1.0] {
            assert!(close(Real::asin(fx(v)), v.asin(), TOL), "asin({v})");
            assert!(close(Real::acos(fx(v)), v.acos(), TOL), "acos({v})");
        }
    }

    #[test]
    fn test_exp_and_saturation() {
        for &v in &[-5.0f64, -1.0, 0.0, 0.5, 1.0, 3.0] {
            let rel = (Real::exp(fx(v)).to_f64() - v.exp()).abs() / v.exp();
            assert!(rel < 1e-7, "exp({v}) rel {rel}");
        }
        assert_eq!(Real::exp(fx(30.0)), Fixed::MAX);
        assert_eq!(Real::exp(fx(-40.0)), Fixed::ZERO);
    }

    #[test]
    fn test_ln() {
        for &v in &[1e-3f64, 0.5, 1.0, 2.0, 10.0, 12345.0] {
            let x = fx(v);
            assert!(close(Real::ln(x), x.to_f64().ln(), 1e-7), "ln({v})");
        }
        assert_eq!(Real::ln(Fixed::ZERO), Fixed::MIN);
        assert_eq!(Real::ln(fx(-1.0)), Fixed::MIN);
    }

    #[test]
    fn test_powf() {
        assert!(close(Real::powf(fx(2.0), fx(10.0)), 1024.0, 1e-4));
        assert!(close(Real::powf(fx(9.0), fx(0.5)), 3.0, 1e-6));
        assert_eq!(Real::powf(Fixed::ZERO, Fixed::ZERO), <Fixed as Real>::ONE);
        assert_eq!(Real::powf(Fixed::ZERO, fx(2.0)), Fixed::ZERO);
    }

    #[test]
    fn test_floor_ceil() {
        assert_eq!(Real::floor(fx(-1.5)), fx(-2.0));
        assert_eq!(Real::floor(fx(1.5)), fx(1.0));
        assert_eq!(Real::ceil(fx(1.25)), fx(2.0));
        assert_eq!(Real::ceil(fx(-1.25)), fx(-1.0));
    }

    #[test]
    fn test_from_f64_saturates() {
        assert_eq!(Fixed::from_f64(f64::NAN), Fixed::ZERO);
        assert_eq!(Fixed::from_f64(1e30), Fixed::MAX);
        assert_eq!(Fixed::from_f64(f64::NEG_INFINITY), Fixed::MIN);
    }

    #[test]
    fn test_sqrt_non_positive() {
        assert_eq!(Real::sqrt(fx(-4.0)), Fixed::ZERO);
        assert_eq!(Real::sqrt(fx(16.0)), fx(4.0));
    }

    #[test]
    fn test_fmod() {
        assert_eq!(Real::fmod(fx(7.5), fx(2.0)), fx(1.5));
        assert_eq!(Real::fmod(fx(-7.5), fx(2.0)), fx(-1.5));
        assert_eq!(math::fmod(Fixed::ONE, Fixed::ZERO), Fixed::ZERO);
        assert_eq!(math::fmod(Fixed::MIN, -Fixed::DELTA), Fixed::ZERO);
    }
}
