//! Scalar math over any [`Real`] backing.
//!
//! Two groups of functions live here:
//!
//! - **Wrappers** around the elementary functions. `asin` and `acos` clamp
//!   their input to `[-1, 1]` first, so an argument pushed marginally out of
//!   range by rounding yields ±π/2 or 0/π rather than NaN.
//! - **Fast approximations** (`fast_*`): fixed-degree polynomials that are
//!   only accurate inside their documented input domain. Suffix `0` is the
//!   cheaper tier, suffix `1` the more accurate one. Outside the domain the
//!   result is unspecified (never a panic for floats).
//!
//! # Fast approximation domains
//!
//! | Function              | Domain        | Max error (tier 0 / tier 1) |
//! |-----------------------|---------------|-----------------------------|
//! | `fast_sin`            | `[0, π/2]`    | 1.7e-4 / 1.9e-8             |
//! | `fast_cos`            | `[0, π/2]`    | 1.2e-3 / 6.5e-9             |
//! | `fast_tan`            | `[0, π/4]`    | 8.1e-4 / 1.9e-8             |
//! | `fast_inv_sin`        | `[0, 1]`      | 6.8e-5 / 1.4e-7             |
//! | `fast_inv_cos`        | `[0, 1]`      | 6.8e-5 / 1.4e-7             |
//! | `fast_inv_tan`        | `[-1, 1]`     | 1.2e-5 / 2.3e-8             |
//! | `fast_neg_exp0..3`    | `[0, ∞)`      | 2.4e-4, 2.4e-5, 2.4e-6, 2.5e-7 |
//!
//! The bounds are exported in [`error_bounds`].
//!
//! # Usage
//!
//! ```rust
//! use soft3d_math::math;
//!
//! let s = math::fast_sin1(0.5f64);
//! assert!((s - 0.5f64.sin()).abs() <= math::error_bounds::FAST_SIN1);
//!
//! // Clamped: 1.0000001 would be NaN for a bare asin.
//! assert_eq!(math::asin(1.000_000_1f64), std::f64::consts::FRAC_PI_2);
//! ```

use crate::real::Real;

/// Documented maximum absolute errors of the fast approximations.
pub mod error_bounds {
    /// [`fast_sin0`](super::fast_sin0)
    pub const FAST_SIN0: f64 = 1.7e-4;
    /// [`fast_sin1`](super::fast_sin1)
    pub const FAST_SIN1: f64 = 1.9e-8;
    /// [`fast_cos0`](super::fast_cos0)
    pub const FAST_COS0: f64 = 1.2e-3;
    /// [`fast_cos1`](super::fast_cos1)
    pub const FAST_COS1: f64 = 6.5e-9;
    /// [`fast_tan0`](super::fast_tan0)
    pub const FAST_TAN0: f64 = 8.1e-4;
    /// [`fast_tan1`](super::fast_tan1)
    pub const FAST_TAN1: f64 = 1.9e-8;
    /// [`fast_inv_sin0`](super::fast_inv_sin0) and [`fast_inv_cos0`](super::fast_inv_cos0)
    pub const FAST_INV_SIN0: f64 = 6.8e-5;
    /// [`fast_inv_sin1`](super::fast_inv_sin1) and [`fast_inv_cos1`](super::fast_inv_cos1)
    pub const FAST_INV_SIN1: f64 = 1.4e-7;
    /// [`fast_inv_cos0`](super::fast_inv_cos0)
    pub const FAST_INV_COS0: f64 = FAST_INV_SIN0;
    /// [`fast_inv_cos1`](super::fast_inv_cos1)
    pub const FAST_INV_COS1: f64 = FAST_INV_SIN1;
    /// [`fast_inv_tan0`](super::fast_inv_tan0)
    pub const FAST_INV_TAN0: f64 = 1.2e-5;
    /// [`fast_inv_tan1`](super::fast_inv_tan1)
    pub const FAST_INV_TAN1: f64 = 2.3e-8;
    /// [`fast_neg_exp0`](super::fast_neg_exp0)
    pub const FAST_NEG_EXP0: f64 = 2.4e-4;
    /// [`fast_neg_exp1`](super::fast_neg_exp1)
    pub const FAST_NEG_EXP1: f64 = 2.4e-5;
    /// [`fast_neg_exp2`](super::fast_neg_exp2)
    pub const FAST_NEG_EXP2: f64 = 2.4e-6;
    /// [`fast_neg_exp3`](super::fast_neg_exp3)
    pub const FAST_NEG_EXP3: f64 = 2.5e-7;
}

// Polynomial coefficients, highest degree first.
const SIN0: [f64; 3] = [7.61e-03, -1.6605e-01, 1.0];
const SIN1: [f64; 6] = [-2.39e-08, 2.7526e-06, -1.98409e-04, 8.3333315e-03, -1.666666664e-01, 1.0];
const COS0: [f64; 3] = [3.705e-02, -4.967e-01, 1.0];
const COS1: [f64; 6] = [-2.605e-07, 2.47609e-05, -1.3888397e-03, 4.16666418e-02, -4.999999963e-01, 1.0];
const TAN0: [f64; 3] = [2.033e-01, 3.1755e-01, 1.0];
const TAN1: [f64; 7] = [
    9.5168091e-03, 2.900525e-03, 2.45650893e-02, 5.33740603e-02, 1.333923995e-01,
    3.333314036e-01, 1.0,
];
const INV_SIN0: [f64; 4] = [-0.0187293, 0.0742610, -0.2121144, 1.5707288];
const INV_SIN1: [f64; 8] = [
    -0.0012624911, 0.0066700901, -0.0170881256, 0.0308918810, -0.0501743046, 0.0889789874,
    -0.2145988016, 1.5707963050,
];
const INV_TAN0: [f64; 5] = [0.0208351, -0.085133, 0.180141, -0.3302995, 0.999866];
const INV_TAN1: [f64; 9] = [
    0.0028662257, -0.0161657367, 0.0429096138, -0.0752896400, 0.1065626393, -0.1420889944,
    0.1999355085, -0.3333314528, 1.0,
];
const NEG_EXP0: [f64; 4] = [0.0038278, 0.0292732, 0.2507213, 1.0];
const NEG_EXP1: [f64; 5] = [0.00026695, 0.00227723, 0.03158565, 0.24991035, 1.0];
const NEG_EXP2: [f64; 6] = [0.000014876, 0.000127992, 0.002673255, 0.031198056, 0.250010936, 1.0];
const NEG_EXP3: [f64; 7] = [
    0.0000006906, 0.0000054302, 0.0001715620, 0.0025913712, 0.0312575832, 0.2499986842, 1.0,
];

// e^-x is below every neg-exp error bound past this point.
const NEG_EXP_CUTOFF: f64 = 23.0;

#[inline]
fn horner<R: Real>(coeffs: &[f64], x: R) -> R {
    coeffs
        .iter()
        .fold(R::ZERO, |acc, &c| acc * x + R::from_f64(c))
}

// ============================================================================
// Wrappers
// ============================================================================

/// Arc cosine with the input clamped to `[-1, 1]`.
#[inline]
pub fn acos<R: Real>(x: R) -> R {
    if x <= -R::ONE {
        R::PI
    } else if x >= R::ONE {
        R::ZERO
    } else {
        x.acos()
    }
}

/// Arc sine with the input clamped to `[-1, 1]`.
#[inline]
pub fn asin<R: Real>(x: R) -> R {
    if x <= -R::ONE {
        -R::HALF_PI
    } else if x >= R::ONE {
        R::HALF_PI
    } else {
        x.asin()
    }
}

/// Arc tangent.
#[inline]
pub fn atan<R: Real>(x: R) -> R {
    x.atan()
}

/// Four-quadrant arc tangent of `y / x`.
#[inline]
pub fn atan2<R: Real>(y: R, x: R) -> R {
    y.atan2(x)
}

/// Smallest integer value not less than `x`.
#[inline]
pub fn ceil<R: Real>(x: R) -> R {
    x.ceil()
}

/// Cosine.
#[inline]
pub fn cos<R: Real>(x: R) -> R {
    x.cos()
}

/// e^x.
#[inline]
pub fn exp<R: Real>(x: R) -> R {
    x.exp()
}

/// Absolute value.
#[inline]
pub fn fabs<R: Real>(x: R) -> R {
    x.abs()
}

/// Largest integer value not greater than `x`.
#[inline]
pub fn floor<R: Real>(x: R) -> R {
    x.floor()
}

/// Remainder of `x / y` with the sign of `x`.
///
/// `y = 0` yields NaN on the float backings and zero on [`Fixed`](crate::Fixed).
#[inline]
pub fn fmod<R: Real>(x: R, y: R) -> R {
    x.fmod(y)
}

/// `1 / sqrt(x)`; returns `MAX_REAL` when `sqrt(x)` is zero.
#[inline]
pub fn inv_sqrt<R: Real>(x: R) -> R {
    let s = x.sqrt();
    if s == R::ZERO { R::MAX_REAL } else { R::ONE / s }
}

/// Natural logarithm.
#[inline]
pub fn log<R: Real>(x: R) -> R {
    x.ln()
}

/// Base-2 logarithm.
#[inline]
pub fn log2<R: Real>(x: R) -> R {
    x.ln() * R::INV_LN_2
}

/// Base-10 logarithm.
#[inline]
pub fn log10<R: Real>(x: R) -> R {
    x.ln() * R::INV_LN_10
}

/// `base^exponent`.
#[inline]
pub fn pow<R: Real>(base: R, exponent: R) -> R {
    base.powf(exponent)
}

/// Sine.
#[inline]
pub fn sin<R: Real>(x: R) -> R {
    x.sin()
}

/// `x * x`.
#[inline]
pub fn sqr<R: Real>(x: R) -> R {
    x * x
}

/// Square root.
#[inline]
pub fn sqrt<R: Real>(x: R) -> R {
    x.sqrt()
}

/// Tangent.
#[inline]
pub fn tan<R: Real>(x: R) -> R {
    x.tan()
}

/// -1, 0 or +1 by the sign of `x`.
#[inline]
pub fn sign<R: Real>(x: R) -> R {
    x.signum()
}

/// -1, 0 or +1 by the sign of `x`.
#[inline]
pub fn sign_i32(x: i32) -> i32 {
    x.signum()
}

// ============================================================================
// Fast approximations
// ============================================================================

/// Sine on `[0, π/2]`, low precision.
#[inline]
pub fn fast_sin0<R: Real>(angle: R) -> R {
    horner(&SIN0, angle * angle) * angle
}

/// Sine on `[0, π/2]`, high precision.
#[inline]
pub fn fast_sin1<R: Real>(angle: R) -> R {
    horner(&SIN1, angle * angle) * angle
}

/// Cosine on `[0, π/2]`, low precision.
#[inline]
pub fn fast_cos0<R: Real>(angle: R) -> R {
    horner(&COS0, angle * angle)
}

/// Cosine on `[0, π/2]`, high precision.
#[inline]
pub fn fast_cos1<R: Real>(angle: R) -> R {
    horner(&COS1, angle * angle)
}

/// Tangent on `[0, π/4]`, low precision.
#[inline]
pub fn fast_tan0<R: Real>(angle: R) -> R {
    horner(&TAN0, angle * angle) * angle
}

/// Tangent on `[0, π/4]`, high precision.
#[inline]
pub fn fast_tan1<R: Real>(angle: R) -> R {
    horner(&TAN1, angle * angle) * angle
}

/// Arc sine on `[0, 1]`, low precision.
#[inline]
pub fn fast_inv_sin0<R: Real>(value: R) -> R {
    R::HALF_PI - fast_inv_cos0(value)
}

/// Arc sine on `[0, 1]`, high precision.
#[inline]
pub fn fast_inv_sin1<R: Real>(value: R) -> R {
    R::HALF_PI - fast_inv_cos1(value)
}

/// Arc cosine on `[0, 1]`, low precision.
#[inline]
pub fn fast_inv_cos0<R: Real>(value: R) -> R {
    horner(&INV_SIN0, value) * (R::ONE - value).sqrt()
}

/// Arc cosine on `[0, 1]`, high precision.
#[inline]
pub fn fast_inv_cos1<R: Real>(value: R) -> R {
    horner(&INV_SIN1, value) * (R::ONE - value).sqrt()
}

/// Arc tangent on `[-1, 1]`, low precision.
#[inline]
pub fn fast_inv_tan0<R: Real>(value: R) -> R {
    horner(&INV_TAN0, value * value) * value
}

/// Arc tangent on `[-1, 1]`, high precision.
#[inline]
pub fn fast_inv_tan1<R: Real>(value: R) -> R {
    horner(&INV_TAN1, value * value) * value
}

/// Approximate `1 / sqrt(x)`.
#[inline]
pub fn fast_inv_sqrt<R: Real>(value: R) -> R {
    value.fast_inv_sqrt()
}

#[inline]
fn neg_exp<R: Real>(coeffs: &[f64], value: R) -> R {
    if value > R::from_f64(NEG_EXP_CUTOFF) {
        return R::ZERO;
    }
    let inv = R::ONE / horner(coeffs, value);
    let inv2 = inv * inv;
    inv2 * inv2
}

/// e^-x on `[0, ∞)`, lowest precision.
#[inline]
pub fn fast_neg_exp0<R: Real>(value: R) -> R {
    neg_exp(&NEG_EXP0, value)
}

/// e^-x on `[0, ∞)`.
#[inline]
pub fn fast_neg_exp1<R: Real>(value: R) -> R {
    neg_exp(&NEG_EXP1, value)
}

/// e^-x on `[0, ∞)`.
#[inline]
pub fn fast_neg_exp2<R: Real>(value: R) -> R {
    neg_exp(&NEG_EXP2, value)
}

/// e^-x on `[0, ∞)`, highest precision.
#[inline]
pub fn fast_neg_exp3<R: Real>(value: R) -> R {
    neg_exp(&NEG_EXP3, value)
}
