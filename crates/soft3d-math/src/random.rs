//! Seedable random number source.
//!
//! [`Random`] owns its generator state; callers pass it where random values
//! are needed instead of sharing one hidden global stream. Each draw method
//! takes a `seed`: a nonzero seed restarts the stream deterministically
//! before drawing, zero continues the current stream.
//!
//! The generator is `rand`'s `StdRng`: a given seed yields the same sequence
//! on every platform for a fixed `rand` release, but the algorithm may change
//! between releases. Draws are mapped through `u32 / u32::MAX` and
//! then converted to the backing, making `[0, 1]` a closed interval for every
//! [`Real`].
//!
//! # Usage
//!
//! ```rust
//! use soft3d_math::Random;
//!
//! let mut rng = Random::default();
//! let a: f32 = rng.unit_random(42);
//! let b: f32 = rng.unit_random(0);
//! assert_ne!(a, b);
//!
//! // Reseeding with the same value replays the stream.
//! assert_eq!(rng.unit_random::<f32>(42), a);
//! ```

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::real::Real;

const DEFAULT_SEED: u64 = 1;

/// Owned random stream.
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Default for Random {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Random {
    /// Creates a stream starting from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a stream seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Restarts the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    #[inline]
    fn draw(&mut self, seed: u32) -> f64 {
        if seed != 0 {
            self.reseed(u64::from(seed));
        }
        f64::from(self.rng.next_u32()) / f64::from(u32::MAX)
    }

    /// Uniform value in `[0, 1]`.
    pub fn unit_random<R: Real>(&mut self, seed: u32) -> R {
        R::from_f64(self.draw(seed))
    }

    /// Uniform value in `[-1, 1]`.
    pub fn symmetric_random<R: Real>(&mut self, seed: u32) -> R {
        R::from_f64(2.0 * self.draw(seed) - 1.0)
    }

    /// Uniform value in `[min, max]`.
    pub fn interval_random<R: Real>(&mut self, min: R, max: R, seed: u32) -> R {
        map_interval(min, max, self.unit_random::<R>(seed))
    }
}

// `min + (max - min) * u` can round one ulp past either bound.
#[inline]
fn map_interval<R: Real>(min: R, max: R, u: R) -> R {
    let v = min + (max - min) * u;
    if min <= max { v.clamp(min, max) } else { v.clamp(max, min) }
}
