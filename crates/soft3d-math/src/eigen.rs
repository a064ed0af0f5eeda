//! Cyclic Jacobi eigen solver for small symmetric matrices.
//!
//! [`EigenSolver`] diagonalizes a symmetric `N x N` matrix by repeated plane
//! rotations. On return the eigenvalues are sorted ascending, the
//! eigenvectors are the columns of a proper rotation (det = +1), and
//! `V * diag(d) * Vᵀ` reproduces the input within the solver tolerance.
//!
//! The off-diagonal threshold scales with the largest input magnitude, so
//! the same settings work for unit-scale and large-valued matrices.
//!
//! # Usage
//!
//! ```rust
//! use soft3d_math::EigenSolver;
//!
//! let solver = EigenSolver::<f64>::default();
//! let (vectors, values) = solver.solve([[2.0, 1.0], [1.0, 2.0]]);
//! assert!((values[0] - 1.0).abs() < 1e-12);
//! assert!((values[1] - 3.0).abs() < 1e-12);
//! # let _ = vectors;
//! ```

use tracing::trace;

use crate::real::Real;

const DEFAULT_MAX_SWEEPS: usize = 32;
const DEFAULT_TOLERANCE_ULPS: i32 = 4;

// Past this ratio the rotation tangent uses the 1/(2θ) asymptote.
const LARGE_THETA: f64 = 1e4;

/// Settings for the Jacobi iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EigenSolver<R> {
    /// Upper bound on full sweeps over the off-diagonal entries.
    pub max_sweeps: usize,
    /// Off-diagonal magnitude, relative to the largest input entry, that
    /// counts as zero.
    pub tolerance: R,
}

impl<R: Real> Default for EigenSolver<R> {
    fn default() -> Self {
        Self {
            max_sweeps: DEFAULT_MAX_SWEEPS,
            tolerance: R::EPSILON * R::from_i32(DEFAULT_TOLERANCE_ULPS),
        }
    }
}

impl<R: Real> EigenSolver<R> {
    /// Creates a solver with explicit settings.
    pub fn new(max_sweeps: usize, tolerance: R) -> Self {
        Self { max_sweeps, tolerance }
    }

    /// Diagonalizes the symmetric matrix `m` (rows of columns).
    ///
    /// Returns `(vectors, values)`: `vectors[r][c]` is component `r` of
    /// eigenvector `c`, `values` ascending. Only the upper triangle of `m`
    /// is read.
    pub fn solve<const N: usize>(&self, m: [[R; N]; N]) -> ([[R; N]; N], [R; N]) {
        let mut a = m;
        for p in 0..N {
            for q in p + 1..N {
                a[q][p] = a[p][q];
            }
        }

        let mut v = [[R::ZERO; N]; N];
        for (i, row) in v.iter_mut().enumerate() {
            row[i] = R::ONE;
        }

        let scale = a
            .iter()
            .flatten()
            .fold(R::ONE, |acc, &x| Real::max(acc, x.abs()));
        let threshold = self.tolerance * scale;
        let large_theta = R::from_f64(LARGE_THETA);

        let mut sweeps = 0;
        while sweeps < self.max_sweeps && !off_diagonal_below(&a, threshold) {
            sweeps += 1;
            for p in 0..N {
                for q in p + 1..N {
                    let apq = a[p][q];
                    if apq.abs() <= threshold {
                        continue;
                    }

                    let diff = a[q][q] - a[p][p];
                    let two_apq = R::TWO * apq;
                    let t = if diff.abs() > large_theta * two_apq.abs() {
                        apq / diff
                    } else {
                        let theta = diff / two_apq;
                        let sign = if theta < R::ZERO { -R::ONE } else { R::ONE };
                        sign / (theta.abs() + (theta * theta + R::ONE).sqrt())
                    };
                    let c = R::ONE / (t * t + R::ONE).sqrt();
                    let s = t * c;

                    a[p][p] -= t * apq;
                    a[q][q] += t * apq;
                    a[p][q] = R::ZERO;
                    a[q][p] = R::ZERO;

                    for r in 0..N {
                        if r != p && r != q {
                            let arp = a[r][p];
                            let arq = a[r][q];
                            a[r][p] = c * arp - s * arq;
                            a[p][r] = a[r][p];
                            a[r][q] = s * arp + c * arq;
                            a[q][r] = a[r][q];
                        }
                    }

                    for row in v.iter_mut() {
                        let vrp = row[p];
                        let vrq = row[q];
                        row[p] = c * vrp - s * vrq;
                        row[q] = s * vrp + c * vrq;
                    }
                }
            }
        }
        trace!(n = N, sweeps, "jacobi eigen solve");

        let mut values = [R::ZERO; N];
        for (i, d) in values.iter_mut().enumerate() {
            *d = a[i][i];
        }

        // Selection sort; every swap flips the determinant's sign.
        let mut odd_swaps = false;
        for i in 0..N {
            let mut min = i;
            for j in i + 1..N {
                if values[j] < values[min] {
                    min = j;
                }
            }
            if min != i {
                values.swap(i, min);
                for row in v.iter_mut() {
                    row.swap(i, min);
                }
                odd_swaps = !odd_swaps;
            }
        }

        if odd_swaps {
            for row in v.iter_mut() {
                row[0] = -row[0];
            }
        }

        (v, values)
    }
}

fn off_diagonal_below<R: Real, const N: usize>(a: &[[R; N]; N], threshold: R) -> bool {
    (0..N).all(|p| (p + 1..N).all(|q| a[p][q].abs() <= threshold))
}
