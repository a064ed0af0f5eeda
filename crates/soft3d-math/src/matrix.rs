//! Shared square-matrix machinery for [`Mat2`](crate::Mat2),
//! [`Mat3`](crate::Mat3) and [`Mat4`](crate::Mat4).
//!
//! # Convention
//!
//! Matrices are stored **row-major** in a flat array of `N*N` entries; entry
//! `(r, c)` lives at index `c + N*r`. Vectors multiply as **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//! ```
//!
//! `v * M` treats `v` as a row vector and computes `vᵀM`.
//!
//! Construction from raw data never guesses the layout: callers pass a
//! [`Layout`] for flat arrays and a [`VectorLayout`] for vector sets.
//!
//! # Singular matrices
//!
//! When `|det| <= ZERO_TOLERANCE`, `inverse()` returns the zero matrix and
//! `checked_inverse()` returns `None`. The threshold is absolute, so a
//! uniformly small matrix counts as singular: `Mat4d::IDENTITY * 0.01` has
//! determinant `1e-8` and inverts to zero. Scale such matrices up first.
//! The same result is returned when the inverse has an entry beyond the
//! backing's range.
//!
//! # Range
//!
//! The cofactor expansion of an `N×N` matrix whose largest entry is `a`
//! stays below `N! aᴺ`. When that bound exceeds `MAX_REAL` (a `Fixed`
//! matrix with entries in the hundreds), `determinant`, `adjoint` and
//! `inverse` work on `self / a` and rescale, so no intermediate product
//! overflows. A determinant or adjoint beyond the backing's range saturates
//! to `±MAX_REAL`; for such matrices the singularity test applies to the
//! determinant of `self / a`.

/// Ordering of a flat array of matrix entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    /// Consecutive entries walk along a row.
    RowMajor,
    /// Consecutive entries walk down a column.
    ColumnMajor,
}

/// Whether a set of vectors supplies a matrix's columns or its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VectorLayout {
    /// Vector `i` becomes column `i`.
    Columns,
    /// Vector `i` becomes row `i`.
    Rows,
}

/// Generates the size-independent matrix surface. The invoking module
/// supplies `IDENTITY` and the raw cofactor expansions `expand_determinant`
/// and `expand_adjoint`.
macro_rules! impl_matrix {
    ($M:ident, $V:ident, $n:literal, $nn:literal) => {
        impl<R: Real> $M<R> {
            /// All entries zero.
            pub const ZERO: Self = Self { m: [R::ZERO; $nn] };

            /// The zero matrix.
            #[inline]
            pub fn zero() -> Self {
                Self::ZERO
            }

            /// The identity matrix.
            #[inline]
            pub fn identity() -> Self {
                Self::IDENTITY
            }

            /// Creates a matrix from a flat array of entries in the given
            /// layout.
            ///
            /// # Panics
            ///
            /// Panics if `s` holds fewer than `N*N` entries.
            pub fn from_slice(s: &[R], layout: Layout) -> Self {
                let mut m = [R::ZERO; $nn];
                m.copy_from_slice(&s[..$nn]);
                let out = Self { m };
                match layout {
                    Layout::RowMajor => out,
                    Layout::ColumnMajor => out.transpose(),
                }
            }

            /// Creates a matrix whose columns or rows are the given vectors.
            pub fn from_vectors(vectors: [$V<R>; $n], layout: VectorLayout) -> Self {
                let mut out = Self::ZERO;
                for (i, v) in vectors.into_iter().enumerate() {
                    match layout {
                        VectorLayout::Rows => out.set_row(i, v),
                        VectorLayout::Columns => out.set_column(i, v),
                    }
                }
                out
            }

            /// Diagonal matrix with `d` on the diagonal.
            pub fn diagonal(d: $V<R>) -> Self {
                let mut out = Self::ZERO;
                for i in 0..$n {
                    out.m[i * $n + i] = d[i];
                }
                out
            }

            /// Outer product `u vᵀ`.
            pub fn tensor_product(u: $V<R>, v: $V<R>) -> Self {
                let mut out = Self::ZERO;
                for r in 0..$n {
                    for c in 0..$n {
                        out.m[r * $n + c] = u[r] * v[c];
                    }
                }
                out
            }

            /// Row `r`.
            #[inline]
            pub fn row(&self, r: usize) -> $V<R> {
                $V::from_slice(self.row_slice(r))
            }

            /// Replaces row `r`.
            #[inline]
            pub fn set_row(&mut self, r: usize, v: $V<R>) {
                self.m[r * $n..(r + 1) * $n].copy_from_slice(&v.to_array());
            }

            /// Column `c`.
            #[inline]
            pub fn column(&self, c: usize) -> $V<R> {
                let mut v = $V::ZERO;
                for r in 0..$n {
                    v[r] = self.m[r * $n + c];
                }
                v
            }

            /// Replaces column `c`.
            #[inline]
            pub fn set_column(&mut self, c: usize, v: $V<R>) {
                for r in 0..$n {
                    self.m[r * $n + c] = v[r];
                }
            }

            /// Entries in column-major order.
            #[inline]
            pub fn to_column_major(&self) -> [R; $nn] {
                self.transpose().m
            }

            /// Entries in row-major order.
            #[inline]
            pub fn as_slice(&self) -> &[R] {
                &self.m
            }

            /// Mutable entries in row-major order.
            #[inline]
            pub fn as_mut_slice(&mut self) -> &mut [R] {
                &mut self.m
            }

            /// The entries of row `r`.
            #[inline]
            pub fn row_slice(&self, r: usize) -> &[R] {
                &self.m[r * $n..(r + 1) * $n]
            }

            /// Transpose. Pure reordering, exact for every backing.
            pub fn transpose(&self) -> Self {
                let mut out = Self::ZERO;
                for r in 0..$n {
                    for c in 0..$n {
                        out.m[c * $n + r] = self.m[r * $n + c];
                    }
                }
                out
            }

            /// `selfᵀ * rhs`.
            pub fn transpose_times(&self, rhs: &Self) -> Self {
                let mut out = Self::ZERO;
                for r in 0..$n {
                    for c in 0..$n {
                        let mut sum = R::ZERO;
                        for k in 0..$n {
                            sum += self.m[k * $n + r] * rhs.m[k * $n + c];
                        }
                        out.m[r * $n + c] = sum;
                    }
                }
                out
            }

            /// `self * rhsᵀ`.
            pub fn times_transpose(&self, rhs: &Self) -> Self {
                let mut out = Self::ZERO;
                for r in 0..$n {
                    for c in 0..$n {
                        let mut sum = R::ZERO;
                        for k in 0..$n {
                            sum += self.m[r * $n + k] * rhs.m[c * $n + k];
                        }
                        out.m[r * $n + c] = sum;
                    }
                }
                out
            }

            /// Largest absolute entry.
            pub fn max_abs(&self) -> R {
                self.m.iter().fold(R::ZERO, |acc, e| Real::max(acc, Real::abs(*e)))
            }

            // Whether the cofactor expansion of a matrix with largest entry
            // `big` stays inside the backing's range.
            fn expansion_fits(big: R) -> bool {
                let bound = (1..=$n).product::<u32>() as f64;
                bound * big.to_f64().powi($n) <= R::MAX_REAL.to_f64()
            }

            /// Determinant.
            pub fn determinant(&self) -> R {
                let big = self.max_abs();
                if Self::expansion_fits(big) {
                    return self.expand_determinant();
                }
                let scaled = (*self / big).expand_determinant();
                R::from_f64(scaled.to_f64() * big.to_f64().powi($n))
            }

            /// Adjugate (transposed cofactor matrix): `det * inverse`
            /// without the division.
            pub fn adjoint(&self) -> Self {
                let big = self.max_abs();
                if Self::expansion_fits(big) {
                    return self.expand_adjoint();
                }
                let scale = big.to_f64().powi($n - 1);
                let mut out = (*self / big).expand_adjoint();
                for e in &mut out.m {
                    *e = R::from_f64(e.to_f64() * scale);
                }
                out
            }

            /// Inverse, or `None` when `|det| <= ZERO_TOLERANCE` or the
            /// inverse is not representable.
            pub fn checked_inverse(&self) -> Option<Self> {
                let big = self.max_abs();
                if Self::expansion_fits(big) {
                    return self.expansion_inverse();
                }
                tracing::trace!(matrix = stringify!($M), "inverting rescaled matrix");
                (*self / big).expansion_inverse().map(|inv| inv / big)
            }

            fn expansion_inverse(&self) -> Option<Self> {
                let det = self.expand_determinant();
                if !det.is_finite() || det.abs() <= R::ZERO_TOLERANCE {
                    return None;
                }
                let adj = self.expand_adjoint();
                if adj.max_abs().to_f64() / det.abs().to_f64() >= R::MAX_REAL.to_f64() {
                    return None;
                }
                Some(adj / det)
            }

            /// Inverse, or the zero matrix when `checked_inverse` fails.
            pub fn inverse(&self) -> Self {
                match self.checked_inverse() {
                    Some(inv) => inv,
                    None => {
                        tracing::debug!(matrix = stringify!($M), "singular matrix, inverse is zero");
                        Self::ZERO
                    }
                }
            }

            /// Quadratic form `uᵀ * self * v`.
            #[inline]
            pub fn qform(&self, u: $V<R>, v: $V<R>) -> R {
                u.dot(*self * v)
            }

            /// Lexicographic total order over the row-major entries.
            pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.m
                    .iter()
                    .zip(other.m.iter())
                    .map(|(a, b)| Real::total_cmp(a, b))
                    .find(|o| *o != std::cmp::Ordering::Equal)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }
        }

        impl<R: Real> std::ops::Index<(usize, usize)> for $M<R> {
            type Output = R;

            #[inline]
            fn index(&self, (r, c): (usize, usize)) -> &R {
                assert!(r < $n && c < $n, "{} index out of bounds: ({}, {})", stringify!($M), r, c);
                &self.m[c + $n * r]
            }
        }

        impl<R: Real> std::ops::IndexMut<(usize, usize)> for $M<R> {
            #[inline]
            fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut R {
                assert!(r < $n && c < $n, "{} index out of bounds: ({}, {})", stringify!($M), r, c);
                &mut self.m[c + $n * r]
            }
        }

        impl<R: Real> std::ops::Add for $M<R> {
            type Output = Self;

            #[inline]
            fn add(mut self, rhs: Self) -> Self {
                self += rhs;
                self
            }
        }

        impl<R: Real> std::ops::Sub for $M<R> {
            type Output = Self;

            #[inline]
            fn sub(mut self, rhs: Self) -> Self {
                self -= rhs;
                self
            }
        }

        impl<R: Real> std::ops::Neg for $M<R> {
            type Output = Self;

            #[inline]
            fn neg(mut self) -> Self {
                for e in &mut self.m {
                    *e = -*e;
                }
                self
            }
        }

        impl<R: Real> std::ops::Mul<R> for $M<R> {
            type Output = Self;

            #[inline]
            fn mul(mut self, rhs: R) -> Self {
                self *= rhs;
                self
            }
        }

        impl<R: Real> std::ops::Div<R> for $M<R> {
            type Output = Self;

            #[inline]
            fn div(mut self, rhs: R) -> Self {
                self /= rhs;
                self
            }
        }

        impl<R: Real> std::ops::AddAssign for $M<R> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                for (a, b) in self.m.iter_mut().zip(rhs.m) {
                    *a += b;
                }
            }
        }

        impl<R: Real> std::ops::SubAssign for $M<R> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                for (a, b) in self.m.iter_mut().zip(rhs.m) {
                    *a -= b;
                }
            }
        }

        impl<R: Real> std::ops::MulAssign<R> for $M<R> {
            #[inline]
            fn mul_assign(&mut self, rhs: R) {
                for e in &mut self.m {
                    *e *= rhs;
                }
            }
        }

        impl<R: Real> std::ops::DivAssign<R> for $M<R> {
            #[inline]
            fn div_assign(&mut self, rhs: R) {
                for e in &mut self.m {
                    *e /= rhs;
                }
            }
        }

        impl<R: Real> std::ops::MulAssign for $M<R> {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        // M * M
        impl<R: Real> std::ops::Mul for $M<R> {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                let mut out = Self::ZERO;
                for r in 0..$n {
                    for c in 0..$n {
                        let mut sum = R::ZERO;
                        for k in 0..$n {
                            sum += self.m[r * $n + k] * rhs.m[k * $n + c];
                        }
                        out.m[r * $n + c] = sum;
                    }
                }
                out
            }
        }

        // M * v (column vector)
        impl<R: Real> std::ops::Mul<$V<R>> for $M<R> {
            type Output = $V<R>;

            fn mul(self, v: $V<R>) -> $V<R> {
                let mut out = $V::ZERO;
                for r in 0..$n {
                    let mut sum = R::ZERO;
                    for c in 0..$n {
                        sum += self.m[r * $n + c] * v[c];
                    }
                    out[r] = sum;
                }
                out
            }
        }

        // v * M (row vector)
        impl<R: Real> std::ops::Mul<$M<R>> for $V<R> {
            type Output = $V<R>;

            fn mul(self, m: $M<R>) -> $V<R> {
                let mut out = $V::ZERO;
                for c in 0..$n {
                    let mut sum = R::ZERO;
                    for r in 0..$n {
                        sum += self[r] * m.m[r * $n + c];
                    }
                    out[c] = sum;
                }
                out
            }
        }

        impl<R: Real + soft3d_core::StreamElement> soft3d_core::StreamElement for $M<R> {
            const SIZE: usize = $nn * R::SIZE;

            fn write_to<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
                for e in &self.m {
                    soft3d_core::StreamElement::write_to(e, writer)?;
                }
                Ok(())
            }

            fn read_from<Rd: std::io::Read>(reader: &mut Rd) -> std::io::Result<Self> {
                let mut m = [R::ZERO; $nn];
                for e in &mut m {
                    *e = <R as soft3d_core::StreamElement>::read_from(reader)?;
                }
                Ok(Self { m })
            }
        }

        $crate::matrix::impl_scalar_mul!($M, f32);
        $crate::matrix::impl_scalar_mul!($M, f64);
        $crate::matrix::impl_scalar_mul!($M, ::fixed::types::I32F32);
    };
}

pub(crate) use crate::vector::impl_scalar_mul;
pub(crate) use impl_matrix;
