//! Uniform grids and boundary conditions.

use fcs_core::{ensure, errors::Result, Real, Size};

use crate::comparison;

/// A uniform grid of `n` intervals on `[a, b]`, with knots `a + i·h`,
/// `i = 0..=n`, where `h = (b - a) / n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    a: Real,
    b: Real,
    n: Size,
    h: Real,
}

impl Grid {
    /// Build a grid on `[a, b]` with `n` intervals.
    ///
    /// # Errors
    /// Returns a configuration error if the bounds are not finite, if
    /// `a >= b`, if `n < 2` (the interior spline system would be empty), or
    /// if the step `h` overflows or underflows to zero.
    pub fn new(a: Real, b: Real, n: Size) -> Result<Self> {
        ensure!(
            a.is_finite() && b.is_finite(),
            "grid bounds must be finite, got [{a}, {b}]"
        );
        ensure!(a < b, "grid lower bound {a} must be below upper bound {b}");
        ensure!(n >= 2, "grid too coarse: need at least 2 intervals, got {n}");
        let h = (b - a) / n as Real;
        ensure!(
            h.is_finite() && h > 0.0,
            "grid step on [{a}, {b}] with {n} intervals is not a positive finite number: {h}"
        );
        Ok(Self { a, b, n, h })
    }

    /// Build the grid implied by `len` samples on `[a, b]` (`n = len - 1`).
    pub fn from_samples(a: Real, b: Real, len: Size) -> Result<Self> {
        ensure!(
            len >= 3,
            "grid too coarse: need at least 3 samples, got {len}"
        );
        Self::new(a, b, len - 1)
    }

    /// Build the grid implied by a coefficient array of `len` entries
    /// (`n = len - 3`).
    pub fn from_coefficients(a: Real, b: Real, len: Size) -> Result<Self> {
        ensure!(
            len >= 5,
            "grid too coarse: need at least 5 coefficients, got {len}"
        );
        Self::new(a, b, len - 3)
    }

    /// Lower bound `a`.
    #[inline]
    pub fn lower(&self) -> Real {
        self.a
    }

    /// Upper bound `b`.
    #[inline]
    pub fn upper(&self) -> Real {
        self.b
    }

    /// Number of intervals `n`.
    #[inline]
    pub fn intervals(&self) -> Size {
        self.n
    }

    /// Number of knots, `n + 1`; also the required sample count.
    #[inline]
    pub fn sample_len(&self) -> Size {
        self.n + 1
    }

    /// Number of coefficients, `n + 3`.
    #[inline]
    pub fn coefficient_len(&self) -> Size {
        self.n + 3
    }

    /// Knot spacing `h`.
    #[inline]
    pub fn step(&self) -> Real {
        self.h
    }

    /// The `i`-th knot, `a + i·h`.
    #[inline]
    pub fn knot(&self, i: Size) -> Real {
        self.a + i as Real * self.h
    }

    /// All `n + 1` knots.
    pub fn knots(&self) -> impl ExactSizeIterator<Item = Real> + '_ {
        (0..self.n + 1).map(move |i| self.knot(i))
    }

    /// Whether `x` lies in `[a, b]`, up to round-off at the ends.
    #[inline]
    pub fn contains(&self, x: Real) -> bool {
        comparison::within(x, self.a, self.b)
    }

    /// Continuous index `t = (x - a) / h`.
    #[inline]
    pub(crate) fn position(&self, x: Real) -> Real {
        (x - self.a) / self.h
    }
}

/// Prescribed second derivatives `(alpha, beta)` of the interpolant at `a`
/// and `b`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundaryCondition {
    /// `f''(a)`.
    pub alpha: Real,
    /// `f''(b)`.
    pub beta: Real,
}

impl BoundaryCondition {
    /// `f''(a) = alpha`, `f''(b) = beta`.
    pub const fn new(alpha: Real, beta: Real) -> Self {
        Self { alpha, beta }
    }

    /// The natural spline: zero curvature at both ends.
    pub const fn natural() -> Self {
        Self::new(0.0, 0.0)
    }
}
