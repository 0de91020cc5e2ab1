//! Floating-point comparison utilities.

use fcs_core::Real;

/// Default epsilon for close-enough comparisons.
pub const EPSILON: Real = 1e-10;

/// Return `true` if `|a - b| <= epsilon`.
#[inline]
pub fn close(a: Real, b: Real, epsilon: Real) -> bool {
    (a - b).abs() <= epsilon
}

/// Return `true` if `x` lies in `[lower, upper]`, or within a slack of
/// either end that is relative to the interval: `EPSILON` times its width,
/// and never less than a few ulps of the larger bound.
///
/// Knots recomputed as `a + i·h` can land a few ulps past `b`; this keeps
/// them inside the domain without widening a narrow one.
#[inline]
pub fn within(x: Real, lower: Real, upper: Real) -> bool {
    let ulps = 4.0 * Real::EPSILON * lower.abs().max(upper.abs());
    let slack = (EPSILON * (upper - lower)).max(ulps);
    (x >= lower && x <= upper) || close(x, lower, slack) || close(x, upper, slack)
}
