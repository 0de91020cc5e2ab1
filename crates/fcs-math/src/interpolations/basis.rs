//! The uniform cubic B-spline basis shared by both evaluators.
//!
//! Coefficients are stored on the scale fixed by the boundary seeding
//! `c[1] = (y[0] - alpha·h²/6) / 6`, so the four weights below sum to 6 and
//! a knot value is `c[k] + 4·c[k+1] + c[k+2]`.  Divided by 6 they are the
//! usual non-negative partition of unity.

use fcs_core::{Error, Extrapolation, Real, Result, Size};
use tracing::trace;

use crate::grid::Grid;

/// The four basis weights at fractional offset `u`:
///
/// `(1-u)³`, `3u³ - 6u² + 4`, `-3u³ + 3u² + 3u + 1`, `u³`.
#[inline]
pub fn weights(u: Real) -> [Real; 4] {
    let v = 1.0 - u;
    let u2 = u * u;
    let u3 = u2 * u;
    [
        v * v * v,
        3.0 * u3 - 6.0 * u2 + 4.0,
        -3.0 * u3 + 3.0 * u2 + 3.0 * u + 1.0,
        u3,
    ]
}

/// The local coefficient window for one query coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// Index of the first of the four stored coefficients touched.
    pub start: Size,
    /// Offset inside the segment; in `[0, 1]` on the domain, outside it
    /// when extrapolating.
    pub u: Real,
}

impl Window {
    /// Locate `x` on `grid` under the given out-of-domain policy.
    ///
    /// The segment index is `floor((x - a) / h)` clamped to `0..n`, so a
    /// query past either end keeps using the boundary segment's cubic.
    pub fn locate(grid: &Grid, x: Real, policy: Extrapolation) -> Result<Self> {
        let x = if grid.contains(x) {
            x
        } else {
            match policy {
                Extrapolation::Extrapolate => {
                    trace!(x, lower = grid.lower(), upper = grid.upper(), "extrapolating");
                    x
                }
                Extrapolation::Clamp => {
                    trace!(x, lower = grid.lower(), upper = grid.upper(), "clamping");
                    x.clamp(grid.lower(), grid.upper())
                }
                Extrapolation::Error => {
                    return Err(Error::OutOfDomain {
                        value: x,
                        lower: grid.lower(),
                        upper: grid.upper(),
                    })
                }
            }
        };
        let t = grid.position(x);
        let last = (grid.intervals() - 1) as Real;
        let i = t.floor().clamp(0.0, last);
        Ok(Self {
            start: i as Size,
            u: t - i,
        })
    }

    /// The four basis weights for this window.
    #[inline]
    pub fn weights(&self) -> [Real; 4] {
        weights(self.u)
    }
}
