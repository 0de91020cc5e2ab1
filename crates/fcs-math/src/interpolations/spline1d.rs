//! One-dimensional uniform cubic B-spline: coefficient construction and
//! constant-time evaluation.
//!
//! For `n` intervals the spline carries `n + 3` coefficients.  Entries
//! `1..=n+1` belong to the knots; entries `0` and `n+2` are phantoms that
//! exist only to pin the boundary curvature.  Construction is
//!
//! 1. seed `c[1]` and `c[n+1]` in closed form from the end samples and the
//!    prescribed second derivatives,
//! 2. solve the `(n-1)`-row `1, 4, 1` system for `c[2..=n]`,
//! 3. recover the phantoms from the second-derivative identity.
//!
//! Evaluation touches exactly four coefficients whatever the grid size.

use fcs_core::{ensure_len, errors::Result, Extrapolation, Real, SplineSettings};
use tracing::debug;

use super::basis::{self, Window};
use super::Interpolation1D;
use crate::banded::TridiagonalOperator;
use crate::grid::{BoundaryCondition, Grid};

// ── Coefficients ──────────────────────────────────────────────────────────────

/// The `n + 3` spline coefficients of a 1D interpolant, phantoms included.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientArray(Vec<Real>);

impl CoefficientArray {
    /// Wrap raw coefficients built for `grid`.
    ///
    /// # Errors
    /// A dimension mismatch unless `values.len() == n + 3`.
    pub fn from_vec(grid: &Grid, values: Vec<Real>) -> Result<Self> {
        ensure_len!("coefficients", values.len(), grid.coefficient_len());
        Ok(Self(values))
    }

    /// Number of coefficients (`n + 3`).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: a valid array holds at least five coefficients.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The coefficients as a slice.
    pub fn as_slice(&self) -> &[Real] {
        &self.0
    }

    /// Consume and return the coefficients.
    pub fn into_vec(self) -> Vec<Real> {
        self.0
    }

    /// The phantom coefficient below `a` (stored index 0).
    pub fn phantom_lower(&self) -> Real {
        self.0[0]
    }

    /// The phantom coefficient above `b` (stored index `n + 2`).
    pub fn phantom_upper(&self) -> Real {
        self.0[self.0.len() - 1]
    }

    /// The second derivatives at `a` and `b` implied by these coefficients.
    pub fn boundary_curvature(&self, grid: &Grid) -> BoundaryCondition {
        let c = &self.0;
        let m = c.len();
        let k = 6.0 / (grid.step() * grid.step());
        BoundaryCondition::new(
            k * (c[0] - 2.0 * c[1] + c[2]),
            k * (c[m - 3] - 2.0 * c[m - 2] + c[m - 1]),
        )
    }
}

impl AsRef<[Real]> for CoefficientArray {
    fn as_ref(&self) -> &[Real] {
        &self.0
    }
}

// ── Solver ────────────────────────────────────────────────────────────────────

/// Turns samples on a fixed grid into spline coefficients.
///
/// The interior operator is built once, so one solver can be reused for
/// every line of a 2D pass.
#[derive(Debug, Clone)]
pub struct CoefficientSolver {
    grid: Grid,
    boundary: BoundaryCondition,
    interior: TridiagonalOperator,
}

impl CoefficientSolver {
    /// A solver for `grid` with prescribed end curvature `boundary`.
    pub fn new(grid: Grid, boundary: BoundaryCondition) -> Result<Self> {
        let interior = TridiagonalOperator::spline_system(grid.intervals() - 1)?;
        Ok(Self {
            grid,
            boundary,
            interior,
        })
    }

    /// The grid this solver was built for.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The boundary condition this solver encodes.
    pub fn boundary(&self) -> BoundaryCondition {
        self.boundary
    }

    /// Solve for a freshly allocated coefficient array.
    pub fn solve(&self, samples: &[Real]) -> Result<CoefficientArray> {
        let mut c = vec![0.0; self.grid.coefficient_len()];
        self.solve_into(samples, &mut c)?;
        Ok(CoefficientArray(c))
    }

    /// Solve into a caller-owned buffer of length `n + 3`.
    ///
    /// The caller keeps ownership of `out`; every entry is overwritten.
    ///
    /// # Errors
    /// A dimension mismatch if `samples.len() != n + 1` or
    /// `out.len() != n + 3`, reported before `out` is touched.
    pub fn solve_into(&self, samples: &[Real], out: &mut [Real]) -> Result<()> {
        let n = self.grid.intervals();
        ensure_len!("samples", samples.len(), self.grid.sample_len());
        ensure_len!("coefficient buffer", out.len(), self.grid.coefficient_len());

        let h2 = self.grid.step() * self.grid.step();
        let lower = self.boundary.alpha * h2 / 6.0;
        let upper = self.boundary.beta * h2 / 6.0;

        let first = (samples[0] - lower) / 6.0;
        let last = (samples[n] - upper) / 6.0;

        let interior = &mut out[2..=n];
        interior.copy_from_slice(&samples[1..n]);
        interior[0] -= first;
        interior[n - 2] -= last;
        self.interior.solve_in_place(interior)?;

        out[1] = first;
        out[n + 1] = last;
        out[0] = lower + 2.0 * out[1] - out[2];
        out[n + 2] = upper + 2.0 * out[n + 1] - out[n];
        Ok(())
    }
}

// ── Evaluation ────────────────────────────────────────────────────────────────

/// Blend the four coefficients of `window`.
#[inline]
pub(crate) fn blend(coefficients: &[Real], window: Window) -> Real {
    let w = window.weights();
    let c = &coefficients[window.start..window.start + 4];
    w[0] * c[0] + w[1] * c[1] + w[2] * c[2] + w[3] * c[3]
}

/// Evaluate the spline with `coefficients` on `grid` at `x`.
///
/// # Errors
/// A dimension mismatch unless `coefficients.len() == n + 3`; an
/// out-of-domain error only under [`Extrapolation::Error`].
pub fn evaluate(grid: &Grid, coefficients: &[Real], x: Real, policy: Extrapolation) -> Result<Real> {
    ensure_len!("coefficients", coefficients.len(), grid.coefficient_len());
    let window = Window::locate(grid, x, policy)?;
    Ok(blend(coefficients, window))
}

// ── Interpolant ───────────────────────────────────────────────────────────────

/// A built 1D spline: grid, coefficients, and settings.
///
/// Immutable once built; share it freely across threads and rebuild to
/// change the samples.
#[derive(Debug, Clone)]
pub struct CubicSpline1D {
    grid: Grid,
    coefficients: CoefficientArray,
    settings: SplineSettings,
}

impl CubicSpline1D {
    /// Interpolate `samples` on `grid` with default settings.
    pub fn new(grid: Grid, samples: &[Real], boundary: BoundaryCondition) -> Result<Self> {
        Self::with_settings(grid, samples, boundary, SplineSettings::default())
    }

    /// Interpolate `samples` on `grid` with explicit settings.
    pub fn with_settings(
        grid: Grid,
        samples: &[Real],
        boundary: BoundaryCondition,
        settings: SplineSettings,
    ) -> Result<Self> {
        let coefficients = CoefficientSolver::new(grid, boundary)?.solve(samples)?;
        debug!(
            intervals = grid.intervals(),
            alpha = boundary.alpha,
            beta = boundary.beta,
            "built 1D spline coefficients"
        );
        Ok(Self {
            grid,
            coefficients,
            settings,
        })
    }

    /// Wrap precomputed coefficients.
    pub fn from_coefficients(
        grid: Grid,
        coefficients: CoefficientArray,
        settings: SplineSettings,
    ) -> Result<Self> {
        ensure_len!("coefficients", coefficients.len(), grid.coefficient_len());
        Ok(Self {
            grid,
            coefficients,
            settings,
        })
    }

    /// The grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The coefficients.
    pub fn coefficients(&self) -> &CoefficientArray {
        &self.coefficients
    }

    /// The settings.
    pub fn settings(&self) -> &SplineSettings {
        &self.settings
    }

    /// Evaluate at `x`, honouring the extrapolation policy.
    pub fn try_value(&self, x: Real) -> Result<Real> {
        let window = Window::locate(&self.grid, x, self.settings.extrapolation())?;
        Ok(blend(self.coefficients.as_slice(), window))
    }

    /// Evaluate at `x`; `NaN` for a rejected out-of-domain query.
    pub fn value(&self, x: Real) -> Real {
        self.try_value(x).unwrap_or(Real::NAN)
    }
}

impl Interpolation1D for CubicSpline1D {
    fn operator(&self, x: Real) -> Real {
        self.value(x)
    }

    fn x_min(&self) -> Real {
        self.grid.lower()
    }

    fn x_max(&self) -> Real {
        self.grid.upper()
    }

    /// Agrees with [`CubicSpline1D::try_value`] under
    /// [`Extrapolation::Error`], including its round-off slack at the ends.
    fn is_in_range(&self, x: Real) -> bool {
        self.grid.contains(x)
    }
}
