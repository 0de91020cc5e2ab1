//! # fast-cubic-spline
//!
//! Cubic B-spline interpolation of functions sampled on uniform 1D and 2D
//! grids, with evaluation that touches a fixed handful of coefficients
//! whatever the grid size.
//!
//! This crate is a **façade**: it re-exports the workspace crates and adds
//! the flat functional surface
//!
//! * [`solve_coefficients`] / [`solve_coefficients_into`] — samples to
//!   `n + 3` coefficients, allocating or into a caller-owned buffer,
//! * [`solve_coefficients_2d`] — the two-pass tensor-product build,
//! * [`evaluate_1d`] / [`evaluate_2d`] — point evaluation.
//!
//! ## Quick start
//!
//! ```rust
//! use fast_cubic_spline::{evaluate_1d, solve_coefficients, BoundaryCondition};
//!
//! // x² sampled on [-1, 1] with four intervals.
//! let samples = [1.0, 0.25, 0.0, 0.25, 1.0];
//! let c = solve_coefficients(-1.0, 1.0, &samples, BoundaryCondition::natural()).unwrap();
//! let y = evaluate_1d(0.5, -1.0, 1.0, c.as_slice()).unwrap();
//! assert!((y - 0.25).abs() < 1e-6);
//! ```
//!
//! Queries outside `[a, b]` extrapolate the boundary segment's cubic.  Use
//! [`CubicSpline1D::with_settings`] with [`Extrapolation::Clamp`] or
//! [`Extrapolation::Error`] for another policy.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, settings, and error definitions.
pub use fcs_core as core;

/// Banded solver, grids, and the spline interpolants.
pub use fcs_math as math;

pub use fcs_core::{Error, Extrapolation, Real, Result, SplineSettings};
pub use fcs_math::{
    BicubicSpline2D, BoundaryCondition, CoefficientArray, CoefficientGrid1D, CoefficientGrid2D,
    CoefficientSolver, CubicSpline1D, Grid, Interpolation1D, Interpolation2D, SampleGrid2D,
    TridiagonalOperator,
};

use fcs_math::interpolations::{spline1d, spline2d};

/// Spline coefficients for `samples` taken at the `n + 1` uniform knots of
/// `[a, b]` (`n = samples.len() - 1`).
///
/// # Errors
/// [`Error::Configuration`] if `a >= b` or fewer than three samples are
/// given.
pub fn solve_coefficients(
    a: Real,
    b: Real,
    samples: &[Real],
    boundary: BoundaryCondition,
) -> Result<CoefficientArray> {
    let grid = Grid::from_samples(a, b, samples.len())?;
    CoefficientSolver::new(grid, boundary)?.solve(samples)
}

/// Like [`solve_coefficients`] but writes into `out`, which must hold
/// `samples.len() + 2` values.  The caller keeps ownership of `out`.
///
/// # Errors
/// As [`solve_coefficients`], plus [`Error::DimensionMismatch`] for a
/// wrongly sized `out`; nothing is written in either case.
pub fn solve_coefficients_into(
    a: Real,
    b: Real,
    samples: &[Real],
    boundary: BoundaryCondition,
    out: &mut [Real],
) -> Result<()> {
    let grid = Grid::from_samples(a, b, samples.len())?;
    CoefficientSolver::new(grid, boundary)?.solve_into(samples, out)
}

/// Padded 2D coefficient grid for `samples[(i, j)] = f(x_i, z_j)` on
/// `[a1, b1] × [a2, b2]`, natural boundaries on both axes.
pub fn solve_coefficients_2d(
    a1: Real,
    b1: Real,
    a2: Real,
    b2: Real,
    samples: &SampleGrid2D,
) -> Result<CoefficientGrid2D> {
    let (rows, cols) = samples.shape();
    let grid_x = Grid::from_samples(a1, b1, rows)?;
    let grid_z = Grid::from_samples(a2, b2, cols)?;
    let natural = BoundaryCondition::natural();
    spline2d::solve(
        &grid_x,
        &grid_z,
        natural,
        natural,
        samples,
        &SplineSettings::default(),
    )
}

/// Evaluate the 1D spline with `coefficients` (length `n + 3`) on `[a, b]`
/// at `x`, extrapolating outside the domain.
pub fn evaluate_1d(x: Real, a: Real, b: Real, coefficients: &[Real]) -> Result<Real> {
    let grid = Grid::from_coefficients(a, b, coefficients.len())?;
    spline1d::evaluate(&grid, coefficients, x, Extrapolation::Extrapolate)
}

/// Evaluate the 2D spline at `(x, z)`.  `coefficients` must have been built
/// with the x grid `[a1, b1]` on axis 1 and the z grid `[a2, b2]` on axis 2.
pub fn evaluate_2d(
    x: Real,
    z: Real,
    a1: Real,
    b1: Real,
    a2: Real,
    b2: Real,
    coefficients: &CoefficientGrid2D,
) -> Result<Real> {
    let (rows, cols) = coefficients.shape();
    let grid_x = Grid::from_coefficients(a1, b1, rows)?;
    let grid_z = Grid::from_coefficients(a2, b2, cols)?;
    spline2d::evaluate(
        &grid_x,
        &grid_z,
        coefficients,
        x,
        z,
        Extrapolation::Extrapolate,
    )
}
