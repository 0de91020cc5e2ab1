//! # fcs-math
//!
//! The numeric core of fast-cubic-spline: a tridiagonal (Thomas) solver,
//! uniform grids, and cubic B-spline coefficient construction and
//! evaluation in one and two dimensions.
//!
//! Data flows leaf-first:
//!
//! * samples → [`CoefficientSolver`] → [`CoefficientArray`] → evaluate
//! * 2D samples → axis-1 pass → [`CoefficientGrid1D`] → axis-2 pass →
//!   [`CoefficientGrid2D`] → evaluate

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Tridiagonal linear systems.
pub mod banded;

/// Floating-point comparison utilities.
pub mod comparison;

/// Uniform grids and boundary conditions.
pub mod grid;

/// Cubic B-spline interpolants.
pub mod interpolations;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use banded::TridiagonalOperator;
pub use comparison::close;
pub use grid::{BoundaryCondition, Grid};
pub use interpolations::{
    BicubicSpline2D, CoefficientArray, CoefficientGrid1D, CoefficientGrid2D, CoefficientSolver,
    CubicSpline1D, Interpolation1D, Interpolation2D, SampleGrid2D,
};
