//! Interpolation traits and the uniform cubic B-spline interpolants.

use fcs_core::Real;

/// Cubic basis weights and coefficient-window location.
pub mod basis;

/// 1D coefficient solver, evaluator, and interpolant.
pub mod spline1d;

/// 2D two-pass coefficient construction, evaluator, and interpolant.
pub mod spline2d;

pub use spline1d::{CoefficientArray, CoefficientSolver, CubicSpline1D};
pub use spline2d::{BicubicSpline2D, CoefficientGrid1D, CoefficientGrid2D, SampleGrid2D};

/// A 1D interpolation function `f: R → R` defined by a set of known points.
pub trait Interpolation1D: std::fmt::Debug + Send + Sync {
    /// Evaluate the interpolation at `x`.
    fn operator(&self, x: Real) -> Real;

    /// Return the lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Return the upper bound of the interpolation domain.
    fn x_max(&self) -> Real;

    /// Return `true` if `x` is within the interpolation range.
    fn is_in_range(&self, x: Real) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}

/// A 2D interpolation surface.
pub trait Interpolation2D: std::fmt::Debug + Send + Sync {
    /// Evaluate the surface at `(x, y)`.
    fn operator(&self, x: Real, y: Real) -> Real;
    /// Lower bound of the x domain.
    fn x_min(&self) -> Real;
    /// Upper bound of the x domain.
    fn x_max(&self) -> Real;
    /// Lower bound of the y domain.
    fn y_min(&self) -> Real;
    /// Upper bound of the y domain.
    fn y_max(&self) -> Real;

    /// Return `true` if `(x, y)` is within the interpolation domain.
    fn is_in_range(&self, x: Real, y: Real) -> bool {
        x >= self.x_min() && x <= self.x_max() && y >= self.y_min() && y <= self.y_max()
    }
}
