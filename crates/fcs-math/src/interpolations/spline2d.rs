//! Tensor-product cubic B-spline on a uniform 2D grid.
//!
//! Coefficients are built in two passes over a `(n1+1) × (n2+1)` sample
//! matrix whose rows follow the x axis and columns the z axis:
//!
//! 1. **axis 1** — every column (fixed `z_j`) is solved along x, giving the
//!    `(n1+3) × (n2+1)` [`CoefficientGrid1D`];
//! 2. **axis 2** — every row of that intermediate is solved along z, giving
//!    the `(n1+3) × (n2+3)` [`CoefficientGrid2D`].
//!
//! Lines within a pass are independent and run on the rayon pool once there
//! are enough of them.  The second pass only starts after the first has
//! produced its whole intermediate.
//!
//! Matrices are nalgebra's column-major `DMatrix`, so the lines of the first
//! pass are contiguous columns; the second pass works on the transpose.
//!
//! Each axis takes its own [`BoundaryCondition`], the surface's second
//! derivative along that axis at its two ends.  The second pass solves
//! x-coefficients rather than samples, and those sit at a sixth of the
//! surface's scale, so its boundary is divided by 6 before solving.

use fcs_core::{ensure_len, errors::Result, Extrapolation, Real, Size, SplineSettings};
use nalgebra::DMatrix;
use rayon::prelude::*;
use tracing::debug;

use super::basis::Window;
use super::spline1d::CoefficientSolver;
use super::Interpolation2D;
use crate::grid::{BoundaryCondition, Grid};

// ── Data ──────────────────────────────────────────────────────────────────────

/// Samples `f(x_i, z_j)` at entry `(i, j)` of a `(n1+1) × (n2+1)` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid2D(DMatrix<Real>);

impl SampleGrid2D {
    /// Sample `f` at every knot pair of `grid_x × grid_z`.
    pub fn from_fn(grid_x: &Grid, grid_z: &Grid, mut f: impl FnMut(Real, Real) -> Real) -> Self {
        Self(DMatrix::from_fn(
            grid_x.sample_len(),
            grid_z.sample_len(),
            |i, j| f(grid_x.knot(i), grid_z.knot(j)),
        ))
    }

    /// Build from row-major data: `data[i * cols + j] = f(x_i, z_j)`.
    pub fn from_row_major(rows: Size, cols: Size, data: &[Real]) -> Result<Self> {
        ensure_len!("sample data", data.len(), rows * cols);
        Ok(Self(DMatrix::from_row_slice(rows, cols, data)))
    }

    /// Wrap an existing matrix.
    pub fn from_matrix(matrix: DMatrix<Real>) -> Self {
        Self(matrix)
    }

    /// `(rows, cols)`: the x and z sample counts.
    pub fn shape(&self) -> (Size, Size) {
        self.0.shape()
    }

    /// Sample at `(i, j)`.
    pub fn get(&self, i: Size, j: Size) -> Option<Real> {
        self.0.get((i, j)).copied()
    }
}

/// The axis-1 intermediate: x-direction coefficients for every `z_j`,
/// `(n1+3) × (n2+1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientGrid1D(DMatrix<Real>);

impl CoefficientGrid1D {
    /// `(rows, cols)`.
    pub fn shape(&self) -> (Size, Size) {
        self.0.shape()
    }

    /// Coefficient at `(p, j)`.
    pub fn get(&self, p: Size, j: Size) -> Option<Real> {
        self.0.get((p, j)).copied()
    }
}

/// The final padded coefficient grid, `(n1+3) × (n2+3)`.
///
/// Row index follows the x grid, column index the z grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientGrid2D(DMatrix<Real>);

impl CoefficientGrid2D {
    /// Wrap a coefficient matrix built elsewhere for `grid_x × grid_z`.
    pub fn from_matrix(grid_x: &Grid, grid_z: &Grid, matrix: DMatrix<Real>) -> Result<Self> {
        ensure_len!("coefficient rows", matrix.nrows(), grid_x.coefficient_len());
        ensure_len!("coefficient columns", matrix.ncols(), grid_z.coefficient_len());
        Ok(Self(matrix))
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (Size, Size) {
        self.0.shape()
    }

    /// Coefficient at `(p, q)`.
    pub fn get(&self, p: Size, q: Size) -> Option<Real> {
        self.0.get((p, q)).copied()
    }

    /// Borrow the underlying matrix.
    pub fn as_matrix(&self) -> &DMatrix<Real> {
        &self.0
    }

    fn check(&self, grid_x: &Grid, grid_z: &Grid) -> Result<()> {
        ensure_len!("coefficient rows", self.0.nrows(), grid_x.coefficient_len());
        ensure_len!("coefficient columns", self.0.ncols(), grid_z.coefficient_len());
        Ok(())
    }
}

// ── Passes ────────────────────────────────────────────────────────────────────

/// Solve every contiguous `input` line into the matching `output` line.
fn solve_lines(
    solver: &CoefficientSolver,
    input: &[Real],
    output: &mut [Real],
    parallel: bool,
) -> Result<()> {
    let in_len = solver.grid().sample_len();
    let out_len = solver.grid().coefficient_len();
    if parallel {
        output
            .par_chunks_exact_mut(out_len)
            .zip(input.par_chunks_exact(in_len))
            .try_for_each(|(out, line)| solver.solve_into(line, out))
    } else {
        output
            .chunks_exact_mut(out_len)
            .zip(input.chunks_exact(in_len))
            .try_for_each(|(out, line)| solver.solve_into(line, out))
    }
}

/// First pass: solve every column of `samples` along the x grid.
pub fn solve_axis1(
    grid_x: &Grid,
    boundary: BoundaryCondition,
    samples: &SampleGrid2D,
    settings: &SplineSettings,
) -> Result<CoefficientGrid1D> {
    let (rows, cols) = samples.shape();
    ensure_len!("sample rows", rows, grid_x.sample_len());

    let solver = CoefficientSolver::new(*grid_x, boundary)?;
    let mut out = DMatrix::<Real>::zeros(grid_x.coefficient_len(), cols);
    let parallel = settings.is_parallel(cols);
    debug!(rows, cols, parallel, "solving axis 1");
    solve_lines(&solver, samples.0.as_slice(), out.as_mut_slice(), parallel)?;
    Ok(CoefficientGrid1D(out))
}

/// Second pass: solve every row of `intermediate` along the z grid.
///
/// `boundary` is `∂²f/∂z²` of the final surface at `a2` and `b2`.
pub fn solve_axis2(
    grid_z: &Grid,
    boundary: BoundaryCondition,
    intermediate: &CoefficientGrid1D,
    settings: &SplineSettings,
) -> Result<CoefficientGrid2D> {
    let (rows, cols) = intermediate.shape();
    ensure_len!("intermediate columns", cols, grid_z.sample_len());

    let line_boundary = BoundaryCondition::new(boundary.alpha / 6.0, boundary.beta / 6.0);
    let solver = CoefficientSolver::new(*grid_z, line_boundary)?;
    let lines = intermediate.0.transpose();
    let mut out = DMatrix::<Real>::zeros(grid_z.coefficient_len(), rows);
    let parallel = settings.is_parallel(rows);
    debug!(rows, cols, parallel, "solving axis 2");
    solve_lines(&solver, lines.as_slice(), out.as_mut_slice(), parallel)?;
    Ok(CoefficientGrid2D(out.transpose()))
}

/// Both passes: samples on `grid_x × grid_z` to the padded coefficient grid.
pub fn solve(
    grid_x: &Grid,
    grid_z: &Grid,
    boundary_x: BoundaryCondition,
    boundary_z: BoundaryCondition,
    samples: &SampleGrid2D,
    settings: &SplineSettings,
) -> Result<CoefficientGrid2D> {
    // Both shapes are validated up front so a bad z extent fails before
    // the first pass runs.
    let (_, cols) = samples.shape();
    ensure_len!("sample columns", cols, grid_z.sample_len());
    let intermediate = solve_axis1(grid_x, boundary_x, samples, settings)?;
    solve_axis2(grid_z, boundary_z, &intermediate, settings)
}

// ── Evaluation ────────────────────────────────────────────────────────────────

#[inline]
fn blend(c: &DMatrix<Real>, wx: Window, wz: Window) -> Real {
    let ax = wx.weights();
    let az = wz.weights();
    let mut sum = 0.0;
    for (p, &a) in ax.iter().enumerate() {
        let mut row = 0.0;
        for (q, &b) in az.iter().enumerate() {
            row += b * c[(wx.start + p, wz.start + q)];
        }
        sum += a * row;
    }
    sum
}

/// Evaluate the tensor-product spline at `(x, z)`.
///
/// # Errors
/// A dimension mismatch unless `coefficients` is `(n1+3) × (n2+3)` for
/// `grid_x × grid_z` in that order; an out-of-domain error only under
/// [`Extrapolation::Error`].
pub fn evaluate(
    grid_x: &Grid,
    grid_z: &Grid,
    coefficients: &CoefficientGrid2D,
    x: Real,
    z: Real,
    policy: Extrapolation,
) -> Result<Real> {
    coefficients.check(grid_x, grid_z)?;
    let wx = Window::locate(grid_x, x, policy)?;
    let wz = Window::locate(grid_z, z, policy)?;
    Ok(blend(&coefficients.0, wx, wz))
}

// ── Interpolant ───────────────────────────────────────────────────────────────

/// A built 2D spline: both grids, the coefficient grid, and settings.
#[derive(Debug, Clone)]
pub struct BicubicSpline2D {
    grid_x: Grid,
    grid_z: Grid,
    coefficients: CoefficientGrid2D,
    settings: SplineSettings,
}

impl BicubicSpline2D {
    /// Interpolate `samples` with natural boundaries on both axes.
    pub fn new(grid_x: Grid, grid_z: Grid, samples: &SampleGrid2D) -> Result<Self> {
        Self::with_settings(
            grid_x,
            grid_z,
            samples,
            BoundaryCondition::natural(),
            BoundaryCondition::natural(),
            SplineSettings::default(),
        )
    }

    /// Interpolate `samples` with per-axis boundary conditions and settings.
    pub fn with_settings(
        grid_x: Grid,
        grid_z: Grid,
        samples: &SampleGrid2D,
        boundary_x: BoundaryCondition,
        boundary_z: BoundaryCondition,
        settings: SplineSettings,
    ) -> Result<Self> {
        let coefficients = solve(&grid_x, &grid_z, boundary_x, boundary_z, samples, &settings)?;
        Ok(Self {
            grid_x,
            grid_z,
            coefficients,
            settings,
        })
    }

    /// The x grid (axis 1).
    pub fn grid_x(&self) -> &Grid {
        &self.grid_x
    }

    /// The z grid (axis 2).
    pub fn grid_z(&self) -> &Grid {
        &self.grid_z
    }

    /// The coefficient grid.
    pub fn coefficients(&self) -> &CoefficientGrid2D {
        &self.coefficients
    }

    /// Evaluate at `(x, z)`, honouring the extrapolation policy.
    pub fn try_value(&self, x: Real, z: Real) -> Result<Real> {
        let policy = self.settings.extrapolation();
        let wx = Window::locate(&self.grid_x, x, policy)?;
        let wz = Window::locate(&self.grid_z, z, policy)?;
        Ok(blend(&self.coefficients.0, wx, wz))
    }

    /// Evaluate at `(x, z)`; `NaN` for a rejected out-of-domain query.
    pub fn value(&self, x: Real, z: Real) -> Real {
        self.try_value(x, z).unwrap_or(Real::NAN)
    }
}

impl Interpolation2D for BicubicSpline2D {
    fn operator(&self, x: Real, y: Real) -> Real {
        self.value(x, y)
    }

    fn x_min(&self) -> Real {
        self.grid_x.lower()
    }

    fn x_max(&self) -> Real {
        self.grid_x.upper()
    }

    fn y_min(&self) -> Real {
        self.grid_z.lower()
    }

    fn y_max(&self) -> Real {
        self.grid_z.upper()
    }

    /// Agrees with [`BicubicSpline2D::try_value`] under
    /// [`Extrapolation::Error`].
    fn is_in_range(&self, x: Real, y: Real) -> bool {
        self.grid_x.contains(x) && self.grid_z.contains(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolations::spline1d::CubicSpline1D;
    use approx::assert_abs_diff_eq;
    use fcs_core::Error;

    fn grids() -> (Grid, Grid) {
        (Grid::new(0.0, 1.0, 7).unwrap(), Grid::new(-1.0, 2.0, 5).unwrap())
    }

    #[test]
    fn shapes_follow_axis_order() {
        let (gx, gz) = grids();
        let samples = SampleGrid2D::from_fn(&gx, &gz, |x, z| x + z);
        assert_eq!(samples.shape(), (8, 6));
        let settings = SplineSettings::default();
        let mid = solve_axis1(&gx, BoundaryCondition::natural(), &samples, &settings).unwrap();
        assert_eq!(mid.shape(), (10, 6));
        let c = solve_axis2(&gz, BoundaryCondition::natural(), &mid, &settings).unwrap();
        assert_eq!(c.shape(), (10, 8));
    }

    #[test]
    fn reproduces_samples_at_knots() {
        let (gx, gz) = grids();
        let f = |x: Real, z: Real| (3.0 * x).sin() * (z * z + 1.0).ln() + x * z;
        let s = BicubicSpline2D::new(gx, gz, &SampleGrid2D::from_fn(&gx, &gz, f)).unwrap();
        for i in 0..gx.sample_len() {
            for j in 0..gz.sample_len() {
                let (x, z) = (gx.knot(i), gz.knot(j));
                assert_abs_diff_eq!(s.value(x, z), f(x, z), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn separable_product_factorises() {
        let (gx, gz) = grids();
        let g = |x: Real| (2.0 * x).exp();
        let h = |z: Real| z.cos() - 0.5 * z;
        let samples = SampleGrid2D::from_fn(&gx, &gz, |x, z| g(x) * h(z));
        let s2 = BicubicSpline2D::new(gx, gz, &samples).unwrap();

        let gs: Vec<Real> = gx.knots().map(g).collect();
        let hs: Vec<Real> = gz.knots().map(h).collect();
        let sg = CubicSpline1D::new(gx, &gs, BoundaryCondition::natural()).unwrap();
        let sh = CubicSpline1D::new(gz, &hs, BoundaryCondition::natural()).unwrap();

        for (x, z) in [(0.13, -0.9), (0.5, 0.5), (0.99, 1.7), (0.31, 2.0)] {
            assert_abs_diff_eq!(s2.value(x, z), sg.value(x) * sh.value(z), epsilon = 1e-11);
        }
    }

    #[test]
    fn reproduces_bilinear_functions() {
        let (gx, gz) = grids();
        let f = |x: Real, z: Real| 2.0 * x - 3.0 * z + 0.5 * x * z + 1.0;
        let s = BicubicSpline2D::new(gx, gz, &SampleGrid2D::from_fn(&gx, &gz, f)).unwrap();
        for (x, z) in [(0.05, -0.95), (0.42, 0.37), (0.88, 1.91)] {
            assert_abs_diff_eq!(s.value(x, z), f(x, z), epsilon = 1e-11);
        }
    }

    #[test]
    fn parallel_and_serial_passes_agree() {
        let gx = Grid::new(0.0, 1.0, 80).unwrap();
        let gz = Grid::new(0.0, 2.0, 70).unwrap();
        let samples = SampleGrid2D::from_fn(&gx, &gz, |x, z| (x * 5.0).sin() + z * z);
        let b = BoundaryCondition::natural();
        let serial = solve(&gx, &gz, b, b, &samples, &SplineSettings::new().serial()).unwrap();
        let parallel = solve(
            &gx,
            &gz,
            b,
            b,
            &samples,
            &SplineSettings::new().with_parallel_threshold(1).unwrap(),
        )
        .unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn swapped_grids_are_rejected() {
        let (gx, gz) = grids();
        let samples = SampleGrid2D::from_fn(&gx, &gz, |x, z| x * z);
        let b = BoundaryCondition::natural();
        let settings = SplineSettings::default();

        let err = solve(&gz, &gx, b, b, &samples, &settings).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));

        let c = solve(&gx, &gz, b, b, &samples, &settings).unwrap();
        let err = evaluate(&gz, &gx, &c, 0.5, 0.5, Extrapolation::Extrapolate).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { what: "coefficient rows", .. }));
        assert!(evaluate(&gx, &gz, &c, 0.5, 0.5, Extrapolation::Extrapolate).is_ok());
    }

    #[test]
    fn row_major_samples() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let s = SampleGrid2D::from_row_major(2, 3, &data).unwrap();
        assert_eq!(s.get(0, 2), Some(3.0));
        assert_eq!(s.get(1, 0), Some(4.0));
        assert!(SampleGrid2D::from_row_major(2, 2, &data).is_err());
    }

    #[test]
    fn strict_policy_rejects_either_axis() {
        let (gx, gz) = grids();
        let samples = SampleGrid2D::from_fn(&gx, &gz, |x, z| x + z);
        let b = BoundaryCondition::natural();
        let s = BicubicSpline2D::with_settings(
            gx,
            gz,
            &samples,
            b,
            b,
            SplineSettings::new().with_extrapolation(Extrapolation::Error),
        )
        .unwrap();
        assert!(s.try_value(0.5, 0.5).is_ok());
        assert!(matches!(s.try_value(1.5, 0.5), Err(Error::OutOfDomain { .. })));
        assert!(s.operator(0.5, 3.0).is_nan());
    }

    /// `36·(c[k] - 2c[k+1] + c[k+2]) / h²`: the surface curvature implied by
    /// one second difference of the padded grid.
    fn curvature(c0: Real, c1: Real, c2: Real, h: Real) -> Real {
        36.0 * (c0 - 2.0 * c1 + c2) / (h * h)
    }

    #[test]
    fn per_axis_boundaries_reach_the_surface() {
        let (gx, gz) = grids();
        let f = |x: Real, z: Real| (3.0 * x).sin() * (z * z + 1.0).ln() + x * z;
        let bx = BoundaryCondition::new(0.7, -1.3);
        let bz = BoundaryCondition::new(2.5, -0.4);
        let samples = SampleGrid2D::from_fn(&gx, &gz, f);
        let s = BicubicSpline2D::with_settings(gx, gz, &samples, bx, bz, SplineSettings::default())
            .unwrap();
        let c = s.coefficients().as_matrix();
        let (rows, cols) = c.shape();
        let (h1, h2) = (gx.step(), gz.step());

        for q in 0..cols {
            let lower = curvature(c[(0, q)], c[(1, q)], c[(2, q)], h1);
            let upper = curvature(c[(rows - 3, q)], c[(rows - 2, q)], c[(rows - 1, q)], h1);
            assert_abs_diff_eq!(lower, bx.alpha, epsilon = 1e-9);
            assert_abs_diff_eq!(upper, bx.beta, epsilon = 1e-9);
        }
        for p in 0..rows {
            let lower = curvature(c[(p, 0)], c[(p, 1)], c[(p, 2)], h2);
            let upper = curvature(c[(p, cols - 3)], c[(p, cols - 2)], c[(p, cols - 1)], h2);
            assert_abs_diff_eq!(lower, bz.alpha, epsilon = 1e-9);
            assert_abs_diff_eq!(upper, bz.beta, epsilon = 1e-9);
        }

        // The boundary segments are cubic, so a centred second difference
        // at an end recovers the curvature there.
        let d = 0.25 * h2;
        for x in [0.1, 0.45, 0.93] {
            let z = gz.lower();
            let fd = (s.value(x, z + d) - 2.0 * s.value(x, z) + s.value(x, z - d)) / (d * d);
            assert_abs_diff_eq!(fd, bz.alpha, epsilon = 1e-8);
        }
        let d = 0.25 * h1;
        for z in [-0.8, 0.35, 1.6] {
            let x = gx.upper();
            let fd = (s.value(x + d, z) - 2.0 * s.value(x, z) + s.value(x - d, z)) / (d * d);
            assert_abs_diff_eq!(fd, bx.beta, epsilon = 1e-8);
        }
    }

    #[test]
    fn reproduces_quadratics_with_matching_boundaries() {
        let (gx, gz) = grids();
        // f_xx = 2, f_zz = -3 everywhere.
        let f = |x: Real, z: Real| x * x - 1.5 * z * z + x * z;
        let s = BicubicSpline2D::with_settings(
            gx,
            gz,
            &SampleGrid2D::from_fn(&gx, &gz, f),
            BoundaryCondition::new(2.0, 2.0),
            BoundaryCondition::new(-3.0, -3.0),
            SplineSettings::default(),
        )
        .unwrap();
        for (x, z) in [(0.03, -0.97), (0.41, 0.22), (0.77, 1.31), (0.99, 1.99)] {
            assert_abs_diff_eq!(s.value(x, z), f(x, z), epsilon = 1e-11);
        }
    }

    #[test]
    fn intermediate_columns_are_1d_solves() {
        let (gx, gz) = grids();
        let f = |x: Real, z: Real| (x - z).exp();
        let bx = BoundaryCondition::new(0.5, -2.0);
        let samples = SampleGrid2D::from_fn(&gx, &gz, f);
        let mid = solve_axis1(&gx, bx, &samples, &SplineSettings::default()).unwrap();
        let solver = CoefficientSolver::new(gx, bx).unwrap();
        for j in 0..gz.sample_len() {
            let column: Vec<Real> = (0..gx.sample_len())
                .map(|i| samples.get(i, j).unwrap())
                .collect();
            let c = solver.solve(&column).unwrap();
            for (p, v) in c.as_slice().iter().enumerate() {
                assert_eq!(mid.get(p, j), Some(*v));
            }
        }
        assert_eq!(mid.get(gx.coefficient_len(), 0), None);
    }

    #[test]
    fn wraps_existing_matrices() {
        let (gx, gz) = grids();
        let m = DMatrix::from_fn(gx.sample_len(), gz.sample_len(), |i, j| (i * 10 + j) as Real);
        let samples = SampleGrid2D::from_matrix(m);
        assert_eq!(samples.shape(), (8, 6));
        assert_eq!(samples.get(3, 2), Some(32.0));

        let s = BicubicSpline2D::new(gx, gz, &samples).unwrap();
        let c = s.coefficients();
        let rewrapped = CoefficientGrid2D::from_matrix(&gx, &gz, c.as_matrix().clone()).unwrap();
        assert_eq!(&rewrapped, c);
        assert_eq!(
            evaluate(&gx, &gz, &rewrapped, 0.3, 0.4, Extrapolation::Extrapolate).unwrap(),
            s.value(0.3, 0.4)
        );

        let err = CoefficientGrid2D::from_matrix(&gz, &gx, c.as_matrix().clone()).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { what: "coefficient rows", .. }));
    }

    #[test]
    fn is_in_range_matches_strict_evaluation() {
        let (gx, gz) = grids();
        let samples = SampleGrid2D::from_fn(&gx, &gz, |x, z| x - z);
        let b = BoundaryCondition::natural();
        let s = BicubicSpline2D::with_settings(
            gx,
            gz,
            &samples,
            b,
            b,
            SplineSettings::new().with_extrapolation(Extrapolation::Error),
        )
        .unwrap();
        let xs = [0.0, 1.0, 1.0 + 1e-12, 1.2];
        let zs = [-1.0 - 1e-12, 0.5, 2.0, 2.5];
        for x in xs {
            for z in zs {
                assert_eq!(
                    s.is_in_range(x, z),
                    s.try_value(x, z).is_ok(),
                    "disagreement at ({x}, {z})"
                );
            }
        }
        assert!(s.is_in_range(1.0 + 1e-12, 2.0));
    }
}
