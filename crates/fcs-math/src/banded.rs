//! Tridiagonal (banded) linear systems.
//!
//! * [`TridiagonalOperator`] — stores the three bands and solves `A · x = rhs`
//!   with the Thomas algorithm (forward elimination + back substitution).
//!
//! The elimination factors depend only on the matrix, so they are computed
//! once when the operator is built; each solve is then two sweeps over the
//! right-hand side with no extra storage.
//!
//! No pivoting is performed.  The spline system (`1, 4, 1`) is strictly
//! diagonally dominant so every pivot stays at least `2 + √3`; a general
//! operator that loses a pivot is rejected at construction with
//! [`Error::NumericalInstability`](fcs_core::Error::NumericalInstability).

use fcs_core::{ensure, ensure_len, errors::Result, Error, Real};

/// Pivots smaller than this, relative to the largest band entry, are treated
/// as zero.
const PIVOT_TOLERANCE: Real = 1e-14;

/// A tridiagonal matrix operator.
///
/// Stores the lower, diagonal, and upper bands together with the Thomas
/// factors: the eliminated super-diagonal and the reciprocal pivots.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalOperator {
    /// Lower diagonal (index 0 unused — starts from row 1).
    lower: Vec<Real>,
    /// Main diagonal.
    diag: Vec<Real>,
    /// Upper diagonal (last index unused — ends at row m−2).
    upper: Vec<Real>,
    /// `upper[i] / pivot[i]` after elimination (last index unused).
    c_prime: Vec<Real>,
    /// `1 / pivot[i]`.
    inv_pivot: Vec<Real>,
}

impl TridiagonalOperator {
    /// Build an operator from its three bands, each of length `m`, and
    /// factor it.
    ///
    /// # Errors
    /// Returns a configuration error for an empty system, a dimension
    /// mismatch if the bands differ in length, and numerical instability if
    /// elimination meets a vanishing pivot.
    pub fn new(lower: Vec<Real>, diag: Vec<Real>, upper: Vec<Real>) -> Result<Self> {
        ensure!(!diag.is_empty(), "tridiagonal system must have at least one row");
        ensure_len!("lower band", lower.len(), diag.len());
        ensure_len!("upper band", upper.len(), diag.len());

        let m = diag.len();
        let scale = diag
            .iter()
            .chain(&lower)
            .chain(&upper)
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let check = |pivot: Real, row: usize| -> Result<Real> {
            if !pivot.is_finite() || pivot.abs() <= PIVOT_TOLERANCE * scale {
                return Err(Error::NumericalInstability(format!(
                    "zero pivot at row {row} of {m}"
                )));
            }
            Ok(pivot)
        };

        let mut c_prime = vec![0.0; m];
        let mut inv_pivot = vec![0.0; m];
        for i in 0..m {
            let pivot = if i == 0 {
                diag[0]
            } else {
                diag[i] - lower[i] * c_prime[i - 1]
            };
            let pivot = check(pivot, i)?;
            inv_pivot[i] = 1.0 / pivot;
            if i + 1 < m {
                c_prime[i] = upper[i] * inv_pivot[i];
            }
        }

        Ok(Self {
            lower,
            diag,
            upper,
            c_prime,
            inv_pivot,
        })
    }

    /// An `m × m` operator with constant bands `(sub, main, sup)`.
    pub fn constant(m: usize, sub: Real, main: Real, sup: Real) -> Result<Self> {
        Self::new(vec![sub; m], vec![main; m], vec![sup; m])
    }

    /// The interior system of a uniform cubic spline: `1, 4, 1`.
    pub fn spline_system(m: usize) -> Result<Self> {
        Self::constant(m, 1.0, 4.0, 1.0)
    }

    /// Size (number of rows/columns).
    pub fn size(&self) -> usize {
        self.diag.len()
    }

    /// Apply the operator: `y = A · x`.
    pub fn apply(&self, x: &[Real]) -> Result<Vec<Real>> {
        let m = self.size();
        ensure_len!("operand", x.len(), m);
        let y = (0..m)
            .map(|i| {
                let mut v = self.diag[i] * x[i];
                if i > 0 {
                    v += self.lower[i] * x[i - 1];
                }
                if i + 1 < m {
                    v += self.upper[i] * x[i + 1];
                }
                v
            })
            .collect();
        Ok(y)
    }

    /// Solve `A · x = rhs` and return `x`.
    pub fn solve(&self, rhs: &[Real]) -> Result<Vec<Real>> {
        let mut x = rhs.to_vec();
        self.solve_in_place(&mut x)?;
        Ok(x)
    }

    /// Solve `A · x = rhs`, overwriting `rhs` with `x`.
    ///
    /// Uses no storage beyond `rhs` itself.
    ///
    /// # Errors
    /// A dimension mismatch if `rhs` is not of length `m`, checked before any
    /// arithmetic.
    pub fn solve_in_place(&self, rhs: &mut [Real]) -> Result<()> {
        let m = self.size();
        ensure_len!("right-hand side", rhs.len(), m);

        // Forward sweep
        rhs[0] *= self.inv_pivot[0];
        for i in 1..m {
            rhs[i] = (rhs[i] - self.lower[i] * rhs[i - 1]) * self.inv_pivot[i];
        }

        // Back substitution
        for i in (0..m - 1).rev() {
            rhs[i] -= self.c_prime[i] * rhs[i + 1];
        }

        Ok(())
    }
}
