//! Error types for fast-cubic-spline.
//!
//! A single `thiserror`-derived enum covers every failure the library can
//! report.  Structural problems (bad grid, wrong buffer length) are caught by
//! the [`ensure!`](crate::ensure) and [`ensure_len!`](crate::ensure_len)
//! macros before any arithmetic runs.

use thiserror::Error;

/// The top-level error type used throughout fast-cubic-spline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Invalid grid or settings (`n < 2`, `a >= b`, non-finite bounds).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A sample, coefficient, or output buffer has the wrong length.
    #[error("dimension mismatch: {what} has length {found}, expected {expected}")]
    DimensionMismatch {
        /// Which buffer was mismatched.
        what: &'static str,
        /// Length required by the grid.
        expected: usize,
        /// Length actually supplied.
        found: usize,
    },

    /// A pivot vanished while factoring a banded system.
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// A query fell outside the grid and the caller asked for strict bounds.
    #[error("query {value} outside the interpolation domain [{lower}, {upper}]")]
    OutOfDomain {
        /// The offending coordinate.
        value: f64,
        /// Lower bound of the domain.
        lower: f64,
        /// Upper bound of the domain.
        upper: f64,
    },
}

/// Shorthand `Result` type used throughout fast-cubic-spline.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Configuration(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use fcs_core::{ensure, errors::Error};
/// fn intervals(n: usize) -> fcs_core::errors::Result<usize> {
///     ensure!(n >= 2, "grid too coarse: n = {n}");
///     Ok(n)
/// }
/// assert!(intervals(4).is_ok());
/// assert!(matches!(intervals(1), Err(Error::Configuration(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Configuration(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::DimensionMismatch { .. })` unless `$found == $expected`.
///
/// # Example
/// ```
/// use fcs_core::{ensure_len, errors::Error};
/// fn check(buf: &[f64]) -> fcs_core::errors::Result<()> {
///     ensure_len!("buffer", buf.len(), 3);
///     Ok(())
/// }
/// assert!(check(&[0.0; 3]).is_ok());
/// assert_eq!(
///     check(&[0.0; 2]),
///     Err(Error::DimensionMismatch { what: "buffer", expected: 3, found: 2 })
/// );
/// ```
#[macro_export]
macro_rules! ensure_len {
    ($what:expr, $found:expr, $expected:expr) => {
        let (found, expected): (usize, usize) = ($found, $expected);
        if found != expected {
            return Err($crate::errors::Error::DimensionMismatch {
                what: $what,
                expected,
                found,
            });
        }
    };
}
