//! Interpolation settings.
//!
//! [`SplineSettings`] is a plain value captured by each interpolant when it
//! is built.  There is no process-wide state: two splines built with
//! different settings can be evaluated side by side from any thread.

use crate::{ensure, errors::Result, Size};

/// What to do with a query coordinate outside `[a, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Continue the nearest boundary segment's cubic past the endpoint.
    #[default]
    Extrapolate,
    /// Evaluate at the nearest endpoint instead.
    Clamp,
    /// Reject the query with [`Error::OutOfDomain`](crate::Error::OutOfDomain).
    Error,
}

/// Settings shared by the 1D and 2D interpolants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplineSettings {
    extrapolation: Extrapolation,
    parallel_threshold: Size,
}

impl SplineSettings {
    /// Default number of independent line solves before a 2D pass goes parallel.
    pub const DEFAULT_PARALLEL_THRESHOLD: Size = 64;

    /// Settings with the default policy: extrapolate, parallelise passes of
    /// at least [`Self::DEFAULT_PARALLEL_THRESHOLD`] lines.
    pub const fn new() -> Self {
        Self {
            extrapolation: Extrapolation::Extrapolate,
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Set the out-of-domain policy.
    pub const fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Set the minimum number of line solves for a parallel 2D pass.
    ///
    /// # Errors
    /// Returns a configuration error if `threshold` is zero.
    pub fn with_parallel_threshold(mut self, threshold: Size) -> Result<Self> {
        ensure!(threshold > 0, "parallel threshold must be positive");
        self.parallel_threshold = threshold;
        Ok(self)
    }

    /// Force every 2D pass to run on the calling thread.
    pub const fn serial(mut self) -> Self {
        self.parallel_threshold = Size::MAX;
        self
    }

    /// The out-of-domain policy.
    pub const fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// The parallel dispatch threshold.
    pub const fn parallel_threshold(&self) -> Size {
        self.parallel_threshold
    }

    /// Whether a pass over `lines` independent solves should run in parallel.
    pub const fn is_parallel(&self, lines: Size) -> bool {
        lines >= self.parallel_threshold
    }
}

impl Default for SplineSettings {
    fn default() -> Self {
        Self::new()
    }
}
