//! # fcs-core
//!
//! Core types, settings, and error definitions for fast-cubic-spline.
//!
//! This crate provides the building blocks shared by the numeric crates in
//! the workspace: the primitive type aliases, the error hierarchy with its
//! precondition macros, and the value-typed [`SplineSettings`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_len!` macros.
pub mod errors;

/// Interpolation settings (extrapolation policy, parallel dispatch).
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use settings::{Extrapolation, SplineSettings};
