//! Shared primitives for the Aurelia spliced-alignment toolkit.
//!
//! `aurelia-core` provides the foundation the other Aurelia crates build on:
//!
//! - **Error types** — [`AureliaError`] and [`Result`] for structured error handling
//! - **Traits** — small cross-crate abstractions like [`Scored`]
//! - **Packed storage** — [`TwoBitMatrix`], a dense byte-packed matrix of
//!   two-bit values used as a backtracking store

pub mod error;
pub mod traits;
pub mod twobit;

pub use error::{AureliaError, Result};
pub use traits::*;
pub use twobit::TwoBitMatrix;
