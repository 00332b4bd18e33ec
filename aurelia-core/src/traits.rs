//! Core trait definitions for the Aurelia toolkit.
//!
//! These traits define the contracts that domain types implement across crates.

/// A type that carries a numeric score (alignment score, quality, etc.).
pub trait Scored {
    /// The score value.
    fn score(&self) -> f64;
}
