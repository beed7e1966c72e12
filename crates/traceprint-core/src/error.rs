//! Error types for weight-table mutation and adaptive reweighting.
//!
//! Signal incapability is deliberately not an error: an unavailable probe
//! yields an empty string, which the engine treats as a valid signal carrying
//! zero information. `generate_visitor_id` therefore never fails.

use thiserror::Error;

/// Rejected weight input to a table mutation. The table is left unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidWeightError {
    /// A supplied weight was negative, NaN, or infinite.
    #[error("invalid weight {weight} for signal {name}: must be a non-negative finite number")]
    Invalid { name: String, weight: f64 },

    /// The merged table would sum to zero, so renormalization is undefined.
    #[error("merged weights sum to zero; at least one weight must be positive")]
    ZeroTotal,
}

/// Total entropy across the supplied digests was exactly zero, so
/// entropy-proportional reweighting is undefined. Weights are left unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("total entropy across signal digests is zero; cannot derive weights")]
pub struct DegenerateEntropyError;
