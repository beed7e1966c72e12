//! Shannon entropy of a digest's character distribution.
//!
//! The estimator scores how "spread out" a digest is over its own alphabet.
//! Signals whose hashed output shows a wider character distribution are
//! presumed more discriminating between devices, and the engine grants them
//! proportionally more weight (see [`entropy_weights`]).

use std::collections::HashMap;

use crate::engine::SignalDigest;
use crate::error::DegenerateEntropyError;

/// Base-2 Shannon entropy of the character frequency distribution of `s`.
///
/// Computed over the string's own alphabet, not a global one: a digest made
/// of a single repeated character scores 0.0; one with `k` equally frequent
/// distinct characters scores `log2(k)`. The empty string scores 0.0.
pub fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }
    let mut counts: HashMap<char, u64> = HashMap::new();
    let mut n = 0u64;
    for c in s.chars() {
        *counts.entry(c).or_insert(0) += 1;
        n += 1;
    }
    let n = n as f64;
    let mut h = 0.0;
    for &c in counts.values() {
        let p = c as f64 / n;
        h -= p * p.log2();
    }
    h
}

/// Derive entropy-proportional weights for a set of signal digests.
///
/// Each signal's weight is its digest entropy divided by the total entropy
/// across the set. Fails with [`DegenerateEntropyError`] when the total is
/// exactly 0 (every digest is a constant string), since the division is
/// undefined.
pub fn entropy_weights(
    digests: &[SignalDigest],
) -> Result<Vec<(String, f64)>, DegenerateEntropyError> {
    let entropies: Vec<(String, f64)> = digests
        .iter()
        .map(|sd| (sd.name.clone(), shannon_entropy(&sd.digest)))
        .collect();

    let total: f64 = entropies.iter().map(|(_, e)| e).sum();
    if total == 0.0 {
        return Err(DegenerateEntropyError);
    }

    Ok(entropies.into_iter().map(|(name, e)| (name, e / total)).collect())
}
