//! Weight table: per-signal influence on the combined identifier.
//!
//! Weights are relative influence in `[0, 1]`. Immediately after any public
//! mutation the table sums to 1 (within floating-point tolerance); the
//! built-in default table is an exception — it is raw relative influence and
//! is only normalized once the first mutation happens. Mutations are
//! atomic-or-nothing: a rejected input leaves the table untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::InvalidWeightError;

/// Default relative weight per built-in signal. Deliberately not normalized;
/// [`repeat_count`] tolerates an unnormalized table.
pub const DEFAULT_WEIGHTS: &[(&str, f64)] = &[
    ("canvas", 0.30),
    ("webgl", 0.25),
    ("audio", 0.25),
    ("fonts", 0.20),
    ("user_agent", 0.08),
    ("platform", 0.05),
    ("cpu_model", 0.06),
    ("cpu_count", 0.03),
    ("memory_size", 0.04),
    ("hostname", 0.05),
    ("machine_id", 0.10),
    ("timezone", 0.04),
    ("timezone_offset", 0.02),
    ("locale", 0.04),
    ("screen_resolution", 0.05),
    ("color_depth", 0.02),
    ("input_devices", 0.03),
];

/// Number of times a signal's digest is repeated in the combined string.
///
/// `floor(weight * 100)`, clamped to zero. A weight below 0.01 collapses to
/// zero repetitions: that signal contributes nothing to the combined string
/// for the run even though its weight is nonzero. Accepted property of the
/// scheme, not corrected here.
pub fn repeat_count(weight: f64) -> usize {
    let n = (weight * 100.0).floor();
    if n.is_sign_negative() || n.is_nan() { 0 } else { n as usize }
}

/// Mapping from signal name to non-negative weight.
///
/// Backed by a `BTreeMap` so iteration, serialization, and summation order
/// are deterministic. Note that the *combination* order of signals is the
/// engine's registration order, not this map's key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: BTreeMap<String, f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS
                .iter()
                .map(|&(name, w)| (name.to_string(), w))
                .collect(),
        }
    }
}

impl WeightTable {
    /// Empty table.
    pub fn empty() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// Weight for `name`, or 0.0 when the name is unknown.
    pub fn weight(&self, name: &str) -> f64 {
        self.weights.get(name).copied().unwrap_or(0.0)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(name, &w)| (name.as_str(), w))
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Merge `partial` into the table, then renormalize every entry so the
    /// table sums to 1.
    ///
    /// Keys absent from `partial` keep their prior weight (their *relative*
    /// proportion to each other is preserved; only the merged keys and the
    /// normalization constant shift). Fails without touching the table if any
    /// supplied weight is negative (or NaN/infinite), or if the merged total
    /// is zero.
    pub fn merge(&mut self, partial: &BTreeMap<String, f64>) -> Result<(), InvalidWeightError> {
        for (name, &w) in partial {
            if !(w.is_finite() && w >= 0.0) {
                return Err(InvalidWeightError::Invalid {
                    name: name.clone(),
                    weight: w,
                });
            }
        }

        let mut merged = self.weights.clone();
        for (name, &w) in partial {
            merged.insert(name.clone(), w);
        }

        let total: f64 = merged.values().sum();
        if total == 0.0 {
            return Err(InvalidWeightError::ZeroTotal);
        }
        for w in merged.values_mut() {
            *w /= total;
        }

        self.weights = merged;
        Ok(())
    }

    /// Ensure `name` has an entry, seeding it from [`DEFAULT_WEIGHTS`] or the
    /// given fallback. Used by the engine at signal registration; does not
    /// renormalize.
    pub(crate) fn seed(&mut self, name: &str, fallback: f64) {
        if !self.weights.contains_key(name) {
            let w = DEFAULT_WEIGHTS
                .iter()
                .find(|&&(n, _)| n == name)
                .map(|&(_, w)| w)
                .unwrap_or(fallback);
            self.weights.insert(name.to_string(), w);
        }
    }

    /// Overwrite one entry without renormalizing. Callers must follow up with
    /// [`WeightTable::normalize`] to restore the sum-to-1 invariant.
    pub(crate) fn set_raw(&mut self, name: &str, weight: f64) {
        self.weights.insert(name.to_string(), weight);
    }

    /// Divide every entry by the current total. No-op on a zero-sum table.
    pub(crate) fn normalize(&mut self) {
        let total = self.sum();
        if total > 0.0 {
            for w in self.weights.values_mut() {
                *w /= total;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|&(n, w)| (n.to_string(), w)).collect()
    }

    #[test]
    fn test_default_table_has_seventeen_entries() {
        let table = WeightTable::default();
        assert_eq!(table.len(), 17);
        assert!(table.weight("canvas") > 0.0);
        assert!(table.weight("nonexistent") == 0.0);
    }

    #[test]
    fn test_repeat_count_floor() {
        assert_eq!(repeat_count(0.30), 30);
        assert_eq!(repeat_count(0.256), 25);
        assert_eq!(repeat_count(1.0), 100);
        assert_eq!(repeat_count(0.0), 0);
    }

    #[test]
    fn test_repeat_count_sub_percent_collapses() {
        assert_eq!(repeat_count(0.009), 0);
        assert_eq!(repeat_count(0.0099999), 0);
        assert_eq!(repeat_count(0.01), 1);
    }

    #[test]
    fn test_merge_normalizes_to_one() {
        let mut table = WeightTable::default();
        table.merge(&partial(&[("canvas", 0.5)])).unwrap();
        assert!((table.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_merge_preserves_relative_proportions() {
        let mut table = WeightTable::default();
        let webgl_to_audio = table.weight("webgl") / table.weight("audio");
        let fonts_to_locale = table.weight("fonts") / table.weight("locale");

        table.merge(&partial(&[("canvas", 0.5)])).unwrap();

        assert!((table.weight("webgl") / table.weight("audio") - webgl_to_audio).abs() < 1e-9);
        assert!((table.weight("fonts") / table.weight("locale") - fonts_to_locale).abs() < 1e-9);
    }

    #[test]
    fn test_merge_inserts_new_keys() {
        let mut table = WeightTable::empty();
        table
            .merge(&partial(&[("a", 1.0), ("b", 3.0)]))
            .unwrap();
        assert!((table.weight("a") - 0.25).abs() < 1e-12);
        assert!((table.weight("b") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_merge_rejects_negative_and_leaves_table_unchanged() {
        let mut table = WeightTable::default();
        let before = table.clone();
        let err = table.merge(&partial(&[("canvas", -0.1)])).unwrap_err();
        assert!(matches!(err, InvalidWeightError::Invalid { ref name, .. } if name == "canvas"));
        assert_eq!(table, before);
    }

    #[test]
    fn test_merge_rejects_nan() {
        let mut table = WeightTable::default();
        let before = table.clone();
        assert!(table.merge(&partial(&[("canvas", f64::NAN)])).is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_merge_rejects_zero_total() {
        let mut table = WeightTable::empty();
        let err = table.merge(&partial(&[("a", 0.0), ("b", 0.0)])).unwrap_err();
        assert_eq!(err, InvalidWeightError::ZeroTotal);
        assert!(table.is_empty());
    }

    #[test]
    fn test_normalize_noop_on_zero_sum() {
        let mut table = WeightTable::empty();
        table.set_raw("a", 0.0);
        table.normalize();
        assert_eq!(table.weight("a"), 0.0);
    }

    #[test]
    fn test_seed_prefers_default_entry() {
        let mut table = WeightTable::empty();
        table.seed("audio", 0.05);
        assert_eq!(table.weight("audio"), 0.25);
        table.seed("custom_probe", 0.05);
        assert_eq!(table.weight("custom_probe"), 0.05);
        // Seeding an existing key is a no-op.
        table.seed("audio", 0.99);
        assert_eq!(table.weight("audio"), 0.25);
    }

    #[test]
    fn test_serde_round_trip() {
        let table = WeightTable::default();
        let json = serde_json::to_string(&table).unwrap();
        let back: WeightTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, back);
    }
}
