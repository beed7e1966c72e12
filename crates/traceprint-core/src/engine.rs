//! Weighted aggregation engine: signals in, one visitor identifier out.
//!
//! Algorithm per run:
//! 1. Snapshot the weight table once (a concurrent `set_weights` never shows
//!    a half-applied table to an in-flight run)
//! 2. Probe each registered signal in canonical (registration) order
//! 3. Digest each raw value independently
//! 4. Repeat each digest `floor(weight * 100)` times and concatenate the
//!    fragments in canonical order
//! 5. Digest the combined string once more — that is the visitor identifier
//!
//! The engine itself never fails: a probe that panics or finds nothing is a
//! valid empty-string signal, not an error.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Instant;

use serde::Serialize;

use crate::digest::digest;
use crate::entropy::{entropy_weights, shannon_entropy};
use crate::error::{DegenerateEntropyError, InvalidWeightError};
use crate::signal::{SignalSource, SignalState};
use crate::weights::{WeightTable, repeat_count};

/// Weight seeded at registration for signals with no default-table entry.
const FALLBACK_SIGNAL_WEIGHT: f64 = 0.05;

/// One signal's name and hashed raw value, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalDigest {
    pub name: String,
    pub digest: String,
}

/// Thread-safe weighted fingerprinting engine.
///
/// Owns its weight table for its whole lifetime; multiple engines with
/// different tables can coexist. Signal order is fixed at registration and
/// stable across runs — required for reproducible combination.
pub struct Fingerprinter {
    signals: Vec<Mutex<SignalState>>,
    weights: Mutex<WeightTable>,
}

impl Fingerprinter {
    /// Create an engine with no signals and the given weight table.
    pub fn new(weights: WeightTable) -> Self {
        Self {
            signals: Vec::new(),
            weights: Mutex::new(weights),
        }
    }

    /// Create an engine with every built-in signal available on this machine
    /// and the default weight table.
    pub fn auto() -> Self {
        let mut engine = Self::new(WeightTable::default());
        for source in crate::signals::detect_available_signals() {
            engine.register(source);
        }
        engine
    }

    /// Register a signal source at the end of the canonical order.
    ///
    /// Seeds a weight-table entry for the signal's name when one is missing
    /// (from the default table, else a small fallback).
    pub fn register(&mut self, source: Box<dyn SignalSource>) {
        self.weights
            .lock()
            .unwrap()
            .seed(source.name(), FALLBACK_SIGNAL_WEIGHT);
        self.signals.push(Mutex::new(SignalState::new(source)));
    }

    /// Number of registered signals.
    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// Generate the visitor identifier for the current environment.
    ///
    /// Deterministic for fixed raw signal values and a fixed weight table.
    /// Wall-clock time is dominated by the slowest probe (the audio signal
    /// carries a fixed settle delay).
    pub fn generate_visitor_id(&self) -> String {
        let weights = self.weights.lock().unwrap().clone();

        let mut combined = String::new();
        for sd in self.collect_digests() {
            let repeats = repeat_count(weights.weight(&sd.name));
            log::trace!("signal {} repeats {} in combined string", sd.name, repeats);
            for _ in 0..repeats {
                combined.push_str(&sd.digest);
            }
        }

        let id = digest(&combined);
        log::debug!(
            "visitor id from {} signals, combined length {}",
            self.signals.len(),
            combined.len()
        );
        id
    }

    /// Probe and digest every registered signal in canonical order.
    ///
    /// A probe that panics or returns nothing contributes the digest of the
    /// empty string; incapability never surfaces as an error.
    pub fn collect_digests(&self) -> Vec<SignalDigest> {
        self.signals.iter().map(Self::collect_one).collect()
    }

    fn collect_one(state_mutex: &Mutex<SignalState>) -> SignalDigest {
        let mut state = state_mutex.lock().unwrap();
        let name = state.source.name();

        let t0 = Instant::now();
        let raw = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| state.source.probe()))
            .unwrap_or_default();
        state.last_probe_time = t0.elapsed();

        if raw.is_empty() {
            state.empty_probes += 1;
            log::debug!("signal {name} probe returned nothing");
        }

        let d = digest(&raw);
        state.last_entropy = shannon_entropy(&d);

        SignalDigest {
            name: name.to_string(),
            digest: d,
        }
    }

    /// Read-only snapshot of the weight table.
    pub fn weights(&self) -> WeightTable {
        self.weights.lock().unwrap().clone()
    }

    /// Merge `partial` into the weight table and renormalize to sum 1.
    ///
    /// Atomic-or-nothing: on error the table is byte-for-byte unchanged.
    pub fn set_weights(
        &self,
        partial: &BTreeMap<String, f64>,
    ) -> Result<(), InvalidWeightError> {
        self.weights.lock().unwrap().merge(partial)
    }

    /// Probe all registered signals and reweight them by digest entropy.
    ///
    /// Convenience over [`Fingerprinter::adjust_weights_from`] with freshly
    /// collected digests; pays the same probe cost as an aggregation run.
    pub fn adjust_weights(&self) -> Result<(), DegenerateEntropyError> {
        let digests = self.collect_digests();
        self.adjust_weights_from(&digests)
    }

    /// Reweight the listed signals proportionally to their digest entropy,
    /// then renormalize the complete table so the sum-to-1 invariant holds
    /// across every entry (not just the listed subset).
    ///
    /// Fails with [`DegenerateEntropyError`] — leaving the table unchanged —
    /// when the total entropy across the list is exactly zero.
    pub fn adjust_weights_from(
        &self,
        digests: &[SignalDigest],
    ) -> Result<(), DegenerateEntropyError> {
        let adjusted = entropy_weights(digests)?;

        let mut table = self.weights.lock().unwrap();
        for (name, w) in adjusted {
            table.set_raw(&name, w);
        }
        table.normalize();
        log::debug!("entropy-adjusted weights for {} signals", digests.len());
        Ok(())
    }

    /// Per-signal run statistics as structured data.
    pub fn signal_report(&self) -> SignalReport {
        let weights = self.weights.lock().unwrap().clone();
        let mut signals = Vec::new();
        let mut silent = 0;

        for state_mutex in &self.signals {
            let state = state_mutex.lock().unwrap();
            if state.empty_probes > 0 {
                silent += 1;
            }
            signals.push(SignalHealth {
                name: state.source.name().to_string(),
                weight: weights.weight(state.source.name()),
                last_entropy: state.last_entropy,
                probe_time: state.last_probe_time.as_secs_f64(),
                empty_probes: state.empty_probes,
            });
        }

        SignalReport {
            total: self.signals.len(),
            silent,
            signals,
        }
    }
}

/// Run statistics across all registered signals.
#[derive(Debug, Clone, Serialize)]
pub struct SignalReport {
    /// Number of registered signals.
    pub total: usize,
    /// Signals that have returned an empty probe at least once.
    pub silent: usize,
    /// Per-signal details, in canonical order.
    pub signals: Vec<SignalHealth>,
}

/// Run statistics for a single signal.
#[derive(Debug, Clone, Serialize)]
pub struct SignalHealth {
    /// Signal name.
    pub name: String,
    /// Current weight in the table.
    pub weight: f64,
    /// Shannon entropy of the last digest.
    pub last_entropy: f64,
    /// Wall-clock time of the last probe in seconds.
    pub probe_time: f64,
    /// Number of probes that returned an empty string.
    pub empty_probes: u64,
}
