//! Abstract signal source trait and runtime state.
//!
//! Every device signal implements the [`SignalSource`] trait: metadata via
//! [`SignalInfo`], availability checking, and a raw-value probe. A probe must
//! never fail observably — any missing capability or platform error is
//! converted to an empty string, which the engine treats as a valid signal
//! carrying zero information.

use std::time::Duration;

/// Metadata about a signal source.
#[derive(Debug, Clone)]
pub struct SignalInfo {
    /// Unique identifier (e.g. `"canvas"`). Also the weight-table key.
    pub name: &'static str,
    /// One-line human-readable description of the environment facet probed.
    pub description: &'static str,
    /// Platform requirements beyond a POSIX userland, e.g. `&["linux"]` or
    /// `&["fontconfig"]`. Empty when the probe works anywhere.
    pub platform_requirements: &'static [&'static str],
}

/// Trait that every signal source must implement.
pub trait SignalSource: Send + Sync {
    /// Source metadata.
    fn info(&self) -> &SignalInfo;

    /// Check if this probe can operate on the current machine.
    fn is_available(&self) -> bool;

    /// Read the raw signal value.
    ///
    /// Returns an empty string when the capability is absent or the probe
    /// fails; never panics by contract (the engine additionally guards each
    /// call). Probes may block — the audio probe sleeps for a fixed settle
    /// interval before its value is readable.
    fn probe(&self) -> String;

    /// Convenience: name from info.
    fn name(&self) -> &'static str {
        self.info().name
    }
}

/// Runtime state for a registered signal in the engine.
pub struct SignalState {
    pub source: Box<dyn SignalSource>,
    pub last_probe_time: Duration,
    pub last_entropy: f64,
    pub empty_probes: u64,
}

impl SignalState {
    pub fn new(source: Box<dyn SignalSource>) -> Self {
        Self {
            source,
            last_probe_time: Duration::ZERO,
            last_entropy: 0.0,
            empty_probes: 0,
        }
    }
}
