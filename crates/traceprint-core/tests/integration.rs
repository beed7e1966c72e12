//! Integration tests for traceprint-core.
//!
//! These exercise the full pipeline: signal detection → engine creation →
//! identifier generation → adaptive reweighting.

use std::collections::BTreeMap;

use traceprint_core::{
    DIGEST_HEX_LEN, Fingerprinter, SignalInfo, SignalSource, WeightTable,
    detect_available_signals,
};

/// Deterministic stand-in for a real probe.
struct StubSignal {
    info: SignalInfo,
    value: &'static str,
}

impl StubSignal {
    fn boxed(name: &'static str, value: &'static str) -> Box<dyn SignalSource> {
        Box::new(Self {
            info: SignalInfo {
                name,
                description: "stub",
                platform_requirements: &[],
            },
            value,
        })
    }
}

impl SignalSource for StubSignal {
    fn info(&self) -> &SignalInfo {
        &self.info
    }
    fn is_available(&self) -> bool {
        true
    }
    fn probe(&self) -> String {
        self.value.to_string()
    }
}

fn weights(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|&(n, w)| (n.to_string(), w)).collect()
}

#[test]
fn detect_finds_signals_on_any_machine() {
    let signals = detect_available_signals();
    // platform, cpu_count, locale and friends have no requirements at all.
    assert!(
        signals.len() >= 5,
        "expected at least 5 available signals, found {}",
        signals.len()
    );
}

#[test]
fn auto_engine_generates_well_formed_id() {
    let engine = Fingerprinter::auto();
    assert!(engine.signal_count() >= 5);
    let id = engine.generate_visitor_id();
    assert_eq!(id.len(), DIGEST_HEX_LEN);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn auto_engine_is_deterministic_within_environment() {
    let engine = Fingerprinter::auto();
    assert_eq!(engine.generate_visitor_id(), engine.generate_visitor_id());
}

#[test]
fn full_pipeline_with_stub_signals() {
    let mut engine = Fingerprinter::new(WeightTable::empty());
    engine.register(StubSignal::boxed("canvas", "X"));
    engine.register(StubSignal::boxed("webgl", "Y"));
    engine.register(StubSignal::boxed("audio", "Z"));
    engine.register(StubSignal::boxed("fonts", "Arial,Georgia"));
    engine
        .set_weights(&weights(&[
            ("canvas", 0.3),
            ("webgl", 0.25),
            ("audio", 0.25),
            ("fonts", 0.2),
        ]))
        .unwrap();

    let id1 = engine.generate_visitor_id();
    let id2 = engine.generate_visitor_id();
    assert_eq!(id1, id2);

    // Entropy-adjust from a real run, then regenerate: still well-formed,
    // table still sums to 1.
    engine.adjust_weights().unwrap();
    let table = engine.weights();
    assert!((table.sum() - 1.0).abs() < 1e-9);
    assert_eq!(engine.generate_visitor_id().len(), DIGEST_HEX_LEN);
}

#[test]
fn weight_mutations_are_atomic_across_the_surface() {
    let mut engine = Fingerprinter::new(WeightTable::default());
    engine.register(StubSignal::boxed("canvas", "X"));

    let before = engine.weights();
    assert!(engine.set_weights(&weights(&[("canvas", -1.0)])).is_err());
    assert_eq!(engine.weights(), before);

    assert!(engine.set_weights(&weights(&[("canvas", 0.5)])).is_ok());
    assert!((engine.weights().sum() - 1.0).abs() < 1e-9);
}
