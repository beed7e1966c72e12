//! # traceprint-core
//!
//! Best-effort device identifiers from weighted environment signals, with no
//! server-side state.
//!
//! The library samples a set of environment-derived signals (rendering stack,
//! audio hardware, installed fonts, hardware/OS hints), hashes each raw value,
//! and combines the digests under a weight table into one stable identifier.
//!
//! ## Quick start
//!
//! ```no_run
//! use traceprint_core::Fingerprinter;
//!
//! // Auto-detect all signals available on this machine
//! let engine = Fingerprinter::auto();
//!
//! // One 64-hex-character visitor identifier
//! let id = engine.generate_visitor_id();
//! assert_eq!(id.len(), 64);
//! ```
//!
//! ## Architecture
//!
//! Signals → per-signal digest → weighted repetition → concatenate → digest
//!
//! Each signal's digest is repeated `floor(weight * 100)` times before
//! concatenation, so the weight table controls how much each facet influences
//! the final hash. Weights can be set explicitly ([`Fingerprinter::set_weights`])
//! or derived adaptively from digest entropy ([`Fingerprinter::adjust_weights`]).
//!
//! The identifier is a tracking heuristic, not a commitment scheme: no
//! cryptographic-security, stability, or anti-spoofing claims are made.
//!
//! Every signal implements the [`SignalSource`] trait; a probe that finds no
//! capability returns an empty string rather than failing, so
//! [`Fingerprinter::generate_visitor_id`] always completes.

pub mod digest;
pub mod engine;
pub mod entropy;
pub mod error;
pub mod signal;
pub mod signals;
pub mod weights;

pub use digest::{DIGEST_HEX_LEN, digest};
pub use engine::{Fingerprinter, SignalDigest, SignalHealth, SignalReport};
pub use entropy::{entropy_weights, shannon_entropy};
pub use error::{DegenerateEntropyError, InvalidWeightError};
pub use signal::{SignalInfo, SignalSource};
pub use signals::{all_signals, detect_available_signals};
pub use weights::{DEFAULT_WEIGHTS, WeightTable, repeat_count};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
