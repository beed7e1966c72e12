//! SHA-256 digest of a string, encoded as lowercase hex.
//!
//! Every hash in the crate flows through [`digest`] — signals are digested
//! individually, and the combined weighted string is digested once more to
//! produce the final visitor identifier. Keeping a single gateway makes the
//! determinism guarantee auditable.

use std::fmt::Write;

use sha2::{Digest, Sha256};

/// Length in characters of every digest produced by [`digest`].
pub const DIGEST_HEX_LEN: usize = 64;

/// Hash a string to a 64-character lowercase hex digest.
///
/// Total and deterministic: any input (including the empty string) yields a
/// fixed-length digest, and equal inputs always yield equal digests.
pub fn digest(input: &str) -> String {
    let mut h = Sha256::new();
    h.update(input.as_bytes());
    let bytes: [u8; 32] = h.finalize().into();

    let mut hex = String::with_capacity(DIGEST_HEX_LEN);
    for b in bytes {
        // Writing to a String cannot fail.
        let _ = write!(hex, "{b:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_fixed_length() {
        let long = "x".repeat(10_000);
        for input in ["", "a", "hello world", "\u{1f980} unicode", long.as_str()] {
            assert_eq!(digest(input).len(), DIGEST_HEX_LEN, "input {input:?}");
        }
    }

    #[test]
    fn test_digest_deterministic() {
        assert_eq!(digest("canvas-data"), digest("canvas-data"));
    }

    #[test]
    fn test_digest_lowercase_hex() {
        let d = digest("anything");
        assert!(d.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_digest_known_vector() {
        // SHA-256 of the empty string.
        assert_eq!(
            digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_digest_distinct_inputs_differ() {
        assert_ne!(digest("X"), digest("Y"));
    }
}
