//! Short, non-reversible identifier for the active session signing key.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First eight bytes of the SHA-256 of the key's signing half, hex encoded.
///
/// Safe to log: it tells two keys apart without revealing either.
///
/// ```rust
/// use actix_web::cookie::Key;
/// use intranet::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn derived_keys_have_stable_fingerprints() {
        let key = Key::derive_from(&[7_u8; 64]);
        let again = Key::derive_from(&[7_u8; 64]);

        assert_eq!(key_fingerprint(&key), key_fingerprint(&again));
    }

    #[rstest]
    fn fingerprint_is_lowercase_hex() {
        let fp = key_fingerprint(&Key::generate());

        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[rstest]
    fn distinct_keys_are_distinguishable() {
        let a = Key::derive_from(&[b'a'; 64]);
        let b = Key::derive_from(&[b'b'; 64]);

        assert_ne!(key_fingerprint(&a), key_fingerprint(&b));
    }
}
