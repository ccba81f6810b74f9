//! Session key fingerprinting.
//!
//! Startup logs a truncated SHA-256 of the signing key so operators can tell
//! which key is active without the key material ever reaching a log line.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Lowercase hex of the first eight bytes of SHA-256 over the signing key.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use vitals_backend::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
