//! Webhook HMAC-SHA256 signature verification.
//!
//! Inbound Denea webhooks carry an `X-Denea-Signature` header: the
//! hex-encoded HMAC-SHA256 of the raw request body under the shared
//! webhook secret. Verification never panics and never errors; every
//! failure mode (unconfigured secret, length mismatch, digest mismatch)
//! collapses to `false`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex-encoded HMAC-SHA256 of `payload` under `secret`.
pub fn compute_signature(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a provided hex signature against the exact raw payload bytes.
///
/// Returns `false` when the secret is unconfigured (empty) or the
/// signature does not match. The comparison is constant-time so the
/// verdict leaks nothing about how much of the digest matched.
pub fn verify_signature(payload: &[u8], provided_hex: &str, secret: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    let expected = compute_signature(secret, payload);
    expected
        .as_bytes()
        .ct_eq(provided_hex.trim().as_bytes())
        .into()
}

// ---------------------------------------------------------------------------
// hex encoding helper (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
