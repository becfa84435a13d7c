//! Admin credential helpers
//!
//! Passwords are stored as SHA-256 over `salt ‖ password` with a random
//! per-user salt. Session tokens are 32 random bytes rendered as hex.
//!
//! # Pure Functions
//!
//! No database or HTTP dependencies here; storage of users and sessions lives
//! in the server crate.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Role name granting access to the admin API
pub const ADMIN_ROLE: &str = "ADMIN";

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    to_hex(&bytes)
}

/// Generate a fresh 16-byte salt as hex
pub fn generate_salt() -> String {
    random_hex(16)
}

/// Generate an opaque 32-byte session token as hex
pub fn generate_session_token() -> String {
    random_hex(32)
}

/// Hash a password with the given salt (64 hex chars)
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a password against a stored salt and hash
///
/// Compares every byte so timing does not depend on the mismatch position.
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    let calculated = hash_password(password, salt);
    if calculated.len() != expected_hash.len() {
        return false;
    }
    calculated
        .bytes()
        .zip(expected_hash.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
