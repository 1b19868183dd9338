//! PKCE (Proof Key for Code Exchange) utilities for OAuth 2.0
//!
//! Implements PKCE as defined in RFC 7636 with the S256 (SHA-256)
//! challenge method.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{thread_rng, Rng};
use sha2::{Digest, Sha256};

/// Unreserved URL-safe characters permitted in a code verifier
/// (RFC 7636 section 4.1): A-Z a-z 0-9 - . _ ~
const VERIFIER_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// Verifier length used for new login attempts (RFC allows 43-128).
pub const VERIFIER_LENGTH: usize = 64;

/// PKCE challenge containing code verifier and challenge
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    /// Code verifier (random string, 43-128 characters)
    pub code_verifier: String,

    /// Code challenge (BASE64URL(SHA256(code_verifier)))
    pub code_challenge: String,

    /// Challenge method (always "S256" for SHA-256)
    pub code_challenge_method: String,
}

impl PkceChallenge {
    /// Generate a fresh verifier/challenge pair for a new login attempt.
    pub fn generate() -> Self {
        Self::from_verifier(generate_secret(VERIFIER_LENGTH))
    }

    /// Derive the pair from an existing verifier (for reconstruction or
    /// tests). The challenge is deterministic for a given verifier.
    pub fn from_verifier(verifier: impl Into<String>) -> Self {
        let code_verifier = verifier.into();
        let code_challenge = challenge_for(&code_verifier);

        Self {
            code_verifier,
            code_challenge,
            code_challenge_method: "S256".to_string(),
        }
    }
}

/// Generate a cryptographically strong random string of exactly `length`
/// characters from the unreserved URL-safe set.
///
/// `thread_rng` is a CSPRNG; absence of a secure random source panics,
/// which is fatal by design (the flow cannot proceed without one).
pub fn generate_secret(length: usize) -> String {
    let mut rng = thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..VERIFIER_CHARSET.len());
            VERIFIER_CHARSET[idx] as char
        })
        .collect()
}

/// Compute the S256 code challenge for a verifier:
/// BASE64URL-no-pad(SHA256(UTF-8 bytes of verifier)).
///
/// Pure and deterministic. This transform is the interoperability contract
/// with the provider's own verification of the same hash.
pub fn challenge_for(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    let hash = hasher.finalize();
    URL_SAFE_NO_PAD.encode(hash)
}
