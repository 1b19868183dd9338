//! Storage trait for credential persistence

use ts_types::AppResult;

/// Fixed logical keys used by the auth flow.
///
/// Exactly one token is live at a time; each new login overwrites the
/// previous entry under the same key.
pub mod keys {
    /// The persisted bearer access token.
    pub const TOKEN: &str = "token";

    /// The PKCE code verifier for the in-flight login attempt.
    pub const VERIFIER: &str = "code_verifier";
}

/// Synchronous key-value storage for credentials.
///
/// Implementations must survive an application restart (except the
/// in-memory fake) and need not enforce any expiry; token lifetime is
/// provider-determined.
pub trait CredentialStorage {
    /// Retrieve a value, or `None` if the key is absent.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a value, overwriting any previous entry for the key.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}
