//! Credential storage module
//!
//! Provides the key-value storage used to persist the access token and the
//! in-flight PKCE code verifier across application restarts. Storage is an
//! injected capability so the session controller can be tested with an
//! in-memory fake.

mod file_store;
mod memory_store;
mod storage_trait;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use storage_trait::{keys, CredentialStorage};
