//! Music-catalog search client
//!
//! Issues authenticated track searches against the provider's Web API.
//! A consumer of the auth flow: it takes a valid bearer token string and
//! reports failures independently of session state.

mod client;
mod types;

pub use client::CatalogClient;
pub use types::Track;
