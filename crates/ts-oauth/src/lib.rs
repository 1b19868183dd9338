//! OAuth 2.0 authorization and session lifecycle for TuneScout
//!
//! Implements the Authorization Code flow with PKCE (S256) against the
//! music-catalog provider, plus the legacy implicit-fragment variant, behind
//! a single session controller.
//!
//! # Features
//! - PKCE verifier/challenge generation per RFC 7636
//! - Authorization URL construction with optional scopes
//! - Authorization-code-for-token exchange
//! - Session state machine evaluated once per launch
//! - Injected storage and navigation capabilities for testability
//!
//! # Usage Example
//! ```no_run
//! use ts_oauth::{AuthConfig, GrantKind, MemoryNavigation, SessionController};
//! use ts_store::MemoryStore;
//!
//! # async fn run(config: AuthConfig, redirect_url: String) -> ts_types::AppResult<()> {
//! let navigation = MemoryNavigation::new(redirect_url);
//! let mut controller = SessionController::new(
//!     config,
//!     GrantKind::AuthorizationCodePkce,
//!     MemoryStore::new(),
//!     navigation,
//! );
//! let state = controller.resume().await?;
//! # Ok(())
//! # }
//! ```

mod authorize;
mod navigation;
mod pkce;
mod session;
mod token_exchange;
mod types;

pub use authorize::build_authorization_url;
pub use navigation::{MemoryNavigation, Navigation};
pub use pkce::{challenge_for, generate_secret, PkceChallenge, VERIFIER_LENGTH};
pub use session::{AuthSession, SessionController, SessionState};
pub use token_exchange::TokenExchanger;
pub use types::{AuthConfig, GrantKind, TokenResponse};
