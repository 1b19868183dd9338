//! Session controller
//!
//! Drives the credential lifecycle across application launches: detect a
//! stored token, detect a returned authorization code or provider error,
//! detect a legacy implicit-flow fragment token, and report the outcome to
//! the consuming UI. The flow variants share one controller parameterized
//! by [`GrantKind`] rather than maintaining parallel code paths.

use crate::authorize::build_authorization_url;
use crate::navigation::Navigation;
use crate::token_exchange::TokenExchanger;
use crate::types::{AuthConfig, GrantKind};
use tracing::{debug, error, info, warn};
use ts_store::{keys, CredentialStorage};
use ts_types::{AppError, AppResult};
use url::Url;

/// Session state as observed after [`SessionController::resume`].
///
/// `PendingExchange` exists only while the token exchange is in flight
/// (the controller's single suspension point); `resume` always settles on
/// one of the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    PendingExchange,
    Authenticated,
    AuthError,
}

/// In-memory session snapshot readable by consumers.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    /// The live access token, if authenticated.
    pub token: Option<String>,

    /// The most recent auth failure, if any. Cleared on a fresh login.
    pub error: Option<String>,
}

impl AuthSession {
    pub fn state(&self) -> SessionState {
        if self.token.is_some() {
            SessionState::Authenticated
        } else if self.error.is_some() {
            SessionState::AuthError
        } else {
            SessionState::Unauthenticated
        }
    }
}

/// Orchestrates login, resume-on-launch, and logout.
///
/// Storage and navigation are injected capabilities: the browser-global
/// mutable state (persistent key-value store, location bar) is the natural
/// external boundary, so it arrives as traits instead of being reached for
/// directly.
pub struct SessionController<S: CredentialStorage, N: Navigation> {
    config: AuthConfig,
    grant: GrantKind,
    storage: S,
    navigation: N,
    exchanger: TokenExchanger,
    session: AuthSession,
}

impl<S: CredentialStorage, N: Navigation> SessionController<S, N> {
    pub fn new(config: AuthConfig, grant: GrantKind, storage: S, navigation: N) -> Self {
        Self {
            config,
            grant,
            storage,
            navigation,
            exchanger: TokenExchanger::new(),
            session: AuthSession::default(),
        }
    }

    /// Current session snapshot.
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Current state, derived from the snapshot.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn grant(&self) -> GrantKind {
        self.grant
    }

    /// Start a fresh login attempt: clear any displayed error and build
    /// the authorization URL (persisting a fresh verifier for the PKCE
    /// grant). The caller navigates to the returned URL.
    pub fn login(&mut self) -> AppResult<String> {
        self.session.error = None;
        build_authorization_url(&self.config, self.grant, &self.storage)
    }

    /// Clear the persisted token and verifier and reset the in-memory
    /// session. The next launch resumes as `Unauthenticated`.
    pub fn logout(&mut self) -> AppResult<()> {
        self.storage.remove(keys::TOKEN)?;
        self.storage.remove(keys::VERIFIER)?;
        self.session = AuthSession::default();
        info!("Logged out; credentials cleared");
        Ok(())
    }

    /// Evaluate the state transitions once, as on a page load.
    ///
    /// Order matters and mirrors the source flow: a stored token wins
    /// outright (zero network calls), then a provider `error` parameter,
    /// then the grant-specific detection of a returned code or fragment
    /// token. Anything else leaves the session `Unauthenticated`.
    ///
    /// Flow-level failures (provider error, failed exchange) settle in the
    /// session's `error` field and return `Ok(AuthError)`; only
    /// infrastructure failures (storage, unparseable current URL)
    /// propagate as `Err`.
    pub async fn resume(&mut self) -> AppResult<SessionState> {
        if let Some(token) = self.storage.get(keys::TOKEN)? {
            debug!("Found stored access token; session authenticated");
            self.session.token = Some(token);
            return Ok(SessionState::Authenticated);
        }

        let current = self.navigation.current_url();
        let url = Url::parse(&current)
            .map_err(|e| AppError::Config(format!("Invalid current URL {}: {}", current, e)))?;

        if let Some(code) = query_param(&url, "error") {
            warn!("Provider returned authorization error: {}", code);
            self.session.error = Some(AppError::ProviderAuth(code).to_string());
            return Ok(SessionState::AuthError);
        }

        match self.grant {
            GrantKind::AuthorizationCodePkce => {
                if let Some(code) = query_param(&url, "code") {
                    return self.complete_exchange(&url, &code).await;
                }
            }
            GrantKind::ImplicitFragment => {
                if let Some(token) = fragment_token(url.fragment().unwrap_or("")) {
                    return self.adopt_fragment_token(&url, token);
                }
            }
        }

        Ok(SessionState::Unauthenticated)
    }

    /// Transition `PendingExchange` -> `Authenticated` | `AuthError`.
    async fn complete_exchange(&mut self, url: &Url, code: &str) -> AppResult<SessionState> {
        debug!("Authorization code detected; starting token exchange");

        match self
            .exchanger
            .exchange_code(&self.config, code, &self.storage)
            .await
        {
            Ok(tokens) => {
                self.storage.set(keys::TOKEN, &tokens.access_token)?;

                // Strip the consumed single-use code (and the state echo)
                // from the visible URL.
                let cleaned = strip_query_params(url, &["code", "state"]);
                self.navigation.replace_url(cleaned.as_str());

                self.session.token = Some(tokens.access_token);
                Ok(SessionState::Authenticated)
            }
            Err(e) => {
                error!("Token exchange failed: {}", e);
                self.session.error = Some(e.to_string());
                Ok(SessionState::AuthError)
            }
        }
    }

    /// Legacy implicit variant: the token arrives in the URL fragment and
    /// is adopted without a network round-trip.
    fn adopt_fragment_token(&mut self, url: &Url, token: String) -> AppResult<SessionState> {
        debug!("Access token found in URL fragment");

        self.storage.set(keys::TOKEN, &token)?;

        let mut cleaned = url.clone();
        cleaned.set_fragment(None);
        self.navigation.replace_url(cleaned.as_str());

        self.session.token = Some(token);
        Ok(SessionState::Authenticated)
    }
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Remove the named query parameters, preserving the rest of the URL.
fn strip_query_params(url: &Url, names: &[&str]) -> Url {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !names.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut cleaned = url.clone();
    cleaned.set_query(None);
    if !retained.is_empty() {
        let mut pairs = cleaned.query_pairs_mut();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
    }
    cleaned
}

/// Locate `access_token` among `&`-separated fragment entries.
fn fragment_token(fragment: &str) -> Option<String> {
    fragment.split('&').find_map(|entry| {
        let (key, value) = entry.split_once('=')?;
        (key == "access_token" && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_token_extraction() {
        assert_eq!(
            fragment_token("access_token=abc123&token_type=Bearer"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_fragment_token_position_independent() {
        assert_eq!(
            fragment_token("token_type=Bearer&expires_in=3600&access_token=xyz"),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn test_fragment_token_absent() {
        assert_eq!(fragment_token(""), None);
        assert_eq!(fragment_token("token_type=Bearer"), None);
        assert_eq!(fragment_token("access_token="), None);
        assert_eq!(fragment_token("access_token"), None);
    }

    #[test]
    fn test_strip_query_params_removes_code_and_state() {
        let url = Url::parse("http://127.0.0.1:3000/?code=abc&state=xyz").unwrap();
        let cleaned = strip_query_params(&url, &["code", "state"]);
        assert_eq!(cleaned.as_str(), "http://127.0.0.1:3000/");
    }

    #[test]
    fn test_strip_query_params_preserves_other_params() {
        let url = Url::parse("http://127.0.0.1:3000/?foo=bar&code=abc").unwrap();
        let cleaned = strip_query_params(&url, &["code", "state"]);
        assert_eq!(cleaned.as_str(), "http://127.0.0.1:3000/?foo=bar");
    }

    #[test]
    fn test_query_param_lookup() {
        let url = Url::parse("http://127.0.0.1:3000/?error=access_denied").unwrap();
        assert_eq!(
            query_param(&url, "error"),
            Some("access_denied".to_string())
        );
        assert_eq!(query_param(&url, "code"), None);
    }

    #[test]
    fn test_session_state_derivation() {
        let mut session = AuthSession::default();
        assert_eq!(session.state(), SessionState::Unauthenticated);

        session.error = Some("access_denied".to_string());
        assert_eq!(session.state(), SessionState::AuthError);

        session.token = Some("abc".to_string());
        assert_eq!(session.state(), SessionState::Authenticated);
    }
}
