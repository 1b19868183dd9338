//! Authorization request construction
//!
//! Builds the redirect URL to the provider's authorization endpoint. For
//! the PKCE grant this has a side effect: a fresh code verifier is
//! generated and persisted so the later token exchange can prove
//! possession of it.

use crate::pkce::PkceChallenge;
use crate::types::{AuthConfig, GrantKind};
use tracing::debug;
use ts_store::{keys, CredentialStorage};
use ts_types::AppResult;

/// Build the authorization URL for a new login attempt.
///
/// For `AuthorizationCodePkce` a fresh verifier is persisted under
/// `code_verifier` *before* the URL is returned; if persistence fails the
/// build fails, since an authorization URL whose exchange can never
/// complete would be worse than no URL at all. A second call before the
/// first exchange completes overwrites the stored verifier, invalidating
/// the earlier in-flight attempt.
pub fn build_authorization_url<S: CredentialStorage>(
    config: &AuthConfig,
    grant: GrantKind,
    storage: &S,
) -> AppResult<String> {
    let mut url = match grant {
        GrantKind::AuthorizationCodePkce => {
            let pkce = PkceChallenge::generate();
            storage.set(keys::VERIFIER, &pkce.code_verifier)?;
            debug!("Persisted fresh code verifier for login attempt");

            format!(
                "{}?client_id={}&response_type=code&redirect_uri={}&code_challenge_method={}&code_challenge={}",
                config.auth_endpoint,
                urlencoding::encode(&config.client_id),
                urlencoding::encode(&config.redirect_uri),
                urlencoding::encode(&pkce.code_challenge_method),
                urlencoding::encode(&pkce.code_challenge),
            )
        }
        GrantKind::ImplicitFragment => format!(
            "{}?client_id={}&response_type=token&redirect_uri={}",
            config.auth_endpoint,
            urlencoding::encode(&config.client_id),
            urlencoding::encode(&config.redirect_uri),
        ),
    };

    let scopes = config.scope_string();
    if !scopes.is_empty() {
        url.push_str(&format!("&scope={}", urlencoding::encode(&scopes)));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkce::challenge_for;
    use std::collections::BTreeMap;
    use ts_store::MemoryStore;
    use ts_types::{AppError, AppResult};

    fn test_config() -> AuthConfig {
        AuthConfig {
            client_id: "test_client".to_string(),
            auth_endpoint: "https://accounts.example.com/authorize".to_string(),
            token_endpoint: "https://accounts.example.com/api/token".to_string(),
            redirect_uri: "http://127.0.0.1:3000/".to_string(),
            scopes: BTreeMap::new(),
        }
    }

    /// Extract a raw query parameter value from a built URL.
    fn query_value(url: &str, name: &str) -> Option<String> {
        let query = url.split_once('?')?.1;
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| urlencoding::decode(value).unwrap().into_owned())
        })
    }

    #[test]
    fn test_pkce_url_contains_required_params() {
        let store = MemoryStore::new();
        let url =
            build_authorization_url(&test_config(), GrantKind::AuthorizationCodePkce, &store)
                .unwrap();

        assert!(url.starts_with("https://accounts.example.com/authorize?"));
        assert_eq!(query_value(&url, "client_id").as_deref(), Some("test_client"));
        assert_eq!(query_value(&url, "response_type").as_deref(), Some("code"));
        assert_eq!(
            query_value(&url, "redirect_uri").as_deref(),
            Some("http://127.0.0.1:3000/")
        );
        assert_eq!(
            query_value(&url, "code_challenge_method").as_deref(),
            Some("S256")
        );
        assert!(query_value(&url, "code_challenge").is_some());
    }

    #[test]
    fn test_challenge_in_url_matches_persisted_verifier() {
        let store = MemoryStore::new();
        let url =
            build_authorization_url(&test_config(), GrantKind::AuthorizationCodePkce, &store)
                .unwrap();

        let verifier = store.get(keys::VERIFIER).unwrap().expect("verifier stored");
        assert_eq!(
            query_value(&url, "code_challenge").unwrap(),
            challenge_for(&verifier)
        );
    }

    #[test]
    fn test_scope_omitted_when_empty() {
        let store = MemoryStore::new();
        let url =
            build_authorization_url(&test_config(), GrantKind::AuthorizationCodePkce, &store)
                .unwrap();

        assert!(!url.contains("scope="));
    }

    #[test]
    fn test_scope_space_joined_when_configured() {
        let mut config = test_config();
        config
            .scopes
            .insert("user-read-email".to_string(), "account email".to_string());
        config
            .scopes
            .insert("user-read-private".to_string(), "profile".to_string());

        let store = MemoryStore::new();
        let url = build_authorization_url(&config, GrantKind::AuthorizationCodePkce, &store)
            .unwrap();

        assert!(url.contains("scope=user-read-email%20user-read-private"));
    }

    #[test]
    fn test_implicit_url_has_token_response_type_and_no_verifier() {
        let store = MemoryStore::new();
        let url =
            build_authorization_url(&test_config(), GrantKind::ImplicitFragment, &store).unwrap();

        assert_eq!(query_value(&url, "response_type").as_deref(), Some("token"));
        assert!(!url.contains("code_challenge"));
        assert_eq!(store.get(keys::VERIFIER).unwrap(), None);
    }

    #[test]
    fn test_fresh_verifier_per_attempt() {
        let store = MemoryStore::new();

        build_authorization_url(&test_config(), GrantKind::AuthorizationCodePkce, &store)
            .unwrap();
        let first = store.get(keys::VERIFIER).unwrap().unwrap();

        build_authorization_url(&test_config(), GrantKind::AuthorizationCodePkce, &store)
            .unwrap();
        let second = store.get(keys::VERIFIER).unwrap().unwrap();

        // The second attempt overwrites the first verifier.
        assert_ne!(first, second);
    }

    /// Store whose writes always fail, to exercise the persistence edge case.
    struct BrokenStore;

    impl CredentialStorage for BrokenStore {
        fn get(&self, _key: &str) -> AppResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::Storage("disk full".to_string()))
        }

        fn remove(&self, _key: &str) -> AppResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_verifier_persistence_failure_aborts_build() {
        let err =
            build_authorization_url(&test_config(), GrantKind::AuthorizationCodePkce, &BrokenStore)
                .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
