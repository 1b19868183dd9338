//! Authorization-code-for-token exchange

use crate::types::{AuthConfig, TokenResponse};
use reqwest::Client;
use std::collections::HashMap;
use tracing::{error, info};
use ts_store::{keys, CredentialStorage};
use ts_types::{AppError, AppResult};

/// Client for the provider's token endpoint.
pub struct TokenExchanger {
    client: Client,
}

impl TokenExchanger {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Preconditions: the code verifier persisted when the authorization
    /// URL was built must still be retrievable; absence aborts the call
    /// with `MissingVerifier` before any network I/O.
    ///
    /// Issues exactly one form-encoded POST. The authorization code is
    /// single-use, so no retry is attempted on failure — the provider
    /// would reject a resubmitted code anyway.
    pub async fn exchange_code<S: CredentialStorage>(
        &self,
        config: &AuthConfig,
        authorization_code: &str,
        storage: &S,
    ) -> AppResult<TokenResponse> {
        let code_verifier = storage
            .get(keys::VERIFIER)?
            .ok_or(AppError::MissingVerifier)?;

        info!("Exchanging authorization code for access token");

        let mut params = HashMap::new();
        params.insert("client_id", config.client_id.as_str());
        params.insert("grant_type", "authorization_code");
        params.insert("code", authorization_code);
        params.insert("redirect_uri", config.redirect_uri.as_str());
        params.insert("code_verifier", code_verifier.as_str());

        let response = self
            .client
            .post(&config.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to send token request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read token response: {}", e)))?;

        if !status.is_success() {
            error!("Token exchange failed with status {}: {}", status, body);
            return Err(AppError::TokenExchangeFailed {
                status: status.as_u16(),
                body,
            });
        }

        // A success status without an access token is still a failure;
        // keep the raw body for diagnosis.
        let tokens: TokenResponse = match serde_json::from_str(&body) {
            Ok(tokens) => tokens,
            Err(_) => return Err(AppError::MalformedTokenResponse { body }),
        };
        if tokens.access_token.is_empty() {
            return Err(AppError::MalformedTokenResponse { body });
        }

        info!("Token exchange successful");

        Ok(tokens)
    }
}

impl Default for TokenExchanger {
    fn default() -> Self {
        Self::new()
    }
}
