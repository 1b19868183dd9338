//! Shared types for the OAuth flow

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OAuth client configuration for the catalog provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth client identifier registered with the provider.
    pub client_id: String,

    /// Authorization endpoint URL (browser navigation target).
    pub auth_endpoint: String,

    /// Token endpoint URL (form-encoded POST target).
    pub token_endpoint: String,

    /// Redirect target. Must exactly match the value pre-registered with
    /// the provider, including host form and trailing slash.
    pub redirect_uri: String,

    /// Requested permission scopes: scope name -> what it grants.
    /// Basic track search needs none, so this is empty by default.
    #[serde(default)]
    pub scopes: BTreeMap<String, String>,
}

impl AuthConfig {
    /// Space-joined scope list, in stable (sorted) order.
    pub fn scope_string(&self) -> String {
        self.scopes.keys().cloned().collect::<Vec<_>>().join(" ")
    }
}

/// Which OAuth grant the session controller drives.
///
/// The two variants are mutually exclusive; a deployment picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantKind {
    /// Authorization Code flow with PKCE (S256). The code returned on the
    /// redirect is exchanged for a token at the token endpoint.
    AuthorizationCodePkce,

    /// Legacy implicit grant: the provider embeds the access token
    /// directly in the redirect URL fragment. No exchange step and no
    /// refresh token.
    ImplicitFragment,
}

/// Token response from the provider's token endpoint.
///
/// Only `access_token` is required; the remaining fields are accepted but
/// nothing downstream depends on them (expiry is provider-determined and
/// not tracked locally).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token (bearer credential)
    pub access_token: String,

    /// Token type (usually "Bearer")
    #[serde(default)]
    pub token_type: String,

    /// Expires in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,

    /// Refresh token (optional; never issued by the implicit variant)
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Granted scope (optional)
    #[serde(default)]
    pub scope: Option<String>,
}
