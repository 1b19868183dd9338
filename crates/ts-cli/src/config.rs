//! CLI configuration
//!
//! Loaded from a user-editable YAML file. Defaults point at the Spotify
//! endpoints; the OAuth client id must be filled in by the user (it is the
//! one value registered per deployment).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use ts_oauth::{AuthConfig, GrantKind};
use ts_types::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// OAuth client id registered with the provider. Required.
    #[serde(default)]
    pub client_id: String,

    #[serde(default = "default_auth_endpoint")]
    pub auth_endpoint: String,

    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,

    /// Must exactly match the redirect URI registered with the provider.
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    /// Web API base for catalog queries.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Which OAuth grant to drive. PKCE unless a legacy deployment needs
    /// the implicit variant.
    #[serde(default = "default_grant")]
    pub grant: GrantKind,

    /// Requested scopes: scope name -> what it grants. Track search needs
    /// none.
    #[serde(default)]
    pub scopes: BTreeMap<String, String>,
}

fn default_auth_endpoint() -> String {
    "https://accounts.spotify.com/authorize".to_string()
}

fn default_token_endpoint() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_redirect_uri() -> String {
    "http://127.0.0.1:3000/".to_string()
}

fn default_api_base() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_grant() -> GrantKind {
    GrantKind::AuthorizationCodePkce
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            auth_endpoint: default_auth_endpoint(),
            token_endpoint: default_token_endpoint(),
            redirect_uri: default_redirect_uri(),
            api_base: default_api_base(),
            grant: default_grant(),
            scopes: BTreeMap::new(),
        }
    }
}

impl CliConfig {
    /// Load from the given path; a missing file yields the defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let config = serde_yaml::from_str(&contents).map_err(|e| {
                    AppError::Config(format!("Invalid config {}: {}", path.display(), e))
                })?;
                debug!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}; using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(AppError::Config(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// The auth-flow view of this configuration. Fails when the client id
    /// has not been filled in, since no flow can work without it.
    pub fn auth_config(&self) -> AppResult<AuthConfig> {
        if self.client_id.is_empty() {
            return Err(AppError::Config(format!(
                "client_id is not set; add it to {}",
                crate::paths::config_file()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "the config file".to_string())
            )));
        }

        Ok(AuthConfig {
            client_id: self.client_id.clone(),
            auth_endpoint: self.auth_endpoint.clone(),
            token_endpoint: self.token_endpoint.clone(),
            redirect_uri: self.redirect_uri.clone(),
            scopes: self.scopes.clone(),
        })
    }
}
