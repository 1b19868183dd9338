//! Error types and conversions

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// The provider redirected back with an `error` query parameter
    /// (consent denied or provider-side failure). Carries the provider's
    /// error code verbatim.
    #[error("Authorization failed: {0}")]
    ProviderAuth(String),

    /// A token exchange was attempted without a stored code verifier.
    /// Indicates a corrupted or cross-attempt login state; never retried.
    #[error("No code verifier in storage; cannot complete token exchange")]
    MissingVerifier,

    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchangeFailed { status: u16, body: String },

    #[error("Token endpoint returned no access token: {body}")]
    MalformedTokenResponse { body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog request failed: {0}")]
    Catalog(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
