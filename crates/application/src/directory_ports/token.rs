use async_trait::async_trait;
use rolescope_core::AppResult;
use rolescope_domain::{AccessToken, Credentials};

/// Port exchanging service credentials for a bearer token.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Performs one client-credential exchange.
    ///
    /// Returns `Ok(None)` when the identity provider answered without an
    /// access token. Transport failures are returned as errors. Never retries.
    async fn acquire_token(&self, credentials: &Credentials) -> AppResult<Option<AccessToken>>;
}
