//! Access token acquisition and revocation.

pub mod cache;
pub mod cached;

pub use cache::{CachedToken, TokenCache};
pub use cached::{CachedTokenSource, ConsentPrompt, TerminalPrompt, ACCESS_TOKEN_ENV};

use crate::error::ApiError;
use async_trait::async_trait;
use std::fmt;

/// Bearer token for the storage API. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

/// Produces and revokes access tokens.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Interactive mode may ask the user for consent. Non-interactive mode
    /// returns `Ok(None)` when no credential is cached.
    async fn acquire_token(&self, interactive: bool) -> Result<Option<AccessToken>, ApiError>;

    /// Forget the token. Best-effort; callers ignore the result.
    async fn revoke_token(&self, token: &AccessToken) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let token = AccessToken::new("ya29.secret");
        assert_eq!(format!("{:?}", token), "AccessToken(****)");
        assert_eq!(token.secret(), "ya29.secret");
    }
}
