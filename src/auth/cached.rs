use crate::auth::{AccessToken, TokenCache, TokenSource};
use crate::error::ApiError;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Environment variable checked before the on-disk cache.
pub const ACCESS_TOKEN_ENV: &str = "DOCSTREE_ACCESS_TOKEN";

/// Read-only Drive scope the token must carry.
pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

/// Asks the user for a token during interactive sign-in.
pub trait ConsentPrompt: Send + Sync {
    /// `Ok(None)` means the user declined.
    fn request_token(&self) -> Result<Option<String>, ApiError>;
}

/// Prompts on the terminal with hidden input.
pub struct TerminalPrompt;

impl ConsentPrompt for TerminalPrompt {
    fn request_token(&self) -> Result<Option<String>, ApiError> {
        use dialoguer::Password;

        eprintln!(
            "Paste an OAuth access token with the {} scope\n(e.g. `gcloud auth print-access-token`).",
            DRIVE_READONLY_SCOPE
        );
        let token = Password::new()
            .with_prompt("Access token")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| ApiError::Auth(format!("Failed to get user input: {}", e)))?;
        let token = token.trim().to_string();
        Ok(if token.is_empty() { None } else { Some(token) })
    }
}

/// Token source layered as: in-process, environment, disk cache, prompt.
pub struct CachedTokenSource {
    cache: TokenCache,
    prompt: Box<dyn ConsentPrompt>,
    env_var: Option<String>,
    current: RwLock<Option<AccessToken>>,
}

impl CachedTokenSource {
    pub fn new(cache: TokenCache, prompt: Box<dyn ConsentPrompt>) -> Self {
        Self {
            cache,
            prompt,
            env_var: Some(ACCESS_TOKEN_ENV.to_string()),
            current: RwLock::new(None),
        }
    }

    /// Ignore the environment variable.
    pub fn without_env(mut self) -> Self {
        self.env_var = None;
        self
    }

    fn from_env(&self) -> Option<AccessToken> {
        let name = self.env_var.as_deref()?;
        std::env::var(name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(AccessToken::new)
    }

    fn from_cache(&self) -> Option<AccessToken> {
        match self.cache.load() {
            Ok(cached) => cached.map(|c| AccessToken::new(c.token)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable token cache: {}", e);
                None
            }
        }
    }

    fn remember(&self, token: AccessToken) -> AccessToken {
        *self.current.write() = Some(token.clone());
        token
    }
}

#[async_trait]
impl TokenSource for CachedTokenSource {
    async fn acquire_token(&self, interactive: bool) -> Result<Option<AccessToken>, ApiError> {
        if let Some(token) = self.current.read().clone() {
            return Ok(Some(token));
        }
        if let Some(token) = self.from_env() {
            tracing::debug!("Using access token from environment");
            return Ok(Some(self.remember(token)));
        }
        if let Some(token) = self.from_cache() {
            tracing::debug!(path = %self.cache.path().display(), "Using cached access token");
            return Ok(Some(self.remember(token)));
        }
        if !interactive {
            return Ok(None);
        }

        let secret = self
            .prompt
            .request_token()?
            .ok_or_else(|| ApiError::Auth("No token returned".to_string()))?;
        let token = AccessToken::new(secret);
        self.cache.store(&token)?;
        tracing::info!("Signed in; token cached");
        Ok(Some(self.remember(token)))
    }

    async fn revoke_token(&self, token: &AccessToken) -> Result<(), ApiError> {
        self.current.write().take();
        let cached = self.cache.load()?;
        if cached.map(|c| c.token == token.secret()).unwrap_or(false) {
            self.cache.clear()?;
        } else if self.from_env().as_ref() == Some(token) {
            tracing::warn!(
                "Token comes from {}; unset it to stay signed out",
                ACCESS_TOKEN_ENV
            );
        }
        Ok(())
    }
}
