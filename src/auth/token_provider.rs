use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// Source of bearer tokens for the cloud API.
///
/// Implementations own the whole token lifecycle: interactive login, caching and refreshing.
/// The client asks for a token before every request and never stores it.
#[async_trait]
pub trait TokenProvider: Debug + Send + Sync {
    async fn access_token(&self) -> Result<String, TokenError>;
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("token unavailable: {0}")]
    Unavailable(String),
}

/// Hands out the same token on every call.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        StaticTokenProvider { token: token.into() }
    }
}

impl Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider").field("token", &"***").finish()
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        Ok(self.token.clone())
    }
}
