use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Seconds subtracted from the upstream expiry so a token is refreshed
/// before it actually lapses.
const REFRESH_MARGIN_SECS: i64 = 60;

/// OAuth client-credentials response from the provider.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// Bearer token cache with an explicit expiry instant.
///
/// Owned by the client that performs the OAuth flow and injected where
/// needed — never module-level state.
#[derive(Debug, Default)]
pub struct TokenCache {
    current: Option<CachedToken>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The cached token, unless it has reached its refresh margin.
    pub fn current(&self, now: DateTime<Utc>) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|token| token.expires_at > now)
            .map(|token| token.access_token.as_str())
    }

    /// Store a freshly issued token.
    pub fn store(&mut self, response: TokenResponse, now: DateTime<Utc>) {
        self.current = Some(CachedToken {
            access_token: response.access_token,
            expires_at: now + Duration::seconds(response.expires_in - REFRESH_MARGIN_SECS),
        });
    }

    /// Drop the cached token, forcing the next call to re-authenticate.
    pub fn invalidate(&mut self) {
        self.current = None;
    }
}
