//! Token types and expiry arithmetic.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Bearer token cached by the connection, together with its validity window.
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// Token value sent as the `access_token` query parameter.
    pub access_token: String,

    /// Instant after which the token must be treated as invalid.
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Create a token valid for `expires_in` seconds from now.
    #[must_use]
    pub fn new(access_token: String, expires_in: i64) -> Self {
        Self { access_token, expires_at: Utc::now() + Duration::seconds(expires_in) }
    }

    /// Strict expiry check: the token is invalid exactly when the expiry
    /// instant has been reached.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Seconds remaining until expiry (negative once expired).
    #[must_use]
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds()
    }
}

/// Identity endpoint reply for the client-credentials grant (RFC 6749).
#[derive(Debug, Deserialize)]
pub struct IdentityTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

impl From<IdentityTokenResponse> for CachedToken {
    fn from(response: IdentityTokenResponse) -> Self {
        Self::new(response.access_token, response.expires_in)
    }
}
