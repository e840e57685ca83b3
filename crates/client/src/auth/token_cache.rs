//! Thread-safe cache guarding the token check-then-refresh sequence.

use std::future::Future;
use std::sync::Arc;

use marketo_domain::Result;
use tokio::sync::RwLock;
use tracing::debug;

use super::types::CachedToken;

/// Shared slot for the connection's bearer token.
///
/// Cloning shares the underlying slot, so connection clones observe one
/// token lifecycle. Readers take the fast path; a missing or expired token
/// escalates to a write lock where the state is re-checked before fetching,
/// so concurrent callers never issue duplicate refresh requests or observe a
/// half-updated token/expiry pair.
#[derive(Clone, Default)]
pub struct TokenCache {
    inner: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenCache {
    /// Create an empty cache (never-fetched state).
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(None)) }
    }

    /// Return the cached token value if present and not expired.
    pub async fn valid_token(&self) -> Option<String> {
        let slot = self.inner.read().await;
        slot.as_ref().filter(|token| !token.is_expired()).map(|token| token.access_token.clone())
    }

    /// Return a valid token value, refreshing through `fetch` when the slot
    /// is empty or expired.
    ///
    /// The write lock is held across `fetch`, so a refresh in flight blocks
    /// other callers until the new token is stored. The slot is only mutated
    /// after a successful fetch.
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedToken>>,
    {
        if let Some(token) = self.valid_token().await {
            return Ok(token);
        }

        let mut slot = self.inner.write().await;

        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = slot.as_ref().filter(|token| !token.is_expired()) {
            debug!("token already refreshed by a concurrent caller");
            return Ok(token.access_token.clone());
        }

        let fresh = fetch().await?;
        debug!(seconds_until_expiry = fresh.seconds_until_expiry(), "stored refreshed token");
        let value = fresh.access_token.clone();
        *slot = Some(fresh);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::future::join_all;
    use marketo_domain::MarketoError;

    use super::*;

    #[tokio::test]
    async fn empty_cache_fetches_once() {
        let cache = TokenCache::new();
        let fetches = AtomicUsize::new(0);
        let fetches = &fetches;

        let token = cache
            .get_or_refresh(|| async move {
                fetches.fetch_add(1, Ordering::SeqCst);
                Ok(CachedToken::new("tok1".to_string(), 3600))
            })
            .await
            .expect("token");

        assert_eq!(token, "tok1");
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(cache.valid_token().await, Some("tok1".to_string()));
    }

    #[tokio::test]
    async fn unexpired_token_is_reused_without_fetching() {
        let cache = TokenCache::new();
        cache
            .get_or_refresh(|| async { Ok(CachedToken::new("tok1".to_string(), 3600)) })
            .await
            .expect("token");

        let token = cache
            .get_or_refresh(|| async {
                Err(MarketoError::Internal("fetch must not run".to_string()))
            })
            .await
            .expect("cached token");

        assert_eq!(token, "tok1");
    }

    #[tokio::test]
    async fn expired_token_triggers_refresh() {
        let cache = TokenCache::new();
        cache
            .get_or_refresh(|| async { Ok(CachedToken::new("tok1".to_string(), 0)) })
            .await
            .expect("token");

        let token = cache
            .get_or_refresh(|| async { Ok(CachedToken::new("tok2".to_string(), 3600)) })
            .await
            .expect("refreshed token");

        assert_eq!(token, "tok2");
    }

    #[tokio::test]
    async fn failed_fetch_leaves_cache_unchanged() {
        let cache = TokenCache::new();
        let result = cache
            .get_or_refresh(|| async { Err(MarketoError::Connection("refused".to_string())) })
            .await;

        assert!(matches!(result, Err(MarketoError::Connection(_))));
        assert_eq!(cache.valid_token().await, None);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_refresh() {
        let cache = TokenCache::new();
        let fetches = Arc::new(AtomicUsize::new(0));

        let calls = (0..8).map(|_| {
            let cache = cache.clone();
            let fetches = fetches.clone();
            async move {
                cache
                    .get_or_refresh(|| async move {
                        fetches.fetch_add(1, Ordering::SeqCst);
                        // Widen the race window while the write lock is held.
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        Ok(CachedToken::new("tok1".to_string(), 3600))
                    })
                    .await
            }
        });

        let tokens = join_all(calls).await;

        assert!(tokens.iter().all(|token| matches!(token.as_deref(), Ok("tok1"))));
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }
}
