//! Authenticated gateway to the Marketo REST API.
//!
//! `Connection` owns the credentials, the cached bearer token, endpoint URL
//! construction and the response pipeline, and exposes the two verbs the
//! endpoint catalog consumes. Cloning is cheap and clones share one token
//! lifecycle.

use std::time::Duration;

use async_trait::async_trait;
use marketo_domain::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECS, GRANT_TYPE_CLIENT_CREDENTIALS, IDENTITY_TOKEN_PATH,
    REST_API_PREFIX, USER_AGENT,
};
use marketo_domain::{LeadRecord, MarketoConfig, MarketoError, Result};
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::auth::{CachedToken, IdentityTokenResponse, TokenCache};
use crate::http::HttpClient;
use crate::response::{self, RestEnvelope};

/// Provides bearer tokens for Marketo API calls.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Retrieve a token valid at the time of the call.
    async fn access_token(&self) -> Result<String>;
}

/// Single authenticated gateway to one Marketo instance.
#[derive(Clone)]
pub struct Connection {
    config: MarketoConfig,
    base_url: String,
    cookie_prefix: String,
    http: HttpClient,
    tokens: TokenCache,
}

impl Connection {
    /// Create a connection to `https://{instance}.mktorest.com`.
    pub fn new(config: MarketoConfig) -> Result<Self> {
        let base_url = format!("https://{}", config.instance_host());
        Self::with_base_url(config, base_url)
    }

    /// Create a connection against an explicit base URL (mock servers, API
    /// gateways).
    pub fn with_base_url(config: MarketoConfig, base_url: impl Into<String>) -> Result<Self> {
        config.validate()?;

        let base_url = base_url.into();
        Url::parse(&base_url)
            .map_err(|err| MarketoError::Config(format!("invalid base URL {base_url}: {err}")))?;

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            cookie_prefix: format!("id:{}&token:", config.instance_id),
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            tokens: TokenCache::new(),
        })
    }

    /// Join the base URL with path segments.
    ///
    /// Pure string construction; segment contents are the caller's
    /// responsibility.
    #[must_use]
    pub fn endpoint_url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// String prefixing every cookie of this instance.
    #[must_use]
    pub fn cookie_prefix(&self) -> &str {
        &self.cookie_prefix
    }

    /// Remove the instance prefix from a cookie value.
    ///
    /// # Errors
    /// Fails with `MarketoError::InvalidCookie` when the prefix is not a
    /// substring of the input; stripping is never a silent no-op.
    pub fn strip_cookie(&self, cookie: &str) -> Result<String> {
        if !cookie.contains(&self.cookie_prefix) {
            return Err(MarketoError::InvalidCookie(cookie.to_string()));
        }
        Ok(cookie.replace(&self.cookie_prefix, ""))
    }

    /// Return a valid bearer token, requesting a fresh one when the cached
    /// token is missing or its expiry has passed.
    ///
    /// Network I/O may occur as a side effect; concurrent callers share a
    /// single refresh request.
    pub async fn get_access_token(&self) -> Result<String> {
        self.tokens.get_or_refresh(|| self.request_token()).await
    }

    /// Request a fresh token from the identity endpoint.
    async fn request_token(&self) -> Result<CachedToken> {
        let url = self.endpoint_url(&[IDENTITY_TOKEN_PATH]);
        let builder = self.http.request(Method::GET, &url).query(&[
            ("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ]);

        let response = self.http.send(builder).await?;
        let granted: IdentityTokenResponse = response
            .json()
            .await
            .map_err(|err| MarketoError::InvalidResponse(format!("identity endpoint: {err}")))?;

        info!(expires_in = granted.expires_in, "obtained Marketo access token");
        Ok(CachedToken::from(granted))
    }

    /// GET a data endpoint under `rest/v1` and return the normalized records.
    pub async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<LeadRecord>> {
        let token = self.get_access_token().await?;
        let url = self.endpoint_url(&[REST_API_PREFIX, endpoint]);
        let builder = self
            .http
            .request(Method::GET, &url)
            .query(params)
            .query(&[("access_token", token.as_str())]);

        self.dispatch(endpoint, builder).await
    }

    /// POST a data endpoint under `rest/v1` with a JSON body and return the
    /// normalized records.
    pub async fn post<B>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        body: &B,
    ) -> Result<Vec<LeadRecord>>
    where
        B: Serialize + ?Sized,
    {
        let token = self.get_access_token().await?;
        let url = self.endpoint_url(&[REST_API_PREFIX, endpoint]);
        let builder = self
            .http
            .request(Method::POST, &url)
            .query(params)
            .query(&[("access_token", token.as_str())])
            .json(body);

        self.dispatch(endpoint, builder).await
    }

    /// Decode the reply (status-agnostic) and run the processing pipeline.
    async fn dispatch(
        &self,
        endpoint: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<Vec<LeadRecord>> {
        let response = self.http.send(builder).await?;
        let status = response.status();
        let envelope: RestEnvelope = response.json().await.map_err(|err| {
            MarketoError::InvalidResponse(format!("{endpoint} (HTTP {status}): {err}"))
        })?;

        debug!(endpoint, request_id = envelope.request_id.as_deref(), "decoded response envelope");

        response::process(envelope, &self.cookie_prefix).inspect_err(|err| {
            if let MarketoError::Api { code, message } = err {
                warn!(endpoint, code = %code, message = %message, "Marketo API reported an error");
            }
        })
    }
}

#[async_trait]
impl AccessTokenProvider for Connection {
    async fn access_token(&self) -> Result<String> {
        self.get_access_token().await
    }
}
