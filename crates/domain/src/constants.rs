//! Domain constants
//!
//! Centralized location for the Marketo REST endpoints, field names and
//! client defaults.

/// Domain under which every Marketo instance is reachable
/// (`{instance}.mktorest.com`).
pub const MKTOREST_DOMAIN: &str = "mktorest.com";

/// Path prefix for all data endpoints.
pub const REST_API_PREFIX: &str = "rest/v1";

/// Path of the identity endpoint issuing client-credentials tokens.
pub const IDENTITY_TOKEN_PATH: &str = "identity/oauth/token";

/// OAuth2 grant type used by the identity endpoint.
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Lead field holding the comma-delimited cookie list on the wire.
pub const COOKIES_FIELD: &str = "cookies";

/// Default request timeout applied to token and data requests.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("marketo-client/", env!("CARGO_PKG_VERSION"));
