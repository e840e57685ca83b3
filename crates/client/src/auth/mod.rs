//! Client-credentials token lifecycle.
//!
//! Marketo issues short-lived bearer tokens from its identity endpoint. This
//! module owns the cached token and the guarded check-then-refresh sequence;
//! the connection supplies the actual identity request.

pub mod token_cache;
pub mod types;

pub use token_cache::TokenCache;
pub use types::{CachedToken, IdentityTokenResponse};
