//! # Marketo Client
//!
//! Async client for the Marketo REST API.
//!
//! This crate contains:
//! - `Connection`: the authenticated gateway (token acquisition, caching
//!   and expiry, endpoint URL construction, response processing)
//! - `MarketoClient`: fixed-path lead and campaign operations on top of it
//! - HTTP transport wrapper and configuration loading
//!
//! ## Architecture
//! - Implements the request pipeline over types from `marketo-domain`
//! - Contains all "impure" code (network I/O, environment, files)
//!
//! ## Usage
//! ```no_run
//! use marketo_client::MarketoClient;
//! use marketo_domain::MarketoConfig;
//!
//! # async fn example() -> marketo_domain::Result<()> {
//! let config = MarketoConfig::new("client_id", "client_secret", "123-ABC-456");
//! let client = MarketoClient::new(config)?;
//!
//! if let Some(lead) = client.lead_by_email("a@b.com").await? {
//!     tracing::info!(?lead, "found lead");
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod connection;
pub mod errors;
pub mod http;
pub mod leads;
pub mod response;

// Re-export commonly used items
pub use connection::{AccessTokenProvider, Connection};
pub use http::HttpClient;
pub use leads::MarketoClient;
pub use marketo_domain::{MarketoConfig, MarketoError, Result};
