//! Client configuration
//!
//! Credentials are supplied once at construction and never mutated. The
//! dynamic per-tenant class generation of older Marketo SDKs is replaced by
//! this plain configuration struct.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MKTOREST_DOMAIN;
use crate::errors::{MarketoError, Result};

/// Immutable credential triple identifying one Marketo tenant.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarketoConfig {
    /// OAuth client ID from the Marketo LaunchPoint service.
    pub client_id: String,

    /// OAuth client secret paired with `client_id`.
    pub client_secret: String,

    /// Per-tenant instance identifier (e.g. "123-ABC-456") selecting the
    /// `{instance}.mktorest.com` host and the cookie prefix.
    pub instance_id: String,
}

impl MarketoConfig {
    /// Create a new configuration.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        instance_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            instance_id: instance_id.into(),
        }
    }

    /// Reject configurations with empty fields.
    ///
    /// # Errors
    /// Returns `MarketoError::Config` naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(MarketoError::Config("client_id must not be empty".into()));
        }
        if self.client_secret.is_empty() {
            return Err(MarketoError::Config("client_secret must not be empty".into()));
        }
        if self.instance_id.is_empty() {
            return Err(MarketoError::Config("instance_id must not be empty".into()));
        }
        Ok(())
    }

    /// Host serving this tenant's REST and identity endpoints.
    #[must_use]
    pub fn instance_host(&self) -> String {
        format!("{}.{}", self.instance_id, MKTOREST_DOMAIN)
    }
}

impl fmt::Debug for MarketoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketoConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("instance_id", &self.instance_id)
            .finish()
    }
}
