//! Conversions from transport errors into domain errors.

use marketo_domain::MarketoError;
use reqwest::Error as HttpError;

/// Error newtype that keeps reqwest conversions on the client side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct TransportError(pub MarketoError);

impl From<TransportError> for MarketoError {
    fn from(value: TransportError) -> Self {
        value.0
    }
}

impl From<MarketoError> for TransportError {
    fn from(value: MarketoError) -> Self {
        TransportError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MarketoError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for TransportError {
    fn from(err: HttpError) -> Self {
        let mapped = if err.is_connect() || err.is_timeout() {
            MarketoError::Connection(err.to_string())
        } else if err.is_decode() {
            MarketoError::InvalidResponse(err.to_string())
        } else {
            MarketoError::Internal(format!("http request failed: {err}"))
        };

        TransportError(mapped)
    }
}
