//! Response envelope decoding and the processing pipeline.
//!
//! Every decoded reply runs through two strictly ordered stages: error
//! detection first, then payload normalization. An error payload discards
//! any `result` data travelling with it.

use marketo_domain::constants::COOKIES_FIELD;
use marketo_domain::{LeadRecord, MarketoError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Decoded top-level JSON reply from a data endpoint.
///
/// Decoding is status-agnostic; error payloads arrive in the same shape as
/// successful ones.
#[derive(Debug, Deserialize)]
pub struct RestEnvelope {
    #[serde(default, rename = "requestId")]
    pub request_id: Option<String>,

    #[serde(default)]
    pub errors: Vec<ApiErrorNotice>,

    #[serde(default)]
    pub result: Vec<LeadRecord>,
}

/// One entry of a response `errors` list.
///
/// Field presence is not guaranteed by the server, and `code` arrives as
/// either a string or a number.
#[derive(Debug, Deserialize)]
pub struct ApiErrorNotice {
    #[serde(default)]
    pub code: Option<Value>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Run the pipeline: error detection, then normalization of every record.
pub fn process(envelope: RestEnvelope, cookie_prefix: &str) -> Result<Vec<LeadRecord>> {
    check_errors(&envelope.errors)?;

    Ok(envelope
        .result
        .into_iter()
        .map(|record| normalize_record(record, cookie_prefix))
        .collect())
}

/// Fail on the first reported error; later entries are dropped.
fn check_errors(errors: &[ApiErrorNotice]) -> Result<()> {
    let Some(first) = errors.first() else {
        return Ok(());
    };

    match (&first.code, &first.message) {
        (Some(code), Some(message)) => {
            Err(MarketoError::Api { code: code_string(code), message: message.clone() })
        }
        _ => Err(MarketoError::UnknownApi(format!("{first:?}"))),
    }
}

/// Strip null fields, then re-format a surviving `cookies` field from a
/// comma-delimited string into an array of prefixed cookie values.
fn normalize_record(record: LeadRecord, cookie_prefix: &str) -> LeadRecord {
    let mut normalized: LeadRecord =
        record.into_iter().filter(|(_, value)| !value.is_null()).collect();

    // A non-string value means the field is already split; splitting twice is
    // undefined, so leave it alone.
    let prefixed = match normalized.get(COOKIES_FIELD) {
        Some(Value::String(raw)) => Some(
            raw.split(',')
                .map(|cookie| Value::String(format!("{cookie_prefix}{cookie}")))
                .collect::<Vec<Value>>(),
        ),
        _ => None,
    };

    if let Some(prefixed) = prefixed {
        normalized.insert(COOKIES_FIELD.to_string(), Value::Array(prefixed));
    }

    normalized
}

fn code_string(code: &Value) -> String {
    match code {
        Value::String(code) => code.clone(),
        other => other.to_string(),
    }
}
