//! Record types returned by the Marketo REST API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One normalized record from a response `result` list.
///
/// Lead payloads are schemaless (callers choose the fields they query), so a
/// record stays an ordered field-to-value mapping. After normalization no
/// field is null and a surviving `cookies` field holds an array of prefixed
/// cookie strings.
pub type LeadRecord = Map<String, Value>;

/// Outcome of an update-lead call, extracted from the first response record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadUpdateStatus {
    /// Marketo lead ID the update resolved to.
    pub id: i64,

    /// Server-reported disposition, e.g. "updated" or "created".
    pub status: String,
}
