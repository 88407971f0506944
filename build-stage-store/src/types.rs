use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// One observed stage event for a build, the unit of persistence. `stage_id`
/// is unique across all stored records, enforced by the storage layer.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuildStageRecord {
    pub stage_id: String,
    pub status: String,
    #[serde(default)]
    pub build_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_millis: Option<i64>,
    // Producers attach free-form stage fields we don't model; carried opaquely
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("stage event field {0:?} is blank")]
    BlankField(&'static str),
}

/// A successfully interpreted payload: either a record to persist, or
/// confirmation that the message carries nothing persistable.
#[derive(Debug, PartialEq)]
pub enum Decoded {
    Record(BuildStageRecord),
    Absent,
}

/// Classify a raw payload. Empty payloads and objects without a `stageId`
/// (heartbeats, control traffic) are `Absent`; anything that claims to be a
/// stage event but cannot produce a record is an error, so producer bugs stay
/// visible instead of falling through the skip path.
pub fn decode(raw: &str) -> Result<Decoded, DecodeError> {
    if raw.trim().is_empty() {
        return Ok(Decoded::Absent);
    }

    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    if value.get("stageId").is_none() {
        return Ok(Decoded::Absent);
    }

    let record: BuildStageRecord = serde_json::from_value(value)?;
    if record.stage_id.trim().is_empty() {
        return Err(DecodeError::BlankField("stageId"));
    }
    if record.status.trim().is_empty() {
        return Err(DecodeError::BlankField("status"));
    }

    Ok(Decoded::Record(record))
}
