//! JSON serialization of report payloads

use crate::reporters::payload::ReportPayload;
use anyhow::Result;

/// Serialize a report as pretty-printed JSON
pub fn to_json(report: &ReportPayload) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Serialize a report as single-line JSON
pub fn to_json_compact(report: &ReportPayload) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}
