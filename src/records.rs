//! Boundary decoding for record-store rows
//!
//! Rows arrive as loosely-typed JSON objects. They are converted into the
//! strict structs of [`crate::models`] here, so scoring code never sees
//! an untyped value. Field-level policy:
//!
//! - missing or `null` counts become 0, optional numbers become `None`
//! - NaN and infinite numbers are treated as missing
//! - negative or fractional counts are rejected
//! - timestamps that do not parse become `None` (unknown age)
//! - bucketed PR counts may not exceed `total_prs`

use crate::models::{DeveloperMetrics, PullRequest, RepositoryMetrics};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while converting a raw row into a typed record
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed {kind} row: {source}")]
    Malformed {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} row is missing required field `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("{kind} row for {identity}: size buckets ({bucketed}) exceed total_prs ({total})")]
    SizeBucketsExceedTotal {
        kind: &'static str,
        identity: String,
        bucketed: u64,
        total: u32,
    },
}

/// A typed row that can be decoded from the record store
pub trait Record: DeserializeOwned {
    /// Row kind used in error messages
    const KIND: &'static str;

    /// Check invariants serde cannot express
    fn validate(&self) -> Result<(), RecordError>;
}

impl Record for DeveloperMetrics {
    const KIND: &'static str = "developer_metrics";

    fn validate(&self) -> Result<(), RecordError> {
        require(Self::KIND, "author", &self.author)?;
        require(Self::KIND, "repository_owner", &self.repository_owner)?;
        require(Self::KIND, "repository_name", &self.repository_name)?;
        check_buckets(
            Self::KIND,
            || format!("{} in {}", self.author, self.repository()),
            [self.small_prs, self.medium_prs, self.large_prs],
            self.total_prs,
        )
    }
}

impl Record for RepositoryMetrics {
    const KIND: &'static str = "repository_metrics";

    fn validate(&self) -> Result<(), RecordError> {
        require(Self::KIND, "repository_owner", &self.repository_owner)?;
        require(Self::KIND, "repository_name", &self.repository_name)?;
        check_buckets(
            Self::KIND,
            || self.repository().to_string(),
            [self.small_prs, self.medium_prs, self.large_prs],
            self.total_prs,
        )
    }
}

impl Record for PullRequest {
    const KIND: &'static str = "pull_request";

    fn validate(&self) -> Result<(), RecordError> {
        Ok(())
    }
}

fn require(kind: &'static str, field: &'static str, value: &str) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::MissingField { kind, field });
    }
    Ok(())
}

fn check_buckets(
    kind: &'static str,
    identity: impl FnOnce() -> String,
    buckets: [u32; 3],
    total: u32,
) -> Result<(), RecordError> {
    let bucketed: u64 = buckets.iter().map(|&c| u64::from(c)).sum();
    if bucketed > u64::from(total) {
        return Err(RecordError::SizeBucketsExceedTotal {
            kind,
            identity: identity(),
            bucketed,
            total,
        });
    }
    Ok(())
}

/// Decode and validate a single row
pub fn decode_row<T: Record>(row: &Value) -> Result<T, RecordError> {
    let record = T::deserialize(row).map_err(|source| RecordError::Malformed {
        kind: T::KIND,
        source,
    })?;
    record.validate()?;
    Ok(record)
}

/// Decode every row, failing on the first rejected one
pub fn try_decode_rows<T: Record>(rows: &[Value]) -> Result<Vec<T>, RecordError> {
    rows.iter().map(decode_row::<T>).collect()
}

/// Decode every row, skipping (and logging) rejected ones
pub fn decode_rows<T: Record>(rows: &[Value]) -> Vec<T> {
    let mut records = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        match decode_row::<T>(row) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping row {}: {}", idx, e),
        }
    }
    debug!(
        "Decoded {}/{} {} rows",
        records.len(),
        rows.len(),
        T::KIND
    );
    records
}

/// Decode a JSON array of rows from text, skipping rejected rows
pub fn decode_json<T: Record>(text: &str) -> Result<Vec<T>, RecordError> {
    let rows: Vec<Value> = serde_json::from_str(text).map_err(|source| RecordError::Malformed {
        kind: T::KIND,
        source,
    })?;
    Ok(decode_rows(&rows))
}

/// Lenient field decoders used by the model derives
pub(crate) mod de {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::de::{Error, IgnoredAny};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Int(i64),
        Float(f64),
        Text(String),
    }

    impl RawNumber {
        fn to_f64<E: Error>(&self) -> Result<f64, E> {
            match self {
                RawNumber::Int(i) => Ok(*i as f64),
                RawNumber::Float(f) => Ok(*f),
                RawNumber::Text(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| E::custom(format!("expected a number, found {s:?}"))),
            }
        }
    }

    fn finite<E: Error>(raw: Option<RawNumber>) -> Result<Option<f64>, E> {
        match raw {
            None => Ok(None),
            Some(raw) => {
                let value = raw.to_f64::<E>()?;
                Ok(value.is_finite().then_some(value))
            }
        }
    }

    fn to_count<E: Error>(value: f64) -> Result<u32, E> {
        if value < 0.0 {
            return Err(E::custom(format!("negative count {value}")));
        }
        if value.fract() != 0.0 {
            return Err(E::custom(format!("fractional count {value}")));
        }
        if value > f64::from(u32::MAX) {
            return Err(E::custom(format!("count {value} out of range")));
        }
        Ok(value as u32)
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(finite::<D::Error>(Option::<RawNumber>::deserialize(d)?)?.unwrap_or(0.0))
    }

    pub fn optional_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        finite::<D::Error>(Option::<RawNumber>::deserialize(d)?)
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        match finite::<D::Error>(Option::<RawNumber>::deserialize(d)?)? {
            Some(value) => to_count(value),
            None => Ok(0),
        }
    }

    pub fn optional_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        finite::<D::Error>(Option::<RawNumber>::deserialize(d)?)?
            .map(to_count)
            .transpose()
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Other(IgnoredAny),
    }

    pub fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        Ok(match Option::<RawTimestamp>::deserialize(d)? {
            Some(RawTimestamp::Text(s)) => parse_timestamp(&s),
            Some(RawTimestamp::Other(_)) | None => None,
        })
    }

    /// Parse RFC 3339, falling back to the offset-less forms stores emit
    pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
            return Some(dt.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| naive.and_utc())
    }
}
