//! JSON schedule feed.
//!
//! ```json
//! {"data": [{
//!     "name": "UNR123",
//!     "areas_time": "\nApproved:\n19.10.2026 08:00-12:00\n",
//!     "low_level":  {"value": 0,    "unit": "magl"},
//!     "high_level": {"value": 1500, "unit": "magl"}
//! }]}
//! ```
//!
//! `areas_time` holds one range per line; lines without a dash are captions
//! and are dropped here.

use aup_core::{RangeExpr, VerticalLimit, ZoneRecord};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::FeedError;
use crate::DecodedFeed;

#[derive(Debug, Deserialize)]
struct RawZone {
    name: String,
    #[serde(default)]
    areas_time: String,
    low_level: RawLevel,
    high_level: RawLevel,
}

#[derive(Debug, Deserialize)]
struct RawLevel {
    #[serde(deserialize_with = "number_or_string")]
    value: f64,
    unit: String,
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("level out of range")),
        Value::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!(
            "expected a number, got {other}"
        ))),
    }
}

impl From<RawZone> for ZoneRecord {
    fn from(raw: RawZone) -> Self {
        ZoneRecord {
            name: raw.name.trim().to_string(),
            region: None,
            schedule: schedule_lines(&raw.areas_time),
            lower: VerticalLimit::new(raw.low_level.value, raw.low_level.unit),
            upper: VerticalLimit::new(raw.high_level.value, raw.high_level.unit),
        }
    }
}

/// Split an `areas_time` block into textual ranges.
pub fn schedule_lines(areas_time: &str) -> Vec<RangeExpr> {
    areas_time
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains(['-', '–']))
        .map(|line| RangeExpr::Text(line.to_string()))
        .collect()
}

/// Decode the whole body. Only an undecodable body or a missing `data`
/// array is fatal; bad zones are skipped one by one.
pub fn decode(body: &str) -> Result<DecodedFeed, FeedError> {
    let entries = match serde_json::from_str::<Value>(body)? {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(FeedError::MissingData),
        },
        Value::Array(entries) => entries,
        _ => return Err(FeedError::MissingData),
    };

    let mut feed = DecodedFeed::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawZone>(entry) {
            Ok(raw) => feed.zones.push(raw.into()),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed zone");
                feed.skipped += 1;
            }
        }
    }
    Ok(feed)
}
