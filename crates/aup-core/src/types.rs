//! Core types for aup-core.
//!
//! Input side: a decoded [`ZoneRecord`] carries its name, the range
//! expressions describing when it is active and its two [`VerticalLimit`]s.
//! Output side: the [`OutputDocument`] written to disk, made of a
//! [`NoticeInfo`] envelope and one [`OutputArea`] per active window.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A restricted-airspace zone as decoded from a feed.
///
/// Read-only; one per feed entry, dropped once its areas are assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRecord {
    /// Zone identifier as published by the source (area code or name).
    pub name: String,
    /// Region / FIR code the zone belongs to, when the feed supplies one.
    pub region: Option<String>,
    /// Activity schedule. A zone may carry several independent ranges.
    pub schedule: Vec<RangeExpr>,
    /// Floor of the zone, in whatever unit the feed published it.
    pub lower: VerticalLimit,
    /// Ceiling of the zone.
    pub upper: VerticalLimit,
}

/// One activity range of a zone, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeExpr {
    /// Free text such as `19.10.2026 08:00-12:00`.
    Text(String),
    /// Explicit start/end instants supplied by a structured feed.
    Instants { from: String, to: String },
}

/// A vertical limit exactly as published: numeric value plus unit tag.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalLimit {
    /// Numeric part, e.g. `1500` of `1500AGL`.
    pub value: f64,
    /// Unit tag as published (`magl`, `ftqne`, `F`, ...). Case is not
    /// normalized here; the converter matches it case-insensitively.
    pub unit: String,
}

impl VerticalLimit {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// An absolute activity window in UTC, second precision. `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeWindow {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// End; equal to `start` for an instantaneous window.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window, returning `None` when `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }
}

/// The calendar days (inclusive) whose activity ends up in the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceWindow {
    /// UTC date of the run (today).
    pub first_day: NaiveDate,
    /// Last day included, `first_day` plus the lookahead.
    pub last_day: NaiveDate,
}

impl ReferenceWindow {
    /// `[today, today + horizon_days]` relative to `now`.
    pub fn starting_at(now: DateTime<Utc>, horizon_days: u32) -> Self {
        let first_day = now.date_naive();
        let last_day = first_day
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .unwrap_or(NaiveDate::MAX);
        Self {
            first_day,
            last_day,
        }
    }

    /// Date-level overlap test: `start <= last_day && end >= first_day`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.last_day && end >= self.first_day
    }
}

/// One entry of the `areas` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputArea {
    /// Name of the zone this area was built from.
    pub name: String,
    /// Lower limit as a flight level (hundreds of feet).
    pub minimum_fl: i64,
    /// Upper limit as a flight level.
    pub maximum_fl: i64,
    /// Activation instant, whole seconds.
    #[serde(with = "utc_seconds")]
    pub start_datetime: DateTime<Utc>,
    /// Deactivation instant; never before `start_datetime`.
    #[serde(with = "utc_seconds")]
    pub end_datetime: DateTime<Utc>,
    /// Reference datum of the source limits, e.g. `MAGL` or `MAGL, FL`.
    pub remark: String,
}

/// Validity envelope of the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeInfo {
    /// When the document was produced.
    #[serde(with = "utc_seconds")]
    pub released_on: DateTime<Utc>,
    /// Start of validity; equal to `released_on`.
    #[serde(with = "utc_seconds")]
    pub valid_wef: DateTime<Utc>,
    /// End of validity: `valid_wef` plus the configured validity period.
    #[serde(with = "utc_seconds")]
    pub valid_til: DateTime<Utc>,
}

/// The persisted artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub notice_info: NoticeInfo,
    /// Zones in feed order; within a zone, areas follow its schedule order.
    pub areas: Vec<OutputArea>,
}

/// `YYYY-MM-DDTHH:MM:SSZ` (de)serialization for UTC timestamps.
pub mod utc_seconds {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
