//! Vertical-limit conversion to flight levels (hundreds of feet).
//!
//! Metres are converted through the international foot, [`METERS_PER_FOOT`].
//! Flight-level tags pass through untouched. An unrecognised tag is not an
//! error: the raw value is passed through and a warning is logged.

use std::fmt;

use crate::types::VerticalLimit;

/// Exact length of the international foot in metres.
pub const METERS_PER_FOOT: f64 = 0.3048;

/// The unit and vertical reference of a published limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VerticalUnit {
    /// Feet on the standard pressure datum (QNE).
    FeetQne,
    FeetAmsl,
    FeetAgl,
    MetersAgl,
    MetersAmsl,
    /// Already a flight level.
    FlightLevel,
    /// Anything else, kept verbatim.
    Unknown(String),
}

impl VerticalUnit {
    /// Classify a feed unit tag. Never fails; see [`VerticalUnit::Unknown`].
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "ftqne" | "qne" => Self::FeetQne,
            "ft" | "feet" | "ftamsl" => Self::FeetAmsl,
            "ftagl" => Self::FeetAgl,
            "magl" | "agl" => Self::MetersAgl,
            "mamsl" | "amsl" | "m" => Self::MetersAmsl,
            "fl" | "f" => Self::FlightLevel,
            _ => Self::Unknown(tag.trim().to_string()),
        }
    }

    /// Provenance label written to the `remark` field.
    pub fn remark(&self) -> String {
        match self {
            Self::FeetQne => "FTQNE".to_string(),
            Self::FeetAmsl => "FTAMSL".to_string(),
            Self::FeetAgl => "FTAGL".to_string(),
            Self::MetersAgl => "MAGL".to_string(),
            Self::MetersAmsl => "MAMSL".to_string(),
            Self::FlightLevel => "FL".to_string(),
            Self::Unknown(tag) => tag.to_uppercase(),
        }
    }
}

impl fmt::Display for VerticalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.remark())
    }
}

/// Result of a conversion. `Passthrough` marks an unknown unit whose raw
/// value was used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightLevel {
    Converted(i64),
    Passthrough(i64),
}

impl FlightLevel {
    pub fn value(self) -> i64 {
        match self {
            Self::Converted(v) | Self::Passthrough(v) => v,
        }
    }

    pub fn is_passthrough(self) -> bool {
        matches!(self, Self::Passthrough(_))
    }
}

/// Convert `value` expressed in `unit` to a flight level, rounding to the
/// nearest integer (halves away from zero).
pub fn to_flight_level(value: f64, unit: &VerticalUnit) -> FlightLevel {
    let feet = match unit {
        VerticalUnit::FeetQne | VerticalUnit::FeetAmsl | VerticalUnit::FeetAgl => value,
        VerticalUnit::MetersAgl | VerticalUnit::MetersAmsl => value / METERS_PER_FOOT,
        VerticalUnit::FlightLevel => return FlightLevel::Converted(value.round() as i64),
        VerticalUnit::Unknown(tag) => {
            tracing::warn!(unit = %tag, value, "unknown vertical unit; passing value through");
            return FlightLevel::Passthrough(value.round() as i64);
        }
    };
    FlightLevel::Converted((feet / 100.0).round() as i64)
}

/// Convenience wrapper over a decoded [`VerticalLimit`].
pub fn convert(limit: &VerticalLimit) -> FlightLevel {
    to_flight_level(limit.value, &VerticalUnit::parse(&limit.unit))
}

/// Remark for a zone: the shared label when both limits agree, otherwise
/// `"<lower>, <upper>"`.
pub fn zone_remark(lower: &VerticalLimit, upper: &VerticalLimit) -> String {
    let lower = VerticalUnit::parse(&lower.unit).remark();
    let upper = VerticalUnit::parse(&upper.unit).remark();
    match (lower.is_empty(), upper.is_empty()) {
        _ if lower == upper => lower,
        (true, _) => upper,
        (_, true) => lower,
        _ => format!("{lower}, {upper}"),
    }
}
