//! Time-range normalizer — turns a zone's range expressions into concrete
//! [`TimeWindow`]s inside a [`ReferenceWindow`].
//!
//! Textual ranges come in three grammars that overlap lexically, so they are
//! tried through [`MATCHERS`] in a fixed order and the first hit wins:
//!
//! 1. `DD.MM.YYYY-DD.MM.YYYY HH:MM-HH:MM` — the same daily slot on every day
//!    of the date span.
//! 2. `DD.MM.YYYY HH:MM-HH:MM` — a daily slot on a single day.
//! 3. `DD.MM.YYYY HH:MM-DD.MM.YYYY HH:MM` — one absolute interval.
//!
//! Parenthesized annotations are removed before matching. Structured
//! instants ([`RangeExpr::Instants`]) skip the grammars entirely.
//!
//! All wall-clock values are taken as UTC.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, TimeDelta, Utc};
use regex::Regex;

use crate::error::NormalizeError;
use crate::types::{RangeExpr, ReferenceWindow, TimeWindow};

/// Upper bound on windows produced by one daily expansion.
pub const MAX_EXPANSION_DAYS: usize = 365;

const DATE_FORMAT: &str = "%d.%m.%Y";

/// Structured instant layouts, most common first.
const INSTANT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%MZ", "%Y-%m-%dT%H:%M:%SZ"];

static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("annotation pattern"));

static DATE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{1,2}\.\d{1,2}\.\d{4})\s*[-–]\s*(\d{1,2}\.\d{1,2}\.\d{4})\s+(\d{1,2}:\d{2})\s*[-–]\s*(\d{1,2}:\d{2})$",
    )
    .expect("date span pattern")
});

static SINGLE_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}\.\d{1,2}\.\d{4})\s+(\d{1,2}:\d{2})\s*[-–]\s*(\d{1,2}:\d{2})$")
        .expect("single day pattern")
});

static ABSOLUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{1,2}\.\d{1,2}\.\d{4})\s+(\d{1,2}:\d{2})\s*[-–]\s*(\d{1,2}\.\d{1,2}\.\d{4})\s+(\d{1,2}:\d{2})$",
    )
    .expect("absolute pattern")
});

// ---------------------------------------------------------------------------
// Parsed representation
// ---------------------------------------------------------------------------

/// A time of day with minute precision. `24:00` is accepted and means the
/// end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayTime {
    minutes: u32,
}

impl DayTime {
    pub fn hm(hour: u32, minute: u32) -> Option<Self> {
        match (hour, minute) {
            (24, 0) => Some(Self { minutes: 24 * 60 }),
            (0..=23, 0..=59) => Some(Self {
                minutes: hour * 60 + minute,
            }),
            _ => None,
        }
    }

    /// Parse `H:MM` / `HH:MM`.
    pub fn parse(text: &str) -> Option<Self> {
        let (hour, minute) = text.split_once(':')?;
        if minute.len() != 2 {
            return None;
        }
        Self::hm(hour.parse().ok()?, minute.parse().ok()?)
    }

    fn on(self, day: NaiveDate) -> NaiveDateTime {
        day.and_time(chrono::NaiveTime::MIN) + TimeDelta::minutes(i64::from(self.minutes))
    }
}

/// The outcome of a successful grammar match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedRange {
    /// The slot `from..to` repeated on every day in `first_day..=last_day`.
    Daily {
        first_day: NaiveDate,
        last_day: NaiveDate,
        from: DayTime,
        to: DayTime,
    },
    /// A single interval between two instants.
    Absolute {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Windows produced from one range, plus whether the expansion hit
/// [`MAX_EXPANSION_DAYS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub windows: Vec<TimeWindow>,
    pub truncated: bool,
}

// ---------------------------------------------------------------------------
// Matchers
// ---------------------------------------------------------------------------

pub type Matcher = fn(&str) -> Option<ParsedRange>;

/// Grammars in precedence order.
pub const MATCHERS: &[(&str, Matcher)] = &[
    ("date-span daily", match_date_span),
    ("single day", match_single_day),
    ("absolute", match_absolute),
];

fn date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

pub fn match_date_span(text: &str) -> Option<ParsedRange> {
    let caps = DATE_SPAN.captures(text)?;
    Some(ParsedRange::Daily {
        first_day: date(&caps[1])?,
        last_day: date(&caps[2])?,
        from: DayTime::parse(&caps[3])?,
        to: DayTime::parse(&caps[4])?,
    })
}

pub fn match_single_day(text: &str) -> Option<ParsedRange> {
    let caps = SINGLE_DAY.captures(text)?;
    let day = date(&caps[1])?;
    Some(ParsedRange::Daily {
        first_day: day,
        last_day: day,
        from: DayTime::parse(&caps[2])?,
        to: DayTime::parse(&caps[3])?,
    })
}

pub fn match_absolute(text: &str) -> Option<ParsedRange> {
    let caps = ABSOLUTE.captures(text)?;
    Some(ParsedRange::Absolute {
        start: DayTime::parse(&caps[2])?.on(date(&caps[1])?),
        end: DayTime::parse(&caps[4])?.on(date(&caps[3])?),
    })
}

/// Remove `( ... )` annotations.
pub fn strip_annotations(text: &str) -> Cow<'_, str> {
    ANNOTATION.replace_all(text, "")
}

/// Parse one textual range with the first matching grammar.
pub fn parse_range(text: &str) -> Result<ParsedRange, NormalizeError> {
    let cleaned = strip_annotations(text);
    let cleaned = cleaned.trim();

    let (label, parsed) = MATCHERS
        .iter()
        .find_map(|(label, matcher)| matcher(cleaned).map(|parsed| (*label, parsed)))
        .ok_or_else(|| NormalizeError::Unrecognized {
            text: text.to_string(),
        })?;
    tracing::trace!(grammar = label, text = cleaned, "matched time range");

    match parsed {
        ParsedRange::Daily {
            first_day,
            last_day,
            ..
        } if first_day > last_day => Err(NormalizeError::Reversed {
            from: first_day.to_string(),
            to: last_day.to_string(),
        }),
        ParsedRange::Absolute { start, end } if start > end => Err(NormalizeError::Reversed {
            from: start.to_string(),
            to: end.to_string(),
        }),
        parsed => Ok(parsed),
    }
}

/// Parse a structured instant (`2026-10-19T08:00Z`, RFC 3339, ...).
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, NormalizeError> {
    let value = value.trim();
    INSTANT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|ts| ts.with_timezone(&Utc))
        })
        .map(|ts| ts.trunc_subsecs(0))
        .ok_or_else(|| NormalizeError::InvalidInstant {
            value: value.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

impl ParsedRange {
    pub fn expand(&self, window: &ReferenceWindow) -> Expansion {
        self.expand_capped(window, MAX_EXPANSION_DAYS)
    }

    pub fn expand_capped(&self, window: &ReferenceWindow, cap: usize) -> Expansion {
        match *self {
            ParsedRange::Daily {
                first_day,
                last_day,
                from,
                to,
            } => {
                let mut expansion = Expansion::default();
                if !window.overlaps(first_day, last_day) {
                    return expansion;
                }

                let last = last_day.min(window.last_day);
                let mut day = first_day.max(window.first_day);
                while day <= last {
                    if expansion.windows.len() >= cap {
                        tracing::warn!(
                            cap,
                            %first_day,
                            %last_day,
                            "daily expansion hit the iteration cap; remaining days dropped"
                        );
                        expansion.truncated = true;
                        break;
                    }
                    expansion.windows.push(daily_window(day, from, to));
                    match day.succ_opt() {
                        Some(next) => day = next,
                        None => break,
                    }
                }
                expansion
            }
            ParsedRange::Absolute { start, end } => {
                let windows = window
                    .overlaps(start.date(), end.date())
                    .then(|| TimeWindow::new(start.and_utc(), end.and_utc()))
                    .flatten()
                    .into_iter()
                    .collect();
                Expansion {
                    windows,
                    truncated: false,
                }
            }
        }
    }
}

/// The slot on `day`; an end earlier than the start rolls into the next day.
fn daily_window(day: NaiveDate, from: DayTime, to: DayTime) -> TimeWindow {
    let start = from.on(day);
    let mut end = to.on(day);
    if end < start {
        end += TimeDelta::days(1);
    }
    TimeWindow {
        start: start.and_utc(),
        end: end.and_utc(),
    }
}

/// Normalize one range expression of a zone.
pub fn normalize(expr: &RangeExpr, window: &ReferenceWindow) -> Result<Expansion, NormalizeError> {
    match expr {
        RangeExpr::Text(text) => Ok(parse_range(text)?.expand(window)),
        RangeExpr::Instants { from, to } => {
            let start = parse_instant(from)?;
            let end = parse_instant(to)?;
            if start > end {
                return Err(NormalizeError::Reversed {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            Ok(ParsedRange::Absolute {
                start: start.naive_utc(),
                end: end.naive_utc(),
            }
            .expand(window))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
