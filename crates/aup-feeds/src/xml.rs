//! XML availability bulletin.
//!
//! ```xml
//! <bulletin>
//!   <tra>
//!     <zc>UNNT</zc>
//!     <areacode>UNR4512</areacode>
//!     <levelfrom>0AGL</levelfrom>
//!     <levelto>F120</levelto>
//!     <datefrom>2026-10-19T06:00Z</datefrom>
//!     <dateto>2026-10-19T14:00Z</dateto>
//!   </tra>
//! </bulletin>
//! ```
//!
//! Dates are structured instants; levels are strings that combine value and
//! unit tag in either order (`1500AGL`, `F120`).
//!
//! The document is walked with the streaming reader and every `<tra>` child of
//! the root is deserialized on its own, so a broken entry costs only itself.
//! Other children of the root are ignored.

use aup_core::{RangeExpr, VerticalLimit, ZoneRecord};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::Deserialize;

use crate::error::FeedError;
use crate::DecodedFeed;

const ENTRY_TAG: &[u8] = b"tra";

#[derive(Debug, Deserialize)]
struct TraEntry {
    zc: Option<String>,
    areacode: Option<String>,
    levelfrom: Option<String>,
    levelto: Option<String>,
    datefrom: Option<String>,
    dateto: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Split a level string such as `1500AGL`, `900 AMSL`, `F120` or `GND`.
pub fn parse_level(text: &str) -> Result<VerticalLimit, String> {
    let text = text.trim();
    if matches!(text.to_ascii_uppercase().as_str(), "GND" | "SFC") {
        return Ok(VerticalLimit::new(0.0, "magl"));
    }

    let split = |idx: usize| text.split_at(idx);
    let (number, unit) = match text.find(|c: char| c.is_ascii_digit()) {
        // Unit first: `F120`, `FL 95`.
        Some(idx) if idx > 0 => {
            let (unit, number) = split(idx);
            (number, unit)
        }
        // Value first: `1500AGL`.
        Some(_) => {
            let idx = text
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(text.len());
            split(idx)
        }
        None => return Err(format!("no numeric value in level {text:?}")),
    };

    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad level {text:?}: {e}"))?;
    Ok(VerticalLimit::new(value, unit.trim()))
}

impl TryFrom<TraEntry> for ZoneRecord {
    type Error = String;

    fn try_from(entry: TraEntry) -> Result<Self, Self::Error> {
        let name = present(&entry.areacode).ok_or("missing <areacode>")?;
        let from = present(&entry.datefrom).ok_or("missing <datefrom>")?;
        let to = present(&entry.dateto).ok_or("missing <dateto>")?;
        let lower = parse_level(present(&entry.levelfrom).ok_or("missing <levelfrom>")?)?;
        let upper = parse_level(present(&entry.levelto).ok_or("missing <levelto>")?)?;

        Ok(ZoneRecord {
            name: name.to_string(),
            region: present(&entry.zc).map(str::to_string),
            schedule: vec![RangeExpr::Instants {
                from: from.to_string(),
                to: to.to_string(),
            }],
            lower,
            upper,
        })
    }
}

fn decode_entry(inner: &str) -> Result<ZoneRecord, String> {
    let entry: TraEntry =
        quick_xml::de::from_str(&format!("<tra>{inner}</tra>")).map_err(|e| e.to_string())?;
    ZoneRecord::try_from(entry)
}

pub fn decode(body: &str) -> Result<DecodedFeed, FeedError> {
    let mut reader = Reader::from_str(body);
    let mut feed = DecodedFeed::default();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut index = 0usize;

    loop {
        let outcome = match reader.read_event()? {
            Event::Start(_) if depth == 0 => {
                seen_root = true;
                depth += 1;
                continue;
            }
            Event::Empty(_) if depth == 0 => {
                seen_root = true;
                continue;
            }
            Event::Start(tag) => {
                let span = reader.read_to_end(tag.name())?;
                if tag.name().as_ref() != ENTRY_TAG {
                    let element = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
                    tracing::trace!(%element, "ignoring element");
                    continue;
                }
                let inner = usize::try_from(span.start)
                    .ok()
                    .zip(usize::try_from(span.end).ok())
                    .and_then(|(start, end)| body.get(start..end))
                    .ok_or_else(|| "entry outside the document".to_string());
                inner.and_then(decode_entry)
            }
            Event::Empty(tag) if tag.name().as_ref() == ENTRY_TAG => decode_entry(""),
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        match outcome {
            Ok(zone) => feed.zones.push(zone),
            Err(reason) => {
                tracing::warn!(index, %reason, "skipping malformed zone");
                feed.skipped += 1;
            }
        }
        index += 1;
    }

    if !seen_root {
        return Err(FeedError::EmptyBulletin);
    }
    Ok(feed)
}
