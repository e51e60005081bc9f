//! Assembler — combines normalized windows with converted levels into
//! [`OutputArea`]s and issues the [`NoticeInfo`] envelope.

use std::time::Duration;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

use crate::normalizer;
use crate::types::{NoticeInfo, OutputArea, OutputDocument, ReferenceWindow, ZoneRecord};
use crate::units;

/// Areas plus counters describing what was dropped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    pub areas: Vec<OutputArea>,
    pub zones_seen: usize,
    /// Zones left out by the region filter.
    pub zones_filtered: usize,
    pub ranges_skipped: usize,
    pub truncated_expansions: usize,
    pub passthrough_levels: usize,
}

/// Builds areas for zones against a fixed reference window.
#[derive(Debug, Clone)]
pub struct Assembler {
    window: ReferenceWindow,
    region_filter: Option<String>,
}

impl Assembler {
    pub fn new(window: ReferenceWindow) -> Self {
        Self {
            window,
            region_filter: None,
        }
    }

    /// Keep only zones whose region code contains `filter`. Zones without a
    /// region code are always kept.
    pub fn with_region_filter(mut self, filter: Option<String>) -> Self {
        self.region_filter = filter.filter(|f| !f.trim().is_empty());
        self
    }

    pub fn window(&self) -> &ReferenceWindow {
        &self.window
    }

    fn admits(&self, zone: &ZoneRecord) -> bool {
        match (&self.region_filter, &zone.region) {
            (Some(filter), Some(region)) => region.contains(filter.as_str()),
            _ => true,
        }
    }

    /// Assemble one zone, folding its counters into `report`.
    pub fn assemble_zone(&self, zone: &ZoneRecord, report: &mut AssemblyReport) {
        report.zones_seen += 1;
        if !self.admits(zone) {
            tracing::debug!(zone = %zone.name, region = ?zone.region, "zone outside region filter");
            report.zones_filtered += 1;
            return;
        }

        let mut windows = Vec::new();
        for expr in &zone.schedule {
            match normalizer::normalize(expr, &self.window) {
                Ok(expansion) => {
                    if expansion.truncated {
                        report.truncated_expansions += 1;
                    }
                    windows.extend(expansion.windows);
                }
                Err(e) => {
                    tracing::warn!(zone = %zone.name, error = %e, "skipping time range");
                    report.ranges_skipped += 1;
                }
            }
        }
        if windows.is_empty() {
            return;
        }

        let minimum = units::convert(&zone.lower);
        let maximum = units::convert(&zone.upper);
        report.passthrough_levels += [minimum, maximum]
            .into_iter()
            .filter(|level| level.is_passthrough())
            .count();
        let remark = units::zone_remark(&zone.lower, &zone.upper);

        report.areas.extend(windows.into_iter().map(|w| OutputArea {
            name: zone.name.clone(),
            minimum_fl: minimum.value(),
            maximum_fl: maximum.value(),
            start_datetime: w.start,
            end_datetime: w.end,
            remark: remark.clone(),
        }));
    }

    pub fn assemble<'a, I>(&self, zones: I) -> AssemblyReport
    where
        I: IntoIterator<Item = &'a ZoneRecord>,
    {
        let mut report = AssemblyReport::default();
        for zone in zones {
            self.assemble_zone(zone, &mut report);
        }
        report
    }
}

impl NoticeInfo {
    /// Envelope issued at `now` (whole seconds), valid for `validity`.
    pub fn issue(now: DateTime<Utc>, validity: Duration) -> Self {
        let now = now.trunc_subsecs(0);
        let validity = TimeDelta::from_std(validity).unwrap_or(TimeDelta::MAX);
        Self {
            released_on: now,
            valid_wef: now,
            valid_til: now.checked_add_signed(validity).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

impl OutputDocument {
    pub fn new(notice_info: NoticeInfo, areas: Vec<OutputArea>) -> Self {
        Self { notice_info, areas }
    }
}
