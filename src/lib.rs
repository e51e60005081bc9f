//! aup — Airspace Use Plan notice builder.
//!
//! Fetches the restricted-zone schedule from an aeronautical data endpoint,
//! normalizes every zone's activity into UTC windows for today and tomorrow,
//! converts vertical limits to flight levels and writes the notice document.
//!
//! # Architecture
//!
//! ```text
//! Fetch ──► Decode ──► Normalize × Convert ──► Assemble ──► Write
//! ```
//!
//! The run is strictly linear; the HTTP request is the only await point.

use anyhow::Context;
use chrono::{DateTime, Utc};

use aup_core::{
    output, Assembler, AssemblyReport, Config, NoticeInfo, OutputDocument, ReferenceWindow,
};
use aup_feeds::{DecodedFeed, HttpFetcher};

pub use aup_core;
pub use aup_feeds;

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub document: OutputDocument,
    /// Counters of the assembly stage; its areas live in `document`.
    pub report: AssemblyReport,
    /// Feed entries that could not be decoded.
    pub feed_skipped: usize,
}

/// Fetch, decode and assemble, without touching the filesystem.
pub async fn build_document(config: &Config, now: DateTime<Utc>) -> anyhow::Result<RunOutcome> {
    let fetcher = HttpFetcher::new(&config.source).context("failed to configure HTTP client")?;
    let response = fetcher.fetch().await.context("failed to fetch feed")?;
    let feed = aup_feeds::decode(config.source.format, &response)
        .with_context(|| format!("failed to decode feed from {}", fetcher.url()))?;
    Ok(assemble(config, feed, now))
}

/// Turn decoded zones into the notice document.
pub fn assemble(config: &Config, feed: DecodedFeed, now: DateTime<Utc>) -> RunOutcome {
    let window = ReferenceWindow::starting_at(now, config.notice.horizon_days);
    let mut report = Assembler::new(window)
        .with_region_filter(config.notice.zone_filter.clone())
        .assemble(&feed.zones);

    tracing::info!(
        first_day = %window.first_day,
        last_day = %window.last_day,
        zones = report.zones_seen,
        zones_undecodable = feed.skipped,
        zones_filtered = report.zones_filtered,
        ranges_skipped = report.ranges_skipped,
        truncated = report.truncated_expansions,
        passthrough_levels = report.passthrough_levels,
        areas = report.areas.len(),
        "notice assembled"
    );

    let areas = std::mem::take(&mut report.areas);
    RunOutcome {
        document: OutputDocument::new(NoticeInfo::issue(now, config.notice.validity), areas),
        report,
        feed_skipped: feed.skipped,
    }
}

/// Full run: build the document, write it to the configured path and return
/// the rendered text.
pub async fn run(config: &Config, now: DateTime<Utc>) -> anyhow::Result<String> {
    let outcome = build_document(config, now).await?;
    let rendered = output::write_document(&outcome.document, &config.output.path)?;
    tracing::info!(path = %config.output.path.display(), areas = outcome.document.areas.len(), "notice written");
    Ok(rendered)
}
