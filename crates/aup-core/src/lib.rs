//! aup-core — Airspace Use Plan notice core library.
//!
//! This crate holds everything between the raw feed and the written notice:
//! the shared data model, configuration, and the three pipeline stages that
//! turn decoded zones into output areas.
//!
//! # Architecture
//!
//! ```text
//! ZoneRecord ──► Normalizer ──┐
//!      │                      ├──► Assembler ──► OutputDocument ──► Writer
//!      └───────► Converter ───┘
//! ```
//!
//! Every stage is synchronous and pure apart from logging; failures on a
//! single range or unit are reported and skipped, never propagated.

pub mod assembler;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod output;
pub mod types;
pub mod units;

#[cfg(test)]
mod test_log;

pub use assembler::{Assembler, AssemblyReport};
pub use config::{Config, FeedFormat};
pub use error::{ConfigError, NormalizeError, OutputError};
pub use types::{
    NoticeInfo, OutputArea, OutputDocument, RangeExpr, ReferenceWindow, TimeWindow, VerticalLimit,
    ZoneRecord,
};
