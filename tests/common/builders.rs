//! Test builders — ergonomic constructors for `ZoneRecord` and `Config`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::path::Path;

use aup_core::{Config, RangeExpr, VerticalLimit, ZoneRecord};

// ---------------------------------------------------------------------------
// ZoneRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`ZoneRecord`] test fixtures.
///
/// ```rust
/// let zone = ZoneRecordBuilder::new("UNR101")
///     .range("19.10.2026 08:00-12:00")
///     .levels((0.0, "magl"), (1500.0, "magl"))
///     .build();
/// ```
pub struct ZoneRecordBuilder {
    zone: ZoneRecord,
}

impl ZoneRecordBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            zone: ZoneRecord {
                name: name.into(),
                region: None,
                schedule: Vec::new(),
                lower: VerticalLimit::new(0.0, "magl"),
                upper: VerticalLimit::new(1500.0, "magl"),
            },
        }
    }

    pub fn range(mut self, text: &str) -> Self {
        self.zone.schedule.push(RangeExpr::Text(text.to_string()));
        self
    }

    pub fn instants(mut self, from: &str, to: &str) -> Self {
        self.zone.schedule.push(RangeExpr::Instants {
            from: from.to_string(),
            to: to.to_string(),
        });
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.zone.region = Some(region.to_string());
        self
    }

    pub fn levels(mut self, lower: (f64, &str), upper: (f64, &str)) -> Self {
        self.zone.lower = VerticalLimit::new(lower.0, lower.1);
        self.zone.upper = VerticalLimit::new(upper.0, upper.1);
        self
    }

    pub fn build(self) -> ZoneRecord {
        self.zone
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Config pointing at `url` and writing to `output`, plus any extra variables.
pub fn test_config(url: &str, output: &Path, extra: &[(&str, &str)]) -> Config {
    let mut vars = vec![
        ("DATA_URL".to_string(), url.to_string()),
        ("OUTPUT_FILE".to_string(), output.display().to_string()),
    ];
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    Config::from_vars(vars).expect("test config must load")
}
