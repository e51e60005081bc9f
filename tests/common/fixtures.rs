//! Static feed bodies used across harnesses.
//!
//! Every date is relative to [`now`] (19 Oct 2026, 09:15:42 UTC), so the
//! reference window is 19–20 Oct 2026.

use chrono::{DateTime, TimeZone, Utc};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 15, 42).unwrap()
}

pub fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, day, hour, minute, 0).unwrap()
}

/// JSON schedule feed: one single-day zone, one multi-day zone, one broken
/// range, one zone outside the window and one with an unknown unit.
pub const JSON_FEED: &str = r#"{
  "data": [
    {
      "name": "UNR101",
      "areas_time": "\nРабота утверждена:\n19.10.2026 08:00-12:00\n",
      "low_level": {"value": 0, "unit": "magl"},
      "high_level": {"value": 3048, "unit": "magl"}
    },
    {
      "name": "Зона Б",
      "areas_time": "\n18.10.2026-25.10.2026 06:00-14:00 (ежедневно)\n",
      "low_level": {"value": 1000, "unit": "ftqne"},
      "high_level": {"value": 12345, "unit": "ftqne"}
    },
    {
      "name": "BROKEN",
      "areas_time": "\nnot-a-date\n",
      "low_level": {"value": 0, "unit": "magl"},
      "high_level": {"value": 600, "unit": "magl"}
    },
    {
      "name": "LATER",
      "areas_time": "\n30.10.2026 08:00-12:00\n",
      "low_level": {"value": 0, "unit": "magl"},
      "high_level": {"value": 600, "unit": "magl"}
    },
    {
      "name": "ODD",
      "areas_time": "\n20.10.2026 22:00-24:00\n",
      "low_level": {"value": 0, "unit": "magl"},
      "high_level": {"value": 500, "unit": "xyz"}
    }
  ]
}"#;

/// XML bulletin: two zones in UNNT (one active tomorrow, one long past) and
/// one zone of another region.
pub const XML_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<AirspaceAvailabilityBulletin>
  <tra>
    <zc>UNNT</zc>
    <areacode>UNR4512</areacode>
    <levelfrom>300AGL</levelfrom>
    <levelto>F120</levelto>
    <datefrom>2026-10-20T06:00Z</datefrom>
    <dateto>2026-10-20T14:00Z</dateto>
  </tra>
  <tra>
    <zc>UNNT</zc>
    <areacode>UNR4400</areacode>
    <levelfrom>0AGL</levelfrom>
    <levelto>F060</levelto>
    <datefrom>2026-09-01T06:00Z</datefrom>
    <dateto>2026-09-02T14:00Z</dateto>
  </tra>
  <tra>
    <zc>UIII</zc>
    <areacode>UIR7001</areacode>
    <levelfrom>0AGL</levelfrom>
    <levelto>F100</levelto>
    <datefrom>2026-10-19T00:00Z</datefrom>
    <dateto>2026-10-21T00:00Z</dateto>
  </tra>
</AirspaceAvailabilityBulletin>"#;
