//! Domain-specific assertion macros for aup harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which area broke which rule.

use aup_core::OutputArea;

/// Assert that an `OutputArea` covers exactly `start..end`.
///
/// ```rust
/// assert_area_window!(area, at(19, 8, 0), at(19, 12, 0));
/// ```
#[macro_export]
macro_rules! assert_area_window {
    ($area:expr, $start:expr, $end:expr) => {{
        let area: &aup_core::OutputArea = &$area;
        pretty_assertions::assert_eq!(
            (area.start_datetime, area.end_datetime),
            ($start, $end),
            "window of area {:?}",
            area.name
        );
    }};
}

/// Names of `areas`, in order.
pub fn area_names(areas: &[OutputArea]) -> Vec<&str> {
    areas.iter().map(|a| a.name.as_str()).collect()
}

/// Every area must satisfy `start <= end` and lie on whole seconds.
pub fn assert_well_formed(areas: &[OutputArea]) {
    for area in areas {
        assert!(
            area.start_datetime <= area.end_datetime,
            "area {:?} ends before it starts",
            area.name
        );
        assert_eq!(
            area.start_datetime.timestamp_subsec_nanos(),
            0,
            "area {:?} start has sub-second precision",
            area.name
        );
    }
}
