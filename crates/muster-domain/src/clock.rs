//! Calendar-day and wall-clock formats used by sessions and check-ins.
//!
//! Session dates are plain calendar days (`YYYY-MM-DD`); start, end and
//! check-in instants are local wall-clock times without a zone
//! (`YYYY-MM-DD HH:MM:SS`), as recorded on the paper attendance sheet.

use chrono::{NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted input layouts, tried in order. Browsers submit `datetime-local`
/// values as `YYYY-MM-DDTHH:MM`.
const WALL_CLOCK_INPUTS: [&str; 4] = [
    WALL_CLOCK_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

pub fn parse_wall_clock(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    WALL_CLOCK_INPUTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

pub fn format_wall_clock(at: NaiveDateTime) -> String {
    at.format(WALL_CLOCK_FORMAT).to_string()
}
