//! Date-column detection and date reformatting.
//!
//! The source files are wide format: a handful of identity columns
//! (Province/State, Country/Region, Lat, Long) followed by one column per
//! date, headed `M/D/YY`. Date columns are recognized purely by pattern -
//! there is no allow-list of identity columns, so a header that happened
//! to contain something like `1/1/1` would be picked up as a date. That
//! matches the source data contract and is kept as-is.

use once_cell::sync::Lazy;
use regex::Regex;

// Unanchored on purpose: any header CONTAINING digits/digits/digits counts.
static DATE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+/\d+/\d+").expect("static regex"));

/// True if `header` names a date column.
pub fn is_date_header(header: &str) -> bool {
    DATE_HEADER.is_match(header)
}

/// Reformats `M/D/YY` (or `MM/DD/YY`) into `YYYY-MM-DD`.
///
/// Two-digit years below 50 read as `20YY`, the rest as `19YY`; month and
/// day are zero-padded. String manipulation only - no calendar type is
/// involved and nothing is validated beyond the three-part shape (the
/// detector already guaranteed the digits). A header without exactly
/// three parts passes through unchanged.
pub fn to_iso_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return raw.to_string();
    }
    let (month, day, yy) = (parts[0], parts[1], parts[2]);
    let century = match yy.parse::<u32>() {
        Ok(y) if y < 50 => "20",
        _ => "19",
    };
    format!("{century}{yy:0>2}-{month:0>2}-{day:0>2}")
}
