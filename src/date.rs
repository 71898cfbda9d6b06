//! Date formatting and calendar arithmetic.
//!
//! Converts picked dates to the `MM/DD/YYYY` query shape expected by the
//! movie search service, and moves the calendar cursor around.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Months, NaiveDate};

/// Format string for the search query date.
const QUERY_FORMAT: &str = "%m/%d/%Y";

/// Format a date as `MM/DD/YYYY`.
///
/// # Arguments
/// * `date` - Calendar date to format
///
/// # Returns
/// * `String` - Zero-padded month and day, four-digit year
///
/// # Details
/// Uses the date's own calendar fields. No timezone conversion happens here.
pub fn format_query_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.month(), date.day(), date.year())
}

/// Parse a `MM/DD/YYYY` string into a date.
///
/// # Arguments
/// * `input` - Date string (e.g., "07/15/2023")
///
/// # Returns
/// * `Result<NaiveDate>` - Parsed date or error
///
/// # Details
/// Strict: month and day must be two digits and the year four digits.
pub fn parse_query_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    let bytes = input.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !shape_ok {
        return Err(anyhow::anyhow!(
            "Invalid date format '{}'. Please use MM/DD/YYYY.",
            input
        ));
    }

    NaiveDate::parse_from_str(input, QUERY_FORMAT)
        .with_context(|| format!("Invalid calendar date: {}", input))
}

/// Check whether a date fits the `MM/DD/YYYY` query shape.
///
/// # Returns
/// * `bool` - True when the year has at most four digits and is not negative
pub fn is_query_representable(date: NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return 0,
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}

/// Move a date by a number of days, saturating at the calendar bounds.
pub fn shift_days(date: NaiveDate, delta: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(delta)).unwrap_or(date)
}

/// Move a date by a number of months.
///
/// # Details
/// The day is clamped to the length of the target month, so January 31
/// plus one month lands on the last day of February.
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

/// Clamp a date so it never goes past `max`.
pub fn clamp_to(date: NaiveDate, max: NaiveDate) -> NaiveDate {
    date.min(max)
}

/// Human-readable month heading (e.g., "July 2023").
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
