use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const MINIMUM_REPORTED_AGE: i32 = 13;

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Whole calendar years between `dob` and `on`, never below 13.
pub fn age_in_years(dob: NaiveDate, on: NaiveDate) -> i32 {
    let years = on
        .years_since(dob)
        .map(|y| i32::try_from(y).unwrap_or(i32::MAX))
        .unwrap_or(0);
    years.max(MINIMUM_REPORTED_AGE)
}

/// Parses the free-form `_date` string submitted with a test result.
///
/// Clients have sent RFC 3339 (`2025-06-29T21:14:21.000Z`), naive ISO
/// (`2025-06-29T21:14:21`, `2025-06-29 21:14:21`) and the browser locale
/// format `29/06/2025, 21:14:21`. The wall-clock time is kept as written so
/// the hour reflects when the client took the test.
pub fn parse_test_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%d/%m/%Y, %H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
