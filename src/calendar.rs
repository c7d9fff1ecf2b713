//! Gregorian calendar helpers used by the date-based crawl enumerations.

/// Day counts for January through December in a common year.
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-based) of `year`.
///
/// February has 29 days in leap years. Months outside `1..=12` have no days,
/// so a walk over them visits nothing.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_IN_MONTH[(month - 1) as usize],
        _ => 0,
    }
}

/// Lowercase English month name, as used in sitemap URLs (`"june"`).
pub fn month_name(month: u32) -> Option<String> {
    chrono::Month::try_from(u8::try_from(month).ok()?)
        .ok()
        .map(|m| m.name().to_lowercase())
}
