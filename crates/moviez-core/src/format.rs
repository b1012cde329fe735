//! Display formatting helpers.

use chrono::{Datelike, NaiveDate};

/// Shown when a movie has no genres.
pub const NO_GENRES: &str = "No genres available";
/// Shown when a movie has no YouTube trailer.
pub const NO_TRAILER: &str = "No trailer available";
/// Shown for missing scalar fields (runtime, release date).
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a runtime in minutes as `{h}h {m}m` (139 -> `2h 19m`).
#[must_use]
pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Formats an optional runtime, falling back to `N/A`.
#[must_use]
pub fn format_runtime_opt(minutes: Option<u32>) -> String {
    minutes.map_or_else(|| String::from(NOT_AVAILABLE), format_runtime)
}

/// Formats a vote average with one decimal (8.433 -> `8.4`).
#[must_use]
pub fn format_rating(vote_average: f64) -> String {
    format!("{vote_average:.1}")
}

/// Extracts the year from a `YYYY-MM-DD` release date.
#[must_use]
pub fn release_year(release_date: Option<&str>) -> Option<i32> {
    let date = NaiveDate::parse_from_str(release_date?, "%Y-%m-%d").ok()?;
    Some(date.year())
}

/// Comma-joined genre names, or the no-genres fallback.
#[must_use]
pub fn genre_line(names: &[String]) -> String {
    if names.is_empty() {
        String::from(NO_GENRES)
    } else {
        names.join(", ")
    }
}
