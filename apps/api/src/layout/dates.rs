//! Date-range formatting for entry lines ("Mar 2021 - Present").

use chrono::NaiveDate;

const PRESENT: &str = "Present";

/// Formats one date. `YYYY-MM` and `YYYY-MM-DD` become `"Mon YYYY"`, a bare year stays
/// as-is, and anything unparseable is passed through trimmed.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if is_present(raw) {
        return PRESENT.to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return date.format("%b %Y").to_string();
    }
    raw.to_string()
}

/// Formats a start/end pair. An empty or "Present" end renders as "Present" when a
/// start exists; with neither date the result is empty.
pub fn format_date_range(start: &str, end: &str) -> String {
    let start = format_date(start);
    let end = format_date(end);
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (true, false) => end,
        (false, true) => format!("{start} - {PRESENT}"),
        (false, false) => format!("{start} - {end}"),
    }
}

fn is_present(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("present") || raw.eq_ignore_ascii_case("current")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_to_present() {
        assert_eq!(format_date_range("2021-03", "Present"), "Mar 2021 - Present");
    }

    #[test]
    fn test_range_concrete_end() {
        assert_eq!(format_date_range("2021-03", "2022-07"), "Mar 2021 - Jul 2022");
    }

    #[test]
    fn test_empty_end_means_present() {
        assert_eq!(format_date_range("2020-01", ""), "Jan 2020 - Present");
        assert_eq!(format_date_range("2020-01", "current"), "Jan 2020 - Present");
    }

    #[test]
    fn test_full_dates_and_years() {
        assert_eq!(format_date("2019-11-15"), "Nov 2019");
        assert_eq!(format_date("2018"), "2018");
    }

    #[test]
    fn test_unparseable_passes_through() {
        assert_eq!(format_date("Summer 2019"), "Summer 2019");
        assert_eq!(format_date("2021-13"), "2021-13");
    }

    #[test]
    fn test_no_dates_is_empty() {
        assert_eq!(format_date_range("", ""), "");
        assert_eq!(format_date_range("", "2022-05"), "May 2022");
    }
}
