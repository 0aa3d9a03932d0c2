//! Date helper functions

use chrono::NaiveDate;

/// The only date format accepted in front-matter
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` front-matter date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Format a date as `YYYY-MM-DD`
pub fn date_iso(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format date in full format (like "January 05, 2024")
pub fn full_date(date: &NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Full format without day padding (like "January 5, 2024")
pub fn full_date_unpadded(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Year label used by list grouping
pub fn year(date: &NaiveDate) -> String {
    date.format("%Y").to_string()
}

/// Get relative time (like "2 weeks ago") measured from `today`
pub fn humanize_date(date: &NaiveDate, today: &NaiveDate) -> String {
    let days = today.signed_duration_since(*date).num_days();

    if days < 0 {
        return "in the future".to_string();
    }

    match days {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=13 => "1 week ago".to_string(),
        14..=29 => format!("{} weeks ago", days / 7),
        30..=59 => "1 month ago".to_string(),
        60..=364 => format!("{} months ago", days / 30),
        365..=729 => "1 year ago".to_string(),
        _ => format!("{} years ago", days / 365),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-15"), Some(d(2024, 1, 15)));
        assert_eq!(parse_date(" 2024-01-15 "), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("15/01/2024"), None);
        assert_eq!(parse_date("2024-01-15 10:30:00"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_full_date() {
        let date = d(2024, 1, 5);
        assert_eq!(full_date(&date), "January 05, 2024");
        assert_eq!(full_date_unpadded(&date), "January 5, 2024");
        assert_eq!(date_iso(&date), "2024-01-05");
        assert_eq!(year(&date), "2024");
    }

    #[test]
    fn test_humanize_date() {
        let today = d(2025, 6, 30);
        assert_eq!(humanize_date(&today, &today), "today");
        assert_eq!(humanize_date(&d(2025, 6, 29), &today), "yesterday");
        assert_eq!(humanize_date(&d(2025, 6, 27), &today), "3 days ago");
        assert_eq!(humanize_date(&d(2025, 6, 20), &today), "1 week ago");
        assert_eq!(humanize_date(&d(2025, 6, 9), &today), "3 weeks ago");
        assert_eq!(humanize_date(&d(2025, 5, 20), &today), "1 month ago");
        assert_eq!(humanize_date(&d(2025, 1, 1), &today), "6 months ago");
        assert_eq!(humanize_date(&d(2024, 6, 1), &today), "1 year ago");
        assert_eq!(humanize_date(&d(2022, 6, 1), &today), "3 years ago");
        assert_eq!(humanize_date(&d(2025, 7, 1), &today), "in the future");
    }
}
