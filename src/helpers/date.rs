//! Date helper functions

use chrono::{NaiveDate, NaiveTime};

/// Format a content date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMMM DD, YYYY") // -> "January 15, 2024"
/// ```
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// RFC 2822 timestamp at midnight UTC, for feed pubDate fields
pub fn rfc2822_date(date: &NaiveDate) -> String {
    date.and_time(NaiveTime::MIN).and_utc().to_rfc2822()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first so "MMMM" is not eaten by "MM"
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&date(), "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_date(&date(), "MMMM DD, YYYY"), "January 15, 2024");
        assert_eq!(format_date(&date(), "MMM DD"), "Jan 15");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY/MM/DD"), "%Y/%m/%d");
        assert_eq!(moment_to_chrono_format("MMMM DD, YYYY"), "%B %d, %Y");
    }

    #[test]
    fn test_rfc2822_date() {
        assert_eq!(rfc2822_date(&date()), "Mon, 15 Jan 2024 00:00:00 +0000");
    }
}
