//! Date values (pay dates, period ends).

use chrono::NaiveDate;

use super::ValueParser;
use super::lines::line_value;

/// Accepted date layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%B %d, %Y", "%d %B %Y"];

/// Date parser reading the first non-blank line after a label.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateParser;

impl DateParser {
    pub fn new() -> Self {
        Self
    }
}

impl ValueParser for DateParser {
    type Output = NaiveDate;

    fn parse(&self, rest: &str) -> Option<Self::Output> {
        parse_date(line_value(rest))
    }
}

/// Parse a date in any of the supported layouts.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_numeric_dates() {
        assert_eq!(parse_date("2024-01-31"), Some(ymd(2024, 1, 31)));
        assert_eq!(parse_date("31.01.2024"), Some(ymd(2024, 1, 31)));
        assert_eq!(parse_date("01/31/2024"), Some(ymd(2024, 1, 31)));
    }

    #[test]
    fn test_parse_long_dates() {
        assert_eq!(parse_date("January 31, 2024"), Some(ymd(2024, 1, 31)));
        assert_eq!(parse_date("31 January 2024"), Some(ymd(2024, 1, 31)));
    }

    #[test]
    fn test_parser_reads_one_line() {
        let parser = DateParser::new();

        assert_eq!(parser.parse(" 2024-02-29\nNet Pay: $1.00"), Some(ymd(2024, 2, 29)));
        assert_eq!(parser.parse(" 2023-02-29"), None);
        assert_eq!(parser.parse(" next Friday"), None);
    }
}
