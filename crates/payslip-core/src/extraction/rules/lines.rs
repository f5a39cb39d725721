//! Free-text line values.

use super::patterns::LINE_VALUE;
use super::ValueParser;

/// Takes the first non-blank line after the label, trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLineParser;

impl TextLineParser {
    pub fn new() -> Self {
        Self
    }
}

impl ValueParser for TextLineParser {
    type Output = String;

    fn parse(&self, rest: &str) -> Option<Self::Output> {
        let value = line_value(rest);
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// The first non-blank line of `rest`, trimmed. A label that ends its line is
/// followed onto the next line with text. Empty when `rest` is all whitespace.
pub fn line_value(rest: &str) -> &str {
    LINE_VALUE
        .captures(rest)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_line() {
        let parser = TextLineParser::new();

        assert_eq!(parser.parse(" Full-Time"), Some("Full-Time".to_string()));
        assert_eq!(parser.parse("\t Part Time  \r\nNet Pay: $1.00"), Some("Part Time".to_string()));
    }

    #[test]
    fn test_value_on_following_line() {
        let parser = TextLineParser::new();

        assert_eq!(parser.parse("   \nContractor\n"), Some("Contractor".to_string()));
        assert_eq!(parser.parse("\r\n\r\n  Full-Time \r\nNet Pay:"), Some("Full-Time".to_string()));
    }

    #[test]
    fn test_blank_rest_is_none() {
        let parser = TextLineParser::new();

        assert_eq!(parser.parse("  \n \t\n"), None);
        assert_eq!(parser.parse(""), None);
    }
}
