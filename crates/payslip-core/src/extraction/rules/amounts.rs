//! Currency amount parsing.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::CURRENCY_VALUE;
use super::ValueParser;

/// Currency amount parser (`$12,345.67`).
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyParser;

impl CurrencyParser {
    pub fn new() -> Self {
        Self
    }
}

impl ValueParser for CurrencyParser {
    type Output = Decimal;

    fn parse(&self, rest: &str) -> Option<Self::Output> {
        let caps = CURRENCY_VALUE.captures(rest)?;
        let integer_part = caps[1].replace(',', "");
        let decimal_part = &caps[2];

        Decimal::from_str(&format!("{}.{}", integer_part, decimal_part)).ok()
    }
}

/// Format amount with a dollar sign and thousands separators ($1,234.56).
pub fn format_currency(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some(parts) => parts,
        None => return format!("${}", s),
    };

    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer_part),
    };

    // Add thousand separators
    let chars: Vec<char> = digits.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{}${}.{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grouped_amount() {
        let parser = CurrencyParser::new();

        assert_eq!(
            parser.parse(" $1,234.56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
        assert_eq!(
            parser.parse(" $12,345,678.90\nEmployment Type: x"),
            Some(Decimal::from_str("12345678.90").unwrap())
        );
        assert_eq!(
            parser.parse("2500.00"),
            Some(Decimal::from_str("2500.00").unwrap())
        );
    }

    #[test]
    fn test_parse_keeps_two_decimal_scale() {
        let amount = CurrencyParser::new().parse("$0.00").unwrap();
        assert!(amount.is_zero());
        assert_eq!(amount.scale(), 2);
        assert_eq!(amount.to_string(), "0.00");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let parser = CurrencyParser::new();

        assert_eq!(parser.parse(" 1234.5"), None);
        assert_eq!(parser.parse(" abcd"), None);
        assert_eq!(parser.parse(" -12.00"), None);
        assert_eq!(parser.parse(" 12.345"), None);
        assert_eq!(parser.parse(""), None);
    }

    #[test]
    fn test_format_currency() {
        let amount = Decimal::from_str("1234.56").unwrap();
        assert_eq!(format_currency(amount), "$1,234.56");

        let amount = Decimal::from_str("12345678.9").unwrap();
        assert_eq!(format_currency(amount), "$12,345,678.90");

        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
    }
}
