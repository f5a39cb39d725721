//! Common regex patterns for payslip value parsing.
//!
//! Every pattern is anchored at `^` and applied to the text that directly
//! follows a label's colon.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Currency amount: optional "$", strict thousands grouping or a plain
    // digit run, then exactly two decimals ending at a word boundary.
    pub static ref CURRENCY_VALUE: Regex = Regex::new(
        r"^\s*\$?(\d{1,3}(?:,\d{3})+|\d+)\.(\d{2})\b"
    ).unwrap();

    // First non-blank line: the rest of the label's line, or the next line
    // with text when the label ends its line.
    pub static ref LINE_VALUE: Regex = Regex::new(
        r"^\s*([^\r\n]*)"
    ).unwrap();
}
