//! Value parsers applied to the text that follows a field label.

pub mod amounts;
pub mod dates;
pub mod lines;
pub mod patterns;

pub use amounts::{format_currency, CurrencyParser};
pub use dates::{parse_date, DateParser};
pub use lines::{line_value, TextLineParser};

/// Trait for value parsers.
///
/// `rest` is the text immediately after the label's colon, running to the
/// end of the document. Parsers look only at its start.
pub trait ValueParser {
    /// The type of value this parser produces.
    type Output;

    /// Parse the value, or `None` when the text does not hold one.
    fn parse(&self, rest: &str) -> Option<Self::Output>;
}
