//! Turns raw OCR text into an integer price.

use regex::Regex;
use std::sync::OnceLock;

static NON_DIGITS: OnceLock<Regex> = OnceLock::new();

fn non_digits() -> &'static Regex {
    NON_DIGITS.get_or_init(|| Regex::new(r"[^0-9]").expect("static pattern"))
}

/// Strips everything but digits and parses the remainder.
///
/// Returns `None` when the OCR output contains no digits at all, or when
/// the digit run is too long to be a sane price (protects against a
/// misread that would overflow i64).
pub fn parse_price(text: &str) -> Option<i64> {
    let digits = non_digits().replace_all(text, "");
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok()
}
