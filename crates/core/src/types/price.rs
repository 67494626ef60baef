//! Price formatting for display.
//!
//! Prices are carried as [`rust_decimal::Decimal`] everywhere; this module
//! only owns the presentation. The storefront displays amounts the way the
//! ru-RU locale groups them: thousands separated by spaces, a comma before
//! the fraction, and the `sum` currency word appended.

use rust_decimal::Decimal;

/// Format a price for display, e.g. `12 500 sum` or `10,5 sum`.
///
/// Fractions are rounded to at most three digits and trailing zeros are
/// dropped, so whole amounts render without a decimal part.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp(3).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    frac_part.map_or_else(
        || format!("{sign}{grouped} sum"),
        |frac| format!("{sign}{grouped},{frac} sum"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("valid decimal literal")
    }

    #[test]
    fn test_whole_amounts_grouped() {
        assert_eq!(format_price(dec("999")), "999 sum");
        assert_eq!(format_price(dec("12500")), "12 500 sum");
        assert_eq!(format_price(dec("1000000")), "1 000 000 sum");
    }

    #[test]
    fn test_fraction_uses_comma() {
        assert_eq!(format_price(dec("10.5")), "10,5 sum");
        assert_eq!(format_price(dec("1234.25")), "1 234,25 sum");
    }

    #[test]
    fn test_trailing_zeros_dropped() {
        assert_eq!(format_price(dec("10.00")), "10 sum");
        assert_eq!(format_price(dec("10.50")), "10,5 sum");
    }

    #[test]
    fn test_fraction_rounded_to_three_digits() {
        assert_eq!(format_price(dec("1.23456")), "1,235 sum");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_price(Decimal::ZERO), "0 sum");
    }
}
