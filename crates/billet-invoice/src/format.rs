// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Number and date formatting shared by the markup and plain-text renderers.
//!
//! Both output forms go through these functions so a given invoice yields
//! byte-identical figures in either form.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

const DATE_FORMAT: &str = "%b %d, %Y";

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `$1,375.00` style: symbol prefix, thousands grouping, two decimals.
/// Negative amounts carry the sign before the symbol (`-$12.50`).
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = round_cents(amount);
    let mut magnitude = rounded.abs();
    magnitude.rescale(2);

    let digits = magnitude.to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol}{}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, chr) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(chr);
    }
    grouped
}

/// Up to two decimals with trailing zeros trimmed: `10`, `7.5`, `8.88`.
pub fn format_trimmed(value: Decimal) -> String {
    let rounded = round_cents(value);
    if rounded.is_zero() {
        return "0".to_string();
    }
    rounded.normalize().to_string()
}

/// Tax rates: `10`, `7.5`.
pub fn format_percentage(rate: Decimal) -> String {
    format_trimmed(rate)
}

/// Quantities: `2`, `1.5`.
pub fn format_quantity(quantity: Decimal) -> String {
    format_trimmed(quantity)
}

/// `Jan 15, 2025` style.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_groups_thousands_with_two_decimals() {
        assert_eq!(format_currency(dec!(1375), "$"), "$1,375.00");
        assert_eq!(format_currency(dec!(0), "$"), "$0.00");
        assert_eq!(format_currency(dec!(999.5), "$"), "$999.50");
        assert_eq!(format_currency(dec!(1234567.891), "€"), "€1,234,567.89");
        assert_eq!(format_currency(dec!(100000), "$"), "$100,000.00");
    }

    #[test]
    fn currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(2.005), "$"), "$2.01");
        assert_eq!(format_currency(dec!(-2.005), "$"), "-$2.01");
    }

    #[test]
    fn currency_sign_precedes_symbol_and_never_shows_negative_zero() {
        assert_eq!(format_currency(dec!(-1250.5), "$"), "-$1,250.50");
        assert_eq!(format_currency(dec!(-0.001), "$"), "$0.00");
    }

    #[test]
    fn trimmed_numbers_drop_trailing_zeros() {
        assert_eq!(format_percentage(dec!(10)), "10");
        assert_eq!(format_percentage(dec!(10.00)), "10");
        assert_eq!(format_percentage(dec!(7.50)), "7.5");
        assert_eq!(format_percentage(dec!(8.875)), "8.88");
        assert_eq!(format_quantity(dec!(2.000)), "2");
        assert_eq!(format_quantity(dec!(0.00)), "0");
    }

    #[test]
    fn dates_use_short_month_names() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date(date), "Jan 05, 2025");
    }
}
