//! Wire formats shared by security keys, payment URLs and callbacks.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// `strftime` pattern of every timestamp exchanged with the provider (UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders an amount with exactly two fractional digits and a `.` separator.
///
/// Values with more precision are rounded half away from zero. A zero integer
/// part is omitted, as the provider's `#.00` pattern does (`0.5` renders `.50`).
///
/// # Examples
///
/// ```
/// use payform::signing::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(999, 2)), "9.99");
/// assert_eq!(format_amount(Decimal::new(10, 0)), "10.00");
/// assert_eq!(format_amount(Decimal::new(1005, 3)), "1.01");
/// assert_eq!(format_amount(Decimal::new(5, 1)), ".50");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{rounded:.2}");
    match formatted.strip_prefix('0') {
        Some(fraction) if fraction.starts_with('.') => fraction.to_owned(),
        _ => formatted,
    }
}

/// Renders a timestamp as `yyyy-MM-dd HH:mm:ss`, dropping sub-second precision.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a `yyyy-MM-dd HH:mm:ss` UTC timestamp.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok().map(|naive| naive.and_utc())
}

/// Parses an unsigned amount: ASCII digits with at most one `.` separator.
///
/// The integer part may be empty (`.50`). Signs, exponents, whitespace and
/// group separators are rejected.
pub(crate) fn parse_amount(value: &str) -> Option<Decimal> {
    let digits = value.bytes().filter(u8::is_ascii_digit).count();
    let dots = value.bytes().filter(|b| *b == b'.').count();
    if digits == 0 || dots > 1 || digits + dots != value.len() {
        return None;
    }
    match value.strip_prefix('.') {
        Some(fraction) => format!("0.{fraction}").parse().ok(),
        None => value.parse().ok(),
    }
}

/// Parses an unsigned integer made only of ASCII digits.
pub(crate) fn parse_digits<T: std::str::FromStr>(value: &str) -> Option<T> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_amount_pads_and_rounds() {
        assert_eq!(format_amount(Decimal::new(999, 2)), "9.99");
        assert_eq!(format_amount(Decimal::new(1_000, 2)), "10.00");
        assert_eq!(format_amount(Decimal::new(1_234_567_891, 3)), "1234567.89");
        assert_eq!(format_amount(Decimal::new(2675, 3)), "2.68");
        assert_eq!(format_amount(Decimal::new(26_749, 4)), "2.67");
    }

    #[test]
    fn test_format_amount_omits_zero_integer_part() {
        assert_eq!(format_amount(Decimal::new(5, 1)), ".50");
        assert_eq!(format_amount(Decimal::ZERO), ".00");
        assert_eq!(format_amount(Decimal::new(1, 2)), ".01");
        assert_eq!(format_amount(Decimal::new(9_995, 4)), "1.00");
        assert_eq!(format_amount(Decimal::new(1_005, 2)), "10.05");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2010, 1, 29, 16, 10, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2010-01-29 16:10:00");
    }

    #[test]
    fn test_parse_timestamp_strict() {
        let ts = parse_timestamp("2016-12-31 23:59:59").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2016, 12, 31, 23, 59, 59).unwrap());
        assert!(parse_timestamp("2016-12-31T23:59:59").is_none());
        assert!(parse_timestamp("2016-12-31").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_parse_amount_strict() {
        assert_eq!(parse_amount("123.45"), Some(Decimal::new(12345, 2)));
        assert_eq!(parse_amount("10"), Some(Decimal::TEN));
        assert_eq!(parse_amount(".50"), Some(Decimal::new(5, 1)));
        assert_eq!(parse_amount("0.50"), Some(Decimal::new(5, 1)));
        for bad in ["", ".", "-1.00", "+1", "1e3", " 1.00", "1,000.00", "1.0.0", "abc"] {
            assert!(parse_amount(bad).is_none(), "{bad:?} accepted");
        }
    }

    #[test]
    fn test_parse_digits_strict() {
        assert_eq!(parse_digits::<u64>("1234567890"), Some(1_234_567_890));
        assert_eq!(parse_digits::<u32>("0005205"), Some(5205));
        for bad in ["", "-1", "+1", " 1", "1.0", "12a"] {
            assert!(parse_digits::<u64>(bad).is_none(), "{bad:?} accepted");
        }
        assert!(parse_digits::<u32>("99999999999").is_none());
    }
}
