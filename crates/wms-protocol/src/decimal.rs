//! Stateless number formatting for request parameters.

/// Most fraction digits ever written.
pub const MAX_FRACTION_DIGITS: usize = 100;

/// Format a number for a WMS request parameter.
///
/// Uses `.` as the decimal separator, no grouping and no exponent, and only
/// as many fraction digits as needed to round-trip the value (capped at
/// [`MAX_FRACTION_DIGITS`]). The sign of zero is kept: negative zero, and
/// negative values too small for the digit cap, are written as `-0`.
pub fn format_decimal(value: f64) -> String {
    let shortest = value.to_string();
    let fraction_digits = shortest
        .split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0);
    if fraction_digits <= MAX_FRACTION_DIGITS {
        return shortest;
    }

    let capped = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    capped
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_have_no_fraction() {
        assert_eq!(format_decimal(500.0), "500");
        assert_eq!(format_decimal(-20037508.0), "-20037508");
    }

    #[test]
    fn test_fractions_use_shortest_digits() {
        assert_eq!(format_decimal(3.90625), "3.90625");
        assert_eq!(format_decimal(0.1), "0.1");
        assert_eq!(format_decimal(-125.5), "-125.5");
    }

    #[test]
    fn test_no_grouping_or_exponent() {
        assert_eq!(format_decimal(1234567.25), "1234567.25");
        assert_eq!(format_decimal(1e-7), "0.0000001");
        assert_eq!(format_decimal(1e21), "1000000000000000000000");
    }

    #[test]
    fn test_zero_keeps_its_sign() {
        assert_eq!(format_decimal(0.0), "0");
        assert_eq!(format_decimal(-0.0), "-0");
    }

    #[test]
    fn test_fraction_digits_are_capped() {
        let tiny = format_decimal(1e-150);
        assert_eq!(tiny, "0");

        let small = format_decimal(-1e-150);
        assert_eq!(small, "-0");

        let formatted = format_decimal(1.5e-99);
        let (_, fraction) = formatted.split_once('.').unwrap();
        assert!(fraction.len() <= MAX_FRACTION_DIGITS);
        assert!(formatted.starts_with("0.000"));
    }
}
