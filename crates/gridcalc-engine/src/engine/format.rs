use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits in rendered values.
pub const FRACTION_DIGITS: u32 = 5;

/// Format a value as fixed-point text with five fractional digits, e.g. `3.14159`.
///
/// Rounds half away from zero. Always has at least one integer digit, and
/// zero never renders with a sign.
pub fn format_value(value: Decimal) -> String {
    let rounded =
        value.round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{:.*}", FRACTION_DIGITS as usize, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn fmt(s: &str) -> String {
        format_value(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_pads_to_five_digits() {
        assert_eq!(fmt("7"), "7.00000");
        assert_eq!(fmt("2.5"), "2.50000");
        assert_eq!(fmt("-3"), "-3.00000");
    }

    #[test]
    fn test_keeps_leading_zero() {
        assert_eq!(fmt("0"), "0.00000");
        assert_eq!(fmt("0.25"), "0.25000");
        assert_eq!(fmt("-0.25"), "-0.25000");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(fmt("3.141592"), "3.14159");
        assert_eq!(fmt("0.000005"), "0.00001");
        assert_eq!(fmt("-0.000005"), "-0.00001");
        assert_eq!(fmt("1.999999"), "2.00000");
    }

    #[test]
    fn test_negative_zero_is_unsigned() {
        assert_eq!(fmt("-0.000001"), "0.00000");
        assert_eq!(format_value(-Decimal::ZERO), "0.00000");
    }

    #[test]
    fn test_thirds() {
        let third = Decimal::ONE / Decimal::from(3);
        assert_eq!(format_value(third), "0.33333");
    }
}
