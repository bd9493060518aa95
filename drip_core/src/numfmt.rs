//! Number formatting shared by the SVG and DXF writers.
//!
//! Coordinates are written in shortest round-trip decimal form, so a value
//! read back from a document parses to the same `f64` that was written.

/// Shortest round-trip decimal, with `-0` written as `0` and non-finite
/// values written as `Infinity`, `-Infinity` or `NaN`.
pub fn num(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// Fixed number of decimal places, non-finite values spelled out like [`num`].
///
/// Exact halfway cases round away from zero (`0.125` gives `0.13`). Values
/// that only look like ties in decimal are rounded by their true binary
/// value, so `1.005` gives `1.00`.
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return num(value);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let mut magnitude = value.abs();
    if is_exact_tie(magnitude, decimals) {
        // One ulp up moves the tie off the midpoint without crossing another
        magnitude = f64::from_bits(magnitude.to_bits() + 1);
    }
    format!("{}{:.*}", sign, decimals, magnitude)
}

/// Every finite f64 has at most 1074 fractional decimal digits.
const EXACT_DIGITS: usize = 1074;

/// Whether the digits after `decimals` are exactly `5` followed by zeros.
fn is_exact_tie(magnitude: f64, decimals: usize) -> bool {
    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let Some((_, fraction)) = exact.split_once('.') else {
        return false;
    };
    fraction
        .get(decimals..)
        .map(|tail| tail.trim_end_matches('0') == "5")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_integers_have_no_fraction() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(-0.5), "-0.5");
        assert_eq!(num(0.3), "0.3");
    }

    #[test]
    fn test_num_negative_zero() {
        assert_eq!(num(-0.0), "0");
    }

    #[test]
    fn test_num_roundtrips() {
        for value in [0.1 + 0.2, 3.0 * 0.3, 1.0 / 3.0, 150.0 + 0.9 * 50.0] {
            let parsed: f64 = num(value).parse().unwrap();
            assert_eq!(parsed.to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(num(f64::INFINITY), "Infinity");
        assert_eq!(num(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(fixed(f64::NAN, 2), "NaN");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(11.0, 2), "11.00");
        assert_eq!(fixed(1.4000000000000001, 2), "1.40");
        assert_eq!(fixed(-0.1, 2), "-0.10");
    }

    #[test]
    fn test_fixed_exact_ties_round_up() {
        assert_eq!(fixed(0.125, 2), "0.13");
        assert_eq!(fixed(-0.125, 2), "-0.13");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(0.5, 0), "1");
        assert_eq!(fixed(0.375, 2), "0.38");
    }

    #[test]
    fn test_fixed_near_ties_follow_binary_value() {
        // 1.005 is stored just below the midpoint, 0.035 just above
        assert_eq!(fixed(1.005, 2), "1.00");
        assert_eq!(fixed(0.035, 2), "0.04");
        assert_eq!(fixed(0.1 + 0.2, 1), "0.3");
    }

    #[test]
    fn test_fixed_zero_sign() {
        assert_eq!(fixed(-0.0, 2), "0.00");
        assert_eq!(fixed(-0.001, 2), "-0.00");
    }
}
