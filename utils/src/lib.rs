//! Shared numeric helpers for the divergence workspace.

/// Symmetric percentage difference between two prices.
///
/// Computed relative to the mean of both values, so the result does not depend
/// on argument order. Non-finite when `a + b == 0`.
pub fn percentage_difference(a: f64, b: f64) -> f64 {
    (a - b).abs() / ((a + b) / 2.0) * 100.0
}

/// Parses a decimal written with a period separator and no digit grouping.
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is not a
/// finite number, including `inf` and `NaN` spellings.
pub fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_is_symmetric() {
        for (a, b) in [(1.0, 2.0), (0.0035, 0.0041), (100.0, 110.0), (42.5, 7.25)] {
            assert_eq!(percentage_difference(a, b), percentage_difference(b, a));
        }
    }

    #[test]
    fn difference_of_equal_prices_is_zero() {
        for x in [0.0001, 1.0, 2500.0] {
            assert_eq!(percentage_difference(x, x), 0.0);
        }
    }

    #[test]
    fn difference_known_value() {
        let d = percentage_difference(100.0, 110.0);
        assert!((d - 9.523_809_523_8).abs() < 1e-9, "got {d}");
    }

    #[test]
    fn difference_of_zero_sum_is_not_finite() {
        assert!(!percentage_difference(0.0, 0.0).is_finite());
        assert!(!percentage_difference(1.0, -1.0).is_finite());
    }

    #[test]
    fn parse_decimal_accepts_invariant_format() {
        assert_eq!(parse_decimal("7.5"), Some(7.5));
        assert_eq!(parse_decimal(" 0.00012345 "), Some(0.00012345));
        assert_eq!(parse_decimal("3"), Some(3.0));
        assert_eq!(parse_decimal("-2"), Some(-2.0));
    }

    #[test]
    fn parse_decimal_rejects_other_formats() {
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("1,5"), None);
        assert_eq!(parse_decimal("1,000.5"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }
}
