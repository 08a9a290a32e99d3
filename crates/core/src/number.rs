//! Lenient numeric input handling.
//!
//! Form inputs arrive as raw text. Anything that cannot be read as a finite
//! number becomes `0.0`; callers never see a parse error.

/// Coerce raw input text into a number.
///
/// Reads the longest leading float literal (after skipping leading
/// whitespace) and ignores whatever follows it, so `"12abc"` is `12.0`.
/// Empty input, input without a numeric prefix, overflow to infinity and
/// negative zero all yield `0.0`.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let len = float_prefix_len(s);
    if len == 0 {
        return 0.0;
    }

    match s[..len].parse::<f64>() {
        // `v != 0.0` also folds -0.0 into the literal 0.0 below.
        Ok(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}

/// Render a value for display with exactly two decimals.
///
/// Rounding only ever happens here; stored and accumulated values keep full
/// precision.
pub fn format_amount(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.2}")
}

/// Render a value the way a plain numeric input shows it: shortest form,
/// no trailing zeros (`2`, `2.5`).
pub fn format_plain(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}")
}

/// Length in bytes of the float literal at the start of `s`:
/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
fn float_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    i = int_end;

    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        let frac_digits = frac_end - (i + 1);
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            i = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        // A dangling exponent marker is not part of the number.
        if exp_end > j {
            i = exp_end;
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(coerce_number("42"), 42.0);
        assert_eq!(coerce_number("3.25"), 3.25);
        assert_eq!(coerce_number("-7.5"), -7.5);
        assert_eq!(coerce_number("+8"), 8.0);
    }

    #[test]
    fn reads_leading_numeric_prefix() {
        assert_eq!(coerce_number("12abc"), 12.0);
        assert_eq!(coerce_number("  3.5 kg"), 3.5);
        assert_eq!(coerce_number(".5"), 0.5);
        assert_eq!(coerce_number("5."), 5.0);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number("2.5E-1x"), 0.25);
        assert_eq!(coerce_number("1.2.3"), 1.2);
    }

    #[test]
    fn dangling_exponent_is_ignored() {
        assert_eq!(coerce_number("2e"), 2.0);
        assert_eq!(coerce_number("2e+"), 2.0);
    }

    #[test]
    fn non_numeric_input_becomes_zero() {
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
        assert_eq!(coerce_number("."), 0.0);
        assert_eq!(coerce_number("-"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("Infinity"), 0.0);
    }

    #[test]
    fn overflow_and_negative_zero_become_zero() {
        assert_eq!(coerce_number("1e400"), 0.0);
        let z = coerce_number("-0");
        assert_eq!(z, 0.0);
        assert!(z.is_sign_positive());
    }

    #[test]
    fn format_amount_uses_two_decimals() {
        assert_eq!(format_amount(180.0), "180.00");
        assert_eq!(format_amount(12.6), "12.60");
        assert_eq!(format_amount(192.6), "192.60");
        assert_eq!(format_amount(-5.0), "-5.00");
        assert_eq!(format_amount(-0.0), "0.00");
        assert_eq!(format_amount(1.004), "1.00");
    }

    #[test]
    fn format_plain_drops_trailing_zeros() {
        assert_eq!(format_plain(2.0), "2");
        assert_eq!(format_plain(2.5), "2.5");
        assert_eq!(format_plain(-0.0), "0");
    }
}
