//! Decimal formatting for coordinates, accuracy and the map link.
//!
//! Values are scaled and rounded into an `i64`, then printed as integers, so
//! the output never depends on float-to-decimal formatting in the target.
//! Non-finite input prints as `NaN`, `Inf` or `-Inf`.

/// Decimals used for latitude and longitude.
pub const COORDINATE_DECIMALS: usize = 6;

/// Decimals used for the accuracy radius.
pub const ACCURACY_DECIMALS: usize = 2;

/// Largest precision the formatter honors.
pub const MAX_DECIMALS: usize = 9;

pub fn fmt_fixed(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return if v.is_nan() {
            "NaN".to_string()
        } else if v.is_sign_positive() {
            "Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }

    let decimals = decimals.min(MAX_DECIMALS);
    let scale_i64 = 10_i64.pow(decimals as u32);
    let scaled = (v * scale_i64 as f64).round();

    if !scaled.is_finite() || scaled.abs() > (i64::MAX as f64) {
        return if v.is_sign_negative() {
            "-Inf".to_string()
        } else {
            "Inf".to_string()
        };
    }

    let scaled_i = scaled as i64;
    let negative = scaled_i < 0;
    let abs_i = scaled_i.unsigned_abs();
    let scale_u = scale_i64 as u64;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&(abs_i / scale_u).to_string());

    if decimals > 0 {
        let frac = (abs_i % scale_u).to_string();
        out.push('.');
        for _ in 0..decimals.saturating_sub(frac.len()) {
            out.push('0');
        }
        out.push_str(&frac);
    }

    out
}

/// Fewest decimals (up to 9) whose text parses back to `v`.
///
/// Past 9 decimals the value is rounded and trailing zeros dropped.
pub fn fmt_shortest(v: f64) -> String {
    if !v.is_finite() {
        return fmt_fixed(v, 0);
    }
    for decimals in 0..=MAX_DECIMALS {
        let text = fmt_fixed(v, decimals);
        if text.parse::<f64>() == Ok(v) {
            return text;
        }
    }

    let text = fmt_fixed(v, MAX_DECIMALS);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_coordinates_to_six_decimals() {
        assert_eq!(fmt_fixed(37.422, COORDINATE_DECIMALS), "37.422000");
        assert_eq!(fmt_fixed(-122.084, COORDINATE_DECIMALS), "-122.084000");
        assert_eq!(fmt_fixed(0.0000004, COORDINATE_DECIMALS), "0.000000");
    }

    #[test]
    fn rounds_accuracy() {
        assert_eq!(fmt_fixed(12.346, ACCURACY_DECIMALS), "12.35");
        assert_eq!(fmt_fixed(3.0, ACCURACY_DECIMALS), "3.00");
    }

    #[test]
    fn small_negatives_keep_their_sign() {
        assert_eq!(fmt_fixed(-0.5, 0), "-1");
        assert_eq!(fmt_fixed(-0.25, 1), "-0.3");
    }

    #[test]
    fn shortest_text_drops_trailing_zeros() {
        assert_eq!(fmt_shortest(37.422), "37.422");
        assert_eq!(fmt_shortest(-122.084), "-122.084");
        assert_eq!(fmt_shortest(2.0), "2");
        assert_eq!(fmt_shortest(-33.8688), "-33.8688");
    }

    #[test]
    fn shortest_text_caps_long_fractions() {
        assert_eq!(fmt_shortest(0.1 + 0.2), "0.3");
        assert_eq!(fmt_shortest(1.0 / 3.0), "0.333333333");
        assert_eq!(fmt_shortest(f64::NAN), "NaN");
    }

    #[test]
    fn non_finite_values_are_named() {
        assert_eq!(fmt_fixed(f64::NAN, 2), "NaN");
        assert_eq!(fmt_fixed(f64::INFINITY, 2), "Inf");
        assert_eq!(fmt_fixed(f64::NEG_INFINITY, 2), "-Inf");
    }
}
