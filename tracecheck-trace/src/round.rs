//! Fixed-precision rounding applied before every floating-point comparison.
//!
//! The engine under test and the reference engine print coordinates with
//! different internal precision, so raw equality is meaningless.

/// Round half to even at `digits` decimal places.
#[inline]
pub fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(digits as i32);
    (value * scale).round_ties_even() / scale
}

/// Round every component of a point.
#[inline]
pub fn round_point(point: [f64; 3], digits: u32) -> [f64; 3] {
    point.map(|v| round_to(v, digits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rounds_to_four_digits() {
        assert_eq!(round_to(1.23448, 4), 1.2345);
        assert_eq!(round_to(-2.99996, 4), -3.0);
        assert_eq!(round_to(0.00012, 4), 0.0001);
    }

    #[test]
    fn sub_precision_difference_collapses() {
        let a = 1.23448;
        let b = a + 0.00005;
        assert_eq!(round_to(a, 4), round_to(b, 4));
        assert_ne!(round_to(1.2345, 4), round_to(1.2346, 4));
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert!(round_to(f64::NAN, 4).is_nan());
        assert_eq!(round_to(f64::INFINITY, 4), f64::INFINITY);
    }

    proptest! {
        #[test]
        fn rounding_is_idempotent(x in -1.0e6f64..1.0e6, digits in 0u32..=8) {
            let once = round_to(x, digits);
            prop_assert_eq!(round_to(once, digits), once);
        }
    }
}
