//! Value quantization backing equality and hashing of the kernel types.
//!
//! Rounding every component to a fixed number of decimal places before both
//! comparison and hashing keeps `a == b` transitive and guarantees that equal
//! values hash identically, which a raw `|a - b| <= eps` comparison cannot.

use std::hash::Hasher;

/// Decimal places kept when comparing double-precision components.
pub const DOUBLE_DIGITS: i32 = 14;

/// Decimal places kept when comparing single-precision components.
pub const SINGLE_DIGITS: i32 = 6;

/// Scaled magnitude above which every double is already an integer.
const INTEGRAL_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Rounds `value` to `digits` decimal places.
///
/// Values too large to carry that many fractional digits are returned as-is.
/// The result is canonical: `-0.0` becomes `0.0` and every NaN payload maps
/// to the same NaN.
#[must_use]
pub fn quantize(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    let scaled = value * scale;
    let rounded = if scaled.abs() < INTEGRAL_LIMIT {
        scaled.round() / scale
    } else {
        value
    };
    canonical(rounded)
}

/// Equality/hash key of a double-precision component.
#[must_use]
pub fn key_f64(value: f64) -> u64 {
    quantize(value, DOUBLE_DIGITS).to_bits()
}

/// Equality/hash key of a single-precision component.
///
/// The value is widened before scaling so the rounding step is exact.
#[must_use]
pub fn key_f32(value: f32) -> u64 {
    quantize(f64::from(value), SINGLE_DIGITS).to_bits()
}

pub(crate) fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    state.write_u64(key_f64(value));
}

pub(crate) fn hash_f32<H: Hasher>(value: f32, state: &mut H) {
    state.write_u64(key_f32(value));
}

fn canonical(value: f64) -> f64 {
    if value.is_nan() {
        f64::NAN
    } else if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn noise_below_threshold_is_absorbed() {
        assert_eq!(key_f64(0.1 + 0.2), key_f64(0.3));
        assert_eq!(key_f64(72.002_311_593_573_149), key_f64(72.002_311_593_573_151));
        assert_eq!(key_f64(1.0), key_f64(1.0 + 4.0 * f64::EPSILON));
    }

    #[test]
    fn differences_at_threshold_are_kept() {
        assert_ne!(key_f64(1.0), key_f64(1.0 + 1e-13));
        assert_ne!(key_f32(72.002_311), key_f32(72.002_316));
    }

    #[test]
    fn signed_zero_and_nan_are_canonical() {
        assert_eq!(key_f64(0.0), key_f64(-0.0));
        assert_eq!(key_f64(f64::NAN), key_f64(-f64::NAN));
        assert_eq!(key_f64(1e-15), key_f64(-1e-15));
        assert_eq!(key_f32(f32::NAN), key_f32(f32::NAN));
    }

    #[test]
    fn infinities_and_large_values_pass_through() {
        assert_ne!(key_f64(f64::INFINITY), key_f64(f64::NEG_INFINITY));
        assert_ne!(key_f64(f64::MAX), key_f64(f64::INFINITY));
        assert_eq!(quantize(1e300, DOUBLE_DIGITS).to_bits(), 1e300_f64.to_bits());
        assert_eq!(quantize(f64::MIN, DOUBLE_DIGITS).to_bits(), f64::MIN.to_bits());
    }

    #[test]
    fn rounds_to_requested_digits() {
        assert!((quantize(1.234_567, 3) - 1.235).abs() < 1e-12);
        assert!((quantize(-1.234_567, 2) + 1.23).abs() < 1e-12);
    }
}
