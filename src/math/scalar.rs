//! Scalar helpers and the calibrated tolerance family.
//!
//! Each geometric operation carries its own error bound, so callers pick the
//! tolerance constant matching the operation they verify instead of relying
//! on a single global epsilon.

pub const EPSILON_E1: f64 = 1e-1;
pub const EPSILON_E2: f64 = 1e-2;
pub const EPSILON_E3: f64 = 1e-3;
pub const EPSILON_E4: f64 = 1e-4;
pub const EPSILON_E5: f64 = 1e-5;
pub const EPSILON_E6: f64 = 1e-6;
pub const EPSILON_E7: f64 = 1e-7;
pub const EPSILON_E8: f64 = 1e-8;
pub const EPSILON_E9: f64 = 1e-9;
pub const EPSILON_E10: f64 = 1e-10;
pub const EPSILON_E11: f64 = 1e-11;
pub const EPSILON_E12: f64 = 1e-12;
pub const EPSILON_E13: f64 = 1e-13;
pub const EPSILON_E14: f64 = 1e-14;
pub const EPSILON_E15: f64 = 1e-15;
pub const EPSILON_E16: f64 = 1e-16;
pub const EPSILON_E17: f64 = 1e-17;
pub const EPSILON_E18: f64 = 1e-18;
pub const EPSILON_E19: f64 = 1e-19;
pub const EPSILON_E20: f64 = 1e-20;
pub const EPSILON_E21: f64 = 1e-21;

/// Smallest positive normal double, the default for [`epsilon_equals`].
pub const EPSILON: f64 = f64::MIN_POSITIVE;

pub const DEG2RAD: f64 = std::f64::consts::PI / 180.0;
pub const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;
pub const HALF_DEG2RAD: f64 = DEG2RAD * 0.5;

/// Equatorial earth radius in metres (WGS84).
pub const R_MAJOR: f64 = 6_378_137.0;
/// Polar earth radius in metres (WGS84).
pub const R_MINOR: f64 = 6_356_752.314_245;
/// Mean earth radius in metres.
pub const R_AVERAGE: f64 = 6_371_000.0;
pub const C_EQUATORIAL: f64 = 40_075_017.0;
pub const C_MERIDIONAL: f64 = 40_075_017.0;

pub const EPSILON_F32_E1: f32 = 1e-1;
pub const EPSILON_F32_E2: f32 = 1e-2;
pub const EPSILON_F32_E3: f32 = 1e-3;
pub const EPSILON_F32_E4: f32 = 1e-4;
pub const EPSILON_F32_E5: f32 = 1e-5;
pub const EPSILON_F32_E6: f32 = 1e-6;
pub const EPSILON_F32_E7: f32 = 1e-7;
pub const EPSILON_F32_E8: f32 = 1e-8;

/// Smallest positive normal single, the default for [`epsilon_equals_f32`].
pub const EPSILON_F32: f32 = f32::MIN_POSITIVE;

/// Bounds `value` into `[min, max]`.
///
/// NaN passes through unchanged and no ordering is asserted between `min`
/// and `max`.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[must_use]
pub fn clamp01(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}

/// Returns `true` if `a` and `b` differ by no more than [`EPSILON`].
#[must_use]
pub fn epsilon_equals(a: f64, b: f64) -> bool {
    epsilon_equals_within(a, b, EPSILON)
}

/// Returns `true` if `|a - b| <= epsilon`.
#[must_use]
pub fn epsilon_equals_within(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Signed shortest angular difference `b - a` in degrees, within `[-180, 180]`.
#[must_use]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let mut difference = (b - a) % 360.0;
    if difference < -180.0 {
        difference += 360.0;
    } else if difference > 180.0 {
        difference -= 360.0;
    }
    difference
}

/// Angle halfway between `a` and `b` along the shortest arc, in degrees.
#[must_use]
pub fn mid_angle(a: f64, b: f64) -> f64 {
    a + 0.5 * angle_difference(a, b)
}

/// Kernel division rule for a single component.
///
/// A zero denominator yields an infinity carrying the numerator's sign, or
/// NaN when the numerator is itself zero or NaN. The sign of the zero
/// denominator is ignored.
#[must_use]
pub fn divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator == 0.0 || numerator.is_nan() {
            f64::NAN
        } else {
            f64::INFINITY.copysign(numerator)
        }
    } else {
        numerator / denominator
    }
}

/// Single-precision counterpart of [`divide`].
#[must_use]
pub fn divide_f32(numerator: f32, denominator: f32) -> f32 {
    if denominator == 0.0 {
        if numerator == 0.0 || numerator.is_nan() {
            f32::NAN
        } else {
            f32::INFINITY.copysign(numerator)
        }
    } else {
        numerator / denominator
    }
}

/// Product where a zero operand annihilates the other, including infinities.
///
/// Used by the cross products so that `0 * inf` contributes nothing instead
/// of NaN.
#[must_use]
pub(crate) fn annihilating_mul(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 {
        0.0
    } else {
        a * b
    }
}

/// Difference of two products that is exactly zero when they are equal,
/// including equal infinities.
#[must_use]
pub(crate) fn exact_difference(p: f64, q: f64) -> f64 {
    if p == q {
        0.0
    } else {
        p - q
    }
}

/// Sign of `value` as -1, 0 or 1. NaN counts as 0.
#[must_use]
pub(crate) fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

#[must_use]
pub fn clamp_f32(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[must_use]
pub fn clamp01_f32(value: f32) -> f32 {
    clamp_f32(value, 0.0, 1.0)
}

/// Returns `true` if `|a - b| <= epsilon`.
#[must_use]
pub fn epsilon_equals_f32(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}
