//! Fixed-size vectors in double and single precision.
//!
//! The double-precision types carry the full algebra. The single-precision
//! mirrors exist for consumers that cannot take doubles and are bridged to
//! the double types only through the High/Low split.

pub mod vector2d;
pub mod vector2f;
pub mod vector3d;
pub mod vector3f;
pub mod vector4d;
pub mod vector4f;

pub use vector2d::Vector2d;
pub use vector2f::Vector2f;
pub use vector3d::Vector3d;
pub use vector3f::Vector3f;
pub use vector4d::Vector4d;
pub use vector4f::Vector4f;

use std::fmt;

/// Writes a double component, spelling out infinities. Magnitudes outside
/// `[1e-5, 1e16)` use the shortest exponent form.
pub(crate) fn write_f64(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value == f64::INFINITY {
        f.write_str("Infinity")
    } else if value == f64::NEG_INFINITY {
        f.write_str("-Infinity")
    } else if value != 0.0 && !(1e-5..1e16).contains(&value.abs()) {
        write!(f, "{value:e}")
    } else {
        write!(f, "{value}")
    }
}

/// Writes a single component, using the infinity glyph.
pub(crate) fn write_f32(f: &mut fmt::Formatter<'_>, value: f32) -> fmt::Result {
    if value == f32::INFINITY {
        f.write_str("∞")
    } else if value == f32::NEG_INFINITY {
        f.write_str("-∞")
    } else {
        write!(f, "{value}")
    }
}

/// Splits a double into its nearest single and the single-rounded residual.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn split(value: f64) -> (f32, f32) {
    let high = value as f32;
    let low = (value - f64::from(high)) as f32;
    (high, low)
}

/// Error used by every out-of-range component access.
pub(crate) fn index_error(kind: &'static str, index: usize, len: usize) -> crate::MapError {
    crate::error::MathError::IndexOutOfRange { kind, index, len }.into()
}
