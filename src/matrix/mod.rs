//! Square row-major matrices.
//!
//! Components are named `a, b, c, ...` reading left to right, top to bottom.
//! A singular matrix has no inverse; `inverse()` then returns the `NAN`
//! sentinel instead of failing.

pub mod matrix2d;
pub mod matrix3d;
pub mod matrix4d;

pub use matrix2d::Matrix2d;
pub use matrix3d::Matrix3d;
pub use matrix4d::Matrix4d;

use std::fmt;
use std::hash::Hasher;

use crate::math::quantize::{hash_f64, key_f64};

/// Writes `components` as `n` bracketed values per row.
pub(crate) fn write_rows(f: &mut fmt::Formatter<'_>, components: &[f64], n: usize) -> fmt::Result {
    for (row_index, row) in components.chunks(n).enumerate() {
        if row_index > 0 {
            f.write_str("\n")?;
        }
        for value in row {
            f.write_str("[")?;
            write_component(f, *value)?;
            f.write_str("]")?;
        }
    }
    Ok(())
}

fn write_component(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "+Infinity" } else { "-Infinity" })
    } else {
        let text = format!("{:.3}", value.abs());
        if value < 0.0 && text != "0.000" {
            write!(f, "-{text}")
        } else {
            write!(f, "+{text}")
        }
    }
}

pub(crate) fn components_eq(lhs: &[f64], rhs: &[f64]) -> bool {
    lhs.iter()
        .zip(rhs.iter())
        .all(|(a, b)| key_f64(*a) == key_f64(*b))
}

pub(crate) fn hash_components<H: Hasher>(components: &[f64], state: &mut H) {
    for value in components {
        hash_f64(*value, state);
    }
}
