use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::{index_error, write_f32, Vector4d};
use crate::error::Result;
use crate::math::quantize::{hash_f32, key_f32};

/// Four-component single-precision vector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector4f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4f {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the component at `index`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::IndexOutOfRange` if `index > 3`.
    pub fn get(&self, index: usize) -> Result<f32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(index_error("Vector4f", index, 4)),
        }
    }

    #[must_use]
    pub fn to_f64(&self) -> Vector4d {
        Vector4d::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.z),
            f64::from(self.w),
        )
    }

    #[must_use]
    pub fn sqr_magnitude(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    #[must_use]
    pub fn magnitude(&self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    fn components(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl PartialEq for Vector4f {
    fn eq(&self, other: &Self) -> bool {
        self.components()
            .iter()
            .zip(other.components().iter())
            .all(|(a, b)| key_f32(*a) == key_f32(*b))
    }
}

impl Eq for Vector4f {}

impl Hash for Vector4f {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in self.components() {
            hash_f32(value, state);
        }
    }
}

impl fmt::Display for Vector4f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.components().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str("[")?;
            write_f32(f, value)?;
            f.write_str("]f")?;
        }
        Ok(())
    }
}

impl Neg for Vector4f {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Add for Vector4f {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl Sub for Vector4f {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl Mul<f32> for Vector4f {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_and_index() {
        let v = Vector4f::new(1.5, f32::INFINITY, -2.0, 0.0);
        assert_eq!(v.to_string(), "[1.5]f,[∞]f,[-2]f,[0]f");
        assert!((v.get(0).unwrap() - 1.5).abs() < f32::EPSILON);
        assert!(v.get(4).is_err());
    }

    #[test]
    fn arithmetic() {
        assert_eq!(Vector4f::ONE + Vector4f::ONE, Vector4f::ONE * 2.0);
        assert_eq!(-(Vector4f::ONE - Vector4f::ONE), Vector4f::ZERO);
        assert!((Vector4f::ONE.magnitude() - 2.0).abs() < f32::EPSILON);
    }
}
