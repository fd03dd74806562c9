use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::{index_error, write_f32, Vector3d};
use crate::error::Result;
use crate::math::quantize::{hash_f32, key_f32};
use crate::math::scalar::divide_f32;

/// Three-component single-precision vector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3f {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);
    pub const POSITIVE_INFINITY: Self = Self::splat(f32::INFINITY);
    pub const NEGATIVE_INFINITY: Self = Self::splat(f32::NEG_INFINITY);
    pub const NAN: Self = Self::splat(f32::NAN);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self {
            x: value,
            y: value,
            z: value,
        }
    }

    /// Returns the component at `index`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::IndexOutOfRange` if `index > 2`.
    pub fn get(&self, index: usize) -> Result<f32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(index_error("Vector3f", index, 3)),
        }
    }

    #[must_use]
    pub fn to_f64(&self) -> Vector3d {
        Vector3d::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    #[must_use]
    pub fn magnitude(&self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    #[must_use]
    pub fn sqr_magnitude(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[must_use]
    pub fn normalised(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Self::ZERO;
        }
        *self / magnitude
    }

    pub fn normalise(&mut self) {
        *self = self.normalised();
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    #[must_use]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl PartialEq for Vector3f {
    fn eq(&self, other: &Self) -> bool {
        key_f32(self.x) == key_f32(other.x)
            && key_f32(self.y) == key_f32(other.y)
            && key_f32(self.z) == key_f32(other.z)
    }
}

impl Eq for Vector3f {}

impl Hash for Vector3f {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f32(self.x, state);
        hash_f32(self.y, state);
        hash_f32(self.z, state);
    }
}

impl fmt::Display for Vector3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in [self.x, self.y, self.z].into_iter().enumerate() {
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

impl Neg for Vector3f {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for Vector3f {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3f {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3f {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vector3f {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(
            divide_f32(self.x, rhs),
            divide_f32(self.y, rhs),
            divide_f32(self.z, rhs),
        )
    }
}
